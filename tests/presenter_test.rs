//! Presenter tests for detailcast
//!
//! Drives `DetailPresenter` with a `RecordingView` and a counting casting
//! coordinator, and checks the ordered view calls for each lifecycle event
//! and user action.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use detailcast::models::{LayoutHints, TransitionHint};
use detailcast::ui::{RecordingView, ViewEvent};
use detailcast::{
    CastingCoordinator, DetailPresenter, DeviceProfile, LayoutStrategy, MediaKind, MediaRecord,
    PresenterError, PresenterState,
};

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Debug, Default)]
struct CountingCoordinator {
    streaming: AtomicUsize,
    server: AtomicUsize,
    notification: AtomicUsize,
}

impl CountingCoordinator {
    fn counts(&self) -> (usize, usize, usize) {
        (
            self.streaming.load(Ordering::SeqCst),
            self.server.load(Ordering::SeqCst),
            self.notification.load(Ordering::SeqCst),
        )
    }
}

impl CastingCoordinator for CountingCoordinator {
    fn stop_active_streaming(&self) {
        self.streaming.fetch_add(1, Ordering::SeqCst);
    }

    fn stop_casting_server(&self) {
        self.server.fetch_add(1, Ordering::SeqCst);
    }

    fn cancel_casting_notification(&self) {
        self.notification.fetch_add(1, Ordering::SeqCst);
    }
}

fn arrival() -> MediaRecord {
    MediaRecord {
        id: "tt2543164".into(),
        title: "Arrival".into(),
        color: 0xFF0000,
        image_url: "poster.jpg".into(),
        header_image_url: "header.jpg".into(),
        kind: MediaKind::Movie,
        year: Some(2016),
        synopsis: None,
        trailer: Some("https://trailers.example/arrival".into()),
        swarm: None,
    }
}

fn phone() -> DeviceProfile {
    DeviceProfile {
        is_large_screen: false,
        is_portrait: true,
        platform_tier: 23,
        viewport_height: 1920,
    }
}

fn tablet() -> DeviceProfile {
    DeviceProfile {
        is_large_screen: true,
        is_portrait: true,
        platform_tier: 23,
        viewport_height: 1200,
    }
}

type Fixture = (DetailPresenter<RecordingView>, Arc<CountingCoordinator>);

fn presenter(profile: DeviceProfile) -> Fixture {
    let coordinator = Arc::new(CountingCoordinator::default());
    let presenter = DetailPresenter::new(RecordingView::new(profile), coordinator.clone());
    (presenter, coordinator)
}

fn activated(profile: DeviceProfile, media: MediaRecord) -> DetailPresenter<RecordingView> {
    let (mut presenter, _) = presenter(profile);
    presenter.activate(Some(Arc::new(media))).unwrap();
    presenter.view_mut().take_events();
    presenter
}

// =============================================================================
// ACTIVATION
// =============================================================================

#[test]
fn test_activate_without_media_never_renders() {
    let (mut presenter, coordinator) = presenter(phone());

    let err = presenter.activate(None).unwrap_err();
    assert_eq!(err, PresenterError::MissingSubject);
    assert_eq!(presenter.state(), PresenterState::Terminated);
    assert!(presenter.view().events().is_empty());
    assert_eq!(coordinator.counts(), (0, 0, 0));

    // Actions after termination do nothing
    presenter.on_play_requested();
    presenter.on_trailer_requested("https://x");
    presenter.on_health_requested(10, 2);
    assert!(presenter.view().events().is_empty());
}

#[test]
fn test_activate_arrival_on_phone() {
    let (mut presenter, _) = presenter(phone());
    presenter.activate(Some(Arc::new(arrival()))).unwrap();

    assert_eq!(presenter.state(), PresenterState::Ready);
    assert_eq!(
        presenter.view().events(),
        &[
            ViewEvent::ApplyLayoutHints {
                hints: LayoutHints {
                    title: "Arrival".into(),
                    scrim_color: 0xFF0000,
                    strategy: LayoutStrategy::FixedBackground { height: 1280 },
                    play_tint: Some(0xFF0000),
                },
            },
            ViewEvent::LoadBackgroundImage {
                url: "poster.jpg".into()
            },
            ViewEvent::RenderMovie {
                id: "tt2543164".into(),
                title: "Arrival".into(),
            },
        ]
    );
}

#[test]
fn test_activate_show_on_tablet() {
    let mut show = arrival();
    show.id = "tt5753856".into();
    show.title = "Dark".into();
    show.kind = MediaKind::Show;

    let (mut presenter, _) = presenter(tablet());
    presenter.activate(Some(Arc::new(show))).unwrap();

    let events = presenter.view().events();
    assert_eq!(events.len(), 3);
    match &events[0] {
        ViewEvent::ApplyLayoutHints { hints } => {
            assert_eq!(hints.strategy, LayoutStrategy::ScrollOverlay { overlay_top: 800 });
            assert_eq!(hints.play_tint, None);
        }
        other => panic!("expected layout hints first, got {:?}", other),
    }
    assert_eq!(
        events[1],
        ViewEvent::LoadBackgroundImage {
            url: "header.jpg".into()
        }
    );
    assert!(matches!(events[2], ViewEvent::RenderShow { .. }));
    // Exactly one render call
    assert_eq!(events.iter().filter(|e| e.is_render()).count(), 1);
}

#[test]
fn test_profile_queried_once_per_activation() {
    let mut presenter = activated(phone(), arrival());
    presenter.on_play_requested();
    presenter.on_resume_visible();
    presenter.on_play_requested();
    assert_eq!(presenter.view().profile_queries(), 1);
    assert_eq!(presenter.profile(), Some(&phone()));
}

#[test]
fn test_second_activation_is_ignored() {
    let mut presenter = activated(phone(), arrival());
    presenter.activate(None).unwrap();
    assert_eq!(presenter.state(), PresenterState::Ready);
    assert!(presenter.view().events().is_empty());
}

#[test]
fn test_presenter_shares_media_record() {
    let media = Arc::new(arrival());
    let (mut presenter, _) = presenter(phone());
    presenter.activate(Some(media.clone())).unwrap();
    assert!(Arc::ptr_eq(presenter.media().unwrap(), &media));
}

// =============================================================================
// RESUME
// =============================================================================

#[test]
fn test_resume_issues_each_stop_once() {
    let (mut presenter, coordinator) = presenter(phone());
    presenter.activate(Some(Arc::new(arrival()))).unwrap();
    presenter.view_mut().take_events();

    presenter.on_resume_visible();
    assert_eq!(coordinator.counts(), (1, 1, 1));
    assert!(presenter.view().events().is_empty());

    presenter.on_resume_visible();
    assert_eq!(coordinator.counts(), (2, 2, 2));
}

#[test]
fn test_resume_quiesces_before_activation() {
    let (mut presenter, coordinator) = presenter(phone());
    presenter.on_resume_visible();
    assert_eq!(coordinator.counts(), (1, 1, 1));
    assert_eq!(presenter.state(), PresenterState::Uninitialized);
}

// =============================================================================
// PLAYBACK
// =============================================================================

#[test]
fn test_play_on_phone_opens_staged_loading_with_hint() {
    let mut presenter = activated(phone(), arrival());
    presenter.on_play_requested();

    assert_eq!(
        presenter.view().events(),
        &[ViewEvent::NavigateStagedLoading {
            id: "tt2543164".into(),
            transition: Some(TransitionHint {
                element: "background_image".into(),
                name: "background_image:tt2543164".into(),
            }),
        }]
    );
}

#[test]
fn test_play_on_old_platform_has_no_hint() {
    let mut profile = phone();
    profile.platform_tier = 19;
    let mut presenter = activated(profile, arrival());
    presenter.on_play_requested();

    assert_eq!(
        presenter.view().events(),
        &[ViewEvent::NavigateStagedLoading {
            id: "tt2543164".into(),
            transition: None,
        }]
    );
}

#[test]
fn test_play_on_tablet_still_staged_loading() {
    let mut presenter = activated(tablet(), arrival());
    presenter.on_play_requested();
    let events = presenter.view().events();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], ViewEvent::NavigateStagedLoading { .. }));
}

#[test]
fn test_repeat_play_is_ignored_until_resume() {
    let mut presenter = activated(phone(), arrival());

    presenter.on_play_requested();
    presenter.on_play_requested();
    presenter.on_direct_play_requested();
    assert_eq!(presenter.view().events().len(), 1);
    assert!(presenter.launch_in_flight());

    presenter.on_resume_visible();
    assert!(!presenter.launch_in_flight());

    presenter.on_play_requested();
    assert_eq!(presenter.view().events().len(), 2);
}

#[test]
fn test_direct_play_opens_player() {
    let mut presenter = activated(phone(), arrival());
    presenter.on_direct_play_requested();
    assert_eq!(
        presenter.view().events(),
        &[ViewEvent::NavigateDirectPlayer {
            id: "tt2543164".into()
        }]
    );
}

// =============================================================================
// TRAILER
// =============================================================================

#[test]
fn test_trailer_empty_url_shows_error_dialog() {
    let mut presenter = activated(phone(), arrival());
    presenter.on_trailer_requested("");

    assert_eq!(
        presenter.view().events(),
        &[ViewEvent::ShowDialog {
            title_key: "error".into(),
            message_key: "error_generic".into(),
        }]
    );
    assert!(!presenter.view().events().iter().any(ViewEvent::is_navigation));
}

#[test]
fn test_trailer_url_opens_trailer() {
    let mut presenter = activated(phone(), arrival());
    presenter.on_trailer_requested("https://x");

    assert_eq!(
        presenter.view().events(),
        &[ViewEvent::NavigateTrailer {
            id: "tt2543164".into(),
            url: "https://x".into(),
        }]
    );
}

#[test]
fn test_trailer_does_not_block_play() {
    let mut presenter = activated(phone(), arrival());
    presenter.on_trailer_requested("https://x");
    presenter.on_play_requested();
    assert_eq!(presenter.view().events().len(), 2);
}

// =============================================================================
// HEALTH
// =============================================================================

#[test]
fn test_health_banner() {
    let mut presenter = activated(phone(), arrival());
    presenter.on_health_requested(30, 10);

    assert_eq!(
        presenter.view().events(),
        &[ViewEvent::ShowHealthBanner {
            classification_key: "health_good".into(),
            seeds: 30,
            peers: 10,
        }]
    );
}
