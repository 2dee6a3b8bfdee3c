//! Detail screen presenter
//!
//! Drives a [`DetailView`] from lifecycle callbacks and user actions. All
//! calls arrive sequentially from the host's event dispatch; nothing here
//! blocks or awaits.
//!
//! State machine per activation:
//!
//! ```text
//! Uninitialized --activate(Some)--> Ready --(play/trailer/health/resume)--> Ready
//!       |
//!       +--------activate(None)--> Terminated
//! ```

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{
    DeviceProfile, LayoutHints, MediaKind, MediaRecord, RouteDecision, TorrentHealth,
    TransitionHint,
};
use crate::router::PlaybackRouter;
use crate::stream::CastingCoordinator;

/// Errors surfaced to the screen host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PresenterError {
    /// Screen opened without a media record; the host should close it
    #[error("No media record to display")]
    MissingSubject,
}

/// Rendering surface of the detail screen
pub trait DetailView {
    /// Presentation environment of this surface
    fn device_profile(&self) -> DeviceProfile;

    fn apply_layout_hints(&mut self, hints: &LayoutHints);
    fn load_background_image(&mut self, url: &str);
    fn render_movie(&mut self, media: &MediaRecord);
    fn render_show(&mut self, media: &MediaRecord);
    fn show_dialog(&mut self, title_key: &str, message_key: &str);
    fn navigate_staged_loading(
        &mut self,
        media: &MediaRecord,
        transition: Option<&TransitionHint>,
    );
    fn navigate_direct_player(&mut self, media: &MediaRecord);
    fn navigate_trailer(&mut self, media: &MediaRecord, url: &str);
    fn show_health_banner(&mut self, classification_key: &str, seeds: u32, peers: u32);
}

/// Lifecycle state of one screen activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresenterState {
    #[default]
    Uninitialized,
    Ready,
    Terminated,
}

/// Presenter for the media detail screen
pub struct DetailPresenter<V: DetailView> {
    view: V,
    router: PlaybackRouter,
    casting: Arc<dyn CastingCoordinator>,
    state: PresenterState,
    media: Option<Arc<MediaRecord>>,
    profile: Option<DeviceProfile>,
    /// A playback flow was launched and the screen has not resumed since
    launch_in_flight: bool,
}

impl<V: DetailView> DetailPresenter<V> {
    pub fn new(view: V, casting: Arc<dyn CastingCoordinator>) -> Self {
        Self {
            view,
            router: PlaybackRouter::new(),
            casting,
            state: PresenterState::Uninitialized,
            media: None,
            profile: None,
            launch_in_flight: false,
        }
    }

    pub fn state(&self) -> PresenterState {
        self.state
    }

    pub fn media(&self) -> Option<&Arc<MediaRecord>> {
        self.media.as_ref()
    }

    pub fn profile(&self) -> Option<&DeviceProfile> {
        self.profile.as_ref()
    }

    pub fn launch_in_flight(&self) -> bool {
        self.launch_in_flight
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Bind the screen to its media record and lay it out
    pub fn activate(&mut self, media: Option<Arc<MediaRecord>>) -> Result<(), PresenterError> {
        if self.state != PresenterState::Uninitialized {
            warn!(state = ?self.state, "activate ignored: screen already activated");
            return Ok(());
        }

        let Some(media) = media else {
            warn!("activated without a media record, terminating");
            self.state = PresenterState::Terminated;
            return Err(PresenterError::MissingSubject);
        };

        let profile = self.view.device_profile();
        info!(media = %media.id, title = %media.title, ?profile, "detail screen activated");

        let hints = self.router.decide_layout(&media, &profile);
        self.view.apply_layout_hints(&hints);
        self.view
            .load_background_image(background_image_for(&media, &profile));

        match media.kind {
            MediaKind::Movie => self.view.render_movie(&media),
            MediaKind::Show => self.view.render_show(&media),
        }

        self.media = Some(media);
        self.profile = Some(profile);
        self.state = PresenterState::Ready;
        Ok(())
    }

    /// Screen became the foreground surface again
    ///
    /// Quiesces streaming, the casting server and the casting notification
    /// every time, whatever state the screen is in.
    pub fn on_resume_visible(&mut self) {
        debug!("resume visible: quiescing casting");
        self.casting.stop_active_streaming();
        self.casting.stop_casting_server();
        self.casting.cancel_casting_notification();
        self.launch_in_flight = false;
    }

    // -------------------------------------------------------------------------
    // User actions
    // -------------------------------------------------------------------------

    /// Play affordance pressed
    pub fn on_play_requested(&mut self) {
        let Some((media, profile)) = self.playback_subject() else {
            return;
        };
        let decision = self.router.decide_playback(&media, &profile);
        self.launch(decision);
    }

    /// Explicit request to skip staged loading and open the player
    pub fn on_direct_play_requested(&mut self) {
        let Some((media, _)) = self.playback_subject() else {
            return;
        };
        let decision = self.router.decide_direct_playback(&media);
        self.launch(decision);
    }

    /// Trailer requested for the current media
    pub fn on_trailer_requested(&mut self, url: &str) {
        let Some(media) = self.ready_media() else {
            debug!("trailer request ignored: no media");
            return;
        };

        let decision = match self.router.decide_trailer(&media, url) {
            Ok(decision) => decision,
            Err(e) => {
                warn!(media = %media.id, error = %e, "trailer unavailable");
                self.router.decide_error_dialog()
            }
        };
        self.dispatch(decision);
    }

    /// Swarm health requested for the current media
    pub fn on_health_requested(&mut self, seeds: u32, peers: u32) {
        if self.ready_media().is_none() {
            debug!("health request ignored: no media");
            return;
        }
        let health = TorrentHealth::calculate(seeds, peers);
        let decision = self.router.decide_health_display(health, seeds, peers);
        self.dispatch(decision);
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn ready_media(&self) -> Option<Arc<MediaRecord>> {
        match self.state {
            PresenterState::Ready => self.media.clone(),
            _ => None,
        }
    }

    /// Media and profile for a playback launch, if one may start now
    fn playback_subject(&self) -> Option<(Arc<MediaRecord>, DeviceProfile)> {
        let media = self.ready_media();
        let (Some(media), Some(profile)) = (media, self.profile) else {
            debug!("play request ignored: no media");
            return None;
        };
        if self.launch_in_flight {
            debug!(media = %media.id, "play request ignored: launch already in flight");
            return None;
        }
        Some((media, profile))
    }

    fn launch(&mut self, decision: RouteDecision) {
        self.launch_in_flight = decision.is_navigation();
        self.dispatch(decision);
    }

    /// Hand a decision to the view
    fn dispatch(&mut self, decision: RouteDecision) {
        match decision {
            RouteDecision::OpenStagedLoading { media, transition } => {
                self.view.navigate_staged_loading(&media, transition.as_ref())
            }
            RouteDecision::OpenDirectPlayer { media } => self.view.navigate_direct_player(&media),
            RouteDecision::OpenTrailer { media, url } => self.view.navigate_trailer(&media, &url),
            RouteDecision::ShowHealthInfo {
                classification_key,
                seeds,
                peers,
                ..
            } => self.view.show_health_banner(classification_key, seeds, peers),
            RouteDecision::ShowDialog {
                title_key,
                message_key,
            } => self.view.show_dialog(title_key, message_key),
        }
    }
}

impl<V: DetailView + std::fmt::Debug> std::fmt::Debug for DetailPresenter<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailPresenter")
            .field("view", &self.view)
            .field("state", &self.state)
            .field("media", &self.media)
            .field("launch_in_flight", &self.launch_in_flight)
            .finish_non_exhaustive()
    }
}

/// Header image on large or landscape surfaces, poster otherwise
pub fn background_image_for<'a>(media: &'a MediaRecord, profile: &DeviceProfile) -> &'a str {
    if profile.is_large_screen || !profile.is_portrait {
        &media.header_image_url
    } else {
        &media.image_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media() -> MediaRecord {
        MediaRecord {
            id: "s1".into(),
            title: "Dark".into(),
            color: 0x336699,
            image_url: "poster.jpg".into(),
            header_image_url: "header.jpg".into(),
            kind: MediaKind::Show,
            year: Some(2017),
            synopsis: None,
            trailer: None,
            swarm: None,
        }
    }

    fn profile(large: bool, portrait: bool) -> DeviceProfile {
        DeviceProfile {
            is_large_screen: large,
            is_portrait: portrait,
            platform_tier: 21,
            viewport_height: 30,
        }
    }

    #[test]
    fn test_background_poster_on_compact_portrait() {
        assert_eq!(background_image_for(&media(), &profile(false, true)), "poster.jpg");
    }

    #[test]
    fn test_background_header_on_landscape() {
        assert_eq!(background_image_for(&media(), &profile(false, false)), "header.jpg");
    }

    #[test]
    fn test_background_header_on_large_screen() {
        assert_eq!(background_image_for(&media(), &profile(true, true)), "header.jpg");
    }
}
