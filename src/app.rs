//! App state and screen hosting
//!
//! Hosts one detail screen activation: owns the presenter, a stack of
//! launched screens, and delivers the lifecycle callbacks (activation,
//! resume-visible) the presenter expects from its host.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info};

use crate::models::{DeviceProfile, MediaRecord};
use crate::presenter::{DetailPresenter, PresenterError};
use crate::stream::{CastManager, CastNotification, StreamingSession};
use crate::ui::detail::Navigation;
use crate::ui::TerminalDetailView;

// =============================================================================
// Screens
// =============================================================================

/// Screen currently in the foreground
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Screen {
    /// The media detail screen
    #[default]
    Detail,
    /// Stream preparation before playback
    StagedLoading {
        title: String,
        transition: Option<String>,
    },
    /// Player opened directly, without staged loading
    DirectPlayer { title: String },
    /// Trailer playback
    Trailer { title: String, url: String },
}

impl From<Navigation> for Screen {
    fn from(nav: Navigation) -> Self {
        match nav {
            Navigation::StagedLoading { media, transition } => Screen::StagedLoading {
                title: media.title,
                transition: transition.map(|t| t.name),
            },
            Navigation::DirectPlayer { media } => Screen::DirectPlayer { title: media.title },
            Navigation::Trailer { media, url } => Screen::Trailer {
                title: media.title,
                url,
            },
        }
    }
}

static DETAIL_SCREEN: Screen = Screen::Detail;

// =============================================================================
// Main Application State
// =============================================================================

/// Terminal host of the detail screen
#[derive(Debug)]
pub struct App {
    /// Whether the app is running
    pub running: bool,
    /// Launched screens above the detail screen
    pub nav_stack: Vec<Screen>,
    presenter: DetailPresenter<TerminalDetailView>,
    cast: Arc<CastManager>,
}

impl App {
    /// Activate the detail screen for `media`
    ///
    /// Fails with `MissingSubject` when there is nothing to show; the caller
    /// should exit without drawing anything.
    pub fn open(
        media: Option<MediaRecord>,
        profile: DeviceProfile,
        cast: Arc<CastManager>,
    ) -> Result<Self, PresenterError> {
        let view = TerminalDetailView::new(profile);
        let mut presenter = DetailPresenter::new(view, cast.clone());
        presenter.activate(media.map(Arc::new))?;

        let mut app = Self {
            running: true,
            nav_stack: Vec::new(),
            presenter,
            cast,
        };
        // First time the screen becomes visible
        app.presenter.on_resume_visible();
        Ok(app)
    }

    pub fn screen(&self) -> &Screen {
        self.nav_stack.last().unwrap_or(&DETAIL_SCREEN)
    }

    pub fn view(&self) -> &TerminalDetailView {
        self.presenter.view()
    }

    pub fn presenter(&self) -> &DetailPresenter<TerminalDetailView> {
        &self.presenter
    }

    pub fn cast(&self) -> &CastManager {
        &self.cast
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Push every screen the presenter asked for
    fn drain_navigation(&mut self) {
        while let Some(nav) = self.presenter.view_mut().take_navigation() {
            let screen = Screen::from(nav);
            info!(?screen, "launching flow");
            self.enter(screen);
        }
    }

    /// Stand in for the launched flow acquiring streaming resources
    fn enter(&mut self, screen: Screen) {
        match &screen {
            Screen::StagedLoading { title, .. } | Screen::DirectPlayer { title } => {
                let session = StreamingSession::new(title.clone());
                let notification = CastNotification {
                    session: session.id,
                    text: format!("Streaming {}", title),
                };
                self.cast.begin_streaming(session);
                self.cast.post_notification(notification);
            }
            Screen::Trailer { .. } | Screen::Detail => {}
        }
        self.nav_stack.push(screen);
    }

    /// Leave the launched screen and resume the detail screen
    fn back(&mut self) -> bool {
        if self.nav_stack.pop().is_none() {
            return false;
        }
        debug!("returned to detail screen");
        self.presenter.on_resume_visible();
        true
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.nav_stack.is_empty() {
            self.handle_detail_key(key)
        } else {
            self.handle_launched_key(key)
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
        // Overlays swallow dismiss keys first
        if self.presenter.view().has_overlay()
            && matches!(key.code, KeyCode::Esc | KeyCode::Enter)
        {
            return self.presenter.view_mut().dismiss_overlay();
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit();
                true
            }
            KeyCode::Enter | KeyCode::Char('p') => {
                self.presenter.on_play_requested();
                self.drain_navigation();
                true
            }
            KeyCode::Char('t') => {
                let url = self
                    .presenter
                    .media()
                    .and_then(|m| m.trailer.clone())
                    .unwrap_or_default();
                self.presenter.on_trailer_requested(&url);
                self.drain_navigation();
                true
            }
            KeyCode::Char('h') => {
                let swarm = self
                    .presenter
                    .media()
                    .and_then(|m| m.swarm)
                    .unwrap_or_default();
                self.presenter.on_health_requested(swarm.seeds, swarm.peers);
                true
            }
            _ => false,
        }
    }

    fn handle_launched_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => self.back(),
            KeyCode::Char('q') => {
                self.quit();
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaKind, SwarmStats};

    fn movie() -> MediaRecord {
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
            swarm: Some(SwarmStats { seeds: 30, peers: 10 }),
        }
    }

    fn profile() -> DeviceProfile {
        DeviceProfile::for_terminal(80, 40, 21, 120)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_open_without_media_is_missing_subject() {
        let err = App::open(None, profile(), Arc::new(CastManager::new())).unwrap_err();
        assert_eq!(err, PresenterError::MissingSubject);
    }

    #[test]
    fn test_play_pushes_staged_loading() {
        let mut app = App::open(Some(movie()), profile(), Arc::new(CastManager::new())).unwrap();
        assert_eq!(app.screen(), &Screen::Detail);

        app.handle_key(key(KeyCode::Char('p')));
        assert_eq!(
            app.screen(),
            &Screen::StagedLoading {
                title: "Arrival".into(),
                transition: Some("background_image:tt2543164".into()),
            }
        );
        assert!(!app.cast().is_idle());
    }

    #[test]
    fn test_back_quiesces_casting() {
        let mut app = App::open(Some(movie()), profile(), Arc::new(CastManager::new())).unwrap();
        app.handle_key(key(KeyCode::Enter));
        assert!(app.cast().streaming_session().is_some());

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen(), &Screen::Detail);
        assert!(app.cast().is_idle());
        assert!(app.running);
    }

    #[test]
    fn test_trailer_key_opens_trailer() {
        let mut app = App::open(Some(movie()), profile(), Arc::new(CastManager::new())).unwrap();
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(
            app.screen(),
            &Screen::Trailer {
                title: "Arrival".into(),
                url: "https://trailers.example/arrival".into(),
            }
        );
    }

    #[test]
    fn test_missing_trailer_shows_dialog() {
        let mut media = movie();
        media.trailer = None;
        let mut app = App::open(Some(media), profile(), Arc::new(CastManager::new())).unwrap();

        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.screen(), &Screen::Detail);
        assert!(app.view().dialog.is_some());

        // Esc closes the dialog, not the screen
        app.handle_key(key(KeyCode::Esc));
        assert!(app.view().dialog.is_none());
        assert!(app.running);
    }

    #[test]
    fn test_health_key_shows_banner() {
        let mut app = App::open(Some(movie()), profile(), Arc::new(CastManager::new())).unwrap();
        app.handle_key(key(KeyCode::Char('h')));
        assert_eq!(
            app.view().banner.as_deref(),
            Some("Health: Good - Seeds: 30 - Peers: 10")
        );
    }

    #[test]
    fn test_esc_on_detail_closes() {
        let mut app = App::open(Some(movie()), profile(), Arc::new(CastManager::new())).unwrap();
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.running);
    }

    #[test]
    fn test_quit_ctrl_c_from_launched_screen() {
        let mut app = App::open(Some(movie()), profile(), Arc::new(CastManager::new())).unwrap();
        app.handle_key(key(KeyCode::Char('p')));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!app.running);
    }
}
