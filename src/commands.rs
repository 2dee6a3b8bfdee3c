//! CLI Command Handlers
//!
//! Each handler activates a real `DetailPresenter` over a `RecordingView`,
//! performs the requested action, and prints the recorded view calls.
//! Handlers take CLI args, a device profile and Output, and return ExitCode.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::cli::{ExitCode, HealthCmd, LayoutCmd, Output, PlayCmd, TrailerCmd};
use crate::models::{DeviceProfile, MediaRecord, TorrentHealth};
use crate::presenter::{DetailPresenter, PresenterError};
use crate::stream::CastManager;
use crate::ui::strings;
use crate::ui::{RecordingView, ViewEvent};

// =============================================================================
// Shared Screen Runner
// =============================================================================

/// User action performed after activation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAction {
    /// Activation only
    None,
    /// Play affordance (or direct player when `direct`)
    Play { direct: bool },
    /// Trailer request with this URL
    Trailer(String),
}

/// What the screen did, as printed by the CLI
#[derive(Debug, Clone, Serialize)]
pub struct ScreenReport {
    pub media: String,
    pub profile: DeviceProfile,
    /// Activation events followed by the action's events
    pub events: Vec<ViewEvent>,
}

/// Activate a detail screen for `media` and perform `action`
pub fn run_screen(
    media: Option<MediaRecord>,
    profile: DeviceProfile,
    action: &ScreenAction,
) -> Result<ScreenReport, PresenterError> {
    let cast = Arc::new(CastManager::new());
    let mut presenter = DetailPresenter::new(RecordingView::new(profile), cast);

    presenter.activate(media.map(Arc::new))?;
    presenter.on_resume_visible();

    match action {
        ScreenAction::None => {}
        ScreenAction::Play { direct: false } => presenter.on_play_requested(),
        ScreenAction::Play { direct: true } => presenter.on_direct_play_requested(),
        ScreenAction::Trailer(url) => presenter.on_trailer_requested(url),
    }

    let media = presenter
        .media()
        .map(|m| m.id.clone())
        .unwrap_or_default();
    let events = presenter.into_view().take_events();
    debug!(%media, events = events.len(), "screen run complete");

    Ok(ScreenReport {
        media,
        profile,
        events,
    })
}

/// Load the media file, mapping failures to exit codes
fn load_media(path: Option<&Path>, output: &Output) -> Result<Option<MediaRecord>, ExitCode> {
    let Some(path) = path else {
        return Ok(None);
    };
    MediaRecord::load(path).map(Some).map_err(|e| {
        warn!(path = %path.display(), error = %e, "media record rejected");
        output.error(format!("{:#}", e), ExitCode::InvalidMedia)
    })
}

fn report(
    media: Option<MediaRecord>,
    profile: DeviceProfile,
    action: ScreenAction,
    output: &Output,
) -> ExitCode {
    match run_screen(media, profile, &action) {
        Ok(report) => {
            if let Err(e) = output.print(&report) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            ExitCode::Success
        }
        Err(e @ PresenterError::MissingSubject) => {
            output.error(e.to_string(), ExitCode::MissingSubject)
        }
    }
}

// =============================================================================
// Layout Command
// =============================================================================

pub fn layout_cmd(cmd: LayoutCmd, profile: DeviceProfile, output: &Output) -> ExitCode {
    let media = match load_media(cmd.file.as_deref(), output) {
        Ok(media) => media,
        Err(code) => return code,
    };
    report(media, profile, ScreenAction::None, output)
}

// =============================================================================
// Play Command
// =============================================================================

pub fn play_cmd(cmd: PlayCmd, profile: DeviceProfile, output: &Output) -> ExitCode {
    let media = match load_media(cmd.file.as_deref(), output) {
        Ok(media) => media,
        Err(code) => return code,
    };
    if let Some(m) = &media {
        output.info(format!("Playing: {}", m));
    }
    report(
        media,
        profile,
        ScreenAction::Play { direct: cmd.direct },
        output,
    )
}

// =============================================================================
// Trailer Command
// =============================================================================

pub fn trailer_cmd(cmd: TrailerCmd, profile: DeviceProfile, output: &Output) -> ExitCode {
    let media = match load_media(cmd.file.as_deref(), output) {
        Ok(media) => media,
        Err(code) => return code,
    };

    // Explicit URL wins over the record's own trailer
    let url = cmd
        .url
        .or_else(|| media.as_ref().and_then(|m| m.trailer.clone()))
        .unwrap_or_default();

    report(media, profile, ScreenAction::Trailer(url), output)
}

// =============================================================================
// Health Command
// =============================================================================

/// Swarm classification as printed by `health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub health: TorrentHealth,
    pub classification_key: &'static str,
    pub seeds: u32,
    pub peers: u32,
    pub text: String,
}

pub fn health_report(seeds: u32, peers: u32) -> HealthReport {
    let health = TorrentHealth::calculate(seeds, peers);
    let classification_key = health.classification_key();
    HealthReport {
        health,
        classification_key,
        seeds,
        peers,
        text: strings::health_info(classification_key, seeds, peers),
    }
}

pub fn health_cmd(cmd: HealthCmd, output: &Output) -> ExitCode {
    let report = health_report(cmd.seeds, cmd.peers);
    output.info(&report.text);

    if let Err(e) = output.print(&report) {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    ExitCode::Success
}
