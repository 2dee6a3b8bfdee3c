//! Playback route decisions
//!
//! Pure functions of the media record, device profile and request. No I/O,
//! no retries: the only failure is rejected input.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::models::{
    keys, DeviceProfile, LayoutHints, LayoutStrategy, MediaRecord, RouteDecision,
    TorrentHealth, TransitionHint,
};

/// Errors from route decisions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Decides layout and which flow a user action opens
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackRouter;

impl PlaybackRouter {
    pub fn new() -> Self {
        Self
    }

    /// Layout for the detail screen
    ///
    /// The background takes two thirds of the viewport. Compact layouts give
    /// the background region that height; large screens keep the background
    /// and push the scrolling content down by the same amount instead.
    pub fn decide_layout(&self, media: &MediaRecord, profile: &DeviceProfile) -> LayoutHints {
        let top_height = profile.viewport_height / 3 * 2;

        let (strategy, play_tint) = if profile.is_large_screen {
            (
                LayoutStrategy::ScrollOverlay {
                    overlay_top: top_height,
                },
                None,
            )
        } else {
            (
                LayoutStrategy::FixedBackground { height: top_height },
                Some(media.color),
            )
        };

        debug!(media = %media.id, ?strategy, "layout decided");

        LayoutHints {
            title: media.title.clone(),
            scrim_color: media.color,
            strategy,
            play_tint,
        }
    }

    /// Route for the play affordance: always the staged loading flow
    pub fn decide_playback(
        &self,
        media: &Arc<MediaRecord>,
        profile: &DeviceProfile,
    ) -> RouteDecision {
        let transition = profile
            .supports_shared_elements()
            .then(|| TransitionHint::background(media));

        debug!(
            media = %media.id,
            tier = profile.platform_tier,
            transition = transition.is_some(),
            "playback routed to staged loading"
        );

        RouteDecision::OpenStagedLoading {
            media: Arc::clone(media),
            transition,
        }
    }

    /// Route for an explicit direct-playback request
    pub fn decide_direct_playback(&self, media: &Arc<MediaRecord>) -> RouteDecision {
        debug!(media = %media.id, "playback routed to direct player");
        RouteDecision::OpenDirectPlayer {
            media: Arc::clone(media),
        }
    }

    /// Route for a trailer request
    pub fn decide_trailer(
        &self,
        media: &Arc<MediaRecord>,
        url: &str,
    ) -> Result<RouteDecision, RouteError> {
        if url.trim().is_empty() {
            return Err(RouteError::InvalidInput("trailer URL is empty"));
        }

        Ok(RouteDecision::OpenTrailer {
            media: Arc::clone(media),
            url: url.to_string(),
        })
    }

    /// Health banner for a swarm
    pub fn decide_health_display(
        &self,
        health: TorrentHealth,
        seeds: u32,
        peers: u32,
    ) -> RouteDecision {
        RouteDecision::ShowHealthInfo {
            health,
            classification_key: health.classification_key(),
            seeds,
            peers,
        }
    }

    /// Generic error dialog
    pub fn decide_error_dialog(&self) -> RouteDecision {
        RouteDecision::ShowDialog {
            title_key: keys::DIALOG_ERROR_TITLE,
            message_key: keys::DIALOG_ERROR_GENERIC,
        }
    }
}
