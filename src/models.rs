//! Data structures shared by the router, presenter and views
//!
//! Organized by domain:
//! - **Media**: the record handed to the detail screen
//! - **Device**: facts about the presentation environment
//! - **Health**: swarm health classification
//! - **Routing**: layout hints and route decisions produced per user action

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Lowest platform tier that supports shared-element transitions
pub const SHARED_ELEMENT_MIN_TIER: u32 = 21;

/// Message keys resolved to text by the view layer
pub mod keys {
    /// Title of error dialogs
    pub const DIALOG_ERROR_TITLE: &str = "error";
    /// Generic error message
    pub const DIALOG_ERROR_GENERIC: &str = "error_generic";
}

// =============================================================================
// Media Models
// =============================================================================

/// Media kind discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Show,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "Movie"),
            MediaKind::Show => write!(f, "TV Show"),
        }
    }
}

/// Seed/peer counts of the swarm backing a media item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SwarmStats {
    pub seeds: u32,
    pub peers: u32,
}

/// A playable item shown on the detail screen
///
/// Immutable once constructed. The caller builds it before opening the screen
/// and shares it with the presenter behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRecord {
    pub id: String,
    pub title: String,
    /// Accent color, 0xAARRGGBB or 0xRRGGBB
    pub color: u32,
    pub image_url: String,
    pub header_image_url: String,
    pub kind: MediaKind,
    #[serde(default)]
    pub year: Option<u16>,
    #[serde(default)]
    pub synopsis: Option<String>,
    /// Trailer URL, when one is known
    #[serde(default)]
    pub trailer: Option<String>,
    #[serde(default)]
    pub swarm: Option<SwarmStats>,
}

impl MediaRecord {
    /// Parse a record from its JSON form
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid media record")
    }

    /// Load a record from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json)
    }
}

impl fmt::Display for MediaRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year.map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.kind)
    }
}

// =============================================================================
// Device Models
// =============================================================================

/// Facts about the presentation environment, computed once per activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceProfile {
    pub is_large_screen: bool,
    pub is_portrait: bool,
    /// Ordinal capability level of the host
    pub platform_tier: u32,
    /// Available vertical extent, in host layout units
    pub viewport_height: u32,
}

impl DeviceProfile {
    /// Derive the profile of a terminal of `cols` x `rows` cells
    ///
    /// Cells are roughly twice as tall as they are wide, so a terminal is
    /// portrait when `rows * 2 > cols`.
    pub fn for_terminal(
        cols: u16,
        rows: u16,
        platform_tier: u32,
        large_screen_min_cols: u16,
    ) -> Self {
        Self {
            is_large_screen: cols >= large_screen_min_cols,
            is_portrait: u32::from(rows) * 2 > u32::from(cols),
            platform_tier,
            viewport_height: u32::from(rows),
        }
    }

    /// Whether the host supports shared-element transitions
    pub fn supports_shared_elements(&self) -> bool {
        self.platform_tier >= SHARED_ELEMENT_MIN_TIER
    }
}

// =============================================================================
// Health Models
// =============================================================================

/// Swarm health classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TorrentHealth {
    Unknown,
    Bad,
    Medium,
    Good,
    Excellent,
}

impl TorrentHealth {
    /// Classify a swarm by its seed/peer counts
    ///
    /// Weighted 60/40 between the seed:peer ratio (saturating at 5) and the
    /// absolute seed count (saturating at 30), scaled onto four levels.
    pub fn calculate(seeds: u32, peers: u32) -> Self {
        if seeds == 0 && peers == 0 {
            return TorrentHealth::Unknown;
        }

        let seeds = f64::from(seeds);
        let ratio = if peers > 0 {
            seeds / f64::from(peers)
        } else {
            seeds
        };

        let normalized_ratio = (ratio / 5.0 * 100.0).min(100.0);
        let normalized_seeds = (seeds / 30.0 * 100.0).min(100.0);
        let total = normalized_ratio * 0.6 + normalized_seeds * 0.4;

        match (total * 3.0 / 100.0) as u32 {
            0 => TorrentHealth::Bad,
            1 => TorrentHealth::Medium,
            2 => TorrentHealth::Good,
            _ => TorrentHealth::Excellent,
        }
    }

    /// Message key of the human-readable classification
    pub fn classification_key(&self) -> &'static str {
        match self {
            TorrentHealth::Unknown => "health_unknown",
            TorrentHealth::Bad => "health_bad",
            TorrentHealth::Medium => "health_medium",
            TorrentHealth::Good => "health_good",
            TorrentHealth::Excellent => "health_excellent",
        }
    }
}

impl fmt::Display for TorrentHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TorrentHealth::Unknown => "Unknown",
            TorrentHealth::Bad => "Bad",
            TorrentHealth::Medium => "Medium",
            TorrentHealth::Good => "Good",
            TorrentHealth::Excellent => "Excellent",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// Routing Models
// =============================================================================

/// How the background region and scrolling content share the viewport
///
/// The two strategies are exclusive: compact layouts size the background,
/// large screens offset the scroll overlay instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LayoutStrategy {
    FixedBackground { height: u32 },
    ScrollOverlay { overlay_top: u32 },
}

/// Presentation instructions produced at activation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutHints {
    pub title: String,
    /// Toolbar and status-bar scrim color
    pub scrim_color: u32,
    pub strategy: LayoutStrategy,
    /// Tint of the play affordance, present only where the affordance exists
    pub play_tint: Option<u32>,
}

impl LayoutHints {
    /// Fixed background height, compact layouts only
    pub fn background_height(&self) -> Option<u32> {
        match self.strategy {
            LayoutStrategy::FixedBackground { height } => Some(height),
            LayoutStrategy::ScrollOverlay { .. } => None,
        }
    }

    /// Scroll overlay offset, large screens only
    pub fn overlay_top(&self) -> Option<u32> {
        match self.strategy {
            LayoutStrategy::ScrollOverlay { overlay_top } => Some(overlay_top),
            LayoutStrategy::FixedBackground { .. } => None,
        }
    }
}

/// Visual continuity marker linking the background image across screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionHint {
    pub element: String,
    pub name: String,
}

impl TransitionHint {
    pub const BACKGROUND_ELEMENT: &'static str = "background_image";

    /// Hint keyed to the background image of `media`
    pub fn background(media: &MediaRecord) -> Self {
        Self {
            element: Self::BACKGROUND_ELEMENT.to_string(),
            name: format!("{}:{}", Self::BACKGROUND_ELEMENT, media.id),
        }
    }
}

/// Outcome of a single user action, consumed immediately by the view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum RouteDecision {
    OpenStagedLoading {
        media: Arc<MediaRecord>,
        transition: Option<TransitionHint>,
    },
    OpenDirectPlayer {
        media: Arc<MediaRecord>,
    },
    OpenTrailer {
        media: Arc<MediaRecord>,
        url: String,
    },
    ShowHealthInfo {
        health: TorrentHealth,
        classification_key: &'static str,
        seeds: u32,
        peers: u32,
    },
    ShowDialog {
        title_key: &'static str,
        message_key: &'static str,
    },
}

impl RouteDecision {
    /// Whether this decision launches another screen
    pub fn is_navigation(&self) -> bool {
        matches!(
            self,
            RouteDecision::OpenStagedLoading { .. }
                | RouteDecision::OpenDirectPlayer { .. }
                | RouteDecision::OpenTrailer { .. }
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
