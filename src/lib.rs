//! detailcast - media detail screen with playback routing
//!
//! Presents a single movie or show and turns user actions into routes:
//! staged loading, the direct player, the trailer player, a health banner
//! or an error dialog. Returning to the screen quiesces any casting work a
//! launched flow started.
//!
//! # Modules
//!
//! - `models` - Media records, device profiles, layout hints, route decisions
//! - `router` - Pure layout and playback route decisions
//! - `presenter` - Detail screen lifecycle driving a `DetailView`
//! - `stream` - Casting coordinator and its resources
//! - `ui` - Terminal and recording views
//! - `app` - Terminal host with launched-screen navigation
//! - `cli` / `commands` - Scriptable interface
//! - `config` - TOML configuration

pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod presenter;
pub mod router;
pub mod stream;
pub mod ui;

// Re-export commonly used types
pub use models::{
    DeviceProfile, LayoutHints, LayoutStrategy, MediaKind, MediaRecord, RouteDecision,
    SwarmStats, TorrentHealth, TransitionHint,
};

pub use app::{App, Screen};
pub use presenter::{DetailPresenter, DetailView, PresenterError, PresenterState};
pub use router::{PlaybackRouter, RouteError};
pub use stream::{CastManager, CastingCoordinator};
