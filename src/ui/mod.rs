//! Terminal UI components
//!
//! The detail screen as a ratatui surface, a recording surface for scripting
//! and tests, and the cards shown for launched flows.

pub mod detail;
pub mod launch;
pub mod record;
pub mod strings;
pub mod theme;

pub use detail::TerminalDetailView;
pub use record::{RecordingView, ViewEvent};
pub use theme::Theme;
