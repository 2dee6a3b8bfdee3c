//! Casting and streaming resources
//!
//! The detail screen only quiesces these; it never starts them.

pub mod cast;

pub use cast::{BeamServer, CastManager, CastNotification, CastingCoordinator, StreamingSession};
