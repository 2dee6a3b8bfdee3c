//! Integration tests for detailcast
//!
//! Tests are organized by component:
//! - router_test: Layout and playback route decisions
//! - presenter_test: Detail screen lifecycle and ordered view calls
//! - cast_test: Casting coordinator against a real server task and child process
//! - cli_test: Argument parsing, JSON envelope, command handlers
//! - ui_test: Terminal rendering and launched-flow navigation

// Note: Each test file is a separate integration test crate
// Tests are run individually by cargo, not via mod.rs
