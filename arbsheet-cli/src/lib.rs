//! CLI library for testing purposes.
//!
//! The binary in `main.rs` only parses arguments and dispatches into these
//! modules, so integration tests can call the command runners directly.

pub mod export;
pub mod import;
pub mod picker;
pub mod status;
pub mod validation;
