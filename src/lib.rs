//! Turn Timer Library
//!
//! Wires the player form engine from `turntimer-app` to a JSON command/event
//! protocol on stdin/stdout.

pub mod headless;

// Re-export main entry points
pub use headless::runner::run_headless;
