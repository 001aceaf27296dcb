//! Configuration file parsing for Turn Timer
//!
//! Supports:
//! - `.turntimer/config.toml` - Form settings

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings, merge_overrides, save_settings};
pub use types::*;
