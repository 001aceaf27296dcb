//! turntimer-app - Player form state and orchestration for Turn Timer
//!
//! This crate implements the TEA (The Elm Architecture) pattern around the
//! player form controller, the Engine abstraction that owns the message
//! channel, and configuration loading.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod form;
pub mod handler;
pub mod message;
pub mod state;

// Re-export primary types
pub use actions::TimerLauncher;
pub use engine::Engine;
pub use engine_event::EngineEvent;
pub use form::{FormListController, FormObserver, FormSnapshot, SubmitOutcome, SubscriptionId};
pub use handler::{UpdateAction, UpdateResult};
pub use message::Message;
pub use state::{AppPhase, AppState};
