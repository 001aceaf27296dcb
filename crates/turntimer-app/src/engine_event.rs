//! Domain events emitted by the Engine after processing a message

use turntimer_core::{Player, ValidationResult};

use crate::form::FormSnapshot;

/// What changed as a result of one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Entries, validation or visible errors changed
    FormChanged(FormSnapshot),
    /// A start request was refused; carries every error
    SubmitRejected(ValidationResult),
    /// The timer was started with these players
    TimerStarted(Vec<Player>),
    /// The form was accepted but the timer refused to start; editing resumes
    TimerFailed { message: String, fatal: bool },
    /// A driver command was not understood
    CommandRejected(String),
    /// The engine is shutting down
    Quitting,
}
