//! Message types for the application (TEA pattern)

use turntimer_core::Attribute;

/// All possible messages/actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // ─────────────────────────────────────────────────────────
    // Player Form Messages
    // ─────────────────────────────────────────────────────────
    /// Append a player, inheriting the last player's time
    AddPlayer,
    /// Remove the player at `index`
    RemovePlayer { index: usize },
    /// Replace the raw value of one field
    UpdateField {
        index: usize,
        attribute: Attribute,
        value: String,
    },
    /// The user left a field
    TouchField { index: usize, attribute: Attribute },
    /// Submit the form and start the timer if every player is valid
    StartTimer,

    /// A command from the driver could not be understood
    InvalidCommand { message: String },

    /// Request to quit the application
    Quit,
}
