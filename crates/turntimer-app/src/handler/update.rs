//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::{AppPhase, AppState};
use tracing::warn;

use super::{form, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            return UpdateResult::none();
        }
        Message::InvalidCommand { ref message } => {
            warn!("Rejected command: {}", message);
            return UpdateResult::none();
        }
        _ => {}
    }

    if !state.is_editing() {
        warn!("Ignoring {:?} while in {:?} phase", message, state.phase);
        return UpdateResult::none();
    }

    match message {
        // ─────────────────────────────────────────────────────────
        // Player Form Messages
        // ─────────────────────────────────────────────────────────
        Message::AddPlayer => form::handle_add_player(state),
        Message::RemovePlayer { index } => form::handle_remove_player(state, index),
        Message::UpdateField {
            index,
            attribute,
            value,
        } => form::handle_update_field(state, index, attribute, value),
        Message::TouchField { index, attribute } => {
            form::handle_touch_field(state, index, attribute)
        }
        Message::StartTimer => form::handle_start_timer(state),

        Message::Quit | Message::InvalidCommand { .. } => UpdateResult::none(),
    }
}
