//! Player form handlers
//!
//! Thin wrappers that apply form messages to the controller owned by
//! [`AppState`].

use turntimer_core::prelude::*;
use turntimer_core::Attribute;

use super::{UpdateAction, UpdateResult};
use crate::form::SubmitOutcome;
use crate::state::{AppPhase, AppState};

/// Handle adding a player at the end of the list
pub fn handle_add_player(state: &mut AppState) -> UpdateResult {
    state.form.append();
    UpdateResult::none()
}

/// Handle removing the player at `index`
pub fn handle_remove_player(state: &mut AppState, index: usize) -> UpdateResult {
    if !state.form.remove(index) {
        debug!("Remove of player {} ignored", index);
    }
    UpdateResult::none()
}

/// Handle a raw field edit
pub fn handle_update_field(
    state: &mut AppState,
    index: usize,
    attribute: Attribute,
    value: String,
) -> UpdateResult {
    if !state.form.update_field(index, attribute, value) {
        warn!("Update of {} for missing player {} ignored", attribute, index);
    }
    UpdateResult::none()
}

/// Handle a field losing focus
pub fn handle_touch_field(
    state: &mut AppState,
    index: usize,
    attribute: Attribute,
) -> UpdateResult {
    state.form.touch(index, attribute);
    UpdateResult::none()
}

/// Handle the start timer button.
///
/// Runs the submit gate. Only an accepted form moves the app to
/// [`AppPhase::TimerStarted`] and yields [`UpdateAction::StartTimer`]; a
/// rejected form stays in editing with every error visible.
pub fn handle_start_timer(state: &mut AppState) -> UpdateResult {
    let mut accepted = None;
    match state.form.submit(|players| accepted = Some(players)) {
        SubmitOutcome::Accepted => {
            state.phase = AppPhase::TimerStarted;
            let players = accepted.unwrap_or_default();
            UpdateResult::action(UpdateAction::StartTimer { players })
        }
        SubmitOutcome::Rejected(result) => {
            debug!("Start timer blocked by {} error(s)", result.error_count());
            UpdateResult::none()
        }
    }
}
