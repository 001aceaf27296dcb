//! Action handlers: UpdateAction dispatch to external collaborators

use turntimer_core::prelude::*;
use turntimer_core::Player;

use crate::handler::UpdateAction;

/// Entry point of the countdown timer
///
/// The form never calls this itself; the event loop does after an accepted
/// submit, with the players in turn order.
pub trait TimerLauncher {
    fn start(&mut self, players: &[Player]) -> Result<()>;
}

/// Execute an action against the collaborators
pub fn handle_action(action: &UpdateAction, timer: &mut dyn TimerLauncher) -> Result<()> {
    match action {
        UpdateAction::StartTimer { players } => {
            info!("Starting timer with {} players", players.len());
            timer.start(players)
        }
    }
}
