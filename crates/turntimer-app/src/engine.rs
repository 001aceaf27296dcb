//! Engine - shared orchestration state for headless and embedding runners
//!
//! The Engine owns the TEA state, the message channel and the timer
//! collaborator. Every message is processed to completion before the next one
//! is received, so the form is never mutated concurrently.

use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::actions::{handle_action, TimerLauncher};
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::handler::{self, UpdateAction};
use crate::message::Message;
use crate::state::{AppPhase, AppState};
use turntimer_core::Entry;

/// Capacity of the inbound message channel
const MESSAGE_CHANNEL_CAPACITY: usize = 256;

/// Orchestration engine for Turn Timer.
pub struct Engine {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Receiving end of the message channel
    pub msg_rx: mpsc::Receiver<Message>,

    msg_tx: mpsc::Sender<Message>,
    timer: Box<dyn TimerLauncher>,
}

impl Engine {
    pub fn new(settings: Settings, timer: Box<dyn TimerLauncher>) -> Self {
        Self::with_players(settings, Vec::new(), timer)
    }

    pub fn with_players(
        settings: Settings,
        players: Vec<Entry>,
        timer: Box<dyn TimerLauncher>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(MESSAGE_CHANNEL_CAPACITY);
        Self {
            state: AppState::with_players(settings, players),
            msg_rx,
            msg_tx,
            timer,
        }
    }

    /// Get a sender for feeding messages into the engine
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    /// Process a message (and its follow-ups) through the TEA update function
    ///
    /// Returns the events describing what changed.
    pub fn process_message(&mut self, message: Message) -> Vec<EngineEvent> {
        let pre = self.state.form.snapshot();
        let was_start = matches!(message, Message::StartTimer);
        let mut events = Vec::new();
        let mut timer_failed = false;

        if let Message::InvalidCommand { message } = &message {
            events.push(EngineEvent::CommandRejected(message.clone()));
        }

        let mut msg = Some(message);
        while let Some(m) = msg {
            let result = handler::update(&mut self.state, m);

            if let Some(action) = result.action {
                match handle_action(&action, self.timer.as_mut()) {
                    Ok(()) => {
                        let UpdateAction::StartTimer { players } = action;
                        events.push(EngineEvent::TimerStarted(players));
                    }
                    Err(e) => {
                        error!("Timer failed to start: {}", e);
                        self.state.phase = AppPhase::Editing;
                        timer_failed = true;
                        events.push(EngineEvent::TimerFailed {
                            message: e.to_string(),
                            fatal: e.is_fatal(),
                        });
                    }
                }
            }

            msg = result.message;
        }

        let post = self.state.form.snapshot();
        if post != pre {
            events.insert(0, EngineEvent::FormChanged(post));
        }

        if was_start && !timer_failed && self.state.is_editing() {
            events.push(EngineEvent::SubmitRejected(
                self.state.form.validation().clone(),
            ));
        }

        if self.should_quit() {
            events.push(EngineEvent::Quitting);
        }

        debug!("Processed message into {} event(s)", events.len());
        events
    }
}
