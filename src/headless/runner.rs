//! Headless mode runner - main event loop
//!
//! Reads commands from stdin on a dedicated thread, feeds them through the
//! engine's message channel and writes the resulting events to stdout. The
//! engine is only ever touched by the event loop.

use std::io::{BufRead, Write};

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use turntimer_app::config::Settings;
use turntimer_app::{Engine, Message, TimerLauncher};
use turntimer_core::prelude::*;
use turntimer_core::{Entry, Player};

use super::command::parse_command;
use super::HeadlessEvent;

/// Timer collaborator for headless mode
///
/// The countdown itself belongs to the consumer; this records the turn order
/// in the log. The `timer_started` event carries the players on stdout.
#[derive(Debug, Default)]
pub struct HeadlessTimer;

impl TimerLauncher for HeadlessTimer {
    fn start(&mut self, players: &[Player]) -> Result<()> {
        for (turn, player) in players.iter().enumerate() {
            match player.duration() {
                Some(duration) => info!(
                    "Turn {}: {} for {:.1}s",
                    turn + 1,
                    player.name,
                    duration.as_secs_f64()
                ),
                None => warn!("Turn {}: {} has no usable duration", turn + 1, player.name),
            }
        }
        Ok(())
    }
}

/// Run in headless mode - JSON commands in, JSON events out
pub async fn run_headless(settings: Settings, players: Vec<Entry>) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("Turn Timer starting in HEADLESS mode");
    info!("Form settings: {:?}", settings.form);
    info!("═══════════════════════════════════════════════════════");

    let mut engine = Engine::with_players(settings, players, Box::new(HeadlessTimer));

    let mut stdout = std::io::stdout();
    emit_initial_events(&engine, &mut stdout)?;

    // Spawn headless-specific stdin reader
    let stdin_tx = engine.msg_sender();
    std::thread::spawn(move || {
        if let Err(e) = forward_commands(std::io::stdin().lock(), &stdin_tx) {
            warn!("Stdin reader stopped: {}", e);
        }
    });

    let result = headless_event_loop(&mut engine, &mut stdout).await;

    info!("Turn Timer headless mode exiting");
    result
}

/// Announce the configuration and the seeded form
pub fn emit_initial_events<W: Write>(engine: &Engine, out: &mut W) -> Result<()> {
    let form = &engine.state.form;
    HeadlessEvent::ready(
        form.len(),
        &form.settings().fallback_time,
        form.settings().time_representation,
    )
    .write_to(out)?;
    HeadlessEvent::form_changed(&form.snapshot()).write_to(out)
}

/// Main headless event loop
///
/// Runs until a quit message is processed or the channel closes.
pub async fn headless_event_loop<W: Write>(engine: &mut Engine, out: &mut W) -> Result<()> {
    loop {
        // Check for shutdown
        if engine.should_quit() {
            info!("Quit requested");
            break;
        }

        match engine.msg_rx.recv().await {
            Some(msg) => {
                for event in engine.process_message(msg) {
                    if let Some(headless_event) = HeadlessEvent::from_engine_event(&event) {
                        headless_event.write_to(out)?;
                    }
                }
            }
            None => {
                info!("Message channel closed");
                break;
            }
        }
    }

    Ok(())
}

/// Blocking reader that forwards parsed commands to the engine
///
/// Lines that fail to parse are forwarded as [`Message::InvalidCommand`] so
/// the event loop remains the only writer of stdout. End of input is treated
/// as a quit request. Returns [`Error::ChannelClosed`] once the engine stops
/// receiving.
pub fn forward_commands<R: BufRead>(reader: R, msg_tx: &mpsc::Sender<Message>) -> Result<()> {
    let send = |msg: Message| msg_tx.blocking_send(msg).map_err(|_| Error::ChannelClosed);

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            Ok(Some(Message::Quit)) => {
                info!("Stdin: quit requested");
                return send(Message::Quit);
            }
            Ok(Some(msg)) => send(msg)?,
            Ok(None) => {}
            Err(e) => {
                warn!("Unknown stdin command: {}", e);
                send(Message::InvalidCommand {
                    message: e.to_string(),
                })?;
            }
        }
    }

    info!("Stdin closed, requesting quit");
    send(Message::Quit)
}
