//! Headless command parsing
//!
//! Commands arrive as NDJSON on stdin, tagged by a "command" field:
//!
//! ```json
//! {"command":"add"}
//! {"command":"update","index":0,"attribute":"name","value":"Ann"}
//! {"command":"touch","index":0,"attribute":"name"}
//! {"command":"remove","index":1}
//! {"command":"submit"}
//! {"command":"quit"}
//! ```
//!
//! The bare words `add`, `submit` and `quit` (or `q`) are accepted too, for
//! typing by hand.

use serde::Deserialize;

use turntimer_app::Message;
use turntimer_core::prelude::*;
use turntimer_core::Attribute;

/// A command read from stdin
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HeadlessCommand {
    Add,
    Remove {
        index: usize,
    },
    Update {
        index: usize,
        attribute: Attribute,
        #[serde(default)]
        value: String,
    },
    Touch {
        index: usize,
        attribute: Attribute,
    },
    Submit,
    Quit,
}

impl From<HeadlessCommand> for Message {
    fn from(command: HeadlessCommand) -> Self {
        match command {
            HeadlessCommand::Add => Message::AddPlayer,
            HeadlessCommand::Remove { index } => Message::RemovePlayer { index },
            HeadlessCommand::Update {
                index,
                attribute,
                value,
            } => Message::UpdateField {
                index,
                attribute,
                value,
            },
            HeadlessCommand::Touch { index, attribute } => {
                Message::TouchField { index, attribute }
            }
            HeadlessCommand::Submit => Message::StartTimer,
            HeadlessCommand::Quit => Message::Quit,
        }
    }
}

/// Parse one stdin line into a message
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<Message>> {
    let trimmed = line.trim();
    match trimmed {
        "" => Ok(None),
        "a" | "add" => Ok(Some(Message::AddPlayer)),
        "s" | "submit" => Ok(Some(Message::StartTimer)),
        "q" | "quit" => Ok(Some(Message::Quit)),
        _ => serde_json::from_str::<HeadlessCommand>(trimmed)
            .map(|command| Some(command.into()))
            .map_err(|e| Error::command(format!("{} ({})", trimmed, e))),
    }
}
