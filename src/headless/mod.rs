//! Headless mode - JSON command/event protocol over stdin/stdout
//!
//! Turn Timer has no UI of its own. A presentation layer (or a test script)
//! drives the player form by writing commands to stdin and reads the
//! resulting state from stdout.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"ready","players":1,"fallback_time":"10","time_representation":"digits","timestamp":1704700001000}
//! {"event":"form_changed","entries":[{"key":1,"name":"","time":"10"}],"errors":[],"submit_attempted":false,"timestamp":1704700002000}
//! {"event":"timer_started","players":[{"name":"Ann","time":"10"}],"total_seconds":10.0,"timestamp":1704700003000}
//! ```

pub mod command;
pub mod runner;

use chrono::Utc;
use serde::Serialize;
use std::io::Write;

use turntimer_app::{EngineEvent, FormSnapshot};
use turntimer_core::prelude::*;
use turntimer_core::{Attribute, Entry, Player, TimeRepresentation, ValidationResult};

/// One failing field, flattened for consumers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlessFieldError {
    pub index: usize,
    pub attribute: Attribute,
    pub message: String,
    pub reasons: Vec<String>,
}

fn flatten_errors(result: &ValidationResult) -> Vec<HeadlessFieldError> {
    result
        .errors()
        .map(|(index, error)| HeadlessFieldError {
            index,
            attribute: error.attribute,
            message: error.message().to_string(),
            reasons: error.reasons.clone(),
        })
        .collect()
}

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The form is ready for commands
    Ready {
        players: usize,
        fallback_time: String,
        time_representation: TimeRepresentation,
        timestamp: i64,
    },

    /// Entries or visible errors changed
    FormChanged {
        entries: Vec<Entry>,
        errors: Vec<HeadlessFieldError>,
        submit_attempted: bool,
        timestamp: i64,
    },

    /// Start timer was refused; lists every error at once
    SubmitRejected {
        error_count: usize,
        errors: Vec<HeadlessFieldError>,
        collection: Vec<String>,
        timestamp: i64,
    },

    /// Timer was started with these players in turn order
    TimerStarted {
        players: Vec<Player>,
        total_seconds: f64,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Write this event as a single NDJSON line and flush
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<()> {
        let json = serde_json::to_string(self)?;
        writeln!(out, "{}", json)?;
        out.flush()?;
        Ok(())
    }

    /// Translate an engine event; `None` for events with no wire form
    pub fn from_engine_event(event: &EngineEvent) -> Option<Self> {
        match event {
            EngineEvent::FormChanged(snapshot) => Some(Self::form_changed(snapshot)),
            EngineEvent::SubmitRejected(result) => Some(Self::submit_rejected(result)),
            EngineEvent::TimerStarted(players) => Some(Self::timer_started(players)),
            EngineEvent::TimerFailed { message, fatal } => {
                Some(Self::error(message.clone(), *fatal))
            }
            EngineEvent::CommandRejected(message) => Some(Self::error(message.clone(), false)),
            EngineEvent::Quitting => None,
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn ready(players: usize, fallback_time: &str, representation: TimeRepresentation) -> Self {
        Self::Ready {
            players,
            fallback_time: fallback_time.to_string(),
            time_representation: representation,
            timestamp: Self::now(),
        }
    }

    pub fn form_changed(snapshot: &FormSnapshot) -> Self {
        Self::FormChanged {
            entries: snapshot.entries.clone(),
            errors: flatten_errors(&snapshot.visible),
            submit_attempted: snapshot.submit_attempted,
            timestamp: Self::now(),
        }
    }

    pub fn submit_rejected(result: &ValidationResult) -> Self {
        Self::SubmitRejected {
            error_count: result.error_count(),
            errors: flatten_errors(result),
            collection: result.collection.iter().map(ToString::to_string).collect(),
            timestamp: Self::now(),
        }
    }

    pub fn timer_started(players: &[Player]) -> Self {
        let total_seconds = players
            .iter()
            .filter_map(Player::duration)
            .map(|d| d.as_secs_f64())
            .sum();
        Self::TimerStarted {
            players: players.to_vec(),
            total_seconds,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turntimer_app::FormListController;

    fn to_value(event: &HeadlessEvent) -> serde_json::Value {
        let mut buf = Vec::new();
        event.write_to(&mut buf).expect("write failed");
        assert!(buf.ends_with(b"\n"));
        serde_json::from_slice(&buf).expect("invalid JSON")
    }

    #[test]
    fn test_ready_serialization() {
        let value = to_value(&HeadlessEvent::ready(1, "10", TimeRepresentation::Digits));

        assert_eq!(value["event"], "ready");
        assert_eq!(value["players"], 1);
        assert_eq!(value["fallback_time"], "10");
        assert_eq!(value["time_representation"], "digits");
        assert!(value["timestamp"].is_number());
    }

    #[test]
    fn test_form_changed_shows_only_visible_errors() {
        let mut form = FormListController::default();
        form.append();
        form.touch(1, Attribute::Name);

        let value = to_value(&HeadlessEvent::form_changed(&form.snapshot()));

        assert_eq!(value["event"], "form_changed");
        assert_eq!(value["entries"].as_array().unwrap().len(), 2);
        assert_eq!(value["entries"][1]["time"], "10");
        let errors = value["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["index"], 1);
        assert_eq!(errors[0]["attribute"], "name");
        assert_eq!(value["submit_attempted"], false);
    }

    #[test]
    fn test_submit_rejected_lists_all_errors() {
        let form = FormListController::new(
            Default::default(),
            vec![Entry::new("A", "10"), Entry::new("", "abc")],
        );

        let value = to_value(&HeadlessEvent::submit_rejected(&form.validate_all()));

        assert_eq!(value["event"], "submit_rejected");
        assert_eq!(value["error_count"], 2);
        let errors = value["errors"].as_array().unwrap();
        assert_eq!(errors[0]["attribute"], "name");
        assert_eq!(errors[1]["attribute"], "time");
        assert_eq!(errors[1]["message"], "The field should have digits only");
        assert!(value["collection"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_timer_started_serialization() {
        let players = vec![Player::new("Ann", "30"), Player::new("Bob", "15")];

        let value = to_value(&HeadlessEvent::timer_started(&players));

        assert_eq!(value["event"], "timer_started");
        assert_eq!(value["players"][0]["name"], "Ann");
        assert_eq!(value["players"][1]["time"], "15");
        assert_eq!(value["total_seconds"], 45.0);
    }

    #[test]
    fn test_error_serialization() {
        let value = to_value(&HeadlessEvent::error("Invalid command".to_string(), false));

        assert_eq!(value["event"], "error");
        assert_eq!(value["message"], "Invalid command");
        assert_eq!(value["fatal"], false);
    }

    #[test]
    fn test_engine_failures_become_error_events() {
        let failed = HeadlessEvent::from_engine_event(&EngineEvent::TimerFailed {
            message: "no audio device".to_string(),
            fatal: true,
        })
        .unwrap();
        let value = to_value(&failed);
        assert_eq!(value["event"], "error");
        assert_eq!(value["fatal"], true);

        let rejected =
            HeadlessEvent::from_engine_event(&EngineEvent::CommandRejected("bogus".to_string()))
                .unwrap();
        let value = to_value(&rejected);
        assert_eq!(value["event"], "error");
        assert_eq!(value["message"], "bogus");
        assert_eq!(value["fatal"], false);
    }

    #[test]
    fn test_quitting_has_no_wire_form() {
        assert!(HeadlessEvent::from_engine_event(&EngineEvent::Quitting).is_none());
    }
}
