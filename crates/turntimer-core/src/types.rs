//! Core domain types for the player entry form

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::Error;

// ─────────────────────────────────────────────────────────────────────────────
// Attribute
// ─────────────────────────────────────────────────────────────────────────────

/// An editable field of an [`Entry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Name,
    Time,
}

impl Attribute {
    /// All attributes in display order
    pub const ALL: [Attribute; 2] = [Attribute::Name, Attribute::Time];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::Time => "time",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Attribute::Name),
            "time" => Ok(Attribute::Time),
            other => Err(Error::command(format!("unknown attribute '{}'", other))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// EntryKey
// ─────────────────────────────────────────────────────────────────────────────

static ENTRY_KEY_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of an entry, stable across removals and reorders
///
/// Keys come from a process-wide counter and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryKey(u64);

impl EntryKey {
    /// Allocate a fresh key
    pub fn next() -> Self {
        Self(ENTRY_KEY_COUNTER.fetch_add(1, Ordering::SeqCst))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entry-{}", self.0)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Entry
// ─────────────────────────────────────────────────────────────────────────────

/// One row of the player form, holding raw (unparsed) input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub key: EntryKey,
    pub name: String,
    pub time: String,
}

impl Entry {
    /// Create an entry with a freshly allocated key
    pub fn new(name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            key: EntryKey::next(),
            name: name.into(),
            time: time.into(),
        }
    }

    /// Raw value of an attribute
    pub fn get(&self, attribute: Attribute) -> &str {
        match attribute {
            Attribute::Name => &self.name,
            Attribute::Time => &self.time,
        }
    }

    /// Replace the raw value of an attribute. The key is never touched.
    pub fn set(&mut self, attribute: Attribute, value: impl Into<String>) {
        match attribute {
            Attribute::Name => self.name = value.into(),
            Attribute::Time => self.time = value.into(),
        }
    }

    pub fn to_player(&self) -> Player {
        Player {
            name: self.name.clone(),
            time: self.time.clone(),
        }
    }
}

impl From<Player> for Entry {
    fn from(player: Player) -> Self {
        Entry::new(player.name, player.time)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Player
// ─────────────────────────────────────────────────────────────────────────────

/// A validated player handed to the timer, in turn order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub time: String,
}

impl Player {
    pub fn new(name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: time.into(),
        }
    }

    /// Turn length in seconds, if `time` is a non-negative finite number
    pub fn duration(&self) -> Option<Duration> {
        let secs: f64 = self.time.trim().parse().ok()?;
        Duration::try_from_secs_f64(secs).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_round_trips_through_str() {
        for attribute in Attribute::ALL {
            assert_eq!(attribute.as_str().parse::<Attribute>().unwrap(), attribute);
        }
        assert_eq!(" Time ".parse::<Attribute>().unwrap(), Attribute::Time);
    }

    #[test]
    fn test_attribute_unknown_is_command_error() {
        let err = "age".parse::<Attribute>().unwrap_err();
        assert!(matches!(err, Error::Command { .. }));
        assert!(err.to_string().contains("age"));
    }

    #[test]
    fn test_attribute_serde_is_snake_case() {
        assert_eq!(serde_json::to_string(&Attribute::Name).unwrap(), "\"name\"");
        let parsed: Attribute = serde_json::from_str("\"time\"").unwrap();
        assert_eq!(parsed, Attribute::Time);
    }

    #[test]
    fn test_entry_keys_are_unique() {
        let a = Entry::new("", "10");
        let b = Entry::new("", "10");
        assert_ne!(a.key, b.key);
        assert!(b.key.get() > a.key.get());
    }

    #[test]
    fn test_entry_set_keeps_key() {
        let mut entry = Entry::new("Ann", "10");
        let key = entry.key;
        entry.set(Attribute::Name, "Bob");
        entry.set(Attribute::Time, "25");
        assert_eq!(entry.key, key);
        assert_eq!(entry.get(Attribute::Name), "Bob");
        assert_eq!(entry.get(Attribute::Time), "25");
    }

    #[test]
    fn test_cloned_entry_keeps_key() {
        let entry = Entry::new("Ann", "10");
        assert_eq!(entry.clone().key, entry.key);
    }

    #[test]
    fn test_player_duration() {
        assert_eq!(Player::new("A", "10").duration(), Some(Duration::from_secs(10)));
        assert_eq!(Player::new("A", "007").duration(), Some(Duration::from_secs(7)));
        assert_eq!(
            Player::new("A", "1.5").duration(),
            Some(Duration::from_millis(1500))
        );
        assert_eq!(Player::new("A", "-1").duration(), None);
        assert_eq!(Player::new("A", "abc").duration(), None);
        assert_eq!(Player::new("A", "inf").duration(), None);
    }

    #[test]
    fn test_entry_key_display() {
        let key = EntryKey::next();
        assert_eq!(key.to_string(), format!("entry-{}", key.get()));
    }
}
