//! Configuration types for Turn Timer
//!
//! Defines:
//! - `Settings` - Application settings (`.turntimer/config.toml`)
//! - `FormSettings` - How the player form seeds, extends and validates entries
//! - `FormOverrides` - Command line overrides applied on top of the file

use serde::{Deserialize, Serialize};
use turntimer_core::prelude::*;
use turntimer_core::{Attribute, TimeRepresentation, Validators};

/// Application settings (.turntimer/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub form: FormSettings,
}

impl Settings {
    /// Reject settings the form controller cannot honour
    pub fn validate(&self) -> Result<()> {
        self.form.validate()
    }
}

/// Where a newly appended entry takes its `time` from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NewEntryTime {
    /// Copy the current time of the last entry
    #[default]
    Inherit,
    /// Always start from the configured fallback
    Fallback,
}

/// Player form settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FormSettings {
    /// Time used for the first entry and whenever there is nothing to inherit
    #[serde(default = "default_fallback_time")]
    pub fallback_time: String,

    /// How the time field is entered and validated
    #[serde(default)]
    pub time_representation: TimeRepresentation,

    /// Time policy for appended entries
    #[serde(default)]
    pub new_entry_time: NewEntryTime,

    /// Minimum number of entries; removal below it is refused
    #[serde(default = "default_min_entries")]
    pub min_entries: usize,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            fallback_time: default_fallback_time(),
            time_representation: TimeRepresentation::default(),
            new_entry_time: NewEntryTime::default(),
            min_entries: default_min_entries(),
        }
    }
}

impl FormSettings {
    /// The rule set for the configured time representation
    pub fn validators(&self) -> Validators {
        Validators::for_representation(self.time_representation)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_entries == 0 {
            return Err(Error::config_invalid("min_entries must be at least 1"));
        }

        if let Some(error) = self
            .validators()
            .check_field(Attribute::Time, &self.fallback_time)
        {
            return Err(Error::config_invalid(format!(
                "fallback_time {:?} is not a valid {} time: {}",
                self.fallback_time,
                self.time_representation,
                error.message()
            )));
        }

        Ok(())
    }
}

fn default_fallback_time() -> String {
    "10".to_string()
}

fn default_min_entries() -> usize {
    1
}

/// Command line overrides; `None` keeps the file value
#[derive(Debug, Clone, Default)]
pub struct FormOverrides {
    pub fallback_time: Option<String>,
    pub time_representation: Option<TimeRepresentation>,
    pub new_entry_time: Option<NewEntryTime>,
    pub min_entries: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_settings_defaults() {
        let form = FormSettings::default();
        assert_eq!(form.fallback_time, "10");
        assert_eq!(form.time_representation, TimeRepresentation::Digits);
        assert_eq!(form.new_entry_time, NewEntryTime::Inherit);
        assert_eq!(form.min_entries, 1);
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_partial_form_table_uses_defaults() {
        let settings: Settings = toml::from_str("[form]\nmin_entries = 2\n").unwrap();
        assert_eq!(settings.form.min_entries, 2);
        assert_eq!(settings.form.fallback_time, "10");
    }

    #[test]
    fn test_enums_parse_lowercase() {
        let settings: Settings = toml::from_str(
            "[form]\ntime_representation = \"numeric\"\nnew_entry_time = \"fallback\"\n",
        )
        .unwrap();
        assert_eq!(
            settings.form.time_representation,
            TimeRepresentation::Numeric
        );
        assert_eq!(settings.form.new_entry_time, NewEntryTime::Fallback);
    }

    #[test]
    fn test_validate_rejects_zero_min_entries() {
        let form = FormSettings {
            min_entries: 0,
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn test_validate_rejects_fallback_failing_time_rule() {
        let form = FormSettings {
            fallback_time: "1.5".to_string(),
            ..Default::default()
        };
        let err = form.validate().unwrap_err();
        assert!(err.to_string().contains("digits"));

        let numeric = FormSettings {
            fallback_time: "1.5".to_string(),
            time_representation: TimeRepresentation::Numeric,
            ..Default::default()
        };
        assert!(numeric.validate().is_ok());
    }
}
