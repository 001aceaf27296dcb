//! Field validation rules and validation results
//!
//! Every attribute maps to a list of [`Rule`]s. All rules of a field are
//! evaluated (not just the first failing one) so a field can report several
//! reasons at once, and every entry is validated so the caller sees all
//! problems in one pass.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{Attribute, Entry, EntryKey};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const DIGITS_MESSAGE: &str = "The field should have digits only";
pub const NUMERIC_MESSAGE: &str = "The field should be a number";

/// ASCII digits only; `\d` would also accept other Unicode digit classes
static DIGITS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+$").expect("Invalid digits regex"));

/// A pure validation function: `Ok(())` or a reason
pub type ValidateFn = Arc<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

// ─────────────────────────────────────────────────────────────────────────────
// Rules
// ─────────────────────────────────────────────────────────────────────────────

/// A single validation rule applied to a raw field value
#[derive(Clone)]
pub enum Rule {
    /// Rejects empty and whitespace-only input
    Required,
    /// Accepts only a non-empty run of decimal digits
    Digits,
    /// Accepts any finite number
    Numeric,
    /// Caller supplied rule
    Custom(ValidateFn),
}

impl Rule {
    /// Wrap a closure as a rule
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + Sync + 'static,
    {
        Rule::Custom(Arc::new(f))
    }

    pub fn check(&self, raw: &str) -> Result<(), String> {
        match self {
            Rule::Required => {
                if raw.trim().is_empty() {
                    Err(REQUIRED_MESSAGE.to_string())
                } else {
                    Ok(())
                }
            }
            Rule::Digits => {
                if DIGITS_PATTERN.is_match(raw) {
                    Ok(())
                } else {
                    Err(DIGITS_MESSAGE.to_string())
                }
            }
            Rule::Numeric => match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(()),
                _ => Err(NUMERIC_MESSAGE.to_string()),
            },
            Rule::Custom(f) => f(raw),
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Required => write!(f, "Required"),
            Rule::Digits => write!(f, "Digits"),
            Rule::Numeric => write!(f, "Numeric"),
            Rule::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// How the `time` attribute is entered and checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRepresentation {
    /// Free text constrained to decimal digits
    #[default]
    Digits,
    /// Any numeric value
    Numeric,
}

impl TimeRepresentation {
    pub fn rule(&self) -> Rule {
        match self {
            TimeRepresentation::Digits => Rule::Digits,
            TimeRepresentation::Numeric => Rule::Numeric,
        }
    }
}

impl fmt::Display for TimeRepresentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeRepresentation::Digits => write!(f, "digits"),
            TimeRepresentation::Numeric => write!(f, "numeric"),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Validators
// ─────────────────────────────────────────────────────────────────────────────

/// Mapping from attribute to the rules it must satisfy
#[derive(Debug, Clone)]
pub struct Validators {
    rules: BTreeMap<Attribute, Vec<Rule>>,
}

impl Validators {
    /// No rules at all; every value passes
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
        }
    }

    /// The player form rule set: a required name and a required time in the
    /// given representation
    pub fn for_representation(representation: TimeRepresentation) -> Self {
        Self::empty()
            .with_rule(Attribute::Name, Rule::Required)
            .with_rule(Attribute::Time, Rule::Required)
            .with_rule(Attribute::Time, representation.rule())
    }

    /// Append a rule for an attribute
    pub fn with_rule(mut self, attribute: Attribute, rule: Rule) -> Self {
        self.rules.entry(attribute).or_default().push(rule);
        self
    }

    /// Replace all rules for an attribute
    pub fn set_rules(&mut self, attribute: Attribute, rules: Vec<Rule>) {
        self.rules.insert(attribute, rules);
    }

    pub fn rules(&self, attribute: Attribute) -> &[Rule] {
        self.rules.get(&attribute).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Run every rule for one field, collecting all failure reasons
    pub fn check_field(&self, attribute: Attribute, raw: &str) -> Option<FieldError> {
        let reasons: Vec<String> = self
            .rules(attribute)
            .iter()
            .filter_map(|rule| rule.check(raw).err())
            .collect();

        if reasons.is_empty() {
            None
        } else {
            Some(FieldError { attribute, reasons })
        }
    }

    pub fn validate_entry(&self, entry: &Entry) -> EntryValidation {
        let errors = Attribute::ALL
            .iter()
            .filter_map(|&attribute| {
                self.check_field(attribute, entry.get(attribute))
                    .map(|error| (attribute, error))
            })
            .collect();

        EntryValidation {
            key: entry.key,
            errors,
        }
    }

    /// Validate a whole collection against these rules and a minimum length
    pub fn validate_all(&self, entries: &[Entry], min_entries: usize) -> ValidationResult {
        let mut collection = Vec::new();
        if entries.len() < min_entries {
            collection.push(CollectionError::TooFewEntries {
                min: min_entries,
                actual: entries.len(),
            });
        }

        ValidationResult {
            entries: entries.iter().map(|e| self.validate_entry(e)).collect(),
            collection,
        }
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::for_representation(TimeRepresentation::default())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Results
// ─────────────────────────────────────────────────────────────────────────────

/// All failure reasons of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub attribute: Attribute,
    pub reasons: Vec<String>,
}

impl FieldError {
    /// The reason shown inline next to the field
    pub fn message(&self) -> &str {
        self.reasons.first().map(String::as_str).unwrap_or_default()
    }
}

/// Validation outcome of a single entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryValidation {
    pub key: EntryKey,
    pub errors: BTreeMap<Attribute, FieldError>,
}

impl EntryValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, attribute: Attribute) -> Option<&FieldError> {
        self.errors.get(&attribute)
    }
}

/// Problems with the collection as a whole
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CollectionError {
    TooFewEntries { min: usize, actual: usize },
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::TooFewEntries { min, actual } => {
                write!(f, "At least {} player(s) required, found {}", min, actual)
            }
        }
    }
}

/// Validation outcome for the whole collection, one slot per entry in order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ValidationResult {
    pub entries: Vec<EntryValidation>,
    pub collection: Vec<CollectionError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.collection.is_empty() && self.entries.iter().all(EntryValidation::is_valid)
    }

    /// Number of failing fields plus collection level problems
    pub fn error_count(&self) -> usize {
        self.collection.len() + self.entries.iter().map(|e| e.errors.len()).sum::<usize>()
    }

    pub fn entry(&self, index: usize) -> Option<&EntryValidation> {
        self.entries.get(index)
    }

    pub fn field_error(&self, index: usize, attribute: Attribute) -> Option<&FieldError> {
        self.entries.get(index)?.error(attribute)
    }

    /// Every failing field with the index of its entry
    pub fn errors(&self) -> impl Iterator<Item = (usize, &FieldError)> {
        self.entries
            .iter()
            .enumerate()
            .flat_map(|(index, entry)| entry.errors.values().map(move |error| (index, error)))
    }

    pub fn invalid_indices(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_valid())
            .map(|(index, _)| index)
            .collect()
    }
}
