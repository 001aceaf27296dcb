//! FormListController - ordered player entries with live validation

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use turntimer_core::prelude::*;
use turntimer_core::{
    Attribute, Entry, EntryKey, EntryValidation, Player, ValidationResult, Validators,
};

use super::observer::{FormObserver, FormSnapshot, SubscriptionId};
use crate::config::{FormSettings, NewEntryTime};

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every entry was valid and the callback ran
    Accepted,
    /// At least one entry was invalid; the callback did not run
    Rejected(ValidationResult),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

/// Owns the player entries and their derived validation
///
/// Every mutation revalidates the whole collection and notifies subscribed
/// observers. Consumers only get read access through [`entries`] and
/// [`snapshot`].
///
/// [`entries`]: FormListController::entries
/// [`snapshot`]: FormListController::snapshot
pub struct FormListController {
    entries: Vec<Entry>,
    settings: FormSettings,
    validators: Validators,
    validation: ValidationResult,
    touched: HashSet<(EntryKey, Attribute)>,
    submit_attempted: bool,
    observers: Vec<(SubscriptionId, Box<dyn FormObserver>)>,
    next_subscription: u64,
}

impl fmt::Debug for FormListController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormListController")
            .field("entries", &self.entries)
            .field("settings", &self.settings)
            .field("validation", &self.validation)
            .field("submit_attempted", &self.submit_attempted)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl FormListController {
    /// Create a controller using the rule set implied by `settings`
    pub fn new(settings: FormSettings, defaults: Vec<Entry>) -> Self {
        let validators = settings.validators();
        Self::with_validators(settings, validators, defaults)
    }

    /// Create a controller with a caller supplied rule set
    ///
    /// The collection is seeded from `defaults` and padded with fallback
    /// entries up to the minimum length, so it never starts empty.
    pub fn with_validators(
        settings: FormSettings,
        validators: Validators,
        defaults: Vec<Entry>,
    ) -> Self {
        let mut entries = defaults;
        let min = settings.min_entries.max(1);
        while entries.len() < min {
            entries.push(Entry::new("", settings.fallback_time.clone()));
        }

        let validation = validators.validate_all(&entries, settings.min_entries);
        debug!(
            "Form initialized with {} entries (min {})",
            entries.len(),
            min
        );

        Self {
            entries,
            settings,
            validators,
            validation,
            touched: HashSet::new(),
            submit_attempted: false,
            observers: Vec::new(),
            next_subscription: 1,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Read access
    // ─────────────────────────────────────────────────────────

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current index of the entry with `key`
    pub fn position(&self, key: EntryKey) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    pub fn settings(&self) -> &FormSettings {
        &self.settings
    }

    /// Validation cached after the last mutation
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    pub fn is_touched(&self, index: usize, attribute: Attribute) -> bool {
        self.entries
            .get(index)
            .is_some_and(|e| self.touched.contains(&(e.key, attribute)))
    }

    /// The entries as plain players, in turn order
    pub fn players(&self) -> Vec<Player> {
        self.entries.iter().map(Entry::to_player).collect()
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            entries: self.entries.clone(),
            validation: self.validation.clone(),
            visible: self.visible_errors(),
            submit_attempted: self.submit_attempted,
        }
    }

    // ─────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────

    /// Append an empty-named entry and return its key
    ///
    /// The time is read from the last entry at the moment of the call under
    /// [`NewEntryTime::Inherit`], otherwise the fallback is used.
    pub fn append(&mut self) -> EntryKey {
        let time = match (self.settings.new_entry_time, self.entries.last()) {
            (NewEntryTime::Inherit, Some(last)) => last.time.clone(),
            _ => self.settings.fallback_time.clone(),
        };

        let entry = Entry::new("", time);
        let key = entry.key;
        debug!("Appending {} with time {:?}", key, entry.time);
        self.entries.push(entry);

        self.changed();
        key
    }

    /// Remove the entry at `index`
    ///
    /// Returns false without changing anything when `index` is out of bounds
    /// or the removal would go below the minimum length.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.entries.len() {
            trace!("Ignoring remove of out-of-bounds index {}", index);
            return false;
        }

        if self.entries.len() <= self.settings.min_entries.max(1) {
            debug!(
                "Refusing to remove index {}: form is at its minimum of {} entries",
                index, self.settings.min_entries
            );
            return false;
        }

        let removed = self.entries.remove(index);
        self.touched.retain(|(key, _)| *key != removed.key);
        debug!("Removed {} at index {}", removed.key, index);

        self.changed();
        true
    }

    /// Store a raw value for one field and revalidate
    ///
    /// Returns false if `index` is out of bounds.
    pub fn update_field(
        &mut self,
        index: usize,
        attribute: Attribute,
        value: impl Into<String>,
    ) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            trace!("Ignoring update of out-of-bounds index {}", index);
            return false;
        };

        entry.set(attribute, value);
        trace!("Updated {} of {} to {:?}", attribute, entry.key, entry.get(attribute));

        self.changed();
        true
    }

    /// Mark a field as touched (the user left it), making its errors visible
    pub fn touch(&mut self, index: usize, attribute: Attribute) -> bool {
        let Some(key) = self.entries.get(index).map(|e| e.key) else {
            return false;
        };

        if self.touched.insert((key, attribute)) {
            self.changed();
        }
        true
    }

    // ─────────────────────────────────────────────────────────
    // Validation & submit
    // ─────────────────────────────────────────────────────────

    /// Validate every entry without mutating state
    pub fn validate_all(&self) -> ValidationResult {
        self.validators
            .validate_all(&self.entries, self.settings.min_entries)
    }

    /// Errors to show right now
    ///
    /// Before the first submit attempt only touched fields report errors;
    /// afterwards every error is shown.
    pub fn visible_errors(&self) -> ValidationResult {
        if self.submit_attempted {
            return self.validation.clone();
        }

        let entries = self
            .validation
            .entries
            .iter()
            .map(|entry| {
                let errors: BTreeMap<_, _> = entry
                    .errors
                    .iter()
                    .filter(|(attribute, _)| self.touched.contains(&(entry.key, **attribute)))
                    .map(|(attribute, error)| (*attribute, error.clone()))
                    .collect();
                EntryValidation {
                    key: entry.key,
                    errors,
                }
            })
            .collect();

        ValidationResult {
            entries,
            collection: Vec::new(),
        }
    }

    /// Run the submit gate
    ///
    /// `on_valid` is called exactly once with a copy of the players when the
    /// whole collection is valid, and never otherwise.
    pub fn submit<F>(&mut self, on_valid: F) -> SubmitOutcome
    where
        F: FnOnce(Vec<Player>),
    {
        self.submit_attempted = true;
        self.validation = self.validate_all();

        let outcome = if self.validation.is_valid() {
            let players = self.players();
            info!("Submit accepted with {} players", players.len());
            on_valid(players);
            SubmitOutcome::Accepted
        } else {
            info!(
                "Submit rejected: {} error(s) in entries {:?}",
                self.validation.error_count(),
                self.validation.invalid_indices()
            );
            SubmitOutcome::Rejected(self.validation.clone())
        };

        self.notify();
        outcome
    }

    // ─────────────────────────────────────────────────────────
    // Observers
    // ─────────────────────────────────────────────────────────

    pub fn subscribe(&mut self, observer: Box<dyn FormObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns false if `id` was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        self.observers.len() != before
    }

    fn changed(&mut self) {
        self.validation = self.validate_all();
        self.notify();
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }

        let snapshot = self.snapshot();
        for (_, observer) in self.observers.iter_mut() {
            observer.on_change(&snapshot);
        }
    }
}

impl Default for FormListController {
    fn default() -> Self {
        Self::new(FormSettings::default(), Vec::new())
    }
}
