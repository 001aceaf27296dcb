//! Change notification for the presentation layer

use serde::Serialize;
use turntimer_core::{Entry, ValidationResult};

/// Handle returned by `FormListController::subscribe`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

/// Read-only view of the form after a change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    /// Entries in display order
    pub entries: Vec<Entry>,
    /// Full validation of the current entries
    pub validation: ValidationResult,
    /// Errors the user should currently see (touched fields, or all after a
    /// submit attempt)
    pub visible: ValidationResult,
    pub submit_attempted: bool,
}

/// Receives a snapshot after every state change of the form
#[cfg_attr(test, mockall::automock)]
pub trait FormObserver {
    fn on_change(&mut self, snapshot: &FormSnapshot);
}

impl<F> FormObserver for F
where
    F: FnMut(&FormSnapshot),
{
    fn on_change(&mut self, snapshot: &FormSnapshot) {
        self(snapshot)
    }
}
