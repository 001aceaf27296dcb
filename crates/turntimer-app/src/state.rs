//! Application state (Model in TEA pattern)

use crate::config::Settings;
use crate::form::FormListController;
use turntimer_core::Entry;

/// Lifecycle phase of the player entry screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    /// Players are being entered
    #[default]
    Editing,
    /// The form was accepted and handed to the timer
    TimerStarted,
    /// Shutting down
    Quitting,
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub phase: AppPhase,
    pub settings: Settings,
    pub form: FormListController,
}

impl AppState {
    /// Create state with a single fallback player
    pub fn new(settings: Settings) -> Self {
        Self::with_players(settings, Vec::new())
    }

    /// Create state seeded with the given entries
    pub fn with_players(settings: Settings, defaults: Vec<Entry>) -> Self {
        let form = FormListController::new(settings.form.clone(), defaults);
        Self {
            phase: AppPhase::Editing,
            settings,
            form,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn is_editing(&self) -> bool {
        self.phase == AppPhase::Editing
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
