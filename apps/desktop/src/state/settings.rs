//! # Settings State
//!
//! Process-wide tax rate, exchange rate and company profile.

use std::sync::{Arc, Mutex, PoisonError};

use quote_core::Settings;

/// Shared settings state.
#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    settings: Arc<Mutex<Settings>>,
}

impl SettingsState {
    pub fn new(settings: Settings) -> Self {
        SettingsState {
            settings: Arc::new(Mutex::new(settings)),
        }
    }

    /// Returns a copy of the current settings.
    ///
    /// Settings are small; copying keeps the lock out of pricing runs.
    pub fn snapshot(&self) -> Settings {
        let settings = self.settings.lock().unwrap_or_else(PoisonError::into_inner);
        settings.clone()
    }

    /// Executes a function with write access to the settings.
    pub fn with_settings_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Settings) -> R,
    {
        let mut settings = self.settings.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut settings)
    }
}
