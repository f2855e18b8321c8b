//! Reader configuration and persisted user settings.

use crate::{chat::ChatSettings, i18n::Language};

/// Default reading rate for new sessions.
pub const DEFAULT_WPM: u16 = 400;
/// Lowest rate a session will run at.
pub const MIN_WPM: u16 = 100;
/// Highest rate a session will run at.
pub const MAX_WPM: u16 = 1000;

/// Rate and rate bounds for one playback session.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReaderConfig {
    pub wpm: u16,
    pub min_wpm: u16,
    pub max_wpm: u16,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            min_wpm: MIN_WPM,
            max_wpm: MAX_WPM,
        }
    }
}

impl ReaderConfig {
    pub const fn with_wpm(mut self, wpm: u16) -> Self {
        self.wpm = wpm;
        self
    }

    /// Repairs inverted or zero bounds and pulls `wpm` inside them.
    pub fn normalized(mut self) -> Self {
        if self.max_wpm < self.min_wpm {
            core::mem::swap(&mut self.max_wpm, &mut self.min_wpm);
        }
        self.min_wpm = self.min_wpm.max(1);
        self.max_wpm = self.max_wpm.max(self.min_wpm);
        self.wpm = self.wpm.clamp(self.min_wpm, self.max_wpm);
        self
    }

    /// Clamps an arbitrary requested rate, including zero and negative
    /// values, into the supported range.
    pub fn clamp_wpm(&self, wpm: i32) -> u16 {
        wpm.clamp(i32::from(self.min_wpm), i32::from(self.max_wpm)) as u16
    }
}

/// User-tunable settings that survive restarts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PersistedSettings {
    pub wpm: u16,
    pub language: Language,
    pub chat: ChatSettings,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            wpm: DEFAULT_WPM,
            language: Language::default(),
            chat: ChatSettings::default(),
        }
    }
}

impl PersistedSettings {
    pub fn reader_config(&self) -> ReaderConfig {
        ReaderConfig::default().with_wpm(self.wpm).normalized()
    }
}

/// Abstract settings persistence backend.
pub trait SettingsStore {
    type Error;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error>;
    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error>;
}
