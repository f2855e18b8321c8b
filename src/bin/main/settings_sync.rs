use flashread_core::settings::{PersistedSettings, SettingsStore};
use flashread_services::JsonSettingsStore;
use log::{debug, warn};

use super::SETTINGS_SAVE_DEBOUNCE_MS;

pub(super) struct SettingsSyncState {
    last_saved: PersistedSettings,
    pending: Option<(PersistedSettings, u64)>,
}

impl SettingsSyncState {
    pub(super) fn new(initial: PersistedSettings) -> Self {
        Self {
            last_saved: initial,
            pending: None,
        }
    }

    pub(super) fn track_current(&mut self, current: &PersistedSettings, now_ms: u64) {
        if *current == self.last_saved {
            self.pending = None;
            return;
        }

        match self.pending.as_mut() {
            Some((pending, changed_at_ms)) => {
                if pending != current {
                    *pending = current.clone();
                    *changed_at_ms = now_ms;
                }
            }
            None => {
                self.pending = Some((current.clone(), now_ms));
            }
        }
    }

    pub(super) fn flush_if_due(&mut self, store: Option<&mut JsonSettingsStore>, now_ms: u64) {
        let Some((_, changed_at_ms)) = self.pending else {
            return;
        };

        if now_ms.saturating_sub(changed_at_ms) < SETTINGS_SAVE_DEBOUNCE_MS {
            return;
        }

        self.flush(store, now_ms);
    }

    /// Saves any pending change right away, debounce or not.
    pub(super) fn flush(&mut self, store: Option<&mut JsonSettingsStore>, now_ms: u64) {
        let Some((candidate, _)) = self.pending.take() else {
            return;
        };

        match store {
            Some(store) => match store.save(&candidate) {
                Ok(()) => {
                    debug!("settings: saved wpm={}", candidate.wpm);
                    self.last_saved = candidate;
                }
                Err(error) => {
                    // Retry on the next debounce window.
                    warn!("settings: save failed: {}", error);
                    self.pending = Some((candidate, now_ms));
                }
            },
            None => {
                self.last_saved = candidate;
            }
        }
    }

    #[cfg(test)]
    fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_wpm(wpm: u16) -> PersistedSettings {
        PersistedSettings {
            wpm,
            ..PersistedSettings::default()
        }
    }

    #[test]
    fn saves_only_after_the_debounce_window() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = JsonSettingsStore::new(dir.path().join("settings.json"));
        let mut sync = SettingsSyncState::new(PersistedSettings::default());

        sync.track_current(&with_wpm(425), 1_000);
        sync.flush_if_due(Some(&mut store), 2_000);
        assert!(sync.has_pending());
        assert_eq!(store.load().unwrap(), None);

        // A further change restarts the window.
        sync.track_current(&with_wpm(450), 2_000);
        sync.flush_if_due(Some(&mut store), 3_000);
        assert!(sync.has_pending());

        sync.flush_if_due(Some(&mut store), 3_500);
        assert!(!sync.has_pending());
        assert_eq!(store.load().unwrap(), Some(with_wpm(450)));
    }

    #[test]
    fn changing_back_cancels_the_save() {
        let mut sync = SettingsSyncState::new(PersistedSettings::default());
        sync.track_current(&with_wpm(500), 0);
        sync.track_current(&PersistedSettings::default(), 100);
        assert!(!sync.has_pending());
    }
}
