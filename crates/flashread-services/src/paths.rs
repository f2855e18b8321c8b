//! Default on-disk locations.

use std::path::PathBuf;

const APP_DIR: &str = "flashread";

/// `<config_dir>/flashread/settings.json`, when the platform has one.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("settings.json"))
}

/// `<data_dir>/flashread/chat_history.json`, when the platform has one.
pub fn default_history_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(APP_DIR).join("chat_history.json"))
}
