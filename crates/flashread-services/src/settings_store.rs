//! Settings persisted as a JSON document.

use std::{
    fs,
    path::{Path, PathBuf},
};

use flashread_core::{
    chat::ChatSettings,
    i18n::Language,
    settings::{PersistedSettings, SettingsStore},
};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SettingsFile {
    wpm: u16,
    language: String,
    chat: ChatSettingsFile,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ChatSettingsFile {
    #[serde(alias = "n8nWebhookUrl")]
    webhook_url: String,
    default_speed: u16,
    auto_fast_read: bool,
    save_chat_history: bool,
    model: String,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self::from(&PersistedSettings::default())
    }
}

impl Default for ChatSettingsFile {
    fn default() -> Self {
        Self::from(&ChatSettings::default())
    }
}

impl From<&PersistedSettings> for SettingsFile {
    fn from(settings: &PersistedSettings) -> Self {
        Self {
            wpm: settings.wpm,
            language: settings.language.code().to_string(),
            chat: ChatSettingsFile::from(&settings.chat),
        }
    }
}

impl From<&ChatSettings> for ChatSettingsFile {
    fn from(chat: &ChatSettings) -> Self {
        Self {
            webhook_url: chat.webhook_url.clone(),
            default_speed: chat.default_speed,
            auto_fast_read: chat.auto_fast_read,
            save_chat_history: chat.save_chat_history,
            model: chat.model.clone(),
        }
    }
}

impl From<SettingsFile> for PersistedSettings {
    fn from(file: SettingsFile) -> Self {
        let defaults = PersistedSettings::default();
        let reader = defaults.reader_config();

        Self {
            wpm: reader.clamp_wpm(i32::from(file.wpm)),
            language: Language::from_code(&file.language).unwrap_or(defaults.language),
            chat: ChatSettings {
                webhook_url: file.chat.webhook_url,
                default_speed: reader.clamp_wpm(i32::from(file.chat.default_speed)),
                auto_fast_read: file.chat.auto_fast_read,
                save_chat_history: file.chat.save_chat_history,
                model: if file.chat.model.trim().is_empty() {
                    defaults.chat.model
                } else {
                    file.chat.model
                },
            },
        }
    }
}

impl SettingsStore for JsonSettingsStore {
    type Error = StoreError;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(StoreError::io(&self.path, error)),
        };

        let file: SettingsFile = serde_json::from_str(&contents)?;
        debug!("settings: loaded from {}", self.path.display());
        Ok(Some(file.into()))
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|error| StoreError::io(parent, error))?;
        }

        let json = serde_json::to_string_pretty(&SettingsFile::from(settings))?;
        fs::write(&self.path, json).map_err(|error| StoreError::io(&self.path, error))?;
        debug!("settings: saved to {}", self.path.display());
        Ok(())
    }
}
