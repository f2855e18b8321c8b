//! Chat history in a single JSON file, keyed by chat id.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use flashread_core::history::{ChatSummary, HistoryStore, StoredMessage, newest};
use log::debug;

use crate::{
    error::StoreError,
    records::{ChatRecord, MessageRecord, newest_first},
};

type ChatMap = BTreeMap<String, ChatRecord>;

pub struct LocalHistoryStore {
    path: PathBuf,
}

impl LocalHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<ChatMap, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(ChatMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(ChatMap::new()),
            Err(error) => Err(StoreError::io(&self.path, error)),
        }
    }

    fn write(&self, chats: &ChatMap) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|error| StoreError::io(parent, error))?;
        }

        let json = serde_json::to_string_pretty(chats)?;
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|error| StoreError::io(&staging, error))?;
        fs::rename(&staging, &self.path).map_err(|error| StoreError::io(&self.path, error))
    }
}

impl HistoryStore for LocalHistoryStore {
    type Error = StoreError;

    fn append(&mut self, chat_id: &str, message: &StoredMessage) -> Result<(), Self::Error> {
        let mut chats = self.read()?;
        let chat = chats.entry(chat_id.to_string()).or_default();

        chat.messages.push(MessageRecord::from(message));
        chat.last_message = Some(message.message.clone());
        chat.last_message_type = Some(message.kind.as_str().to_string());
        chat.last_updated = message.timestamp.clone();
        chat.message_count = None;

        self.write(&chats)?;
        debug!("history: saved locally chat={}", chat_id);
        Ok(())
    }

    fn load(&mut self, chat_id: &str, limit: usize) -> Result<Vec<StoredMessage>, Self::Error> {
        let mut chats = self.read()?;
        let messages = chats
            .remove(chat_id)
            .map(|chat| {
                chat.messages
                    .into_iter()
                    .filter_map(MessageRecord::into_stored)
                    .collect()
            })
            .unwrap_or_default();

        Ok(newest(messages, limit))
    }

    fn chats(&mut self) -> Result<Vec<ChatSummary>, Self::Error> {
        let mut summaries: Vec<ChatSummary> = self
            .read()?
            .iter()
            .map(|(id, chat)| chat.summary(id))
            .collect();
        newest_first(&mut summaries);
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flashread_core::history::MessageKind;

    fn message(text: &str, kind: MessageKind, timestamp: &str) -> StoredMessage {
        StoredMessage {
            message: text.to_string(),
            kind,
            model: Some("gpt-4".to_string()),
            timestamp: timestamp.to_string(),
        }
    }

    #[test]
    fn missing_file_is_an_empty_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalHistoryStore::new(dir.path().join("none.json"));

        assert!(store.load("chat_1", 50).unwrap().is_empty());
        assert!(store.chats().unwrap().is_empty());
    }

    #[test]
    fn appends_and_summarizes_in_local_storage_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("chat_history.json");
        let mut store = LocalHistoryStore::new(&path);

        store
            .append("chat_1", &message("hi", MessageKind::User, "2024-01-01T00:00:00Z"))
            .unwrap();
        store
            .append("chat_1", &message("hello", MessageKind::Ai, "2024-01-01T00:00:05Z"))
            .unwrap();
        store
            .append("chat_2", &message("later", MessageKind::User, "2024-02-01T00:00:00Z"))
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["chat_1"]["lastMessage"], "hello");
        assert_eq!(raw["chat_1"]["lastMessageType"], "ai");
        assert_eq!(raw["chat_1"]["messages"][0]["type"], "user");

        let chats = store.chats().unwrap();
        assert_eq!(chats[0].id, "chat_2");
        assert_eq!(chats[1].message_count, 2);
        assert_eq!(chats[1].last_message_kind, Some(MessageKind::Ai));
    }

    #[test]
    fn load_returns_newest_messages_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalHistoryStore::new(dir.path().join("h.json"));
        for n in 0..5 {
            let text = format!("m{n}");
            store
                .append("c", &message(&text, MessageKind::User, "2024-01-01T00:00:00Z"))
                .unwrap();
        }

        let loaded = store.load("c", 2).unwrap();
        let texts: Vec<_> = loaded.iter().map(|m| m.message.as_str()).collect();
        assert_eq!(texts, ["m3", "m4"]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("h.json");
        fs::write(&path, "{not json").unwrap();

        let mut store = LocalHistoryStore::new(&path);
        assert!(matches!(store.chats(), Err(StoreError::Json(_))));
    }
}
