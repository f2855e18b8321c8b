//! Chat history records and storage seam.

use alloc::{string::String, vec::Vec};
use core::fmt::{Display, Write};

use log::{debug, warn};

/// How many messages a history load returns unless told otherwise.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

const CHAT_ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MessageKind {
    User,
    Ai,
}

impl MessageKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Self::User),
            "ai" => Some(Self::Ai),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoredMessage {
    pub message: String,
    pub kind: MessageKind,
    pub model: Option<String>,
    /// RFC 3339, as stamped by the host clock.
    pub timestamp: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChatSummary {
    pub id: String,
    pub last_message: Option<String>,
    pub last_message_kind: Option<MessageKind>,
    pub last_updated: String,
    pub message_count: usize,
}

/// Abstract chat history backend.
pub trait HistoryStore {
    type Error;

    fn append(&mut self, chat_id: &str, message: &StoredMessage) -> Result<(), Self::Error>;

    /// The newest `limit` messages of a chat, oldest first. Unknown chats
    /// are empty.
    fn load(&mut self, chat_id: &str, limit: usize) -> Result<Vec<StoredMessage>, Self::Error>;

    /// Every known chat, most recently updated first.
    fn chats(&mut self) -> Result<Vec<ChatSummary>, Self::Error>;
}

/// Tries the remote store first and falls back to the local one whenever it
/// is absent or fails. Only local failures surface.
pub struct FallbackHistory<R, L> {
    remote: Option<R>,
    local: L,
}

impl<R, L> FallbackHistory<R, L> {
    pub fn new(remote: Option<R>, local: L) -> Self {
        Self { remote, local }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }
}

impl<R, L> HistoryStore for FallbackHistory<R, L>
where
    R: HistoryStore,
    R::Error: Display,
    L: HistoryStore,
{
    type Error = L::Error;

    fn append(&mut self, chat_id: &str, message: &StoredMessage) -> Result<(), Self::Error> {
        if let Some(remote) = self.remote.as_mut() {
            match remote.append(chat_id, message) {
                Ok(()) => {
                    debug!("history: saved remotely chat={}", chat_id);
                    return Ok(());
                }
                Err(error) => warn!("history: remote save failed, using local store: {}", error),
            }
        }

        self.local.append(chat_id, message)
    }

    fn load(&mut self, chat_id: &str, limit: usize) -> Result<Vec<StoredMessage>, Self::Error> {
        if let Some(remote) = self.remote.as_mut() {
            match remote.load(chat_id, limit) {
                Ok(messages) => return Ok(messages),
                Err(error) => warn!("history: remote load failed, using local store: {}", error),
            }
        }

        self.local.load(chat_id, limit)
    }

    fn chats(&mut self) -> Result<Vec<ChatSummary>, Self::Error> {
        if let Some(remote) = self.remote.as_mut() {
            match remote.chats() {
                Ok(chats) => return Ok(chats),
                Err(error) => warn!("history: remote listing failed, using local store: {}", error),
            }
        }

        self.local.chats()
    }
}

/// Builds a chat id of the form `chat_<millis>_<9 base36 chars>`.
///
/// `entropy` comes from the host; only its low base36 digits are used.
pub fn new_chat_id(now_ms: u64, entropy: u64) -> String {
    let mut suffix = [b'0'; CHAT_ID_SUFFIX_LEN];
    let mut rest = entropy;
    for slot in suffix.iter_mut().rev() {
        *slot = BASE36[(rest % 36) as usize];
        rest /= 36;
    }

    let mut id = String::with_capacity(32);
    // Writing into a `String` cannot fail.
    let _ = write!(id, "chat_{now_ms}_");
    id.extend(suffix.iter().map(|byte| char::from(*byte)));
    id
}

/// Keeps the newest `limit` entries of an oldest-first list.
pub fn newest<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    if items.len() > limit {
        items.drain(..items.len() - limit);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{string::ToString, vec};

    #[derive(Default)]
    struct MemoryHistory {
        chats: Vec<(String, Vec<StoredMessage>)>,
    }

    impl HistoryStore for MemoryHistory {
        type Error = &'static str;

        fn append(&mut self, chat_id: &str, message: &StoredMessage) -> Result<(), Self::Error> {
            match self.chats.iter_mut().find(|(id, _)| id == chat_id) {
                Some((_, messages)) => messages.push(message.clone()),
                None => self.chats.push((chat_id.to_string(), vec![message.clone()])),
            }
            Ok(())
        }

        fn load(&mut self, chat_id: &str, limit: usize) -> Result<Vec<StoredMessage>, Self::Error> {
            let messages = self
                .chats
                .iter()
                .find(|(id, _)| id == chat_id)
                .map(|(_, messages)| messages.clone())
                .unwrap_or_default();
            Ok(newest(messages, limit))
        }

        fn chats(&mut self) -> Result<Vec<ChatSummary>, Self::Error> {
            Ok(self
                .chats
                .iter()
                .map(|(id, messages)| ChatSummary {
                    id: id.clone(),
                    last_message: messages.last().map(|m| m.message.clone()),
                    last_message_kind: messages.last().map(|m| m.kind),
                    last_updated: messages.last().map(|m| m.timestamp.clone()).unwrap_or_default(),
                    message_count: messages.len(),
                })
                .collect())
        }
    }

    struct Offline;

    impl HistoryStore for Offline {
        type Error = &'static str;

        fn append(&mut self, _: &str, _: &StoredMessage) -> Result<(), Self::Error> {
            Err("offline")
        }

        fn load(&mut self, _: &str, _: usize) -> Result<Vec<StoredMessage>, Self::Error> {
            Err("offline")
        }

        fn chats(&mut self) -> Result<Vec<ChatSummary>, Self::Error> {
            Err("offline")
        }
    }

    fn message(text: &str, kind: MessageKind) -> StoredMessage {
        StoredMessage {
            message: text.to_string(),
            kind,
            model: Some("gpt-4".to_string()),
            timestamp: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn failing_remote_falls_back_to_local() {
        let mut history = FallbackHistory::new(Some(Offline), MemoryHistory::default());

        history.append("chat_1", &message("hi", MessageKind::User)).unwrap();
        history.append("chat_1", &message("hello", MessageKind::Ai)).unwrap();

        let loaded = history.load("chat_1", DEFAULT_HISTORY_LIMIT).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(history.local().chats.len(), 1);

        let chats = history.chats().unwrap();
        assert_eq!(chats[0].last_message.as_deref(), Some("hello"));
        assert_eq!(chats[0].last_message_kind, Some(MessageKind::Ai));
    }

    #[test]
    fn healthy_remote_keeps_local_untouched() {
        let mut history = FallbackHistory::new(
            Some(MemoryHistory::default()),
            MemoryHistory::default(),
        );

        history.append("chat_1", &message("hi", MessageKind::User)).unwrap();

        assert!(history.local().chats.is_empty());
        assert_eq!(history.load("chat_1", 10).unwrap().len(), 1);
    }

    #[test]
    fn no_remote_uses_local() {
        let mut history: FallbackHistory<Offline, _> =
            FallbackHistory::new(None, MemoryHistory::default());
        assert!(!history.has_remote());
        history.append("c", &message("x", MessageKind::User)).unwrap();
        assert_eq!(history.local().chats.len(), 1);
    }

    #[test]
    fn newest_keeps_the_tail() {
        assert_eq!(newest(vec![1, 2, 3, 4], 2), [3, 4]);
        assert_eq!(newest(vec![1, 2], 5), [1, 2]);
        assert!(newest(vec![1, 2], 0).is_empty());
    }

    #[test]
    fn chat_ids_have_fixed_shape() {
        assert_eq!(new_chat_id(1_700_000_000_000, 0), "chat_1700000000000_000000000");
        assert_eq!(new_chat_id(0, 35), "chat_0_00000000z");
        assert_eq!(new_chat_id(42, 36 * 36), "chat_42_000000100");

        let id = new_chat_id(1, u64::MAX);
        let suffix = id.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 9);
        assert!(suffix.bytes().all(|b| b.is_ascii_alphanumeric()));
    }

    #[test]
    fn message_kind_round_trips_its_wire_name() {
        assert_eq!(MessageKind::parse(MessageKind::Ai.as_str()), Some(MessageKind::Ai));
        assert_eq!(MessageKind::parse("system"), None);
    }
}
