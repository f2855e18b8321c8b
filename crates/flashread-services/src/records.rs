//! JSON shapes shared by the local history file and the remote store.

use flashread_core::history::{ChatSummary, MessageKind, StoredMessage};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct MessageRecord {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub timestamp: String,
}

impl From<&StoredMessage> for MessageRecord {
    fn from(message: &StoredMessage) -> Self {
        Self {
            message: message.message.clone(),
            kind: message.kind.as_str().to_string(),
            model: message.model.clone(),
            timestamp: message.timestamp.clone(),
        }
    }
}

impl MessageRecord {
    /// Records with an unknown `type` are dropped rather than failing the
    /// whole load.
    pub fn into_stored(self) -> Option<StoredMessage> {
        let kind = MessageKind::parse(&self.kind)?;
        Some(StoredMessage {
            message: self.message,
            kind,
            model: self.model,
            timestamp: self.timestamp,
        })
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChatRecord {
    #[serde(default)]
    pub messages: Vec<MessageRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_message_type: Option<String>,
    #[serde(default)]
    pub last_updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_count: Option<usize>,
}

impl ChatRecord {
    pub fn summary(&self, id: &str) -> ChatSummary {
        ChatSummary {
            id: id.to_string(),
            last_message: self.last_message.clone(),
            last_message_kind: self.last_message_type.as_deref().and_then(MessageKind::parse),
            last_updated: self.last_updated.clone(),
            message_count: self.message_count.unwrap_or(self.messages.len()),
        }
    }
}

/// One entry of the remote chat listing.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ChatListing {
    pub id: String,
    #[serde(flatten)]
    pub record: ChatRecord,
}

pub(crate) fn newest_first(chats: &mut [ChatSummary]) {
    // RFC 3339 timestamps from one clock sort lexicographically.
    chats.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
}
