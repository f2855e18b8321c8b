//! Chat session state.
//!
//! The session knows nothing about transports or clocks. The host calls
//! [`ChatSession::begin_send`], delivers the [`OutboundMessage`] however it
//! likes, then hands the outcome to [`ChatSession::finish_send`].

use alloc::{
    format,
    string::{String, ToString},
    vec::Vec,
};
use core::fmt::Display;

use log::{debug, warn};

use crate::{history::MessageKind, settings::DEFAULT_WPM};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Models offered by the chat surface, as `(id, label)`.
pub const MODELS: [(&str, &str); 4] = [
    ("gpt-3.5-turbo", "GPT-3.5 Turbo"),
    ("gpt-4", "GPT-4"),
    ("claude-3", "Claude 3"),
    ("gemini-pro", "Gemini Pro"),
];

/// Shown in place of a reply when delivery failed.
pub const ERROR_REPLY: &str = "Sorry, there was an error processing your message. Please try again.";
/// Used when a reply arrived without any text.
pub const EMPTY_REPLY: &str = "No response received from AI.";

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChatSettings {
    /// Empty means replies are simulated locally.
    pub webhook_url: String,
    pub default_speed: u16,
    pub auto_fast_read: bool,
    pub save_chat_history: bool,
    pub model: String,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            default_speed: DEFAULT_WPM,
            auto_fast_read: false,
            save_chat_history: true,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChatMessage {
    pub text: String,
    pub kind: MessageKind,
    pub is_error: bool,
}

/// Payload the host must deliver for one send.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutboundMessage {
    pub message: String,
    pub model: String,
}

/// What the host should do with a finished send.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReplyAction {
    pub is_error: bool,
    /// Start fast reading the reply.
    pub fast_read: bool,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    settings: ChatSettings,
    chat_id: Option<String>,
    messages: Vec<ChatMessage>,
    sending: bool,
    fast_read_mode: bool,
}

impl ChatSession {
    pub fn new(settings: ChatSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> &ChatSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ChatSettings {
        &mut self.settings
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn chat_id(&self) -> Option<&str> {
        self.chat_id.as_deref()
    }

    /// Returns the current chat id, assigning `fresh()` if there is none yet.
    pub fn ensure_chat_id(&mut self, fresh: impl FnOnce() -> String) -> &str {
        self.chat_id.get_or_insert_with(fresh).as_str()
    }

    pub fn is_sending(&self) -> bool {
        self.sending
    }

    pub fn fast_read_mode(&self) -> bool {
        self.fast_read_mode
    }

    pub fn uses_webhook(&self) -> bool {
        !self.settings.webhook_url.trim().is_empty()
    }

    pub fn persists_history(&self) -> bool {
        self.settings.save_chat_history
    }

    /// Records the user's message and returns the payload to deliver.
    ///
    /// Blank input and sends while another is in flight yield `None`.
    pub fn begin_send(&mut self, input: &str) -> Option<OutboundMessage> {
        let message = input.trim();
        if message.is_empty() {
            return None;
        }
        if self.sending {
            debug!("chat: send ignored, previous message still in flight");
            return None;
        }

        self.sending = true;
        self.messages.push(ChatMessage {
            text: message.to_string(),
            kind: MessageKind::User,
            is_error: false,
        });

        Some(OutboundMessage {
            message: message.to_string(),
            model: self.settings.model.clone(),
        })
    }

    /// Records the reply (or the error placeholder) and ends the send.
    pub fn finish_send<E>(&mut self, outcome: Result<String, E>) -> ReplyAction
    where
        E: Display,
    {
        self.sending = false;

        let (text, is_error) = match outcome {
            Ok(reply) => (reply, false),
            Err(error) => {
                warn!("chat: send failed: {}", error);
                (ERROR_REPLY.to_string(), true)
            }
        };
        self.messages.push(ChatMessage {
            text,
            kind: MessageKind::Ai,
            is_error,
        });

        ReplyAction {
            is_error,
            fast_read: !is_error && (self.settings.auto_fast_read || self.fast_read_mode),
        }
    }

    /// Latest AI message that is not an error placeholder.
    pub fn last_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|message| message.kind == MessageKind::Ai && !message.is_error)
            .map(|message| message.text.as_str())
    }

    pub fn toggle_fast_read_mode(&mut self) -> bool {
        self.fast_read_mode = !self.fast_read_mode;
        self.fast_read_mode
    }

    /// Clears the conversation. The next send opens a new chat id.
    pub fn start_new_chat(&mut self) {
        self.messages.clear();
        self.chat_id = None;
    }
}

/// Picks the reply text out of a webhook answer: `response`, then
/// `message`, then [`EMPTY_REPLY`]. Empty strings count as missing.
pub fn reply_text<'a>(response: Option<&'a str>, message: Option<&'a str>) -> &'a str {
    response
        .filter(|text| !text.is_empty())
        .or(message.filter(|text| !text.is_empty()))
        .unwrap_or(EMPTY_REPLY)
}

/// Canned reply used when no webhook is configured. `variant` selects one
/// of three templates.
pub fn simulated_reply(message: &str, model: &str, variant: usize) -> String {
    match variant % 3 {
        0 => {
            let detail = if message.to_lowercase().contains("explain") {
                "This concept involves several key components that work together to create a comprehensive understanding."
            } else {
                "There are multiple perspectives to consider when approaching this subject."
            };
            format!(
                "That's an interesting question about \"{message}\". Based on the {model} model, I can help you understand this topic better. Here's what I think: {detail} Would you like me to elaborate on any specific aspect?"
            )
        }
        1 => format!(
            "I understand you're asking about \"{message}\". Using {model}, I can provide you with detailed insights. The key factors to consider include various technical and practical elements that influence the outcome. This is a complex topic that requires careful analysis of multiple variables and their interactions."
        ),
        _ => format!(
            "Thank you for your question regarding \"{message}\". According to {model}'s training, this involves several interconnected concepts that are fundamental to understanding the broader context. Let me break this down into manageable components that will help clarify the main principles and their applications."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_not_sent() {
        let mut session = ChatSession::default();
        assert_eq!(session.begin_send("   \n"), None);
        assert!(session.messages().is_empty());
        assert!(!session.is_sending());
    }

    #[test]
    fn send_trims_and_carries_model() {
        let mut session = ChatSession::default();
        let outbound = session.begin_send("  hello there ").unwrap();

        assert_eq!(outbound.message, "hello there");
        assert_eq!(outbound.model, DEFAULT_MODEL);
        assert!(session.is_sending());
        assert_eq!(session.messages()[0].kind, MessageKind::User);
    }

    #[test]
    fn second_send_while_in_flight_is_rejected() {
        let mut session = ChatSession::default();
        assert!(session.begin_send("one").is_some());
        assert!(session.begin_send("two").is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn failed_send_records_error_reply_without_fast_read() {
        let mut session = ChatSession::new(ChatSettings {
            auto_fast_read: true,
            ..ChatSettings::default()
        });
        session.begin_send("hi");

        let action = session.finish_send::<&str>(Err("HTTP error! status: 500"));

        assert!(action.is_error);
        assert!(!action.fast_read);
        assert!(!session.is_sending());
        let last = session.messages().last().unwrap();
        assert_eq!(last.text, ERROR_REPLY);
        assert!(last.is_error);
        assert_eq!(session.last_reply(), None);
    }

    #[test]
    fn fast_read_follows_mode_or_auto_setting() {
        let mut session = ChatSession::default();
        session.begin_send("a");
        assert!(!session.finish_send::<&str>(Ok("reply".into())).fast_read);

        assert!(session.toggle_fast_read_mode());
        session.begin_send("b");
        assert!(session.finish_send::<&str>(Ok("reply two".into())).fast_read);
        assert_eq!(session.last_reply(), Some("reply two"));
    }

    #[test]
    fn new_chat_clears_messages_and_id() {
        let mut session = ChatSession::default();
        assert_eq!(session.ensure_chat_id(|| "chat_1_abc".into()), "chat_1_abc");
        assert_eq!(session.ensure_chat_id(|| "chat_2_def".into()), "chat_1_abc");
        session.begin_send("hi");
        session.finish_send::<&str>(Ok("hey".into()));

        session.start_new_chat();

        assert!(session.messages().is_empty());
        assert_eq!(session.chat_id(), None);
    }

    #[test]
    fn webhook_is_used_only_when_configured() {
        let mut session = ChatSession::default();
        assert!(!session.uses_webhook());
        session.settings_mut().webhook_url = "https://hooks.example/chat".into();
        assert!(session.uses_webhook());
    }

    #[test]
    fn reply_text_prefers_response_then_message() {
        assert_eq!(reply_text(Some("r"), Some("m")), "r");
        assert_eq!(reply_text(None, Some("m")), "m");
        assert_eq!(reply_text(Some(""), Some("m")), "m");
        assert_eq!(reply_text(None, None), EMPTY_REPLY);
    }

    #[test]
    fn simulated_reply_mentions_message_and_model() {
        let first = simulated_reply("Explain tides", "gpt-4", 0);
        assert!(first.contains("\"Explain tides\""));
        assert!(first.contains("several key components"));

        let other = simulated_reply("tides", "gemini-pro", 0);
        assert!(other.contains("multiple perspectives"));

        assert!(simulated_reply("tides", "claude-3", 5).contains("claude-3's training"));
    }
}
