use std::{io::Write, time::Duration};

use anyhow::Result;
use chrono::{SecondsFormat, Utc};
use flashread_core::{
    chat::{ChatSession, MODELS, OutboundMessage, simulated_reply},
    history::{DEFAULT_HISTORY_LIMIT, MessageKind, StoredMessage, new_chat_id},
    settings::PersistedSettings,
    text_policy::preview_compact,
};
use flashread_services::{JsonSettingsStore, WebhookError, WebhookTransport, paths};
use log::{debug, info, warn};
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    sync::mpsc,
};

use super::{
    ChatArgs, Clock, READER_CLOSE_DELAY_MS, SIMULATED_REPLY_JITTER_MS,
    SIMULATED_REPLY_MIN_DELAY_MS,
    history_worker::{HistoryWorker, RemoteTarget},
    reader_loop::{RateSetting, ReaderSession},
};

const HISTORY_LIST_LIMIT: usize = 10;
const PREVIEW_BYTES: usize = 256;

type ReplyOutcome = Result<String, WebhookError>;

/// Random bits for chat ids and simulated reply variety.
fn entropy() -> u64 {
    uuid::Uuid::new_v4().as_u64_pair().0
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn model_label(model: &str) -> &str {
    MODELS
        .iter()
        .find(|(id, _)| *id == model)
        .map_or(model, |(_, label)| *label)
}

struct ChatHost {
    session: ChatSession,
    transport: Option<WebhookTransport>,
    history: Option<HistoryWorker>,
    reader: ReaderSession,
    /// Lines go to the reader while a reply is being fast read.
    reading: bool,
    /// When the reader reached the end of the current reply.
    finished_at_ms: Option<u64>,
    replies: mpsc::UnboundedSender<ReplyOutcome>,
}

impl ChatHost {
    fn persist(&mut self, kind: MessageKind, text: &str, model: Option<String>) {
        let Some(history) = &self.history else {
            return;
        };
        let chat_id = self
            .session
            .ensure_chat_id(|| new_chat_id(Utc::now().timestamp_millis().unsigned_abs(), entropy()));
        history.append(
            chat_id,
            StoredMessage {
                message: text.to_string(),
                kind,
                model,
                timestamp: timestamp(),
            },
        );
    }

    fn send(&mut self, line: &str) {
        if self.session.is_sending() {
            println!("(still waiting for the previous reply)");
            return;
        }
        let Some(outbound) = self.session.begin_send(line) else {
            return;
        };
        self.persist(MessageKind::User, &outbound.message, None);

        let replies = self.replies.clone();
        match self.transport.clone() {
            Some(transport) => {
                tokio::spawn(async move {
                    let _ = replies.send(transport.send(&outbound).await);
                });
            }
            None => {
                let seed = entropy();
                tokio::spawn(async move {
                    let delay = SIMULATED_REPLY_MIN_DELAY_MS + seed % SIMULATED_REPLY_JITTER_MS;
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    let _ = replies.send(Ok(simulate(&outbound, seed)));
                });
            }
        }
        println!("...");
    }

    fn receive(&mut self, outcome: ReplyOutcome, now_ms: u64) {
        let action = self.session.finish_send(outcome);
        let Some(reply) = self.session.messages().last().map(|message| message.text.clone()) else {
            return;
        };

        if !action.is_error {
            let model = self.session.settings().model.clone();
            self.persist(MessageKind::Ai, &reply, Some(model));
        }

        if action.fast_read {
            self.fast_read(&reply, now_ms);
        } else {
            print_reply(&reply, action.is_error);
        }
    }

    fn fast_read(&mut self, text: &str, now_ms: u64) {
        println!("p pause  + faster  - slower  q back to chat");
        self.reader.load(text);
        self.reader.start(now_ms);
        self.reading = true;
        self.finished_at_ms = None;
    }

    /// Runs after every reader step: hands the input back to chat once the
    /// reader was closed, or once it has sat finished for the close delay.
    fn watch_reader(&mut self, now_ms: u64) {
        if !self.reading {
            return;
        }
        if self.reader.is_closed() {
            self.stop_reading();
            return;
        }
        if !self.reader.is_finished() {
            self.finished_at_ms = None;
            return;
        }

        let finished_at_ms = *self.finished_at_ms.get_or_insert(now_ms);
        if now_ms.saturating_sub(finished_at_ms) >= READER_CLOSE_DELAY_MS {
            debug!("chat: closing finished reader");
            self.reader.close();
            self.stop_reading();
        }
    }

    /// Routes one typed line. Returns `false` when the user quits.
    async fn handle_line(&mut self, line: &str, now_ms: u64) -> bool {
        if self.reading {
            if self.reader.command(line) {
                return true;
            }
            if !self.reader.is_finished() {
                debug!("chat: not a reader command {:?}", line.trim());
                return true;
            }
            // Typing after the reply ended means the user is back to chatting.
            self.reader.close();
            self.stop_reading();
        }

        line.trim().is_empty() || self.command(line, now_ms).await
    }

    fn stop_reading(&mut self) {
        self.reading = false;
        self.finished_at_ms = None;
        self.reader.end_line();
        if let Some(reply) = self.session.last_reply() {
            print_reply(reply, false);
        }
    }

    async fn command(&mut self, line: &str, now_ms: u64) -> bool {
        let mut words = line.split_whitespace();
        match words.next() {
            Some("q" | "/quit") => return false,
            Some("/fast") => {
                let on = self.session.toggle_fast_read_mode();
                println!("fast read mode {}", if on { "on" } else { "off" });
            }
            Some("/new") => {
                self.session.start_new_chat();
                println!("new chat started");
            }
            Some("/read") => match self.session.last_reply().map(str::to_string) {
                Some(reply) => self.fast_read(&reply, now_ms),
                None => println!("no reply to read yet"),
            },
            Some("/history") => self.show_history(words.next()).await,
            _ => self.send(line),
        }
        true
    }

    async fn show_history(&self, chat_id: Option<&str>) {
        let Some(history) = &self.history else {
            println!("chat history is turned off");
            return;
        };

        match chat_id {
            Some(chat_id) => match history.load(chat_id, DEFAULT_HISTORY_LIMIT).await {
                Ok(messages) if messages.is_empty() => println!("no messages in {chat_id}"),
                Ok(messages) => {
                    for message in messages {
                        println!("[{}] {}: {}", message.timestamp, message.kind.as_str(), message.message);
                    }
                }
                Err(error) => warn!("history: load failed: {:#}", error),
            },
            None => match history.chats().await {
                Ok(chats) if chats.is_empty() => println!("no saved chats"),
                Ok(chats) => {
                    for chat in chats.iter().take(HISTORY_LIST_LIMIT) {
                        let preview = chat.last_message.as_deref().unwrap_or("");
                        println!(
                            "{} ({} messages, {}) {}",
                            chat.id,
                            chat.message_count,
                            chat.last_updated,
                            preview_compact::<PREVIEW_BYTES>(preview)
                        );
                    }
                }
                Err(error) => warn!("history: listing failed: {:#}", error),
            },
        }
    }
}

fn simulate(outbound: &OutboundMessage, seed: u64) -> String {
    let variant = usize::try_from(seed % 3).unwrap_or(0);
    simulated_reply(&outbound.message, &outbound.model, variant)
}

fn print_reply(reply: &str, is_error: bool) {
    let prefix = if is_error { "error" } else { "ai" };
    println!("{prefix}: {reply}");
    let _ = std::io::stdout().flush();
}

/// Applies command-line overrides on top of the saved chat settings.
fn effective_settings(args: &ChatArgs, persisted: &PersistedSettings) -> PersistedSettings {
    let mut settings = persisted.clone();
    let reader = settings.reader_config();
    let chat = &mut settings.chat;

    if let Some(url) = &args.webhook {
        chat.webhook_url = url.trim().to_string();
    }
    if let Some(model) = &args.model {
        if !MODELS.iter().any(|(id, _)| *id == model.as_str()) {
            warn!("chat: unknown model {:?}, sending it anyway", model);
        }
        chat.model = model.clone();
    }
    if args.auto_fast_read {
        chat.auto_fast_read = true;
    }
    if args.no_history {
        chat.save_chat_history = false;
    }
    if let Some(wpm) = args.wpm {
        chat.default_speed = reader.clamp_wpm(i32::from(wpm));
    }
    settings
}

pub(super) async fn run(
    args: ChatArgs,
    persisted: PersistedSettings,
    mut store: Option<JsonSettingsStore>,
    clock: Clock,
) -> Result<()> {
    let settings = effective_settings(&args, &persisted);
    let session = ChatSession::new(settings.chat.clone());

    let transport = if session.uses_webhook() {
        Some(WebhookTransport::new(&session.settings().webhook_url)?)
    } else {
        info!("chat: no webhook configured, replies are simulated");
        None
    };

    let history = if session.persists_history() {
        let local_path = args.history_file.clone().or_else(paths::default_history_path);
        match local_path {
            Some(path) => {
                let remote = args.remote_history.clone().map(|base_url| RemoteTarget {
                    base_url,
                    token: args.remote_history_token.clone(),
                });
                Some(HistoryWorker::spawn(path, remote)?)
            }
            None => {
                warn!("history: no data directory, chat history is not saved");
                None
            }
        }
    } else {
        None
    };

    let (replies, mut incoming) = mpsc::unbounded_channel();
    // The reader writes reply speed changes back into the saved settings,
    // not the command-line overrides.
    let reader = ReaderSession::new(persisted, RateSetting::ChatReplies, settings.chat.default_speed);
    let mut host = ChatHost {
        session,
        transport,
        history,
        reader,
        reading: false,
        finished_at_ms: None,
        replies,
    };

    println!(
        "chatting with {}. /fast /read /new /history [id], q to quit",
        model_label(&host.session.settings().model)
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let now_ms = clock.now_ms();
        host.reader.step(now_ms, store.as_mut());
        host.watch_reader(now_ms);

        let wake = clock.instant_at(host.reader.wake_at(now_ms));
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !host.handle_line(&line, clock.now_ms()).await {
                    break;
                }
            }
            Some(outcome) = incoming.recv() => host.receive(outcome, clock.now_ms()),
            _ = tokio::time::sleep_until(wake) => {}
        }
    }

    if host.reading {
        host.reader.close();
    }
    debug!("chat: exiting wpm={}", host.reader.settings().chat.default_speed);
    host.reader.flush_settings(store.as_mut(), clock.now_ms());
    Ok(())
}

#[cfg(test)]
mod tests {
    use flashread_core::chat::ChatSettings;

    use super::*;

    fn args() -> ChatArgs {
        ChatArgs {
            webhook: None,
            model: None,
            auto_fast_read: false,
            no_history: false,
            history_file: None,
            remote_history: None,
            remote_history_token: None,
            wpm: None,
        }
    }

    #[test]
    fn overrides_apply_on_top_of_saved_settings() {
        let persisted = PersistedSettings::default();
        let settings = effective_settings(
            &ChatArgs {
                webhook: Some(" https://hooks.example/chat ".to_string()),
                model: Some("gpt-4".to_string()),
                auto_fast_read: true,
                no_history: true,
                wpm: Some(5_000),
                ..args()
            },
            &persisted,
        );

        assert_eq!(settings.chat.webhook_url, "https://hooks.example/chat");
        assert_eq!(settings.chat.model, "gpt-4");
        assert!(settings.chat.auto_fast_read);
        assert!(!settings.chat.save_chat_history);
        assert_eq!(settings.chat.default_speed, 1000);
        assert_eq!(persisted, PersistedSettings::default());
    }

    fn offline_host(reply_wpm: u16) -> ChatHost {
        let (replies, _incoming) = mpsc::unbounded_channel();
        ChatHost {
            session: ChatSession::new(ChatSettings::default()),
            transport: None,
            history: None,
            reader: ReaderSession::new(
                PersistedSettings::default(),
                RateSetting::ChatReplies,
                reply_wpm,
            ),
            reading: false,
            finished_at_ms: None,
            replies,
        }
    }

    fn step(host: &mut ChatHost, now_ms: u64) {
        host.reader.step(now_ms, None);
        host.watch_reader(now_ms);
    }

    #[test]
    fn finished_reader_hands_input_back_after_the_close_delay() {
        let mut host = offline_host(600);
        host.fast_read("hi there", 0);
        assert!(host.reading);

        step(&mut host, 100);
        step(&mut host, 200);
        assert!(host.reader.is_finished());
        assert!(host.reading);

        step(&mut host, 200 + READER_CLOSE_DELAY_MS - 1);
        assert!(host.reading);

        step(&mut host, 200 + READER_CLOSE_DELAY_MS);
        assert!(!host.reading);
        assert!(host.reader.is_closed());
    }

    #[test]
    fn paused_reader_is_not_closed_by_the_delay() {
        let mut host = offline_host(600);
        host.fast_read("one two three", 0);
        assert!(host.reader.command("p"));
        step(&mut host, 50);

        step(&mut host, 10_000);
        assert!(host.reading);
        assert!(!host.reader.is_finished());
    }

    #[tokio::test]
    async fn chat_lines_after_a_finished_read_reach_chat() {
        let mut host = offline_host(600);
        host.fast_read("hi there", 0);
        step(&mut host, 100);
        step(&mut host, 200);
        assert!(host.reader.is_finished());

        assert!(host.handle_line("/fast", 300).await);
        assert!(!host.reading);
        assert!(host.session.fast_read_mode());
    }

    #[tokio::test]
    async fn unknown_lines_are_ignored_mid_read() {
        let mut host = offline_host(600);
        host.fast_read("one two three", 0);

        assert!(host.handle_line("/fast", 50).await);
        assert!(host.reading);
        assert!(!host.session.fast_read_mode());
    }

    #[test]
    fn model_labels_fall_back_to_the_id() {
        assert_eq!(model_label("gpt-4"), "GPT-4");
        assert_eq!(model_label("local-llm"), "local-llm");
    }
}
