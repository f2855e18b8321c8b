use std::{path::PathBuf, thread::JoinHandle};

use anyhow::{Context, Result, anyhow};
use crossbeam_channel::{Receiver, Sender};
use flashread_core::history::{ChatSummary, FallbackHistory, HistoryStore, StoredMessage};
use flashread_services::{LocalHistoryStore, RemoteHistoryStore, StoreError};
use log::{debug, info, warn};
use tokio::sync::oneshot;

type Reply<T> = oneshot::Sender<Result<T, StoreError>>;

enum HistoryCommand {
    Append {
        chat_id: String,
        message: StoredMessage,
    },
    Load {
        chat_id: String,
        limit: usize,
        reply: Reply<Vec<StoredMessage>>,
    },
    Chats {
        reply: Reply<Vec<ChatSummary>>,
    },
}

pub(super) struct RemoteTarget {
    pub(super) base_url: String,
    pub(super) token: Option<String>,
}

/// Owns the history stores on a dedicated thread; the blocking HTTP client
/// of the remote store must stay off the async runtime.
pub(super) struct HistoryWorker {
    commands: Option<Sender<HistoryCommand>>,
    thread: Option<JoinHandle<()>>,
}

impl HistoryWorker {
    pub(super) fn spawn(local_path: PathBuf, remote: Option<RemoteTarget>) -> Result<Self> {
        let (commands, inbox) = crossbeam_channel::unbounded();
        let thread = std::thread::Builder::new()
            .name("history".to_string())
            .spawn(move || {
                let remote = remote.and_then(|target| {
                    match RemoteHistoryStore::new(&target.base_url, target.token) {
                        Ok(store) => Some(store),
                        Err(error) => {
                            warn!("history: remote store disabled: {}", error);
                            None
                        }
                    }
                });
                info!(
                    "history: local={} remote={}",
                    local_path.display(),
                    remote.is_some()
                );
                serve(FallbackHistory::new(remote, LocalHistoryStore::new(local_path)), inbox);
            })
            .context("spawning history thread")?;

        Ok(Self {
            commands: Some(commands),
            thread: Some(thread),
        })
    }

    pub(super) fn append(&self, chat_id: &str, message: StoredMessage) {
        self.send(HistoryCommand::Append {
            chat_id: chat_id.to_string(),
            message,
        });
    }

    pub(super) async fn load(&self, chat_id: &str, limit: usize) -> Result<Vec<StoredMessage>> {
        let (reply, answer) = oneshot::channel();
        self.send(HistoryCommand::Load {
            chat_id: chat_id.to_string(),
            limit,
            reply,
        });
        answer.await.map_err(|_| anyhow!("history thread stopped"))?.map_err(Into::into)
    }

    pub(super) async fn chats(&self) -> Result<Vec<ChatSummary>> {
        let (reply, answer) = oneshot::channel();
        self.send(HistoryCommand::Chats { reply });
        answer.await.map_err(|_| anyhow!("history thread stopped"))?.map_err(Into::into)
    }

    fn send(&self, command: HistoryCommand) {
        let sent = self
            .commands
            .as_ref()
            .is_some_and(|commands| commands.send(command).is_ok());
        if !sent {
            warn!("history: worker is gone, command dropped");
        }
    }
}

impl Drop for HistoryWorker {
    fn drop(&mut self) {
        // Closing the channel ends the loop once queued appends are written.
        self.commands.take();
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("history: worker panicked");
            }
        }
    }
}

fn serve<S>(mut store: S, inbox: Receiver<HistoryCommand>)
where
    S: HistoryStore<Error = StoreError>,
{
    for command in inbox {
        match command {
            HistoryCommand::Append { chat_id, message } => {
                if let Err(error) = store.append(&chat_id, &message) {
                    warn!("history: save failed chat={}: {}", chat_id, error);
                }
            }
            HistoryCommand::Load {
                chat_id,
                limit,
                reply,
            } => {
                let _ = reply.send(store.load(&chat_id, limit));
            }
            HistoryCommand::Chats { reply } => {
                let _ = reply.send(store.chats());
            }
        }
    }
    debug!("history: worker stopped");
}
