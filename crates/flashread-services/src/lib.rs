//! I/O collaborators for flashread: the chat webhook, Internet Archive book
//! loading, book text cleanup and the JSON/REST stores behind the core's
//! `SettingsStore` and `HistoryStore` traits.

pub mod archive;
pub mod cleanup;
pub mod error;
pub mod local_history;
pub mod paths;
mod records;
pub mod remote_history;
pub mod settings_store;
pub mod webhook;

pub use archive::{ArchiveClient, ArchiveError, BookHit, BookText};
pub use error::StoreError;
pub use local_history::LocalHistoryStore;
pub use remote_history::RemoteHistoryStore;
pub use settings_store::JsonSettingsStore;
pub use webhook::{WebhookError, WebhookTransport};
