use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use flashread_core::{
    i18n::Language,
    settings::{PersistedSettings, SettingsStore},
};
use flashread_services::{JsonSettingsStore, paths};
use log::{info, warn};
use tracing_subscriber::EnvFilter;

#[path = "main/chat_loop.rs"]
mod chat_loop;
#[path = "main/console_input.rs"]
mod console_input;
#[path = "main/history_worker.rs"]
mod history_worker;
#[path = "main/reader_loop.rs"]
mod reader_loop;
#[path = "main/settings_sync.rs"]
mod settings_sync;
#[path = "main/sources.rs"]
mod sources;
#[path = "main/terminal.rs"]
mod terminal;

const SETTINGS_SAVE_DEBOUNCE_MS: u64 = 1_500;
const RATE_LOG_INTERVAL_MS: u64 = 5_000;
/// Wake-up period while nothing is scheduled, so debounced saves still land.
const IDLE_POLL_MS: u64 = 250;
const PROGRESS_BAR_CELLS: usize = 30;
const SIMULATED_REPLY_MIN_DELAY_MS: u64 = 1_000;
const SIMULATED_REPLY_JITTER_MS: u64 = 2_000;
/// How long a finished fast read stays up before chat takes the input back.
const READER_CLOSE_DELAY_MS: u64 = 2_000;

/// Flash text one word at a time, or chat and speed-read the replies.
#[derive(Parser, Debug)]
#[command(name = "flashread", version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    /// Neither read nor write the settings file
    #[arg(long, global = true)]
    no_save: bool,

    /// Interface language (en, es, fr, de, sv)
    #[arg(long, global = true, env = "FLASHREAD_LANG", value_parser = parse_language)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flash a text file, stdin, the sample text or an Internet Archive book
    Read(ReadArgs),
    /// Chat through a webhook and fast read the replies
    Chat(ChatArgs),
}

#[derive(Args, Debug)]
struct ReadArgs {
    /// Text file to read; `-` or nothing reads stdin
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Read the built-in sample text
    #[arg(long, conflicts_with_all = ["file", "search"])]
    sample: bool,

    /// Search the Internet Archive and read a matching book
    #[arg(long, value_name = "QUERY", conflicts_with = "file")]
    search: Option<String>,

    /// Which search result to read, starting at 1
    #[arg(long, value_name = "N")]
    pick: Option<usize>,

    /// Reading speed in words per minute
    #[arg(long)]
    wpm: Option<u16>,
}

#[derive(Args, Debug)]
struct ChatArgs {
    /// Webhook that answers chat messages; replies are simulated without one
    #[arg(long, value_name = "URL", env = "FLASHREAD_WEBHOOK_URL")]
    webhook: Option<String>,

    /// Model name sent with every message
    #[arg(long)]
    model: Option<String>,

    /// Fast read every reply as it arrives
    #[arg(long)]
    auto_fast_read: bool,

    /// Don't save chat history
    #[arg(long)]
    no_history: bool,

    /// Local history file (defaults to the platform data directory)
    #[arg(long, value_name = "PATH")]
    history_file: Option<PathBuf>,

    /// Remote history store base URL, tried before the local file
    #[arg(long, value_name = "URL", env = "FLASHREAD_REMOTE_HISTORY_URL")]
    remote_history: Option<String>,

    /// Bearer token for the remote history store
    #[arg(long, env = "FLASHREAD_REMOTE_HISTORY_TOKEN", hide_env_values = true)]
    remote_history_token: Option<String>,

    /// Fast reading speed for replies, in words per minute
    #[arg(long)]
    wpm: Option<u16>,
}

fn parse_language(code: &str) -> Result<Language, String> {
    Language::from_code(code).ok_or_else(|| {
        let known: Vec<&str> = Language::ALL.iter().map(|language| language.code()).collect();
        format!("unknown language {code:?}, expected one of {}", known.join(", "))
    })
}

/// Milliseconds since startup, the time base every core call receives.
#[derive(Clone, Copy, Debug)]
struct Clock {
    start: Instant,
}

impl Clock {
    fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn instant_at(&self, ms: u64) -> tokio::time::Instant {
        tokio::time::Instant::from_std(self.start + Duration::from_millis(ms))
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();
}

fn open_settings_store(cli: &Cli) -> Option<JsonSettingsStore> {
    if cli.no_save {
        return None;
    }
    let path = cli.settings.clone().or_else(paths::default_settings_path);
    if path.is_none() {
        warn!("settings: no config directory, settings will not be saved");
    }
    path.map(JsonSettingsStore::new)
}

fn load_settings(store: Option<&mut JsonSettingsStore>) -> PersistedSettings {
    let Some(store) = store else {
        return PersistedSettings::default();
    };

    match store.load() {
        Ok(Some(settings)) => {
            info!("settings: loaded from {}", store.path().display());
            settings
        }
        Ok(None) => PersistedSettings::default(),
        Err(error) => {
            warn!("settings: unreadable, using defaults: {}", error);
            PersistedSettings::default()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    let clock = Clock::start();
    let mut store = open_settings_store(&cli);
    let mut persisted = load_settings(store.as_mut());
    if let Some(language) = cli.lang {
        persisted.language = language;
    }

    match cli.command {
        Command::Read(args) => reader_loop::run(args, persisted, store, clock)
            .await
            .context("reader failed"),
        Command::Chat(args) => chat_loop::run(args, persisted, store, clock)
            .await
            .context("chat failed"),
    }
}
