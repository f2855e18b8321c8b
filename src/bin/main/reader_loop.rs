use std::io::{IsTerminal, Stdout};

use anyhow::Result;
use crossbeam_channel::Sender;
use flashread_core::{
    app::{ReaderApp, TickResult},
    input::InputEvent,
    settings::PersistedSettings,
    text::count_words,
};
use flashread_services::JsonSettingsStore;
use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::{
    Clock, IDLE_POLL_MS, PROGRESS_BAR_CELLS, RATE_LOG_INTERVAL_MS, ReadArgs,
    console_input::ConsoleInput,
    settings_sync::SettingsSyncState,
    sources::{self, Source},
    terminal::TerminalRenderer,
};

/// Which persisted rate the reader's speed controls write back to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum RateSetting {
    Reader,
    ChatReplies,
}

/// One reader app plus everything the host keeps around it.
pub(super) struct ReaderSession {
    app: ReaderApp<ConsoleInput>,
    events: Sender<InputEvent>,
    renderer: TerminalRenderer<Stdout>,
    persisted: PersistedSettings,
    rate_setting: RateSetting,
    sync: SettingsSyncState,
    /// Last rate seen from the app. Only a change from it is written back,
    /// so a command-line rate is never saved on its own.
    applied_wpm: u16,
    rate_window_start_ms: u64,
}

impl ReaderSession {
    pub(super) fn new(persisted: PersistedSettings, rate_setting: RateSetting, wpm: u16) -> Self {
        let (input, events) = ConsoleInput::new();
        let config = persisted.reader_config().with_wpm(wpm).normalized();
        let app = ReaderApp::new(input, config, persisted.language);

        Self {
            applied_wpm: app.wpm(),
            app,
            events,
            renderer: TerminalRenderer::new(std::io::stdout(), PROGRESS_BAR_CELLS),
            sync: SettingsSyncState::new(persisted.clone()),
            persisted,
            rate_setting,
            rate_window_start_ms: 0,
        }
    }

    pub(super) fn load(&mut self, text: &str) {
        self.app.load_text(text);
    }

    pub(super) fn start(&mut self, now_ms: u64) {
        self.app.start(now_ms);
        self.rate_window_start_ms = now_ms;
        self.app.drain_word_updates();
    }

    /// Queues a typed reader command. Returns `false` for unknown input.
    pub(super) fn command(&mut self, line: &str) -> bool {
        let Some(event) = InputEvent::from_command(line) else {
            return false;
        };
        if self.events.send(event).is_err() {
            warn!("reader: input channel closed");
        }
        true
    }

    /// Drives the app once, renders if asked and keeps settings in sync.
    pub(super) fn step(&mut self, now_ms: u64, store: Option<&mut JsonSettingsStore>) {
        if self.app.tick(now_ms) == TickResult::RenderRequested && !self.app.is_closed() {
            let renderer = &mut self.renderer;
            self.app.with_screen(|screen| {
                if let Err(error) = renderer.render(screen) {
                    warn!("terminal: render failed: {}", error);
                }
            });
        }

        let wpm = self.app.wpm();
        if wpm != self.applied_wpm {
            self.applied_wpm = wpm;
            match self.rate_setting {
                RateSetting::Reader => self.persisted.wpm = wpm,
                RateSetting::ChatReplies => self.persisted.chat.default_speed = wpm,
            }
        }
        self.sync.track_current(&self.persisted, now_ms);
        self.sync.flush_if_due(store, now_ms);

        self.log_effective_rate(now_ms);
    }

    fn log_effective_rate(&mut self, now_ms: u64) {
        let elapsed = now_ms.saturating_sub(self.rate_window_start_ms);
        if elapsed < RATE_LOG_INTERVAL_MS {
            return;
        }
        let words = u64::from(self.app.drain_word_updates());
        if words > 0 {
            info!(
                "reader: effective_wpm={} target_wpm={}",
                words * 60_000 / elapsed,
                self.app.wpm()
            );
        }
        self.rate_window_start_ms = now_ms;
    }

    /// When the loop should wake up next if no input arrives.
    pub(super) fn wake_at(&self, now_ms: u64) -> u64 {
        self.app
            .next_deadline_ms()
            .unwrap_or(now_ms + IDLE_POLL_MS)
            .min(now_ms + IDLE_POLL_MS)
    }

    pub(super) fn is_finished(&self) -> bool {
        self.app.is_finished()
    }

    pub(super) fn is_closed(&self) -> bool {
        self.app.is_closed()
    }

    pub(super) fn close(&mut self) {
        self.app.close();
        self.end_line();
    }

    pub(super) fn end_line(&mut self) {
        if let Err(error) = self.renderer.end_line() {
            debug!("terminal: {}", error);
        }
    }

    pub(super) fn settings(&self) -> &PersistedSettings {
        &self.persisted
    }

    pub(super) fn flush_settings(&mut self, store: Option<&mut JsonSettingsStore>, now_ms: u64) {
        self.sync.flush(store, now_ms);
    }
}

pub(super) async fn run(
    args: ReadArgs,
    persisted: PersistedSettings,
    mut store: Option<JsonSettingsStore>,
    clock: Clock,
) -> Result<()> {
    let source = Source::from_args(&args);
    let stdin_is_text = source == Source::Stdin;
    let interactive = !stdin_is_text && std::io::stdin().is_terminal();
    let loaded = sources::load(&source, persisted.language).await?;

    let wpm = args.wpm.unwrap_or(persisted.wpm);
    let mut session = ReaderSession::new(persisted, RateSetting::Reader, wpm);
    session.load(&loaded.text);
    info!(
        "reader: source={} words={} interactive={}",
        loaded.label,
        count_words(&loaded.text),
        interactive
    );

    if interactive {
        println!("p play/pause  r reset  + faster  - slower  > skip  < back  q quit");
    } else {
        session.start(clock.now_ms());
    }

    let mut lines = interactive.then(|| BufReader::new(tokio::io::stdin()).lines());

    loop {
        let now_ms = clock.now_ms();
        session.step(now_ms, store.as_mut());

        if session.is_closed() || (!interactive && session.is_finished()) {
            break;
        }

        let wake = clock.instant_at(session.wake_at(now_ms));
        match lines.as_mut() {
            Some(reader) => {
                tokio::select! {
                    line = reader.next_line() => match line? {
                        Some(line) => {
                            if !session.command(&line) && !line.trim().is_empty() {
                                debug!("reader: unknown command {:?}", line.trim());
                            }
                        }
                        None => break,
                    },
                    _ = tokio::time::sleep_until(wake) => {}
                }
            }
            None => tokio::time::sleep_until(wake).await,
        }
    }

    session.end_line();
    session.flush_settings(store.as_mut(), clock.now_ms());
    Ok(())
}
