//! Word-pacing playback engine.
//!
//! A [`PlaybackEngine`] owns one session: the tokenized text, a position, a
//! rate and an explicit [`PlaybackStatus`]. While playing it advances one word
//! per tick, where a tick is due every `60000 / wpm` milliseconds of the host
//! clock. The host passes `now_ms` into every call that may schedule a tick and
//! calls [`PlaybackEngine::tick`] whenever [`PlaybackEngine::next_deadline_ms`]
//! has passed.
//!
//! `play` fires its first tick synchronously, so the word at the current
//! position is on display when the call returns. `resume`, `set_rate` and
//! `seek` on a playing session only reschedule: the next word appears one full
//! interval later and the position does not move.

mod schedule;

use alloc::{string::String, vec::Vec};
use core::ops::Range;

use log::{debug, info};

use crate::{settings::ReaderConfig, text::tokenize};

pub use schedule::{MS_PER_MINUTE, interval_for_wpm};
use schedule::TickSchedule;

/// Receives every visible change of a session, in the order it happens.
///
/// Observers only get `&mut self`, never the engine, so they cannot re-enter
/// it from inside a tick.
pub trait PlaybackObserver {
    /// A word is now on display.
    fn on_word_changed(&mut self, word: &str, index: usize);

    /// Fraction of the session consumed, `0.0..=1.0`.
    fn on_progress(&mut self, fraction: f32);

    /// Playback stopped at the user's request.
    fn on_paused(&mut self) {}

    /// The tick after the last word fired.
    fn on_completed(&mut self) {}

    /// The session was (re)loaded or rewound. `first_word` is `None` when
    /// there is nothing to read.
    fn on_session_reset(&mut self, _first_word: Option<&str>, _total: usize) {}
}

impl PlaybackObserver for () {
    fn on_word_changed(&mut self, _word: &str, _index: usize) {}

    fn on_progress(&mut self, _fraction: f32) {}
}

/// Externally visible session state.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlaybackStatus {
    /// No words loaded.
    Idle,
    /// Words loaded, position 0, not started.
    Ready,
    Playing,
    Paused,
    /// The last word was shown and the following tick fired.
    Finished,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum PlaybackState {
    Idle,
    Ready,
    Playing(TickSchedule),
    Paused,
    Finished,
}

impl PlaybackState {
    const fn status(&self) -> PlaybackStatus {
        match self {
            Self::Idle => PlaybackStatus::Idle,
            Self::Ready => PlaybackStatus::Ready,
            Self::Playing(_) => PlaybackStatus::Playing,
            Self::Paused => PlaybackStatus::Paused,
            Self::Finished => PlaybackStatus::Finished,
        }
    }
}

/// Point-in-time copy of a session, as returned by [`PlaybackEngine::state`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackSnapshot {
    pub status: PlaybackStatus,
    pub position: usize,
    pub total: usize,
    pub progress: f32,
    pub rate: u16,
}

pub struct PlaybackEngine<O> {
    text: String,
    words: Vec<Range<usize>>,
    position: usize,
    config: ReaderConfig,
    state: PlaybackState,
    observer: O,
}

impl<O> PlaybackEngine<O>
where
    O: PlaybackObserver,
{
    pub fn new(config: ReaderConfig, observer: O) -> Self {
        Self {
            text: String::new(),
            words: Vec::new(),
            position: 0,
            config: config.normalized(),
            state: PlaybackState::Idle,
            observer,
        }
    }

    /// Replaces the session text and rewinds to the first word.
    ///
    /// Any pending tick is dropped. Text without words leaves the engine
    /// `Idle`.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let words = tokenize(&text);

        self.transition(if words.is_empty() {
            PlaybackState::Idle
        } else {
            PlaybackState::Ready
        });
        self.text = text;
        self.words = words;
        self.position = 0;
        debug!("playback: text loaded words={}", self.words.len());

        self.emit_session_reset();
        self.observer.on_progress(0.0);
    }

    /// Clamps and stores a new rate. A playing session keeps its position and
    /// waits one interval at the new rate before the next word.
    pub fn set_rate(&mut self, wpm: i32, now_ms: u64) {
        let rate = self.config.clamp_wpm(wpm);
        if rate != self.config.wpm {
            debug!("playback: rate {} -> {} wpm", self.config.wpm, rate);
        }
        self.config.wpm = rate;

        if matches!(self.state, PlaybackState::Playing(_)) {
            self.transition(PlaybackState::Playing(TickSchedule::start(
                now_ms,
                self.interval_ms(),
            )));
        }
    }

    /// Starts playback, from the top when the session already finished.
    pub fn play(&mut self, now_ms: u64) {
        if self.words.is_empty() {
            return;
        }

        match self.state {
            PlaybackState::Playing(_) => return,
            PlaybackState::Finished => self.position = 0,
            _ => {}
        }
        if self.position >= self.words.len() {
            self.position = 0;
        }

        info!(
            "playback: play position={} total={} rate={}",
            self.position,
            self.words.len(),
            self.config.wpm
        );
        self.start_ticking(now_ms);
    }

    pub fn pause(&mut self) {
        if !matches!(self.state, PlaybackState::Playing(_)) {
            return;
        }

        self.transition(PlaybackState::Paused);
        self.observer.on_paused();
    }

    /// Continues a paused session. The word on display stays put and the
    /// next one follows one interval after `now_ms`.
    pub fn resume(&mut self, now_ms: u64) {
        if self.state != PlaybackState::Paused || self.position >= self.words.len() {
            return;
        }

        debug!("playback: resume position={}", self.position);
        self.transition(PlaybackState::Playing(TickSchedule::start(
            now_ms,
            self.interval_ms(),
        )));
    }

    /// Play-button semantics: pause when playing, resume when paused mid-way,
    /// otherwise start (over).
    pub fn toggle(&mut self, now_ms: u64) {
        match self.state {
            PlaybackState::Playing(_) => self.pause(),
            PlaybackState::Paused if self.position < self.words.len() => self.resume(now_ms),
            _ => self.play(now_ms),
        }
    }

    pub fn reset(&mut self) {
        self.transition(if self.words.is_empty() {
            PlaybackState::Idle
        } else {
            PlaybackState::Ready
        });
        self.position = 0;

        self.emit_session_reset();
        self.observer.on_progress(0.0);
    }

    /// Moves to `index`, clamped to the last word, keeping play/pause state.
    pub fn seek(&mut self, index: usize, now_ms: u64) {
        let Some(last) = self.words.len().checked_sub(1) else {
            return;
        };
        let index = index.min(last);

        let next = match self.state {
            PlaybackState::Idle => return,
            PlaybackState::Playing(_) => {
                PlaybackState::Playing(TickSchedule::start(now_ms, self.interval_ms()))
            }
            PlaybackState::Ready if index == 0 => PlaybackState::Ready,
            PlaybackState::Ready | PlaybackState::Paused | PlaybackState::Finished => {
                PlaybackState::Paused
            }
        };
        self.transition(next);
        self.position = index;

        let word = &self.text[self.words[index].clone()];
        self.observer.on_word_changed(word, index);
        let progress = self.progress();
        self.observer.on_progress(progress);
    }

    /// Relative [`seek`](Self::seek); saturates at the first word.
    pub fn skip(&mut self, delta: isize, now_ms: u64) {
        let target = self.position.saturating_add_signed(delta);
        self.seek(target, now_ms);
    }

    /// Tears the session down: no words, no pending tick.
    pub fn close(&mut self) {
        self.transition(PlaybackState::Idle);
        self.text.clear();
        self.words.clear();
        self.position = 0;

        self.emit_session_reset();
    }

    /// Fires the pending tick if it is due. Returns whether a tick fired.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let PlaybackState::Playing(schedule) = self.state else {
            return false;
        };
        if !schedule.is_due(now_ms) {
            return false;
        }

        self.state = PlaybackState::Playing(schedule.rearm(now_ms));
        self.advance();
        true
    }

    /// When the pending tick is due, if one is scheduled.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        match self.state {
            PlaybackState::Playing(schedule) => Some(schedule.next_due_ms()),
            _ => None,
        }
    }

    pub fn state(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            status: self.state.status(),
            position: self.position,
            total: self.words.len(),
            progress: self.progress(),
            rate: self.config.wpm,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        self.state.status()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn total(&self) -> usize {
        self.words.len()
    }

    pub fn rate(&self) -> u16 {
        self.config.wpm
    }

    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    pub fn interval_ms(&self) -> u64 {
        interval_for_wpm(self.config.wpm)
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn start_ticking(&mut self, now_ms: u64) {
        self.transition(PlaybackState::Playing(TickSchedule::start(
            now_ms,
            self.interval_ms(),
        )));
        self.advance();
    }

    fn advance(&mut self) {
        if self.position >= self.words.len() {
            self.transition(PlaybackState::Finished);
            info!("playback: finished words={}", self.words.len());
            self.observer.on_completed();
            return;
        }

        let index = self.position;
        let word = &self.text[self.words[index].clone()];
        self.observer.on_word_changed(word, index);

        self.position += 1;
        let progress = self.progress();
        self.observer.on_progress(progress);
    }

    fn progress(&self) -> f32 {
        if self.words.is_empty() {
            0.0
        } else {
            self.position as f32 / self.words.len() as f32
        }
    }

    fn emit_session_reset(&mut self) {
        let first = self.words.first().map(|span| &self.text[span.clone()]);
        self.observer.on_session_reset(first, self.words.len());
    }

    /// The only place the state is replaced. Dropping the previous value
    /// drops its tick schedule.
    fn transition(&mut self, next: PlaybackState) {
        let previous = core::mem::replace(&mut self.state, next);
        if previous.status() != next.status() {
            debug!(
                "playback: {:?} -> {:?} position={}",
                previous.status(),
                next.status(),
                self.position
            );
        }
    }
}
