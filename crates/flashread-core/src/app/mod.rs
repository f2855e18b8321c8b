//! Reader application: input-driven controller around one playback session.
//!
//! `ReaderApp` owns a [`PlaybackEngine`] whose observer is the app's own view
//! model. The host calls [`ReaderApp::tick`] whenever input may be pending or
//! [`ReaderApp::next_deadline_ms`] has passed, and renders when asked to.

use heapless::String;
use log::{debug, info, warn};

use crate::{
    i18n::{Key, Language, translate},
    input::{InputEvent, InputProvider},
    playback::{PlaybackEngine, PlaybackObserver, PlaybackSnapshot, PlaybackStatus},
    render::{Screen, WordCounter},
    settings::ReaderConfig,
};

/// Rate change per `Faster`/`Slower` event.
pub const WPM_STEP: u16 = 25;
/// Words jumped per skip event.
pub const SKIP_WORDS: isize = 10;

const WORD_BUFFER_BYTES: usize = 96;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum UiState {
    Reading,
    Status { line1: Key, line2: Key },
    Closed,
}

pub struct ReaderApp<IN>
where
    IN: InputProvider,
{
    engine: PlaybackEngine<ReaderView>,
    input: IN,
    language: Language,
    ui: UiState,
}

include!("reader_view.rs");
include!("view.rs");
include!("input.rs");
include!("runtime.rs");
include!("word_buffer.rs");

#[cfg(test)]
mod tests;
