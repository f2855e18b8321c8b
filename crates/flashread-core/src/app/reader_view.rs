/// What the reading surface currently shows in the word slot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum WordSlot {
    Word,
    Prompt(Key),
}

/// View model fed by the engine's observer callbacks.
struct ReaderView {
    word: WordBuffer<WORD_BUFFER_BYTES>,
    slot: WordSlot,
    displayed_index: usize,
    total: usize,
    progress_pct: u8,
    pending_redraw: bool,
    words_since_drain: u32,
}

impl ReaderView {
    const fn new() -> Self {
        Self {
            word: WordBuffer::new(),
            slot: WordSlot::Prompt(Key::EnterText),
            displayed_index: 0,
            total: 0,
            progress_pct: 0,
            pending_redraw: true,
            words_since_drain: 0,
        }
    }

    fn counter(&self) -> WordCounter {
        WordCounter {
            current: (self.displayed_index + 1).min(self.total),
            total: self.total,
        }
    }

    fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.pending_redraw)
    }
}

impl PlaybackObserver for ReaderView {
    fn on_word_changed(&mut self, word: &str, index: usize) {
        self.word.set(word);
        self.slot = WordSlot::Word;
        self.displayed_index = index;
        self.words_since_drain = self.words_since_drain.saturating_add(1);
        self.pending_redraw = true;
    }

    fn on_progress(&mut self, fraction: f32) {
        let pct = (fraction.clamp(0.0, 1.0) * 100.0 + 0.5) as u8;
        self.progress_pct = pct.min(100);
        self.pending_redraw = true;
    }

    fn on_paused(&mut self) {
        self.pending_redraw = true;
    }

    fn on_completed(&mut self) {
        self.slot = WordSlot::Prompt(Key::Finished);
        self.progress_pct = 100;
        self.pending_redraw = true;
    }

    fn on_session_reset(&mut self, _first_word: Option<&str>, total: usize) {
        self.word.clear();
        self.slot = WordSlot::Prompt(if total == 0 {
            Key::EnterText
        } else {
            Key::ReadyStart
        });
        self.displayed_index = 0;
        self.total = total;
        self.progress_pct = 0;
        self.pending_redraw = true;
    }
}
