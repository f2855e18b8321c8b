impl<IN> ReaderApp<IN>
where
    IN: InputProvider,
{
    /// Replaces the session text. The app shows the ready prompt (or the
    /// enter-text prompt for blank text) until started.
    pub fn load_text(&mut self, text: &str) {
        if self.ui == UiState::Closed {
            self.ui = UiState::Reading;
        }
        self.engine.set_text(text);
        info!("reader: loaded words={}", self.engine.total());
    }

    /// Starts playback as the play button would.
    pub fn start(&mut self, now_ms: u64) {
        if self.ui == UiState::Reading {
            self.engine.toggle(now_ms);
        }
    }

    /// Applies pending input, fires a due tick and reports whether the
    /// screen changed.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.process_inputs(now_ms);
        self.engine.tick(now_ms);

        if self.engine.observer_mut().take_redraw() {
            TickResult::RenderRequested
        } else {
            TickResult::NoRender
        }
    }

    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.engine.next_deadline_ms()
    }

    pub fn is_finished(&self) -> bool {
        self.engine.status() == PlaybackStatus::Finished
    }

    pub fn is_closed(&self) -> bool {
        self.ui == UiState::Closed
    }

    /// Applies a persisted or externally chosen rate.
    pub fn set_wpm(&mut self, wpm: u16, now_ms: u64) {
        self.engine.set_rate(i32::from(wpm), now_ms);
        self.engine.observer_mut().pending_redraw = true;
    }

    pub fn close(&mut self) {
        info!("reader: closed");
        self.engine.close();
        self.ui = UiState::Closed;
    }
}
