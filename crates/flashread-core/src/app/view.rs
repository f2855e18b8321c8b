impl<IN> ReaderApp<IN>
where
    IN: InputProvider,
{
    pub fn new(input: IN, config: ReaderConfig, language: Language) -> Self {
        Self {
            engine: PlaybackEngine::new(config, ReaderView::new()),
            input,
            language,
            ui: UiState::Reading,
        }
    }

    pub fn with_screen<F>(&self, f: F)
    where
        F: FnOnce(Screen<'_>),
    {
        let title = translate(self.language, Key::Title);

        match self.ui {
            UiState::Status { line1, line2 } => f(Screen::Status {
                title,
                line1: translate(self.language, line1),
                line2: translate(self.language, line2),
            }),
            UiState::Reading | UiState::Closed => {
                let view = self.engine.observer();
                let (word, prompt) = match view.slot {
                    WordSlot::Word => (view.word.as_str(), false),
                    WordSlot::Prompt(key) => (translate(self.language, key), true),
                };

                f(Screen::Reading {
                    title,
                    word,
                    prompt,
                    action_label: translate(self.language, self.action_key()),
                    reset_label: translate(self.language, Key::Reset),
                    wpm: self.engine.rate(),
                    wpm_unit: translate(self.language, Key::Wpm),
                    word_label: translate(self.language, Key::Word),
                    of_label: translate(self.language, Key::Of),
                    counter: view.counter(),
                    progress_pct: view.progress_pct,
                    paused: self.engine.status() == PlaybackStatus::Paused,
                })
            }
        }
    }

    /// Label of the play button for the current session state.
    fn action_key(&self) -> Key {
        match self.engine.status() {
            PlaybackStatus::Playing => Key::Pause,
            PlaybackStatus::Finished => Key::StartOver,
            PlaybackStatus::Paused if self.engine.position() > 0 => Key::Resume,
            PlaybackStatus::Idle | PlaybackStatus::Ready | PlaybackStatus::Paused => {
                Key::StartReading
            }
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        if self.language != language {
            self.language = language;
            self.engine.observer_mut().pending_redraw = true;
        }
    }

    pub fn wpm(&self) -> u16 {
        self.engine.rate()
    }

    pub fn config(&self) -> ReaderConfig {
        self.engine.config()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.engine.state()
    }

    pub fn input_mut(&mut self) -> &mut IN {
        &mut self.input
    }

    pub fn drain_word_updates(&mut self) -> u32 {
        core::mem::take(&mut self.engine.observer_mut().words_since_drain)
    }
}
