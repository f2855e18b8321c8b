impl<IN> ReaderApp<IN>
where
    IN: InputProvider,
{
    fn process_inputs(&mut self, now_ms: u64) {
        loop {
            match self.input.poll_event() {
                Ok(Some(event)) => self.apply_input_event(event, now_ms),
                Ok(None) => break,
                Err(_) => {
                    warn!("reader: input provider failed");
                    self.set_status(Key::InputError, Key::CheckInput);
                    break;
                }
            }
        }
    }

    fn apply_input_event(&mut self, event: InputEvent, now_ms: u64) {
        match self.ui {
            UiState::Closed => return,
            UiState::Status { .. } => {
                // Any input dismisses the status screen.
                self.ui = UiState::Reading;
                self.engine.observer_mut().pending_redraw = true;
                return;
            }
            UiState::Reading => {}
        }

        debug!("reader: input {:?}", event);
        match event {
            InputEvent::Toggle => {
                self.engine.toggle(now_ms);
                // Resuming emits nothing, but the action label changed.
                self.engine.observer_mut().pending_redraw = true;
            }
            InputEvent::Reset => self.engine.reset(),
            InputEvent::Faster => self.adjust_wpm(true, now_ms),
            InputEvent::Slower => self.adjust_wpm(false, now_ms),
            InputEvent::SkipForward => self.engine.skip(SKIP_WORDS, now_ms),
            InputEvent::SkipBack => self.engine.skip(-SKIP_WORDS, now_ms),
            InputEvent::Close => self.close(),
        }
    }

    fn adjust_wpm(&mut self, increase: bool, now_ms: u64) {
        let current = i32::from(self.engine.rate());
        let step = i32::from(WPM_STEP);
        let requested = if increase {
            current + step
        } else {
            current - step
        };

        self.engine.set_rate(requested, now_ms);
        if i32::from(self.engine.rate()) != current {
            self.engine.observer_mut().pending_redraw = true;
        }
    }

    fn set_status(&mut self, line1: Key, line2: Key) {
        self.engine.pause();
        self.ui = UiState::Status { line1, line2 };
        self.engine.observer_mut().pending_redraw = true;
    }
}
