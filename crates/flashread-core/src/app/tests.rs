use super::*;
use alloc::{collections::VecDeque, string::ToString};

use crate::{
    i18n::{Key, Language, translate},
    input::{InputEvent, InputProvider},
    render::Screen,
    settings::{MAX_WPM, MIN_WPM, ReaderConfig},
};

#[derive(Default)]
struct ScriptedInput {
    events: VecDeque<InputEvent>,
    fail_next: bool,
}

impl ScriptedInput {
    fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }
}

impl InputProvider for ScriptedInput {
    type Error = ();

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        if core::mem::take(&mut self.fail_next) {
            return Err(());
        }
        Ok(self.events.pop_front())
    }
}

#[derive(Debug, PartialEq)]
struct Reading {
    word: alloc::string::String,
    prompt: bool,
    action: &'static str,
    wpm: u16,
    current: usize,
    total: usize,
    progress_pct: u8,
    paused: bool,
}

fn app_at(wpm: u16) -> ReaderApp<ScriptedInput> {
    ReaderApp::new(
        ScriptedInput::default(),
        ReaderConfig::default().with_wpm(wpm),
        Language::En,
    )
}

fn reading(app: &ReaderApp<ScriptedInput>) -> Reading {
    let mut out = None;
    app.with_screen(|screen| {
        if let Screen::Reading {
            word,
            prompt,
            action_label,
            wpm,
            counter,
            progress_pct,
            paused,
            ..
        } = screen
        {
            let action = [Key::StartReading, Key::Pause, Key::Resume, Key::StartOver]
                .into_iter()
                .map(|key| translate(Language::En, key))
                .find(|label| *label == action_label)
                .unwrap_or("?");
            out = Some(Reading {
                word: word.to_string(),
                prompt,
                action,
                wpm,
                current: counter.current,
                total: counter.total,
                progress_pct,
                paused,
            });
        }
    });
    out.expect("reading screen")
}

#[test]
fn empty_app_asks_for_text() {
    let mut app = app_at(600);
    assert_eq!(app.tick(0), TickResult::RenderRequested);

    let view = reading(&app);
    assert_eq!(view.word, "Enter some text to begin");
    assert!(view.prompt);
    assert_eq!(view.total, 0);
    assert_eq!(view.current, 0);
    assert_eq!(app.tick(1), TickResult::NoRender);
}

#[test]
fn loaded_text_waits_at_ready_prompt() {
    let mut app = app_at(600);
    app.load_text("alpha beta gamma");
    let _ = app.tick(0);

    let view = reading(&app);
    assert_eq!(view.word, "Ready to start");
    assert_eq!(view.action, "Start Reading");
    assert_eq!((view.current, view.total), (1, 3));
    assert_eq!(view.progress_pct, 0);
    assert_eq!(app.next_deadline_ms(), None);
}

#[test]
fn toggle_plays_through_to_finished() {
    let mut app = app_at(600);
    app.load_text("alpha beta gamma");
    app.input_mut().push(InputEvent::Toggle);

    assert_eq!(app.tick(0), TickResult::RenderRequested);
    let view = reading(&app);
    assert_eq!(view.word, "alpha");
    assert_eq!(view.action, "Pause");
    assert_eq!((view.current, view.total), (1, 3));
    assert_eq!(view.progress_pct, 33);
    assert_eq!(app.next_deadline_ms(), Some(100));

    assert_eq!(app.tick(50), TickResult::NoRender);
    assert_eq!(app.tick(100), TickResult::RenderRequested);
    assert_eq!(reading(&app).word, "beta");
    assert_eq!(app.tick(200), TickResult::RenderRequested);
    assert_eq!(reading(&app).word, "gamma");
    assert_eq!(reading(&app).progress_pct, 100);

    assert_eq!(app.tick(300), TickResult::RenderRequested);
    assert!(app.is_finished());
    let view = reading(&app);
    assert_eq!(view.word, "✅ Finished!");
    assert_eq!(view.action, "Start Over");
    assert_eq!(app.next_deadline_ms(), None);
    assert_eq!(app.drain_word_updates(), 3);
    assert_eq!(app.drain_word_updates(), 0);
}

#[test]
fn pause_shows_resume_and_keeps_word() {
    let mut app = app_at(600);
    app.load_text("alpha beta gamma");
    app.start(0);
    let _ = app.tick(100);

    app.input_mut().push(InputEvent::Toggle);
    assert_eq!(app.tick(150), TickResult::RenderRequested);

    let view = reading(&app);
    assert!(view.paused);
    assert_eq!(view.word, "beta");
    assert_eq!(view.action, "Resume");
    assert_eq!(app.next_deadline_ms(), None);
    assert_eq!(app.tick(1_000), TickResult::NoRender);
}

#[test]
fn resume_keeps_word_and_waits_one_interval() {
    let mut app = app_at(600);
    app.load_text("alpha beta gamma");
    app.start(0);
    let _ = app.tick(100);
    app.input_mut().push(InputEvent::Toggle);
    let _ = app.tick(150);

    app.input_mut().push(InputEvent::Toggle);
    assert_eq!(app.tick(400), TickResult::RenderRequested);
    let view = reading(&app);
    assert!(!view.paused);
    assert_eq!(view.word, "beta");
    assert_eq!(view.action, "Pause");
    assert_eq!((view.current, view.total), (2, 3));
    assert_eq!(app.next_deadline_ms(), Some(500));

    assert_eq!(app.tick(500), TickResult::RenderRequested);
    assert_eq!(reading(&app).word, "gamma");
}

#[test]
fn speed_steps_stay_within_bounds_and_keep_word() {
    let mut app = app_at(MAX_WPM - 10);
    app.load_text("alpha beta gamma");
    app.start(0);

    app.input_mut().push(InputEvent::Faster);
    app.input_mut().push(InputEvent::Faster);
    let _ = app.tick(10);
    assert_eq!(app.wpm(), MAX_WPM);
    assert_eq!(reading(&app).word, "alpha");
    assert_eq!(app.next_deadline_ms(), Some(10 + 60));

    let mut slow = app_at(MIN_WPM + 10);
    slow.load_text("one two");
    slow.input_mut().push(InputEvent::Slower);
    let _ = slow.tick(0);
    assert_eq!(slow.wpm(), MIN_WPM);
    assert_eq!(reading(&slow).wpm, MIN_WPM);

    slow.input_mut().push(InputEvent::Slower);
    assert_eq!(slow.tick(1), TickResult::NoRender);
}

#[test]
fn skip_moves_ten_past_the_position_while_paused() {
    let text = "w0 w1 w2 w3 w4 w5 w6 w7 w8 w9 w10 w11 w12";
    let mut app = app_at(600);
    app.load_text(text);
    app.start(0);
    app.input_mut().push(InputEvent::Toggle);
    app.input_mut().push(InputEvent::SkipForward);
    let _ = app.tick(20);

    let view = reading(&app);
    assert_eq!(view.word, "w11");
    assert_eq!((view.current, view.total), (12, 13));
    assert!(view.paused);

    app.input_mut().push(InputEvent::SkipBack);
    let _ = app.tick(30);
    assert_eq!(reading(&app).word, "w1");
    assert_eq!(app.snapshot().position, 1);

    app.input_mut().push(InputEvent::SkipBack);
    let _ = app.tick(40);
    assert_eq!(reading(&app).word, "w0");
}

#[test]
fn reset_returns_to_ready_prompt() {
    let mut app = app_at(600);
    app.load_text("alpha beta gamma");
    app.start(0);
    app.input_mut().push(InputEvent::Reset);
    let _ = app.tick(10);

    let view = reading(&app);
    assert_eq!(view.word, "Ready to start");
    assert_eq!(view.action, "Start Reading");
    assert_eq!(app.next_deadline_ms(), None);
}

#[test]
fn close_tears_down_and_ignores_further_input() {
    let mut app = app_at(600);
    app.load_text("alpha beta gamma");
    app.start(0);
    app.input_mut().push(InputEvent::Close);
    app.input_mut().push(InputEvent::Toggle);
    let _ = app.tick(10);

    assert!(app.is_closed());
    assert_eq!(app.next_deadline_ms(), None);
    assert_eq!(app.snapshot().total, 0);

    app.load_text("again");
    assert!(!app.is_closed());
}

#[test]
fn input_error_shows_status_until_dismissed() {
    let mut app = app_at(600);
    app.load_text("alpha beta");
    app.start(0);
    app.input_mut().fail_next = true;
    assert_eq!(app.tick(10), TickResult::RenderRequested);

    let mut status = None;
    app.with_screen(|screen| {
        if let Screen::Status { line1, .. } = screen {
            status = Some(line1.to_string());
        }
    });
    assert_eq!(status.as_deref(), Some("INPUT ERROR"));
    assert_eq!(app.next_deadline_ms(), None);

    app.input_mut().push(InputEvent::Toggle);
    let _ = app.tick(20);
    assert_eq!(reading(&app).word, "alpha");
}

#[test]
fn input_error_status_is_localized() {
    let mut app = ReaderApp::new(
        ScriptedInput::default(),
        ReaderConfig::default(),
        Language::De,
    );
    app.load_text("hallo welt");
    app.input_mut().fail_next = true;
    let _ = app.tick(0);

    let mut lines = None;
    app.with_screen(|screen| {
        if let Screen::Status { line1, line2, .. } = screen {
            lines = Some((line1.to_string(), line2.to_string()));
        }
    });
    assert_eq!(
        lines,
        Some((
            translate(Language::De, Key::InputError).to_string(),
            translate(Language::De, Key::CheckInput).to_string()
        ))
    );
    assert_eq!(lines.map(|(line1, _)| line1).as_deref(), Some("EINGABEFEHLER"));
}

#[test]
fn localized_labels_follow_language() {
    let mut app = ReaderApp::new(
        ScriptedInput::default(),
        ReaderConfig::default(),
        Language::Es,
    );
    app.load_text("hola mundo");

    let mut labels = None;
    app.with_screen(|screen| {
        if let Screen::Reading {
            word,
            wpm_unit,
            of_label,
            ..
        } = screen
        {
            labels = Some((word.to_string(), wpm_unit.to_string(), of_label.to_string()));
        }
    });
    let (word, unit, of) = labels.expect("reading screen");
    assert_eq!(word, "Listo para comenzar");
    assert_eq!(unit, "PPM");
    assert_eq!(of, "de");

    app.set_language(Language::Fr);
    assert_eq!(app.tick(0), TickResult::RenderRequested);
    assert_eq!(app.language(), Language::Fr);
}
