//! App-level view models consumed by renderers.

/// One-based position of the displayed word.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WordCounter {
    pub current: usize,
    pub total: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Screen<'a> {
    Reading {
        title: &'a str,
        /// The paced word, or a localized prompt when `prompt` is set.
        word: &'a str,
        prompt: bool,
        action_label: &'a str,
        reset_label: &'a str,
        wpm: u16,
        wpm_unit: &'a str,
        word_label: &'a str,
        of_label: &'a str,
        counter: WordCounter,
        /// 0..=100
        progress_pct: u8,
        paused: bool,
    },
    Status {
        title: &'a str,
        line1: &'a str,
        line2: &'a str,
    },
}
