//! Shared text shaping and truncation policies for compact UI surfaces.

use core::fmt::Write;

use heapless::String;

use crate::render::WordCounter;

pub const COMPACT_MAX_WORDS: usize = 12;
pub const COMPACT_MAX_CHARS: usize = 60;

const ELLIPSIS: &str = "...";

/// First words of `source`, capped by word count, character count and the
/// buffer size `N`. Truncated output ends with `...`.
pub fn preview_limited<const N: usize>(
    source: &str,
    max_words: usize,
    max_chars: usize,
) -> String<N> {
    let mut out = String::new();
    let mut char_count = 0usize;
    let mut truncated = false;

    'words: for (word_count, word) in source.split_whitespace().enumerate() {
        if word_count >= max_words {
            truncated = true;
            break;
        }

        if word_count > 0 {
            if char_count >= max_chars || !fits(&out, ' ') {
                truncated = true;
                break;
            }
            let _ = out.push(' ');
            char_count += 1;
        }

        for ch in word.chars() {
            if char_count >= max_chars || !fits(&out, ch) {
                truncated = true;
                break 'words;
            }
            let _ = out.push(ch);
            char_count += 1;
        }
    }

    if truncated && !out.is_empty() {
        while out.len() + ELLIPSIS.len() > N && out.pop().is_some() {}
        let _ = out.push_str(ELLIPSIS);
    }

    out
}

pub fn preview_compact<const N: usize>(source: &str) -> String<N> {
    preview_limited(source, COMPACT_MAX_WORDS, COMPACT_MAX_CHARS)
}

/// `"Word 3 of 120"` in the given labels.
pub fn counter_label(counter: WordCounter, word_label: &str, of_label: &str) -> String<48> {
    let mut out = String::new();
    if write!(out, "{} {} {} {}", word_label, counter.current, of_label, counter.total).is_err() {
        out.clear();
        let _ = write!(out, "{}/{}", counter.current, counter.total);
    }
    out
}

/// Fixed-width text progress bar, `width` cells wide.
pub fn progress_bar<const N: usize>(progress_pct: u8, width: usize) -> String<N> {
    let pct = usize::from(progress_pct.min(100));
    let filled = (pct * width + 50) / 100;

    let mut out = String::new();
    for cell in 0..width {
        let ch = if cell < filled { '#' } else { '-' };
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

fn fits<const N: usize>(out: &String<N>, ch: char) -> bool {
    out.len() + ch.len_utf8() <= N
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_kept_whole() {
        let preview: String<64> = preview_compact("  hello   world ");
        assert_eq!(preview.as_str(), "hello world");
    }

    #[test]
    fn word_cap_adds_ellipsis() {
        let preview: String<64> = preview_limited("one two three four", 2, 100);
        assert_eq!(preview.as_str(), "one two...");
    }

    #[test]
    fn char_cap_respects_multibyte_boundaries() {
        let preview: String<64> = preview_limited("día señor", 10, 5);
        assert_eq!(preview.as_str(), "día s...");
    }

    #[test]
    fn small_buffers_still_end_with_ellipsis() {
        let preview: String<8> = preview_limited("abcdefghijkl", 10, 100);
        assert_eq!(preview.as_str(), "abcde...");
    }

    #[test]
    fn counter_uses_localized_labels() {
        let counter = WordCounter {
            current: 3,
            total: 120,
        };
        assert_eq!(counter_label(counter, "Palabra", "de").as_str(), "Palabra 3 de 120");
    }

    #[test]
    fn progress_bar_rounds_to_cells() {
        let bar: String<16> = progress_bar(50, 10);
        assert_eq!(bar.as_str(), "#####-----");
        let full: String<16> = progress_bar(250, 4);
        assert_eq!(full.as_str(), "####");
        let empty: String<16> = progress_bar(0, 4);
        assert_eq!(empty.as_str(), "----");
    }
}
