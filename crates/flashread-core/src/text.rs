//! Whitespace tokenization for playback sessions.

use alloc::vec::Vec;
use core::ops::Range;

/// Byte spans of every word in `text`.
///
/// Runs of whitespace collapse into a single separator and empty tokens are
/// never produced, so `"  a \n\n b "` yields two spans.
pub fn tokenize(text: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut cursor = 0usize;

    while let Some((span, next_cursor)) = next_word_at(text, cursor) {
        spans.push(span);
        cursor = next_cursor;
    }

    spans
}

pub fn count_words(text: &str) -> usize {
    let mut count = 0usize;
    let mut cursor = 0usize;

    while let Some((_, next_cursor)) = next_word_at(text, cursor) {
        count += 1;
        cursor = next_cursor;
    }

    count
}

/// Next word starting at or after byte offset `cursor`, plus the offset to
/// resume scanning from.
pub fn next_word_at(text: &str, cursor: usize) -> Option<(Range<usize>, usize)> {
    let rest = text.get(cursor..)?;
    let start = cursor + rest.find(|ch: char| !is_separator(ch))?;
    let end = text[start..]
        .find(is_separator)
        .map_or(text.len(), |offset| start + offset);

    Some((start..end, end))
}

fn is_separator(ch: char) -> bool {
    // U+FEFF shows up as a stray BOM in pasted text and is not `White_Space`.
    ch.is_whitespace() || ch == '\u{feff}'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(text: &str) -> Vec<&str> {
        tokenize(text).into_iter().map(|span| &text[span]).collect()
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(
            words("  uno\tdos\n\n tres\u{00a0}cuatro "),
            ["uno", "dos", "tres", "cuatro"]
        );
    }

    #[test]
    fn whitespace_only_yields_nothing() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t ").is_empty());
        assert_eq!(count_words("\u{feff} \u{2003}"), 0);
    }

    #[test]
    fn keeps_multibyte_words_intact() {
        assert_eq!(words("señor   ¿qué?  día"), ["señor", "¿qué?", "día"]);
        assert_eq!(count_words("señor   ¿qué?  día"), 3);
    }

    #[test]
    fn resumes_from_returned_cursor() {
        let text = "alpha beta";
        let (first, cursor) = next_word_at(text, 0).unwrap();
        assert_eq!(&text[first], "alpha");
        let (second, cursor) = next_word_at(text, cursor).unwrap();
        assert_eq!(&text[second], "beta");
        assert!(next_word_at(text, cursor).is_none());
    }
}
