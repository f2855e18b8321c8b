//! Heuristic cleanup of scanned and Project Gutenberg book text.
//!
//! Strips licence boilerplate, page markers and OCR debris so the text reads
//! well one word at a time. Best effort: nothing here is guaranteed to be
//! lossless.

use std::sync::LazyLock;

use regex::Regex;

fn pattern(source: &str) -> Regex {
    Regex::new(source).expect("cleanup patterns are valid")
}

static GUTENBERG_START: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)START OF TH[EI]S? PROJECT GUTENBERG[^\n]*\n"));
static GUTENBERG_END: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?is)(?:\*+[ \t]*)?END OF TH[EI]S? PROJECT GUTENBERG.*$"));
static TABLE_OF_CONTENTS: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?is)\n\s*CONTENTS\s*\n.*?\n\s*CHAPTER\s+1"));
static EXCESS_BREAKS: LazyLock<Regex> = LazyLock::new(|| pattern(r"\n\s*\n\s*\n+"));
static INDENTED_LINE: LazyLock<Regex> = LazyLock::new(|| pattern(r"\n\s+"));
static CONTROL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]"));

/// Ordered `(pattern, replacement)` passes applied after line endings are
/// normalized and the Gutenberg frame is cut away.
static PASSES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r" +", " "),
        (r"\n\s*\n\s*\n+", "\n\n"),
        // Isolated page numbers.
        (r"\n\s*\d+\s*\n", "\n"),
        (r"(?i)\n\s*Page \d+[^\n]*\n", "\n"),
        (r"(?i)\n\s*THE\s+PROJECT\s+GUTENBERG[^\n]*\n", "\n"),
        (r"(?i)\n\s*Project\s+Gutenberg[^\n]*\n", "\n"),
        (r"(?i)\n\s*End\s+of\s+Project\s+Gutenberg[^\n]*$", ""),
        (r"\n\s*\*\*\*[^\n]*?\*\*\*\s*\n", "\n"),
        (r"\n +", "\n"),
    ]
    .into_iter()
    .map(|(source, replacement)| (pattern(source), replacement))
    .collect()
});

static OCR_PASSES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        // Words hyphenated across a line break.
        (r"-\n([a-z])", "$1"),
        (r"\bn\b", "in"),
        (r"\brn\b", "in"),
        // Stray single letters on their own line.
        (r"\n\s*[a-zA-Z]\s*\n", "\n"),
        (
            r"\n\s*(?:CHAPTER|Chapter|chapter)\s+([IVXLCDM]+|\d+)\s*\n",
            "\n\nChapter $1\n\n",
        ),
    ]
    .into_iter()
    .map(|(source, replacement)| (pattern(source), replacement))
    .collect()
});

const TYPOGRAPHY: [(&str, &str); 7] = [
    ("\u{201c}", "\""),
    ("\u{201d}", "\""),
    ("\u{2018}", "'"),
    ("\u{2019}", "'"),
    ("\u{2026}", "..."),
    ("\u{2014}", "--"),
    ("\u{2013}", "-"),
];

pub fn clean_book_text(text: &str) -> String {
    let mut cleaned = text.replace("\r\n", "\n").replace('\r', "\n");
    cleaned = strip_gutenberg_frame(cleaned);

    for (regex, replacement) in PASSES.iter() {
        cleaned = regex.replace_all(&cleaned, *replacement).into_owned();
    }

    for (from, to) in TYPOGRAPHY {
        cleaned = cleaned.replace(from, to);
    }
    cleaned = cleaned.replace('\u{000c}', "\n");
    cleaned = CONTROL_CHARS.replace_all(&cleaned, "").into_owned();

    for (regex, replacement) in OCR_PASSES.iter() {
        cleaned = regex.replace_all(&cleaned, *replacement).into_owned();
    }

    cleaned = TABLE_OF_CONTENTS
        .replace(cleaned.trim(), "\n\nCHAPTER 1")
        .into_owned();
    cleaned = EXCESS_BREAKS.replace_all(&cleaned, "\n\n").into_owned();
    INDENTED_LINE.replace_all(cleaned.trim(), "\n").into_owned()
}

/// Keeps only the text between the Project Gutenberg start and end markers,
/// when the file has them.
fn strip_gutenberg_frame(mut text: String) -> String {
    if let Some(start) = GUTENBERG_START.find(&text) {
        text.drain(..start.end());
    }
    if let Some(end) = GUTENBERG_END.find(&text) {
        text.truncate(end.start());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_only_the_gutenberg_body() {
        let raw = "The Project Gutenberg eBook of Alice\r\n\
                   Release date: 2008\r\n\
                   *** START OF THE PROJECT GUTENBERG EBOOK ALICE ***\r\n\
                   CHAPTER I\r\n\
                   Alice   was beginning\r\n\r\n\r\n\r\n12\r\n\r\n\
                   to get very tired \u{201c}of sitting\u{201d} by her sister\u{2014}on the bank.\r\n\
                   *** END OF THE PROJECT GUTENBERG EBOOK ALICE ***\r\n\
                   License text here";

        assert_eq!(
            clean_book_text(raw),
            "CHAPTER I\nAlice was beginning\nto get very tired \"of sitting\" by her sister--on the bank."
        );
    }

    #[test]
    fn drops_page_markers_and_stray_letters() {
        let raw = "Intro line\n\nchapter 3\nBody text\nPage 4 of 10\nmore text\nx\nend";
        assert_eq!(
            clean_book_text(raw),
            "Intro line\nChapter 3\nBody text\nmore text\nend"
        );
    }

    #[test]
    fn removes_table_of_contents() {
        let raw = "Title\nCONTENTS\nCHAPTER I. Start\nCHAPTER II. More\n\nCHAPTER 1\nIt begins.";
        assert_eq!(clean_book_text(raw), "Title\nCHAPTER 1\nIt begins.");
    }

    #[test]
    fn joins_words_split_across_lines() {
        assert_eq!(clean_book_text("a long sen-\ntence here"), "a long sentence here");
    }
}
