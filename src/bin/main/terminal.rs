use std::io::{self, Write};

use flashread_core::{
    render::Screen,
    text_policy::{counter_label, progress_bar},
};
use heapless::String as HeaplessString;

const BAR_BYTES: usize = 64;
const CLEAR_LINE: &str = "\r\x1b[2K";

/// Draws reader screens as a single rewritten terminal line.
pub(super) struct TerminalRenderer<W> {
    out: W,
    bar_cells: usize,
    line_open: bool,
}

impl<W: Write> TerminalRenderer<W> {
    pub(super) fn new(out: W, bar_cells: usize) -> Self {
        Self {
            out,
            bar_cells: bar_cells.min(BAR_BYTES),
            line_open: false,
        }
    }

    pub(super) fn render(&mut self, screen: Screen<'_>) -> io::Result<()> {
        match screen {
            Screen::Reading {
                word,
                prompt,
                action_label,
                reset_label,
                wpm,
                wpm_unit,
                word_label,
                of_label,
                counter,
                progress_pct,
                paused,
                ..
            } => {
                let bar: HeaplessString<BAR_BYTES> = progress_bar(progress_pct, self.bar_cells);
                let shown = if prompt {
                    format!("({word})")
                } else {
                    word.to_string()
                };
                write!(
                    self.out,
                    "{CLEAR_LINE}{shown:^24} {} | {wpm} {wpm_unit} [{bar}] {progress_pct:>3}% | p: {action_label}  r: {reset_label}",
                    counter_label(counter, word_label, of_label),
                )?;
                if paused {
                    write!(self.out, "  ||")?;
                }
                self.line_open = true;
            }
            Screen::Status {
                title,
                line1,
                line2,
            } => {
                self.end_line()?;
                writeln!(self.out, "{title}: {line1} / {line2}")?;
            }
        }
        self.out.flush()
    }

    /// Moves past the reader line so following output starts clean.
    pub(super) fn end_line(&mut self) -> io::Result<()> {
        if self.line_open {
            writeln!(self.out)?;
            self.line_open = false;
        }
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}
