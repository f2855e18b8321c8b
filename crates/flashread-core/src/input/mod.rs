//! Input abstraction layer.

/// Logical actions consumed by the reader app.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputEvent {
    /// Play button: start, pause, resume or start over.
    Toggle,
    Reset,
    Faster,
    Slower,
    SkipForward,
    SkipBack,
    Close,
}

impl InputEvent {
    /// Maps a typed line command to an event. Blank input is not a command.
    pub fn from_command(command: &str) -> Option<Self> {
        match command.trim() {
            "p" | "play" | "pause" | "space" => Some(Self::Toggle),
            "r" | "reset" | "esc" => Some(Self::Reset),
            "+" | "faster" => Some(Self::Faster),
            "-" | "slower" => Some(Self::Slower),
            ">" | "next" => Some(Self::SkipForward),
            "<" | "back" => Some(Self::SkipBack),
            "q" | "quit" | "close" => Some(Self::Close),
            _ => None,
        }
    }
}

/// Polled input provider.
pub trait InputProvider {
    type Error;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error>;
}
