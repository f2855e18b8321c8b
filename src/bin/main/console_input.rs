use crossbeam_channel::{Receiver, Sender, TryRecvError};
use flashread_core::input::{InputEvent, InputProvider};

/// Reader input fed by typed line commands.
pub(super) struct ConsoleInput {
    events: Receiver<InputEvent>,
}

impl ConsoleInput {
    pub(super) fn new() -> (Self, Sender<InputEvent>) {
        let (sender, events) = crossbeam_channel::unbounded();
        (Self { events }, sender)
    }
}

impl InputProvider for ConsoleInput {
    type Error = TryRecvError;

    fn poll_event(&mut self) -> Result<Option<InputEvent>, Self::Error> {
        match self.events.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(error) => Err(error),
        }
    }
}
