/// Something that happened on the host side since the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(u8),
    KeyUp(u8),
    Quit,
}

/// Represents an input device that is capable of providing keys in the range 0..0xF.
pub trait EmulatorInput {
    /// Drain the events that arrived since the previous call. Must not block.
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        Vec::new()
    }
}
