use super::display::Framebuffer;

/// Represents a screen that finished frames can be shown on.
pub trait EmulatorOutput {
    fn present(&mut self, frame: &Framebuffer);
}

/// A simple output device that keeps the most recent frame.
#[derive(Default)]
pub struct DummyOutput {
    last_frame: Option<Framebuffer>,
    frames_presented: usize,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput::default()
    }

    pub fn last_frame(&self) -> Option<&Framebuffer> {
        self.last_frame.as_ref()
    }

    pub fn frames_presented(&self) -> usize {
        self.frames_presented
    }
}

impl EmulatorOutput for DummyOutput {
    fn present(&mut self, frame: &Framebuffer) {
        self.last_frame = Some(*frame);
        self.frames_presented += 1;
    }
}
