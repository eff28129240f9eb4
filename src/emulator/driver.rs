//! A host loop that feeds key events to an interpreter and
//! presents its screen whenever it changes.

use super::error::ExecutionError;
use super::input::{EmulatorInput, InputEvent};
use super::interpreter::Interpreter;
use super::output::EmulatorOutput;
use super::timer::{Clock, SystemClock};

use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;

pub struct DriverConfig {
    /// Time between two instructions.
    pub cycle_interval: Duration,
}

impl DriverConfig {
    /// Run at the given number of instructions per second.
    pub fn with_rate(instructions_per_second: u32) -> DriverConfig {
        DriverConfig {
            cycle_interval: Duration::from_secs(1) / instructions_per_second.max(1),
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig::with_rate(1_000)
    }
}

/// Whether the driver should keep going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Driver<I: EmulatorInput, O: EmulatorOutput, R: Rng = StdRng, C: Clock = SystemClock> {
    interpreter: Interpreter<R, C>,
    input: I,
    output: O,
    config: DriverConfig,
}

impl<I: EmulatorInput, O: EmulatorOutput, R: Rng, C: Clock> Driver<I, O, R, C> {
    pub fn new(interpreter: Interpreter<R, C>, input: I, output: O, config: DriverConfig) -> Self {
        Driver {
            interpreter,
            input,
            output,
            config,
        }
    }

    /// Apply pending input, execute one instruction, and present the
    /// screen if it changed.
    pub fn tick(&mut self) -> Result<Flow, ExecutionError> {
        for event in self.input.poll() {
            match event {
                InputEvent::KeyDown(key) => self.interpreter.set_key(key),
                InputEvent::KeyUp(key) => self.interpreter.clear_key(key),
                InputEvent::Quit => {
                    log::info!("Quit requested");
                    return Ok(Flow::Quit);
                }
            }
        }

        self.interpreter.step()?;

        if self.interpreter.is_draw_pending() {
            let frame = self.interpreter.consume_framebuffer();
            log::debug!("Presenting frame");
            self.output.present(&frame);
        }

        Ok(Flow::Continue)
    }

    /// Tick until the input asks to quit or the program fails.
    pub fn run(&mut self) -> Result<(), ExecutionError> {
        while self.tick()? == Flow::Continue {
            std::thread::sleep(self.config.cycle_interval);
        }
        Ok(())
    }

    pub fn interpreter(&self) -> &Interpreter<R, C> {
        &self.interpreter
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Give back the parts the driver was built from.
    pub fn into_parts(self) -> (Interpreter<R, C>, I, O) {
        (self.interpreter, self.input, self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::output::DummyOutput;
    use crate::emulator::timer::ManualClock;
    use crate::emulator::SCREEN_WIDTH;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    /// Hands out one batch of events per poll.
    struct ScriptedInput(VecDeque<Vec<InputEvent>>);

    impl EmulatorInput for ScriptedInput {
        fn poll(&mut self) -> Vec<InputEvent> {
            self.0.pop_front().unwrap_or_default()
        }
    }

    fn driver(
        program: &[u8],
        script: Vec<Vec<InputEvent>>,
    ) -> Driver<ScriptedInput, DummyOutput, StdRng, ManualClock> {
        let mut interpreter = Interpreter::with_parts(StdRng::seed_from_u64(1), ManualClock::new());
        interpreter.load(program).unwrap();
        Driver::new(
            interpreter,
            ScriptedInput(script.into_iter().collect()),
            DummyOutput::new(),
            DriverConfig {
                cycle_interval: Duration::from_millis(0),
            },
        )
    }

    #[test]
    fn presents_only_when_the_screen_changed() {
        let mut driver = driver(
            &[
                0x60, 0x00, // V0 = 0
                0xF0, 0x29, // I = glyph 0
                0xD0, 0x05, // draw
                0x12, 0x06, // loop
            ],
            vec![],
        );
        for _ in 0..3 {
            assert_eq!(driver.tick(), Ok(Flow::Continue));
        }
        assert_eq!(driver.output().frames_presented(), 1);
        for _ in 0..5 {
            driver.tick().unwrap();
        }
        assert_eq!(driver.output().frames_presented(), 1);

        let frame = driver.output().last_frame().unwrap();
        assert_eq!(&frame[..4], &[1, 1, 1, 1]);
        assert_eq!(&frame[SCREEN_WIDTH..SCREEN_WIDTH + 4], &[1, 0, 0, 1]);
    }

    #[test]
    fn key_events_reach_the_interpreter() {
        let mut driver = driver(
            &[0xF5, 0x0A, 0x12, 0x02],
            vec![vec![], vec![InputEvent::KeyDown(0xE)], vec![InputEvent::KeyUp(0xE)]],
        );
        driver.tick().unwrap();
        assert!(driver.interpreter().is_waiting_for_key());
        driver.tick().unwrap();
        assert_eq!(driver.interpreter().registers()[5], 0xE);
        driver.tick().unwrap();
        assert!(!driver.interpreter().is_waiting_for_key());
    }

    #[test]
    fn run_stops_on_quit() {
        let mut driver = driver(&[0x12, 0x00], vec![vec![], vec![], vec![InputEvent::Quit]]);
        assert_eq!(driver.run(), Ok(()));
        assert_eq!(driver.interpreter().program_counter(), 0x200);
    }

    #[test]
    fn run_stops_on_error() {
        let mut driver = driver(&[0x60, 0x01, 0x00, 0x00], vec![]);
        assert_eq!(
            driver.run(),
            Err(ExecutionError::InvalidInstruction { opcode: 0x0000 })
        );
        let (interpreter, _, _) = driver.into_parts();
        assert_eq!(interpreter.registers()[0], 1);
    }

    #[test]
    fn rate_sets_cycle_interval() {
        assert_eq!(DriverConfig::with_rate(500).cycle_interval, Duration::from_millis(2));
        assert_eq!(DriverConfig::default().cycle_interval, Duration::from_millis(1));
    }
}
