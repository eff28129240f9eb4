//! The CHIP-8 virtual machine and the pieces it is built from.

use std::time::Duration;

pub mod display;
pub mod driver;
pub mod error;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod keypad;
pub mod memory;
pub mod opcode;
pub mod output;
pub mod timer;

pub use display::Framebuffer;
pub use driver::{Driver, DriverConfig, Flow};
pub use error::{ExecutionError, MemoryError};
pub use interpreter::Interpreter;

pub const MEM_SIZE: usize = 4096;
pub const NUM_REGISTERS: usize = 16;
pub const NUM_KEYS: usize = 16;
pub const STACK_SIZE: usize = 16;
pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

/// Programs are loaded here, everything below is reserved for the interpreter.
pub const PC_START: u16 = 0x200;
pub const MAX_ROM_SIZE: usize = MEM_SIZE - PC_START as usize;

/// The delay and sound timers tick at 60 Hz.
pub const TIMER_PERIOD: Duration = Duration::from_micros(16_667);
