use thiserror::Error;

/// Failure of a bounds-checked memory access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("access of {length} bytes at {offset:#06x} is out of bounds")]
    OutOfBounds { offset: usize, length: usize },
}

/// Everything that can go wrong while loading or running a program.
///
/// None of these are recovered from by the interpreter itself,
/// the caller decides whether to halt or keep stepping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionError {
    #[error(transparent)]
    OutOfBounds(#[from] MemoryError),

    #[error("call stack overflow")]
    StackOverflow,

    #[error("return with an empty call stack")]
    StackUnderflow,

    #[error("program counter {pc:#06x} is out of range")]
    ProgramCounterOutOfRange { pc: u16 },

    #[error("invalid instruction {opcode:#06x}")]
    InvalidInstruction { opcode: u16 },

    #[error("program is {size} bytes, at most {max} fit in memory")]
    RomTooLarge { size: usize, max: usize },
}
