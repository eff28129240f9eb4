//! The CHIP-8 interpreter as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use super::display::{Display, Framebuffer};
use super::error::ExecutionError;
use super::instruction::*;
use super::keypad::Keypad;
use super::memory::{Memory, GLYPH_SIZE};
use super::opcode::Opcode;
use super::timer::{Clock, SystemClock, Timers};
use super::{MAX_ROM_SIZE, MEM_SIZE, NUM_REGISTERS, PC_START, STACK_SIZE};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

pub struct Interpreter<R: Rng = StdRng, C: Clock = SystemClock> {
    memory: Memory,
    display: Display,
    keypad: Keypad,
    registers: [u8; NUM_REGISTERS],
    i: u16,
    program_counter: u16,
    stack_pointer: u8,
    stack: [u16; STACK_SIZE],
    timers: Timers,

    // Last fetched instruction
    opcode: Opcode,
    draw_pending: bool,
    waiting_for_key: bool,

    rng: R,
    clock: C,
}

impl Interpreter {
    /// Create an interpreter driven by real time and an entropy-seeded RNG.
    pub fn new() -> Interpreter {
        Interpreter::with_parts(StdRng::from_entropy(), SystemClock::new())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng, C: Clock> Interpreter<R, C> {
    /// Create an interpreter with the given randomness and time sources.
    pub fn with_parts(rng: R, clock: C) -> Interpreter<R, C> {
        let timers = Timers::new(clock.now());
        Interpreter {
            memory: Memory::with_font(),
            display: Display::new(),
            keypad: Keypad::new(),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: PC_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            timers,
            opcode: Opcode::default(),
            draw_pending: false,
            waiting_for_key: false,
            rng,
            clock,
        }
    }

    /// Copy a program into memory at 0x200.
    /// Programs that do not fit are rejected before anything is written.
    pub fn load(&mut self, program: &[u8]) -> Result<(), ExecutionError> {
        if program.len() > MAX_ROM_SIZE {
            return Err(ExecutionError::RomTooLarge {
                size: program.len(),
                max: MAX_ROM_SIZE,
            });
        }
        log::debug!("Loading {} byte program", program.len());
        self.memory.write(PC_START as usize, program)?;
        Ok(())
    }

    /// Perform a single step, which will update timers,
    /// then load an instruction and execute it.
    pub fn step(&mut self) -> Result<(), ExecutionError> {
        self.timers.update(self.clock.now());

        // Each opcode is two bytes, high byte first
        let bytes = self.memory.read(self.program_counter as usize, 2)?;
        self.opcode = Opcode::from_two_u8(bytes[0], bytes[1]);
        self.program_counter += 2;

        log::trace!("{}", self);
        let instruction = Instruction::decode(&self.opcode)?;
        log::trace!("{:?}", instruction);

        self.execute(instruction)
    }

    /// Execute a single instruction. The program counter is expected
    /// to already point past it.
    pub fn execute(&mut self, instruction: Instruction) -> Result<(), ExecutionError> {
        match instruction {
            Instruction::ClearScreen => {
                self.display.clear();
                self.draw_pending = true;
            }

            // Return to the previous call site via the stack.
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(ExecutionError::StackUnderflow);
                }
                self.stack_pointer -= 1;
                self.program_counter = self.stack[self.stack_pointer as usize];
                self.check_program_counter()?;
            }

            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
                self.check_program_counter()?;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                if self.stack_pointer as usize >= STACK_SIZE {
                    return Err(ExecutionError::StackOverflow);
                }
                self.stack[self.stack_pointer as usize] = self.program_counter;
                self.stack_pointer += 1;
                self.program_counter = addr;
                self.check_program_counter()?;
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) == n)?;
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                self.skip_if(self.reg(x) != n)?;
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) == self.reg(y))?;
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.set_reg(x, n);
            }

            // Wraps around and leaves VF alone
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.set_reg(x, self.reg(x).wrapping_add(n));
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(y));
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) | self.reg(y));
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) & self.reg(y));
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) ^ self.reg(y));
            }

            // VF is written before Vx, so Vx wins when x is F.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_flag(carry);
                self.set_reg(x, sum);
            }

            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_flag(vx > vy);
                self.set_reg(x, vx.wrapping_sub(vy));
            }

            Instruction::BitshiftRight(Reg(x)) => {
                let vx = self.reg(x);
                self.set_flag(vx & 0x01 != 0);
                self.set_reg(x, vx >> 1);
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_flag(vy > vx);
                self.set_reg(x, vy.wrapping_sub(vx));
            }

            Instruction::BitshiftLeft(Reg(x)) => {
                let vx = self.reg(x);
                self.set_flag(vx & 0x80 != 0);
                self.set_reg(x, vx << 1);
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.reg(x) != self.reg(y))?;
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                self.program_counter = u16::from(self.reg(0)) + addr;
                self.check_program_counter()?;
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                let value = self.rng.gen::<u8>() & n;
                self.set_reg(x, value);
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                let sprite = self.memory.read(self.i as usize, sprite_height as usize)?;
                let collision = self
                    .display
                    .draw_sprite(self.registers[x as usize & 0xF], self.registers[y as usize & 0xF], sprite);
                self.set_flag(collision);
                self.draw_pending = true;
            }

            Instruction::IfKeyEqVx(Reg(x)) => {
                self.skip_if(self.keypad.is_pressed(self.reg(x)))?;
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                self.skip_if(!self.keypad.is_pressed(self.reg(x)))?;
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.set_reg(x, self.timers.delay);
            }

            // Wait for a key press by executing this instruction again until one arrives
            Instruction::SetRegToGetKey(Reg(x)) => match self.keypad.first_pressed() {
                Some(key) => {
                    self.waiting_for_key = false;
                    self.set_reg(x, key);
                }
                None => {
                    self.waiting_for_key = true;
                    self.program_counter = self.program_counter.saturating_sub(2);
                }
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.timers.delay = self.reg(x);
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.timers.sound = self.reg(x);
            }

            // Some programs index past the end of memory on purpose, so only warn
            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(u16::from(self.reg(x)));
                if self.i as usize > MEM_SIZE {
                    log::warn!("I is past the end of memory: {:#06x}", self.i);
                }
            }

            // Set i to character address. Each font element is 5 bytes wide.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = GLYPH_SIZE * u16::from(self.reg(x));
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = self.reg(x);
                let digits = [value / 100, value / 10 % 10, value % 10];
                self.memory.write(self.i as usize, &digits)?;
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                let count = (x as usize & 0xF) + 1;
                self.memory.write(self.i as usize, &self.registers[..count])?;
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                let count = (x as usize & 0xF) + 1;
                let values = self.memory.read(self.i as usize, count)?;
                self.registers[..count].copy_from_slice(values);
            }
        };

        Ok(())
    }

    /// Mark a key as held down.
    pub fn set_key(&mut self, key: u8) {
        if !self.keypad.press(key) {
            log::warn!("Ignoring press of unknown key {:#x}", key);
        }
    }

    /// Mark a key as released.
    pub fn clear_key(&mut self, key: u8) {
        if !self.keypad.release(key) {
            log::warn!("Ignoring release of unknown key {:#x}", key);
        }
    }

    /// Whether the screen changed since it was last consumed.
    pub fn is_draw_pending(&self) -> bool {
        self.draw_pending
    }

    /// Copy out the screen for presentation.
    pub fn consume_framebuffer(&mut self) -> Framebuffer {
        self.draw_pending = false;
        self.display.snapshot()
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack_pointer(&self) -> u8 {
        self.stack_pointer
    }

    pub fn delay_timer(&self) -> u8 {
        self.timers.delay
    }

    pub fn sound_timer(&self) -> u8 {
        self.timers.sound
    }

    /// The sound channel should beep while the sound timer runs.
    pub fn is_sound_active(&self) -> bool {
        self.timers.sound > 0
    }

    /// True while a wait-for-key instruction is spinning.
    pub fn is_waiting_for_key(&self) -> bool {
        self.waiting_for_key
    }

    fn reg(&self, x: u8) -> u8 {
        self.registers[x as usize & 0xF]
    }

    fn set_reg(&mut self, x: u8, value: u8) {
        self.registers[x as usize & 0xF] = value;
    }

    fn set_flag(&mut self, flag: bool) {
        self.registers[0xF] = flag as u8;
    }

    fn skip_if(&mut self, condition: bool) -> Result<(), ExecutionError> {
        if condition {
            self.program_counter += 2;
        }
        self.check_program_counter()
    }

    fn check_program_counter(&self) -> Result<(), ExecutionError> {
        if self.program_counter as usize >= MEM_SIZE {
            return Err(ExecutionError::ProgramCounterOutOfRange {
                pc: self.program_counter,
            });
        }
        Ok(())
    }
}

impl<R: Rng, C: Clock> fmt::Display for Interpreter<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "PC: {:03x} SP: {:x} I: {:03x} DT: {:02x} ST: {:02x} DRW: {} INST: {:04x}",
            self.program_counter,
            self.stack_pointer,
            self.i,
            self.timers.delay,
            self.timers.sound,
            self.draw_pending as u8,
            self.opcode.word
        )?;
        write!(f, "Reg:")?;
        for value in &self.registers {
            write!(f, " {:02x}", value)?;
        }
        write!(f, "\nStack:")?;
        for addr in &self.stack {
            write!(f, " {:03x}", addr)?;
        }
        Ok(())
    }
}
