/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the interpreter on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The keypad is mapped onto the 4x4 block starting at `1`, `q`, `a` and `z`. Press escape to quit.

# Library

The main way of running a program is to load it as bytes and step through it.

```rust
use chip8_vm::emulator::Interpreter;

let mut interpreter = Interpreter::new();

// Load a program at address 0x200.
let program = [
    0x00, 0xE0, // clear the screen
    0x60, 0x05, // V0 = 5
    0x70, 0x03, // V0 += 3
];
interpreter.load(&program).unwrap();
for _ in 0..3 {
    interpreter.step().unwrap();
}
assert_eq!(interpreter.registers()[0], 8);

// Clearing the screen counts as drawing
assert!(interpreter.is_draw_pending());
let frame = interpreter.consume_framebuffer();
assert!(frame.iter().all(|pixel| *pixel == 0));
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Interpreter;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut interpreter = Interpreter::new();

interpreter.execute(Instruction::Goto(Addr(0x250))).unwrap();
interpreter.execute(Instruction::SetRegToConst(Reg(0xA), Const(35))).unwrap();
interpreter.execute(Instruction::SetRegToReg(Reg(0xB), Reg(0xA))).unwrap();

assert_eq!(interpreter.program_counter(), 0x250);
assert_eq!(interpreter.registers()[0xB], 35);
```

## Reproducible runs

Randomness and time are both injected. A seeded RNG and a [`ManualClock`](emulator::timer::ManualClock)
make every run identical.

```rust
use chip8_vm::emulator::Interpreter;
use chip8_vm::emulator::timer::ManualClock;
use rand::{rngs::StdRng, SeedableRng};
use std::time::Duration;

let clock = ManualClock::new();
let mut interpreter = Interpreter::with_parts(StdRng::seed_from_u64(7), clock.clone());
interpreter.load(&[0x60, 0x02, 0xF0, 0x15, 0x12, 0x04]).unwrap();
interpreter.step().unwrap();
interpreter.step().unwrap();

clock.advance(Duration::from_millis(40));
interpreter.step().unwrap();
assert_eq!(interpreter.delay_timer(), 0);
```

## Custom input and output

To run a program interactively, implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get key events from and a screen respectively,
and hand them to a `Driver` together with an interpreter.
Take a look at `src/emulator/input.rs` and `src/emulator/output.rs` to see how to implement this, then do the following.

```ignore
use chip8_vm::emulator::{Driver, DriverConfig, Interpreter};

let mut driver = Driver::new(Interpreter::new(), MyInput::new(), MyOutput::new(), DriverConfig::default());
driver.run()?;
```
*/

pub mod emulator;
