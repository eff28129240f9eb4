use super::error::ExecutionError;
use super::opcode::Opcode;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - KK: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    ClearScreen,                // 00E0
    Return,                     // 00EE
    Goto(Addr),                 // 1NNN
    Call(Addr),                 // 2NNN
    IfRegEqConst(Reg, Const),   // 3XKK
    IfRegNeqConst(Reg, Const),  // 4XKK
    IfRegEqReg(Reg, Reg),       // 5XY0
    SetRegToConst(Reg, Const),  // 6XKK
    IncRegByConst(Reg, Const),  // 7XKK
    SetRegToReg(Reg, Reg),      // 8XY0
    BitwiseOr(Reg, Reg),        // 8XY1
    BitwiseAnd(Reg, Reg),       // 8XY2
    BitwiseXor(Reg, Reg),       // 8XY3
    IncRegByReg(Reg, Reg),      // 8XY4
    DecRegByReg(Reg, Reg),      // 8XY5
    BitshiftRight(Reg),         // 8XY6
    SetVxVyMinusVx(Reg, Reg),   // 8XY7
    BitshiftLeft(Reg),          // 8XYE
    IfRegNeqReg(Reg, Reg),      // 9XY0
    SetI(Addr),                 // ANNN
    SetPcToV0PlusAddr(Addr),    // BNNN
    SetVxRand(Reg, Const),      // CXKK
    Draw(Reg, Reg, Const),      // DXYN
    IfKeyEqVx(Reg),             // EX9E
    IfKeyNeqVx(Reg),            // EXA1
    SetRegToDelayTimer(Reg),    // FX07
    SetRegToGetKey(Reg),        // FX0A
    SetDelayTimerToReg(Reg),    // FX15
    SetSoundTimerToReg(Reg),    // FX18
    AddRegToI(Reg),             // FX1E
    SetIToSpriteAddrVx(Reg),    // FX29
    SetIToBcdOfReg(Reg),        // FX33
    RegDump(Reg),               // FX55
    RegLoad(Reg),               // FX65
}

impl Instruction {
    #[cfg(test)]
    pub fn from_u16(value: u16) -> Result<Instruction, ExecutionError> {
        Instruction::decode(&Opcode::new(value))
    }

    /// Map an opcode to the instruction it encodes.
    /// Classes 5 and 9 ignore their lowest nibble.
    pub fn decode(opcode: &Opcode) -> Result<Instruction, ExecutionError> {
        let addr = Addr(opcode.nnn);
        let kk = Const(opcode.kk);
        let instruction = match opcode.as_four_u8() {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (1, _, _, _) => Instruction::Goto(addr),
            (2, _, _, _) => Instruction::Call(addr),
            (3, x, _, _) => Instruction::IfRegEqConst(Reg(x), kk),
            (4, x, _, _) => Instruction::IfRegNeqConst(Reg(x), kk),
            (5, x, y, _) => Instruction::IfRegEqReg(Reg(x), Reg(y)),
            (6, x, _, _) => Instruction::SetRegToConst(Reg(x), kk),
            (7, x, _, _) => Instruction::IncRegByConst(Reg(x), kk),
            (8, x, y, 0) => Instruction::SetRegToReg(Reg(x), Reg(y)),
            (8, x, y, 1) => Instruction::BitwiseOr(Reg(x), Reg(y)),
            (8, x, y, 2) => Instruction::BitwiseAnd(Reg(x), Reg(y)),
            (8, x, y, 3) => Instruction::BitwiseXor(Reg(x), Reg(y)),
            (8, x, y, 4) => Instruction::IncRegByReg(Reg(x), Reg(y)),
            (8, x, y, 5) => Instruction::DecRegByReg(Reg(x), Reg(y)),
            (8, x, _, 6) => Instruction::BitshiftRight(Reg(x)),
            (8, x, y, 7) => Instruction::SetVxVyMinusVx(Reg(x), Reg(y)),
            (8, x, _, 0xE) => Instruction::BitshiftLeft(Reg(x)),
            (9, x, y, _) => Instruction::IfRegNeqReg(Reg(x), Reg(y)),
            (0xA, _, _, _) => Instruction::SetI(addr),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(addr),
            (0xC, x, _, _) => Instruction::SetVxRand(Reg(x), kk),
            (0xD, x, y, n) => Instruction::Draw(Reg(x), Reg(y), Const(n)),
            (0xE, x, 9, 0xE) => Instruction::IfKeyEqVx(Reg(x)),
            (0xE, x, 0xA, 1) => Instruction::IfKeyNeqVx(Reg(x)),
            (0xF, x, 0, 7) => Instruction::SetRegToDelayTimer(Reg(x)),
            (0xF, x, 0, 0xA) => Instruction::SetRegToGetKey(Reg(x)),
            (0xF, x, 1, 5) => Instruction::SetDelayTimerToReg(Reg(x)),
            (0xF, x, 1, 8) => Instruction::SetSoundTimerToReg(Reg(x)),
            (0xF, x, 1, 0xE) => Instruction::AddRegToI(Reg(x)),
            (0xF, x, 2, 9) => Instruction::SetIToSpriteAddrVx(Reg(x)),
            (0xF, x, 3, 3) => Instruction::SetIToBcdOfReg(Reg(x)),
            (0xF, x, 5, 5) => Instruction::RegDump(Reg(x)),
            (0xF, x, 6, 5) => Instruction::RegLoad(Reg(x)),
            _ => {
                log::error!("Unknown opcode {:#06x}", opcode.word);
                return Err(ExecutionError::InvalidInstruction {
                    opcode: opcode.word,
                });
            }
        };
        Ok(instruction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0x00E0 => Instruction::ClearScreen ; "clear screen")]
    #[test_case(0x00EE => Instruction::Return ; "return from call")]
    #[test_case(0x1025 => Instruction::Goto(Addr(0x25)) ; "goto")]
    #[test_case(0x2037 => Instruction::Call(Addr(0x37)) ; "call")]
    #[test_case(0x3A08 => Instruction::IfRegEqConst(Reg(0xA), Const(8)) ; "skip eq const")]
    #[test_case(0x4A08 => Instruction::IfRegNeqConst(Reg(0xA), Const(8)) ; "skip neq const")]
    #[test_case(0x5AB0 => Instruction::IfRegEqReg(Reg(0xA), Reg(0xB)) ; "skip eq reg")]
    #[test_case(0x6B23 => Instruction::SetRegToConst(Reg(0xB), Const(0x23)) ; "load const")]
    #[test_case(0x7CA1 => Instruction::IncRegByConst(Reg(0xC), Const(0xA1)) ; "add const")]
    #[test_case(0x8AB0 => Instruction::SetRegToReg(Reg(0xA), Reg(0xB)) ; "move register")]
    #[test_case(0x8DE1 => Instruction::BitwiseOr(Reg(0xD), Reg(0xE)) ; "or")]
    #[test_case(0x8DE2 => Instruction::BitwiseAnd(Reg(0xD), Reg(0xE)) ; "and")]
    #[test_case(0x8DE3 => Instruction::BitwiseXor(Reg(0xD), Reg(0xE)) ; "xor")]
    #[test_case(0x8AB4 => Instruction::IncRegByReg(Reg(0xA), Reg(0xB)) ; "add")]
    #[test_case(0x8AB5 => Instruction::DecRegByReg(Reg(0xA), Reg(0xB)) ; "sub")]
    #[test_case(0x8AB6 => Instruction::BitshiftRight(Reg(0xA)) ; "shift right")]
    #[test_case(0x8AB7 => Instruction::SetVxVyMinusVx(Reg(0xA), Reg(0xB)) ; "subn")]
    #[test_case(0x8A0E => Instruction::BitshiftLeft(Reg(0xA)) ; "shift left")]
    #[test_case(0x9AB0 => Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB)) ; "skip neq reg")]
    #[test_case(0xA025 => Instruction::SetI(Addr(0x25)) ; "load index")]
    #[test_case(0xB025 => Instruction::SetPcToV0PlusAddr(Addr(0x25)) ; "jump indexed")]
    #[test_case(0xCA23 => Instruction::SetVxRand(Reg(0xA), Const(0x23)) ; "random")]
    #[test_case(0xDABC => Instruction::Draw(Reg(0xA), Reg(0xB), Const(0xC)) ; "draw")]
    #[test_case(0xEA9E => Instruction::IfKeyEqVx(Reg(0xA)) ; "skip if pressed")]
    #[test_case(0xEAA1 => Instruction::IfKeyNeqVx(Reg(0xA)) ; "skip if not pressed")]
    #[test_case(0xFA07 => Instruction::SetRegToDelayTimer(Reg(0xA)) ; "load delay timer")]
    #[test_case(0xFA0A => Instruction::SetRegToGetKey(Reg(0xA)) ; "wait for key")]
    #[test_case(0xFA15 => Instruction::SetDelayTimerToReg(Reg(0xA)) ; "set delay timer")]
    #[test_case(0xFA18 => Instruction::SetSoundTimerToReg(Reg(0xA)) ; "set sound timer")]
    #[test_case(0xFA1E => Instruction::AddRegToI(Reg(0xA)) ; "add index")]
    #[test_case(0xFA29 => Instruction::SetIToSpriteAddrVx(Reg(0xA)) ; "font index")]
    #[test_case(0xFA33 => Instruction::SetIToBcdOfReg(Reg(0xA)) ; "bcd")]
    #[test_case(0xFA55 => Instruction::RegDump(Reg(0xA)) ; "store registers")]
    #[test_case(0xFA65 => Instruction::RegLoad(Reg(0xA)) ; "load registers")]
    fn opcodes_are_parsed_correctly(value: u16) -> Instruction {
        Instruction::from_u16(value).unwrap()
    }

    #[test_case(0xFFFF ; "unmatched low byte in class f")]
    #[test_case(0x0123 ; "machine code routine")]
    #[test_case(0x00E1 ; "near clear screen")]
    #[test_case(0x8AB8 ; "unmatched arithmetic")]
    #[test_case(0xEA9F ; "unmatched key skip")]
    fn unknown_opcodes_are_rejected(value: u16) {
        assert_eq!(
            Instruction::from_u16(value),
            Err(ExecutionError::InvalidInstruction { opcode: value })
        );
    }

    #[test]
    fn register_skips_ignore_the_lowest_nibble() {
        assert_eq!(Instruction::from_u16(0x5AB3), Ok(Instruction::IfRegEqReg(Reg(0xA), Reg(0xB))));
        assert_eq!(Instruction::from_u16(0x9AB7), Ok(Instruction::IfRegNeqReg(Reg(0xA), Reg(0xB))));
    }
}
