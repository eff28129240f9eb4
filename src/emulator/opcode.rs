/// A raw instruction word together with the fields every
/// instruction format is built from.
///
/// - `nnn`: lowest 12 bits, an address
/// - `kk`: lowest 8 bits, a constant
/// - `n`: lowest 4 bits
/// - `x` and `y`: the two middle nibbles, register identifiers
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Opcode {
    pub word: u16,
    pub nnn: u16,
    pub kk: u8,
    pub n: u8,
    pub x: u8,
    pub y: u8,
}

impl Opcode {
    pub fn new(word: u16) -> Opcode {
        Opcode {
            word,
            nnn: word & 0x0FFF,
            kk: (word & 0x00FF) as u8,
            n: (word & 0x000F) as u8,
            x: ((word & 0x0F00) >> 8) as u8,
            y: ((word & 0x00F0) >> 4) as u8,
        }
    }

    /// Build an opcode from its high and low byte.
    pub fn from_two_u8(left: u8, right: u8) -> Opcode {
        Opcode::new(u16::from(left) << 8 | u16::from(right))
    }

    /// The operation class, i.e. the highest nibble.
    pub fn class(&self) -> u8 {
        (self.word >> 12) as u8
    }

    /// All four nibbles, highest first.
    pub fn as_four_u8(&self) -> (u8, u8, u8, u8) {
        (self.class(), self.x, self.y, self.n)
    }
}
