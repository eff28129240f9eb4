//! The flat, bounds-checked byte store of the virtual machine.

use super::error::MemoryError;
use super::MEM_SIZE;

/// Hexadecimal digit glyphs, 5 bytes each, stored at address 0.
pub const FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

/// Size of a single font glyph in bytes.
pub const GLYPH_SIZE: u16 = 5;

pub struct Memory {
    bytes: [u8; MEM_SIZE],
}

impl Memory {
    /// Zeroed memory.
    pub fn new() -> Memory {
        Memory {
            bytes: [0; MEM_SIZE],
        }
    }

    /// Zeroed memory with the font glyphs at address 0.
    pub fn with_font() -> Memory {
        let mut memory = Memory::new();
        memory.bytes[..FONT.len()].copy_from_slice(&FONT);
        memory
    }

    /// Copy `data` into memory starting at `offset`.
    /// Nothing is written unless the whole range fits.
    pub fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), MemoryError> {
        let range = Self::checked_range(offset, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Borrow `length` bytes starting at `offset`.
    pub fn read(&self, offset: usize, length: usize) -> Result<&[u8], MemoryError> {
        let range = Self::checked_range(offset, length)?;
        Ok(&self.bytes[range])
    }

    fn checked_range(offset: usize, length: usize) -> Result<std::ops::Range<usize>, MemoryError> {
        match offset.checked_add(length) {
            Some(end) if end <= MEM_SIZE => Ok(offset..end),
            _ => Err(MemoryError::OutOfBounds { offset, length }),
        }
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn write_then_read() {
        let mut memory = Memory::new();
        memory.write(0x300, &[1, 2, 3]).unwrap();
        assert_eq!(memory.read(0x300, 3).unwrap(), &[1, 2, 3]);
        assert_eq!(memory.read(0x2FF, 1).unwrap(), &[0]);
    }

    #[test]
    fn write_up_to_the_last_byte_is_allowed() {
        let mut memory = Memory::new();
        assert_eq!(memory.write(MEM_SIZE - 2, &[0xAB, 0xCD]), Ok(()));
        assert_eq!(memory.read(MEM_SIZE - 2, 2), Ok(&[0xAB, 0xCD][..]));
    }

    #[test]
    fn write_past_the_end_leaves_memory_untouched() {
        let mut memory = Memory::new();
        let result = memory.write(MEM_SIZE - 2, &[1, 2, 3]);
        assert_eq!(
            result,
            Err(MemoryError::OutOfBounds {
                offset: MEM_SIZE - 2,
                length: 3
            })
        );
        assert_eq!(memory.read(MEM_SIZE - 2, 2).unwrap(), &[0, 0]);
    }

    #[test]
    fn read_past_the_end_fails() {
        let memory = Memory::new();
        assert!(memory.read(MEM_SIZE, 1).is_err());
        assert!(memory.read(usize::MAX, 2).is_err());
        assert!(memory.read(MEM_SIZE - 1, 2).is_err());
    }

    #[test]
    fn font_is_loaded_at_zero() {
        let memory = Memory::with_font();
        // Glyph for 0xA
        assert_eq!(memory.read(10 * GLYPH_SIZE as usize, 5).unwrap(), &[0xF0, 0x90, 0xF0, 0x90, 0x90]);
    }
}
