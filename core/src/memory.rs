use crate::constants::{FONT_START, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START, SPRITE_SHEET};
use crate::error::Chip8Error;

// Addresses are u16 as the opcodes encode them; lengths are usize to match slices.

/// # Memory
/// 4096 bytes of RAM laid out as:
/// ```text
/// 0x000-0x04F  sprite sheet (hex font)
/// 0x050-0x1FF  reserved for the interpreter
/// 0x200-0xFFF  program
/// ```
/// Every access is bounds checked; nothing outside `0..MEMORY_SIZE` is ever read or written.
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
}

impl Memory {
    /// Creates memory with the font already in place
    pub fn new() -> Self {
        let mut memory = Memory {
            bytes: Box::new([0; MEMORY_SIZE]),
        };
        memory.reset();
        memory
    }

    /// Zeroes every byte then writes the sprite sheet at `FONT_START`
    pub fn reset(&mut self) {
        self.bytes.iter_mut().for_each(|b| *b = 0);
        let font = FONT_START as usize;
        self.bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
    }

    /// Copies a program into memory starting at `PROGRAM_START`
    ///
    /// # Arguments
    /// * `program` the raw bytes of a ROM; rejected whole if it doesn't fit
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        if program.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: program.len(),
                max_size: MAX_ROM_SIZE,
            });
        }
        self.write_slice(PROGRAM_START, program)
    }

    pub fn read_byte(&self, addr: u16) -> Result<u8, Chip8Error> {
        self.bytes
            .get(addr as usize)
            .copied()
            .ok_or(Chip8Error::AddressOutOfBounds {
                address: addr as usize,
            })
    }

    pub fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), Chip8Error> {
        let byte = self
            .bytes
            .get_mut(addr as usize)
            .ok_or(Chip8Error::AddressOutOfBounds {
                address: addr as usize,
            })?;
        *byte = value;
        Ok(())
    }

    /// Borrows `len` bytes starting at `addr`, failing if any of them lie outside memory
    pub fn read_slice(&self, addr: u16, len: usize) -> Result<&[u8], Chip8Error> {
        let range = Memory::range(addr, len)?;
        Ok(&self.bytes[range])
    }

    /// Writes all of `data` starting at `addr`, or nothing if it would run past the end
    pub fn write_slice(&mut self, addr: u16, data: &[u8]) -> Result<(), Chip8Error> {
        let range = Memory::range(addr, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }

    /// Reads the big-endian opcode at `addr` and `addr + 1`
    pub fn read_word(&self, addr: u16) -> Result<u16, Chip8Error> {
        let word = self.read_slice(addr, 2)?;
        Ok(u16::from(word[0]) << 8 | u16::from(word[1]))
    }

    fn range(addr: u16, len: usize) -> Result<std::ops::Range<usize>, Chip8Error> {
        let start = addr as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            // report the first address that doesn't exist
            return Err(Chip8Error::AddressOutOfBounds {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
