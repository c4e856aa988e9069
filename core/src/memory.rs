use crate::constants::{FONT_START, MEMORY_SIZE, SPRITE_SHEET};
use crate::error::MachineError;

/// # Memory
/// 4096 bytes of flat, bounds-checked memory.
///
/// ```text
/// 0x000..0x200  reserved for the interpreter
///   0x050..0x0A0  sprite sheet
/// 0x200..0x1000 program and data
/// ```
///
/// Addresses are `u16` as the registers are; every access is checked against
/// the end of memory and reports the first address that falls outside it.
#[derive(Copy, Clone)]
pub struct Memory {
    bytes: [u8; MEMORY_SIZE],
}

impl Memory {
    /// Zeroed memory with the sprite sheet in place
    pub fn new() -> Self {
        let mut bytes = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        bytes[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);
        Memory { bytes }
    }

    fn range(address: u16, len: usize) -> Result<std::ops::Range<usize>, MachineError> {
        let start = address as usize;
        let end = start + len;
        if end > MEMORY_SIZE {
            return Err(MachineError::MemoryOutOfBounds {
                address: start.max(MEMORY_SIZE),
            });
        }
        Ok(start..end)
    }

    pub fn byte(&self, address: u16) -> Result<u8, MachineError> {
        Ok(self.read(address, 1)?[0])
    }

    /// Reads the big-endian word at `address..address + 2`
    pub fn word(&self, address: u16) -> Result<u16, MachineError> {
        let bytes = self.read(address, 2)?;
        Ok(u16::from(bytes[0]) << 8 | u16::from(bytes[1]))
    }

    pub fn read(&self, address: u16, len: usize) -> Result<&[u8], MachineError> {
        let range = Self::range(address, len)?;
        Ok(&self.bytes[range])
    }

    /// Copies `data` to `address..`; nothing is written if any of it would
    /// land outside memory.
    pub fn write(&mut self, address: u16, data: &[u8]) -> Result<(), MachineError> {
        let range = Self::range(address, data.len())?;
        self.bytes[range].copy_from_slice(data);
        Ok(())
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}
