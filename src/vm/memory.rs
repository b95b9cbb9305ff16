// VM Memory: fixed-size, zero-initialized, bounds-checked byte storage

use super::error::{MemoryError, ProgramTooLarge};
use crate::config::MEMORY_SIZE;

/// Flat byte-addressable RAM
#[derive(Debug, Clone)]
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {
    pub fn new() -> Self {
        Memory {
            cells: [0; MEMORY_SIZE],
        }
    }

    /// Number of addressable cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read the byte stored at `address`
    pub fn read(&self, address: usize) -> Result<u8, MemoryError> {
        self.cells
            .get(address)
            .copied()
            .ok_or(MemoryError::OutOfBounds(address))
    }

    /// Store `value` at `address`
    pub fn write(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        let slot = self
            .cells
            .get_mut(address)
            .ok_or(MemoryError::OutOfBounds(address))?;
        *slot = value;
        Ok(())
    }

    /// Copy `bytes` into memory starting at `start`
    pub fn load(&mut self, start: usize, bytes: &[u8]) -> Result<(), ProgramTooLarge> {
        let end = start
            .checked_add(bytes.len())
            .filter(|end| *end <= self.cells.len())
            .ok_or(ProgramTooLarge {
                len: bytes.len(),
                capacity: self.cells.len().saturating_sub(start),
            })?;
        self.cells[start..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Borrow a range of cells, for diagnostics
    pub fn window(&self, range: std::ops::Range<usize>) -> Result<&[u8], MemoryError> {
        if range.start > range.end {
            return Err(MemoryError::OutOfBounds(range.start));
        }
        if range.end > self.cells.len() {
            return Err(MemoryError::OutOfBounds(range.end - 1));
        }
        Ok(&self.cells[range])
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

    #[test]
    fn test_memory_zero_initialized() {
        let mem = Memory::new();
        assert_eq!(mem.len(), MEMORY_SIZE);
        assert!((0..MEMORY_SIZE).all(|addr| mem.read(addr) == Ok(0)));
    }

    #[test]
    fn test_memory_read_write() {
        let mut mem = Memory::new();
        assert!(mem.write(0, 0b1000_0010).is_ok());
        assert!(mem.write(255, 42).is_ok());
        assert_eq!(mem.read(0), Ok(0b1000_0010));
        assert_eq!(mem.read(255), Ok(42));
    }

    #[test]
    fn test_memory_out_of_bounds() {
        let mut mem = Memory::new();
        assert_eq!(mem.read(256), Err(MemoryError::OutOfBounds(256)));
        assert_eq!(mem.write(300, 1), Err(MemoryError::OutOfBounds(300)));
    }

    #[test]
    fn test_memory_load() {
        let mut mem = Memory::new();
        mem.load(0, &[1, 2, 3]).unwrap();
        assert_eq!(mem.window(0..4).unwrap(), &[1, 2, 3, 0]);

        let too_big = vec![0xAA; MEMORY_SIZE + 1];
        assert_eq!(
            mem.load(0, &too_big),
            Err(ProgramTooLarge {
                len: MEMORY_SIZE + 1,
                capacity: MEMORY_SIZE
            })
        );
        // Exactly full is fine
        assert!(mem.load(0, &too_big[..MEMORY_SIZE]).is_ok());
    }

    #[test]
    fn test_memory_window_bounds() {
        let mem = Memory::new();
        assert!(mem.window(0xF0..0xF4).is_ok());
        assert_eq!(mem.window(250..257), Err(MemoryError::OutOfBounds(256)));
    }

    #[test]
    fn test_memory_window_inverted_range() {
        let mem = Memory::new();
        #[allow(clippy::reversed_empty_ranges)]
        let inverted = 0xF4..0xF0;
        assert_eq!(mem.window(inverted), Err(MemoryError::OutOfBounds(0xF4)));
        assert_eq!(mem.window(0x10..0x10), Ok(&[][..]));
    }
}
