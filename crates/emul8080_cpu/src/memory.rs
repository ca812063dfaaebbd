use crate::error::CpuError;
use crate::{MEMORY_SIZE, ROM_BOUNDARY};

/// Flat 64 KiB address space with a write-protected ROM region.
///
/// Reads are unchecked (the 8080 has no MMU). Writes below `rom_boundary`
/// are rejected with [`CpuError::RomViolation`].
#[derive(Clone)]
pub struct Memory {
    bytes: Box<[u8; MEMORY_SIZE]>,
    rom_boundary: u16,
    /// One past the last byte copied in by the most recent `load`.
    program_end: usize,
}

impl Memory {
    /// Memory protected below [`ROM_BOUNDARY`], as wired on the arcade board.
    pub fn new() -> Self {
        Self::with_rom_boundary(ROM_BOUNDARY)
    }

    /// Memory protected below an arbitrary boundary. A boundary of 0 makes
    /// the whole address space writable.
    pub fn with_rom_boundary(rom_boundary: u16) -> Self {
        Self {
            bytes: Box::new([0; MEMORY_SIZE]),
            rom_boundary,
            program_end: 0,
        }
    }

    /// Build a memory image from a program, loaded at address 0.
    pub fn from_program(program: &[u8], rom_boundary: u16) -> Result<Self, CpuError> {
        let mut memory = Self::with_rom_boundary(rom_boundary);
        memory.load(program)?;
        Ok(memory)
    }

    /// Copy an image into memory starting at address 0.
    ///
    /// ROM protection does not apply here; this is how ROM gets populated.
    pub fn load(&mut self, image: &[u8]) -> Result<(), CpuError> {
        if image.len() > MEMORY_SIZE {
            return Err(CpuError::RomTooLarge(image.len()));
        }
        self.bytes[..image.len()].copy_from_slice(image);
        self.program_end = image.len();
        Ok(())
    }

    #[inline]
    pub fn read(&self, addr: u16) -> u8 {
        self.bytes[addr as usize]
    }

    /// Little-endian 16-bit read: low byte at `addr`, high byte at `addr + 1`.
    #[inline]
    pub fn read_word(&self, addr: u16) -> u16 {
        u16::from_le_bytes([self.read(addr), self.read(addr.wrapping_add(1))])
    }

    #[inline]
    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), CpuError> {
        if addr < self.rom_boundary {
            return Err(CpuError::RomViolation(addr));
        }
        self.bytes[addr as usize] = value;
        Ok(())
    }

    pub fn rom_boundary(&self) -> u16 {
        self.rom_boundary
    }

    pub fn program_end(&self) -> usize {
        self.program_end
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..]
    }

    pub(crate) fn image(&self) -> Box<[u8; MEMORY_SIZE]> {
        self.bytes.clone()
    }

    /// Overwrite the whole address space, bypassing ROM protection.
    ///
    /// Used when restoring a snapshot; the restored image becomes the loaded
    /// program.
    pub(crate) fn restore(&mut self, image: &[u8; MEMORY_SIZE]) {
        self.bytes.copy_from_slice(image);
        self.program_end = MEMORY_SIZE;
    }
}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Memory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Memory")
            .field("rom_boundary", &format_args!("0x{:04X}", self.rom_boundary))
            .field("program_end", &self.program_end)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_below_rom_boundary_is_rejected() {
        let mut memory = Memory::new();
        assert_eq!(memory.write(0x1000, 0x42), Err(CpuError::RomViolation(0x1000)));
        assert_eq!(memory.read(0x1000), 0x00);

        assert_eq!(memory.write(0x2500, 0x42), Ok(()));
        assert_eq!(memory.read(0x2500), 0x42);
    }

    #[test]
    fn boundary_address_itself_is_writable() {
        let mut memory = Memory::new();
        assert_eq!(memory.write(0x1fff, 1), Err(CpuError::RomViolation(0x1fff)));
        assert_eq!(memory.write(0x2000, 1), Ok(()));
    }

    #[test]
    fn load_copies_from_zero_and_ignores_protection() {
        let mut memory = Memory::new();
        memory.load(&[0xde, 0xad, 0xbe, 0xef]).unwrap();
        assert_eq!(memory.read(0), 0xde);
        assert_eq!(memory.read(3), 0xef);
        assert_eq!(memory.program_end(), 4);
    }

    #[test]
    fn oversized_image_is_rejected() {
        let mut memory = Memory::new();
        let image = vec![0u8; MEMORY_SIZE + 1];
        assert_eq!(memory.load(&image), Err(CpuError::RomTooLarge(MEMORY_SIZE + 1)));

        let exact = vec![0xffu8; MEMORY_SIZE];
        assert!(memory.load(&exact).is_ok());
        assert_eq!(memory.read(0xffff), 0xff);
    }

    #[test]
    fn restore_marks_the_whole_image_as_loaded() {
        let mut memory = Memory::new();
        memory.load(&[0x00, 0x00]).unwrap();

        let mut image = Box::new([0u8; MEMORY_SIZE]);
        image[0x1000] = 0x42;
        memory.restore(&image);
        assert_eq!(memory.read(0x1000), 0x42);
        assert_eq!(memory.program_end(), MEMORY_SIZE);
    }

    #[test]
    fn read_word_is_little_endian() {
        let memory = Memory::from_program(&[0x34, 0x12], 0).unwrap();
        assert_eq!(memory.read_word(0), 0x1234);
    }
}
