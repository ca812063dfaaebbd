//! Flat save-state image of a CPU and its memory.
//!
//! ## Binary format
//!
//! Fixed size, no header, fields in this exact order:
//! - 65536 bytes: memory
//! - 7 bytes: registers A, B, C, D, E, H, L
//! - 1 byte: flags, packed as by `PUSH PSW`
//! - 2 bytes: PC (u16 little-endian)
//! - 2 bytes: SP (u16 little-endian)
//! - 1 byte: interrupt-enable latch (0 or 1)
//!
//! Peripheral state is appended by the owning machine after these bytes.

use std::fmt;

use crate::flags::ConditionBits;
use crate::state::Registers;
use crate::MEMORY_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotError {
    /// The input ended before every field was read.
    Truncated { expected: usize, actual: usize },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::Truncated { expected, actual } => write!(
                f,
                "snapshot truncated: expected {} bytes, got {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for SnapshotError {}

/// Everything needed to put a CPU back exactly where it was.
#[derive(Clone, PartialEq, Eq)]
pub struct CpuSnapshot {
    pub memory: Box<[u8; MEMORY_SIZE]>,
    pub regs: Registers,
    pub flags: ConditionBits,
    pub pc: u16,
    pub sp: u16,
    pub inte: bool,
}

impl CpuSnapshot {
    /// Serialized size in bytes.
    pub const SIZE: usize = MEMORY_SIZE + 7 + 1 + 2 + 2 + 1;

    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::SIZE);
        self.write_to(&mut data);
        data
    }

    /// Append the serialized form to `data`.
    pub fn write_to(&self, data: &mut Vec<u8>) {
        data.extend_from_slice(&self.memory[..]);

        let r = &self.regs;
        data.extend_from_slice(&[r.a, r.b, r.c, r.d, r.e, r.h, r.l]);
        data.push(self.flags.to_byte());
        data.extend_from_slice(&self.pc.to_le_bytes());
        data.extend_from_slice(&self.sp.to_le_bytes());
        data.push(self.inte as u8);
    }

    /// Decode a snapshot from the first [`Self::SIZE`] bytes of `data`.
    pub fn deserialize(data: &[u8]) -> Result<Self, SnapshotError> {
        Self::read_prefix(data).map(|(snapshot, _)| snapshot)
    }

    /// Decode a snapshot and hand back whatever follows it.
    pub fn read_prefix(data: &[u8]) -> Result<(Self, &[u8]), SnapshotError> {
        if data.len() < Self::SIZE {
            return Err(SnapshotError::Truncated {
                expected: Self::SIZE,
                actual: data.len(),
            });
        }

        let mut memory = Box::new([0u8; MEMORY_SIZE]);
        memory.copy_from_slice(&data[..MEMORY_SIZE]);
        let mut pos = MEMORY_SIZE;

        let regs = Registers {
            a: data[pos],
            b: data[pos + 1],
            c: data[pos + 2],
            d: data[pos + 3],
            e: data[pos + 4],
            h: data[pos + 5],
            l: data[pos + 6],
        };
        pos += 7;

        let flags = ConditionBits::from_byte(data[pos]);
        pos += 1;

        let pc = u16::from_le_bytes([data[pos], data[pos + 1]]);
        pos += 2;
        let sp = u16::from_le_bytes([data[pos], data[pos + 1]]);
        pos += 2;

        let inte = data[pos] != 0;
        pos += 1;

        let snapshot = Self {
            memory,
            regs,
            flags,
            pc,
            sp,
            inte,
        };
        Ok((snapshot, &data[pos..]))
    }
}

impl fmt::Debug for CpuSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CpuSnapshot")
            .field("regs", &self.regs)
            .field("flags", &self.flags)
            .field("pc", &format_args!("0x{:04X}", self.pc))
            .field("sp", &format_args!("0x{:04X}", self.sp))
            .field("inte", &self.inte)
            .finish_non_exhaustive()
    }
}
