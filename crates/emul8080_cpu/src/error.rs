use std::fmt;

use crate::opcode::OpCode;

/// Failures surfaced by the 8080 core.
///
/// The dispatcher never recovers from any of these internally: the failing
/// `execute()` call is aborted and the error handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuError {
    /// The byte at `pc` is not a defined 8080 instruction.
    UnknownOpcode(u8),
    /// The instruction decodes but this core does not execute it.
    UnhandledOperation(OpCode),
    /// A store targeted an address below the configured ROM boundary.
    RomViolation(u16),
    /// `IN`/`OUT` was executed with no I/O bus attached.
    MissingIoHandler,
    /// The program counter walked past the end of the loaded image.
    ProgramTerminated,
    /// A load was asked to copy more bytes than the address space holds.
    RomTooLarge(usize),
}

impl fmt::Display for CpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuError::UnknownOpcode(byte) => write!(f, "unknown opcode 0x{:02X}", byte),
            CpuError::UnhandledOperation(op) => {
                write!(f, "unhandled operation {} (0x{:02X})", op, op.byte())
            }
            CpuError::RomViolation(addr) => write!(f, "cannot write to ROM at 0x{:04X}", addr),
            CpuError::MissingIoHandler => write!(f, "no I/O bus attached"),
            CpuError::ProgramTerminated => write!(f, "program counter ran past the loaded image"),
            CpuError::RomTooLarge(len) => {
                write!(f, "image of {} bytes does not fit in 64 KiB", len)
            }
        }
    }
}

impl std::error::Error for CpuError {}
