pub mod clock;
pub mod cpu;
pub mod error;
pub mod flags;
pub mod io;
pub mod memory;
pub mod opcode;
pub mod scheduler;
pub mod snapshot;
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use cpu::Cpu;
pub use error::CpuError;
pub use flags::ConditionBits;
pub use io::IoBus;
pub use memory::Memory;
pub use opcode::OpCode;
pub use scheduler::{InterruptTimer, Scheduler, END_OF_FRAME_VECTOR, MID_FRAME_VECTOR};
pub use snapshot::{CpuSnapshot, SnapshotError};
pub use state::{ProcessorState, Registers};

/// Total addressable memory size (64 KiB).
pub const MEMORY_SIZE: usize = 0x10000;

/// First writable address on the Space Invaders board.
///
/// Everything below is ROM and rejects stores.
pub const ROM_BOUNDARY: u16 = 0x2000;
