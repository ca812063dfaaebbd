pub mod config;
pub mod machine;
pub mod ports;
pub mod shift_register;
pub mod snapshot;
pub mod sound;

pub use config::MachineConfig;
pub use machine::{InvaderMachine, MachineCrash};
pub use ports::{Button, DipConfig, InvaderPorts};
pub use shift_register::ShiftRegister;
pub use snapshot::MachineSnapshot;
pub use sound::{SoundEffect, SoundEvent, SoundLatch};

/// Start of video RAM. The frame buffer runs to the end of RAM at 0x3fff.
pub const VRAM_START: usize = 0x2400;
/// One past the last byte of video RAM.
pub const VRAM_END: usize = 0x4000;

/// Logical screen width in pixels (the monitor is mounted rotated).
pub const SCREEN_WIDTH: usize = 224;
/// Logical screen height in pixels.
pub const SCREEN_HEIGHT: usize = 256;
