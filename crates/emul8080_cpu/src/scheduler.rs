//! Wall-clock pacing for the dispatcher.
//!
//! A [`Scheduler`] turns elapsed host time into a cycle budget and spends it
//! on [`Cpu::execute`]. Interrupt timing is decided outside the CPU by an
//! interrupt-poll closure, usually backed by an [`InterruptTimer`].

use crate::clock::Clock;
use crate::cpu::Cpu;
use crate::error::CpuError;
use crate::io::IoBus;

/// Vector requested halfway down the screen.
pub const MID_FRAME_VECTOR: u8 = 1;
/// Vector requested at the start of vertical blank.
pub const END_OF_FRAME_VECTOR: u8 = 2;

/// Cost of the slowest instruction (XTHL).
const MAX_INSTRUCTION_CYCLES: u32 = 18;

pub struct Scheduler<C: Clock> {
    clock: C,
    last_tick_us: Option<f64>,
    max_catch_up_cycles: u32,
    cycles_per_us: u32,
}

impl<C: Clock> Scheduler<C> {
    /// Cap on the cycles spent by a single tick, so a long host stall does
    /// not turn into a long burst of emulation.
    pub const DEFAULT_MAX_CATCH_UP_CYCLES: u32 = 10_000;

    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last_tick_us: None,
            max_catch_up_cycles: Self::DEFAULT_MAX_CATCH_UP_CYCLES,
            cycles_per_us: 1,
        }
    }

    /// Clamped so that finishing the last instruction of a tick cannot
    /// overflow the cycle count.
    pub fn with_max_catch_up_cycles(mut self, cycles: u32) -> Self {
        self.max_catch_up_cycles = cycles.min(u32::MAX - MAX_INSTRUCTION_CYCLES);
        self
    }

    /// Emulated cycles per elapsed host microsecond. One by default.
    pub fn with_cycles_per_us(mut self, cycles: u32) -> Self {
        self.cycles_per_us = cycles;
        self
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> f64 {
        self.clock.current_microseconds()
    }

    /// Run one time slice.
    ///
    /// `interrupt_poll` is called once with the current time. If it returns a
    /// vector, the tick only injects that interrupt. Otherwise instructions
    /// run until the cycle budget for the elapsed time is spent. Returns the
    /// number of cycles executed.
    pub fn start<B, F>(&mut self, cpu: &mut Cpu<B>, mut interrupt_poll: F) -> Result<u32, CpuError>
    where
        B: IoBus,
        F: FnMut(f64) -> Option<u8>,
    {
        let now = self.clock.current_microseconds();
        let last = *self.last_tick_us.get_or_insert(now);
        let budget = self.budget(now - last);

        let mut cycles = 0;
        if let Some(vector) = interrupt_poll(now) {
            cpu.interrupt(vector)?;
        } else {
            while cycles < budget {
                cycles = cycles.saturating_add(cpu.execute()?);
            }
        }

        self.last_tick_us = Some(now);
        Ok(cycles)
    }

    fn budget(&self, elapsed_us: f64) -> u32 {
        let wanted = elapsed_us.max(0.0) * f64::from(self.cycles_per_us);
        let cap = f64::from(self.max_catch_up_cycles);
        if wanted > cap {
            log::debug!("clamping {:.0} cycles of catch-up to {}", wanted, cap);
            self.max_catch_up_cycles
        } else {
            wanted as u32
        }
    }
}

/// The two-phase video interrupt of the arcade board.
///
/// The first request comes `first_delay_us` after the first poll, with
/// vector 1. After that a request is made every `interval_us`, alternating
/// between vectors 2 and 1.
#[derive(Clone, Debug)]
pub struct InterruptTimer {
    first_delay_us: f64,
    interval_us: f64,
    next_due_us: Option<f64>,
    next_vector: u8,
}

impl InterruptTimer {
    pub const DEFAULT_FIRST_DELAY_US: f64 = 16_000.0;
    pub const DEFAULT_INTERVAL_US: f64 = 8_000.0;

    pub fn new(first_delay_us: f64, interval_us: f64) -> Self {
        Self {
            first_delay_us,
            interval_us,
            next_due_us: None,
            next_vector: MID_FRAME_VECTOR,
        }
    }

    /// The vector to raise at `now`, if one is due.
    pub fn poll(&mut self, now: f64) -> Option<u8> {
        let due = *self.next_due_us.get_or_insert(now + self.first_delay_us);
        if now <= due {
            return None;
        }

        let vector = self.next_vector;
        self.next_vector = if vector == MID_FRAME_VECTOR {
            END_OF_FRAME_VECTOR
        } else {
            MID_FRAME_VECTOR
        };
        self.next_due_us = Some(now + self.interval_us);
        Some(vector)
    }

    pub fn next_due_us(&self) -> Option<f64> {
        self.next_due_us
    }

    pub fn next_vector(&self) -> u8 {
        self.next_vector
    }
}

impl Default for InterruptTimer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FIRST_DELAY_US, Self::DEFAULT_INTERVAL_US)
    }
}
