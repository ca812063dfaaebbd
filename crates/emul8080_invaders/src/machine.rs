use std::fmt;

use emul8080_cpu::{Clock, Cpu, CpuError, InterruptTimer, Memory, Scheduler, SystemClock};

use crate::config::MachineConfig;
use crate::ports::{Button, InvaderPorts};
use crate::snapshot::MachineSnapshot;
use crate::sound::{SoundEvent, SoundLatch};
use crate::{VRAM_END, VRAM_START};

/// A CPU failure together with the machine state at the moment it happened.
#[derive(Debug)]
pub struct MachineCrash {
    pub error: CpuError,
    pub snapshot: MachineSnapshot,
}

impl fmt::Display for MachineCrash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (pc=0x{:04X})", self.error, self.snapshot.cpu.pc)
    }
}

impl std::error::Error for MachineCrash {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// The Space Invaders arcade board.
///
/// Owns the 8080 with the board's ports attached, the wall-clock scheduler
/// and the two-phase video interrupt timer. Hosts call [`tick`] in a loop
/// and read [`video_memory`] to draw.
///
/// [`tick`]: InvaderMachine::tick
/// [`video_memory`]: InvaderMachine::video_memory
pub struct InvaderMachine<C: Clock = SystemClock> {
    cpu: Cpu<InvaderPorts>,
    scheduler: Scheduler<C>,
    timer: InterruptTimer,
    sound: SoundLatch,
    sound_events: Vec<SoundEvent>,
    config: MachineConfig,
}

impl InvaderMachine<SystemClock> {
    pub fn new(config: MachineConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> InvaderMachine<C> {
    pub fn with_clock(config: MachineConfig, clock: C) -> Self {
        let memory = Memory::with_rom_boundary(config.rom_boundary);
        let cpu = Cpu::with_io(memory, InvaderPorts::new(config.dip));
        let scheduler = Scheduler::new(clock)
            .with_max_catch_up_cycles(config.max_catch_up_cycles)
            .with_cycles_per_us(config.cycles_per_us);

        Self {
            cpu,
            scheduler,
            timer: timer_for(&config),
            sound: SoundLatch::default(),
            sound_events: Vec::new(),
            config,
        }
    }

    /// Copy a ROM image to address 0 and start execution there.
    pub fn load_rom(&mut self, rom: &[u8]) -> Result<(), CpuError> {
        self.cpu.load(rom)?;
        self.cpu.state.pc = 0x0000;
        log::info!("loaded {} byte ROM", rom.len());
        Ok(())
    }

    /// Reset the processor, ports and interrupt timer. Memory is kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
        if let Some(ports) = self.cpu.io_mut() {
            ports.reset();
        }
        self.timer = timer_for(&self.config);
        self.sound = SoundLatch::default();
        self.sound_events.clear();
    }

    /// Run one scheduler slice: either a due video interrupt or as many
    /// instructions as the elapsed time allows.
    ///
    /// On failure the machine is left as it was when the error occurred and
    /// the returned crash carries a snapshot of that state.
    pub fn tick(&mut self) -> Result<u32, MachineCrash> {
        let timer = &mut self.timer;
        match self.scheduler.start(&mut self.cpu, |now| timer.poll(now)) {
            Ok(cycles) => {
                self.latch_sound();
                Ok(cycles)
            }
            Err(error) => {
                log::error!("cpu failed: {} [{}]", error, self.cpu.state);
                Err(MachineCrash {
                    error,
                    snapshot: self.snapshot(),
                })
            }
        }
    }

    fn latch_sound(&mut self) {
        let (out3, out5) = self.outputs();
        for event in self.sound.update(out3, out5) {
            log::debug!("sound {:?} {}", event.effect, if event.on { "on" } else { "off" });
            self.sound_events.push(event);
        }
    }

    pub fn press(&mut self, button: Button, pressed: bool) {
        if let Some(ports) = self.cpu.io_mut() {
            ports.press(button, pressed);
        }
    }

    /// The 1-bit-per-pixel frame buffer, 0x2400..0x4000.
    pub fn video_memory(&self) -> &[u8] {
        &self.cpu.memory.as_slice()[VRAM_START..VRAM_END]
    }

    /// Last values written to `OUT 3` and `OUT 5`.
    pub fn outputs(&self) -> (u8, u8) {
        self.cpu.io().map_or((0, 0), InvaderPorts::outputs)
    }

    /// Sound switches seen since the last call.
    pub fn drain_sound_events(&mut self) -> Vec<SoundEvent> {
        std::mem::take(&mut self.sound_events)
    }

    pub fn cpu(&self) -> &Cpu<InvaderPorts> {
        &self.cpu
    }

    pub fn cpu_mut(&mut self) -> &mut Cpu<InvaderPorts> {
        &mut self.cpu
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        self.scheduler.clock()
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        let ports = self.cpu.io().cloned().unwrap_or_default();
        let (in_port1, in_port2) = ports.inputs();
        MachineSnapshot {
            cpu: self.cpu.snapshot(),
            shift: *ports.shift_register(),
            in_port1,
            in_port2,
        }
    }

    pub fn restore(&mut self, snapshot: &MachineSnapshot) {
        self.cpu.restore(&snapshot.cpu);
        if let Some(ports) = self.cpu.io_mut() {
            ports.restore(snapshot.shift, snapshot.in_port1, snapshot.in_port2);
        }
        log::info!("restored snapshot at pc=0x{:04X}", snapshot.cpu.pc);
    }
}

fn timer_for(config: &MachineConfig) -> InterruptTimer {
    InterruptTimer::new(config.first_interrupt_delay_us, config.interrupt_interval_us)
}
