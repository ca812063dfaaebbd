mod exec;

use std::convert::Infallible;

use crate::error::CpuError;
use crate::io::IoBus;
use crate::memory::Memory;
use crate::opcode::OpCode;
use crate::snapshot::CpuSnapshot;
use crate::state::ProcessorState;

use exec::Flow;

/// Intel 8080 interpreter.
///
/// The CPU owns its register file and its memory outright. Port I/O goes
/// through an [`IoBus`] capability attached by the owning machine; `B`
/// defaults to a boxed trait object so a bare CPU can be built without
/// naming a bus type.
pub struct Cpu<B = Box<dyn IoBus>> {
    pub state: ProcessorState,
    pub memory: Memory,
    io: Option<B>,
}

impl Cpu {
    /// A CPU with no I/O bus attached. `IN`/`OUT` fail with
    /// [`CpuError::MissingIoHandler`] until one is attached.
    pub fn new(memory: Memory) -> Self {
        Self {
            state: ProcessorState::new(),
            memory,
            io: None,
        }
    }
}

impl<B: IoBus> Cpu<B> {
    pub fn with_io(memory: Memory, io: B) -> Self {
        Self {
            state: ProcessorState::new(),
            memory,
            io: Some(io),
        }
    }

    pub fn attach_io(&mut self, io: B) {
        self.io = Some(io);
    }

    pub fn io(&self) -> Option<&B> {
        self.io.as_ref()
    }

    pub fn io_mut(&mut self) -> Option<&mut B> {
        self.io.as_mut()
    }

    /// Copy a ROM image into memory at address 0.
    pub fn load(&mut self, image: &[u8]) -> Result<(), CpuError> {
        self.memory.load(image)
    }

    /// Reset registers, flags and the interrupt latch. Memory is kept.
    pub fn reset(&mut self) {
        self.state = ProcessorState::new();
    }

    /// Fetch, decode and execute one instruction, returning its cycle cost.
    pub fn execute(&mut self) -> Result<u32, CpuError> {
        self.step().map(|(cycles, _)| cycles)
    }

    /// Like [`execute`](Self::execute), but also reports whether falling
    /// through to the next instruction carried `pc` past 0xFFFF.
    fn step(&mut self) -> Result<(u32, bool), CpuError> {
        let pc = self.state.pc;
        let byte = self.memory.read(pc);
        let op = OpCode::decode(byte).ok_or(CpuError::UnknownOpcode(byte))?;

        log::trace!("{:04x}: {:02x} {} [{}]", pc, byte, op, self.state);

        let mut wrapped = false;
        if let Flow::Next = self.dispatch(op)? {
            let (next, overflow) = pc.overflowing_add(op.length());
            self.state.pc = next;
            wrapped = overflow;
        }
        Ok((op.cycles(), wrapped))
    }

    /// Run until the program counter leaves the loaded image.
    ///
    /// This loop only ever ends in an error: [`CpuError::ProgramTerminated`]
    /// once `pc` reaches the end of the most recent load, or whatever error
    /// an instruction raised before that. Running sequentially off the top
    /// of the address space also counts as reaching the end.
    pub fn run(&mut self) -> Result<Infallible, CpuError> {
        loop {
            if self.state.pc as usize >= self.memory.program_end() {
                return Err(CpuError::ProgramTerminated);
            }
            let (_, wrapped) = self.step()?;
            if wrapped {
                return Err(CpuError::ProgramTerminated);
            }
        }
    }

    /// Request a hardware interrupt.
    ///
    /// Ignored while the interrupt-enable latch is clear. Otherwise the
    /// latch is cleared, the current `pc` is pushed and execution continues
    /// at `8 * vector`. Returns whether the interrupt was taken.
    pub fn interrupt(&mut self, vector: u8) -> Result<bool, CpuError> {
        if !self.state.inte {
            log::debug!("interrupt {} ignored, interrupts disabled", vector);
            return Ok(false);
        }

        self.state.inte = false;
        self.push_word(self.state.pc)?;
        self.state.pc = u16::from(vector) * 8;
        log::debug!("interrupt {} taken, jumping to {:04x}", vector, self.state.pc);
        Ok(true)
    }

    pub fn snapshot(&self) -> CpuSnapshot {
        CpuSnapshot {
            memory: self.memory.image(),
            regs: self.state.regs,
            flags: self.state.flags,
            pc: self.state.pc,
            sp: self.state.sp,
            inte: self.state.inte,
        }
    }

    /// Put memory and processor state back to a snapshot. ROM protection
    /// does not apply to a restore, and the whole restored image counts as
    /// loaded program for [`run`](Self::run).
    pub fn restore(&mut self, snapshot: &CpuSnapshot) {
        self.memory.restore(&snapshot.memory);
        self.state = ProcessorState {
            regs: snapshot.regs,
            sp: snapshot.sp,
            pc: snapshot.pc,
            flags: snapshot.flags,
            inte: snapshot.inte,
        };
    }
}
