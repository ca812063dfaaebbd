use crate::cpu::Cpu;
use crate::error::CpuError;
use crate::flags::ConditionBits;
use crate::io::IoBus;
use crate::opcode::StackPair;

impl<B: IoBus> Cpu<B> {
    /// Push two bytes: `high` lands at SP-1, `low` at SP-2, then SP -= 2.
    pub(crate) fn push(&mut self, high: u8, low: u8) -> Result<(), CpuError> {
        let sp = self.state.sp;
        self.memory.write(sp.wrapping_sub(1), high)?;
        self.memory.write(sp.wrapping_sub(2), low)?;
        self.state.sp = sp.wrapping_sub(2);
        Ok(())
    }

    /// Pop two bytes as `(high, low)`: low from SP, high from SP+1.
    pub(crate) fn pop(&mut self) -> (u8, u8) {
        let sp = self.state.sp;
        let low = self.memory.read(sp);
        let high = self.memory.read(sp.wrapping_add(1));
        self.state.sp = sp.wrapping_add(2);
        (high, low)
    }

    pub(crate) fn push_word(&mut self, value: u16) -> Result<(), CpuError> {
        let [high, low] = value.to_be_bytes();
        self.push(high, low)
    }

    pub(crate) fn pop_word(&mut self) -> u16 {
        let (high, low) = self.pop();
        u16::from_be_bytes([high, low])
    }

    pub(super) fn exec_push(&mut self, pair: StackPair) -> Result<(), CpuError> {
        let r = &self.state.regs;
        let (high, low) = match pair {
            StackPair::BC => (r.b, r.c),
            StackPair::DE => (r.d, r.e),
            StackPair::HL => (r.h, r.l),
            StackPair::PSW => (r.a, self.state.flags.to_byte()),
        };
        self.push(high, low)
    }

    pub(super) fn exec_pop(&mut self, pair: StackPair) {
        let (high, low) = self.pop();
        let r = &mut self.state.regs;
        match pair {
            StackPair::BC => (r.b, r.c) = (high, low),
            StackPair::DE => (r.d, r.e) = (high, low),
            StackPair::HL => (r.h, r.l) = (high, low),
            StackPair::PSW => {
                r.a = high;
                self.state.flags = ConditionBits::from_byte(low);
            }
        }
    }

    /// Swap HL with the word on top of the stack.
    pub(super) fn exec_xthl(&mut self) -> Result<(), CpuError> {
        let sp = self.state.sp;
        let low = self.memory.read(sp);
        let high = self.memory.read(sp.wrapping_add(1));
        self.memory.write(sp, self.state.regs.l)?;
        self.memory.write(sp.wrapping_add(1), self.state.regs.h)?;
        self.state.regs.l = low;
        self.state.regs.h = high;
        Ok(())
    }
}
