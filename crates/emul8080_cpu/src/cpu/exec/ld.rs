use crate::cpu::Cpu;
use crate::error::CpuError;
use crate::io::IoBus;
use crate::opcode::{Operand, RegPair};

impl<B: IoBus> Cpu<B> {
    pub(super) fn exec_lxi(&mut self, rp: RegPair) {
        let value = self.imm16();
        self.write_pair(rp, value);
    }

    pub(super) fn exec_stax(&mut self, rp: RegPair) -> Result<(), CpuError> {
        let addr = self.read_pair(rp);
        self.memory.write(addr, self.state.regs.a)
    }

    pub(super) fn exec_ldax(&mut self, rp: RegPair) {
        self.state.regs.a = self.memory.read(self.read_pair(rp));
    }

    pub(super) fn exec_mvi(&mut self, dst: Operand) -> Result<(), CpuError> {
        let value = self.imm8();
        self.write_operand(dst, value)
    }

    pub(super) fn exec_mov(&mut self, dst: Operand, src: Operand) -> Result<(), CpuError> {
        let value = self.read_operand(src);
        self.write_operand(dst, value)
    }

    pub(super) fn exec_sta(&mut self) -> Result<(), CpuError> {
        let addr = self.imm16();
        self.memory.write(addr, self.state.regs.a)
    }

    pub(super) fn exec_lda(&mut self) {
        self.state.regs.a = self.memory.read(self.imm16());
    }

    /// `SHLD addr`: L to `addr`, H to `addr + 1`.
    pub(super) fn exec_shld(&mut self) -> Result<(), CpuError> {
        let addr = self.imm16();
        self.memory.write(addr, self.state.regs.l)?;
        self.memory.write(addr.wrapping_add(1), self.state.regs.h)
    }

    pub(super) fn exec_lhld(&mut self) {
        let addr = self.imm16();
        self.state.regs.l = self.memory.read(addr);
        self.state.regs.h = self.memory.read(addr.wrapping_add(1));
    }

    pub(super) fn exec_xchg(&mut self) {
        let r = &mut self.state.regs;
        std::mem::swap(&mut r.d, &mut r.h);
        std::mem::swap(&mut r.e, &mut r.l);
    }
}
