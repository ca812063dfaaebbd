use super::Flow;
use crate::cpu::Cpu;
use crate::error::CpuError;
use crate::io::IoBus;
use crate::opcode::OpCode;

impl<B: IoBus> Cpu<B> {
    pub(super) fn jump(&mut self) -> Flow {
        self.state.pc = self.imm16();
        Flow::Jumped
    }

    /// Push the address of the next instruction and jump to the operand.
    pub(super) fn call(&mut self) -> Result<Flow, CpuError> {
        let target = self.imm16();
        let return_addr = self.state.pc.wrapping_add(OpCode::Call.length());
        self.push_word(return_addr)?;
        self.state.pc = target;
        Ok(Flow::Jumped)
    }

    pub(super) fn ret(&mut self) -> Flow {
        self.state.pc = self.pop_word();
        Flow::Jumped
    }

    /// `RST n`: a one-byte call to `8 * n`.
    pub(super) fn rst(&mut self, n: u8) -> Result<Flow, CpuError> {
        let return_addr = self.state.pc.wrapping_add(1);
        self.push_word(return_addr)?;
        self.state.pc = u16::from(n) * 8;
        Ok(Flow::Jumped)
    }
}
