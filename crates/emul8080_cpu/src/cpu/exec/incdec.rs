use crate::cpu::Cpu;
use crate::error::CpuError;
use crate::io::IoBus;
use crate::opcode::{Operand, RegPair};

impl<B: IoBus> Cpu<B> {
    // INX/DCX wrap and touch no flags.

    pub(super) fn exec_inx(&mut self, rp: RegPair) {
        let value = self.read_pair(rp).wrapping_add(1);
        self.write_pair(rp, value);
    }

    pub(super) fn exec_dcx(&mut self, rp: RegPair) {
        let value = self.read_pair(rp).wrapping_sub(1);
        self.write_pair(rp, value);
    }

    /// INR r/M. Carry is preserved.
    pub(super) fn exec_inr(&mut self, operand: Operand) -> Result<(), CpuError> {
        let value = self.read_operand(operand);
        let result = value.wrapping_add(1);
        self.write_operand(operand, result)?;
        self.state.flags.aux_carry = value & 0x0f == 0x0f;
        self.state.flags.update_zsp(result);
        Ok(())
    }

    /// DCR r/M. Carry is preserved.
    pub(super) fn exec_dcr(&mut self, operand: Operand) -> Result<(), CpuError> {
        let value = self.read_operand(operand);
        let result = value.wrapping_sub(1);
        self.write_operand(operand, result)?;
        self.state.flags.aux_carry = result & 0x0f != 0x0f;
        self.state.flags.update_zsp(result);
        Ok(())
    }
}
