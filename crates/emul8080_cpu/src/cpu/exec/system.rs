use crate::cpu::Cpu;
use crate::error::CpuError;
use crate::io::IoBus;

impl<B: IoBus> Cpu<B> {
    pub(super) fn exec_in(&mut self) -> Result<(), CpuError> {
        let port = self.imm8();
        let io = self.io.as_mut().ok_or(CpuError::MissingIoHandler)?;
        self.state.regs.a = io.machine_in(port);
        Ok(())
    }

    pub(super) fn exec_out(&mut self) -> Result<(), CpuError> {
        let port = self.imm8();
        let value = self.state.regs.a;
        let io = self.io.as_mut().ok_or(CpuError::MissingIoHandler)?;
        io.machine_out(port, value);
        Ok(())
    }
}
