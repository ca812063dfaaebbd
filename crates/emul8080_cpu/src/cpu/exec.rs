mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::Cpu;
use crate::error::CpuError;
use crate::io::IoBus;
use crate::opcode::{OpCode, Operand, RegPair};

/// What the dispatcher did with the program counter.
pub(super) enum Flow {
    /// Advance `pc` past the instruction.
    Next,
    /// The instruction already set `pc`.
    Jumped,
}

impl<B: IoBus> Cpu<B> {
    /// Execute one decoded instruction. `pc` still points at its opcode.
    pub(super) fn dispatch(&mut self, op: OpCode) -> Result<Flow, CpuError> {
        match op {
            OpCode::Nop => {}

            // Data transfer
            OpCode::Lxi(rp) => self.exec_lxi(rp),
            OpCode::Stax(rp) => self.exec_stax(rp)?,
            OpCode::Ldax(rp) => self.exec_ldax(rp),
            OpCode::Mvi(dst) => self.exec_mvi(dst)?,
            OpCode::Mov { dst, src } => self.exec_mov(dst, src)?,
            OpCode::Sta => self.exec_sta()?,
            OpCode::Lda => self.exec_lda(),
            OpCode::Shld => self.exec_shld()?,
            OpCode::Lhld => self.exec_lhld(),
            OpCode::Xchg => self.exec_xchg(),

            // Increment / decrement
            OpCode::Inx(rp) => self.exec_inx(rp),
            OpCode::Dcx(rp) => self.exec_dcx(rp),
            OpCode::Inr(operand) => self.exec_inr(operand)?,
            OpCode::Dcr(operand) => self.exec_dcr(operand)?,

            // Arithmetic and logic
            OpCode::Alu(alu, src) => {
                let value = self.read_operand(src);
                self.alu(alu, value);
            }
            OpCode::AluImm(alu) => {
                let value = self.imm8();
                self.alu(alu, value);
            }
            OpCode::Dad(rp) => self.exec_dad(rp),
            OpCode::Daa => self.exec_daa(),
            OpCode::Rlc | OpCode::Rrc | OpCode::Ral | OpCode::Rar => self.exec_rotate_a(op),
            OpCode::Cma => self.state.regs.a = !self.state.regs.a,
            OpCode::Stc => self.state.flags.carry = true,
            OpCode::Cmc => self.state.flags.carry = !self.state.flags.carry,

            // Branching
            OpCode::Jmp => return Ok(self.jump()),
            OpCode::JmpIf(cond) => {
                if cond.holds(&self.state.flags) {
                    return Ok(self.jump());
                }
            }
            OpCode::Call => return self.call(),
            OpCode::CallIf(cond) => {
                if cond.holds(&self.state.flags) {
                    return self.call();
                }
            }
            OpCode::Ret => return Ok(self.ret()),
            OpCode::RetIf(cond) => {
                if cond.holds(&self.state.flags) {
                    return Ok(self.ret());
                }
            }
            OpCode::Rst(n) => return self.rst(n),
            OpCode::Pchl => {
                self.state.pc = self.state.regs.hl();
                return Ok(Flow::Jumped);
            }

            // Stack
            OpCode::Push(pair) => self.exec_push(pair)?,
            OpCode::Pop(pair) => self.exec_pop(pair),
            OpCode::Xthl => self.exec_xthl()?,
            OpCode::Sphl => self.state.sp = self.state.regs.hl(),

            // Machine control and I/O
            OpCode::In => self.exec_in()?,
            OpCode::Out => self.exec_out()?,
            OpCode::Ei => self.state.inte = true,
            OpCode::Di => self.state.inte = false,
            OpCode::Hlt => return Err(CpuError::UnhandledOperation(op)),
        }

        Ok(Flow::Next)
    }

    /// The byte following the opcode.
    #[inline]
    fn imm8(&self) -> u8 {
        self.memory.read(self.state.pc.wrapping_add(1))
    }

    /// The little-endian word following the opcode.
    #[inline]
    fn imm16(&self) -> u16 {
        self.memory.read_word(self.state.pc.wrapping_add(1))
    }

    /// Register or `M` (the byte at HL).
    fn read_operand(&self, operand: Operand) -> u8 {
        let r = &self.state.regs;
        match operand {
            Operand::B => r.b,
            Operand::C => r.c,
            Operand::D => r.d,
            Operand::E => r.e,
            Operand::H => r.h,
            Operand::L => r.l,
            Operand::M => self.memory.read(r.hl()),
            Operand::A => r.a,
        }
    }

    fn write_operand(&mut self, operand: Operand, value: u8) -> Result<(), CpuError> {
        let r = &mut self.state.regs;
        match operand {
            Operand::B => r.b = value,
            Operand::C => r.c = value,
            Operand::D => r.d = value,
            Operand::E => r.e = value,
            Operand::H => r.h = value,
            Operand::L => r.l = value,
            Operand::M => {
                let addr = r.hl();
                self.memory.write(addr, value)?;
            }
            Operand::A => r.a = value,
        }
        Ok(())
    }

    fn read_pair(&self, rp: RegPair) -> u16 {
        match rp {
            RegPair::BC => self.state.regs.bc(),
            RegPair::DE => self.state.regs.de(),
            RegPair::HL => self.state.regs.hl(),
            RegPair::SP => self.state.sp,
        }
    }

    fn write_pair(&mut self, rp: RegPair, value: u16) {
        match rp {
            RegPair::BC => self.state.regs.set_bc(value),
            RegPair::DE => self.state.regs.set_de(value),
            RegPair::HL => self.state.regs.set_hl(value),
            RegPair::SP => self.state.sp = value,
        }
    }
}
