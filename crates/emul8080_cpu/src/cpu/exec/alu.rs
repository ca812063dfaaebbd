use crate::cpu::Cpu;
use crate::io::IoBus;
use crate::opcode::{AluOp, OpCode, RegPair};

impl<B: IoBus> Cpu<B> {
    /// Shared body of the register, memory and immediate ALU forms.
    pub(super) fn alu(&mut self, op: AluOp, value: u8) {
        match op {
            AluOp::Add => self.alu_add(value, false),
            AluOp::Adc => self.alu_add(value, self.state.flags.carry),
            AluOp::Sub => self.state.regs.a = self.alu_sub(value, false),
            AluOp::Sbb => self.state.regs.a = self.alu_sub(value, self.state.flags.carry),
            AluOp::Ana => self.alu_and(value),
            AluOp::Xra => self.alu_logic(self.state.regs.a ^ value),
            AluOp::Ora => self.alu_logic(self.state.regs.a | value),
            AluOp::Cmp => {
                self.alu_sub(value, false);
            }
        }
    }

    fn alu_add(&mut self, value: u8, carry_in: bool) {
        let a = self.state.regs.a;
        let c = carry_in as u8;
        let sum = a as u16 + value as u16 + c as u16;
        let result = sum as u8;

        self.state.flags.aux_carry = (a & 0x0f) + (value & 0x0f) + c > 0x0f;
        self.state.flags.update_arithmetic_zspc(result, sum > 0xff);
        self.state.regs.a = result;
    }

    /// `a - value - borrow_in`, setting flags. The accumulator is left for
    /// the caller so `CMP` can discard the result.
    fn alu_sub(&mut self, value: u8, borrow_in: bool) -> u8 {
        let a = self.state.regs.a;
        let b = borrow_in as u8;
        let result = a.wrapping_sub(value).wrapping_sub(b);
        let borrow = (a as u16) < value as u16 + b as u16;

        // Subtraction adds the complement, so AC is set when the low nibble
        // does not borrow.
        self.state.flags.aux_carry = (a & 0x0f) >= (value & 0x0f) + b;
        self.state.flags.update_arithmetic_zspc(result, borrow);
        result
    }

    fn alu_and(&mut self, value: u8) {
        let a = self.state.regs.a;
        // AND copies bit 3 of either operand into AC.
        self.state.flags.aux_carry = (a | value) & 0x08 != 0;
        self.state.regs.a = a & value;
        self.state.flags.update_logic_zspc(self.state.regs.a);
    }

    fn alu_logic(&mut self, result: u8) {
        self.state.flags.aux_carry = false;
        self.state.regs.a = result;
        self.state.flags.update_logic_zspc(result);
    }

    pub(super) fn exec_dad(&mut self, rp: RegPair) {
        let (result, overflow) = self.state.regs.hl().overflowing_add(self.read_pair(rp));
        self.state.regs.set_hl(result);
        self.state.flags.carry = overflow;
    }

    /// Decimal adjust: correct each nibble of A back into BCD.
    pub(super) fn exec_daa(&mut self) {
        let mut a = self.state.regs.a;
        let mut carry = self.state.flags.carry;

        if a & 0x0f > 9 || self.state.flags.aux_carry {
            self.state.flags.aux_carry = (a & 0x0f) + 0x06 > 0x0f;
            let (adjusted, overflow) = a.overflowing_add(0x06);
            a = adjusted;
            carry |= overflow;
        } else {
            self.state.flags.aux_carry = false;
        }

        if a >> 4 > 9 || carry {
            let (adjusted, overflow) = a.overflowing_add(0x60);
            a = adjusted;
            carry |= overflow;
        }

        self.state.regs.a = a;
        self.state.flags.update_arithmetic_zspc(a, carry);
    }

    pub(super) fn exec_rotate_a(&mut self, op: OpCode) {
        let a = self.state.regs.a;
        let carry = self.state.flags.carry as u8;

        let (result, carry_out) = match op {
            // RLC: bit 7 to carry and bit 0.
            OpCode::Rlc => (a.rotate_left(1), a & 0x80 != 0),
            // RRC: bit 0 to carry and bit 7.
            OpCode::Rrc => (a.rotate_right(1), a & 0x01 != 0),
            // RAL: rotate left through carry.
            OpCode::Ral => ((a << 1) | carry, a & 0x80 != 0),
            // RAR: rotate right through carry.
            OpCode::Rar => ((a >> 1) | (carry << 7), a & 0x01 != 0),
            _ => unreachable!("not an accumulator rotate: {}", op),
        };

        self.state.regs.a = result;
        self.state.flags.carry = carry_out;
    }
}
