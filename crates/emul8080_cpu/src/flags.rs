use bitflags::bitflags;

bitflags! {
    /// Packed flag byte as pushed by `PUSH PSW`.
    ///
    /// Layout (MSB to LSB): S Z 0 AC 0 P 1 CY.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Psw: u8 {
        const SIGN = 0x80;
        const ZERO = 0x40;
        const AUX_CARRY = 0x10;
        const PARITY = 0x04;
        /// Bit 1 always reads as one.
        const ALWAYS_ONE = 0x02;
        const CARRY = 0x01;
    }
}

/// The five 8080 condition bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConditionBits {
    pub zero: bool,
    pub sign: bool,
    pub parity: bool,
    pub carry: bool,
    pub aux_carry: bool,
}

impl ConditionBits {
    pub fn to_byte(self) -> u8 {
        let mut psw = Psw::ALWAYS_ONE;
        psw.set(Psw::SIGN, self.sign);
        psw.set(Psw::ZERO, self.zero);
        psw.set(Psw::AUX_CARRY, self.aux_carry);
        psw.set(Psw::PARITY, self.parity);
        psw.set(Psw::CARRY, self.carry);
        psw.bits()
    }

    pub fn from_byte(byte: u8) -> Self {
        let psw = Psw::from_bits_truncate(byte);
        Self {
            zero: psw.contains(Psw::ZERO),
            sign: psw.contains(Psw::SIGN),
            parity: psw.contains(Psw::PARITY),
            carry: psw.contains(Psw::CARRY),
            aux_carry: psw.contains(Psw::AUX_CARRY),
        }
    }

    /// Zero, sign and parity from an 8-bit result. Carry and auxiliary carry
    /// are left untouched.
    #[inline]
    pub fn update_zsp(&mut self, value: u8) {
        self.zero = value == 0;
        self.sign = value & 0x80 != 0;
        self.parity = parity(value);
    }

    /// ZSP plus carry taken from the add/subtract overflow.
    #[inline]
    pub fn update_arithmetic_zspc(&mut self, value: u8, overflow: bool) {
        self.update_zsp(value);
        self.carry = overflow;
    }

    /// ZSP with carry forced clear; logical operations never carry.
    #[inline]
    pub fn update_logic_zspc(&mut self, value: u8) {
        self.update_zsp(value);
        self.carry = false;
    }
}

/// Even parity over exactly eight bits.
#[inline]
pub fn parity(value: u8) -> bool {
    value.count_ones() % 2 == 0
}
