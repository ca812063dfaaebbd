use crate::flags::ConditionBits;

/// The seven 8-bit general registers.
///
/// Pairs are views: BC, DE and HL use the first-named register as the
/// high byte. HL doubles as the memory pointer `M`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
}

impl Registers {
    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }
}

/// Everything the 8080 carries between instructions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessorState {
    pub regs: Registers,
    pub sp: u16,
    pub pc: u16,
    pub flags: ConditionBits,
    /// Interrupt-enable latch (`EI`/`DI`).
    pub inte: bool,
}

impl ProcessorState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for ProcessorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = &self.regs;
        write!(
            f,
            "pc={:04x} sp={:04x} a={:02x} bc={:04x} de={:04x} hl={:04x} f={:02x} inte={}",
            self.pc,
            self.sp,
            r.a,
            r.bc(),
            r.de(),
            r.hl(),
            self.flags.to_byte(),
            self.inte as u8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_use_first_register_as_high_byte() {
        let mut regs = Registers::default();
        regs.set_bc(0x1234);
        assert_eq!((regs.b, regs.c), (0x12, 0x34));
        regs.set_de(0xabcd);
        assert_eq!((regs.d, regs.e), (0xab, 0xcd));
        regs.h = 0x20;
        regs.l = 0x01;
        assert_eq!(regs.hl(), 0x2001);
    }
}
