/// The board's 16-bit barrel shifter.
///
/// Writing a byte shifts it into the high half of a 16-bit window and
/// pushes the previous high byte down. Reading returns the 8 bits that sit
/// `offset` bits below the top of the window. The game uses it to draw
/// sprites at arbitrary horizontal pixel positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShiftRegister {
    /// Most recently written byte.
    x: u8,
    /// The byte written before `x`.
    y: u8,
    offset: u8,
}

impl ShiftRegister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a register from saved state. Only the low 3 bits of `offset`
    /// are kept.
    pub fn from_parts(x: u8, y: u8, offset: u8) -> Self {
        Self {
            x,
            y,
            offset: offset & 0x07,
        }
    }

    /// `OUT 4`
    pub fn shift_in(&mut self, value: u8) {
        self.y = self.x;
        self.x = value;
    }

    /// `OUT 2`
    pub fn set_offset(&mut self, value: u8) {
        self.offset = value & 0x07;
    }

    /// `IN 3`
    pub fn result(&self) -> u8 {
        let window = u16::from_be_bytes([self.x, self.y]);
        (window >> (8 - self.offset)) as u8
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    pub fn offset(&self) -> u8 {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_zero_reads_the_newest_byte() {
        let mut shift = ShiftRegister::new();
        shift.shift_in(0xaa);
        shift.shift_in(0xff);
        shift.set_offset(0);
        assert_eq!(shift.result(), 0xff);
    }

    #[test]
    fn offset_seven_pulls_in_the_previous_byte() {
        let mut shift = ShiftRegister::new();
        shift.shift_in(0xaa);
        shift.shift_in(0xff);
        shift.set_offset(7);
        // Low bit of 0xff followed by the top seven bits of 0xaa.
        assert_eq!(shift.result(), 0xd5);
    }

    #[test]
    fn offset_ignores_high_bits() {
        let mut shift = ShiftRegister::new();
        shift.set_offset(0xfb);
        assert_eq!(shift.offset(), 3);
    }

    #[test]
    fn single_write_slides_out_from_the_top() {
        let mut shift = ShiftRegister::new();
        shift.shift_in(0x81);
        assert_eq!(shift.result(), 0x81);
        shift.set_offset(4);
        assert_eq!(shift.result(), 0x10);
        assert_eq!((shift.x(), shift.y()), (0x81, 0x00));
    }
}
