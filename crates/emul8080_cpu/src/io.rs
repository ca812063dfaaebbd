/// Port-mapped I/O as seen from the CPU.
///
/// The core never implements port semantics itself: `IN` and `OUT` call
/// through this trait into whatever the owning machine attached.
pub trait IoBus {
    /// `IN port`: the returned byte lands in the accumulator.
    fn machine_in(&mut self, port: u8) -> u8;
    /// `OUT port`: `value` is the accumulator.
    fn machine_out(&mut self, port: u8, value: u8);
}

impl<T: IoBus + ?Sized> IoBus for Box<T> {
    fn machine_in(&mut self, port: u8) -> u8 {
        (**self).machine_in(port)
    }

    fn machine_out(&mut self, port: u8, value: u8) {
        (**self).machine_out(port, value)
    }
}
