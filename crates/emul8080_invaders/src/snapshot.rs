//! Whole-machine save state: the CPU image followed by the peripheral bytes.
//!
//! Trailing layout after [`CpuSnapshot`]: shift x, shift y, shift offset,
//! input port 1, input port 2. One byte each.

use emul8080_cpu::{CpuSnapshot, SnapshotError};

use crate::shift_register::ShiftRegister;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MachineSnapshot {
    pub cpu: CpuSnapshot,
    pub shift: ShiftRegister,
    pub in_port1: u8,
    pub in_port2: u8,
}

impl MachineSnapshot {
    const PERIPHERAL_SIZE: usize = 5;

    /// Serialized size in bytes.
    pub const SIZE: usize = CpuSnapshot::SIZE + Self::PERIPHERAL_SIZE;

    pub fn serialize(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::SIZE);
        self.cpu.write_to(&mut data);
        data.extend_from_slice(&[
            self.shift.x(),
            self.shift.y(),
            self.shift.offset(),
            self.in_port1,
            self.in_port2,
        ]);
        data
    }

    pub fn deserialize(data: &[u8]) -> Result<Self, SnapshotError> {
        if data.len() < Self::SIZE {
            return Err(SnapshotError::Truncated {
                expected: Self::SIZE,
                actual: data.len(),
            });
        }

        let (cpu, rest) = CpuSnapshot::read_prefix(data)?;
        Ok(Self {
            cpu,
            shift: ShiftRegister::from_parts(rest[0], rest[1], rest[2]),
            in_port1: rest[3],
            in_port2: rest[4],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emul8080_cpu::{Cpu, Memory};

    fn sample() -> MachineSnapshot {
        let mut cpu = Cpu::new(Memory::new());
        cpu.state.pc = 0x18d4;
        cpu.state.sp = 0x2400;
        cpu.memory.write(0x2400, 0x77).unwrap();

        let mut shift = ShiftRegister::new();
        shift.shift_in(0x12);
        shift.shift_in(0x34);
        shift.set_offset(5);

        MachineSnapshot {
            cpu: cpu.snapshot(),
            shift,
            in_port1: 0x09,
            in_port2: 0x83,
        }
    }

    #[test]
    fn peripheral_bytes_follow_the_cpu_image() {
        let data = sample().serialize();
        assert_eq!(data.len(), MachineSnapshot::SIZE);
        assert_eq!(&data[CpuSnapshot::SIZE..], &[0x34, 0x12, 5, 0x09, 0x83]);
    }

    #[test]
    fn decodes_what_it_encodes() {
        let snapshot = sample();
        let decoded = MachineSnapshot::deserialize(&snapshot.serialize()).unwrap();
        assert_eq!(decoded, snapshot);
        assert_eq!(decoded.cpu.memory[0x2400], 0x77);
    }

    #[test]
    fn missing_peripheral_bytes_are_truncation() {
        let data = sample().serialize();
        let short = &data[..CpuSnapshot::SIZE + 2];
        assert_eq!(
            MachineSnapshot::deserialize(short),
            Err(SnapshotError::Truncated {
                expected: MachineSnapshot::SIZE,
                actual: CpuSnapshot::SIZE + 2,
            })
        );
    }
}
