//! Instruction catalog.
//!
//! Every documented 8080 opcode byte maps to exactly one [`OpCode`] value and
//! back. The twelve undefined bytes (0x08, 0x10, 0x18, 0x20, 0x28, 0x30,
//! 0x38, 0xCB, 0xD9, 0xDD, 0xED, 0xFD) do not decode.
//!
//! Decoding follows the usual octal split of the opcode byte:
//! `xx yyy zzz`, where `yyy` usually selects a destination register,
//! condition or ALU operation and `zzz` a source register.

use std::fmt;

use crate::flags::ConditionBits;

/// 8-bit operand encoded in three bits: B C D E H L M A.
///
/// `M` is the byte in memory addressed by HL.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operand {
    B,
    C,
    D,
    E,
    H,
    L,
    M,
    A,
}

impl Operand {
    const ALL: [Operand; 8] = [
        Operand::B,
        Operand::C,
        Operand::D,
        Operand::E,
        Operand::H,
        Operand::L,
        Operand::M,
        Operand::A,
    ];

    #[inline]
    fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    #[inline]
    fn bits(self) -> u8 {
        self as u8
    }

    fn name(self) -> &'static str {
        match self {
            Operand::B => "B",
            Operand::C => "C",
            Operand::D => "D",
            Operand::E => "E",
            Operand::H => "H",
            Operand::L => "L",
            Operand::M => "M",
            Operand::A => "A",
        }
    }
}

/// Register pair used by LXI, INX, DCX, DAD, STAX and LDAX.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegPair {
    BC,
    DE,
    HL,
    SP,
}

impl RegPair {
    #[inline]
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => RegPair::BC,
            1 => RegPair::DE,
            2 => RegPair::HL,
            _ => RegPair::SP,
        }
    }

    #[inline]
    fn bits(self) -> u8 {
        self as u8
    }

    fn name(self) -> &'static str {
        match self {
            RegPair::BC => "B",
            RegPair::DE => "D",
            RegPair::HL => "H",
            RegPair::SP => "SP",
        }
    }
}

/// Register pair used by PUSH and POP. PSW is A plus the packed flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StackPair {
    BC,
    DE,
    HL,
    PSW,
}

impl StackPair {
    #[inline]
    fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => StackPair::BC,
            1 => StackPair::DE,
            2 => StackPair::HL,
            _ => StackPair::PSW,
        }
    }

    #[inline]
    fn bits(self) -> u8 {
        self as u8
    }

    fn name(self) -> &'static str {
        match self {
            StackPair::BC => "B",
            StackPair::DE => "D",
            StackPair::HL => "H",
            StackPair::PSW => "PSW",
        }
    }
}

/// Branch condition. Each one tests a single flag against 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    NotZero,
    Zero,
    NoCarry,
    Carry,
    ParityOdd,
    ParityEven,
    Plus,
    Minus,
}

impl Condition {
    const ALL: [Condition; 8] = [
        Condition::NotZero,
        Condition::Zero,
        Condition::NoCarry,
        Condition::Carry,
        Condition::ParityOdd,
        Condition::ParityEven,
        Condition::Plus,
        Condition::Minus,
    ];

    #[inline]
    fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    #[inline]
    fn bits(self) -> u8 {
        self as u8
    }

    /// Whether the condition holds for the given flags.
    #[inline]
    pub fn holds(self, flags: &ConditionBits) -> bool {
        match self {
            Condition::NotZero => !flags.zero,
            Condition::Zero => flags.zero,
            Condition::NoCarry => !flags.carry,
            Condition::Carry => flags.carry,
            Condition::ParityOdd => !flags.parity,
            Condition::ParityEven => flags.parity,
            Condition::Plus => !flags.sign,
            Condition::Minus => flags.sign,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Condition::NotZero => "NZ",
            Condition::Zero => "Z",
            Condition::NoCarry => "NC",
            Condition::Carry => "C",
            Condition::ParityOdd => "PO",
            Condition::ParityEven => "PE",
            Condition::Plus => "P",
            Condition::Minus => "M",
        }
    }
}

/// Accumulator operation shared by the register (0x80..=0xBF) and immediate
/// (0xC6, 0xCE, ... 0xFE) groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbb,
    Ana,
    Xra,
    Ora,
    Cmp,
}

impl AluOp {
    const ALL: [AluOp; 8] = [
        AluOp::Add,
        AluOp::Adc,
        AluOp::Sub,
        AluOp::Sbb,
        AluOp::Ana,
        AluOp::Xra,
        AluOp::Ora,
        AluOp::Cmp,
    ];

    #[inline]
    fn from_bits(bits: u8) -> Self {
        Self::ALL[(bits & 0x07) as usize]
    }

    #[inline]
    fn bits(self) -> u8 {
        self as u8
    }

    fn register_mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADD",
            AluOp::Adc => "ADC",
            AluOp::Sub => "SUB",
            AluOp::Sbb => "SBB",
            AluOp::Ana => "ANA",
            AluOp::Xra => "XRA",
            AluOp::Ora => "ORA",
            AluOp::Cmp => "CMP",
        }
    }

    fn immediate_mnemonic(self) -> &'static str {
        match self {
            AluOp::Add => "ADI",
            AluOp::Adc => "ACI",
            AluOp::Sub => "SUI",
            AluOp::Sbb => "SBI",
            AluOp::Ana => "ANI",
            AluOp::Xra => "XRI",
            AluOp::Ora => "ORI",
            AluOp::Cmp => "CPI",
        }
    }
}

/// A decoded 8080 instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpCode {
    Nop,
    Lxi(RegPair),
    Stax(RegPair),
    Ldax(RegPair),
    Inx(RegPair),
    Dcx(RegPair),
    Dad(RegPair),
    Inr(Operand),
    Dcr(Operand),
    Mvi(Operand),
    Rlc,
    Rrc,
    Ral,
    Rar,
    Shld,
    Lhld,
    Daa,
    Cma,
    Sta,
    Lda,
    Stc,
    Cmc,
    Mov { dst: Operand, src: Operand },
    Hlt,
    Alu(AluOp, Operand),
    AluImm(AluOp),
    Ret,
    RetIf(Condition),
    Jmp,
    JmpIf(Condition),
    Call,
    CallIf(Condition),
    Pop(StackPair),
    Push(StackPair),
    /// Restart to vector 0 to 7 (address `8 * n`).
    Rst(u8),
    Out,
    In,
    Xthl,
    Pchl,
    Xchg,
    Di,
    Ei,
    Sphl,
}

impl OpCode {
    /// Decode an opcode byte. Returns `None` for the undefined bytes.
    pub fn decode(byte: u8) -> Option<OpCode> {
        let x = byte >> 6;
        let y = (byte >> 3) & 0x07;
        let z = byte & 0x07;
        let p = y >> 1;
        let q = y & 0x01;

        let op = match x {
            0 => match z {
                0 if y == 0 => OpCode::Nop,
                0 => return None,
                1 if q == 0 => OpCode::Lxi(RegPair::from_bits(p)),
                1 => OpCode::Dad(RegPair::from_bits(p)),
                2 => match (q, p) {
                    (0, 0 | 1) => OpCode::Stax(RegPair::from_bits(p)),
                    (0, 2) => OpCode::Shld,
                    (0, _) => OpCode::Sta,
                    (_, 0 | 1) => OpCode::Ldax(RegPair::from_bits(p)),
                    (_, 2) => OpCode::Lhld,
                    _ => OpCode::Lda,
                },
                3 if q == 0 => OpCode::Inx(RegPair::from_bits(p)),
                3 => OpCode::Dcx(RegPair::from_bits(p)),
                4 => OpCode::Inr(Operand::from_bits(y)),
                5 => OpCode::Dcr(Operand::from_bits(y)),
                6 => OpCode::Mvi(Operand::from_bits(y)),
                _ => match y {
                    0 => OpCode::Rlc,
                    1 => OpCode::Rrc,
                    2 => OpCode::Ral,
                    3 => OpCode::Rar,
                    4 => OpCode::Daa,
                    5 => OpCode::Cma,
                    6 => OpCode::Stc,
                    _ => OpCode::Cmc,
                },
            },
            1 if byte == 0x76 => OpCode::Hlt,
            1 => OpCode::Mov {
                dst: Operand::from_bits(y),
                src: Operand::from_bits(z),
            },
            2 => OpCode::Alu(AluOp::from_bits(y), Operand::from_bits(z)),
            _ => match z {
                0 => OpCode::RetIf(Condition::from_bits(y)),
                1 if q == 0 => OpCode::Pop(StackPair::from_bits(p)),
                1 => match p {
                    0 => OpCode::Ret,
                    1 => return None,
                    2 => OpCode::Pchl,
                    _ => OpCode::Sphl,
                },
                2 => OpCode::JmpIf(Condition::from_bits(y)),
                3 => match y {
                    0 => OpCode::Jmp,
                    1 => return None,
                    2 => OpCode::Out,
                    3 => OpCode::In,
                    4 => OpCode::Xthl,
                    5 => OpCode::Xchg,
                    6 => OpCode::Di,
                    _ => OpCode::Ei,
                },
                4 => OpCode::CallIf(Condition::from_bits(y)),
                5 if q == 0 => OpCode::Push(StackPair::from_bits(p)),
                5 if p == 0 => OpCode::Call,
                5 => return None,
                6 => OpCode::AluImm(AluOp::from_bits(y)),
                _ => OpCode::Rst(y),
            },
        };
        Some(op)
    }

    /// The byte this instruction is encoded as.
    pub fn byte(self) -> u8 {
        match self {
            OpCode::Nop => 0x00,
            OpCode::Lxi(rp) => 0x01 | rp.bits() << 4,
            OpCode::Stax(rp) => 0x02 | rp.bits() << 4,
            OpCode::Ldax(rp) => 0x0a | rp.bits() << 4,
            OpCode::Inx(rp) => 0x03 | rp.bits() << 4,
            OpCode::Dcx(rp) => 0x0b | rp.bits() << 4,
            OpCode::Dad(rp) => 0x09 | rp.bits() << 4,
            OpCode::Inr(r) => 0x04 | r.bits() << 3,
            OpCode::Dcr(r) => 0x05 | r.bits() << 3,
            OpCode::Mvi(r) => 0x06 | r.bits() << 3,
            OpCode::Rlc => 0x07,
            OpCode::Rrc => 0x0f,
            OpCode::Ral => 0x17,
            OpCode::Rar => 0x1f,
            OpCode::Shld => 0x22,
            OpCode::Lhld => 0x2a,
            OpCode::Daa => 0x27,
            OpCode::Cma => 0x2f,
            OpCode::Sta => 0x32,
            OpCode::Lda => 0x3a,
            OpCode::Stc => 0x37,
            OpCode::Cmc => 0x3f,
            OpCode::Mov { dst, src } => 0x40 | dst.bits() << 3 | src.bits(),
            OpCode::Hlt => 0x76,
            OpCode::Alu(alu, r) => 0x80 | alu.bits() << 3 | r.bits(),
            OpCode::AluImm(alu) => 0xc6 | alu.bits() << 3,
            OpCode::Ret => 0xc9,
            OpCode::RetIf(cc) => 0xc0 | cc.bits() << 3,
            OpCode::Jmp => 0xc3,
            OpCode::JmpIf(cc) => 0xc2 | cc.bits() << 3,
            OpCode::Call => 0xcd,
            OpCode::CallIf(cc) => 0xc4 | cc.bits() << 3,
            OpCode::Pop(sp) => 0xc1 | sp.bits() << 4,
            OpCode::Push(sp) => 0xc5 | sp.bits() << 4,
            OpCode::Rst(n) => 0xc7 | (n & 0x07) << 3,
            OpCode::Out => 0xd3,
            OpCode::In => 0xdb,
            OpCode::Xthl => 0xe3,
            OpCode::Pchl => 0xe9,
            OpCode::Xchg => 0xeb,
            OpCode::Di => 0xf3,
            OpCode::Ei => 0xfb,
            OpCode::Sphl => 0xf9,
        }
    }

    /// Encoded length in bytes, opcode included.
    pub fn length(self) -> u16 {
        match self {
            OpCode::Lxi(_)
            | OpCode::Shld
            | OpCode::Lhld
            | OpCode::Sta
            | OpCode::Lda
            | OpCode::Jmp
            | OpCode::JmpIf(_)
            | OpCode::Call
            | OpCode::CallIf(_) => 3,
            OpCode::Mvi(_) | OpCode::AluImm(_) | OpCode::Out | OpCode::In => 2,
            _ => 1,
        }
    }

    /// Base cycle cost.
    ///
    /// Conditional calls and returns are always charged their taken cost;
    /// real hardware charges fewer states when the branch is not taken.
    pub fn cycles(self) -> u32 {
        match self {
            OpCode::Nop => 4,
            OpCode::Lxi(_) => 10,
            OpCode::Stax(_) | OpCode::Ldax(_) => 7,
            OpCode::Inx(_) | OpCode::Dcx(_) => 5,
            OpCode::Dad(_) => 10,
            OpCode::Inr(Operand::M) | OpCode::Dcr(Operand::M) => 10,
            OpCode::Inr(_) | OpCode::Dcr(_) => 5,
            OpCode::Mvi(Operand::M) => 10,
            OpCode::Mvi(_) => 7,
            OpCode::Rlc | OpCode::Rrc | OpCode::Ral | OpCode::Rar => 4,
            OpCode::Shld | OpCode::Lhld => 16,
            OpCode::Daa | OpCode::Cma | OpCode::Stc | OpCode::Cmc => 4,
            OpCode::Sta | OpCode::Lda => 13,
            OpCode::Mov {
                dst: Operand::M, ..
            }
            | OpCode::Mov {
                src: Operand::M, ..
            } => 7,
            OpCode::Mov { .. } => 5,
            OpCode::Hlt => 7,
            OpCode::Alu(_, Operand::M) => 7,
            OpCode::Alu(_, _) => 4,
            OpCode::AluImm(_) => 7,
            OpCode::Ret => 10,
            OpCode::RetIf(_) => 11,
            OpCode::Jmp | OpCode::JmpIf(_) => 10,
            OpCode::Call | OpCode::CallIf(_) => 17,
            OpCode::Pop(_) => 10,
            OpCode::Push(_) => 11,
            OpCode::Rst(_) => 11,
            OpCode::Out | OpCode::In => 10,
            OpCode::Xthl => 18,
            OpCode::Pchl | OpCode::Sphl => 5,
            OpCode::Xchg | OpCode::Di | OpCode::Ei => 4,
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OpCode::Nop => write!(f, "NOP"),
            OpCode::Lxi(rp) => write!(f, "LXI {}", rp.name()),
            OpCode::Stax(rp) => write!(f, "STAX {}", rp.name()),
            OpCode::Ldax(rp) => write!(f, "LDAX {}", rp.name()),
            OpCode::Inx(rp) => write!(f, "INX {}", rp.name()),
            OpCode::Dcx(rp) => write!(f, "DCX {}", rp.name()),
            OpCode::Dad(rp) => write!(f, "DAD {}", rp.name()),
            OpCode::Inr(r) => write!(f, "INR {}", r.name()),
            OpCode::Dcr(r) => write!(f, "DCR {}", r.name()),
            OpCode::Mvi(r) => write!(f, "MVI {}", r.name()),
            OpCode::Rlc => write!(f, "RLC"),
            OpCode::Rrc => write!(f, "RRC"),
            OpCode::Ral => write!(f, "RAL"),
            OpCode::Rar => write!(f, "RAR"),
            OpCode::Shld => write!(f, "SHLD"),
            OpCode::Lhld => write!(f, "LHLD"),
            OpCode::Daa => write!(f, "DAA"),
            OpCode::Cma => write!(f, "CMA"),
            OpCode::Sta => write!(f, "STA"),
            OpCode::Lda => write!(f, "LDA"),
            OpCode::Stc => write!(f, "STC"),
            OpCode::Cmc => write!(f, "CMC"),
            OpCode::Mov { dst, src } => write!(f, "MOV {},{}", dst.name(), src.name()),
            OpCode::Hlt => write!(f, "HLT"),
            OpCode::Alu(alu, r) => write!(f, "{} {}", alu.register_mnemonic(), r.name()),
            OpCode::AluImm(alu) => write!(f, "{}", alu.immediate_mnemonic()),
            OpCode::Ret => write!(f, "RET"),
            OpCode::RetIf(cc) => write!(f, "R{}", cc.suffix()),
            OpCode::Jmp => write!(f, "JMP"),
            OpCode::JmpIf(cc) => write!(f, "J{}", cc.suffix()),
            OpCode::Call => write!(f, "CALL"),
            OpCode::CallIf(cc) => write!(f, "C{}", cc.suffix()),
            OpCode::Pop(sp) => write!(f, "POP {}", sp.name()),
            OpCode::Push(sp) => write!(f, "PUSH {}", sp.name()),
            OpCode::Rst(n) => write!(f, "RST {}", n),
            OpCode::Out => write!(f, "OUT"),
            OpCode::In => write!(f, "IN"),
            OpCode::Xthl => write!(f, "XTHL"),
            OpCode::Pchl => write!(f, "PCHL"),
            OpCode::Xchg => write!(f, "XCHG"),
            OpCode::Di => write!(f, "DI"),
            OpCode::Ei => write!(f, "EI"),
            OpCode::Sphl => write!(f, "SPHL"),
        }
    }
}
