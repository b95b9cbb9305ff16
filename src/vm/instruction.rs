// VM Instruction set: opcode table, operand-count encoding, decoded instructions

use super::error::VMFault;
use super::memory::Memory;
use super::registers::Register;
use std::fmt;

/// Low six bits of an opcode byte select the operation
const IDENTITY_MASK: u8 = 0b0011_1111;
/// High two bits of an opcode byte hold the number of operand bytes
const OPERAND_SHIFT: u32 = 6;

/// Number of operand bytes following an opcode byte
pub fn operand_count(byte: u8) -> usize {
    (byte >> OPERAND_SHIFT) as usize
}

/// Total bytes occupied by the instruction starting with `byte` (1, 2 or 3)
pub fn instruction_width(byte: u8) -> usize {
    operand_count(byte) + 1
}

/// The closed set of opcodes understood by the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    Hlt = 0b0000_0001,
    Ret = 0b0001_0001,
    Push = 0b0100_0101,
    Pop = 0b0100_0110,
    Prn = 0b0100_0111,
    Call = 0b0101_0000,
    Ldi = 0b1000_0010,
    Add = 0b1010_0000,
    Sub = 0b1010_0001,
    Mul = 0b1010_0010,
}

impl Opcode {
    pub const ALL: [Opcode; 10] = [
        Opcode::Hlt,
        Opcode::Ret,
        Opcode::Push,
        Opcode::Pop,
        Opcode::Prn,
        Opcode::Call,
        Opcode::Ldi,
        Opcode::Add,
        Opcode::Sub,
        Opcode::Mul,
    ];

    /// Full encoded byte
    pub fn byte(self) -> u8 {
        self as u8
    }

    /// Operation identity, ignoring the operand-count bits
    pub fn identity(self) -> u8 {
        self.byte() & IDENTITY_MASK
    }

    pub fn operand_count(self) -> usize {
        operand_count(self.byte())
    }

    pub fn width(self) -> usize {
        instruction_width(self.byte())
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Hlt => "HLT",
            Opcode::Ret => "RET",
            Opcode::Push => "PUSH",
            Opcode::Pop => "POP",
            Opcode::Prn => "PRN",
            Opcode::Call => "CALL",
            Opcode::Ldi => "LDI",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
        }
    }

    /// Look up an opcode byte. The identity bits pick the table entry and the
    /// encoded operand count must agree with that entry's arity.
    pub fn decode(byte: u8) -> Option<Opcode> {
        let identity = byte & IDENTITY_MASK;
        Opcode::ALL
            .iter()
            .copied()
            .find(|op| op.identity() == identity)
            .filter(|op| op.operand_count() == operand_count(byte))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// A decoded instruction with typed operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    // Register ops
    Ldi(Register, u8),
    // Output
    Prn(Register),
    // ALU ops, result into the first register
    Add(Register, Register),
    Sub(Register, Register),
    Mul(Register, Register),
    // Stack ops
    Push(Register),
    Pop(Register),
    // Control flow
    Call(Register),
    Ret,
    Hlt,
}

impl Instruction {
    /// Fetch and decode the instruction starting at `pc`
    pub fn fetch(memory: &Memory, pc: usize) -> Result<Instruction, VMFault> {
        let byte = memory.read(pc)?;
        let opcode = Opcode::decode(byte).ok_or(VMFault::UnknownOpcode {
            opcode: byte,
            address: pc,
        })?;

        let operand = |n: usize| -> Result<u8, VMFault> { Ok(memory.read(pc + n)?) };
        let register = |n: usize| -> Result<Register, VMFault> { Ok(Register::try_from(operand(n)?)?) };

        let instruction = match opcode {
            Opcode::Ldi => Instruction::Ldi(register(1)?, operand(2)?),
            Opcode::Prn => Instruction::Prn(register(1)?),
            Opcode::Add => Instruction::Add(register(1)?, register(2)?),
            Opcode::Sub => Instruction::Sub(register(1)?, register(2)?),
            Opcode::Mul => Instruction::Mul(register(1)?, register(2)?),
            Opcode::Push => Instruction::Push(register(1)?),
            Opcode::Pop => Instruction::Pop(register(1)?),
            Opcode::Call => Instruction::Call(register(1)?),
            Opcode::Ret => Instruction::Ret,
            Opcode::Hlt => Instruction::Hlt,
        };
        Ok(instruction)
    }

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Ldi(..) => Opcode::Ldi,
            Instruction::Prn(_) => Opcode::Prn,
            Instruction::Add(..) => Opcode::Add,
            Instruction::Sub(..) => Opcode::Sub,
            Instruction::Mul(..) => Opcode::Mul,
            Instruction::Push(_) => Opcode::Push,
            Instruction::Pop(_) => Opcode::Pop,
            Instruction::Call(_) => Opcode::Call,
            Instruction::Ret => Opcode::Ret,
            Instruction::Hlt => Opcode::Hlt,
        }
    }

    /// Bytes occupied by this instruction
    pub fn width(&self) -> usize {
        self.opcode().width()
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = self.opcode();
        match self {
            Instruction::Ldi(reg, value) => write!(f, "{} {},{}", op, reg, value),
            Instruction::Add(a, b) | Instruction::Sub(a, b) | Instruction::Mul(a, b) => {
                write!(f, "{} {},{}", op, a, b)
            }
            Instruction::Prn(reg)
            | Instruction::Push(reg)
            | Instruction::Pop(reg)
            | Instruction::Call(reg) => write!(f, "{} {}", op, reg),
            Instruction::Ret | Instruction::Hlt => write!(f, "{}", op),
        }
    }
}
