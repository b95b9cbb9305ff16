// VM Register system: register enum, storage, and access logic

use super::error::RegisterError;
use crate::config::{REGISTER_COUNT, SP_REGISTER, STACK_TOP};
use std::fmt;

/// Enum for the eight general purpose registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Register {
    /// Stack pointer by convention. Otherwise an ordinary register.
    pub const SP: Register = Register::R7;

    pub const ALL: [Register; REGISTER_COUNT] = [
        Register::R0,
        Register::R1,
        Register::R2,
        Register::R3,
        Register::R4,
        Register::R5,
        Register::R6,
        Register::R7,
    ];

    /// Index of this register in the register file
    pub fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Register {
    type Error = RegisterError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Register::ALL
            .get(byte as usize)
            .copied()
            .ok_or(RegisterError::InvalidRegister(byte))
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.index())
    }
}

/// Storage for all VM registers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    data: [u8; REGISTER_COUNT],
}

impl Registers {
    /// All zero except the stack pointer, which starts at the top of the stack
    pub fn new() -> Self {
        let mut data = [0; REGISTER_COUNT];
        data[SP_REGISTER] = STACK_TOP;
        Registers { data }
    }

    /// Get the value of a register
    pub fn get(&self, reg: Register) -> u8 {
        self.data[reg.index()]
    }

    /// Set the value of a register
    pub fn set(&mut self, reg: Register, value: u8) {
        self.data[reg.index()] = value;
    }

    /// Get a register by raw index, as found in an operand byte
    pub fn get_index(&self, index: u8) -> Result<u8, RegisterError> {
        Register::try_from(index).map(|reg| self.get(reg))
    }

    pub fn sp(&self) -> u8 {
        self.get(Register::SP)
    }

    pub fn set_sp(&mut self, value: u8) {
        self.set(Register::SP, value);
    }

    /// Raw view of the register file, R0 first
    pub fn view(&self) -> &[u8; REGISTER_COUNT] {
        &self.data
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
