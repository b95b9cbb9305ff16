// VM Error types: memory access errors, register errors, VM faults

use std::io;
use thiserror::Error;

/// Memory Errors
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum MemoryError {
    #[error("Address {0:#04X} is outside of memory")]
    OutOfBounds(usize),
}

/// Program image larger than the memory it is loaded into
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
#[error("Program of {len} bytes does not fit in {capacity} bytes of memory")]
pub struct ProgramTooLarge {
    pub len: usize,
    pub capacity: usize,
}

/// Register Errors
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum RegisterError {
    #[error("Invalid register R{0}")]
    InvalidRegister(u8),
}

/// VM Errors. Any fault is terminal for the run.
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum VMFault {
    #[error("Unknown instruction {opcode} at address {address}")]
    UnknownOpcode { opcode: u8, address: usize },
    #[error("Invalid register R{0}")]
    InvalidRegister(u8),
    #[error("Memory access out of bounds at address {0:#04X}")]
    MemoryOutOfBounds(usize),
    #[error("Stack overflow")]
    StackOverflow,
    #[error("Stack underflow")]
    StackUnderflow,
    #[error("Return address {0} does not fit in a byte")]
    ReturnAddressOutOfRange(usize),
    #[error("Unsupported ALU operation {0:#010b}")]
    UnsupportedAluOperation(u8),
    #[error("Failed to write output: {0}")]
    OutputFailed(io::ErrorKind),
}

impl From<MemoryError> for VMFault {
    fn from(err: MemoryError) -> Self {
        match err {
            MemoryError::OutOfBounds(address) => VMFault::MemoryOutOfBounds(address),
        }
    }
}

impl From<RegisterError> for VMFault {
    fn from(err: RegisterError) -> Self {
        match err {
            RegisterError::InvalidRegister(index) => VMFault::InvalidRegister(index),
        }
    }
}
