// VM State: memory, registers, pc, run status, cycle counter

use super::error::{ProgramTooLarge, VMFault};
use super::memory::Memory;
use super::registers::{Register, Registers};
use crate::config::{PROGRAM_START, STACK_TOP};

/// Execution status of the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineStatus {
    Running,
    Halted,
    Faulted(VMFault),
}

impl MachineStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, MachineStatus::Running)
    }
}

/// Complete machine state, owned by whoever drives the executor
#[derive(Debug, Clone)]
pub struct VMState {
    pub memory: Memory,
    pub registers: Registers,
    pub pc: usize,              // Address of the next instruction byte
    pub status: MachineStatus,  // Running until HLT or a fault
    pub cycles: u64,            // Instructions executed so far
}

impl VMState {
    pub fn new() -> Self {
        VMState {
            memory: Memory::new(),
            registers: Registers::new(),
            pc: PROGRAM_START,
            status: MachineStatus::Running,
            cycles: 0,
        }
    }

    /// Fresh machine with `program` loaded at the start of memory
    pub fn with_program(program: &[u8]) -> Result<Self, ProgramTooLarge> {
        let mut state = Self::new();
        state.memory.load(PROGRAM_START, program)?;
        crate::debug_vm!("Loaded {} program bytes at {:#04X}", program.len(), PROGRAM_START);
        Ok(state)
    }

    pub fn advance_pc(&mut self, width: usize) {
        self.pc += width;
    }

    pub fn halt(&mut self) {
        self.status = MachineStatus::Halted;
    }

    pub fn set_fault(&mut self, fault: VMFault) {
        self.status = MachineStatus::Faulted(fault);
    }

    /// Decrement SP and store `value` at the new top of stack
    pub fn push_byte(&mut self, value: u8) -> Result<(), VMFault> {
        let sp = self
            .registers
            .sp()
            .checked_sub(1)
            .ok_or(VMFault::StackOverflow)?;
        self.memory.write(sp as usize, value)?;
        self.registers.set_sp(sp);
        Ok(())
    }

    /// PUSH: decrement SP, then store `reg` at the new SP. Pushing R7 stores
    /// the decremented value.
    pub fn push_register(&mut self, reg: Register) -> Result<u8, VMFault> {
        let sp = self
            .registers
            .sp()
            .checked_sub(1)
            .ok_or(VMFault::StackOverflow)?;
        self.registers.set_sp(sp);
        let value = self.registers.get(reg);
        self.memory.write(sp as usize, value)?;
        Ok(value)
    }

    /// POP: load the top of stack into `reg`, then increment SP from its
    /// current value. Popping into R7 leaves it one past the popped byte.
    pub fn pop_register(&mut self, reg: Register) -> Result<u8, VMFault> {
        let sp = self.registers.sp();
        if sp >= STACK_TOP {
            return Err(VMFault::StackUnderflow);
        }
        let value = self.memory.read(sp as usize)?;
        self.registers.set(reg, value);
        let next = self
            .registers
            .sp()
            .checked_add(1)
            .ok_or(VMFault::StackUnderflow)?;
        self.registers.set_sp(next);
        Ok(value)
    }

    /// Read the top of stack and increment SP
    pub fn pop_byte(&mut self) -> Result<u8, VMFault> {
        let sp = self.registers.sp();
        if sp >= STACK_TOP {
            return Err(VMFault::StackUnderflow);
        }
        let value = self.memory.read(sp as usize)?;
        self.registers.set_sp(sp + 1);
        Ok(value)
    }
}

impl Default for VMState {
    fn default() -> Self {
        Self::new()
    }
}
