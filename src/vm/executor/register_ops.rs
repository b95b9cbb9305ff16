use super::processor::{Flow, InstructionProcessor};
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::output::OutputSink;
use crate::vm::state::VMState;

/// Processor for register load instructions
pub struct RegisterOperations;

impl RegisterOperations {
    pub fn new() -> Self {
        RegisterOperations
    }
}

impl InstructionProcessor for RegisterOperations {
    fn can_process(&self, instruction: &Instruction) -> bool {
        matches!(instruction, Instruction::Ldi(_, _))
    }

    fn process(
        &self,
        state: &mut VMState,
        instruction: &Instruction,
        _output: &mut dyn OutputSink,
    ) -> Result<Flow, VMFault> {
        match instruction {
            Instruction::Ldi(reg, value) => {
                state.registers.set(*reg, *value);
                Ok(Flow::Next)
            }
            other => Err(VMFault::UnknownOpcode {
                opcode: other.opcode().byte(),
                address: state.pc,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::registers::Register;

    #[test]
    fn test_can_process() {
        let processor = RegisterOperations::new();
        assert!(processor.can_process(&Instruction::Ldi(Register::R0, 1)));
        assert!(!processor.can_process(&Instruction::Hlt));
    }

    #[test]
    fn test_ldi() {
        let processor = RegisterOperations::new();
        let mut state = VMState::new();
        let mut out: Vec<u8> = Vec::new();

        let flow = processor
            .process(&mut state, &Instruction::Ldi(Register::R3, 200), &mut out)
            .unwrap();
        assert_eq!(flow, Flow::Next);
        assert_eq!(state.registers.get(Register::R3), 200);
        assert!(out.is_empty());
    }

    #[test]
    fn test_ldi_into_stack_pointer() {
        let processor = RegisterOperations::new();
        let mut state = VMState::new();
        let mut out: Vec<u8> = Vec::new();

        processor
            .process(&mut state, &Instruction::Ldi(Register::SP, 0x80), &mut out)
            .unwrap();
        assert_eq!(state.registers.sp(), 0x80);
    }
}
