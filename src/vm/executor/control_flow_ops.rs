use super::processor::{Flow, InstructionProcessor};
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::output::OutputSink;
use crate::vm::state::VMState;

/// Processor for subroutine calls and halting
pub struct ControlFlowOperations;

impl ControlFlowOperations {
    pub fn new() -> Self {
        ControlFlowOperations
    }
}

impl InstructionProcessor for ControlFlowOperations {
    fn can_process(&self, instruction: &Instruction) -> bool {
        matches!(
            instruction,
            Instruction::Call(_) | Instruction::Ret | Instruction::Hlt
        )
    }

    fn process(
        &self,
        state: &mut VMState,
        instruction: &Instruction,
        _output: &mut dyn OutputSink,
    ) -> Result<Flow, VMFault> {
        match instruction {
            Instruction::Call(reg) => {
                let return_address = state.pc + instruction.width();
                let encoded = u8::try_from(return_address)
                    .map_err(|_| VMFault::ReturnAddressOutOfRange(return_address))?;
                state.push_byte(encoded)?;
                // Target is read after the push so CALL R7 sees the new SP
                let target = state.registers.get(*reg) as usize;
                crate::debug_instructions!(
                    state.cycles,
                    state.pc =>
                    "CALL {}: jumping to {:#04X}, return to {:#04X}",
                    reg,
                    target,
                    return_address
                );
                state.pc = target;
                Ok(Flow::Jump)
            }
            Instruction::Ret => {
                let target = state.pop_byte()? as usize;
                crate::debug_instructions!(
                    state.cycles,
                    state.pc =>
                    "RET: returning to {:#04X}",
                    target
                );
                state.pc = target;
                Ok(Flow::Jump)
            }
            Instruction::Hlt => Ok(Flow::Halt),
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
    use crate::config::STACK_TOP;
    use crate::vm::registers::Register;

    #[test]
    fn test_can_process() {
        let processor = ControlFlowOperations::new();
        assert!(processor.can_process(&Instruction::Call(Register::R1)));
        assert!(processor.can_process(&Instruction::Ret));
        assert!(processor.can_process(&Instruction::Hlt));
        assert!(!processor.can_process(&Instruction::Push(Register::R0)));
    }

    #[test]
    fn test_call_pushes_return_address() {
        let processor = ControlFlowOperations::new();
        let mut state = VMState::new();
        let mut out: Vec<u8> = Vec::new();
        state.pc = 6;
        state.registers.set(Register::R1, 24);

        let flow = processor
            .process(&mut state, &Instruction::Call(Register::R1), &mut out)
            .unwrap();
        assert_eq!(flow, Flow::Jump);
        assert_eq!(state.pc, 24);
        assert_eq!(state.registers.sp(), STACK_TOP - 1);
        assert_eq!(state.memory.read((STACK_TOP - 1) as usize), Ok(8));
    }

    #[test]
    fn test_call_then_ret() {
        let processor = ControlFlowOperations::new();
        let mut state = VMState::new();
        let mut out: Vec<u8> = Vec::new();
        state.pc = 10;
        state.registers.set(Register::R2, 100);

        processor
            .process(&mut state, &Instruction::Call(Register::R2), &mut out)
            .unwrap();
        let flow = processor
            .process(&mut state, &Instruction::Ret, &mut out)
            .unwrap();
        assert_eq!(flow, Flow::Jump);
        assert_eq!(state.pc, 12);
        assert_eq!(state.registers.sp(), STACK_TOP);
    }

    #[test]
    fn test_call_return_address_out_of_range() {
        let processor = ControlFlowOperations::new();
        let mut state = VMState::new();
        let mut out: Vec<u8> = Vec::new();
        state.pc = 254;

        assert_eq!(
            processor.process(&mut state, &Instruction::Call(Register::R0), &mut out),
            Err(VMFault::ReturnAddressOutOfRange(256))
        );
        assert_eq!(state.registers.sp(), STACK_TOP);
    }

    #[test]
    fn test_ret_with_empty_stack() {
        let processor = ControlFlowOperations::new();
        let mut state = VMState::new();
        let mut out: Vec<u8> = Vec::new();

        assert_eq!(
            processor.process(&mut state, &Instruction::Ret, &mut out),
            Err(VMFault::StackUnderflow)
        );
    }

    #[test]
    fn test_hlt() {
        let processor = ControlFlowOperations::new();
        let mut state = VMState::new();
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(
            processor.process(&mut state, &Instruction::Hlt, &mut out),
            Ok(Flow::Halt)
        );
        assert_eq!(state.pc, 0);
    }
}
