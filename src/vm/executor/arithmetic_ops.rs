use super::processor::{Flow, InstructionProcessor};
use crate::vm::alu;
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::output::OutputSink;
use crate::vm::state::VMState;

/// Processor for arithmetic operations, delegated to the ALU
pub struct ArithmeticOperations;

impl ArithmeticOperations {
    pub fn new() -> Self {
        ArithmeticOperations
    }
}

impl InstructionProcessor for ArithmeticOperations {
    fn can_process(&self, instruction: &Instruction) -> bool {
        matches!(
            instruction,
            Instruction::Add(_, _) | Instruction::Sub(_, _) | Instruction::Mul(_, _)
        )
    }

    fn process(
        &self,
        state: &mut VMState,
        instruction: &Instruction,
        _output: &mut dyn OutputSink,
    ) -> Result<Flow, VMFault> {
        match instruction {
            Instruction::Add(dest, src) | Instruction::Sub(dest, src) | Instruction::Mul(dest, src) => {
                alu::apply(&mut state.registers, instruction.opcode(), *dest, *src)?;
                Ok(Flow::Next)
            }
            other => Err(VMFault::UnsupportedAluOperation(other.opcode().byte())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::registers::Register;

    fn setup(a: u8, b: u8) -> (VMState, Vec<u8>) {
        let mut state = VMState::new();
        state.registers.set(Register::R0, a);
        state.registers.set(Register::R1, b);
        (state, Vec::new())
    }

    #[test]
    fn test_can_process() {
        let processor = ArithmeticOperations::new();
        assert!(processor.can_process(&Instruction::Add(Register::R0, Register::R1)));
        assert!(processor.can_process(&Instruction::Sub(Register::R0, Register::R1)));
        assert!(processor.can_process(&Instruction::Mul(Register::R0, Register::R1)));
        assert!(!processor.can_process(&Instruction::Ldi(Register::R0, 1)));
    }

    #[test]
    fn test_add() {
        let processor = ArithmeticOperations::new();
        let (mut state, mut out) = setup(10, 20);
        let flow = processor
            .process(&mut state, &Instruction::Add(Register::R0, Register::R1), &mut out)
            .unwrap();
        assert_eq!(flow, Flow::Next);
        assert_eq!(state.registers.get(Register::R0), 30);
    }

    #[test]
    fn test_sub_and_mul() {
        let processor = ArithmeticOperations::new();
        let (mut state, mut out) = setup(9, 4);
        processor
            .process(&mut state, &Instruction::Sub(Register::R0, Register::R1), &mut out)
            .unwrap();
        assert_eq!(state.registers.get(Register::R0), 5);
        processor
            .process(&mut state, &Instruction::Mul(Register::R0, Register::R1), &mut out)
            .unwrap();
        assert_eq!(state.registers.get(Register::R0), 20);
    }

    #[test]
    fn test_rejects_non_alu_instruction() {
        let processor = ArithmeticOperations::new();
        let (mut state, mut out) = setup(1, 1);
        assert_eq!(
            processor.process(&mut state, &Instruction::Hlt, &mut out),
            Err(VMFault::UnsupportedAluOperation(0b0000_0001))
        );
    }
}
