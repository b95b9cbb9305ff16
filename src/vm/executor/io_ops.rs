use super::processor::{Flow, InstructionProcessor};
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::output::OutputSink;
use crate::vm::state::VMState;

/// Processor for PRN
pub struct IoOperations;

impl IoOperations {
    pub fn new() -> Self {
        IoOperations
    }
}

impl InstructionProcessor for IoOperations {
    fn can_process(&self, instruction: &Instruction) -> bool {
        matches!(instruction, Instruction::Prn(_))
    }

    fn process(
        &self,
        state: &mut VMState,
        instruction: &Instruction,
        output: &mut dyn OutputSink,
    ) -> Result<Flow, VMFault> {
        match instruction {
            Instruction::Prn(reg) => {
                let value = state.registers.get(*reg);
                output
                    .emit(value)
                    .map_err(|e| VMFault::OutputFailed(e.kind()))?;
                Ok(Flow::Next)
            }
            other => Err(VMFault::UnknownOpcode {
                opcode: other.opcode().byte(),
                address: state.pc,
            }),
        }
    }
}
