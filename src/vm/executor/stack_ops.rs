use super::processor::{Flow, InstructionProcessor};
use crate::config::PUSH_WINDOW;
use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::output::OutputSink;
use crate::vm::state::VMState;

/// Processor for stack manipulation instructions
pub struct StackOperations;

impl StackOperations {
    pub fn new() -> Self {
        StackOperations
    }
}

impl InstructionProcessor for StackOperations {
    fn can_process(&self, instruction: &Instruction) -> bool {
        matches!(instruction, Instruction::Push(_) | Instruction::Pop(_))
    }

    fn process(
        &self,
        state: &mut VMState,
        instruction: &Instruction,
        _output: &mut dyn OutputSink,
    ) -> Result<Flow, VMFault> {
        match instruction {
            Instruction::Push(reg) => {
                let value = state.push_register(*reg)?;
                if let Ok(window) = state.memory.window(PUSH_WINDOW) {
                    crate::debug_stack!(
                        state.cycles,
                        state.pc =>
                        "PUSH {}={} SP={:#04X} [{:#04X}..{:#04X}] {:?}",
                        reg,
                        value,
                        state.registers.sp(),
                        PUSH_WINDOW.start,
                        PUSH_WINDOW.end,
                        window
                    );
                }
                Ok(Flow::Next)
            }
            Instruction::Pop(reg) => {
                let value = state.pop_register(*reg)?;
                crate::debug_stack!(
                    state.cycles,
                    state.pc =>
                    "POP {}={} SP={:#04X}",
                    reg,
                    value,
                    state.registers.sp()
                );
                Ok(Flow::Next)
            }
            other => Err(VMFault::UnknownOpcode {
                opcode: other.opcode().byte(),
                address: state.pc,
            }),
        }
    }
}
