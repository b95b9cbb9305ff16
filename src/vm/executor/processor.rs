use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::output::OutputSink;
use crate::vm::state::VMState;

/// What the executor does with the program counter after an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Advance past the instruction by its encoded width
    Next,
    /// The instruction already set the program counter
    Jump,
    /// Stop the machine
    Halt,
}

/// One family of instructions
pub trait InstructionProcessor {
    fn can_process(&self, instruction: &Instruction) -> bool;

    fn process(
        &self,
        state: &mut VMState,
        instruction: &Instruction,
        output: &mut dyn OutputSink,
    ) -> Result<Flow, VMFault>;
}
