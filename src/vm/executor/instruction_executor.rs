use crate::vm::error::VMFault;
use crate::vm::instruction::Instruction;
use crate::vm::output::OutputSink;
use crate::vm::state::{MachineStatus, VMState};

use super::arithmetic_ops::ArithmeticOperations;
use super::control_flow_ops::ControlFlowOperations;
use super::io_ops::IoOperations;
use super::processor::{Flow, InstructionProcessor};
use super::register_ops::RegisterOperations;
use super::stack_ops::StackOperations;

/// A struct that holds all instruction processors
pub struct InstructionExecutor {
    processors: Vec<Box<dyn InstructionProcessor>>,
}

impl InstructionExecutor {
    /// Create a new executor with all processors registered
    pub fn new() -> Self {
        let processors: Vec<Box<dyn InstructionProcessor>> = vec![
            Box::new(RegisterOperations::new()),
            Box::new(ArithmeticOperations::new()),
            Box::new(StackOperations::new()),
            Box::new(ControlFlowOperations::new()),
            Box::new(IoOperations::new()),
        ];

        InstructionExecutor { processors }
    }

    /// Execute a single decoded instruction, delegating to the appropriate processor
    pub fn execute_instruction(
        &self,
        state: &mut VMState,
        instr: &Instruction,
        output: &mut dyn OutputSink,
    ) -> Result<Flow, VMFault> {
        self.processors
            .iter()
            .find(|processor| processor.can_process(instr))
            .ok_or(VMFault::UnknownOpcode {
                opcode: instr.opcode().byte(),
                address: state.pc,
            })?
            .process(state, instr, output)
    }

    /// Run one fetch-decode-execute cycle and return the resulting status.
    /// A halted or faulted machine is left untouched.
    pub fn step(&self, state: &mut VMState, output: &mut dyn OutputSink) -> MachineStatus {
        if state.status.is_terminal() {
            return state.status;
        }

        let pc = state.pc;
        trace_state(state);

        match self.fetch_and_execute(state, output) {
            Ok((instr, Flow::Next)) => state.advance_pc(instr.width()),
            Ok((_, Flow::Jump)) => {}
            Ok((_, Flow::Halt)) => {
                crate::debug_vm!(state.cycles, pc => "Halted");
                state.halt();
            }
            Err(fault) => {
                crate::debug_vm!(state.cycles, pc => "VM Fault: {}", fault);
                state.set_fault(fault);
            }
        }
        state.cycles += 1;
        state.status
    }

    /// Step until the machine halts or faults
    pub fn run(&self, state: &mut VMState, output: &mut dyn OutputSink) -> MachineStatus {
        while !state.status.is_terminal() {
            self.step(state, output);
        }
        crate::debug_vm!(
            "Stopped after {} cycles with status {:?}",
            state.cycles,
            state.status
        );
        state.status
    }

    fn fetch_and_execute(
        &self,
        state: &mut VMState,
        output: &mut dyn OutputSink,
    ) -> Result<(Instruction, Flow), VMFault> {
        let instr = Instruction::fetch(&state.memory, state.pc)?;
        crate::debug_instructions!(state.cycles, state.pc => "Executing {}", instr);
        let flow = self.execute_instruction(state, &instr, output)?;
        Ok((instr, flow))
    }
}

impl Default for InstructionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

/// Emit the CPU trace line: pc, the next three bytes and the register file
fn trace_state(state: &VMState) {
    if !log::log_enabled!(target: "trace", log::Level::Trace) {
        return;
    }
    let byte = |offset: usize| state.memory.read(state.pc + offset).unwrap_or(0);
    let registers: String = state
        .registers
        .view()
        .iter()
        .map(|value| format!(" {:02X}", value))
        .collect();
    crate::trace_cpu!(
        "TRACE: {:02X} | {:02X} {:02X} {:02X} |{}",
        state.pc,
        byte(0),
        byte(1),
        byte(2),
        registers
    );
}
