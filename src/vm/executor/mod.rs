// VM Instruction execution: fetches, decodes and dispatches instructions to processors

pub mod arithmetic_ops;
pub mod control_flow_ops;
pub mod instruction_executor;
pub mod io_ops;
pub mod processor;
pub mod register_ops;
pub mod stack_ops;

pub use instruction_executor::InstructionExecutor;
pub use processor::{Flow, InstructionProcessor};
