// VM module entry point

pub mod alu;
pub mod error;
pub mod executor;
pub mod instruction;
pub mod memory;
pub mod output;
pub mod registers;
pub mod state;

pub use error::VMFault;
pub use executor::InstructionExecutor;
pub use output::{OutputSink, WriterSink};
pub use state::{MachineStatus, VMState};
