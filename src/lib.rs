//! LS-8: an 8-bit register machine with a downward-growing stack.
//!
//! The [`vm`] module holds the execution engine. [`loader`] turns `.ls8`
//! text images into bytes for [`vm::VMState::with_program`].

pub mod config;
pub mod loader;
pub mod logging;
pub mod vm;
