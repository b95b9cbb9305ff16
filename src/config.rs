//! Configuration constants for the LS-8 machine.

use std::ops::Range;

// Machine layout
pub const MEMORY_SIZE: usize = 256; // Addressable bytes
pub const REGISTER_COUNT: usize = 8; // General purpose registers R0-R7
pub const SP_REGISTER: usize = 7; // R7 holds the stack pointer by convention
pub const STACK_TOP: u8 = 0xF4; // Reset value of SP, stack grows down from here
pub const PROGRAM_START: usize = 0; // Images are loaded at this address

// Diagnostics
pub const PUSH_WINDOW: Range<usize> = 0xF0..0xF4; // Memory dumped after every PUSH

// Process exit statuses
pub const EXIT_HALT: i32 = 0;
pub const EXIT_HALT_LEGACY: i32 = 1; // HLT status under --legacy-exit-status
pub const EXIT_USAGE: i32 = 1;
pub const EXIT_BAD_IMAGE: i32 = 2;
pub const EXIT_FAULT: i32 = 1;
