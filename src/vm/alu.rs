// VM ALU: stateless register arithmetic with modulo-256 wraparound

use super::error::VMFault;
use super::instruction::Opcode;
use super::registers::{Register, Registers};

/// Apply `op` to `dest` and `src`, storing the result in `dest`.
///
/// Results wrap modulo 256, matching an 8-bit register file. Only ADD, SUB
/// and MUL are ALU operations; any other opcode is rejected.
pub fn apply(
    registers: &mut Registers,
    op: Opcode,
    dest: Register,
    src: Register,
) -> Result<u8, VMFault> {
    let a = registers.get(dest);
    let b = registers.get(src);
    let result = match op {
        Opcode::Add => a.wrapping_add(b),
        Opcode::Sub => a.wrapping_sub(b),
        Opcode::Mul => a.wrapping_mul(b),
        other => return Err(VMFault::UnsupportedAluOperation(other.byte())),
    };
    crate::debug_instructions!("ALU {} {}={} {}={} -> {}", op, dest, a, src, b, result);
    registers.set(dest, result);
    Ok(result)
}
