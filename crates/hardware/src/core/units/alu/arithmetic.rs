//! ALU arithmetic operations.
//!
//! Addition wraps modulo 2^32. Subtraction is computed the way the hardware
//! adder does it, by adding the two's-complement negation of `b`.

use super::AluOp;

/// Executes an addition or subtraction. Returns `0` for other opcodes.
pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Sub => a.wrapping_add((!b).wrapping_add(1)),
        _ => 0,
    }
}
