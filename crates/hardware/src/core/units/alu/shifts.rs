//! ALU shift operations.
//!
//! The ALU only shifts right. Shift amounts are masked to 5 bits (0–31).
//! A left shift is produced by reversing the operand's bit order, shifting
//! right logically, and reversing the result, which yields exactly the bits of
//! a direct logical left shift.

use super::AluOp;

/// Bit mask for the shift amount (5 bits: 0-31).
pub const SHAMT_MASK: u32 = 0x1f;

/// Executes a right shift. Returns `0` for non-shift opcodes.
pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
    let shamt = b & SHAMT_MASK;
    match op {
        AluOp::Srl => a >> shamt,
        AluOp::Sra => ((a as i32) >> shamt) as u32,
        _ => 0,
    }
}

/// Shift left logical built from the right shifter: `rev(srl(rev(a), b))`.
pub const fn shift_left(a: u32, b: u32) -> u32 {
    execute(AluOp::Srl, a.reverse_bits(), b).reverse_bits()
}
