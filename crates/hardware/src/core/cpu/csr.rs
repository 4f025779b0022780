//! CSR instruction operands.
//!
//! The register forms (`CSRRW`, `CSRRS`, `CSRRC`) use the value of `rs1`. The
//! immediate forms (`CSRRWI`, `CSRRSI`, `CSRRCI`) reuse the `rs1` field as a
//! 5-bit unsigned immediate, zero-extended.

use super::Cpu;
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes::CSR_IMMEDIATE_BIT;

impl Cpu {
    /// Operand for a CSR instruction, given the value read from `rs1`.
    pub(super) fn csr_operand(inst: u32, rs1_value: u32) -> u32 {
        if inst.funct3() & CSR_IMMEDIATE_BIT == 0 {
            rs1_value
        } else {
            inst.rs1() as u32
        }
    }
}
