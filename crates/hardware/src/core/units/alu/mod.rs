//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the combinational integer ALU used by the execution
//! unit. It takes two 32-bit operands and a 4-bit function code: the low three
//! bits select the operation (matching the RV32I `funct3` encoding) and bit 3 is
//! a modifier that turns ADD into SUB and SRL into SRA.
//!
//! There is no native left shift. Callers realize SLL/SLLI with
//! [`shifts::shift_left`], which bit-reverses the operand around a logical
//! right shift.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Srl, Sra, and the reversal-based left shift

/// Integer addition and subtraction.
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (srl, sra, reversal-based sll).
pub mod shifts;

/// Bit position of the modifier within the 4-bit function code.
pub const MODIFIER_BIT: u32 = 0b1000;

/// Mask selecting the 3-bit operation selector.
pub const SELECTOR_MASK: u32 = 0b0111;

/// Integer operation selected by an ALU function code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    /// `a + b`.
    Add,
    /// `a + (!b + 1)`.
    Sub,
    /// Signed less-than, 0 or 1.
    Slt,
    /// Unsigned less-than, 0 or 1.
    Sltu,
    /// Bitwise XOR.
    Xor,
    /// Logical right shift by `b & 31`.
    Srl,
    /// Arithmetic right shift by `b & 31`.
    Sra,
    /// Bitwise OR.
    Or,
    /// Bitwise AND.
    And,
}

impl AluOp {
    /// Decodes a 4-bit function code.
    ///
    /// Returns `None` for selector `001`, which has no native operation. The
    /// modifier bit only affects selectors `000` and `101`.
    pub const fn from_code(code: u32) -> Option<Self> {
        let modified = code & MODIFIER_BIT != 0;
        match code & SELECTOR_MASK {
            0b000 if modified => Some(Self::Sub),
            0b000 => Some(Self::Add),
            0b010 => Some(Self::Slt),
            0b011 => Some(Self::Sltu),
            0b100 => Some(Self::Xor),
            0b101 if modified => Some(Self::Sra),
            0b101 => Some(Self::Srl),
            0b110 => Some(Self::Or),
            0b111 => Some(Self::And),
            _ => None,
        }
    }

    /// Returns the canonical 4-bit function code for this operation.
    pub const fn code(self) -> u32 {
        match self {
            Self::Add => 0b0000,
            Self::Sub => 0b1000,
            Self::Slt => 0b0010,
            Self::Sltu => 0b0011,
            Self::Xor => 0b0100,
            Self::Srl => 0b0101,
            Self::Sra => 0b1101,
            Self::Or => 0b0110,
            Self::And => 0b0111,
        }
    }
}

/// Arithmetic Logic Unit for RV32I integer operations. Stateless.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Evaluates the ALU for a raw 4-bit function code.
    ///
    /// # Arguments
    ///
    /// * `code` - Function code: `funct3` selector plus modifier in bit 3.
    /// * `a`    - First operand.
    /// * `b`    - Second operand (also the shift amount).
    ///
    /// # Returns
    ///
    /// The 32-bit result, or `0` for the unimplemented selector `001`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rvmini_core::core::units::alu::{Alu, AluOp};
    ///
    /// assert_eq!(Alu::execute(AluOp::Add.code(), 42, 8), 50);
    /// assert_eq!(Alu::execute(AluOp::Sub.code(), 0, 1), 0xFFFF_FFFF);
    /// assert_eq!(Alu::execute(AluOp::Slt.code(), -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(0b0001, 1, 4), 0);
    /// ```
    pub fn execute(code: u32, a: u32, b: u32) -> u32 {
        AluOp::from_code(code).map_or(0, |op| Self::apply(op, a, b))
    }

    /// Evaluates a decoded operation.
    pub fn apply(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add | AluOp::Sub => arithmetic::execute(op, a, b),
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }
            AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b),
        }
    }
}
