//! RV32I `funct3` encodings.

/// Add/Subtract (ADD, SUB, ADDI).
pub const ADD_SUB: u32 = 0b000;
/// Shift Left Logical (SLL, SLLI).
pub const SLL: u32 = 0b001;
/// Set Less Than (SLT, SLTI).
pub const SLT: u32 = 0b010;
/// Set Less Than Unsigned (SLTU, SLTIU).
pub const SLTU: u32 = 0b011;
/// Exclusive OR (XOR, XORI).
pub const XOR: u32 = 0b100;
/// Shift Right Logical/Arithmetic (SRL, SRA, SRLI, SRAI).
pub const SRL_SRA: u32 = 0b101;
/// OR (OR, ORI).
pub const OR: u32 = 0b110;
/// AND (AND, ANDI).
pub const AND: u32 = 0b111;

/// Branch if Equal.
pub const BEQ: u32 = 0b000;
/// Branch if Not Equal.
pub const BNE: u32 = 0b001;
/// Branch if Less Than.
pub const BLT: u32 = 0b100;
/// Branch if Greater or Equal.
pub const BGE: u32 = 0b101;
/// Branch if Less Than Unsigned.
pub const BLTU: u32 = 0b110;
/// Branch if Greater or Equal Unsigned.
pub const BGEU: u32 = 0b111;

/// Load Byte (sign-extended).
pub const LB: u32 = 0b000;
/// Load Halfword (sign-extended).
pub const LH: u32 = 0b001;
/// Load Word.
pub const LW: u32 = 0b010;
/// Load Byte Unsigned.
pub const LBU: u32 = 0b100;
/// Load Halfword Unsigned.
pub const LHU: u32 = 0b101;

/// Store Byte.
pub const SB: u32 = 0b000;
/// Store Halfword.
pub const SH: u32 = 0b001;
/// Store Word.
pub const SW: u32 = 0b010;

/// Load `funct3` bit selecting zero extension.
pub const LOAD_UNSIGNED_BIT: u32 = 0b100;
