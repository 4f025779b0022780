//! RISC-V Privileged Architecture Opcodes.
//!
//! Defines the system opcode, the `funct3` values for trap and CSR
//! instructions, and the 12-bit immediates that select ECALL, EBREAK and MRET.

/// System instruction opcode (0b1110011).
/// Used for CSR instructions, ECALL, EBREAK and MRET.
pub const OP_SYSTEM: u32 = 0b1110011;

/// `funct3` selecting the trap group (ECALL, EBREAK, MRET).
pub const F3_TRAPS: u32 = 0b000;

/// Immediate selecting ECALL within the trap group.
pub const IMM_ECALL: u32 = 0x000;

/// Immediate selecting EBREAK within the trap group.
pub const IMM_EBREAK: u32 = 0x001;

/// Immediate selecting MRET within the trap group.
pub const IMM_MRET: u32 = 0x302;

/// Environment Call (ECALL).
pub const ECALL: u32 = 0x0000_0073;

/// Environment Break (EBREAK).
pub const EBREAK: u32 = 0x0010_0073;

/// Machine Return (MRET).
pub const MRET: u32 = 0x3020_0073;

/// Atomic Read/Write CSR (CSRRW).
pub const CSRRW: u32 = 0b001;
/// Atomic Read and Set Bits in CSR (CSRRS).
pub const CSRRS: u32 = 0b010;
/// Atomic Read and Clear Bits in CSR (CSRRC).
pub const CSRRC: u32 = 0b011;
/// Atomic Read/Write CSR Immediate (CSRRWI).
pub const CSRRWI: u32 = 0b101;
/// Atomic Read and Set Bits in CSR Immediate (CSRRSI).
pub const CSRRSI: u32 = 0b110;
/// Atomic Read and Clear Bits in CSR Immediate (CSRRCI).
pub const CSRRCI: u32 = 0b111;

/// `funct3` bit selecting the zero-extended `rs1` field as CSR operand.
pub const CSR_IMMEDIATE_BIT: u32 = 0b100;
