//! Instruction Disassembler for RV32I.
//!
//! Converts a 32-bit instruction encoding into a human-readable mnemonic
//! string for instruction tracing and test diagnostics.
//!
//! # Supported Instructions
//!
//! - RV32I base integer (ALU, loads, stores, branches, jumps, LUI/AUIPC, FENCE)
//! - Machine-mode system instructions (ECALL, EBREAK, MRET, CSR access)
//!
//! # Usage
//!
//! ```
//! use rvmini_core::isa::disasm::disassemble;
//! let text = disassemble(0x00A00513); // ADDI x10, x0, 10
//! assert_eq!(text, "addi a0, zero, 10");
//! ```

use crate::core::arch::csr;
use crate::isa::decode::{imm_b, imm_i, imm_j, imm_s, imm_u};
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3 as i_f3, funct7 as i_f7, opcodes as i_op};

/// ABI register names for x0–x31.
const REG_NAMES: [&str; 32] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

/// Returns the ABI name for an integer register index.
#[inline]
pub fn reg_name(idx: usize) -> &'static str {
    REG_NAMES.get(idx).copied().unwrap_or("x??")
}

/// Disassembles a 32-bit RV32I instruction into a human-readable string.
///
/// Returns a mnemonic like `"add a0, a1, a2"`, or `"unknown (0x........)"`
/// for encodings the core treats as no-ops.
pub fn disassemble(inst: u32) -> String {
    let rd = reg_name(inst.rd());
    let rs1 = reg_name(inst.rs1());
    let rs2 = reg_name(inst.rs2());
    let f3 = inst.funct3();
    let imm = imm_i(inst) as i32;

    match inst.opcode() {
        i_op::OP_LUI => format!("lui {rd}, {:#x}", imm_u(inst) >> 12),
        i_op::OP_AUIPC => format!("auipc {rd}, {:#x}", imm_u(inst) >> 12),
        i_op::OP_JAL => format!("jal {rd}, {}", imm_j(inst) as i32),
        i_op::OP_JALR => format!("jalr {rd}, {imm}({rs1})"),

        // ── Branches ──────────────────────────────────────
        i_op::OP_BRANCH => {
            let mn = match f3 {
                i_f3::BEQ => "beq",
                i_f3::BNE => "bne",
                i_f3::BLT => "blt",
                i_f3::BGE => "bge",
                i_f3::BLTU => "bltu",
                i_f3::BGEU => "bgeu",
                _ => "b??",
            };
            format!("{mn} {rs1}, {rs2}, {}", imm_b(inst) as i32)
        }

        // ── Loads / stores ────────────────────────────────
        i_op::OP_LOAD => {
            let mn = match f3 {
                i_f3::LB => "lb",
                i_f3::LH => "lh",
                i_f3::LW => "lw",
                i_f3::LBU => "lbu",
                i_f3::LHU => "lhu",
                _ => "l??",
            };
            format!("{mn} {rd}, {imm}({rs1})")
        }
        i_op::OP_STORE => {
            let mn = match f3 {
                i_f3::SB => "sb",
                i_f3::SH => "sh",
                i_f3::SW => "sw",
                _ => "s??",
            };
            format!("{mn} {rs2}, {}({rs1})", imm_s(inst) as i32)
        }

        // ── ALU ───────────────────────────────────────────
        i_op::OP_IMM => disasm_op_imm(inst, rd, rs1, f3, imm),
        i_op::OP_REG => disasm_op_reg(inst, rd, rs1, rs2, f3),

        i_op::OP_MISC_MEM => "fence".to_string(),
        sys_op::OP_SYSTEM => disasm_system(inst, rd, rs1, f3),

        _ => format!("unknown ({inst:#010x})"),
    }
}

/// Disassemble OP_REG (R-type register-register).
fn disasm_op_reg(inst: u32, rd: &str, rs1: &str, rs2: &str, f3: u32) -> String {
    let alt = inst.funct7() == i_f7::SUB_SRA;
    let mn = match (f3, alt) {
        (i_f3::ADD_SUB, false) => "add",
        (i_f3::ADD_SUB, true) => "sub",
        (i_f3::SLL, _) => "sll",
        (i_f3::SLT, _) => "slt",
        (i_f3::SLTU, _) => "sltu",
        (i_f3::XOR, _) => "xor",
        (i_f3::SRL_SRA, false) => "srl",
        (i_f3::SRL_SRA, true) => "sra",
        (i_f3::OR, _) => "or",
        _ => "and",
    };
    format!("{mn} {rd}, {rs1}, {rs2}")
}

/// Disassemble OP_IMM (I-type immediate arithmetic).
fn disasm_op_imm(inst: u32, rd: &str, rs1: &str, f3: u32, imm: i32) -> String {
    let shamt = inst.rs2();
    let mn = match f3 {
        i_f3::ADD_SUB => "addi",
        i_f3::SLT => "slti",
        i_f3::SLTU => "sltiu",
        i_f3::XOR => "xori",
        i_f3::OR => "ori",
        i_f3::AND => "andi",
        i_f3::SLL => return format!("slli {rd}, {rs1}, {shamt}"),
        _ => {
            let mn = if inst.bit(30) { "srai" } else { "srli" };
            return format!("{mn} {rd}, {rs1}, {shamt}");
        }
    };
    format!("{mn} {rd}, {rs1}, {imm}")
}

/// Disassemble system instructions.
fn disasm_system(inst: u32, rd: &str, rs1: &str, f3: u32) -> String {
    if f3 == sys_op::F3_TRAPS {
        return match inst.csr() {
            sys_op::IMM_ECALL => "ecall".to_string(),
            sys_op::IMM_EBREAK => "ebreak".to_string(),
            sys_op::IMM_MRET => "mret".to_string(),
            _ => format!("system?? ({inst:#010x})"),
        };
    }

    let addr = inst.csr();
    let target = csr::csr_name(addr).map_or_else(|| format!("{addr:#05x}"), str::to_string);
    let uimm = inst.rs1();
    match f3 {
        sys_op::CSRRW => format!("csrrw {rd}, {target}, {rs1}"),
        sys_op::CSRRS => format!("csrrs {rd}, {target}, {rs1}"),
        sys_op::CSRRC => format!("csrrc {rd}, {target}, {rs1}"),
        sys_op::CSRRWI => format!("csrrwi {rd}, {target}, {uimm}"),
        sys_op::CSRRSI => format!("csrrsi {rd}, {target}, {uimm}"),
        sys_op::CSRRCI => format!("csrrci {rd}, {target}, {uimm}"),
        _ => format!("system?? ({inst:#010x})"),
    }
}

/// Lazily formatted disassembly, for log fields that may be filtered out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Disassembly(pub u32);

impl std::fmt::Display for Disassembly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&disassemble(self.0))
    }
}
