//! # Disassembler Tests

use rstest::rstest;
use rvmini_core::isa::disasm::{Disassembly, disassemble, reg_name};

use crate::common::InstructionBuilder;

fn b() -> InstructionBuilder {
    InstructionBuilder::new()
}

#[rstest]
#[case::add(b().add(10, 11, 12), "add a0, a1, a2")]
#[case::sub(b().sub(5, 6, 7), "sub t0, t1, t2")]
#[case::sra(b().sra(1, 2, 3), "sra ra, sp, gp")]
#[case::addi(b().addi(10, 0, -5), "addi a0, zero, -5")]
#[case::slli(b().slli(1, 1, 3), "slli ra, ra, 3")]
#[case::srai(b().srai(1, 1, 31), "srai ra, ra, 31")]
#[case::srli(b().srli(1, 1, 1), "srli ra, ra, 1")]
#[case::lui(b().lui(5, 0x12345), "lui t0, 0x12345")]
#[case::auipc(b().auipc(5, 1), "auipc t0, 0x1")]
#[case::jal(b().jal(1, -8), "jal ra, -8")]
#[case::jalr(b().jalr(0, 1, 0), "jalr zero, 0(ra)")]
#[case::bgeu(b().bgeu(10, 11, 16), "bgeu a0, a1, 16")]
#[case::lbu(b().lbu(10, 2, 3), "lbu a0, 3(sp)")]
#[case::sh(b().sh(10, 2, -2), "sh a0, -2(sp)")]
#[case::fence(b().fence(), "fence")]
#[case::ecall(b().ecall(), "ecall")]
#[case::ebreak(b().ebreak(), "ebreak")]
#[case::mret(b().mret(), "mret")]
#[case::csrrs(b().csrrs(5, 0x342, 0), "csrrs t0, mcause, zero")]
#[case::csrrwi(b().csrrwi(0, 0x305, 8), "csrrwi zero, mtvec, 8")]
#[case::csr_unnamed(b().csrrw(1, 0x7C0, 2), "csrrw ra, 0x7c0, sp")]
fn mnemonics(#[case] inst: InstructionBuilder, #[case] text: &str) {
    assert_eq!(disassemble(inst.build()), text);
}

#[test]
fn unknown_encodings() {
    assert_eq!(disassemble(0xFFFF_FFFF), "unknown (0xffffffff)");
    assert_eq!(disassemble(0x0000_0000), "unknown (0x00000000)");
}

#[test]
fn lazy_wrapper_formats_the_same() {
    let word = b().addi(10, 0, 10).build();
    assert_eq!(Disassembly(word).to_string(), disassemble(word));
}

#[test]
fn register_names() {
    assert_eq!(reg_name(0), "zero");
    assert_eq!(reg_name(2), "sp");
    assert_eq!(reg_name(31), "t6");
    assert_eq!(reg_name(32), "x??");
}
