//! # Decode Tests
//!
//! Field extraction and immediate decoding, checked against instructions
//! encoded by the test builder.

use proptest::prelude::*;
use rvmini_core::isa::decode::{imm_b, imm_i, imm_j, imm_s, imm_u, sign_extend};
use rvmini_core::isa::instruction::InstructionBits;

use crate::common::InstructionBuilder;

fn b() -> InstructionBuilder {
    InstructionBuilder::new()
}

#[test]
fn fields_of_an_r_type() {
    let inst = b().sub(3, 1, 2).build();
    assert_eq!(inst.opcode(), 0b0110011);
    assert_eq!(inst.rd(), 3);
    assert_eq!(inst.rs1(), 1);
    assert_eq!(inst.rs2(), 2);
    assert_eq!(inst.funct3(), 0);
    assert_eq!(inst.funct7(), 0b0100000);
    assert!(inst.bit(30));
}

#[test]
fn csr_field_is_the_upper_twelve_bits() {
    let inst = b().csrrs(5, 0x342, 0).build();
    assert_eq!(inst.csr(), 0x342);
    assert_eq!(inst.funct3(), 0b010);
}

#[test]
fn sign_extend_edges() {
    assert_eq!(sign_extend(0x80, 8), 0xFFFF_FF80);
    assert_eq!(sign_extend(0x7F, 8), 0x7F);
    assert_eq!(sign_extend(0x8000, 16), 0xFFFF_8000);
    assert_eq!(sign_extend(0xFFFF_FFFF, 32), 0xFFFF_FFFF);
}

#[test]
fn immediates_at_their_extremes() {
    assert_eq!(imm_i(b().addi(1, 0, -2048).build()), (-2048_i32) as u32);
    assert_eq!(imm_i(b().addi(1, 0, 2047).build()), 2047);
    assert_eq!(imm_s(b().sw(1, 2, -1).build()), u32::MAX);
    assert_eq!(imm_b(b().beq(0, 0, -4096).build()), (-4096_i32) as u32);
    assert_eq!(imm_j(b().jal(0, 0xF_FFFE).build()), 0xF_FFFE);
    assert_eq!(imm_u(b().lui(1, 0xFFFFF).build()), 0xFFFF_F000);
}

proptest! {
    #[test]
    fn i_immediate_round_trips(imm in -2048i32..2048) {
        prop_assert_eq!(imm_i(b().addi(1, 2, imm).build()) as i32, imm);
    }

    #[test]
    fn s_immediate_round_trips(imm in -2048i32..2048) {
        prop_assert_eq!(imm_s(b().sw(1, 2, imm).build()) as i32, imm);
    }

    #[test]
    fn b_immediate_round_trips(half in -2048i32..2048) {
        let imm = half * 2;
        prop_assert_eq!(imm_b(b().bne(1, 2, imm).build()) as i32, imm);
    }

    #[test]
    fn j_immediate_round_trips(half in -(1i32 << 19)..(1 << 19)) {
        let imm = half * 2;
        prop_assert_eq!(imm_j(b().jal(1, imm).build()) as i32, imm);
    }
}
