//! # ALU Tests
//!
//! Edge-case vectors and algebraic properties for every function code,
//! including the unimplemented selector and the reversal-based left shift.

use proptest::prelude::*;
use rstest::rstest;
use rvmini_core::core::units::alu::shifts::shift_left;
use rvmini_core::core::units::alu::{Alu, AluOp, MODIFIER_BIT};

// ─── Constants ───────────────────────────────────────────────────────────────

const NEG1: u32 = u32::MAX;
const I32_MAX: u32 = i32::MAX as u32;
const I32_MIN: u32 = i32::MIN as u32;

// ═════════════════════════════════════════════════════════════════════════════
//  Deterministic vectors
// ═════════════════════════════════════════════════════════════════════════════

#[rstest]
#[case::add(AluOp::Add, 42, 8, 50)]
#[case::add_wraps(AluOp::Add, NEG1, 1, 0)]
#[case::sub(AluOp::Sub, 10, 3, 7)]
#[case::sub_borrows(AluOp::Sub, 0, 1, NEG1)]
#[case::slt_signed(AluOp::Slt, NEG1, 0, 1)]
#[case::slt_false(AluOp::Slt, 0, NEG1, 0)]
#[case::slt_boundaries(AluOp::Slt, I32_MIN, I32_MAX, 1)]
#[case::sltu_unsigned(AluOp::Sltu, 0, NEG1, 1)]
#[case::sltu_false(AluOp::Sltu, NEG1, 0, 0)]
#[case::xor(AluOp::Xor, 0xF0F0_F0F0, 0xFFFF_0000, 0x0F0F_F0F0)]
#[case::or(AluOp::Or, 0xF000_000F, 0x0F00_00F0, 0xFF00_00FF)]
#[case::and(AluOp::And, 0xFF00_FF00, 0x0FF0_0FF0, 0x0F00_0F00)]
#[case::srl(AluOp::Srl, 0x8000_0000, 31, 1)]
#[case::sra(AluOp::Sra, 0x8000_0000, 31, NEG1)]
#[case::srl_masks_shamt(AluOp::Srl, 0x100, 36, 0x10)]
#[case::sra_positive(AluOp::Sra, 0x4000_0000, 30, 1)]
fn alu_vectors(#[case] op: AluOp, #[case] a: u32, #[case] b: u32, #[case] expected: u32) {
    assert_eq!(Alu::apply(op, a, b), expected);
    assert_eq!(Alu::execute(op.code(), a, b), expected);
}

#[test]
fn function_codes_match_funct3_layout() {
    assert_eq!(AluOp::Add.code(), 0b0000);
    assert_eq!(AluOp::Sub.code(), 0b1000);
    assert_eq!(AluOp::Slt.code(), 0b0010);
    assert_eq!(AluOp::Sltu.code(), 0b0011);
    assert_eq!(AluOp::Xor.code(), 0b0100);
    assert_eq!(AluOp::Srl.code(), 0b0101);
    assert_eq!(AluOp::Sra.code(), 0b1101);
    assert_eq!(AluOp::Or.code(), 0b0110);
    assert_eq!(AluOp::And.code(), 0b0111);
}

#[test]
fn selector_001_yields_zero() {
    assert_eq!(AluOp::from_code(0b0001), None);
    assert_eq!(Alu::execute(0b0001, 0xFFFF_FFFF, 3), 0);
    assert_eq!(Alu::execute(0b1001, 0x1234, 1), 0);
}

#[test]
fn shift_left_by_zero_and_all_bits() {
    assert_eq!(shift_left(0xDEAD_BEEF, 0), 0xDEAD_BEEF);
    assert_eq!(shift_left(1, 31), 0x8000_0000);
    assert_eq!(shift_left(1, 32), 1);
}

// ═════════════════════════════════════════════════════════════════════════════
//  Properties
// ═════════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn add_matches_wrapping_add(a: u32, b: u32) {
        prop_assert_eq!(Alu::execute(AluOp::Add.code(), a, b), a.wrapping_add(b));
    }

    #[test]
    fn sub_is_add_of_twos_complement(a: u32, b: u32) {
        prop_assert_eq!(Alu::execute(AluOp::Sub.code(), a, b), a.wrapping_sub(b));
        prop_assert_eq!(
            Alu::execute(AluOp::Sub.code(), a, b),
            Alu::execute(AluOp::Add.code(), a, (!b).wrapping_add(1))
        );
    }

    #[test]
    fn comparisons_match_native(a: u32, b: u32) {
        prop_assert_eq!(Alu::execute(AluOp::Slt.code(), a, b), u32::from((a as i32) < (b as i32)));
        prop_assert_eq!(Alu::execute(AluOp::Sltu.code(), a, b), u32::from(a < b));
    }

    #[test]
    fn bitwise_ops_match_native(a: u32, b: u32) {
        prop_assert_eq!(Alu::execute(AluOp::Xor.code(), a, b), a ^ b);
        prop_assert_eq!(Alu::execute(AluOp::Or.code(), a, b), a | b);
        prop_assert_eq!(Alu::execute(AluOp::And.code(), a, b), a & b);
    }

    #[test]
    fn right_shifts_use_low_five_bits(a: u32, b: u32) {
        prop_assert_eq!(Alu::execute(AluOp::Srl.code(), a, b), a >> (b & 31));
        prop_assert_eq!(
            Alu::execute(AluOp::Sra.code(), a, b),
            ((a as i32) >> (b & 31)) as u32
        );
    }

    #[test]
    fn reversal_left_shift_matches_shl(a: u32, b: u32) {
        prop_assert_eq!(shift_left(a, b), a << (b & 31));
    }

    #[test]
    fn modifier_only_affects_add_and_srl(a: u32, b: u32, sel in 0u32..8) {
        let plain = Alu::execute(sel, a, b);
        let modified = Alu::execute(sel | MODIFIER_BIT, a, b);
        if sel != 0b000 && sel != 0b101 {
            prop_assert_eq!(plain, modified);
        }
    }
}
