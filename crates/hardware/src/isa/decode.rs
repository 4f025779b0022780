//! RISC-V Immediate Decoder.
//!
//! Extracts and sign-extends the immediate of each RV32I instruction format
//! (I, S, B, U, J). All results are returned as two's-complement `u32` values so
//! they can be added to addresses with wrapping arithmetic.

/// Bit shift for extracting I-Type immediate field (bits 20-31).
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
const I_IMM_SHIFT: u32 = 20;

/// Total number of bits in I-Type and S-Type immediates.
const IS_IMM_BITS: u32 = 12;

/// Bit shift for extracting S-Type immediate low field (bits 7-11).
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
const S_IMM_LOW_SHIFT: u32 = 7;

/// Bit mask for S-Type immediate low field (5 bits: imm[4:0]).
const S_IMM_LOW_MASK: u32 = 0x1F;

/// Bit shift for extracting S-Type immediate high field (bits 25-31).
const S_IMM_HIGH_SHIFT: u32 = 25;

/// Bit mask for S-Type immediate high field (7 bits: imm[11:5]).
const S_IMM_HIGH_MASK: u32 = 0x7F;

/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
const B_IMM_BITS: u32 = 13;

/// Mask retaining the U-Type immediate in place (bits 12-31).
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
const J_IMM_BITS: u32 = 21;

/// Sign-extends the low `bits` bits of `value` to 32 bits.
#[inline(always)]
pub const fn sign_extend(value: u32, bits: u32) -> u32 {
    let shift = 32 - bits;
    (((value << shift) as i32) >> shift) as u32
}

/// Decodes the sign-extended I-Type immediate.
#[inline(always)]
pub const fn imm_i(inst: u32) -> u32 {
    ((inst as i32) >> I_IMM_SHIFT) as u32
}

/// Decodes the sign-extended S-Type immediate.
#[inline(always)]
pub const fn imm_s(inst: u32) -> u32 {
    let low = (inst >> S_IMM_LOW_SHIFT) & S_IMM_LOW_MASK;
    let high = (inst >> S_IMM_HIGH_SHIFT) & S_IMM_HIGH_MASK;
    sign_extend((high << 5) | low, IS_IMM_BITS)
}

/// Decodes the sign-extended B-Type immediate (always even).
#[inline(always)]
pub const fn imm_b(inst: u32) -> u32 {
    let bit11 = (inst >> 7) & 0x1;
    let bits4_1 = (inst >> 8) & 0xF;
    let bits10_5 = (inst >> 25) & 0x3F;
    let bit12 = (inst >> 31) & 0x1;
    sign_extend(
        (bit12 << 12) | (bit11 << 11) | (bits10_5 << 5) | (bits4_1 << 1),
        B_IMM_BITS,
    )
}

/// Decodes the U-Type immediate, already positioned in bits 12-31.
#[inline(always)]
pub const fn imm_u(inst: u32) -> u32 {
    inst & U_IMM_MASK
}

/// Decodes the sign-extended J-Type immediate (always even).
#[inline(always)]
pub const fn imm_j(inst: u32) -> u32 {
    let bits19_12 = (inst >> 12) & 0xFF;
    let bit11 = (inst >> 20) & 0x1;
    let bits10_1 = (inst >> 21) & 0x3FF;
    let bit20 = (inst >> 31) & 0x1;
    sign_extend(
        (bit20 << 20) | (bits19_12 << 12) | (bit11 << 11) | (bits10_1 << 1),
        J_IMM_BITS,
    )
}
