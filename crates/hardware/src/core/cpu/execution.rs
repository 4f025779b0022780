//! Instruction Decode and Execute.
//!
//! This module implements the `DecodeExecute` state. It performs the following:
//! 1. **Decode:** Splits the latched instruction into fields and immediates.
//! 2. **Execute:** Runs the ALU for arithmetic, comparisons and address
//!    arithmetic. Left shifts go through the bit-reversal path.
//! 3. **Control Flow:** Resolves jumps, branches and system instructions, and
//!    hands loads and stores over to `MemWait`.
//!
//! Every operand is read from the current state; the result is a `NextState`.

use super::{Cpu, CsrEffect, Event, NextState, State};
use crate::common::Trap;
use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::units::alu::shifts::shift_left;
use crate::core::units::alu::{Alu, AluOp, MODIFIER_BIT};
use crate::isa::decode::{imm_b, imm_i, imm_j, imm_s, imm_u};
use crate::isa::instruction::InstructionBits;
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3 as f3, opcodes as op};

/// Instruction bit carrying the SUB/SRA modifier.
const MODIFIER_INST_BIT: u32 = 30;

/// Branch `funct3` bit selecting BNE/BGE/BGEU (inverted condition).
const BRANCH_INVERT_BIT: u32 = 12;

/// Branch `funct3` bit selecting unsigned comparison.
const BRANCH_UNSIGNED_BIT: u32 = 13;

/// Branch `funct3` bit selecting a less-than comparison.
const BRANCH_COMPARE_BIT: u32 = 14;

impl Cpu {
    /// Executes the latched instruction.
    pub(super) fn decode_execute(&self, next: NextState) -> NextState {
        let inst = self.ir;
        let pc = self.pc;
        let rs1 = self.regs.read(inst.rs1());
        let rs2 = self.regs.read(inst.rs2());
        let rd = inst.rd();
        let seq = NextState {
            pc: pc.wrapping_add(INSTRUCTION_SIZE),
            ..next.goto(State::Fetch)
        };

        match inst.opcode() {
            op::OP_LUI => NextState {
                rd: Some((rd, imm_u(inst))),
                ..seq
            },
            op::OP_AUIPC => NextState {
                rd: Some((rd, pc.wrapping_add(imm_u(inst)))),
                ..seq
            },
            op::OP_REG => NextState {
                rd: Some((rd, Self::alu_reg(inst, rs1, rs2))),
                ..seq
            },
            op::OP_IMM => NextState {
                rd: Some((rd, Self::alu_imm(inst, rs1))),
                ..seq
            },
            op::OP_JAL => NextState {
                pc: pc.wrapping_add(imm_j(inst)),
                rd: Some((rd, seq.pc)),
                ..seq
            },
            op::OP_JALR => NextState {
                pc: rs1.wrapping_add(imm_i(inst)),
                rd: Some((rd, seq.pc)),
                ..seq
            },
            op::OP_BRANCH => {
                if Self::branch_taken(inst, rs1, rs2) {
                    NextState {
                        pc: pc.wrapping_add(imm_b(inst)),
                        event: Event::BranchTaken,
                        ..seq
                    }
                } else {
                    seq
                }
            }
            op::OP_LOAD => next.goto(State::MemWait {
                addr: rs1.wrapping_add(imm_i(inst)),
            }),
            op::OP_STORE => next.goto(State::MemWait {
                addr: rs1.wrapping_add(imm_s(inst)),
            }),
            sys_op::OP_SYSTEM => self.system(inst, rs1, next, seq),
            // FENCE and encodings outside RV32I fall through as no-ops.
            _ => seq,
        }
    }

    fn alu_reg(inst: u32, a: u32, b: u32) -> u32 {
        let funct3 = inst.funct3();
        if funct3 == f3::SLL {
            return shift_left(a, b);
        }
        Alu::execute(funct3 | modifier(inst), a, b)
    }

    fn alu_imm(inst: u32, a: u32) -> u32 {
        let funct3 = inst.funct3();
        let imm = imm_i(inst);
        match funct3 {
            f3::SLL => shift_left(a, imm),
            f3::SRL_SRA => Alu::execute(funct3 | modifier(inst), a, imm),
            _ => Alu::execute(funct3, a, imm),
        }
    }

    /// BEQ/BNE subtract, BLT/BGE use SLT and BLTU/BGEU use SLTU. The result is
    /// zero when the operands are equal (SUB) or the less-than test fails
    /// (SLT/SLTU).
    fn branch_taken(inst: u32, a: u32, b: u32) -> bool {
        let compare = inst.bit(BRANCH_COMPARE_BIT);
        let op = match (compare, inst.bit(BRANCH_UNSIGNED_BIT)) {
            (false, _) => AluOp::Sub,
            (true, false) => AluOp::Slt,
            (true, true) => AluOp::Sltu,
        };
        let zero = Alu::apply(op, a, b) == 0;
        (zero ^ inst.bit(BRANCH_INVERT_BIT)) != compare
    }

    fn system(&self, inst: u32, rs1: u32, next: NextState, seq: NextState) -> NextState {
        let funct3 = inst.funct3();
        if funct3 != sys_op::F3_TRAPS {
            let addr = inst.csr();
            return NextState {
                rd: Some((inst.rd(), self.csrs.read(addr))),
                csr: Some(CsrEffect::Apply {
                    addr,
                    funct3,
                    operand: Self::csr_operand(inst, rs1),
                }),
                ..seq
            };
        }
        let trap = match inst.csr() {
            sys_op::IMM_ECALL => Trap::EnvironmentCallFromMMode,
            sys_op::IMM_EBREAK => Trap::Breakpoint,
            sys_op::IMM_MRET => return self.mret(seq),
            _ => return seq,
        };
        next.goto(State::TrapEntry { trap, epc: self.pc })
    }
}

/// ALU modifier selected by instruction bit 30.
const fn modifier(inst: u32) -> u32 {
    if (inst >> MODIFIER_INST_BIT) & 1 == 1 {
        MODIFIER_BIT
    } else {
        0
    }
}
