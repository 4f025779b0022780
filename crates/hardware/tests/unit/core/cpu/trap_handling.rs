//! # Trap Handling Tests
//!
//! Trap entry for misaligned fetches, `ECALL` and `EBREAK`, direct and
//! vectored `mtvec` modes, and the return path through `MRET`.

use pretty_assertions::assert_eq;
use rvmini_core::core::arch::csr;
use rvmini_core::core::cpu::State;

use crate::common::harness::padded;
use crate::common::{InstructionBuilder, TestContext};

fn b() -> InstructionBuilder {
    InstructionBuilder::new()
}

/// MIE bit in `mstatus`.
const MSTATUS_MIE: u32 = 1 << 3;

fn context(program: &[u32]) -> TestContext {
    TestContext::new(&padded(program, 0x60))
}

#[test]
fn misaligned_pc_traps_before_fetch() {
    let mut ctx = context(&[]);
    ctx.set_mtvec(0x100, false);
    ctx.set_csr(csr::MSTATUS, MSTATUS_MIE);
    ctx.cpu_mut().pc = 0x105;

    let (ireq, _) = ctx.sim.bus_requests();
    assert!(!ireq.cyc, "no bus activity for a misaligned PC");

    let ticks = ctx.step();
    assert_eq!(ticks, 2);
    assert_eq!(ctx.pc(), 0x100);
    assert_eq!(ctx.csr(csr::MCAUSE), 1);
    assert_eq!(ctx.csr(csr::MEPC), 0x104);
    assert_eq!(ctx.csr(csr::MTVAL), 0x105);
    assert_eq!(ctx.csr(csr::MSTATUS) & MSTATUS_MIE, 0);
    assert_eq!(ctx.sim.minstret(), 0);
}

#[test]
fn vectored_mode_offsets_by_cause() {
    let mut ctx = context(&[]);
    ctx.set_mtvec(0x100, true);
    ctx.cpu_mut().pc = 0x101;
    ctx.run(1);
    assert_eq!(ctx.pc(), 0x104);
    assert_eq!(ctx.csr(csr::MEPC), 0x100);
}

#[test]
fn ecall_traps_with_cause_11() {
    let mut ctx = context(&[b().nop().build(), b().ecall().build()]);
    ctx.set_mtvec(0x100, false);
    ctx.set_csr(csr::MTVAL, 0x55);
    ctx.run(2);

    assert_eq!(ctx.pc(), 0x100);
    assert_eq!(ctx.csr(csr::MCAUSE), 11);
    assert_eq!(ctx.csr(csr::MEPC), 4);
    assert_eq!(ctx.csr(csr::MTVAL), 0x55, "ECALL leaves mtval alone");
    assert_eq!(ctx.cpu().state, State::Fetch);
}

#[test]
fn ebreak_traps_with_cause_3() {
    let mut ctx = context(&[b().ebreak().build()]);
    ctx.set_mtvec(0x80, false);
    ctx.set_csr(csr::MTVAL, 0x77);
    ctx.set_csr(csr::MSTATUS, MSTATUS_MIE);
    ctx.run(1);

    assert_eq!(ctx.pc(), 0x80);
    assert_eq!(ctx.csr(csr::MCAUSE), 3);
    assert_eq!(ctx.csr(csr::MEPC), 0);
    assert_eq!(ctx.csr(csr::MTVAL), 0x77);
    assert_eq!(ctx.csr(csr::MSTATUS) & MSTATUS_MIE, 0);
}

#[test]
fn vectored_ecall_lands_at_base_plus_44() {
    let mut ctx = context(&[b().ecall().build()]);
    ctx.set_mtvec(0x100, true);
    ctx.run(1);
    assert_eq!(ctx.pc(), 0x100 + 4 * 11);
}

#[test]
fn trap_vector_helper_matches_execution() {
    let mut ctx = context(&[b().ebreak().build()]);
    ctx.set_mtvec(0x40, true);
    let expected = ctx.cpu().trap_vector(3);
    ctx.run(1);
    assert_eq!(ctx.pc(), expected);
    assert_eq!(expected, 0x4C);
}

#[test]
fn mret_returns_to_mepc_and_enables_interrupts() {
    let mut ctx = context(&[b().mret().build()]);
    ctx.set_csr(csr::MEPC, 0x40);
    ctx.run(1);
    assert_eq!(ctx.pc(), 0x40);
    assert_eq!(ctx.csr(csr::MSTATUS), MSTATUS_MIE);
    assert_eq!(ctx.sim.stats().traps_taken, 0);
}

#[test]
fn handler_skips_ecall_and_returns() {
    let mut program = vec![
        b().ecall().build(),
        b().addi(6, 0, 1).build(),
        b().jal(0, 0).build(),
    ];
    program.resize(0x40, b().nop().build());
    program.extend([
        b().csrrs(5, csr::MEPC, 0).build(),
        b().addi(5, 5, 4).build(),
        b().csrrw(0, csr::MEPC, 5).build(),
        b().mret().build(),
    ]);
    let mut ctx = TestContext::new(&program);
    ctx.set_mtvec(0x100, false);

    ctx.run(1);
    assert_eq!(ctx.pc(), 0x100);
    ctx.run(4);
    assert_eq!(ctx.pc(), 4);
    assert_eq!(ctx.csr(csr::MSTATUS), MSTATUS_MIE);
    ctx.run(1);
    assert_eq!(ctx.get_reg(6), 1);
    assert_eq!(ctx.get_reg(5), 4);
    assert_eq!(ctx.sim.stats().traps_taken, 1);
}

#[test]
fn trap_commits_no_register_write() {
    let mut ctx = context(&[b().ecall().build()]);
    ctx.set_reg(1, 0x1234);
    let before = ctx.cpu().regs.clone();
    ctx.run(1);
    assert_eq!(ctx.cpu().regs, before);
}
