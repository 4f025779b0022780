//! Trap Handling Logic.
//!
//! This module implements synchronous trap entry and `MRET`. It performs the
//! following:
//! 1. **Vector Selection:** Computes the handler address from `mtvec`, direct or
//!    vectored by cause.
//! 2. **Context Saving:** Writes `mcause`, `mepc`, `mtval` and clears
//!    `mstatus.mie` in the same commit that redirects the PC.
//! 3. **Return Handling:** `MRET` restores the PC from `mepc` and sets
//!    `mstatus.mie`.

use tracing::debug;

use super::{Cpu, CsrEffect, Event, NextState, State};
use crate::common::Trap;
use crate::core::arch::csr::{self, field};
use crate::isa::privileged::cause::INTERRUPT_FLAG_EXCEPTION;

/// Word-aligned CSR fields (`mtvec.base`, `mepc`) are stored without their two
/// low address bits.
const WORD_FIELD_SHIFT: u32 = 2;

impl Cpu {
    /// Handler address for `cause` under the current `mtvec`.
    pub fn trap_vector(&self, cause: u32) -> u32 {
        let base = self.csrs.field(csr::MTVEC, field::BASE);
        let vectored = self.csrs.field(csr::MTVEC, field::MODE) != 0;
        let slot = if vectored { cause } else { 0 };
        base.wrapping_add(slot) << WORD_FIELD_SHIFT
    }

    /// `TrapEntry`: redirect to the handler and record the trap context.
    pub(super) fn trap_entry(&self, next: NextState, trap: Trap, epc: u32) -> NextState {
        NextState {
            pc: self.trap_vector(trap.cause()),
            csr: Some(CsrEffect::TrapEntry { trap, epc }),
            event: Event::Trap,
            ..next.goto(State::Fetch)
        }
    }

    /// `MRET`: return to the address held in `mepc`.
    pub(super) fn mret(&self, seq: NextState) -> NextState {
        NextState {
            pc: self.csrs.field(csr::MEPC, field::MEPC) << WORD_FIELD_SHIFT,
            csr: Some(CsrEffect::Mret),
            ..seq
        }
    }

    pub(super) fn record_trap(&mut self, trap: Trap, epc: u32) {
        debug!(
            trap = %trap,
            cause = trap.cause(),
            epc = format_args!("{epc:#010x}"),
            "trap: entry"
        );
        self.csrs
            .set_field(csr::MCAUSE, field::INTERRUPT, INTERRUPT_FLAG_EXCEPTION);
        self.csrs.set_field(csr::MCAUSE, field::ECODE, trap.cause());
        self.csrs
            .set_field(csr::MEPC, field::MEPC, epc >> WORD_FIELD_SHIFT);
        self.csrs.set_field(csr::MSTATUS, field::MIE, 0);
        if let Some(tval) = trap.tval() {
            self.csrs.set_field(csr::MTVAL, field::EINFO, tval);
        }
    }

    pub(super) fn record_mret(&mut self) {
        debug!(
            pc = format_args!(
                "{:#010x}",
                self.csrs.field(csr::MEPC, field::MEPC) << WORD_FIELD_SHIFT
            ),
            "trap: mret"
        );
        self.csrs.set_field(csr::MSTATUS, field::MIE, 1);
    }
}
