//! Load and Store Sequencing.
//!
//! This module implements the `MemWait` state. It performs the following:
//! 1. **Alignment:** Misaligned effective addresses trap before any bus cycle.
//! 2. **Bus Requests:** Holds the data-bus cycle with width and store data
//!    until the target acknowledges.
//! 3. **Load Extension:** Sign- or zero-extends the returned lanes.

use super::{Cpu, Event, NextState, State};
use crate::common::constants::INSTRUCTION_SIZE;
use crate::common::{AccessType, Trap, Width};
use crate::isa::decode::sign_extend;
use crate::isa::instruction::InstructionBits;
use crate::isa::rv32i::funct3::LOAD_UNSIGNED_BIT;
use crate::isa::rv32i::opcodes::OP_STORE;
use crate::soc::traits::{BusRequest, BusResponse};

impl Cpu {
    /// Direction of the latched load or store.
    pub(super) fn access_type(&self) -> AccessType {
        if self.ir.opcode() == OP_STORE {
            AccessType::Write
        } else {
            AccessType::Read
        }
    }

    /// Data-bus request for a load or store at `addr`, idle when misaligned.
    pub(super) fn data_request(&self, addr: u32) -> BusRequest {
        let width = Width::from_funct3(self.ir.funct3());
        if !width.is_aligned(addr) {
            return BusRequest::IDLE;
        }
        match self.access_type() {
            AccessType::Write => {
                BusRequest::write(addr, self.regs.read(self.ir.rs2()), width)
            }
            AccessType::Read => BusRequest::load(addr, width),
        }
    }

    pub(super) fn mem_wait(&self, next: NextState, addr: u32, resp: BusResponse) -> NextState {
        let funct3 = self.ir.funct3();
        let width = Width::from_funct3(funct3);
        let access = self.access_type();

        if !width.is_aligned(addr) {
            let trap = match access {
                AccessType::Write => Trap::StoreAddressMisaligned(addr),
                AccessType::Read => Trap::LoadAddressMisaligned(addr),
            };
            return next.goto(State::TrapEntry { trap, epc: self.pc });
        }
        if !resp.ack {
            return NextState {
                event: Event::MemStall,
                ..next
            };
        }

        let done = NextState {
            pc: self.pc.wrapping_add(INSTRUCTION_SIZE),
            ..next.goto(State::Fetch)
        };
        match access {
            AccessType::Write => NextState {
                event: Event::Store,
                ..done
            },
            AccessType::Read => NextState {
                rd: Some((self.ir.rd(), extend_load(resp.data, funct3))),
                event: Event::Load,
                ..done
            },
        }
    }
}

/// Extends the low lanes of a load result according to `funct3`.
///
/// ```
/// use rvmini_core::core::cpu::memory::extend_load;
///
/// assert_eq!(extend_load(0x0000_0080, 0b000), 0xFFFF_FF80); // LB
/// assert_eq!(extend_load(0x0000_0080, 0b100), 0x0000_0080); // LBU
/// assert_eq!(extend_load(0x1234_8000, 0b001), 0xFFFF_8000); // LH
/// ```
pub const fn extend_load(data: u32, funct3: u32) -> u32 {
    let width = Width::from_funct3(funct3);
    let raw = data & width.mask();
    if funct3 & LOAD_UNSIGNED_BIT != 0 || matches!(width, Width::Word) {
        raw
    } else {
        sign_extend(raw, width.bytes() * 8)
    }
}
