//! CPU Core Definition and Tick Protocol.
//!
//! This module defines the central `Cpu` structure, which holds the entire
//! architectural state of the core. It coordinates the following:
//! 1. **State Management:** Program counter, register file, CSR file and the
//!    instruction latch.
//! 2. **Control FSM:** The `Fetch → FetchWait → DecodeExecute (→ MemWait)`
//!    sequence, with `TrapEntry` for synchronous exceptions.
//! 3. **Two-phase Ticking:** `bus_requests` and `next_state` only read the
//!    current state; `commit` replaces it atomically. The x0 write guard lives
//!    in `commit`.

/// CSR instruction operand selection.
pub mod csr;

/// Instruction decode and execute.
pub mod execution;

/// Load and store sequencing.
pub mod memory;

/// Trap entry and return.
pub mod trap;

use tracing::trace;

use crate::common::constants::RESET_PC;
use crate::common::{RegisterFile, Trap};
use crate::config::Config;
use crate::core::arch::csr::{self as csr_regs, CsrFile};
use crate::isa::disasm::Disassembly;
use crate::soc::traits::{BusRequest, BusResponse};
use crate::stats::SimStats;

/// Control state of the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// Check PC alignment and start an instruction fetch.
    #[default]
    Fetch,
    /// Hold the fetch until the instruction bus acknowledges.
    FetchWait,
    /// Decode the latched instruction and compute its effects.
    DecodeExecute,
    /// Complete a load or store at the effective address.
    MemWait {
        /// Effective byte address.
        addr: u32,
    },
    /// Redirect to the trap handler.
    TrapEntry {
        /// The exception being taken.
        trap: Trap,
        /// PC of the faulting instruction.
        epc: u32,
    },
}

/// CSR update requested by a tick, applied in `Cpu::commit`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CsrEffect {
    /// A CSR instruction's read-modify-write.
    Apply {
        /// CSR address.
        addr: u32,
        /// Instruction `funct3`.
        funct3: u32,
        /// Register value or zero-extended immediate.
        operand: u32,
    },
    /// Record trap context in `mcause`, `mepc`, `mtval` and `mstatus`.
    TrapEntry {
        /// The exception being taken.
        trap: Trap,
        /// PC of the faulting instruction.
        epc: u32,
    },
    /// Re-enable interrupts on `MRET`.
    Mret,
    /// Count a fetched instruction in `minstret`.
    RetireFetch,
}

/// Per-tick occurrence counted in `SimStats`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Event {
    /// Nothing to count.
    #[default]
    None,
    /// Fetch still waiting for an acknowledge.
    FetchStall,
    /// Load or store still waiting for an acknowledge.
    MemStall,
    /// A load completed.
    Load,
    /// A store completed.
    Store,
    /// A conditional branch was taken.
    BranchTaken,
    /// A trap was entered.
    Trap,
}

/// Complete next state computed from the current state and bus responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NextState {
    /// Next program counter.
    pub pc: u32,
    /// Next control state.
    pub state: State,
    /// Next instruction latch.
    pub ir: u32,
    /// Register write, discarded for x0.
    pub rd: Option<(usize, u32)>,
    /// CSR update.
    pub csr: Option<CsrEffect>,
    /// Statistics event.
    pub event: Event,
}

impl NextState {
    /// Next state identical to the current one of `cpu`.
    const fn hold(cpu: &Cpu) -> Self {
        Self {
            pc: cpu.pc,
            state: cpu.state,
            ir: cpu.ir,
            rd: None,
            csr: None,
            event: Event::None,
        }
    }

    /// Moves to `state`.
    const fn goto(self, state: State) -> Self {
        Self { state, ..self }
    }
}

/// RV32I core with a single instruction latch.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// Program counter.
    pub pc: u32,
    /// Integer registers.
    pub regs: RegisterFile,
    /// Machine-mode CSRs.
    pub csrs: CsrFile,
    /// Control state.
    pub state: State,
    /// Latched instruction word.
    pub ir: u32,
    /// Log every decoded instruction at trace level.
    pub trace: bool,
    /// Performance counters.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a core in its reset state.
    pub fn new(config: &Config) -> Self {
        Self {
            pc: RESET_PC,
            regs: RegisterFile::new(),
            csrs: CsrFile::new(),
            state: State::Fetch,
            ir: 0,
            trace: config.general.trace_instructions,
            stats: SimStats::default(),
        }
    }

    /// Returns PC, registers, CSRs and the control state to reset values.
    /// Statistics are cleared too.
    pub fn reset(&mut self) {
        self.pc = RESET_PC;
        self.regs = RegisterFile::new();
        self.csrs.reset();
        self.state = State::Fetch;
        self.ir = 0;
        self.stats = SimStats::default();
    }

    /// Retired-instruction counter field of `minstret`.
    pub fn minstret(&self) -> u32 {
        self.csrs.field(csr_regs::MINSTRET, csr_regs::field::INSTRS)
    }

    /// Bus requests driven during the current tick: `(instruction, data)`.
    pub fn bus_requests(&self) -> (BusRequest, BusRequest) {
        match self.state {
            State::Fetch if self.pc & 0b11 == 0 => (BusRequest::read(self.pc), BusRequest::IDLE),
            State::FetchWait => (BusRequest::read(self.pc), BusRequest::IDLE),
            State::MemWait { addr } => (BusRequest::IDLE, self.data_request(addr)),
            _ => (BusRequest::IDLE, BusRequest::IDLE),
        }
    }

    /// Computes the next state without modifying the current one.
    ///
    /// # Arguments
    ///
    /// * `iresp` - Registered instruction-bus response for this tick.
    /// * `dresp` - Registered data-bus response for this tick.
    pub fn next_state(&self, iresp: BusResponse, dresp: BusResponse) -> NextState {
        let next = NextState::hold(self);
        match self.state {
            State::Fetch => {
                if self.pc & 0b11 == 0 {
                    next.goto(State::FetchWait)
                } else {
                    next.goto(State::TrapEntry {
                        trap: Trap::InstructionAddressMisaligned(self.pc),
                        epc: self.pc,
                    })
                }
            }
            State::FetchWait => {
                if iresp.ack {
                    NextState {
                        ir: iresp.data,
                        csr: Some(CsrEffect::RetireFetch),
                        ..next.goto(State::DecodeExecute)
                    }
                } else {
                    NextState {
                        event: Event::FetchStall,
                        ..next
                    }
                }
            }
            State::DecodeExecute => self.decode_execute(next),
            State::MemWait { addr } => self.mem_wait(next, addr, dresp),
            State::TrapEntry { trap, epc } => self.trap_entry(next, trap, epc),
        }
    }

    /// Replaces the current state with `next`.
    pub fn commit(&mut self, next: NextState) {
        if self.trace && self.state == State::DecodeExecute {
            trace!(
                pc = format_args!("{:#010x}", self.pc),
                inst = format_args!("{:#010x}", self.ir),
                asm = %Disassembly(self.ir),
                "retire"
            );
        }

        if let Some((rd, value)) = next.rd.filter(|&(rd, _)| rd != 0) {
            self.regs.write(rd, value);
        }
        match next.csr {
            Some(CsrEffect::Apply {
                addr,
                funct3,
                operand,
            }) => {
                let _ = self.csrs.apply(addr, funct3, operand);
            }
            Some(CsrEffect::TrapEntry { trap, epc }) => self.record_trap(trap, epc),
            Some(CsrEffect::Mret) => self.record_mret(),
            Some(CsrEffect::RetireFetch) => self.count_retired(),
            None => {}
        }
        self.count_event(next.event);

        self.pc = next.pc;
        self.state = next.state;
        self.ir = next.ir;
    }

    fn count_retired(&mut self) {
        let count = self.minstret().wrapping_add(1);
        self.csrs
            .set_field(csr_regs::MINSTRET, csr_regs::field::INSTRS, count);
        self.stats.instructions_retired += 1;
    }

    const fn count_event(&mut self, event: Event) {
        self.stats.cycles += 1;
        match event {
            Event::None => {}
            Event::FetchStall => self.stats.fetch_stall_cycles += 1,
            Event::MemStall => self.stats.mem_stall_cycles += 1,
            Event::Load => self.stats.loads += 1,
            Event::Store => self.stats.stores += 1,
            Event::BranchTaken => self.stats.branches_taken += 1,
            Event::Trap => self.stats.traps_taken += 1,
        }
    }
}
