//! Simulator: owns the core and the memory system side-by-side.
//!
//! Each `tick` runs the two-phase protocol: the core drives its bus requests,
//! the router answers from registered target state, the core computes its
//! next state, the targets clock, and finally the core commits.

use tracing::{info, warn};

use crate::common::SimError;
use crate::common::constants::{RAM_BASE, RAM_REGION_SIZE};
use crate::config::Config;
use crate::core::Cpu;
use crate::core::cpu::State;
use crate::soc::traits::BusRequest;
use crate::soc::{BootImage, BusKind, System};
use crate::stats::SimStats;

/// Top-level simulator: core architectural state plus memory system.
#[derive(Debug)]
pub struct Simulator {
    /// Core state (registers, CSRs, control FSM, stats).
    pub cpu: Cpu,
    /// Router and stores.
    pub system: System,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator over an assembled system.
    pub fn new(system: System, config: &Config) -> Self {
        info!(max_cycles = config.general.max_cycles, "simulator: ready");
        Self {
            cpu: Cpu::new(config),
            system,
            max_cycles: config.general.max_cycles,
        }
    }

    /// Builds the system from `config` and a boot image, then the simulator.
    ///
    /// # Errors
    ///
    /// Propagates `System::new` errors for empty or oversized images.
    pub fn from_image(config: &Config, image: impl Into<BootImage>) -> Result<Self, SimError> {
        let system = System::new(config, image.into())?;
        Ok(Self::new(system, config))
    }

    /// Advances the whole model by one clock tick.
    pub fn tick(&mut self) {
        let (ireq, dreq) = self.cpu.bus_requests();
        let router = &mut self.system.router;
        let iresp = router.response(BusKind::Instruction, &ireq);
        let dresp = router.response(BusKind::Data, &dreq);
        let next = self.cpu.next_state(iresp, dresp);
        router.clock(&ireq, &dreq);
        self.cpu.commit(next);
    }

    /// Runs exactly `cycles` ticks.
    pub fn run_cycles(&mut self, cycles: u64) {
        for _ in 0..cycles {
            self.tick();
        }
    }

    /// Runs until the current instruction finishes: the core is back in
    /// `Fetch` after completing it or after entering a trap handler.
    ///
    /// # Errors
    ///
    /// Returns `SimError::CycleBudgetExceeded` if the instruction does not
    /// finish within the configured cycle budget, e.g. when it targets an
    /// unmapped address.
    pub fn step(&mut self) -> Result<(), SimError> {
        let deadline = self.cpu.stats.cycles.saturating_add(self.max_cycles);
        self.step_until(deadline)
    }

    /// Runs `count` instructions within one cycle budget.
    ///
    /// # Errors
    ///
    /// Returns `SimError::CycleBudgetExceeded` if the budget runs out first.
    pub fn run_instructions(&mut self, count: u64) -> Result<(), SimError> {
        let deadline = self.cpu.stats.cycles.saturating_add(self.max_cycles);
        for _ in 0..count {
            self.step_until(deadline)?;
        }
        Ok(())
    }

    /// Runs until the PC equals `pc` at an instruction boundary.
    ///
    /// # Errors
    ///
    /// Returns `SimError::CycleBudgetExceeded` if `pc` is not reached in time.
    pub fn run_until_pc(&mut self, pc: u32) -> Result<(), SimError> {
        let deadline = self.cpu.stats.cycles.saturating_add(self.max_cycles);
        while !(self.cpu.pc == pc && self.cpu.state == State::Fetch) {
            self.step_until(deadline)?;
        }
        Ok(())
    }

    fn step_until(&mut self, deadline: u64) -> Result<(), SimError> {
        loop {
            if self.cpu.stats.cycles >= deadline {
                let stats = &self.cpu.stats;
                warn!(
                    cycles = stats.cycles,
                    pc = format_args!("{:#010x}", self.cpu.pc),
                    "simulator: cycle budget exhausted"
                );
                return Err(SimError::CycleBudgetExceeded {
                    cycles: stats.cycles,
                    retired: stats.instructions_retired,
                });
            }
            self.tick();
            if self.cpu.state == State::Fetch {
                return Ok(());
            }
        }
    }

    /// Resets the core and all bus targets. Memory contents are kept.
    pub fn reset(&mut self) {
        self.cpu.reset();
        self.system.router.reset();
    }

    /// Overrides the cycle budget used by `step` and the `run_*` helpers.
    pub const fn set_max_cycles(&mut self, max_cycles: u64) {
        self.max_cycles = max_cycles;
    }

    /// Current program counter.
    pub const fn pc(&self) -> u32 {
        self.cpu.pc
    }

    /// Value of integer register `idx`.
    pub const fn reg(&self, idx: usize) -> u32 {
        self.cpu.regs.read(idx)
    }

    /// The aligned RAM word containing byte address `addr`, or `None` outside RAM.
    pub fn ram_word(&self, addr: u32) -> Option<u32> {
        let offset = addr.checked_sub(RAM_BASE).filter(|&o| o < RAM_REGION_SIZE)?;
        self.system.ram().map(|ram| ram.word(offset))
    }

    /// Retired-instruction counter (16-bit field of `minstret`).
    pub fn minstret(&self) -> u32 {
        self.cpu.minstret()
    }

    /// Raw CSR value; unknown addresses read 0.
    pub fn csr(&self, addr: u32) -> u32 {
        self.cpu.csrs.read(addr)
    }

    /// Performance counters.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }

    /// Requests driven this tick, for harness-side inspection.
    pub fn bus_requests(&self) -> (BusRequest, BusRequest) {
        self.cpu.bus_requests()
    }
}
