//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics for the core. It provides:
//! 1. **Cycle and CPI:** Total ticks, retired instructions, and derived rates.
//! 2. **Instruction mix:** Loads, stores, and taken branches.
//! 3. **Stalls:** Ticks spent waiting for an acknowledge on either bus.
//! 4. **Traps:** Number of trap entries.

use std::time::Instant;

/// Simulation statistics tracking per-tick and per-instruction counters.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total ticks elapsed.
    pub cycles: u64,
    /// Instructions fetched and counted, without the 16-bit `minstret` wrap.
    pub instructions_retired: u64,
    /// Trap entries taken.
    pub traps_taken: u64,
    /// Ticks spent in `FetchWait` without an acknowledge.
    pub fetch_stall_cycles: u64,
    /// Ticks spent in `MemWait` without an acknowledge.
    pub mem_stall_cycles: u64,
    /// Completed loads.
    pub loads: u64,
    /// Completed stores.
    pub stores: u64,
    /// Conditional branches taken.
    pub branches_taken: u64,
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            traps_taken: 0,
            fetch_stall_cycles: 0,
            mem_stall_cycles: 0,
            loads: 0,
            stores: 0,
            branches_taken: 0,
        }
    }
}

impl PartialEq for SimStats {
    fn eq(&self, other: &Self) -> bool {
        self.cycles == other.cycles
            && self.instructions_retired == other.instructions_retired
            && self.traps_taken == other.traps_taken
            && self.fetch_stall_cycles == other.fetch_stall_cycles
            && self.mem_stall_cycles == other.mem_stall_cycles
            && self.loads == other.loads
            && self.stores == other.stores
            && self.branches_taken == other.branches_taken
    }
}

impl SimStats {
    /// Cycles per retired instruction, or 0 before the first retirement.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints the selected report sections; an empty slice prints all of them.
    ///
    /// Sections: `summary`, `memory`, `control`.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let seconds = self.start_time.elapsed().as_secs_f64().max(f64::EPSILON);
        let cyc = self.cycles.max(1) as f64;

        if want("summary") {
            let khz = (self.cycles as f64 / seconds) / 1000.0;
            println!("\n==========================================================");
            println!("RV32I CORE SIMULATION STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_cycles               {}", self.cycles);
            println!("sim_freq                 {khz:.2} kHz");
            println!("sim_insts                {}", self.instructions_retired);
            println!("sim_cpi                  {:.4}", self.cpi());
            println!("----------------------------------------------------------");
        }
        if want("memory") {
            println!("MEMORY");
            println!("  op.load                {}", self.loads);
            println!("  op.store               {}", self.stores);
            println!(
                "  stall.fetch            {} ({:.2}%)",
                self.fetch_stall_cycles,
                self.fetch_stall_cycles as f64 / cyc * 100.0
            );
            println!(
                "  stall.mem              {} ({:.2}%)",
                self.mem_stall_cycles,
                self.mem_stall_cycles as f64 / cyc * 100.0
            );
            println!("----------------------------------------------------------");
        }
        if want("control") {
            println!("CONTROL");
            println!("  branch.taken           {}", self.branches_taken);
            println!("  trap.taken             {}", self.traps_taken);
            println!("==========================================================");
        }
    }

    /// Prints the full report.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
