//! Simulation statistics collection and reporting.
//!
//! This module tracks performance metrics of the core model. It provides:
//! 1. **Cycle and CPI:** Total cycles, retired instructions, and derived CPI/IPC.
//! 2. **Traps:** Exceptions and interrupts taken.
//! 3. **Functional units:** Multiply/divide operations issued.
//! 4. **Bus waits:** Cycles spent waiting on the instruction and data channels.
//! 5. **Controller:** Cycles spent in each controller state.

use std::time::Instant;

use crate::core::pipeline::state::CoreState;

/// Simulation statistics structure tracking all performance metrics.
#[derive(Clone, Debug)]
pub struct SimStats {
    start_time: Instant,
    /// Total simulator cycles elapsed.
    pub cycles: u64,
    /// Number of instructions retired.
    pub instructions_retired: u64,
    /// Synchronous exceptions taken.
    pub exceptions: u64,
    /// Interrupts taken.
    pub interrupts: u64,
    /// Multiply/divide operations started.
    pub mdu_ops: u64,
    /// CSR instructions that named an unimplemented CSR.
    pub invalid_csr_accesses: u64,
    /// Cycles in `Fetch` waiting for the instruction channel.
    pub fetch_wait_cycles: u64,
    /// Cycles in `Mem` waiting for the data channel.
    pub data_wait_cycles: u64,
    /// Cycles spent in each controller state, indexed by [`CoreState::index`].
    pub state_cycles: [u64; CoreState::COUNT],
}

impl Default for SimStats {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            cycles: 0,
            instructions_retired: 0,
            exceptions: 0,
            interrupts: 0,
            mdu_ops: 0,
            invalid_csr_accesses: 0,
            fetch_wait_cycles: 0,
            data_wait_cycles: 0,
            state_cycles: [0; CoreState::COUNT],
        }
    }
}

impl SimStats {
    /// Total traps taken (exceptions and interrupts).
    pub const fn traps_taken(&self) -> u64 {
        self.exceptions + self.interrupts
    }

    /// Cycles per retired instruction, or 0 when nothing retired.
    pub fn cpi(&self) -> f64 {
        if self.instructions_retired == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_retired as f64
        }
    }

    /// Prints the statistics summary to stdout.
    pub fn print(&self) {
        let seconds = self.start_time.elapsed().as_secs_f64();
        let cyc = self.cycles.max(1) as f64;
        let khz = if seconds > 0.0 { (self.cycles as f64 / seconds) / 1000.0 } else { 0.0 };
        let pct = |n: u64| (n as f64 / cyc) * 100.0;

        println!("\n==========================================================");
        println!("RV32IM CORE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("host_seconds             {seconds:.4} s");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_freq                 {khz:.2} kHz");
        println!("sim_insts                {}", self.instructions_retired);
        println!("sim_ipc                  {:.4}", self.instructions_retired as f64 / cyc);
        println!("sim_cpi                  {:.4}", self.cpi());
        println!("----------------------------------------------------------");
        println!("TRAPS AND UNITS");
        println!("  traps.exceptions       {}", self.exceptions);
        println!("  traps.interrupts       {}", self.interrupts);
        println!("  mdu.ops                {}", self.mdu_ops);
        println!("  csr.invalid            {}", self.invalid_csr_accesses);
        println!(
            "  wait.fetch             {} ({:.2}%)",
            self.fetch_wait_cycles,
            pct(self.fetch_wait_cycles)
        );
        println!(
            "  wait.data              {} ({:.2}%)",
            self.data_wait_cycles,
            pct(self.data_wait_cycles)
        );
        println!("----------------------------------------------------------");
        println!("CONTROLLER STATES");
        for state in CoreState::ALL {
            let n = self.state_cycles[state.index()];
            println!("  state.{:<16} {} ({:.2}%)", state, n, pct(n));
        }
        println!("==========================================================");
    }
}
