//! Simulator: owns the core and the system side by side.
//!
//! Every tick is two-phase. The core computes from the responses and interrupt
//! lines the system registered last tick, and the system computes from the
//! requests the core registered last tick. Both snapshots are taken before
//! either side commits.

use tracing::info;

use crate::common::SimError;
use crate::config::Config;
use crate::core::{CoreInputs, Cpu};
use crate::core::pipeline::state::CoreState;
use crate::sim::loader::Image;
use crate::soc::System;
use crate::soc::bus::Channel;
use crate::soc::devices::TohostStatus;
use crate::stats::SimStats;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// The program reported success through `tohost`.
    Pass,
    /// The program reported failure through `tohost`.
    Fail {
        /// Failing test number (`tohost >> 1`).
        code: u32,
    },
    /// The cycle budget ran out first.
    CycleLimit,
}

/// Top-level simulator: core plus system.
#[derive(Debug)]
pub struct Simulator {
    /// CPU core.
    pub cpu: Cpu,
    /// Memories, peripherals, interconnect and interrupt lines.
    pub system: System,
    max_cycles: u64,
}

impl Simulator {
    /// Creates a simulator in its reset state.
    pub fn new(config: &Config) -> Self {
        Self {
            cpu: Cpu::new(config),
            system: System::new(config),
            max_cycles: config.general.max_cycles,
        }
    }

    /// Places an image in memory.
    ///
    /// The entry point of the image, if any, replaces the reset vector. A
    /// `tohost` symbol is monitored unless an address was already configured.
    ///
    /// # Errors
    ///
    /// [`SimError::Load`] if a segment does not fit a single memory region.
    pub fn load_image(&mut self, image: &Image) -> Result<(), SimError> {
        for seg in &image.segments {
            self.system.load_segment(seg.addr, &seg.data)?;
        }
        if let Some(entry) = image.entry {
            self.cpu.pc = entry;
        }
        if let Some(addr) = image.tohost
            && self.system.tohost_addr().is_none()
        {
            self.system.set_tohost(addr);
        }
        Ok(())
    }

    /// Advances core and system by one clock cycle.
    pub fn tick(&mut self) {
        let inputs = CoreInputs {
            ibus: self.system.response(Channel::Instruction),
            dbus: self.system.response(Channel::Data),
            irq_lines: self.system.irq_lines(),
        };
        let ibus = self.cpu.ibus_request();
        let dbus = self.cpu.dbus_request();

        self.cpu.tick(&inputs);
        self.system.tick(&ibus, &dbus);
    }

    /// Runs until the core finishes one instruction (retirement or trap entry).
    ///
    /// Stops early when the program reports through `tohost` or the configured
    /// cycle budget is spent.
    ///
    /// # Returns
    ///
    /// The number of cycles executed.
    pub fn step_instruction(&mut self) -> u64 {
        let start = self.cpu.stats.cycles;
        loop {
            let before = self.cpu.state;
            self.tick();
            let spent = self.cpu.stats.cycles - start;
            let boundary = before != CoreState::Fetch && self.cpu.state == CoreState::Fetch;
            if boundary || self.outcome().is_some() || spent >= self.max_cycles {
                return spent;
            }
        }
    }

    /// Reported outcome, if the program has written `tohost`.
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.system.tohost_status().map(|status| match status {
            TohostStatus::Pass => RunOutcome::Pass,
            TohostStatus::Fail(code) => RunOutcome::Fail { code },
        })
    }

    /// Runs until the program reports or `max_cycles` more cycles have elapsed.
    pub fn run(&mut self, max_cycles: u64) -> RunOutcome {
        let start = self.cpu.stats.cycles;
        let outcome = loop {
            if let Some(outcome) = self.outcome() {
                break outcome;
            }
            if self.cpu.stats.cycles - start >= max_cycles {
                break RunOutcome::CycleLimit;
            }
            self.tick();
        };
        info!("run ended after {} cycles: {outcome:?}", self.cpu.stats.cycles - start);
        outcome
    }

    /// Performance statistics.
    pub const fn stats(&self) -> &SimStats {
        &self.cpu.stats
    }
}
