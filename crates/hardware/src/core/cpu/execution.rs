//! Main Execution Cycle.
//!
//! This module implements the per-cycle behavior of the core. Each tick is
//! two-phase: the core computes its next state from the values every peer
//! registered at the end of the previous tick, then commits. It performs:
//! 1. **Sampling:** Reads the registered MDU outputs and handshake, clearing the
//!    one-cycle `start`/`ack` pulses.
//! 2. **Dispatch:** Runs the behavior of the current controller state.
//! 3. **Unit Clocking:** Advances the MDU from last cycle's handshake.
//! 4. **Counters:** Advances `mcycle` and samples the interrupt lines into `mip`.

use super::Cpu;
use crate::core::pipeline::stages::{
    decode_stage, execute_stage, fetch_stage, mem_stage, muldiv_stage, trap_stage, wb_stage,
};
use crate::core::pipeline::state::CoreState;
use crate::soc::bus::{BusRequest, BusResponse};

/// Registered signals arriving at the core in one cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CoreInputs {
    /// Instruction-channel response.
    pub ibus: BusResponse,
    /// Data-channel response.
    pub dbus: BusResponse,
    /// Level-sensitive interrupt lines.
    pub irq_lines: u32,
}

impl Cpu {
    /// Advances the core by one clock cycle.
    ///
    /// # Arguments
    ///
    /// * `inp` - Bus responses and interrupt lines registered by the system at
    ///   the end of the previous cycle.
    pub fn tick(&mut self, inp: &CoreInputs) {
        let mdu_out = self.mdu.outputs();
        let mdu_ctl = self.mdu_ctl;
        self.mdu_ctl.start = false;
        self.mdu_ctl.ack = false;

        self.stats.cycles += 1;
        self.stats.state_cycles[self.state.index()] += 1;

        match self.state {
            CoreState::Fetch => fetch_stage(self, inp.ibus),
            CoreState::Decode => decode_stage(self),
            CoreState::Execute => execute_stage(self),
            CoreState::MulDiv => muldiv_stage(self, &mdu_out),
            CoreState::Mem => mem_stage(self, inp.dbus),
            CoreState::Writeback => wb_stage(self),
            CoreState::Trap => trap_stage(self),
        }

        self.mdu.tick(&mdu_ctl);
        self.csrs.end_of_cycle(inp.irq_lines);
    }

    /// Registered instruction-channel request.
    pub const fn ibus_request(&self) -> BusRequest {
        self.ibus.request()
    }

    /// Registered data-channel request.
    pub const fn dbus_request(&self) -> BusRequest {
        self.dbus.request()
    }
}
