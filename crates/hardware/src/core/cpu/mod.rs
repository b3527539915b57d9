//! CPU Core Definition and Initialization.
//!
//! This module defines the central `Cpu` structure, the container for the entire
//! processor state. It coordinates the following:
//! 1. **Architectural State:** Register file, program counter, and CSRs.
//! 2. **Controller:** FSM state, the instruction latch, and a recorded pending trap.
//! 3. **Functional Units:** The multiply/divide unit and its registered handshake.
//! 4. **Bus Masters:** Registered requests of the instruction and data channels.

/// Per-cycle execution and state dispatch.
pub mod execution;

use tracing::trace;

use crate::common::Trap;
use crate::config::Config;
use crate::core::arch::csr::Csrs;
use crate::core::arch::gpr::Gpr;
use crate::core::pipeline::latches::{InstructionLatch, PendingTrap};
use crate::core::pipeline::state::CoreState;
use crate::core::units::biu::BusMaster;
use crate::core::units::mdu::{Mdu, MduInputs};
use crate::isa::disasm::disassemble;
use crate::stats::SimStats;

/// Main CPU structure containing all processor state.
///
/// The CPU sequences one instruction at a time through its controller states,
/// talks to the outside world only through its two bus channels and the
/// interrupt lines, and tracks performance statistics.
#[derive(Clone, Debug)]
pub struct Cpu {
    /// General-Purpose Registers.
    pub regs: Gpr,
    /// Program Counter.
    pub pc: u32,
    /// Control and Status Registers.
    pub csrs: Csrs,
    /// Controller FSM state.
    pub state: CoreState,
    /// State of the instruction in flight.
    pub latch: InstructionLatch,
    /// Trap waiting to be taken in the `Trap` state.
    pub pending_trap: Option<PendingTrap>,

    /// Multiply/Divide Unit.
    pub mdu: Mdu,
    /// Registered core-to-MDU signals (`start`/`ack` are one-cycle pulses).
    pub mdu_ctl: MduInputs,

    /// Instruction channel master.
    pub ibus: BusMaster,
    /// Data channel master.
    pub dbus: BusMaster,

    /// Emit a trace event per retired instruction.
    pub trace: bool,
    /// Performance statistics.
    pub stats: SimStats,
}

impl Cpu {
    /// Creates a CPU in its reset state.
    ///
    /// # Arguments
    ///
    /// * `config` - The simulator configuration (reset vector, tracing).
    ///
    /// # Returns
    ///
    /// A CPU with zeroed registers, CSRs and counters, PC at the reset vector,
    /// and the controller in `Fetch`.
    pub fn new(config: &Config) -> Self {
        Self {
            regs: Gpr::new(),
            pc: config.reset_vector(),
            csrs: Csrs::new(),
            state: CoreState::Fetch,
            latch: InstructionLatch::default(),
            pending_trap: None,
            mdu: Mdu::new(),
            mdu_ctl: MduInputs::default(),
            ibus: BusMaster::default(),
            dbus: BusMaster::default(),
            trace: config.general.trace_instructions,
            stats: SimStats::default(),
        }
    }

    /// Records a trap and moves the controller to `Trap`.
    ///
    /// The instruction in flight is abandoned; none of its register or memory
    /// side effects have been committed.
    pub fn raise(&mut self, trap: Trap, epc: u32) {
        self.pending_trap = Some(PendingTrap { trap, epc });
        self.state = CoreState::Trap;
    }

    /// Counts the instruction in the latch as retired.
    pub fn retire(&mut self) {
        self.csrs.retire();
        self.stats.instructions_retired += 1;
        if self.trace {
            trace!(
                "{:#010x}: {:08x}  {}",
                self.latch.pc,
                self.latch.inst,
                disassemble(self.latch.inst)
            );
        }
    }

    /// Formats the PC and the register file.
    pub fn dump_state(&self) -> String {
        format!("PC = {:#010x}\n{}", self.pc, self.regs)
    }
}
