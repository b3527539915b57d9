//! Trap Handling Logic.
//!
//! This module implements the machine-mode trap machinery on top of [`Csrs`]. It performs
//! the following:
//! 1. **Interrupt Arbitration:** Selects the highest-index pending, enabled interrupt line.
//! 2. **Trap Entry:** Records `mepc`/`mcause`/`mtval` and stacks the interrupt enable.
//! 3. **Vectoring:** Computes the handler address in direct or vectored `mtvec` mode.
//! 4. **Return Handling:** Implements `MRET`.

use tracing::debug;

use super::csr::{Csrs, MSTATUS_MIE, MSTATUS_MPIE, MTVEC_MODE_MASK, MTVEC_MODE_VECTORED};
use crate::common::Trap;

impl Csrs {
    /// Returns the interrupt that would be taken now, if any.
    ///
    /// An interrupt is pending when `mstatus.MIE` is set and `mip & mie` is
    /// non-zero. The highest set bit wins.
    pub const fn pending_interrupt(&self) -> Option<Trap> {
        if self.mstatus & MSTATUS_MIE == 0 {
            return None;
        }
        let active = self.mip & self.mie;
        if active == 0 {
            return None;
        }
        Some(Trap::Interrupt(31 - active.leading_zeros()))
    }

    /// Computes the handler address for a trap.
    ///
    /// Direct mode always uses the base. Vectored mode adds `4 * code` for
    /// interrupts only; exceptions still go to the base.
    pub const fn trap_vector(&self, trap: &Trap) -> u32 {
        let base = self.mtvec & !MTVEC_MODE_MASK;
        if trap.is_interrupt() && self.mtvec & MTVEC_MODE_MASK == MTVEC_MODE_VECTORED {
            base.wrapping_add(trap.code().wrapping_mul(4))
        } else {
            base
        }
    }

    /// Records a trap and returns the handler address.
    ///
    /// # Arguments
    ///
    /// * `trap` - The exception or interrupt being taken.
    /// * `epc` - PC of the faulting instruction, or of the instruction the
    ///   interrupt pre-empted.
    ///
    /// # Returns
    ///
    /// The address the core fetches from next.
    pub fn enter_trap(&mut self, trap: &Trap, epc: u32) -> u32 {
        self.mepc = epc & !1;
        self.mcause = trap.cause();
        self.mtval = trap.tval();

        let mie = self.mstatus & MSTATUS_MIE != 0;
        self.mstatus &= !(MSTATUS_MIE | MSTATUS_MPIE);
        if mie {
            self.mstatus |= MSTATUS_MPIE;
        }

        let vector = self.trap_vector(trap);
        debug!(
            "trap {trap} epc={epc:#010x} cause={:#010x} tval={:#010x} -> {vector:#010x}",
            self.mcause, self.mtval
        );
        vector
    }

    /// Executes the CSR side of `MRET` and returns the resume address.
    ///
    /// `MIE` is restored from `MPIE` and `MPIE` is set.
    pub fn trap_return(&mut self) -> u32 {
        let mpie = self.mstatus & MSTATUS_MPIE != 0;
        self.mstatus |= MSTATUS_MPIE;
        if mpie {
            self.mstatus |= MSTATUS_MIE;
        } else {
            self.mstatus &= !MSTATUS_MIE;
        }
        debug!("mret -> {:#010x}", self.mepc);
        self.mepc
    }
}
