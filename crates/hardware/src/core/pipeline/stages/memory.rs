//! Memory Access State.
//!
//! Drives a data-channel read or write at the effective address computed in
//! `Execute`. Stores place their data on the addressed byte lanes with a
//! matching byte-enable; loads keep the raw returned word for extension in
//! `Writeback`. An `err` response becomes a load or store access fault and is
//! never retried.

use crate::core::Cpu;
use crate::core::pipeline::state::CoreState;
use crate::core::units::biu::store_lanes;
use crate::core::units::exception::{ExceptionInputs, detect};
use crate::soc::bus::{BusRequest, BusResponse};

/// Executes one cycle of the memory state.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
/// * `resp` - Registered data-channel response.
pub fn mem_stage(cpu: &mut Cpu, resp: BusResponse) {
    let l = cpu.latch;
    let c = l.ctrl;
    let addr = l.alu_result;

    if !cpu.dbus.is_active() {
        let (dat, sel) = store_lanes(c.width, addr, l.rv2);
        let req = if c.mem_write {
            BusRequest::write(addr, dat, sel)
        } else {
            BusRequest { sel, ..BusRequest::read(addr) }
        };
        cpu.dbus.issue(req);
        return;
    }

    if resp.ack {
        cpu.latch.load_word = resp.dat;
        cpu.dbus.release();
        cpu.state = CoreState::Writeback;
    } else if resp.err {
        cpu.dbus.release();
        let exc = detect(&ExceptionInputs {
            pc: l.pc,
            inst: l.inst,
            load: c.mem_read,
            store: c.mem_write,
            addr,
            data_fault: true,
            ..ExceptionInputs::default()
        });
        if let Some(trap) = exc {
            cpu.raise(trap, l.pc);
        }
    } else {
        cpu.stats.data_wait_cycles += 1;
    }
}
