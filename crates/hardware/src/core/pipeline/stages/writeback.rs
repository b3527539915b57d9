//! Writeback State.
//!
//! Commits the destination register from the selected source, moves PC to
//! the resolved next PC, and retires the instruction.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::Cpu;
use crate::core::pipeline::signals::WbSrc;
use crate::core::pipeline::state::CoreState;
use crate::core::units::biu::extract_load;

/// Executes the writeback state.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn wb_stage(cpu: &mut Cpu) {
    let l = cpu.latch;
    let c = l.ctrl;

    if c.reg_write {
        let val = match c.wb_src {
            WbSrc::Alu => l.alu_result,
            WbSrc::Mem => extract_load(c.width, c.signed_load, l.alu_result, l.load_word),
            WbSrc::Mdu => l.mdu_result,
            WbSrc::Csr => l.csr_rdata,
            WbSrc::PcPlus4 => l.pc.wrapping_add(INSTRUCTION_SIZE),
        };
        cpu.regs.write(l.decoded.rd, val);
    }

    cpu.pc = l.next_pc;
    cpu.retire();
    cpu.state = CoreState::Fetch;
}
