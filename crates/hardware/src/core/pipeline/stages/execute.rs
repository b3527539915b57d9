//! Execute State.
//!
//! This module implements the central controller state. It performs the following:
//! 1. **Exception Check:** Runs the exception detector first; a hit diverts to `Trap`
//!    and suppresses every side effect of the instruction.
//! 2. **Trap Return:** `MRET` restores PC from `mepc` and retires here.
//! 3. **MDU Hand-off:** Multiply/divide instructions pulse `start` and go to `MulDiv`.
//! 4. **ALU and Control Flow:** Captures the ALU result and resolves the next PC.
//! 5. **CSR Access:** Performs the atomic read-modify-write of CSR instructions.
//!
//! CSR instructions never write on a trap-entry or trap-return cycle: a detected
//! exception returns before the CSR access, `MRET` is not a CSR instruction, and
//! interrupts are only taken from `Fetch`.

use crate::common::constants::INSTRUCTION_SIZE;
use crate::core::Cpu;
use crate::core::pipeline::signals::{CsrOp, OpASrc, OpBSrc, SystemOp};
use crate::core::pipeline::state::CoreState;
use crate::core::units::alu::Alu;
use crate::core::units::exception::{ExceptionInputs, detect};
use crate::core::units::mdu::MduInputs;

/// Executes the execute state.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn execute_stage(cpu: &mut Cpu) {
    let l = cpu.latch;
    let c = l.ctrl;
    let d = l.decoded;
    let imm = d.imm as u32;

    let a = match c.a_src {
        OpASrc::Reg1 => l.rv1,
        OpASrc::Pc => l.pc,
    };
    let b = match c.b_src {
        OpBSrc::Imm => imm,
        OpBSrc::Reg2 => l.rv2,
    };
    let result = Alu::execute(c.alu, a, b);

    let exc = detect(&ExceptionInputs {
        pc: l.pc,
        inst: l.inst,
        fetch_fault: l.fetch_fault,
        illegal: c.illegal,
        ebreak: c.system == SystemOp::Ebreak,
        ecall: c.system == SystemOp::Ecall,
        load: c.mem_read,
        store: c.mem_write,
        addr: result,
        align_mask: c.width.align_mask(),
        data_fault: false,
    });
    if let Some(trap) = exc {
        cpu.raise(trap, l.pc);
        return;
    }

    if c.system == SystemOp::Mret {
        cpu.pc = cpu.csrs.trap_return();
        cpu.retire();
        cpu.state = CoreState::Fetch;
        return;
    }

    let next_pc = if c.jump {
        l.pc.wrapping_add(imm)
    } else if c.jump_reg {
        l.rv1.wrapping_add(imm) & !1
    } else if c.branch && Alu::branch_taken(c.branch_cond, l.rv1, l.rv2) {
        l.pc.wrapping_add(imm)
    } else {
        l.pc.wrapping_add(INSTRUCTION_SIZE)
    };
    cpu.latch.next_pc = next_pc;
    cpu.latch.alu_result = result;

    if let Some(request) = c.muldiv.request() {
        cpu.mdu_ctl = MduInputs { start: true, request, a: l.rv1, b: l.rv2, ack: false };
        cpu.latch.mdu_done_seen = false;
        cpu.stats.mdu_ops += 1;
        cpu.state = CoreState::MulDiv;
        return;
    }

    if c.csr_op != CsrOp::None {
        let operand = if c.csr_imm { d.rs1 as u32 } else { l.rv1 };
        let access = cpu.csrs.access(d.csr, c.csr_op, operand, d.rs1 == 0);
        if !access.valid {
            cpu.stats.invalid_csr_accesses += 1;
        }
        cpu.latch.csr_rdata = access.rdata;
    }

    cpu.state = if c.mem_read || c.mem_write { CoreState::Mem } else { CoreState::Writeback };
}
