//! Exception Detector.
//!
//! A pure, priority-ordered function over the facts the core gathers about the
//! instruction in flight. At most one exception is reported per cycle; the
//! highest-priority condition wins:
//!
//! 1. Instruction address misaligned
//! 2. Instruction access fault (fetch bus error)
//! 3. Illegal instruction
//! 4. Breakpoint
//! 5. Load address misaligned
//! 6. Load access fault
//! 7. Store address misaligned
//! 8. Store access fault
//! 9. Environment call

use crate::common::Trap;

/// Conditions observed for the current instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExceptionInputs {
    /// Program counter of the instruction.
    pub pc: u32,
    /// Latched instruction word.
    pub inst: u32,
    /// The instruction fetch ended with a bus error.
    pub fetch_fault: bool,
    /// The decoder rejected the encoding.
    pub illegal: bool,
    /// Instruction is `EBREAK`.
    pub ebreak: bool,
    /// Instruction is `ECALL`.
    pub ecall: bool,
    /// Instruction is a load.
    pub load: bool,
    /// Instruction is a store.
    pub store: bool,
    /// Effective address of the load or store.
    pub addr: u32,
    /// Alignment mask of the access width (0 for bytes).
    pub align_mask: u32,
    /// The data access ended with a bus error.
    pub data_fault: bool,
}

/// Returns the highest-priority exception raised by `inp`, if any.
///
/// ```
/// use rv32sim_core::common::Trap;
/// use rv32sim_core::core::units::exception::{detect, ExceptionInputs};
///
/// let inp = ExceptionInputs { pc: 0x102, illegal: true, ..Default::default() };
/// assert_eq!(detect(&inp), Some(Trap::InstructionAddressMisaligned(0x102)));
/// ```
pub const fn detect(inp: &ExceptionInputs) -> Option<Trap> {
    let misaligned = inp.addr & inp.align_mask != 0;

    if inp.pc & 0b11 != 0 {
        Some(Trap::InstructionAddressMisaligned(inp.pc))
    } else if inp.fetch_fault {
        Some(Trap::InstructionAccessFault(inp.pc))
    } else if inp.illegal {
        Some(Trap::IllegalInstruction(inp.inst))
    } else if inp.ebreak {
        Some(Trap::Breakpoint(inp.pc))
    } else if inp.load && misaligned {
        Some(Trap::LoadAddressMisaligned(inp.addr))
    } else if inp.load && inp.data_fault {
        Some(Trap::LoadAccessFault(inp.addr))
    } else if inp.store && misaligned {
        Some(Trap::StoreAddressMisaligned(inp.addr))
    } else if inp.store && inp.data_fault {
        Some(Trap::StoreAccessFault(inp.addr))
    } else if inp.ecall {
        Some(Trap::EnvironmentCallFromMMode)
    } else {
        None
    }
}
