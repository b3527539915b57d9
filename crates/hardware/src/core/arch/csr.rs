//! Control and Status Register (CSR) definitions and operations.
//!
//! This module implements the machine-mode CSR subsystem of the core. It provides:
//! 1. **Address Definitions:** Constants for every implemented CSR.
//! 2. **Field Masks:** Bitmasks for `mstatus`, `mtvec`, and `misa`.
//! 3. **Register Storage:** The [`Csrs`] struct holding architectural state.
//! 4. **Access Logic:** Read, write, and atomic read-modify-write with the
//!    read-only and unimplemented-address rules applied.

use tracing::warn;

use crate::core::pipeline::signals::CsrOp;

/// Machine vendor ID CSR address.
pub const MVENDORID: u32 = 0xF11;
/// Machine architecture ID CSR address.
pub const MARCHID: u32 = 0xF12;
/// Machine implementation ID CSR address.
pub const MIMPID: u32 = 0xF13;
/// Machine hardware thread ID CSR address.
pub const MHARTID: u32 = 0xF14;

/// Machine status register CSR address.
pub const MSTATUS: u32 = 0x300;
/// Machine ISA register CSR address.
pub const MISA: u32 = 0x301;
/// Machine interrupt enable register CSR address.
pub const MIE: u32 = 0x304;
/// Machine trap vector base address register CSR address.
pub const MTVEC: u32 = 0x305;
/// Machine scratch register CSR address.
pub const MSCRATCH: u32 = 0x340;
/// Machine exception program counter CSR address.
pub const MEPC: u32 = 0x341;
/// Machine cause register CSR address.
pub const MCAUSE: u32 = 0x342;
/// Machine trap value register CSR address.
pub const MTVAL: u32 = 0x343;
/// Machine interrupt pending register CSR address.
pub const MIP: u32 = 0x344;

/// Machine cycle counter, low half.
pub const MCYCLE: u32 = 0xB00;
/// Machine instructions-retired counter, low half.
pub const MINSTRET: u32 = 0xB02;
/// Machine cycle counter, high half.
pub const MCYCLEH: u32 = 0xB80;
/// Machine instructions-retired counter, high half.
pub const MINSTRETH: u32 = 0xB82;

/// User cycle counter shadow, low half (read-only).
pub const CYCLE: u32 = 0xC00;
/// User instructions-retired shadow, low half (read-only).
pub const INSTRET: u32 = 0xC02;
/// User cycle counter shadow, high half (read-only).
pub const CYCLEH: u32 = 0xC80;
/// User instructions-retired shadow, high half (read-only).
pub const INSTRETH: u32 = 0xC82;

/// Machine interrupt enable bit in `mstatus`.
pub const MSTATUS_MIE: u32 = 1 << 3;
/// Machine previous interrupt enable bit in `mstatus`.
pub const MSTATUS_MPIE: u32 = 1 << 7;
/// Machine previous privilege field in `mstatus`. Hardwired to machine mode.
pub const MSTATUS_MPP: u32 = 3 << 11;
/// Bits of `mstatus` that hold state.
pub const MSTATUS_WRITABLE: u32 = MSTATUS_MIE | MSTATUS_MPIE;

/// Mode field of `mtvec`.
pub const MTVEC_MODE_MASK: u32 = 0b11;
/// `mtvec` mode selecting vectored interrupts.
pub const MTVEC_MODE_VECTORED: u32 = 1;

/// MISA XLEN field value for a 32-bit architecture.
pub const MISA_XLEN_32: u32 = 1 << 30;
/// MISA extension bit for base integer instructions (I extension).
pub const MISA_EXT_I: u32 = 1 << 8;
/// MISA extension bit for integer multiply/divide (M extension).
pub const MISA_EXT_M: u32 = 1 << 12;
/// `misa` value reported by the core (RV32IM).
pub const MISA_RV32IM: u32 = MISA_XLEN_32 | MISA_EXT_I | MISA_EXT_M;

/// Result of a CSR access performed by a CSR instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CsrAccess {
    /// Value read before the write (zero for unimplemented addresses).
    pub rdata: u32,
    /// False when the address does not name an implemented CSR.
    pub valid: bool,
}

/// Control and Status Register file.
///
/// `mstatus` keeps only its writable bits; the fixed `MPP` field is merged in on
/// read. Counters are kept as 64-bit values and exposed as halves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Csrs {
    /// Machine status register (MIE and MPIE only).
    pub mstatus: u32,
    /// Machine interrupt enable.
    pub mie: u32,
    /// Machine trap vector (base and mode).
    pub mtvec: u32,
    /// Machine scratch register.
    pub mscratch: u32,
    /// Machine exception program counter.
    pub mepc: u32,
    /// Machine trap cause.
    pub mcause: u32,
    /// Machine trap value.
    pub mtval: u32,
    /// Machine interrupt pending (mirror of the interrupt lines).
    pub mip: u32,
    /// Cycle counter.
    pub mcycle: u64,
    /// Instructions-retired counter.
    pub minstret: u64,
    /// Set when software wrote `mcycle`/`mcycleh` this cycle; the write wins over the increment.
    mcycle_written: bool,
    /// Set when the retiring instruction wrote `minstret`/`minstreth`; its own retirement is not counted.
    minstret_written: bool,
}

impl Default for Csrs {
    fn default() -> Self {
        Self::new()
    }
}

impl Csrs {
    /// Creates the reset-state CSR file: every register and counter zero.
    pub const fn new() -> Self {
        Self {
            mstatus: 0,
            mie: 0,
            mtvec: 0,
            mscratch: 0,
            mepc: 0,
            mcause: 0,
            mtval: 0,
            mip: 0,
            mcycle: 0,
            minstret: 0,
            mcycle_written: false,
            minstret_written: false,
        }
    }

    /// Reads a CSR.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    ///
    /// # Returns
    ///
    /// `Some(value)` for implemented CSRs, `None` for unimplemented addresses.
    pub const fn read(&self, addr: u32) -> Option<u32> {
        let val = match addr {
            MVENDORID | MARCHID | MIMPID | MHARTID => 0,
            MISA => MISA_RV32IM,
            MSTATUS => (self.mstatus & MSTATUS_WRITABLE) | MSTATUS_MPP,
            MIE => self.mie,
            MTVEC => self.mtvec,
            MSCRATCH => self.mscratch,
            MEPC => self.mepc,
            MCAUSE => self.mcause,
            MTVAL => self.mtval,
            MIP => self.mip,
            MCYCLE | CYCLE => self.mcycle as u32,
            MCYCLEH | CYCLEH => (self.mcycle >> 32) as u32,
            MINSTRET | INSTRET => self.minstret as u32,
            MINSTRETH | INSTRETH => (self.minstret >> 32) as u32,
            _ => return None,
        };
        Some(val)
    }

    /// Writes a CSR.
    ///
    /// Writes to read-only registers (`mip`, `misa`, the ID registers and the user
    /// counter shadows) are dropped silently.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    /// * `val` - The value to write.
    ///
    /// # Returns
    ///
    /// False when the address does not name an implemented CSR.
    pub fn write(&mut self, addr: u32, val: u32) -> bool {
        match addr {
            MSTATUS => self.mstatus = val & MSTATUS_WRITABLE,
            MIE => self.mie = val,
            MTVEC => self.mtvec = val,
            MSCRATCH => self.mscratch = val,
            MEPC => self.mepc = val & !1,
            MCAUSE => self.mcause = val,
            MTVAL => self.mtval = val,
            MCYCLE => {
                self.mcycle = (self.mcycle & !0xFFFF_FFFF) | u64::from(val);
                self.mcycle_written = true;
            }
            MCYCLEH => {
                self.mcycle = (self.mcycle & 0xFFFF_FFFF) | (u64::from(val) << 32);
                self.mcycle_written = true;
            }
            MINSTRET => {
                self.minstret = (self.minstret & !0xFFFF_FFFF) | u64::from(val);
                self.minstret_written = true;
            }
            MINSTRETH => {
                self.minstret = (self.minstret & 0xFFFF_FFFF) | (u64::from(val) << 32);
                self.minstret_written = true;
            }
            MIP | MISA | MVENDORID | MARCHID | MIMPID | MHARTID | CYCLE | CYCLEH | INSTRET
            | INSTRETH => {}
            _ => return false,
        }
        true
    }

    /// Performs the atomic read-modify-write of a CSR instruction.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 12-bit CSR address.
    /// * `op` - Write, set, or clear.
    /// * `operand` - Register value or zero-extended immediate.
    /// * `src_is_zero` - True when the source field names `x0` (or `uimm` is 0);
    ///   set and clear then only read.
    ///
    /// # Returns
    ///
    /// The old value and whether the address was implemented.
    pub fn access(
        &mut self,
        addr: u32,
        op: CsrOp,
        operand: u32,
        src_is_zero: bool,
    ) -> CsrAccess {
        let Some(old) = self.read(addr) else {
            warn!("access to unimplemented CSR {addr:#05x}");
            return CsrAccess { rdata: 0, valid: false };
        };

        let new = match op {
            CsrOp::Write => Some(operand),
            CsrOp::Set if !src_is_zero => Some(old | operand),
            CsrOp::Clear if !src_is_zero => Some(old & !operand),
            CsrOp::Set | CsrOp::Clear | CsrOp::None => None,
        };

        if let Some(val) = new {
            let _ = self.write(addr, val);
        }

        CsrAccess { rdata: old, valid: true }
    }

    /// Advances the free-running counter and samples the interrupt lines.
    ///
    /// Called once at the end of every tick. A software write to `mcycle` during
    /// the tick replaces that tick's increment.
    pub const fn end_of_cycle(&mut self, irq_lines: u32) {
        if !self.mcycle_written {
            self.mcycle = self.mcycle.wrapping_add(1);
        }
        self.mcycle_written = false;
        self.mip = irq_lines;
    }

    /// Counts one retired instruction.
    ///
    /// An instruction that wrote `minstret` itself keeps the written value.
    pub const fn retire(&mut self) {
        if !self.minstret_written {
            self.minstret = self.minstret.wrapping_add(1);
        }
        self.minstret_written = false;
    }
}

/// Returns the assembler name of an implemented CSR.
pub const fn name(addr: u32) -> Option<&'static str> {
    let name = match addr {
        MVENDORID => "mvendorid",
        MARCHID => "marchid",
        MIMPID => "mimpid",
        MHARTID => "mhartid",
        MSTATUS => "mstatus",
        MISA => "misa",
        MIE => "mie",
        MTVEC => "mtvec",
        MSCRATCH => "mscratch",
        MEPC => "mepc",
        MCAUSE => "mcause",
        MTVAL => "mtval",
        MIP => "mip",
        MCYCLE => "mcycle",
        MINSTRET => "minstret",
        MCYCLEH => "mcycleh",
        MINSTRETH => "minstreth",
        CYCLE => "cycle",
        INSTRET => "instret",
        CYCLEH => "cycleh",
        INSTRETH => "instreth",
        _ => return None,
    };
    Some(name)
}
