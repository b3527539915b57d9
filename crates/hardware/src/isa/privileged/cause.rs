//! RISC-V Trap Cause Codes.
//!
//! This module defines the cause codes written to the `mcause` Control and Status
//! Register. Bit 31 indicates whether the trap is an interrupt (1) or an
//! exception (0); interrupt codes are the index of the winning `mip` bit.

/// `mcause` bit marking an asynchronous interrupt.
pub const INTERRUPT_BIT: u32 = 0x8000_0000;

/// Mask extracting the code from an `mcause` value.
pub const CODE_MASK: u32 = 0x7FFF_FFFF;

/// Standard machine-level interrupt line indices.
pub mod interrupt {
    /// Machine software interrupt.
    pub const MACHINE_SOFTWARE: u32 = 3;

    /// Machine timer interrupt.
    pub const MACHINE_TIMER: u32 = 7;

    /// Machine external interrupt.
    pub const MACHINE_EXTERNAL: u32 = 11;

    /// First platform-defined (local) interrupt line.
    pub const PLATFORM_BASE: u32 = 16;
}

/// Exception definitions (bit 31 = 0).
pub mod exception {
    /// Instruction address misaligned (0).
    pub const INSTRUCTION_ADDRESS_MISALIGNED: u32 = 0;
    /// Instruction access fault (1).
    pub const INSTRUCTION_ACCESS_FAULT: u32 = 1;
    /// Illegal instruction (2).
    pub const ILLEGAL_INSTRUCTION: u32 = 2;
    /// Breakpoint (3).
    pub const BREAKPOINT: u32 = 3;
    /// Load address misaligned (4).
    pub const LOAD_ADDRESS_MISALIGNED: u32 = 4;
    /// Load access fault (5).
    pub const LOAD_ACCESS_FAULT: u32 = 5;
    /// Store address misaligned (6).
    pub const STORE_ADDRESS_MISALIGNED: u32 = 6;
    /// Store access fault (7).
    pub const STORE_ACCESS_FAULT: u32 = 7;
    /// Environment call from M-mode (11).
    pub const ENVIRONMENT_CALL_FROM_M_MODE: u32 = 11;
}
