//! Trap and Simulator Error definitions.
//!
//! This module defines the two error domains of the model:
//! 1. **Trap Representation:** Architectural exceptions and interrupts. These are values
//!    the core handles itself by vectoring, never Rust errors propagated to the host.
//! 2. **Simulator Errors:** Host-side failures (configuration, firmware files, image
//!    placement) reported through [`SimError`].

use std::path::PathBuf;

use thiserror::Error;

use crate::isa::privileged::cause::{exception, INTERRUPT_BIT};

/// RISC-V machine-mode trap types.
///
/// Exceptions carry the value recorded in `mtval` where the privileged architecture
/// defines one. Interrupts carry the index of the winning `mip` bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Trap {
    /// Instruction address misaligned exception. Holds the misaligned PC.
    #[error("InstructionAddressMisaligned({0:#x})")]
    InstructionAddressMisaligned(u32),

    /// Instruction access fault exception. Holds the PC whose fetch returned `err`.
    #[error("InstructionAccessFault({0:#x})")]
    InstructionAccessFault(u32),

    /// Illegal instruction exception. Holds the instruction encoding.
    #[error("IllegalInstruction({0:#x})")]
    IllegalInstruction(u32),

    /// Breakpoint exception (`EBREAK`). Holds the PC of the breakpoint.
    #[error("Breakpoint({0:#x})")]
    Breakpoint(u32),

    /// Load address misaligned exception. Holds the effective address.
    #[error("LoadAddressMisaligned({0:#x})")]
    LoadAddressMisaligned(u32),

    /// Load access fault exception. Holds the effective address.
    #[error("LoadAccessFault({0:#x})")]
    LoadAccessFault(u32),

    /// Store address misaligned exception. Holds the effective address.
    #[error("StoreAddressMisaligned({0:#x})")]
    StoreAddressMisaligned(u32),

    /// Store access fault exception. Holds the effective address.
    #[error("StoreAccessFault({0:#x})")]
    StoreAccessFault(u32),

    /// Environment call from machine mode (`ECALL`).
    #[error("EnvironmentCallFromMMode")]
    EnvironmentCallFromMMode,

    /// Asynchronous interrupt. Holds the `mip` bit index that won arbitration.
    #[error("Interrupt({0})")]
    Interrupt(u32),
}

impl Trap {
    /// Returns true for asynchronous interrupts.
    pub const fn is_interrupt(&self) -> bool {
        matches!(self, Self::Interrupt(_))
    }

    /// Returns the exception or interrupt code, without the interrupt bit.
    pub const fn code(&self) -> u32 {
        match self {
            Self::InstructionAddressMisaligned(_) => exception::INSTRUCTION_ADDRESS_MISALIGNED,
            Self::InstructionAccessFault(_) => exception::INSTRUCTION_ACCESS_FAULT,
            Self::IllegalInstruction(_) => exception::ILLEGAL_INSTRUCTION,
            Self::Breakpoint(_) => exception::BREAKPOINT,
            Self::LoadAddressMisaligned(_) => exception::LOAD_ADDRESS_MISALIGNED,
            Self::LoadAccessFault(_) => exception::LOAD_ACCESS_FAULT,
            Self::StoreAddressMisaligned(_) => exception::STORE_ADDRESS_MISALIGNED,
            Self::StoreAccessFault(_) => exception::STORE_ACCESS_FAULT,
            Self::EnvironmentCallFromMMode => exception::ENVIRONMENT_CALL_FROM_M_MODE,
            Self::Interrupt(index) => *index,
        }
    }

    /// Returns the full `mcause` value, with bit 31 set for interrupts.
    pub const fn cause(&self) -> u32 {
        if self.is_interrupt() {
            INTERRUPT_BIT | self.code()
        } else {
            self.code()
        }
    }

    /// Returns the value written to `mtval` on trap entry.
    ///
    /// Interrupts and environment calls record zero.
    pub const fn tval(&self) -> u32 {
        match self {
            Self::InstructionAddressMisaligned(v)
            | Self::InstructionAccessFault(v)
            | Self::IllegalInstruction(v)
            | Self::Breakpoint(v)
            | Self::LoadAddressMisaligned(v)
            | Self::LoadAccessFault(v)
            | Self::StoreAddressMisaligned(v)
            | Self::StoreAccessFault(v) => *v,
            Self::EnvironmentCallFromMMode | Self::Interrupt(_) => 0,
        }
    }
}

/// Host-side simulator errors.
///
/// None of these are architectural; a running program can never raise one.
#[derive(Debug, Error)]
pub enum SimError {
    /// The JSON configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// A firmware or configuration file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path of the file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A `$readmemh`-style hex file contained a malformed line.
    #[error("hex image line {line}: {reason}")]
    Hex {
        /// 1-based line number.
        line: usize,
        /// Description of the problem.
        reason: String,
    },

    /// An ELF file was malformed or not a 32-bit little-endian RISC-V executable.
    #[error("invalid ELF image: {0}")]
    Elf(String),

    /// An image segment does not fit inside any loadable memory region.
    #[error("segment at {addr:#010x} ({len} bytes) does not fit in memory")]
    Load {
        /// Start address of the segment.
        addr: u32,
        /// Segment length in bytes.
        len: usize,
    },
}

impl From<object::Error> for SimError {
    fn from(err: object::Error) -> Self {
        Self::Elf(err.to_string())
    }
}
