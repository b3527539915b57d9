//! Core controller states.

use std::fmt;

/// State of the core controller FSM.
///
/// `Fetch → Decode → Execute → {Mem | MulDiv} → Writeback → Fetch`, with
/// `Trap` entered from `Fetch` (interrupt), `Execute` (exception) or `Mem`
/// (data bus error).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CoreState {
    /// Driving an instruction-bus read at PC.
    #[default]
    Fetch,
    /// Generating control signals and reading source registers.
    Decode,
    /// Exception check, ALU, branch resolution, CSR read-modify-write.
    Execute,
    /// Waiting on the multiply/divide unit.
    MulDiv,
    /// Driving a data-bus read or write.
    Mem,
    /// Committing the destination register and next PC.
    Writeback,
    /// Entering the trap handler.
    Trap,
}

impl CoreState {
    /// Number of states.
    pub const COUNT: usize = 7;

    /// Every state, in [`CoreState::index`] order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Fetch,
        Self::Decode,
        Self::Execute,
        Self::MulDiv,
        Self::Mem,
        Self::Writeback,
        Self::Trap,
    ];

    /// Dense index of the state, for per-state counters.
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Fetch => "fetch",
            Self::Decode => "decode",
            Self::Execute => "execute",
            Self::MulDiv => "muldiv",
            Self::Mem => "mem",
            Self::Writeback => "writeback",
            Self::Trap => "trap",
        };
        f.pad(s)
    }
}
