//! Multiply/Divide Unit (MDU).
//!
//! A self-contained, multi-cycle functional unit for the M extension. It runs
//! its own state machine and talks to the core only through registered
//! handshake signals:
//! 1. **Start:** The core pulses `start` with a request and two operands. The unit
//!    latches them; the latched operands never change for the rest of the operation.
//! 2. **Iterate:** Exactly [`MDU_ITERATIONS`] shift-and-add (multiply) or restoring
//!    (divide) iterations run on operand magnitudes, one per cycle. Division adds one
//!    fixed finalize cycle. Division by zero takes the same path and never exits early.
//! 3. **Done/Ack:** `done` is high for exactly one cycle. The result stays valid
//!    until the core pulses `ack`, which returns the unit to `Idle`.
//!
//! A divide request always produces both quotient and remainder, and a multiply
//! request always produces the full 64-bit product; the core selects the word it needs.

/// Restoring division iterations and sign/zero-divisor finalization.
pub mod divide;

/// Shift-and-add multiplication iterations.
pub mod multiply;

use crate::common::constants::MDU_ITERATIONS;
use crate::core::pipeline::signals::MulDivOp;

/// Operation latched by the MDU on `start`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MduRequest {
    /// Full 64-bit product with per-operand signedness.
    Multiply {
        /// Operand A is interpreted as signed.
        a_signed: bool,
        /// Operand B is interpreted as signed.
        b_signed: bool,
    },
    /// Quotient and remainder.
    Divide {
        /// Both operands are interpreted as signed.
        signed: bool,
    },
}

impl Default for MduRequest {
    fn default() -> Self {
        Self::Multiply { a_signed: false, b_signed: false }
    }
}

/// Result held by the MDU between `done` and `ack`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MduResult {
    /// Full 64-bit product.
    Product(u64),
    /// Quotient and remainder of a division.
    Division {
        /// Quotient.
        quotient: u32,
        /// Remainder.
        remainder: u32,
    },
}

/// MDU state machine state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MduState {
    /// Waiting for `start`.
    #[default]
    Idle,
    /// Running (or holding the result of) a multiplication.
    Multiply,
    /// Running restoring-division iterations.
    Divide,
    /// Applying signs and the divide-by-zero rule (or holding the division result).
    DivideFinalize,
}

/// Registered core-to-MDU signals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MduInputs {
    /// One-cycle start pulse.
    pub start: bool,
    /// Operation to start.
    pub request: MduRequest,
    /// Operand A (`rs1`).
    pub a: u32,
    /// Operand B (`rs2`).
    pub b: u32,
    /// One-cycle acknowledge pulse releasing a held result.
    pub ack: bool,
}

/// Registered MDU-to-core signals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MduOutputs {
    /// An operation is in progress or its result is held.
    pub busy: bool,
    /// The operation completed in the previous cycle (one-cycle pulse).
    pub done: bool,
    /// `result` holds a completed, unacknowledged result.
    pub valid: bool,
    /// Completed result.
    pub result: Option<MduResult>,
}

/// Multiply/Divide Unit.
#[derive(Clone, Debug, Default)]
pub struct Mdu {
    state: MduState,
    request: MduRequest,
    op_a: u32,
    op_b: u32,
    /// Operand magnitudes the iterations consume.
    mag_a: u32,
    mag_b: u32,
    /// Negate the product / quotient at the end.
    negate_result: bool,
    /// Negate the remainder at the end (dividend sign).
    negate_remainder: bool,
    iteration: u32,
    acc: u64,
    div: divide::DivState,
    done: bool,
    valid: bool,
    result: Option<MduResult>,
    /// Iterations executed by the current or last operation.
    iterations_run: u32,
}

impl Mdu {
    /// Creates an idle unit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registered outputs as seen by the core this cycle.
    pub const fn outputs(&self) -> MduOutputs {
        MduOutputs {
            busy: !matches!(self.state, MduState::Idle),
            done: self.done,
            valid: self.valid,
            result: self.result,
        }
    }

    /// Current state.
    pub const fn state(&self) -> MduState {
        self.state
    }

    /// Operands latched by the last `start`.
    pub const fn latched_operands(&self) -> (u32, u32) {
        (self.op_a, self.op_b)
    }

    /// Number of iterations the current or last operation has executed.
    pub const fn iterations_run(&self) -> u32 {
        self.iterations_run
    }

    /// Advances the unit by one clock edge.
    ///
    /// # Arguments
    ///
    /// * `inp` - The core's registered outputs from the previous cycle.
    pub fn tick(&mut self, inp: &MduInputs) {
        self.done = false;

        if self.valid {
            if inp.ack {
                self.valid = false;
                self.result = None;
                self.state = MduState::Idle;
            }
            return;
        }

        match self.state {
            MduState::Idle => {
                if inp.start {
                    self.latch(inp);
                }
            }
            MduState::Multiply => {
                self.acc = multiply::step(self.acc, self.mag_a, self.mag_b, self.iteration);
                self.advance();
                if self.iteration == MDU_ITERATIONS {
                    let product = multiply::finish(self.acc, self.negate_result);
                    self.complete(MduResult::Product(product));
                }
            }
            MduState::Divide => {
                self.div = divide::step(self.div, self.mag_a, self.mag_b, self.iteration);
                self.advance();
                if self.iteration == MDU_ITERATIONS {
                    self.state = MduState::DivideFinalize;
                }
            }
            MduState::DivideFinalize => {
                let (quotient, remainder) = divide::finish(
                    self.div,
                    self.op_a,
                    self.op_b,
                    self.negate_result,
                    self.negate_remainder,
                );
                self.complete(MduResult::Division { quotient, remainder });
            }
        }
    }

    fn latch(&mut self, inp: &MduInputs) {
        self.request = inp.request;
        self.op_a = inp.a;
        self.op_b = inp.b;
        self.iteration = 0;
        self.iterations_run = 0;
        self.acc = 0;
        self.div = divide::DivState::default();

        let (a_signed, b_signed) = match inp.request {
            MduRequest::Multiply { a_signed, b_signed } => (a_signed, b_signed),
            MduRequest::Divide { signed } => (signed, signed),
        };
        let a_neg = a_signed && (inp.a as i32) < 0;
        let b_neg = b_signed && (inp.b as i32) < 0;
        self.mag_a = if a_neg { inp.a.wrapping_neg() } else { inp.a };
        self.mag_b = if b_neg { inp.b.wrapping_neg() } else { inp.b };
        self.negate_result = a_neg ^ b_neg;
        self.negate_remainder = a_neg;

        self.state = match inp.request {
            MduRequest::Multiply { .. } => MduState::Multiply,
            MduRequest::Divide { .. } => MduState::Divide,
        };
    }

    const fn advance(&mut self) {
        self.iteration += 1;
        self.iterations_run += 1;
    }

    const fn complete(&mut self, result: MduResult) {
        self.result = Some(result);
        self.done = true;
        self.valid = true;
    }
}

impl MulDivOp {
    /// Returns the MDU request implementing this operation.
    pub const fn request(self) -> Option<MduRequest> {
        let req = match self {
            Self::None => return None,
            Self::Mul | Self::Mulhu => MduRequest::Multiply { a_signed: false, b_signed: false },
            Self::Mulh => MduRequest::Multiply { a_signed: true, b_signed: true },
            Self::Mulhsu => MduRequest::Multiply { a_signed: true, b_signed: false },
            Self::Div | Self::Rem => MduRequest::Divide { signed: true },
            Self::Divu | Self::Remu => MduRequest::Divide { signed: false },
        };
        Some(req)
    }

    /// Selects the architectural result word from a completed MDU result.
    ///
    /// The low word of a product is the same for every signedness, so `MUL`
    /// uses the unsigned request.
    pub const fn select(self, result: MduResult) -> u32 {
        match (self, result) {
            (Self::Mul, MduResult::Product(p)) => p as u32,
            (Self::Mulh | Self::Mulhsu | Self::Mulhu, MduResult::Product(p)) => (p >> 32) as u32,
            (Self::Div | Self::Divu, MduResult::Division { quotient, .. }) => quotient,
            (Self::Rem | Self::Remu, MduResult::Division { remainder, .. }) => remainder,
            _ => 0,
        }
    }
}
