//! Arithmetic Logic Unit (ALU).
//!
//! This module implements the single-cycle integer ALU used in the Execute
//! state. It is a pure function of its operands; multiplication and division
//! are handled by the multi-cycle MDU instead.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub
//! - [`logic`]:      Or, And, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra

/// Integer arithmetic operations (add, subtract).
pub mod arithmetic;

/// Bitwise logical and comparison operations (or, and, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

use crate::core::pipeline::signals::{AluOp, BranchCond};

/// Arithmetic Logic Unit (ALU) for RV32I operations.
#[derive(Debug)]
pub struct Alu;

impl Alu {
    /// Executes an integer ALU operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The ALU operation to perform
    /// * `a`  - First operand
    /// * `b`  - Second operand (low 5 bits are the shift amount for shifts)
    ///
    /// # Returns
    ///
    /// The 32-bit result of the ALU operation.
    ///
    /// # Examples
    ///
    /// ```
    /// use rv32sim_core::core::units::alu::Alu;
    /// use rv32sim_core::core::pipeline::signals::AluOp;
    ///
    /// assert_eq!(Alu::execute(AluOp::Add, 0xFFFF_FFFF, 1), 0);
    /// assert_eq!(Alu::execute(AluOp::Sll, 0x1, 36), 0x10);
    /// assert_eq!(Alu::execute(AluOp::Slt, -5_i32 as u32, 10), 1);
    /// assert_eq!(Alu::execute(AluOp::PassB, 7, 0x1234_5000), 0x1234_5000);
    /// ```
    pub const fn execute(op: AluOp, a: u32, b: u32) -> u32 {
        match op {
            AluOp::Add | AluOp::Sub => arithmetic::execute(op, a, b),
            AluOp::Or | AluOp::And | AluOp::Xor | AluOp::Slt | AluOp::Sltu => {
                logic::execute(op, a, b)
            }
            AluOp::Sll | AluOp::Srl | AluOp::Sra => shifts::execute(op, a, b),
            AluOp::PassB => b,
        }
    }

    /// Evaluates a branch condition.
    ///
    /// Equality reuses the subtractor (`a - b == 0`); the ordering conditions
    /// reuse the set-less-than comparators.
    pub const fn branch_taken(cond: BranchCond, a: u32, b: u32) -> bool {
        match cond {
            BranchCond::Eq => arithmetic::execute(AluOp::Sub, a, b) == 0,
            BranchCond::Ne => arithmetic::execute(AluOp::Sub, a, b) != 0,
            BranchCond::Lt => logic::execute(AluOp::Slt, a, b) == 1,
            BranchCond::Ge => logic::execute(AluOp::Slt, a, b) == 0,
            BranchCond::Ltu => logic::execute(AluOp::Sltu, a, b) == 1,
            BranchCond::Geu => logic::execute(AluOp::Sltu, a, b) == 0,
        }
    }
}
