//! Control signals and operation types.
//!
//! This module defines the signals the decode stage produces for every
//! instruction. It performs:
//! 1. **Operation Classification:** Categorizes ALU, multiply/divide, system, and CSR operations.
//! 2. **Operand Selection:** Defines sources for ALU inputs (registers, PC, or immediates).
//! 3. **Memory Control:** Specifies access widths and sign-extension requirements.
//! 4. **Write-Back Control:** Selects the value committed to the destination register.

/// ALU operation types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AluOp {
    /// Integer addition (also address generation).
    #[default]
    Add,

    /// Integer subtraction.
    Sub,

    /// Shift left logical.
    Sll,

    /// Set less than (signed).
    Slt,

    /// Set less than unsigned.
    Sltu,

    /// Bitwise XOR.
    Xor,

    /// Shift right logical.
    Srl,

    /// Shift right arithmetic.
    Sra,

    /// Bitwise OR.
    Or,

    /// Bitwise AND.
    And,

    /// Pass operand B through unchanged (`LUI`).
    PassB,
}

/// Condition evaluated by a conditional branch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BranchCond {
    /// Equal (`BEQ`).
    #[default]
    Eq,
    /// Not equal (`BNE`).
    Ne,
    /// Less than, signed (`BLT`).
    Lt,
    /// Greater or equal, signed (`BGE`).
    Ge,
    /// Less than, unsigned (`BLTU`).
    Ltu,
    /// Greater or equal, unsigned (`BGEU`).
    Geu,
}

/// Memory access width for load and store operations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MemWidth {
    /// No memory operation.
    #[default]
    Nop,

    /// 8-bit byte access.
    Byte,

    /// 16-bit half-word access.
    Half,

    /// 32-bit word access.
    Word,
}

impl MemWidth {
    /// Returns the required address alignment mask (0 for byte accesses).
    pub const fn align_mask(self) -> u32 {
        match self {
            Self::Nop | Self::Byte => 0,
            Self::Half => 1,
            Self::Word => 3,
        }
    }
}

/// Source for ALU operand A.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpASrc {
    /// Use `rs1` register value.
    #[default]
    Reg1,

    /// Use program counter value.
    Pc,
}

/// Source for ALU operand B.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OpBSrc {
    /// Use sign-extended immediate value.
    #[default]
    Imm,

    /// Use `rs2` register value.
    Reg2,
}

/// CSR read-modify-write operation.
///
/// The immediate forms share these operations; [`ControlSignals::csr_imm`]
/// selects the zero-extended `uimm` operand instead of `rs1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CsrOp {
    /// No CSR operation.
    #[default]
    None,

    /// Read-write (`CSRRW`/`CSRRWI`).
    Write,

    /// Read-set (`CSRRS`/`CSRRSI`).
    Set,

    /// Read-clear (`CSRRC`/`CSRRCI`).
    Clear,
}

/// Multiply/divide operation handed to the MDU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum MulDivOp {
    /// Not an M-extension instruction.
    #[default]
    None,
    /// Low word of signed x signed.
    Mul,
    /// High word of signed x signed.
    Mulh,
    /// High word of signed x unsigned.
    Mulhsu,
    /// High word of unsigned x unsigned.
    Mulhu,
    /// Signed quotient.
    Div,
    /// Unsigned quotient.
    Divu,
    /// Signed remainder.
    Rem,
    /// Unsigned remainder.
    Remu,
}

/// System instruction class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SystemOp {
    /// Not a system instruction.
    #[default]
    None,
    /// `ECALL`.
    Ecall,
    /// `EBREAK`.
    Ebreak,
    /// `MRET`.
    Mret,
    /// `WFI` (executes as a no-op).
    Wfi,
    /// `FENCE`/`FENCE.I` (no-ops on this core).
    Fence,
}

/// Source of the value committed to `rd` in write-back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WbSrc {
    /// ALU result.
    #[default]
    Alu,
    /// Extended load data.
    Mem,
    /// Multiply/divide result.
    Mdu,
    /// Old CSR value.
    Csr,
    /// Return address (`PC + 4`) of a jump.
    PcPlus4,
}

/// Control signals for one instruction.
///
/// Generated once by the decode stage and held in the instruction latch until
/// the instruction retires or traps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlSignals {
    /// Encoding not recognized; raises an illegal-instruction exception.
    pub illegal: bool,
    /// Enable write to the destination register.
    pub reg_write: bool,
    /// Value written to the destination register.
    pub wb_src: WbSrc,
    /// Enable memory read operation (load).
    pub mem_read: bool,
    /// Enable memory write operation (store).
    pub mem_write: bool,
    /// Width of memory access.
    pub width: MemWidth,
    /// Load should be sign-extended.
    pub signed_load: bool,
    /// Instruction is a conditional branch.
    pub branch: bool,
    /// Condition of a conditional branch.
    pub branch_cond: BranchCond,
    /// Instruction is `JAL`.
    pub jump: bool,
    /// Instruction is `JALR`.
    pub jump_reg: bool,
    /// ALU operation to perform.
    pub alu: AluOp,
    /// Source selection for ALU operand A.
    pub a_src: OpASrc,
    /// Source selection for ALU operand B.
    pub b_src: OpBSrc,
    /// Multiply/divide operation.
    pub muldiv: MulDivOp,
    /// System instruction class.
    pub system: SystemOp,
    /// CSR operation type.
    pub csr_op: CsrOp,
    /// CSR operand is the `uimm` field instead of `rs1`.
    pub csr_imm: bool,
}
