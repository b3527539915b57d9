//! RV32 Instruction Field Decoder.
//!
//! This module splits a 32-bit instruction word into a structured [`Decoded`]
//! value. It extracts opcodes, register indices, function codes, and the
//! sign-extended immediate for every instruction format (R, I, S, B, U, J).
//! Control signal generation lives in the pipeline decode stage.

use crate::isa::instruction::{Decoded, InstructionBits};
use crate::isa::rv32i::opcodes;

/// Total width of an RV32 instruction in bits.
const INSTRUCTION_WIDTH: u32 = 32;

/// Left-aligned U-Type immediate field (bits 12-31).
const U_IMM_MASK: u32 = 0xFFFF_F000;

/// Extracts `width` bits of `inst` starting at bit `lo`.
#[inline(always)]
const fn bits(inst: u32, lo: u32, width: u32) -> u32 {
    (inst >> lo) & ((1 << width) - 1)
}

/// Decodes a RISC-V instruction into its component fields.
///
/// Extracts opcode, register fields, function codes, and sign-extended
/// immediate values from a 32-bit instruction encoding. The immediate of
/// formats without one (R-type, SYSTEM) is zero.
///
/// # Arguments
///
/// * `inst` - The 32-bit instruction encoding to decode
///
/// # Returns
///
/// A `Decoded` structure containing all extracted instruction fields.
pub fn decode(inst: u32) -> Decoded {
    let opcode = inst.opcode();

    let imm = match opcode {
        opcodes::OP_IMM | opcodes::OP_LOAD | opcodes::OP_JALR => decode_i_type_imm(inst),
        opcodes::OP_STORE => decode_s_type_imm(inst),
        opcodes::OP_BRANCH => decode_b_type_imm(inst),
        opcodes::OP_LUI | opcodes::OP_AUIPC => decode_u_type_imm(inst),
        opcodes::OP_JAL => decode_j_type_imm(inst),
        _ => 0,
    };

    Decoded {
        raw: inst,
        opcode,
        rd: inst.rd(),
        rs1: inst.rs1(),
        rs2: inst.rs2(),
        funct3: inst.funct3(),
        funct7: inst.funct7(),
        csr: inst.csr(),
        imm,
    }
}

/// Decodes the immediate value for I-Type instructions.
///
/// I-Type format: `imm[11:0] | rs1 | funct3 | rd | opcode`
/// Used for Load, JALR, and Immediate Arithmetic instructions.
pub const fn decode_i_type_imm(inst: u32) -> i32 {
    (inst as i32) >> 20
}

/// Decodes the immediate value for S-Type instructions.
///
/// S-Type format: `imm[11:5] | rs2 | rs1 | funct3 | imm[4:0] | opcode`
pub const fn decode_s_type_imm(inst: u32) -> i32 {
    let imm = (bits(inst, 25, 7) << 5) | bits(inst, 7, 5);
    sign_extend(imm, 12)
}

/// Decodes the immediate value for B-Type instructions.
///
/// B-Type format: `imm[12] | imm[10:5] | rs2 | rs1 | funct3 | imm[4:1] | imm[11] | opcode`
/// The immediate represents an even offset.
pub const fn decode_b_type_imm(inst: u32) -> i32 {
    let imm = (bits(inst, 31, 1) << 12)
        | (bits(inst, 7, 1) << 11)
        | (bits(inst, 25, 6) << 5)
        | (bits(inst, 8, 4) << 1);
    sign_extend(imm, 13)
}

/// Decodes the immediate value for U-Type instructions.
///
/// U-Type format: `imm[31:12] | rd | opcode`
pub const fn decode_u_type_imm(inst: u32) -> i32 {
    (inst & U_IMM_MASK) as i32
}

/// Decodes the immediate value for J-Type instructions.
///
/// J-Type format: `imm[20] | imm[10:1] | imm[11] | imm[19:12] | rd | opcode`
pub const fn decode_j_type_imm(inst: u32) -> i32 {
    let imm = (bits(inst, 31, 1) << 20)
        | (bits(inst, 12, 8) << 12)
        | (bits(inst, 20, 1) << 11)
        | (bits(inst, 21, 10) << 1);
    sign_extend(imm, 21)
}

/// Sign extends a value of `bits` width to a 32-bit signed integer.
const fn sign_extend(val: u32, bits: u32) -> i32 {
    let shift = INSTRUCTION_WIDTH - bits;
    (val as i32) << shift >> shift
}
