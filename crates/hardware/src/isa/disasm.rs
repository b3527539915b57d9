//! Instruction Disassembler for RV32IM.
//!
//! Converts a 32-bit instruction encoding into a mnemonic string for the
//! retirement trace, the CLI listing, and test diagnostics.
//!
//! # Supported Extensions
//!
//! - RV32I (base integer)
//! - RV32M (multiply/divide)
//! - Machine-mode system instructions (ECALL, EBREAK, MRET, WFI, CSR, FENCE)
//!
//! # Usage
//!
//! ```
//! use rv32sim_core::isa::disasm::disassemble;
//! assert_eq!(disassemble(0x00A00513), "addi a0, zero, 10");
//! ```

use crate::core::arch::csr;
use crate::isa::abi::reg_name as xreg;
use crate::isa::decode::decode;
use crate::isa::instruction::Decoded;
use crate::isa::privileged::opcodes as sys_op;
use crate::isa::rv32i::{funct3 as i_f3, funct7 as i_f7, opcodes as i_op};
use crate::isa::rv32m::{funct3 as m_f3, opcodes as m_op};

/// Disassembles a 32-bit RV32IM instruction into a human-readable string.
///
/// Returns a mnemonic like `"add a0, a1, a2"` or `"unknown (0x...)"` for
/// unrecognised encodings. Branch and jump offsets are printed relative to the
/// instruction, as the assembler accepts them.
///
/// # Arguments
///
/// * `inst` - The raw 32-bit instruction encoding.
pub fn disassemble(inst: u32) -> String {
    let d = decode(inst);
    let imm = d.imm;

    match d.opcode {
        i_op::OP_REG => disasm_op_reg(&d),
        i_op::OP_IMM => disasm_op_imm(&d),

        i_op::OP_LOAD => {
            let mn = match d.funct3 {
                i_f3::LB => "lb",
                i_f3::LH => "lh",
                i_f3::LW => "lw",
                i_f3::LBU => "lbu",
                i_f3::LHU => "lhu",
                _ => return unknown(inst),
            };
            format!("{mn} {}, {imm}({})", xreg(d.rd), xreg(d.rs1))
        }

        i_op::OP_STORE => {
            let mn = match d.funct3 {
                i_f3::SB => "sb",
                i_f3::SH => "sh",
                i_f3::SW => "sw",
                _ => return unknown(inst),
            };
            format!("{mn} {}, {imm}({})", xreg(d.rs2), xreg(d.rs1))
        }

        i_op::OP_BRANCH => {
            let mn = match d.funct3 {
                i_f3::BEQ => "beq",
                i_f3::BNE => "bne",
                i_f3::BLT => "blt",
                i_f3::BGE => "bge",
                i_f3::BLTU => "bltu",
                i_f3::BGEU => "bgeu",
                _ => return unknown(inst),
            };
            format!("{mn} {}, {}, {imm}", xreg(d.rs1), xreg(d.rs2))
        }

        i_op::OP_LUI => format!("lui {}, {:#x}", xreg(d.rd), (imm as u32) >> 12),
        i_op::OP_AUIPC => format!("auipc {}, {:#x}", xreg(d.rd), (imm as u32) >> 12),
        i_op::OP_JAL => format!("jal {}, {imm}", xreg(d.rd)),
        i_op::OP_JALR => format!("jalr {}, {imm}({})", xreg(d.rd), xreg(d.rs1)),

        i_op::OP_MISC_MEM => match d.funct3 {
            i_f3::FENCE => "fence".to_string(),
            i_f3::FENCE_I => "fence.i".to_string(),
            _ => unknown(inst),
        },

        sys_op::OP_SYSTEM => disasm_system(&d),

        _ => unknown(inst),
    }
}

fn unknown(inst: u32) -> String {
    format!("unknown ({inst:#010x})")
}

/// Disassemble OP_REG (R-type register-register, including the M extension).
fn disasm_op_reg(d: &Decoded) -> String {
    let mn = if d.funct7 == m_op::M_EXTENSION {
        match d.funct3 {
            m_f3::MUL => "mul",
            m_f3::MULH => "mulh",
            m_f3::MULHSU => "mulhsu",
            m_f3::MULHU => "mulhu",
            m_f3::DIV => "div",
            m_f3::DIVU => "divu",
            m_f3::REM => "rem",
            _ => "remu",
        }
    } else {
        match (d.funct3, d.funct7) {
            (i_f3::ADD_SUB, i_f7::DEFAULT) => "add",
            (i_f3::ADD_SUB, i_f7::SUB) => "sub",
            (i_f3::SLL, i_f7::DEFAULT) => "sll",
            (i_f3::SLT, i_f7::DEFAULT) => "slt",
            (i_f3::SLTU, i_f7::DEFAULT) => "sltu",
            (i_f3::XOR, i_f7::DEFAULT) => "xor",
            (i_f3::SRL_SRA, i_f7::DEFAULT) => "srl",
            (i_f3::SRL_SRA, i_f7::SRA) => "sra",
            (i_f3::OR, i_f7::DEFAULT) => "or",
            (i_f3::AND, i_f7::DEFAULT) => "and",
            _ => return unknown(d.raw),
        }
    };
    format!("{mn} {}, {}, {}", xreg(d.rd), xreg(d.rs1), xreg(d.rs2))
}

/// Disassemble OP_IMM (I-type immediate arithmetic).
fn disasm_op_imm(d: &Decoded) -> String {
    let shamt = d.rs2;
    let mn = match d.funct3 {
        i_f3::ADD_SUB => "addi",
        i_f3::SLT => "slti",
        i_f3::SLTU => "sltiu",
        i_f3::XOR => "xori",
        i_f3::OR => "ori",
        i_f3::AND => "andi",
        i_f3::SLL => return format!("slli {}, {}, {shamt}", xreg(d.rd), xreg(d.rs1)),
        _ => {
            let mn = if d.funct7 == i_f7::SRA { "srai" } else { "srli" };
            return format!("{mn} {}, {}, {shamt}", xreg(d.rd), xreg(d.rs1));
        }
    };
    format!("{mn} {}, {}, {}", xreg(d.rd), xreg(d.rs1), d.imm)
}

/// Disassemble system instructions.
fn disasm_system(d: &Decoded) -> String {
    match d.raw {
        sys_op::ECALL => return "ecall".to_string(),
        sys_op::EBREAK => return "ebreak".to_string(),
        sys_op::MRET => return "mret".to_string(),
        sys_op::WFI => return "wfi".to_string(),
        _ => {}
    }

    let name = csr::name(d.csr)
        .map_or_else(|| format!("{:#05x}", d.csr), ToString::to_string);
    let mn = match d.funct3 {
        sys_op::CSRRW => "csrrw",
        sys_op::CSRRS => "csrrs",
        sys_op::CSRRC => "csrrc",
        sys_op::CSRRWI => return format!("csrrwi {}, {name}, {}", xreg(d.rd), d.rs1),
        sys_op::CSRRSI => return format!("csrrsi {}, {name}, {}", xreg(d.rd), d.rs1),
        sys_op::CSRRCI => return format!("csrrci {}, {name}, {}", xreg(d.rd), d.rs1),
        _ => return unknown(d.raw),
    };
    format!("{mn} {}, {name}, {}", xreg(d.rd), xreg(d.rs1))
}
