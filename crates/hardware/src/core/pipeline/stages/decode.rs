//! Instruction Decode State.
//!
//! This module implements the second controller state. It performs the following:
//! 1. **Decoding:** Splits the latched instruction word into fields and immediate.
//! 2. **Control Generation:** Produces ALU, memory, write-back, branch, CSR, MDU and
//!    system control signals. Unrecognized encodings set `illegal`.
//! 3. **Register Read:** Reads `rs1` and `rs2` from the register file.

use crate::core::Cpu;
use crate::core::pipeline::signals::{
    AluOp, BranchCond, ControlSignals, CsrOp, MemWidth, MulDivOp, OpASrc, OpBSrc, SystemOp,
    WbSrc,
};
use crate::core::pipeline::state::CoreState;
use crate::isa::decode::decode as instruction_decode;
use crate::isa::instruction::Decoded;
use crate::isa::privileged::opcodes as sys_ops;
use crate::isa::rv32i::{funct3 as i_funct3, funct7 as i_funct7, opcodes as i_opcodes};
use crate::isa::rv32m::{funct3 as m_funct3, opcodes as m_opcodes};

/// Executes the decode state.
///
/// # Arguments
///
/// * `cpu` - Mutable reference to the CPU state.
pub fn decode_stage(cpu: &mut Cpu) {
    let d = instruction_decode(cpu.latch.inst);
    cpu.latch.decoded = d;
    cpu.latch.ctrl = control_signals(&d);
    cpu.latch.rv1 = cpu.regs.read(d.rs1);
    cpu.latch.rv2 = cpu.regs.read(d.rs2);
    cpu.state = CoreState::Execute;
}

/// Generates the control signals for a decoded instruction.
///
/// # Arguments
///
/// * `d` - Decoded instruction fields.
///
/// # Returns
///
/// The control signals; `illegal` is set for any unrecognized combination of
/// opcode, `funct3` and `funct7`.
///
/// ```
/// use rv32sim_core::core::pipeline::signals::WbSrc;
/// use rv32sim_core::core::pipeline::stages::decode::control_signals;
/// use rv32sim_core::isa::decode::decode;
///
/// let c = control_signals(&decode(0x0000_2503)); // lw a0, 0(zero)
/// assert!(c.mem_read && c.reg_write && !c.illegal);
/// assert_eq!(c.wb_src, WbSrc::Mem);
/// ```
pub fn control_signals(d: &Decoded) -> ControlSignals {
    let mut c = ControlSignals::default();

    match d.opcode {
        i_opcodes::OP_LUI => {
            c.reg_write = true;
            c.alu = AluOp::PassB;
        }
        i_opcodes::OP_AUIPC => {
            c.reg_write = true;
            c.a_src = OpASrc::Pc;
        }
        i_opcodes::OP_JAL => {
            c.reg_write = true;
            c.jump = true;
            c.wb_src = WbSrc::PcPlus4;
        }
        i_opcodes::OP_JALR => {
            c.reg_write = true;
            c.jump_reg = true;
            c.wb_src = WbSrc::PcPlus4;
            c.illegal = d.funct3 != i_funct3::JALR;
        }
        i_opcodes::OP_BRANCH => {
            c.branch = true;
            c.b_src = OpBSrc::Reg2;
            match d.funct3 {
                i_funct3::BEQ => c.branch_cond = BranchCond::Eq,
                i_funct3::BNE => c.branch_cond = BranchCond::Ne,
                i_funct3::BLT => c.branch_cond = BranchCond::Lt,
                i_funct3::BGE => c.branch_cond = BranchCond::Ge,
                i_funct3::BLTU => c.branch_cond = BranchCond::Ltu,
                i_funct3::BGEU => c.branch_cond = BranchCond::Geu,
                _ => c.illegal = true,
            }
        }
        i_opcodes::OP_LOAD => {
            c.reg_write = true;
            c.mem_read = true;
            c.wb_src = WbSrc::Mem;
            let (width, signed) = match d.funct3 {
                i_funct3::LB => (MemWidth::Byte, true),
                i_funct3::LH => (MemWidth::Half, true),
                i_funct3::LW => (MemWidth::Word, true),
                i_funct3::LBU => (MemWidth::Byte, false),
                i_funct3::LHU => (MemWidth::Half, false),
                _ => {
                    c.illegal = true;
                    (MemWidth::Nop, false)
                }
            };
            c.width = width;
            c.signed_load = signed;
        }
        i_opcodes::OP_STORE => {
            c.mem_write = true;
            c.width = match d.funct3 {
                i_funct3::SB => MemWidth::Byte,
                i_funct3::SH => MemWidth::Half,
                i_funct3::SW => MemWidth::Word,
                _ => {
                    c.illegal = true;
                    MemWidth::Nop
                }
            };
        }
        i_opcodes::OP_IMM => {
            c.reg_write = true;
            match d.funct3 {
                i_funct3::ADD_SUB => c.alu = AluOp::Add,
                i_funct3::SLT => c.alu = AluOp::Slt,
                i_funct3::SLTU => c.alu = AluOp::Sltu,
                i_funct3::XOR => c.alu = AluOp::Xor,
                i_funct3::OR => c.alu = AluOp::Or,
                i_funct3::AND => c.alu = AluOp::And,
                i_funct3::SLL => {
                    c.alu = AluOp::Sll;
                    c.illegal = d.funct7 != i_funct7::DEFAULT;
                }
                _ => match d.funct7 {
                    i_funct7::DEFAULT => c.alu = AluOp::Srl,
                    i_funct7::SRA => c.alu = AluOp::Sra,
                    _ => c.illegal = true,
                },
            }
        }
        i_opcodes::OP_REG => {
            c.reg_write = true;
            c.b_src = OpBSrc::Reg2;
            match (d.funct7, d.funct3) {
                (m_opcodes::M_EXTENSION, f3) => {
                    c.wb_src = WbSrc::Mdu;
                    c.muldiv = match f3 {
                        m_funct3::MUL => MulDivOp::Mul,
                        m_funct3::MULH => MulDivOp::Mulh,
                        m_funct3::MULHSU => MulDivOp::Mulhsu,
                        m_funct3::MULHU => MulDivOp::Mulhu,
                        m_funct3::DIV => MulDivOp::Div,
                        m_funct3::DIVU => MulDivOp::Divu,
                        m_funct3::REM => MulDivOp::Rem,
                        _ => MulDivOp::Remu,
                    };
                }
                (i_funct7::DEFAULT, i_funct3::ADD_SUB) => c.alu = AluOp::Add,
                (i_funct7::SUB, i_funct3::ADD_SUB) => c.alu = AluOp::Sub,
                (i_funct7::DEFAULT, i_funct3::SLL) => c.alu = AluOp::Sll,
                (i_funct7::DEFAULT, i_funct3::SLT) => c.alu = AluOp::Slt,
                (i_funct7::DEFAULT, i_funct3::SLTU) => c.alu = AluOp::Sltu,
                (i_funct7::DEFAULT, i_funct3::XOR) => c.alu = AluOp::Xor,
                (i_funct7::DEFAULT, i_funct3::SRL_SRA) => c.alu = AluOp::Srl,
                (i_funct7::SRA, i_funct3::SRL_SRA) => c.alu = AluOp::Sra,
                (i_funct7::DEFAULT, i_funct3::OR) => c.alu = AluOp::Or,
                (i_funct7::DEFAULT, i_funct3::AND) => c.alu = AluOp::And,
                _ => c.illegal = true,
            }
        }
        i_opcodes::OP_MISC_MEM => match d.funct3 {
            i_funct3::FENCE | i_funct3::FENCE_I => c.system = SystemOp::Fence,
            _ => c.illegal = true,
        },
        sys_ops::OP_SYSTEM => match d.funct3 {
            sys_ops::PRIV => match d.raw {
                sys_ops::ECALL => c.system = SystemOp::Ecall,
                sys_ops::EBREAK => c.system = SystemOp::Ebreak,
                sys_ops::MRET => c.system = SystemOp::Mret,
                sys_ops::WFI => c.system = SystemOp::Wfi,
                _ => c.illegal = true,
            },
            sys_ops::CSRRW | sys_ops::CSRRS | sys_ops::CSRRC | sys_ops::CSRRWI
            | sys_ops::CSRRSI | sys_ops::CSRRCI => {
                c.reg_write = true;
                c.wb_src = WbSrc::Csr;
                c.csr_imm = d.funct3 & sys_ops::CSR_IMM_BIT != 0;
                c.csr_op = match d.funct3 & !sys_ops::CSR_IMM_BIT {
                    sys_ops::CSRRW => CsrOp::Write,
                    sys_ops::CSRRS => CsrOp::Set,
                    _ => CsrOp::Clear,
                };
            }
            _ => c.illegal = true,
        },
        _ => c.illegal = true,
    }

    if c.illegal {
        ControlSignals { illegal: true, ..ControlSignals::default() }
    } else {
        c
    }
}
