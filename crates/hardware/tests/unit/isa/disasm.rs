use crate::common::builder::instruction::{ECALL, InstructionBuilder, MRET};
use rstest::rstest;
use rv32sim_core::core::arch::csr;
use rv32sim_core::isa::disasm::disassemble;

#[rstest]
#[case(InstructionBuilder::new().addi(10, 0, 10).build(), "addi a0, zero, 10")]
#[case(InstructionBuilder::new().add(1, 2, 3).build(), "add ra, sp, gp")]
#[case(InstructionBuilder::new().sub(5, 6, 7).build(), "sub t0, t1, t2")]
#[case(InstructionBuilder::new().mul(3, 1, 2).build(), "mul gp, ra, sp")]
#[case(InstructionBuilder::new().lw(2, 1, -4).build(), "lw sp, -4(ra)")]
#[case(InstructionBuilder::new().sw(1, 2, 8).build(), "sw sp, 8(ra)")]
#[case(InstructionBuilder::new().beq(1, 2, 16).build(), "beq ra, sp, 16")]
#[case(InstructionBuilder::new().srai(1, 1, 4).build(), "srai ra, ra, 4")]
#[case(InstructionBuilder::new().lui(1, 0x12345).build(), "lui ra, 0x12345")]
#[case(InstructionBuilder::new().csrrw(0, csr::MTVEC, 5).build(), "csrrw zero, mtvec, t0")]
#[case(InstructionBuilder::new().csrrwi(0, csr::MSTATUS, 8).build(), "csrrwi zero, mstatus, 8")]
#[case(ECALL, "ecall")]
#[case(MRET, "mret")]
fn mnemonics(#[case] inst: u32, #[case] expected: &str) {
    assert_eq!(disassemble(inst), expected);
}

#[test]
fn unknown_encodings_are_printed_raw() {
    assert_eq!(disassemble(0xFFFF_FFFF), "unknown (0xffffffff)");
}

#[test]
fn unimplemented_csr_is_printed_by_number() {
    let inst = InstructionBuilder::new().csrrs(1, 0x7C0, 0).build();
    assert_eq!(disassemble(inst), "csrrs ra, 0x7c0, zero");
}
