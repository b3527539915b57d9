use crate::common::builder::instruction::InstructionBuilder;
use proptest::prelude::*;
use rstest::rstest;
use rv32sim_core::isa::decode::{decode, decode_b_type_imm, decode_j_type_imm};
use rv32sim_core::isa::rv32i::opcodes;

#[test]
fn addi_fields() {
    let inst = InstructionBuilder::new().addi(10, 5, -3).build();
    let d = decode(inst);
    assert_eq!(d.opcode, opcodes::OP_IMM);
    assert_eq!(d.rd, 10);
    assert_eq!(d.rs1, 5);
    assert_eq!(d.imm, -3);
    assert_eq!(d.raw, inst);
}

#[test]
fn store_immediate_is_split_across_fields() {
    let d = decode(InstructionBuilder::new().sw(2, 7, -20).build());
    assert_eq!(d.opcode, opcodes::OP_STORE);
    assert_eq!(d.rs1, 2);
    assert_eq!(d.rs2, 7);
    assert_eq!(d.imm, -20);
}

#[test]
fn upper_immediate_is_not_shifted_down() {
    let d = decode(InstructionBuilder::new().lui(1, 0xABCDE).build());
    assert_eq!(d.imm as u32, 0xABCD_E000);
}

#[rstest]
#[case(8)]
#[case(-8)]
#[case(4094)]
#[case(-4096)]
fn branch_offsets(#[case] offset: i32) {
    let inst = InstructionBuilder::new().beq(1, 2, offset).build();
    assert_eq!(decode_b_type_imm(inst), offset);
}

#[rstest]
#[case(4)]
#[case(-4)]
#[case(0x000F_FFFE)]
#[case(-0x0010_0000)]
fn jump_offsets(#[case] offset: i32) {
    let inst = InstructionBuilder::new().jal(1, offset).build();
    assert_eq!(decode_j_type_imm(inst), offset);
}

proptest! {
    #[test]
    fn i_type_immediate_round_trips(imm in -2048i32..2048, rd in 0u32..32, rs1 in 0u32..32) {
        let d = decode(InstructionBuilder::new().addi(rd, rs1, imm).build());
        prop_assert_eq!(d.imm, imm);
        prop_assert_eq!(d.rd, rd as usize);
        prop_assert_eq!(d.rs1, rs1 as usize);
    }

    #[test]
    fn branch_immediate_is_even_and_sign_extended(half in -2048i32..2048) {
        let offset = half * 2;
        let inst = InstructionBuilder::new().bne(3, 4, offset).build();
        prop_assert_eq!(decode(inst).imm, offset);
    }
}
