use crate::common::builder::instruction::{EBREAK, ECALL, InstructionBuilder as I, MRET, NOP, WFI};
use crate::common::harness::{RAM_BASE, TestContext};
use rv32sim_core::core::arch::csr;
use rv32sim_core::core::pipeline::state::CoreState;
use rv32sim_core::isa::privileged::cause::interrupt;

const HANDLER: u32 = 0x100;

fn trapping(program: &[u32]) -> TestContext {
    let mut ctx = TestContext::new().load_program(0, program);
    ctx.cpu_mut().csrs.mtvec = HANDLER;
    ctx
}

#[test]
fn alu_instruction_takes_six_cycles() {
    let mut ctx = TestContext::new().load_program(0, &[I::new().addi(1, 0, 5).build()]);
    assert_eq!(ctx.step(1), 6);
    assert_eq!(ctx.get_reg(1), 5);
    assert_eq!(ctx.cpu().pc, 4);
    assert_eq!(ctx.cpu().state, CoreState::Fetch);
    assert_eq!(ctx.csrs().minstret, 1);
}

#[test]
fn multiply_sequence() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            I::new().addi(1, 0, 3).build(),
            I::new().addi(2, 0, 5).build(),
            I::new().mul(3, 1, 2).build(),
        ],
    );
    assert_eq!(ctx.step(2), 12);
    assert_eq!(ctx.step(1), 41);
    assert_eq!(ctx.get_reg(3), 15);
    assert_eq!(ctx.csrs().minstret, 3);
    assert_eq!(ctx.cpu().stats.mdu_ops, 1);
}

#[test]
fn divide_takes_one_cycle_more_than_multiply() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[I::new().div(3, 1, 2).build(), I::new().rem(4, 1, 2).build(), I::new().divu(5, 1, 0).build()],
    );
    ctx.set_reg(1, (-7i32) as u32);
    ctx.set_reg(2, 2);
    assert_eq!(ctx.step(1), 42);
    assert_eq!(ctx.get_reg(3) as i32, -3);
    let _ = ctx.step(1);
    assert_eq!(ctx.get_reg(4) as i32, -1);
    let _ = ctx.step(1);
    assert_eq!(ctx.get_reg(5), u32::MAX);
}

#[test]
fn back_to_back_multiplies() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[I::new().mul(3, 1, 2).build(), I::new().mulh(4, 1, 2).build()],
    );
    ctx.set_reg(1, 0x8000_0000);
    ctx.set_reg(2, 4);
    assert_eq!(ctx.step(2), 82);
    assert_eq!(ctx.get_reg(3), 0);
    assert_eq!(ctx.get_reg(4), 0xFFFF_FFFE);
}

#[test]
fn x0_is_never_written() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[I::new().addi(0, 0, 5).build(), I::new().lui(0, 0x12345).build()],
    );
    let _ = ctx.step(2);
    assert_eq!(ctx.get_reg(0), 0);
    assert_eq!(ctx.csrs().minstret, 2);
}

#[test]
fn sub_word_stores_and_loads() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            I::new().lui(1, RAM_BASE >> 12).build(),
            I::new().addi(2, 0, -128).build(),
            I::new().sb(1, 2, 1).build(),
            I::new().sh(1, 2, 2).build(),
            I::new().lb(3, 1, 1).build(),
            I::new().lbu(4, 1, 1).build(),
            I::new().lh(6, 1, 2).build(),
            I::new().lw(5, 1, 0).build(),
        ],
    );
    let _ = ctx.step(7);
    assert_eq!(ctx.step(1), 9);

    assert_eq!(ctx.peek(RAM_BASE), 0xFF80_8000);
    assert_eq!(ctx.get_reg(3), 0xFFFF_FF80);
    assert_eq!(ctx.get_reg(4), 0x80);
    assert_eq!(ctx.get_reg(6), 0xFFFF_FF80);
    assert_eq!(ctx.get_reg(5), 0xFF80_8000);
}

#[test]
fn misaligned_load_traps_without_writing_rd() {
    let mut ctx = trapping(&[I::new().lw(5, 1, 1).build()]);
    ctx.set_reg(1, RAM_BASE);
    ctx.set_reg(5, 0xAAAA);

    let _ = ctx.step(1);
    let csrs = ctx.csrs();
    assert_eq!(csrs.mcause, 4);
    assert_eq!(csrs.mtval, RAM_BASE + 1);
    assert_eq!(csrs.mepc, 0);
    assert_eq!(csrs.minstret, 0);
    assert_eq!(ctx.get_reg(5), 0xAAAA);
    assert_eq!(ctx.cpu().pc, HANDLER);
    assert_eq!(ctx.cpu().stats.exceptions, 1);
}

#[test]
fn misaligned_store_never_reaches_the_bus() {
    let mut ctx = trapping(&[I::new().sh(1, 2, 1).build()]);
    ctx.set_reg(1, RAM_BASE);
    ctx.set_reg(2, 0xFFFF);
    let _ = ctx.step(1);
    assert_eq!(ctx.csrs().mcause, 6);
    assert_eq!(ctx.csrs().mtval, RAM_BASE + 1);
    assert_eq!(ctx.peek(RAM_BASE), 0);
}

#[test]
fn store_to_rom_is_an_access_fault() {
    let mut ctx = trapping(&[I::new().sw(0, 2, 0x200).build()]);
    ctx.set_reg(2, 0x55);
    let _ = ctx.step(1);
    assert_eq!(ctx.csrs().mcause, 7);
    assert_eq!(ctx.csrs().mtval, 0x200);
    assert_eq!(ctx.peek(0x200), NOP);
}

#[test]
fn load_from_unmapped_address_is_an_access_fault() {
    let mut ctx = trapping(&[I::new().lw(5, 1, 0).build()]);
    ctx.set_reg(1, 0x3_0000);
    let _ = ctx.step(1);
    assert_eq!(ctx.csrs().mcause, 5);
    assert_eq!(ctx.csrs().mtval, 0x3_0000);
    assert_eq!(ctx.get_reg(5), 0);
}

#[test]
fn fetch_from_unmapped_address_is_an_access_fault() {
    let mut ctx = trapping(&[]);
    ctx.cpu_mut().pc = 0x3_0000;
    let _ = ctx.step(1);
    let csrs = ctx.csrs();
    assert_eq!(csrs.mcause, 1);
    assert_eq!(csrs.mtval, 0x3_0000);
    assert_eq!(csrs.mepc, 0x3_0000);
    assert_eq!(ctx.cpu().pc, HANDLER);
}

#[test]
fn illegal_instruction_records_encoding() {
    let mut ctx = trapping(&[0xFFFF_FFFF]);
    let _ = ctx.step(1);
    assert_eq!(ctx.csrs().mcause, 2);
    assert_eq!(ctx.csrs().mtval, 0xFFFF_FFFF);
}

#[test]
fn ecall_and_ebreak() {
    let mut ctx = trapping(&[ECALL]);
    let _ = ctx.step(1);
    assert_eq!(ctx.csrs().mcause, 11);
    assert_eq!(ctx.csrs().mtval, 0);
    assert_eq!(ctx.csrs().mepc, 0);

    let mut ctx = trapping(&[NOP, EBREAK]);
    let _ = ctx.step(2);
    assert_eq!(ctx.csrs().mcause, 3);
    assert_eq!(ctx.csrs().mtval, 4);
    assert_eq!(ctx.csrs().mepc, 4);
}

#[test]
fn misaligned_jump_target_traps_on_next_instruction() {
    let mut ctx = trapping(&[I::new().jalr(7, 6, 0).build()]);
    ctx.set_reg(6, 0x0000_0032);

    let _ = ctx.step(1);
    assert_eq!(ctx.get_reg(7), 4);
    assert_eq!(ctx.cpu().pc, 0x32);

    let _ = ctx.step(1);
    assert_eq!(ctx.csrs().mcause, 0);
    assert_eq!(ctx.csrs().mtval, 0x32);
    assert_eq!(ctx.csrs().mepc, 0x32);
}

#[test]
fn jalr_clears_target_bit_zero() {
    let mut ctx = TestContext::new().load_program(0, &[I::new().jalr(1, 2, 1).build()]);
    ctx.set_reg(2, 0x40);
    let _ = ctx.step(1);
    assert_eq!(ctx.cpu().pc, 0x40);
    assert_eq!(ctx.get_reg(1), 4);
}

#[test]
fn branches_and_jumps() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            I::new().addi(1, 0, 1).build(),  // 0x00
            I::new().beq(1, 0, 8).build(),   // 0x04 not taken
            I::new().bne(1, 0, 8).build(),   // 0x08 taken -> 0x10
            I::new().addi(2, 0, 99).build(), // 0x0C
            I::new().jal(3, 8).build(),      // 0x10 -> 0x18
            I::new().addi(4, 0, 99).build(), // 0x14
            I::new().addi(5, 0, 5).build(),  // 0x18
        ],
    );
    let _ = ctx.step(5);
    assert_eq!(ctx.get_reg(2), 0);
    assert_eq!(ctx.get_reg(3), 0x14);
    assert_eq!(ctx.get_reg(4), 0);
    assert_eq!(ctx.get_reg(5), 5);
    assert_eq!(ctx.cpu().pc, 0x1C);
}

#[test]
fn backward_branch_loop() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            I::new().addi(1, 0, 3).build(),
            I::new().addi(2, 2, 1).build(),
            I::new().addi(1, 1, -1).build(),
            I::new().bne(1, 0, -8).build(),
        ],
    );
    let _ = ctx.step(1 + 3 * 3);
    assert_eq!(ctx.get_reg(2), 3);
    assert_eq!(ctx.cpu().pc, 0x10);
}

#[test]
fn csr_instructions() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            I::new().addi(1, 0, 0x55).build(),
            I::new().csrrw(2, csr::MSCRATCH, 1).build(),
            I::new().csrrsi(3, csr::MSCRATCH, 2).build(),
            I::new().csrrc(4, csr::MSCRATCH, 1).build(),
            I::new().csrrs(5, csr::MINSTRET, 0).build(),
            I::new().csrrs(6, 0x7C0, 0).build(),
        ],
    );
    ctx.set_reg(6, 0xDEAD);
    let _ = ctx.step(6);
    assert_eq!(ctx.get_reg(2), 0);
    assert_eq!(ctx.get_reg(3), 0x55);
    assert_eq!(ctx.get_reg(4), 0x57);
    assert_eq!(ctx.csrs().mscratch, 0x02);
    assert_eq!(ctx.get_reg(5), 4);
    assert_eq!(ctx.get_reg(6), 0);
    assert_eq!(ctx.csrs().minstret, 6);
    assert_eq!(ctx.cpu().stats.exceptions, 0);
    assert_eq!(ctx.cpu().stats.invalid_csr_accesses, 1);
}

#[test]
fn csr_write_to_minstret_is_not_followed_by_an_increment() {
    let mut ctx = TestContext::new().load_program(
        0,
        &[
            I::new().addi(1, 0, 100).build(),
            I::new().csrrw(0, csr::MINSTRET, 1).build(),
            I::new().csrrs(2, csr::MINSTRET, 0).build(),
        ],
    );
    let _ = ctx.step(3);
    assert_eq!(ctx.get_reg(2), 100);
    assert_eq!(ctx.csrs().minstret, 101);
    assert_eq!(ctx.cpu().stats.instructions_retired, 3);
}

#[test]
fn wfi_and_fence_retire_as_no_ops() {
    let mut ctx = TestContext::new()
        .load_program(0, &[WFI, 0x0000_000F, I::new().addi(1, 0, 1).build()]);
    let _ = ctx.step(3);
    assert_eq!(ctx.get_reg(1), 1);
    assert_eq!(ctx.csrs().minstret, 3);
}

#[test]
fn ecall_handler_returns_with_mret() {
    let handler = [
        I::new().csrrs(6, csr::MEPC, 0).build(),
        I::new().addi(6, 6, 4).build(),
        I::new().csrrw(0, csr::MEPC, 6).build(),
        MRET,
    ];
    let mut ctx = TestContext::new()
        .load_program(HANDLER, &handler)
        .load_program(0, &[ECALL, I::new().addi(1, 0, 7).build()]);
    ctx.cpu_mut().csrs.mtvec = HANDLER;

    let _ = ctx.step(1);
    assert_eq!(ctx.cpu().pc, HANDLER);
    let _ = ctx.step(4);
    assert_eq!(ctx.cpu().pc, 4);
    let _ = ctx.step(1);
    assert_eq!(ctx.get_reg(1), 7);
    assert_eq!(
        ctx.csrs().read(csr::MSTATUS),
        Some(csr::MSTATUS_MPP | csr::MSTATUS_MPIE)
    );
}

fn interrupt_ready(mtvec: u32) -> TestContext {
    let mut ctx = TestContext::new().load_program(0, &[NOP, NOP, NOP]);
    let cpu = ctx.cpu_mut();
    cpu.csrs.mtvec = mtvec;
    cpu.csrs.mstatus = csr::MSTATUS_MIE;
    cpu.csrs.mie = 1 << interrupt::MACHINE_EXTERNAL;
    ctx
}

#[test]
fn interrupt_is_taken_in_fetch() {
    let mut ctx = interrupt_ready(HANDLER);
    ctx.sim.system.set_irq_lines(1 << interrupt::MACHINE_EXTERNAL);

    assert_eq!(ctx.step(1), 3);
    let csrs = ctx.csrs();
    assert_eq!(csrs.mepc, 0);
    assert_eq!(csrs.mcause, 0x8000_000B);
    assert_eq!(csrs.mtval, 0);
    assert_eq!(csrs.mstatus & csr::MSTATUS_MIE, 0);
    assert_eq!(csrs.minstret, 0);
    assert_eq!(ctx.cpu().pc, HANDLER);
    assert_eq!(ctx.cpu().stats.interrupts, 1);
}

#[test]
fn vectored_interrupt_offsets_by_cause() {
    let mut ctx = interrupt_ready(HANDLER | csr::MTVEC_MODE_VECTORED);
    ctx.sim.system.set_irq_lines(1 << interrupt::MACHINE_EXTERNAL);
    let _ = ctx.step(1);
    assert_eq!(ctx.cpu().pc, HANDLER + 4 * interrupt::MACHINE_EXTERNAL);
}

#[test]
fn interrupt_waits_for_instruction_boundary() {
    let mut ctx = TestContext::new()
        .load_program(0, &[I::new().addi(1, 0, 1).build(), I::new().addi(2, 0, 2).build()]);
    let cpu = ctx.cpu_mut();
    cpu.csrs.mtvec = HANDLER;
    cpu.csrs.mstatus = csr::MSTATUS_MIE;
    cpu.csrs.mie = 1 << interrupt::MACHINE_EXTERNAL;

    ctx.run_cycles(4);
    assert_eq!(ctx.cpu().state, CoreState::Execute);
    ctx.sim.system.set_irq_lines(1 << interrupt::MACHINE_EXTERNAL);

    let _ = ctx.step(1);
    assert_eq!(ctx.get_reg(1), 1);
    let _ = ctx.step(1);
    assert_eq!(ctx.get_reg(2), 0);
    assert_eq!(ctx.csrs().mepc, 4);
    assert_eq!(ctx.csrs().mcause, 0x8000_000B);
}

#[test]
fn masked_interrupt_is_ignored() {
    let mut ctx = interrupt_ready(HANDLER);
    ctx.cpu_mut().csrs.mie = 0;
    ctx.sim.system.set_irq_lines(1 << interrupt::MACHINE_EXTERNAL);
    let _ = ctx.step(2);
    assert_eq!(ctx.cpu().pc, 8);
    assert_eq!(ctx.csrs().mip, 1 << interrupt::MACHINE_EXTERNAL);
    assert_eq!(ctx.cpu().stats.interrupts, 0);
}
