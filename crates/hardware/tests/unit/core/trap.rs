use rv32sim_core::common::Trap;
use rv32sim_core::core::arch::csr::{self, Csrs};
use rv32sim_core::isa::privileged::cause::interrupt;

fn enabled(mie: u32, mip: u32) -> Csrs {
    let mut csrs = Csrs::new();
    csrs.mstatus = csr::MSTATUS_MIE;
    csrs.mie = mie;
    csrs.end_of_cycle(mip);
    csrs
}

#[test]
fn no_interrupt_without_global_enable() {
    let mut csrs = enabled(u32::MAX, 1 << interrupt::MACHINE_EXTERNAL);
    assert!(csrs.pending_interrupt().is_some());
    csrs.mstatus = 0;
    assert_eq!(csrs.pending_interrupt(), None);
}

#[test]
fn masked_lines_are_ignored() {
    let csrs = enabled(1 << interrupt::MACHINE_TIMER, 1 << interrupt::MACHINE_EXTERNAL);
    assert_eq!(csrs.pending_interrupt(), None);
}

#[test]
fn highest_index_wins() {
    let lines = (1 << interrupt::MACHINE_TIMER) | (1 << 20) | (1 << interrupt::MACHINE_SOFTWARE);
    let csrs = enabled(u32::MAX, lines);
    assert_eq!(csrs.pending_interrupt(), Some(Trap::Interrupt(20)));
}

#[test]
fn direct_mode_uses_base_for_everything() {
    let mut csrs = Csrs::new();
    csrs.mtvec = 0x1000;
    assert_eq!(csrs.trap_vector(&Trap::Interrupt(11)), 0x1000);
    assert_eq!(csrs.trap_vector(&Trap::EnvironmentCallFromMMode), 0x1000);
}

#[test]
fn vectored_mode_offsets_interrupts_only() {
    let mut csrs = Csrs::new();
    csrs.mtvec = 0x1000 | csr::MTVEC_MODE_VECTORED;
    assert_eq!(csrs.trap_vector(&Trap::Interrupt(11)), 0x1000 + 44);
    assert_eq!(csrs.trap_vector(&Trap::Interrupt(16)), 0x1000 + 64);
    assert_eq!(csrs.trap_vector(&Trap::IllegalInstruction(0)), 0x1000);
}

#[test]
fn entry_records_cause_and_stacks_enable() {
    let mut csrs = Csrs::new();
    csrs.mstatus = csr::MSTATUS_MIE;
    csrs.mtvec = 0x400;

    let vector = csrs.enter_trap(&Trap::LoadAccessFault(0x2_0000), 0x88);
    assert_eq!(vector, 0x400);
    assert_eq!(csrs.mepc, 0x88);
    assert_eq!(csrs.mcause, 5);
    assert_eq!(csrs.mtval, 0x2_0000);
    assert_eq!(csrs.mstatus & csr::MSTATUS_MIE, 0);
    assert_ne!(csrs.mstatus & csr::MSTATUS_MPIE, 0);
}

#[test]
fn entry_with_interrupts_disabled_clears_mpie() {
    let mut csrs = Csrs::new();
    csrs.mstatus = csr::MSTATUS_MPIE;
    let _ = csrs.enter_trap(&Trap::EnvironmentCallFromMMode, 0x10);
    assert_eq!(csrs.mstatus & (csr::MSTATUS_MIE | csr::MSTATUS_MPIE), 0);
    assert_eq!(csrs.mtval, 0);
}

#[test]
fn interrupt_cause_has_top_bit() {
    let mut csrs = Csrs::new();
    let _ = csrs.enter_trap(&Trap::Interrupt(interrupt::MACHINE_EXTERNAL), 0x20);
    assert_eq!(csrs.mcause, 0x8000_000B);
}

#[test]
fn mret_restores_enable_and_returns_to_mepc() {
    let mut csrs = Csrs::new();
    csrs.mstatus = csr::MSTATUS_MIE;
    let _ = csrs.enter_trap(&Trap::Breakpoint(0x40), 0x40);

    assert_eq!(csrs.trap_return(), 0x40);
    assert_ne!(csrs.mstatus & csr::MSTATUS_MIE, 0);
    assert_ne!(csrs.mstatus & csr::MSTATUS_MPIE, 0);
}

#[test]
fn mret_with_mpie_clear_leaves_interrupts_disabled() {
    let mut csrs = Csrs::new();
    csrs.mepc = 0x80;
    assert_eq!(csrs.trap_return(), 0x80);
    assert_eq!(csrs.mstatus & csr::MSTATUS_MIE, 0);
    assert_ne!(csrs.mstatus & csr::MSTATUS_MPIE, 0);
}
