use pretty_assertions::assert_eq;
use rstest::rstest;
use rv32sim_core::core::arch::csr::{self, CsrAccess, Csrs};
use rv32sim_core::core::pipeline::signals::CsrOp;

#[test]
fn reset_state() {
    let csrs = Csrs::new();
    assert_eq!(csrs.read(csr::MSTATUS), Some(csr::MSTATUS_MPP));
    assert_eq!(csrs.read(csr::MISA), Some(csr::MISA_RV32IM));
    assert_eq!(csrs.read(csr::MHARTID), Some(0));
    assert_eq!(csrs.read(csr::MCYCLE), Some(0));
    assert_eq!(csrs.read(0x7C0), None);
}

#[test]
fn mstatus_keeps_only_interrupt_enable_bits() {
    let mut csrs = Csrs::new();
    assert!(csrs.write(csr::MSTATUS, 0xFFFF_FFFF));
    assert_eq!(
        csrs.read(csr::MSTATUS),
        Some(csr::MSTATUS_MIE | csr::MSTATUS_MPIE | csr::MSTATUS_MPP)
    );
    assert!(csrs.write(csr::MSTATUS, 0));
    assert_eq!(csrs.read(csr::MSTATUS), Some(0x1800));
}

#[test]
fn mepc_clears_bit_zero() {
    let mut csrs = Csrs::new();
    assert!(csrs.write(csr::MEPC, 0x1235));
    assert_eq!(csrs.read(csr::MEPC), Some(0x1234));
}

#[rstest]
#[case(csr::MIP)]
#[case(csr::MISA)]
#[case(csr::MVENDORID)]
#[case(csr::CYCLE)]
#[case(csr::INSTRETH)]
fn read_only_writes_are_dropped(#[case] addr: u32) {
    let mut csrs = Csrs::new();
    let before = csrs.read(addr);
    assert!(csrs.write(addr, 0xFFFF_FFFF));
    assert_eq!(csrs.read(addr), before);
}

#[test]
fn unimplemented_access_reads_zero() {
    let mut csrs = Csrs::new();
    let access = csrs.access(0x7C0, CsrOp::Write, 5, false);
    assert_eq!(access, CsrAccess { rdata: 0, valid: false });
    assert!(!csrs.write(0x7C0, 5));
}

#[test]
fn read_modify_write_forms() {
    let mut csrs = Csrs::new();
    csrs.mscratch = 0xF0;

    let a = csrs.access(csr::MSCRATCH, CsrOp::Set, 0x0F, false);
    assert_eq!(a.rdata, 0xF0);
    assert_eq!(csrs.mscratch, 0xFF);

    let a = csrs.access(csr::MSCRATCH, CsrOp::Clear, 0xF0, false);
    assert_eq!(a.rdata, 0xFF);
    assert_eq!(csrs.mscratch, 0x0F);

    let a = csrs.access(csr::MSCRATCH, CsrOp::Write, 0x1234, false);
    assert_eq!(a.rdata, 0x0F);
    assert_eq!(csrs.mscratch, 0x1234);
}

#[test]
fn set_and_clear_with_zero_source_only_read() {
    let mut csrs = Csrs::new();
    csrs.mcycle = 10;
    // Any write to mcycle would also suppress the next increment.
    let a = csrs.access(csr::MCYCLE, CsrOp::Set, 0, true);
    assert_eq!(a.rdata, 10);
    csrs.end_of_cycle(0);
    assert_eq!(csrs.mcycle, 11);

    let a = csrs.access(csr::MCYCLE, CsrOp::Clear, 0xFFFF_FFFF, true);
    assert_eq!(a.rdata, 11);
    assert_eq!(csrs.mcycle, 11);
}

#[test]
fn software_write_to_minstret_replaces_its_own_retirement() {
    let mut csrs = Csrs::new();
    csrs.retire();
    assert_eq!(csrs.minstret, 1);

    let a = csrs.access(csr::MINSTRET, CsrOp::Write, 100, false);
    assert_eq!(a.rdata, 1);
    csrs.retire();
    assert_eq!(csrs.minstret, 100);

    csrs.retire();
    assert_eq!(csrs.minstret, 101);

    assert!(csrs.write(csr::MINSTRETH, 2));
    csrs.retire();
    assert_eq!(csrs.minstret, (2 << 32) | 101);
}

#[test]
fn software_write_to_mcycle_wins_over_increment() {
    let mut csrs = Csrs::new();
    csrs.end_of_cycle(0);
    csrs.end_of_cycle(0);
    assert_eq!(csrs.mcycle, 2);

    assert!(csrs.write(csr::MCYCLE, 100));
    csrs.end_of_cycle(0);
    assert_eq!(csrs.mcycle, 100);

    csrs.end_of_cycle(0);
    assert_eq!(csrs.mcycle, 101);
}

#[test]
fn counters_expose_both_halves() {
    let mut csrs = Csrs::new();
    csrs.mcycle = 0x0000_0001_FFFF_FFFF;
    csrs.end_of_cycle(0);
    assert_eq!(csrs.read(csr::MCYCLE), Some(0));
    assert_eq!(csrs.read(csr::MCYCLEH), Some(2));
    assert_eq!(csrs.read(csr::CYCLEH), Some(2));

    assert!(csrs.write(csr::MINSTRETH, 5));
    csrs.retire();
    assert_eq!(csrs.read(csr::MINSTRET), Some(1));
    assert_eq!(csrs.read(csr::INSTRETH), Some(5));
}

#[test]
fn mip_mirrors_interrupt_lines() {
    let mut csrs = Csrs::new();
    csrs.end_of_cycle(1 << 11);
    assert_eq!(csrs.read(csr::MIP), Some(1 << 11));
    csrs.end_of_cycle(0);
    assert_eq!(csrs.read(csr::MIP), Some(0));
}

#[test]
fn names() {
    assert_eq!(csr::name(csr::MTVEC), Some("mtvec"));
    assert_eq!(csr::name(csr::MINSTRETH), Some("minstreth"));
    assert_eq!(csr::name(0x7C0), None);
}
