use crate::common::mocks::device::mapped_device;
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use rv32sim_core::soc::bus::{BusRequest, BusResponse, Channel};
use rv32sim_core::soc::interconnect::{CompletedWrite, Interconnect};

const IDLE: BusRequest = BusRequest { cyc: false, stb: false, we: false, adr: 0, dat: 0, sel: 0 };

#[test]
fn read_is_routed_by_address() {
    let mut low = mapped_device(0x1000, 0x100, false, 0);
    low.expect_read_word().with(eq(0x10)).times(1).return_const(0xCAFE_u32);
    let mut high = mapped_device(0x2000, 0x100, false, 0);
    high.expect_read_word().never();

    let mut bus = Interconnect::new(1);
    bus.add_device(Box::new(high));
    bus.add_device(Box::new(low));

    let req = BusRequest::read(0x1012);
    bus.tick(&IDLE, &req);
    assert_eq!(bus.response(Channel::Data), BusResponse::ack(0xCAFE));
    assert_eq!(bus.response(Channel::Instruction), BusResponse::default());
}

#[test]
fn response_is_followed_by_an_idle_cycle() {
    let mut dev = mapped_device(0, 0x100, true, 0);
    dev.expect_read_word().times(1).return_const(7_u32);
    let mut bus = Interconnect::new(1);
    bus.add_device(Box::new(dev));

    let req = BusRequest::read(0x8);
    bus.tick(&req, &IDLE);
    assert_eq!(bus.response(Channel::Instruction), BusResponse::ack(7));

    // The master still shows the request it is about to drop.
    bus.tick(&req, &IDLE);
    assert_eq!(bus.response(Channel::Instruction), BusResponse::default());
}

#[test]
fn latency_delays_the_response() {
    let mut dev = mapped_device(0, 0x100, false, 0);
    dev.expect_read_word().times(1).return_const(1_u32);
    let mut bus = Interconnect::new(3);
    bus.add_device(Box::new(dev));

    let req = BusRequest::read(0);
    bus.tick(&IDLE, &req);
    assert_eq!(bus.response(Channel::Data), BusResponse::default());
    bus.tick(&IDLE, &req);
    assert_eq!(bus.response(Channel::Data), BusResponse::default());
    bus.tick(&IDLE, &req);
    assert_eq!(bus.response(Channel::Data), BusResponse::ack(1));
}

#[test]
fn zero_latency_is_raised_to_one() {
    let mut dev = mapped_device(0, 0x100, false, 0);
    dev.expect_read_word().return_const(9_u32);
    let mut bus = Interconnect::new(0);
    bus.add_device(Box::new(dev));

    bus.tick(&IDLE, &BusRequest::read(0));
    assert_eq!(bus.response(Channel::Data), BusResponse::ack(9));
}

#[test]
fn unmapped_address_errors() {
    let mut bus = Interconnect::new(1);
    bus.add_device(Box::new(mapped_device(0x1000, 0x100, false, 0)));

    bus.tick(&BusRequest::read(0x1100), &BusRequest::write(0x0, 1, 0b1111));
    assert_eq!(bus.response(Channel::Instruction), BusResponse::err());
    assert_eq!(bus.response(Channel::Data), BusResponse::err());
    assert_eq!(bus.completed_write(), None);
}

#[test]
fn write_to_read_only_device_errors() {
    let mut rom = mapped_device(0, 0x100, true, 0);
    rom.expect_write_word().never();
    let mut bus = Interconnect::new(1);
    bus.add_device(Box::new(rom));

    bus.tick(&IDLE, &BusRequest::write(0x10, 0xFF, 0b1111));
    assert_eq!(bus.response(Channel::Data), BusResponse::err());
}

#[test]
fn instruction_channel_cannot_write() {
    let mut ram = mapped_device(0, 0x100, false, 0);
    ram.expect_write_word().never();
    let mut bus = Interconnect::new(1);
    bus.add_device(Box::new(ram));

    bus.tick(&BusRequest::write(0x10, 0xFF, 0b1111), &IDLE);
    assert_eq!(bus.response(Channel::Instruction), BusResponse::err());
}

#[test]
fn write_is_applied_and_reported() {
    let mut ram = mapped_device(0x1000, 0x100, false, 0);
    ram.expect_write_word().with(eq(0x4), eq(0xABAB_ABAB), eq(0b0010)).times(1).return_const(());
    let mut bus = Interconnect::new(1);
    bus.add_device(Box::new(ram));

    let req = BusRequest::write(0x1005, 0xABAB_ABAB, 0b0010);
    bus.tick(&IDLE, &req);
    assert_eq!(bus.response(Channel::Data), BusResponse::ack(0));
    assert_eq!(
        bus.completed_write(),
        Some(CompletedWrite { adr: 0x1004, dat: 0xABAB_ABAB, sel: 0b0010 })
    );

    bus.tick(&IDLE, &req);
    assert_eq!(bus.completed_write(), None);
}

#[test]
fn channels_are_independent() {
    let mut dev = mapped_device(0, 0x100, false, 0);
    dev.expect_read_word().with(eq(0x0)).return_const(0x11_u32);
    dev.expect_read_word().with(eq(0x4)).return_const(0x22_u32);
    let mut bus = Interconnect::new(1);
    bus.add_device(Box::new(dev));

    bus.tick(&BusRequest::read(0x0), &BusRequest::read(0x4));
    assert_eq!(bus.response(Channel::Instruction), BusResponse::ack(0x11));
    assert_eq!(bus.response(Channel::Data), BusResponse::ack(0x22));
}

#[test]
fn interrupt_lines_are_combined() {
    let mut bus = Interconnect::new(1);
    bus.add_device(Box::new(mapped_device(0, 0x100, false, 1 << 16)));
    bus.add_device(Box::new(mapped_device(0x100, 0x100, false, 1 << 17)));
    assert_eq!(bus.irq_lines(), (1 << 16) | (1 << 17));
}

#[test]
fn load_goes_to_the_owning_device() {
    let mut dev = mapped_device(0x1000, 0x100, false, 0);
    dev.expect_load().returning(|offset, data| offset + data.len() as u32 <= 0x100);
    let mut bus = Interconnect::new(1);
    bus.add_device(Box::new(dev));

    assert!(bus.load(0x1010, &[1, 2, 3, 4]));
    assert!(!bus.load(0x10FE, &[1, 2, 3, 4]));
    assert!(!bus.load(0x3000, &[1]));
}
