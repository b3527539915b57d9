//! System interconnect for the instruction and data channels.
//!
//! This module implements the bus peer side of both core channels. It provides:
//! 1. **Device registration:** Devices are added by address range and sorted for lookup.
//! 2. **Access routing:** Each request is decoded to a device by address; unmapped
//!    addresses and data writes to read-only regions answer `err`.
//! 3. **Response timing:** Each channel has a port that waits the configured latency
//!    before registering `ack`/`err`, then idles for one cycle while the master
//!    observes the response and drops its request.
//! 4. **Write reporting:** The last completed data write is reported for snooping.

use tracing::warn;

use crate::common::constants::{SEL_ALL, WORD_OFFSET_MASK};
use crate::soc::bus::{BusRequest, BusResponse, Channel};
use crate::soc::traits::Device;

/// Handshake state of one channel port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum PortState {
    /// No request in progress.
    #[default]
    Idle,
    /// Request seen; `remaining` cycles until the response is registered.
    Waiting {
        /// Cycles left before responding.
        remaining: u32,
    },
    /// Response registered last cycle; the request still visible is the one just served.
    Responded,
}

/// Peer-side state of one channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Port {
    state: PortState,
    response: BusResponse,
}

/// A data write that completed with `ack` this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompletedWrite {
    /// Byte address of the write.
    pub adr: u32,
    /// Write data.
    pub dat: u32,
    /// Byte-enable mask.
    pub sel: u8,
}

/// Bus peer routing both core channels to the attached devices.
pub struct Interconnect {
    devices: Vec<Box<dyn Device>>,
    ack_latency: u32,
    ibus: Port,
    dbus: Port,
    completed_write: Option<CompletedWrite>,
}

impl std::fmt::Debug for Interconnect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interconnect")
            .field("devices", &self.devices.iter().map(|d| d.name()).collect::<Vec<_>>())
            .field("ack_latency", &self.ack_latency)
            .finish_non_exhaustive()
    }
}

impl Interconnect {
    /// Creates an interconnect with no devices.
    ///
    /// # Arguments
    ///
    /// * `ack_latency` - Cycles between the peer first seeing a request and
    ///   registering its response. Values below 1 are raised to 1.
    pub fn new(ack_latency: u32) -> Self {
        Self {
            devices: Vec::new(),
            ack_latency: ack_latency.max(1),
            ibus: Port::default(),
            dbus: Port::default(),
            completed_write: None,
        }
    }

    /// Registers a device; devices are kept sorted by base address.
    pub fn add_device(&mut self, dev: Box<dyn Device>) {
        self.devices.push(dev);
        self.devices.sort_by_key(|d| d.address_range().0);
    }

    /// Registered response of a channel, as the core samples it.
    pub const fn response(&self, channel: Channel) -> BusResponse {
        match channel {
            Channel::Instruction => self.ibus.response,
            Channel::Data => self.dbus.response,
        }
    }

    /// Data write completed during the last tick, if any.
    pub const fn completed_write(&self) -> Option<CompletedWrite> {
        self.completed_write
    }

    /// Advances both ports and all devices by one clock edge.
    ///
    /// # Arguments
    ///
    /// * `ibus` - Registered instruction-channel request from the core.
    /// * `dbus` - Registered data-channel request from the core.
    pub fn tick(&mut self, ibus: &BusRequest, dbus: &BusRequest) {
        self.completed_write = None;

        let mut port = self.ibus;
        self.step_port(&mut port, Channel::Instruction, ibus);
        self.ibus = port;

        let mut port = self.dbus;
        self.step_port(&mut port, Channel::Data, dbus);
        self.dbus = port;

        for dev in &mut self.devices {
            dev.tick();
        }
    }

    /// OR of the interrupt lines driven by all devices.
    pub fn irq_lines(&self) -> u32 {
        self.devices.iter().fold(0, |acc, d| acc | d.irq_lines())
    }

    /// Copies `data` into whichever device claims `addr`.
    ///
    /// # Returns
    ///
    /// False if no single device holds the whole range.
    pub fn load(&mut self, addr: u32, data: &[u8]) -> bool {
        match self.find_device(addr) {
            Some((dev, offset)) => dev.load(offset, data),
            None => false,
        }
    }

    /// Reads the word containing `addr` without bus timing (debug access).
    pub fn peek_word(&mut self, addr: u32) -> Option<u32> {
        let (dev, offset) = self.find_device(addr & !WORD_OFFSET_MASK)?;
        Some(dev.read_word(offset))
    }

    /// Writes the word containing `addr` without bus timing (debug access).
    pub fn poke_word(&mut self, addr: u32, data: u32) -> bool {
        match self.find_device(addr & !WORD_OFFSET_MASK) {
            Some((dev, offset)) => {
                dev.write_word(offset, data, SEL_ALL);
                true
            }
            None => false,
        }
    }

    fn step_port(&mut self, port: &mut Port, channel: Channel, req: &BusRequest) {
        port.response = BusResponse::default();

        if !req.active() {
            port.state = PortState::Idle;
            return;
        }

        let remaining = match port.state {
            PortState::Responded => {
                port.state = PortState::Idle;
                return;
            }
            PortState::Idle => self.ack_latency - 1,
            PortState::Waiting { remaining } => remaining.saturating_sub(1),
        };

        if remaining > 0 {
            port.state = PortState::Waiting { remaining };
            return;
        }

        port.response = self.access(channel, req);
        port.state = PortState::Responded;
    }

    fn access(&mut self, channel: Channel, req: &BusRequest) -> BusResponse {
        let word_addr = req.adr & !WORD_OFFSET_MASK;
        let Some((dev, offset)) = self.find_device(word_addr) else {
            warn!("{channel:?} bus error: no device at {:#010x}", req.adr);
            return BusResponse::err();
        };

        if !req.we {
            return BusResponse::ack(dev.read_word(offset));
        }

        if channel == Channel::Instruction || dev.read_only() {
            warn!("{channel:?} bus error: write to read-only {} at {:#010x}", dev.name(), req.adr);
            return BusResponse::err();
        }

        dev.write_word(offset, req.dat, req.sel);
        self.completed_write = Some(CompletedWrite { adr: word_addr, dat: req.dat, sel: req.sel });
        BusResponse::ack(0)
    }

    fn find_device(&mut self, addr: u32) -> Option<(&mut Box<dyn Device>, u32)> {
        self.devices.iter_mut().find_map(|dev| {
            let (start, size) = dev.address_range();
            let offset = addr.wrapping_sub(start);
            (addr >= start && offset < size).then_some((dev, offset))
        })
    }
}
