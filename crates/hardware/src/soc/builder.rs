//! System-on-Chip construction and top-level `System` type.
//!
//! This module builds the bus side of the model from configuration. It performs:
//! 1. **Memory map:** Instantiates ROM + RAM, or one flat memory in unified mode.
//! 2. **Peripherals:** Attaches the register-backed peripheral window.
//! 3. **Interrupts:** Combines externally driven lines with device lines.
//! 4. **Completion:** Snoops `tohost` writes when an address is configured.

use tracing::debug;

use crate::common::SimError;
use crate::config::Config;
use crate::soc::bus::{BusRequest, BusResponse, Channel};
use crate::soc::devices::{ScratchPeripheral, TohostMonitor, TohostStatus};
use crate::soc::interconnect::Interconnect;
use crate::soc::memory::Memory;

/// Everything on the far side of the core's two bus channels.
#[derive(Debug)]
pub struct System {
    /// Bus peer for both channels.
    pub bus: Interconnect,
    irq_lines: u32,
    tohost: Option<TohostMonitor>,
}

impl System {
    /// Builds the system described by `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - Memory map, bus timing, and `tohost` address.
    ///
    /// # Returns
    ///
    /// A system with cleared memories and no interrupt lines asserted.
    pub fn new(config: &Config) -> Self {
        let mem = &config.memory;
        let mut bus = Interconnect::new(config.bus.ack_latency);

        if mem.unified {
            bus.add_device(Box::new(Memory::new(
                "MEM",
                mem.unified_base,
                mem.unified_size,
                mem.fill_word,
                false,
            )));
        } else {
            bus.add_device(Box::new(Memory::new(
                "ROM",
                mem.rom_base,
                mem.rom_size,
                mem.fill_word,
                true,
            )));
            bus.add_device(Box::new(Memory::new("RAM", mem.ram_base, mem.ram_size, 0, false)));
        }
        bus.add_device(Box::new(ScratchPeripheral::new(mem.periph_base, mem.periph_size)));

        Self {
            bus,
            irq_lines: 0,
            tohost: config.tohost.map(TohostMonitor::new),
        }
    }

    /// Drives the external interrupt lines (level-sensitive, one bit per `mip` bit).
    pub const fn set_irq_lines(&mut self, lines: u32) {
        self.irq_lines = lines;
    }

    /// Interrupt lines the core samples this cycle.
    pub fn irq_lines(&self) -> u32 {
        self.irq_lines | self.bus.irq_lines()
    }

    /// Registered response of `channel`.
    pub const fn response(&self, channel: Channel) -> BusResponse {
        self.bus.response(channel)
    }

    /// Decoded `tohost` report, if one has been written.
    pub fn tohost_status(&self) -> Option<TohostStatus> {
        self.tohost.and_then(|m| m.status())
    }

    /// Address of the monitored `tohost` word.
    pub fn tohost_addr(&self) -> Option<u32> {
        self.tohost.map(|m| m.addr())
    }

    /// Sets (or replaces) the monitored `tohost` address.
    pub fn set_tohost(&mut self, addr: u32) {
        debug!("monitoring tohost at {addr:#010x}");
        self.tohost = Some(TohostMonitor::new(addr));
    }

    /// Advances the bus by one clock edge.
    ///
    /// # Arguments
    ///
    /// * `ibus` - Registered instruction-channel request.
    /// * `dbus` - Registered data-channel request.
    pub fn tick(&mut self, ibus: &BusRequest, dbus: &BusRequest) {
        self.bus.tick(ibus, dbus);
        if let (Some(monitor), Some(write)) = (self.tohost.as_mut(), self.bus.completed_write()) {
            monitor.observe(write.adr, write.dat, write.sel);
        }
    }

    /// Copies an image segment into memory.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Load`] if no single region holds the whole segment.
    pub fn load_segment(&mut self, addr: u32, data: &[u8]) -> Result<(), SimError> {
        if data.is_empty() || self.bus.load(addr, data) {
            debug!("loaded {} bytes at {addr:#010x}", data.len());
            Ok(())
        } else {
            Err(SimError::Load { addr, len: data.len() })
        }
    }

    /// Reads a word without bus timing.
    pub fn peek_word(&mut self, addr: u32) -> Option<u32> {
        self.bus.peek_word(addr)
    }

    /// Writes a word without bus timing.
    pub fn poke_word(&mut self, addr: u32, data: u32) -> bool {
        self.bus.poke_word(addr, data)
    }
}
