//! Configuration system for the core model.
//!
//! This module defines the configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** The SoC memory map, bus timing, and run limits.
//! 2. **Structures:** Hierarchical config for general, memory, and bus settings.
//! 3. **Loading:** JSON parsing with every field defaulted.
//!
//! Configuration is supplied as JSON through the CLI (`--config`) or built with
//! `Config::default()`.

use std::path::Path;

use serde::Deserialize;

use crate::common::SimError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Base address of the boot ROM.
    pub const ROM_BASE: u32 = 0x0000_0000;

    /// Size of the boot ROM (32 KiB).
    pub const ROM_SIZE: u32 = 32 * 1024;

    /// Base address of the data RAM.
    pub const RAM_BASE: u32 = 0x0001_0000;

    /// Size of the data RAM (64 KiB).
    pub const RAM_SIZE: u32 = 64 * 1024;

    /// Base address of the peripheral window.
    pub const PERIPH_BASE: u32 = 0x0002_0000;

    /// Size of the peripheral window.
    pub const PERIPH_SIZE: u32 = 0x600;

    /// Base address of the single flat memory used by compliance tests.
    pub const UNIFIED_BASE: u32 = 0x8000_0000;

    /// Size of the flat memory (64 KiB).
    pub const UNIFIED_SIZE: u32 = 64 * 1024;

    /// Value of every ROM word not covered by an image (`addi x0, x0, 0`).
    pub const FILL_WORD: u32 = 0x0000_0013;

    /// Cycles between a peer seeing a request and registering its response.
    pub const ACK_LATENCY: u32 = 1;

    /// Cycle budget of a run.
    pub const MAX_CYCLES: u64 = 10_000_000;
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use rv32sim_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_cycles": 5000, "trace_instructions": true },
///     "memory": { "unified": true },
///     "bus": { "ack_latency": 2 },
///     "tohost": 2147487744
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, 5000);
/// assert_eq!(config.bus.ack_latency, 2);
/// assert_eq!(config.tohost, Some(0x8000_1000));
/// assert_eq!(config.reset_vector(), 0x8000_0000);
/// assert_eq!(config.memory.rom_size, 32 * 1024);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Memory map.
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Bus peer timing.
    #[serde(default)]
    pub bus: BusConfig,
    /// Address of the `tohost` word, if runs should end on a report.
    #[serde(default)]
    pub tohost: Option<u32>,
}

impl Config {
    /// Parses a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] when the text is not valid configuration JSON.
    pub fn from_json(text: &str) -> Result<Self, SimError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Io`] if the file cannot be read and
    /// [`SimError::Config`] if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self, SimError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| SimError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }

    /// PC loaded at reset.
    ///
    /// An explicit `general.reset_vector` wins; otherwise the ROM base, or the
    /// flat memory base in unified mode.
    pub const fn reset_vector(&self) -> u32 {
        match self.general.reset_vector {
            Some(pc) => pc,
            None if self.memory.unified => self.memory.unified_base,
            None => self.memory.rom_base,
        }
    }
}

/// General simulation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// PC at reset (defaults to the base of the boot memory).
    #[serde(default)]
    pub reset_vector: Option<u32>,

    /// Cycle budget of `Simulator::run`.
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Emit a `trace` event for every retired instruction.
    #[serde(default)]
    pub trace_instructions: bool,
}

impl GeneralConfig {
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            reset_vector: None,
            max_cycles: defaults::MAX_CYCLES,
            trace_instructions: false,
        }
    }
}

/// SoC memory map.
///
/// In the default layout the core boots from a read-only ROM, keeps data in RAM,
/// and reaches peripherals through a register window. `unified` replaces ROM and
/// RAM with one writable flat memory, as compliance tests expect.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Boot ROM base address.
    #[serde(default = "MemoryConfig::default_rom_base")]
    pub rom_base: u32,
    /// Boot ROM size in bytes.
    #[serde(default = "MemoryConfig::default_rom_size")]
    pub rom_size: u32,
    /// RAM base address.
    #[serde(default = "MemoryConfig::default_ram_base")]
    pub ram_base: u32,
    /// RAM size in bytes.
    #[serde(default = "MemoryConfig::default_ram_size")]
    pub ram_size: u32,
    /// Peripheral window base address.
    #[serde(default = "MemoryConfig::default_periph_base")]
    pub periph_base: u32,
    /// Peripheral window size in bytes.
    #[serde(default = "MemoryConfig::default_periph_size")]
    pub periph_size: u32,
    /// Use a single writable flat memory instead of ROM + RAM.
    #[serde(default)]
    pub unified: bool,
    /// Flat memory base address.
    #[serde(default = "MemoryConfig::default_unified_base")]
    pub unified_base: u32,
    /// Flat memory size in bytes.
    #[serde(default = "MemoryConfig::default_unified_size")]
    pub unified_size: u32,
    /// Initial value of ROM and flat-memory words.
    #[serde(default = "MemoryConfig::default_fill_word")]
    pub fill_word: u32,
}

impl MemoryConfig {
    const fn default_rom_base() -> u32 {
        defaults::ROM_BASE
    }

    const fn default_rom_size() -> u32 {
        defaults::ROM_SIZE
    }

    const fn default_ram_base() -> u32 {
        defaults::RAM_BASE
    }

    const fn default_ram_size() -> u32 {
        defaults::RAM_SIZE
    }

    const fn default_periph_base() -> u32 {
        defaults::PERIPH_BASE
    }

    const fn default_periph_size() -> u32 {
        defaults::PERIPH_SIZE
    }

    const fn default_unified_base() -> u32 {
        defaults::UNIFIED_BASE
    }

    const fn default_unified_size() -> u32 {
        defaults::UNIFIED_SIZE
    }

    const fn default_fill_word() -> u32 {
        defaults::FILL_WORD
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            rom_base: defaults::ROM_BASE,
            rom_size: defaults::ROM_SIZE,
            ram_base: defaults::RAM_BASE,
            ram_size: defaults::RAM_SIZE,
            periph_base: defaults::PERIPH_BASE,
            periph_size: defaults::PERIPH_SIZE,
            unified: false,
            unified_base: defaults::UNIFIED_BASE,
            unified_size: defaults::UNIFIED_SIZE,
            fill_word: defaults::FILL_WORD,
        }
    }
}

/// Bus peer timing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BusConfig {
    /// Cycles between the peer seeing a request and registering `ack`/`err` (minimum 1).
    #[serde(default = "BusConfig::default_ack_latency")]
    pub ack_latency: u32,
}

impl BusConfig {
    const fn default_ack_latency() -> u32 {
        defaults::ACK_LATENCY
    }
}

impl Default for BusConfig {
    fn default() -> Self {
        Self { ack_latency: defaults::ACK_LATENCY }
    }
}
