//! Device trait for bus-attached peers.
//!
//! This module defines the `Device` trait implemented by every component the
//! interconnect can route to. It provides:
//! 1. **Identification:** `name` and `address_range` for bus routing.
//! 2. **Access:** Word read and byte-enabled word write at device-relative offsets.
//! 3. **Lifecycle:** Optional `tick` and interrupt-line reporting.
//! 4. **Loading:** Optional bulk byte loading used by the firmware loader.

/// Trait for memory-mapped devices attached to the system bus.
///
/// Offsets are byte offsets relative to the device base and are always
/// word-aligned by the interconnect; sub-word accesses use `sel`.
pub trait Device: Send {
    /// Returns a short name for this device (e.g., `"ROM"`, `"PERIPH"`).
    fn name(&self) -> &'static str;

    /// Returns `(base_address, size_in_bytes)` of the device window.
    fn address_range(&self) -> (u32, u32);

    /// Reads the word at the given word-aligned offset.
    fn read_word(&mut self, offset: u32) -> u32;

    /// Writes the lanes of `data` enabled by `sel` at the given word-aligned offset.
    fn write_word(&mut self, offset: u32, data: u32, sel: u8);

    /// Returns true when data-channel writes must be rejected with `err`.
    fn read_only(&self) -> bool {
        false
    }

    /// Advances device state by one cycle.
    fn tick(&mut self) {}

    /// Returns the interrupt lines this device currently drives.
    fn irq_lines(&self) -> u32 {
        0
    }

    /// Copies `data` into the device at `offset`, bypassing the bus.
    ///
    /// # Returns
    ///
    /// False if the device does not accept loads or the data does not fit.
    fn load(&mut self, offset: u32, data: &[u8]) -> bool {
        let _ = (offset, data);
        false
    }
}
