//! Device trait for cycle-stepped peripherals.
//!
//! This module defines the narrow `CycleDevice` capability the enclosing simulator
//! drives. It provides:
//! 1. **Identification:** `name` for logs and register routing.
//! 2. **Clocking:** `tick`, called once per simulated cycle, returning the CPU hold signal.
//! 3. **Registers:** Byte-wide reads and writes at device-relative offsets.
//!
//! Bus decoding, address windows and scheduling stay with the caller.

/// Peripheral advanced once per simulated clock tick.
pub trait CycleDevice: Send + Sync {
    /// Returns a short name for this device (e.g., `"CACHE"`).
    fn name(&self) -> &str;

    /// Advances device state by one cycle; returns `true` while the CPU must stall.
    fn tick(&mut self) -> bool;

    /// Reads the register at the given device-relative offset.
    fn read_reg(&self, offset: u64) -> u8;

    /// Writes the register at the given device-relative offset.
    fn write_reg(&mut self, offset: u64, val: u8);
}
