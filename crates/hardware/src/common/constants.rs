//! Global Constants.
//!
//! This module defines the constants shared by the cache model and its controller:
//! 1. **Control Register Bits:** Flags of the 8-bit cache control register (CCR).
//! 2. **Register Layout:** Offset of the controller's memory-mapped control register.
//! 3. **Hold Durations:** CPU stall lengths asserted on state transitions.

/// CCR value before the first reset has run.
pub const CCR_UNINITIALIZED: u8 = 0x00;

/// Cache enable.
pub const CCR_ENABLE: u8 = 0x01;

/// Lock the cache: contents are frozen, lookups still answer.
pub const CCR_LOCK: u8 = 0x02;

/// Clear request. Self-clearing once accepted.
pub const CCR_CLEAR: u8 = 0x04;

/// Raise an interrupt when an asynchronous clear completes.
pub const CCR_IRQ: u8 = 0x08;

/// Write policy select: set is write-back, clear is write-through.
pub const CCR_MODE_WRITEBACK: u8 = 0x10;

/// Offset of the control register inside the controller's register window.
pub const CCR_OFFSET: u64 = 0x00;

/// CPU hold asserted on enable, disable, lock and unlock.
pub const HOLD_CYCLES_TRANSITION: u32 = 1;

/// CPU hold asserted when a clear request is accepted.
pub const HOLD_CYCLES_CLEAR: u32 = 4;
