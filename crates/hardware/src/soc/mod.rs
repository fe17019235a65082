//! System-on-Chip (SoC) Components.
//!
//! This module organizes the cache's view of the surrounding system: the
//! simulated clock and interrupt controller it collaborates with, the device
//! trait the scheduler drives, and the cache controller device itself.

/// Simulated time source.
pub mod clock;

/// Cycle-stepped device implementations.
pub mod devices;

/// Interrupt controller interface.
pub mod interrupt;

/// Device trait definitions.
pub mod traits;

pub use clock::{ManualClock, SimClock, SimTime};
pub use devices::{CacheController, OpState};
pub use interrupt::{IrqLatch, IrqSystem};
pub use traits::CycleDevice;
