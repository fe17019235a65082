//! Cycle-Stepped Devices.
//!
//! This module contains the peripherals the scheduler ticks every cycle.

/// Cache controller (control register state machine around the cache model).
pub mod cache_ctrl;

pub use cache_ctrl::{CacheController, OpState};

pub use crate::soc::traits::CycleDevice;
