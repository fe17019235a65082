//! Common types shared by the cache model, its controller and the simulator.
//!
//! This module provides:
//! 1. **Constants:** Control register bits, register offsets and hold durations.
//! 2. **Error Handling:** Configuration and simulation error types.

/// Control register bits and other shared constants.
pub mod constants;

/// Error types.
pub mod error;

pub use error::{ConfigError, SimError};
