//! Cache timing model for an embedded processor core.
//!
//! This crate computes how many extra CPU cycles a memory access costs when it
//! goes through a set-associative cache, and when the cache's controller should
//! stall the CPU or raise an interrupt. It tracks tags, dirty bits and recency
//! only; data lives in the enclosing simulator's memory model.
//! 1. **Cache Model:** LRU set-associative lookup, eviction, write-back/write-through costing.
//! 2. **Controller:** Control-register state machine (enable, lock, clear, interrupt) on a cycle-stepped clock.
//! 3. **Collaborators:** Injectable simulated clock and interrupt controller seams.
//! 4. **Simulation:** Configuration, statistics and a trace-driven scheduler.

/// Common types and constants (control register bits, errors).
pub mod common;
/// Cache and simulator configuration (defaults, validation).
pub mod config;
/// Core-attached units (the cache model).
pub mod core;
/// Trace-driven scheduler and trace format.
pub mod sim;
/// Clock, interrupt and device seams plus the cache controller.
pub mod soc;
/// Cache statistics collection and reporting.
pub mod stats;

/// Cache configuration; use `CacheConfig::default()` or deserialize from JSON.
pub use crate::config::{CacheConfig, SimConfig};
/// The cache timing model.
pub use crate::core::units::cache::{CacheModel, WritePolicy};
/// Trace-driven scheduler.
pub use crate::sim::Simulator;
/// The control-register state machine owning a `CacheModel`.
pub use crate::soc::devices::{CacheController, OpState};
