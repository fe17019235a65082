//! Trace-driven simulation.
//!
//! Provides a minimal cycle-stepped scheduler around the cache controller and
//! the trace format it replays.

/// Cycle-stepped scheduler owning the controller and its collaborators.
pub mod simulator;

/// Trace events and parsing.
pub mod trace;

pub use simulator::{RunSummary, Simulator};
pub use trace::{TraceEvent, parse_trace};
