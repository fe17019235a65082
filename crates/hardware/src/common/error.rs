//! Error definitions.
//!
//! This module defines the error types surfaced by the cache model. It provides:
//! 1. **Configuration Errors:** Invalid cache geometry rejected at construction.
//! 2. **Simulation Errors:** Failures of the trace-driven simulator (bad geometry, bad trace,
//!    over-wide accesses).
//!
//! Steady-state conditions (full sets, straddling accesses, locked lookups) are not
//! errors and never appear here.

use thiserror::Error;

/// Invalid cache geometry.
///
/// A cache cannot operate with any of these geometries, so construction fails
/// instead of degrading to a different shape.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Line size must be a non-zero power of two.
    #[error("cache line size {0} is not a power of two")]
    LineSizeNotPowerOfTwo(usize),

    /// Total line count must be a non-zero power of two.
    #[error("cache line count {0} is not a power of two")]
    LineCountNotPowerOfTwo(usize),

    /// A set needs at least one way.
    #[error("cache associativity must be at least 1")]
    ZeroWays,

    /// Associativity must divide the line count evenly.
    #[error("associativity {ways} does not evenly divide {lines} lines")]
    WaysDoNotDivideLines {
        /// Total lines requested.
        lines: usize,
        /// Ways per set requested.
        ways: usize,
    },
}

/// Failure of a trace-driven simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The cache geometry was rejected.
    #[error("invalid cache configuration: {0}")]
    Config(#[from] ConfigError),

    /// A trace access is wider than one cache line.
    #[error("access of {len} bytes at {addr:#x} exceeds the {line_bytes}-byte cache line")]
    AccessTooWide {
        /// Start address of the access.
        addr: u64,
        /// Requested length in bytes.
        len: usize,
        /// Configured line size.
        line_bytes: usize,
    },

    /// The trace or configuration document could not be parsed.
    #[error("malformed input: {0}")]
    Parse(#[from] serde_json::Error),
}
