//! Access trace format.
//!
//! A trace is a JSON array of events tagged by `op`:
//!
//! ```json
//! [
//!   { "op": "write", "addr": 4096, "len": 2 },
//!   { "op": "read",  "addr": 4096 },
//!   { "op": "ccr",   "value": 29 },
//!   { "op": "idle",  "cycles": 40000 },
//!   { "op": "ack",   "vector": 0 }
//! ]
//! ```
//!
//! `len` defaults to one byte.

use serde::Deserialize;

use crate::common::SimError;

/// One step of simulated instruction execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum TraceEvent {
    /// Data load.
    Read {
        /// Start address.
        addr: u64,
        /// Bytes read.
        #[serde(default = "default_len")]
        len: usize,
    },
    /// Data store.
    Write {
        /// Start address.
        addr: u64,
        /// Bytes written.
        #[serde(default = "default_len")]
        len: usize,
    },
    /// Write to the cache control register.
    Ccr {
        /// Raw register value.
        value: u8,
    },
    /// Interrupt acknowledge.
    Ack {
        /// Vector being acknowledged.
        vector: u32,
    },
    /// Cycles without memory traffic.
    Idle {
        /// Cycles to spend.
        cycles: u64,
    },
}

const fn default_len() -> usize {
    1
}

/// Parses a JSON trace document.
///
/// # Errors
///
/// Returns [`SimError::Parse`] if the document is not a valid event array.
pub fn parse_trace(json: &str) -> Result<Vec<TraceEvent>, SimError> {
    Ok(serde_json::from_str(json)?)
}
