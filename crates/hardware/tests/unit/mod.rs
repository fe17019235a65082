//! # Unit Components
//!
//! Organizes the unit tests by component: configuration, the cache model,
//! the controller and its collaborators, statistics and the trace simulator.

/// Geometry validation, defaults and JSON deserialization.
pub mod config;
