//! Core-side components.
//!
//! This module contains the functional units attached to the processor core
//! whose timing the model accounts for.

/// Core-attached units (cache).
pub mod units;
