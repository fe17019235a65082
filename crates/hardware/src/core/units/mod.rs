//! Core-attached functional units.
//!
//! This module contains the cache timing model the controller wraps.

/// Set-associative LRU cache model.
pub mod cache;

pub use cache::{CacheModel, WritePolicy};
