//! Interrupt controller seam.
//!
//! The cache only ever sets or acknowledges one vector; [`IrqSystem`] is the
//! slice of an interrupt controller it needs. [`IrqLatch`] is a minimal
//! implementation that records pending vectors, used by the simulator.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Interrupt flag set/clear by vector number.
pub trait IrqSystem: Send + Sync {
    /// Marks `vector` pending.
    fn set_irq_flag(&self, vector: u32);
    /// Acknowledges `vector`.
    fn clear_irq_flag(&self, vector: u32);
}

/// Pending-vector latch.
#[derive(Debug, Default)]
pub struct IrqLatch {
    pending: Mutex<BTreeSet<u32>>,
    raised: AtomicU64,
}

impl IrqLatch {
    /// Creates a latch with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `vector` is pending.
    pub fn is_pending(&self, vector: u32) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&vector)
    }

    /// Returns all pending vectors in ascending order.
    pub fn pending(&self) -> Vec<u32> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }

    /// Total number of `set_irq_flag` calls seen.
    pub fn raised_count(&self) -> u64 {
        self.raised.load(Ordering::Relaxed)
    }
}

impl IrqSystem for IrqLatch {
    fn set_irq_flag(&self, vector: u32) {
        let _ = self.raised.fetch_add(1, Ordering::Relaxed);
        let _ = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(vector);
    }

    fn clear_irq_flag(&self, vector: u32) {
        let _ = self
            .pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&vector);
    }
}
