//! Cache Controller.
//!
//! Owns the [`CacheModel`] and the operating state machine driven by the cache
//! control register (CCR). Register writes enable, disable, lock and clear the
//! cache; the per-cycle `tick` counts down CPU hold cycles and finishes an
//! in-flight clear once the simulated clock reaches its deadline, raising the
//! configured interrupt if enabled.
//!
//! # Registers
//!
//! * `0x00`: CCR
//!   * `0x01`: Enable
//!   * `0x02`: Lock
//!   * `0x04`: Clear request (self-clearing)
//!   * `0x08`: Interrupt enable (masked out without an interrupt controller)
//!   * `0x10`: Write-back mode (clear selects write-through)
//!   * `0x20`: Reserved
//!
//! # States
//!
//! ```text
//! Disabled -> Enabled <-> Locked
//! Enabled | Locked -> Clearing -> Enabled
//! Enabled | Locked -> Disabled
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::common::ConfigError;
use crate::common::constants::{
    CCR_CLEAR, CCR_ENABLE, CCR_IRQ, CCR_LOCK, CCR_MODE_WRITEBACK, CCR_OFFSET, CCR_UNINITIALIZED,
    HOLD_CYCLES_CLEAR, HOLD_CYCLES_TRANSITION,
};
use crate::config::CacheConfig;
use crate::core::units::cache::{CacheModel, WritePolicy};
use crate::soc::clock::{SimClock, SimTime};
use crate::soc::interrupt::IrqSystem;
use crate::soc::traits::CycleDevice;
use crate::stats::CacheReport;

/// Operating state of the cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum OpState {
    /// Cache bypassed; accesses cost nothing extra and leave the model alone.
    Disabled,
    /// Normal operation.
    Enabled,
    /// Lookups answer from frozen contents.
    Locked,
    /// A clear is in flight; accesses are bypassed until the deadline passes.
    Clearing,
}

/// Control register state machine wrapped around the cache model.
pub struct CacheController {
    model: CacheModel,
    clock: Arc<dyn SimClock>,
    irq: Option<Arc<dyn IrqSystem>>,
    irq_vector: u32,
    ccr: u8,
    ccr_mask: u8,
    state: OpState,
    cpu_hold_cycles: u32,
    clear_done_time: SimTime,
    clear_time_writethrough: SimTime,
    clear_time_writeback: SimTime,
}

impl CacheController {
    /// Creates a controller in its reset state: enabled, write-back.
    ///
    /// # Arguments
    ///
    /// * `config` - Geometry, latencies, clear durations and interrupt vector.
    /// * `clock` - Simulated time source used to schedule clears.
    /// * `irq` - Interrupt controller; without one the CCR interrupt bit is never stored.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry in `config` is invalid.
    pub fn new(
        config: &CacheConfig,
        clock: Arc<dyn SimClock>,
        irq: Option<Arc<dyn IrqSystem>>,
    ) -> Result<Self, ConfigError> {
        let model = CacheModel::new(config)?;
        let ccr_mask = if irq.is_some() { 0xFF } else { !CCR_IRQ };
        let mut ctrl = Self {
            model,
            clock,
            irq,
            irq_vector: config.irq_vector,
            ccr: CCR_UNINITIALIZED,
            ccr_mask,
            state: OpState::Enabled,
            cpu_hold_cycles: 0,
            clear_done_time: 0,
            clear_time_writethrough: config.clear_time_writethrough_ns,
            clear_time_writeback: config.clear_time_writeback_ns,
        };
        ctrl.reset();
        Ok(ctrl)
    }

    /// Restores the default register and state values. Cached lines are kept.
    pub fn reset(&mut self) {
        self.cpu_hold_cycles = 0;
        self.ccr = (CCR_ENABLE | CCR_MODE_WRITEBACK) & self.ccr_mask;
        if self.irq.is_some() {
            self.ccr |= CCR_IRQ;
        }
        self.state = OpState::Enabled;
        self.model.set_write_policy(WritePolicy::WriteBack);
    }

    /// Returns the extra cycles an access to `[addr, addr + len)` costs.
    ///
    /// Zero unless the cache is enabled or locked.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the line size while the cache is active.
    pub fn access(&mut self, addr: u64, len: usize, is_write: bool) -> u64 {
        match self.state {
            OpState::Enabled => self.model.access(addr, len, is_write, true),
            OpState::Locked => self.model.access(addr, len, is_write, false),
            OpState::Disabled | OpState::Clearing => 0,
        }
    }

    /// Returns the visible control register.
    pub const fn ccr(&self) -> u8 {
        self.ccr
    }

    /// Handles a write to the control register.
    pub fn set_ccr(&mut self, value: u8) {
        self.ccr = value & self.ccr_mask;
        trace!(ccr = self.ccr, state = ?self.state, "CCR write");

        match self.state {
            OpState::Enabled | OpState::Locked => {
                if !self.ccr_has(CCR_ENABLE) {
                    self.transition(OpState::Disabled, HOLD_CYCLES_TRANSITION);
                    return;
                }
                if self.ccr_has(CCR_CLEAR) {
                    // Other bits in the same write are not acted on.
                    self.start_clear();
                    return;
                }
                if self.ccr_has(CCR_LOCK) {
                    if self.state == OpState::Enabled {
                        self.transition(OpState::Locked, HOLD_CYCLES_TRANSITION);
                    }
                } else if self.state == OpState::Locked {
                    self.transition(OpState::Enabled, HOLD_CYCLES_TRANSITION);
                }
                self.apply_mode();
            }
            OpState::Disabled => {
                if self.ccr_has(CCR_ENABLE) {
                    self.transition(OpState::Enabled, HOLD_CYCLES_TRANSITION);
                }
            }
            OpState::Clearing => self.apply_mode(),
        }
    }

    /// Advances one clock cycle. Returns `true` while the CPU must hold.
    pub fn cpu_cycle(&mut self) -> bool {
        if self.state == OpState::Clearing && self.clock.now() >= self.clear_done_time {
            self.state = OpState::Enabled;
            debug!(done_at = self.clear_done_time, "cache clear done");
            if let Some(irq) = &self.irq {
                if self.ccr_has(CCR_IRQ) {
                    irq.set_irq_flag(self.irq_vector);
                }
            }
        }

        if self.cpu_hold_cycles > 0 {
            self.cpu_hold_cycles -= 1;
            true
        } else {
            false
        }
    }

    /// Acknowledges the clear-done interrupt. Other vectors are ignored.
    pub fn clear_irq_flag(&self, vector: u32) {
        if vector != self.irq_vector {
            return;
        }
        if let Some(irq) = &self.irq {
            irq.clear_irq_flag(vector);
        }
    }

    /// Returns the operating state.
    pub const fn state(&self) -> OpState {
        self.state
    }

    /// Returns the write policy applied to accesses.
    pub const fn write_policy(&self) -> WritePolicy {
        self.model.write_policy()
    }

    /// Returns the remaining CPU hold cycles.
    pub const fn cpu_hold_cycles(&self) -> u32 {
        self.cpu_hold_cycles
    }

    /// Returns the deadline of the in-flight clear, if one is running.
    pub fn clear_done_time(&self) -> Option<SimTime> {
        (self.state == OpState::Clearing).then_some(self.clear_done_time)
    }

    /// Returns the configured interrupt vector.
    pub const fn irq_vector(&self) -> u32 {
        self.irq_vector
    }

    /// Returns the cache model.
    pub const fn model(&self) -> &CacheModel {
        &self.model
    }

    /// Builds the statistics report.
    pub fn report(&self) -> CacheReport {
        self.model.report()
    }

    /// Bit test on the masked register.
    const fn ccr_has(&self, bit: u8) -> bool {
        (self.ccr & bit) == bit
    }

    fn transition(&mut self, next: OpState, hold: u32) {
        debug!(from = ?self.state, to = ?next, "cache state change");
        self.state = next;
        self.cpu_hold_cycles = hold;
    }

    fn start_clear(&mut self) {
        let duration = match self.model.write_policy() {
            WritePolicy::WriteBack => self.clear_time_writeback,
            WritePolicy::WriteThrough => self.clear_time_writethrough,
        };
        self.clear_done_time = self.clock.now().saturating_add(duration);
        self.model.clear();
        self.transition(OpState::Clearing, HOLD_CYCLES_CLEAR);
        self.ccr &= !CCR_CLEAR;
        debug!(done_at = self.clear_done_time, "cache clear started");
    }

    fn apply_mode(&mut self) {
        let policy = if self.ccr_has(CCR_MODE_WRITEBACK) {
            WritePolicy::WriteBack
        } else {
            WritePolicy::WriteThrough
        };
        self.model.set_write_policy(policy);
    }
}

impl fmt::Debug for CacheController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheController")
            .field("model", &self.model)
            .field("irq_vector", &self.irq_vector)
            .field("has_irq", &self.irq.is_some())
            .field("ccr", &format_args!("{:#04x}", self.ccr))
            .field("state", &self.state)
            .field("cpu_hold_cycles", &self.cpu_hold_cycles)
            .field("clear_done_time", &self.clear_done_time)
            .finish_non_exhaustive()
    }
}

impl Drop for CacheController {
    fn drop(&mut self) {
        info!("{}", self.model.report());
    }
}

impl CycleDevice for CacheController {
    fn name(&self) -> &str {
        "CACHE"
    }

    fn tick(&mut self) -> bool {
        self.cpu_cycle()
    }

    fn read_reg(&self, offset: u64) -> u8 {
        if offset == CCR_OFFSET { self.ccr } else { 0 }
    }

    fn write_reg(&mut self, offset: u64, val: u8) {
        if offset == CCR_OFFSET {
            self.set_ccr(val);
        }
    }
}
