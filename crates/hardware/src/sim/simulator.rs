//! Simulator: owns the cache controller and the collaborators it is wired to.
//!
//! Plays the part of the enclosing cycle-stepped simulator. Every consumed cycle
//! advances the shared clock by one period and ticks the controller once; while
//! the controller asserts hold, the next event is not issued.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::common::SimError;
use crate::config::SimConfig;
use crate::soc::clock::{ManualClock, SimClock, SimTime};
use crate::soc::devices::{CacheController, OpState};
use crate::soc::interrupt::{IrqLatch, IrqSystem};
use crate::sim::trace::TraceEvent;
use crate::stats::CacheReport;

/// Outcome of a trace run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    /// Clock ticks executed.
    pub cycles: u64,
    /// Ticks on which the controller held the CPU.
    pub stall_cycles: u64,
    /// Trace events executed.
    pub events: u64,
    /// Interrupts raised by the controller.
    pub irqs_raised: u64,
    /// Simulated time at the end of the run, in nanoseconds.
    pub sim_time_ns: SimTime,
    /// Controller state at the end of the run.
    pub state: OpState,
    /// Control register at the end of the run.
    pub ccr: u8,
    /// Cache statistics.
    pub cache: CacheReport,
}

/// Cycle-stepped scheduler around one cache controller.
#[derive(Debug)]
pub struct Simulator {
    ctrl: CacheController,
    clock: Arc<ManualClock>,
    irq: Option<Arc<IrqLatch>>,
    period: SimTime,
    line_bytes: usize,
    cycles: u64,
    stall_cycles: u64,
    events: u64,
}

impl Simulator {
    /// Builds the controller, a clock at time zero and, if configured, an interrupt latch.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Config`] if the cache geometry is invalid.
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        let clock = Arc::new(ManualClock::new());
        let irq = config.with_irq.then(|| Arc::new(IrqLatch::new()));
        let ctrl = CacheController::new(
            &config.cache,
            Arc::clone(&clock) as Arc<dyn SimClock>,
            irq.as_ref()
                .map(|latch| Arc::clone(latch) as Arc<dyn IrqSystem>),
        )?;
        Ok(Self {
            ctrl,
            clock,
            irq,
            period: config.cpu_period_ns.max(1),
            line_bytes: config.cache.line_bytes,
            cycles: 0,
            stall_cycles: 0,
            events: 0,
        })
    }

    /// Builds a simulator from a JSON [`SimConfig`] document.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Parse`] for malformed JSON and [`SimError::Config`]
    /// for an invalid geometry.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        Self::new(&config)
    }

    /// Returns the cache controller.
    pub const fn controller(&self) -> &CacheController {
        &self.ctrl
    }

    /// Returns the cache controller for direct register pokes.
    pub fn controller_mut(&mut self) -> &mut CacheController {
        &mut self.ctrl
    }

    /// Returns the simulated clock.
    pub fn clock(&self) -> &ManualClock {
        &self.clock
    }

    /// Returns the interrupt latch, if one is attached.
    pub fn irq(&self) -> Option<&IrqLatch> {
        self.irq.as_deref()
    }

    /// Advances one clock cycle. Returns the controller's hold signal.
    pub fn tick(&mut self) -> bool {
        let _ = self.clock.advance(self.period);
        self.cycles += 1;
        let hold = self.ctrl.cpu_cycle();
        if hold {
            self.stall_cycles += 1;
        }
        hold
    }

    fn spend(&mut self, cycles: u64) {
        for _ in 0..cycles {
            let _ = self.tick();
        }
    }

    /// Executes one trace event, first waiting out any CPU hold.
    ///
    /// An access costs one base cycle plus the cache's extra cycles; a register
    /// write or acknowledge costs one cycle.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::AccessTooWide`] if an access spans more than one line.
    pub fn step(&mut self, event: &TraceEvent) -> Result<(), SimError> {
        while self.ctrl.cpu_hold_cycles() > 0 {
            let _ = self.tick();
        }

        match *event {
            TraceEvent::Read { addr, len } | TraceEvent::Write { addr, len } => {
                if len > self.line_bytes {
                    return Err(SimError::AccessTooWide {
                        addr,
                        len,
                        line_bytes: self.line_bytes,
                    });
                }
                let is_write = matches!(event, TraceEvent::Write { .. });
                let extra = self.ctrl.access(addr, len, is_write);
                self.spend(1 + extra);
            }
            TraceEvent::Ccr { value } => {
                self.ctrl.set_ccr(value);
                self.spend(1);
            }
            TraceEvent::Ack { vector } => {
                self.ctrl.clear_irq_flag(vector);
                self.spend(1);
            }
            TraceEvent::Idle { cycles } => self.spend(cycles),
        }

        self.events += 1;
        Ok(())
    }

    /// Executes `events` in order and summarizes the run.
    ///
    /// # Errors
    ///
    /// Stops at the first event that fails; see [`Simulator::step`].
    pub fn run(&mut self, events: &[TraceEvent]) -> Result<RunSummary, SimError> {
        for event in events {
            self.step(event)?;
        }
        debug!(cycles = self.cycles, events = self.events, "trace finished");
        Ok(self.summary())
    }

    /// Summarizes the run so far.
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            cycles: self.cycles,
            stall_cycles: self.stall_cycles,
            events: self.events,
            irqs_raised: self.irq.as_ref().map_or(0, |latch| latch.raised_count()),
            sim_time_ns: self.clock.now(),
            state: self.ctrl.state(),
            ccr: self.ctrl.ccr(),
            cache: self.ctrl.report(),
        }
    }
}
