//! Configuration for the cache model and the trace-driven simulator.
//!
//! This module defines the configuration structures used to parameterize the model. It provides:
//! 1. **Defaults:** Baseline geometry, latencies and clear durations.
//! 2. **Structures:** `CacheConfig` for the cache itself and `SimConfig` for the simulator around it.
//! 3. **Validation:** `CacheConfig::validate` derives the fixed `CacheGeometry` or rejects the shape.
//!
//! Configuration is supplied as JSON, or use `Default::default()`.

use serde::Deserialize;

use crate::common::ConfigError;

/// Default configuration constants.
mod defaults {
    /// Total cache lines (across all sets).
    pub const LINES: usize = 64;

    /// Bytes per cache line.
    pub const LINE_BYTES: usize = 16;

    /// Ways per set.
    pub const WAYS: usize = 4;

    /// Bytes of backing memory fronted by the cache (64 KiB).
    pub const BACKING_SIZE: u64 = 64 * 1024;

    /// Interrupt vector raised when an asynchronous clear completes.
    pub const IRQ_VECTOR: u32 = 0;

    /// Extra cycles for a hit.
    pub const HIT_CYCLES: u64 = 0;

    /// Extra cycles for a miss.
    pub const MISS_CYCLES: u64 = 3;

    /// Surcharge for a write while in write-through mode.
    pub const WRITETHROUGH_CYCLES: u64 = 5;

    /// Cost of writing a dirty victim back while in write-back mode.
    pub const WRITEBACK_CYCLES: u64 = 5;

    /// Clear duration in write-through mode (1.5 ms): data is just dropped.
    pub const CLEAR_TIME_WRITETHROUGH_NS: u64 = 1_500_000;

    /// Clear duration in write-back mode (8.5 ms): dirty lines must reach backing memory.
    pub const CLEAR_TIME_WRITEBACK_NS: u64 = 8_500_000;

    /// Simulated clock period (4 MHz core).
    pub const CPU_PERIOD_NS: u64 = 250;
}

/// Cache geometry, latencies and clear timing.
///
/// # Examples
///
/// ```
/// use hwcache_core::config::CacheConfig;
///
/// let json = r#"{ "lines": 8, "line_bytes": 4, "ways": 2, "miss_cycles": 7 }"#;
/// let config: CacheConfig = serde_json::from_str(json).unwrap();
/// let geometry = config.validate().unwrap();
/// assert_eq!(geometry.sets, 4);
/// assert_eq!(geometry.offset_bits, 2);
/// assert_eq!(config.miss_cycles, 7);
/// assert_eq!(config.hit_cycles, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CacheConfig {
    /// Total entries across all sets. Must be a power of two.
    #[serde(default = "CacheConfig::default_lines")]
    pub lines: usize,

    /// Bytes per line. Must be a power of two.
    #[serde(default = "CacheConfig::default_line_bytes")]
    pub line_bytes: usize,

    /// Entries per set. Must evenly divide `lines`.
    #[serde(default = "CacheConfig::default_ways")]
    pub ways: usize,

    /// Bytes of backing memory the cache fronts.
    #[serde(default = "CacheConfig::default_backing_size")]
    pub backing_size: u64,

    /// Interrupt vector raised on clear completion.
    #[serde(default = "CacheConfig::default_irq_vector")]
    pub irq_vector: u32,

    /// Cycles added on a hit
    #[serde(default = "CacheConfig::default_hit_cycles")]
    pub hit_cycles: u64,

    /// Cycles added on a miss
    #[serde(default = "CacheConfig::default_miss_cycles")]
    pub miss_cycles: u64,

    /// Cycles added to every write in write-through mode
    #[serde(default = "CacheConfig::default_writethrough_cycles")]
    pub writethrough_cycles: u64,

    /// Cycles added when a dirty victim is written back
    #[serde(default = "CacheConfig::default_writeback_cycles")]
    pub writeback_cycles: u64,

    /// Simulated nanoseconds a clear takes in write-through mode
    #[serde(default = "CacheConfig::default_clear_time_writethrough_ns")]
    pub clear_time_writethrough_ns: u64,

    /// Simulated nanoseconds a clear takes in write-back mode
    #[serde(default = "CacheConfig::default_clear_time_writeback_ns")]
    pub clear_time_writeback_ns: u64,
}

impl CacheConfig {
    fn default_lines() -> usize {
        defaults::LINES
    }

    fn default_line_bytes() -> usize {
        defaults::LINE_BYTES
    }

    fn default_ways() -> usize {
        defaults::WAYS
    }

    fn default_backing_size() -> u64 {
        defaults::BACKING_SIZE
    }

    fn default_irq_vector() -> u32 {
        defaults::IRQ_VECTOR
    }

    fn default_hit_cycles() -> u64 {
        defaults::HIT_CYCLES
    }

    fn default_miss_cycles() -> u64 {
        defaults::MISS_CYCLES
    }

    fn default_writethrough_cycles() -> u64 {
        defaults::WRITETHROUGH_CYCLES
    }

    fn default_writeback_cycles() -> u64 {
        defaults::WRITEBACK_CYCLES
    }

    fn default_clear_time_writethrough_ns() -> u64 {
        defaults::CLEAR_TIME_WRITETHROUGH_NS
    }

    fn default_clear_time_writeback_ns() -> u64 {
        defaults::CLEAR_TIME_WRITEBACK_NS
    }

    /// Creates a configuration with the given geometry and default timing.
    pub fn with_geometry(lines: usize, line_bytes: usize, ways: usize) -> Self {
        Self {
            lines,
            line_bytes,
            ways,
            ..Self::default()
        }
    }

    /// Checks the geometry and derives set count and offset width.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the line size or line count is not a power
    /// of two, if `ways` is zero, or if `ways` does not divide `lines`.
    pub const fn validate(&self) -> Result<CacheGeometry, ConfigError> {
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::LineSizeNotPowerOfTwo(self.line_bytes));
        }
        if !self.lines.is_power_of_two() {
            return Err(ConfigError::LineCountNotPowerOfTwo(self.lines));
        }
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        if self.lines % self.ways != 0 {
            return Err(ConfigError::WaysDoNotDivideLines {
                lines: self.lines,
                ways: self.ways,
            });
        }
        Ok(CacheGeometry {
            lines: self.lines,
            line_bytes: self.line_bytes,
            ways: self.ways,
            sets: self.lines / self.ways,
            offset_bits: self.line_bytes.trailing_zeros(),
        })
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            lines: defaults::LINES,
            line_bytes: defaults::LINE_BYTES,
            ways: defaults::WAYS,
            backing_size: defaults::BACKING_SIZE,
            irq_vector: defaults::IRQ_VECTOR,
            hit_cycles: defaults::HIT_CYCLES,
            miss_cycles: defaults::MISS_CYCLES,
            writethrough_cycles: defaults::WRITETHROUGH_CYCLES,
            writeback_cycles: defaults::WRITEBACK_CYCLES,
            clear_time_writethrough_ns: defaults::CLEAR_TIME_WRITETHROUGH_NS,
            clear_time_writeback_ns: defaults::CLEAR_TIME_WRITEBACK_NS,
        }
    }
}

/// Validated, immutable cache shape.
///
/// Only [`CacheConfig::validate`] produces one, so `sets * ways == lines` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheGeometry {
    /// Total entries across all sets.
    pub lines: usize,
    /// Bytes per line.
    pub line_bytes: usize,
    /// Entries per set.
    pub ways: usize,
    /// Number of sets (`lines / ways`).
    pub sets: usize,
    /// `log2(line_bytes)`.
    pub offset_bits: u32,
}

/// Configuration of the trace-driven simulator around the cache.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimConfig {
    /// Cache under test.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Simulated nanoseconds per clock tick.
    #[serde(default = "SimConfig::default_cpu_period_ns")]
    pub cpu_period_ns: u64,

    /// Attach an interrupt collaborator to the controller.
    #[serde(default = "SimConfig::default_with_irq")]
    pub with_irq: bool,
}

impl SimConfig {
    fn default_cpu_period_ns() -> u64 {
        defaults::CPU_PERIOD_NS
    }

    const fn default_with_irq() -> bool {
        true
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            cpu_period_ns: defaults::CPU_PERIOD_NS,
            with_irq: true,
        }
    }
}
