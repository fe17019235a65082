//! Cache statistics collection and reporting.
//!
//! This module tracks the cache's performance counters. It provides:
//! 1. **Counters:** Accesses, misses, evictions, write-backs, unaligned accesses and clears.
//! 2. **Report:** Derived usage and hit-ratio figures with a textual summary.
//!
//! Counters only ever increase; they are reset solely by a full re-initialization
//! of the cache model.

use std::fmt;

use serde::Serialize;

/// Raw cache counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Set lookups. A line-straddling access counts twice.
    pub accesses: u64,
    /// Set lookups that missed.
    pub misses: u64,
    /// Entries replaced to make room for a new tag.
    pub evictions: u64,
    /// Dirty victims written back (write-back mode only).
    pub writebacks: u64,
    /// Accesses that crossed a line boundary.
    pub unaligned: u64,
    /// Explicit clears.
    pub clears: u64,
}

/// Derived statistics snapshot.
///
/// `Display` renders the same summary that `print` writes to stdout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CacheReport {
    /// Capacity in lines.
    pub total_lines: usize,
    /// Occupied lines at snapshot time.
    pub lines_used: usize,
    /// `lines_used / total_lines` in percent.
    pub usage_pct: f64,
    /// `1 - misses / accesses` in percent; 0 before the first access.
    pub hit_ratio_pct: f64,
    /// Raw counters.
    #[serde(flatten)]
    pub stats: CacheStats,
}

impl CacheReport {
    /// Derives a report from occupancy and counters.
    pub fn new(total_lines: usize, lines_used: usize, stats: CacheStats) -> Self {
        let usage_pct = if total_lines == 0 {
            0.0
        } else {
            100.0 * lines_used as f64 / total_lines as f64
        };
        let hit_ratio_pct = if stats.accesses == 0 {
            0.0
        } else {
            100.0 - 100.0 * stats.misses as f64 / stats.accesses as f64
        };
        Self {
            total_lines,
            lines_used,
            usage_pct,
            hit_ratio_pct,
            stats,
        }
    }

    /// Prints the summary to stdout.
    pub fn print(&self) {
        println!("{self}");
    }
}

impl fmt::Display for CacheReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CACHE statistics:")?;
        writeln!(f, "  usage%:     {:.2}", self.usage_pct)?;
        writeln!(f, "  accesses:   {}", self.stats.accesses)?;
        writeln!(f, "  misses:     {}", self.stats.misses)?;
        writeln!(f, "  hit ratio%: {:.2}", self.hit_ratio_pct)?;
        writeln!(f, "  evictions:  {}", self.stats.evictions)?;
        writeln!(f, "  writeback:  {}", self.stats.writebacks)?;
        writeln!(f, "  unaligned:  {}", self.stats.unaligned)?;
        write!(f, "  clears:     {}", self.stats.clears)
    }
}
