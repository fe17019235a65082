//! Set-Associative LRU Cache Model.
//!
//! This module implements the timing model of a set-associative cache with
//! least-recently-used replacement. It tracks tags, dirty state and recency only;
//! data contents live in the enclosing simulator's memory model. Every access
//! returns the extra CPU cycles it costs:
//!
//! - hit: `hit_cycles`
//! - miss: `miss_cycles`, plus `writeback_cycles` if the LRU victim is dirty in write-back mode
//! - any write in write-through mode: `writethrough_cycles` on top
//!
//! An access whose byte range crosses a line boundary is charged as two lookups,
//! one per touched line.
//!
//! Every updating access, hit or miss, sets the line's dirty bit to
//! `is_write && write-back`; a read hit leaves the line clean.

mod set;

use tracing::{debug, info, trace};

use self::set::{Lookup, SetArena};
use crate::common::ConfigError;
use crate::config::{CacheConfig, CacheGeometry};
use crate::stats::{CacheReport, CacheStats};

/// How writes reach backing memory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WritePolicy {
    /// Every write is propagated immediately; lines never become dirty.
    WriteThrough,
    /// Writes mark the line dirty; dirty victims are written back on eviction.
    #[default]
    WriteBack,
}

/// Per-access cycle costs, copied out of the configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Latencies {
    hit: u64,
    miss: u64,
    writethrough: u64,
    writeback: u64,
}

/// LRU set-associative cache timing model.
///
/// The arena is sized once from the validated geometry; accesses never allocate.
#[derive(Debug)]
pub struct CacheModel {
    geometry: CacheGeometry,
    latencies: Latencies,
    policy: WritePolicy,
    arena: SetArena,
    stats: CacheStats,
}

impl CacheModel {
    /// Creates an empty, freshly initialized cache in write-back mode.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the geometry in `config` is invalid.
    pub fn new(config: &CacheConfig) -> Result<Self, ConfigError> {
        let geometry = config.validate()?;
        info!(
            lines = geometry.lines,
            line_bytes = geometry.line_bytes,
            offset_bits = geometry.offset_bits,
            ways = geometry.ways,
            sets = geometry.sets,
            backing_size = config.backing_size,
            "cache model configured, policy=LRU"
        );
        let mut model = Self {
            geometry,
            latencies: Latencies {
                hit: config.hit_cycles,
                miss: config.miss_cycles,
                writethrough: config.writethrough_cycles,
                writeback: config.writeback_cycles,
            },
            policy: WritePolicy::default(),
            arena: SetArena::new(geometry.sets, geometry.ways),
            stats: CacheStats::default(),
        };
        model.reinit();
        Ok(model)
    }

    /// Returns the validated geometry.
    pub const fn geometry(&self) -> CacheGeometry {
        self.geometry
    }

    /// Returns the write policy applied to subsequent accesses.
    pub const fn write_policy(&self) -> WritePolicy {
        self.policy
    }

    /// Selects the write policy for subsequent accesses. Existing dirty bits are kept.
    pub fn set_write_policy(&mut self, policy: WritePolicy) {
        if self.policy != policy {
            debug!(?policy, "cache write policy changed");
            self.policy = policy;
        }
    }

    /// Charges an access to `[addr, addr + len)` and returns its cycle cost.
    ///
    /// With `allow_update` false the cache answers from frozen contents: hits and
    /// misses are costed and counted, but recency, occupancy and dirty bits stay
    /// untouched.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the line size; the caller guarantees it never does.
    pub fn access(&mut self, addr: u64, len: usize, is_write: bool, allow_update: bool) -> u64 {
        let line_bytes = self.geometry.line_bytes;
        assert!(
            len <= line_bytes,
            "access of {len} bytes exceeds the {line_bytes}-byte cache line"
        );

        let block = addr >> self.geometry.offset_bits;
        let offset = (addr & (line_bytes as u64 - 1)) as usize;
        let mut cycles = self.access_set(block, is_write, allow_update);

        if offset + len > line_bytes {
            cycles += self.access_set(block.wrapping_add(1), is_write, allow_update);
            self.stats.unaligned += 1;
        }

        trace!(addr, len, is_write, allow_update, cycles, "cache access");
        cycles
    }

    fn set_of(&self, block: u64) -> usize {
        (block % self.geometry.sets as u64) as usize
    }

    fn access_set(&mut self, block: u64, is_write: bool, allow_update: bool) -> u64 {
        let set = self.set_of(block);
        let lookup = self.arena.lookup(set, block);

        let mut cycles = if lookup.found.is_some() {
            self.latencies.hit
        } else {
            self.stats.misses += 1;
            self.latencies.miss
        };
        if is_write && self.policy == WritePolicy::WriteThrough {
            cycles += self.latencies.writethrough;
        }
        if allow_update {
            cycles += self.update_set_lru(set, block, lookup, is_write);
        }

        self.stats.accesses += 1;
        cycles
    }

    /// Makes `tag` the youngest entry of `set`, loading it if absent.
    ///
    /// Returns the write-back cost of the victim, if one had to be evicted.
    fn update_set_lru(&mut self, set: usize, tag: u64, lookup: Lookup, is_write: bool) -> u64 {
        let marks_dirty = is_write && self.policy == WritePolicy::WriteBack;
        let mut cycles = 0;

        let idx = if let Some(idx) = lookup.found {
            self.arena.unlink(lookup.prev, idx);
            self.arena.entry_mut(idx).dirty = marks_dirty;
            idx
        } else {
            let idx = match self.arena.allocate(set) {
                Some(idx) => idx,
                None => {
                    let victim = lookup.last;
                    if self.policy == WritePolicy::WriteBack && self.arena.entry(victim).dirty {
                        cycles += self.latencies.writeback;
                        self.stats.writebacks += 1;
                    }
                    self.arena.unlink(lookup.prev, victim);
                    self.stats.evictions += 1;
                    victim
                }
            };
            let entry = self.arena.entry_mut(idx);
            entry.tag = tag;
            entry.dirty = marks_dirty;
            idx
        };

        self.arena.push_youngest(set, idx);
        cycles
    }

    /// Drops every line and counts one clear. Dirty lines are discarded without cost.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.stats.clears += 1;
        debug!(clears = self.stats.clears, "cache contents cleared");
    }

    /// Full re-initialization: zeroes the statistics, then clears.
    ///
    /// The clear is counted, so a freshly initialized cache reports one clear.
    pub fn reinit(&mut self) {
        self.stats = CacheStats::default();
        self.clear();
    }

    /// Returns `true` if the line holding `addr` is cached. No side effects.
    pub fn contains(&self, addr: u64) -> bool {
        let block = addr >> self.geometry.offset_bits;
        self.arena.lookup(self.set_of(block), block).found.is_some()
    }

    /// Returns the dirty bit of the line holding `addr`, or `None` if it is not cached.
    pub fn is_dirty(&self, addr: u64) -> Option<bool> {
        let block = addr >> self.geometry.offset_bits;
        self.arena
            .lookup(self.set_of(block), block)
            .found
            .map(|idx| self.arena.entry(idx).dirty)
    }

    /// Returns the set `addr` maps to.
    pub fn set_index(&self, addr: u64) -> usize {
        self.set_of(addr >> self.geometry.offset_bits)
    }

    /// Returns the occupied entries of `set`.
    pub fn set_occupancy(&self, set: usize) -> usize {
        self.arena.count(set)
    }

    /// Returns the block numbers cached in `set`, youngest first.
    pub fn set_tags(&self, set: usize) -> Vec<u64> {
        self.arena.iter_set(set).map(|entry| entry.tag).collect()
    }

    /// Returns the occupied entries across all sets.
    pub fn lines_used(&self) -> usize {
        self.arena.total_count()
    }

    /// Returns the raw counters.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Builds the derived statistics report.
    pub fn report(&self) -> CacheReport {
        CacheReport::new(self.geometry.lines, self.lines_used(), self.stats)
    }
}
