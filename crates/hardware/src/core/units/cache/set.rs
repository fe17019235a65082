//! Set storage for the LRU cache model.
//!
//! All entries live in one arena allocated at construction. Each set owns a
//! contiguous region of `ways + 1` slots: slot 0 is the set's sentinel, slots
//! `1..=ways` hold real entries. Entries are chained youngest to oldest through
//! `next` indices starting at the sentinel, so promoting an entry to youngest is
//! O(1) and finding the eviction victim is a scan of at most `ways` links.
//!
//! # Invariants
//!
//! - The chain behind a sentinel has exactly `count` entries and ends in `None`.
//! - `count <= ways`, and occupied slots are always `1..=count` of the region.
//! - No tag appears twice in one chain.

/// One cache line's bookkeeping. Data contents are not modeled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) struct CacheEntry {
    /// Block number (address shifted right by the offset width).
    pub tag: u64,
    /// Holds a write not yet reflected in backing memory.
    pub dirty: bool,
    /// Arena index of the next-older entry.
    pub next: Option<usize>,
}

/// Per-set header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CacheSet {
    /// Arena index of this set's sentinel.
    head: usize,
    /// Occupied real entries.
    count: usize,
}

/// Outcome of scanning one set for a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Lookup {
    /// Predecessor of `last` in the chain (the sentinel if `last` is the first entry).
    pub prev: usize,
    /// Index of the matching entry, if any. When set, it equals `last`.
    pub found: Option<usize>,
    /// Last entry examined. On a miss in a full set this is the oldest entry.
    pub last: usize,
}

/// Arena of entries plus the set headers indexing into it.
#[derive(Debug)]
pub(super) struct SetArena {
    entries: Vec<CacheEntry>,
    sets: Vec<CacheSet>,
    ways: usize,
}

impl SetArena {
    /// Allocates `sets * (ways + 1)` zeroed entries.
    pub fn new(sets: usize, ways: usize) -> Self {
        let stride = ways + 1;
        Self {
            entries: vec![CacheEntry::default(); sets * stride],
            sets: (0..sets)
                .map(|k| CacheSet {
                    head: k * stride,
                    count: 0,
                })
                .collect(),
            ways,
        }
    }

    pub fn entry(&self, idx: usize) -> &CacheEntry {
        &self.entries[idx]
    }

    pub fn entry_mut(&mut self, idx: usize) -> &mut CacheEntry {
        &mut self.entries[idx]
    }

    /// Occupied entries in `set`.
    pub fn count(&self, set: usize) -> usize {
        self.sets[set].count
    }

    /// Occupied entries across all sets.
    pub fn total_count(&self) -> usize {
        self.sets.iter().map(|s| s.count).sum()
    }

    /// Walks `set` youngest first, comparing at most `ways` tags.
    pub fn lookup(&self, set: usize, tag: u64) -> Lookup {
        let head = self.sets[set].head;
        let mut prev = head;
        let mut last = head;
        for _ in 0..self.ways {
            let Some(next) = self.entries[last].next else {
                break;
            };
            prev = last;
            last = next;
            if self.entries[last].tag == tag {
                return Lookup {
                    prev,
                    found: Some(last),
                    last,
                };
            }
        }
        Lookup {
            prev,
            found: None,
            last,
        }
    }

    /// Takes the next unused slot of `set`, or `None` if the set is full.
    pub fn allocate(&mut self, set: usize) -> Option<usize> {
        let header = &mut self.sets[set];
        if header.count == self.ways {
            return None;
        }
        header.count += 1;
        Some(header.head + header.count)
    }

    /// Removes `idx` from its chain. `prev` must be its predecessor.
    pub fn unlink(&mut self, prev: usize, idx: usize) {
        debug_assert_eq!(self.entries[prev].next, Some(idx));
        self.entries[prev].next = self.entries[idx].next;
    }

    /// Links an unlinked entry right behind the sentinel.
    pub fn push_youngest(&mut self, set: usize, idx: usize) {
        let head = self.sets[set].head;
        self.entries[idx].next = self.entries[head].next;
        self.entries[head].next = Some(idx);
    }

    /// Iterates the entries of `set` from youngest to oldest.
    pub fn iter_set(&self, set: usize) -> impl Iterator<Item = &CacheEntry> + '_ {
        let mut cursor = self.entries[self.sets[set].head].next;
        std::iter::from_fn(move || {
            let idx = cursor?;
            let entry = &self.entries[idx];
            cursor = entry.next;
            Some(entry)
        })
    }

    /// Empties every set and scrubs the arena.
    pub fn clear(&mut self) {
        for set in &mut self.sets {
            set.count = 0;
        }
        self.entries.fill(CacheEntry::default());
    }
}
