use std::collections::HashMap;
use std::fmt;

use crate::board::{BitBoard, Move};
use crate::search::hash::{self, TtKey, DEFAULT_BUCKETS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub value: f64,
    pub best: Option<Move>,
    pub depth: f64,
    pub alpha: f64,
    pub beta: f64,
    pub bound: Bound,
    /// Board ply at the node when the entry was written.
    pub ply: u32,
}

/// Outcome of consulting an entry at a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Probe {
    /// The entry settles the node.
    Cutoff { value: f64, best: Option<Move> },
    /// Keep searching with this (possibly narrowed) window.
    Window { alpha: f64, beta: f64 },
}

impl Entry {
    /// Bounds only ever narrow the caller's window; entries from shallower
    /// searches are ignored.
    pub fn probe(&self, depth: f64, mut alpha: f64, mut beta: f64) -> Probe {
        if self.depth < depth { return Probe::Window { alpha, beta }; }
        match self.bound {
            Bound::Exact => return Probe::Cutoff { value: self.value, best: self.best },
            Bound::Lower => alpha = alpha.max(self.value),
            Bound::Upper => beta = beta.min(self.value),
        }
        if alpha >= beta { Probe::Cutoff { value: self.value, best: self.best } } else { Probe::Window { alpha, beta } }
    }
}

/// Entries kept by eviction: `current + min_ahead <= ply <= current + max_ahead`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlyWindow {
    pub min_ahead: i64,
    pub max_ahead: Option<i64>,
}

impl PlyWindow {
    pub fn keeps(&self, entry_ply: u32, current_ply: u32) -> bool {
        let ahead = entry_ply as i64 - current_ply as i64;
        ahead >= self.min_ahead && self.max_ahead.map_or(true, |max| ahead <= max)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvictionStats {
    pub removed: usize,
    pub kept: usize,
    pub largest_bucket: usize,
}

impl fmt::Display for EvictionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} cleaned; {} left; {} in largest table", self.removed, self.kept, self.largest_bucket)
    }
}

/// Fixed set of independent hash maps. Stores overwrite whatever sits at the key.
pub struct Tt {
    buckets: Vec<HashMap<u64, Entry>>,
}

impl Default for Tt {
    fn default() -> Self { Self::new(DEFAULT_BUCKETS) }
}

impl Tt {
    pub fn new(buckets: usize) -> Self {
        Self { buckets: (0..buckets.max(1)).map(|_| HashMap::new()).collect() }
    }

    pub fn bucket_count(&self) -> usize { self.buckets.len() }

    pub fn key(&self, bits: &BitBoard) -> TtKey { hash::compute(bits, self.buckets.len()) }

    pub fn get(&self, key: TtKey) -> Option<Entry> { self.buckets[key.bucket].get(&key.key).copied() }

    pub fn put(&mut self, key: TtKey, e: Entry) { self.buckets[key.bucket].insert(key.key, e); }

    pub fn len(&self) -> usize { self.buckets.iter().map(HashMap::len).sum() }

    pub fn is_empty(&self) -> bool { self.buckets.iter().all(HashMap::is_empty) }

    pub fn clear(&mut self) {
        for b in &mut self.buckets { b.clear(); }
    }

    /// Drop entries stamped outside `window` relative to the current game ply.
    pub fn evict(&mut self, current_ply: u32, window: PlyWindow) -> EvictionStats {
        let mut stats = EvictionStats::default();
        for bucket in &mut self.buckets {
            stats.largest_bucket = stats.largest_bucket.max(bucket.len());
            let before = bucket.len();
            bucket.retain(|_, e| window.keeps(e.ply, current_ply));
            stats.removed += before - bucket.len();
            stats.kept += bucket.len();
        }
        stats
    }
}
