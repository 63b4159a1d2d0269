use crate::core::models::compound::TokenCost;
use serde::Serialize;
use std::collections::HashSet;

/// A job that exceeded every tier, as listed in the overflow manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverflowEntry {
    pub name: String,
    pub token_size: TokenCost,
}

/// All mutable state of one run.
///
/// The set of seen canonical forms only ever grows, and per-tier counters only ever
/// increase. Two runs in the same process use two contexts and never interfere.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    seen: HashSet<Vec<String>>,
    tier_counters: Vec<usize>,
    overflow: Vec<OverflowEntry>,
}

impl RunContext {
    pub fn new(tier_count: usize) -> Self {
        Self {
            seen: HashSet::new(),
            tier_counters: vec![0; tier_count],
            overflow: Vec::new(),
        }
    }

    /// Records a canonical form; returns `false` if it had been seen before.
    pub(crate) fn admit(&mut self, canonical: Vec<String>) -> bool {
        self.seen.insert(canonical)
    }

    pub fn unique_combinations(&self) -> usize {
        self.seen.len()
    }

    /// Hands out the next sequential index of the tier at `position`.
    pub(crate) fn next_index(&mut self, position: usize) -> usize {
        if position >= self.tier_counters.len() {
            self.tier_counters.resize(position + 1, 0);
        }
        let index = self.tier_counters[position];
        self.tier_counters[position] += 1;
        index
    }

    pub(crate) fn record_overflow(&mut self, entry: OverflowEntry) {
        self.overflow.push(entry);
    }

    /// Jobs placed so far, per tier position.
    pub fn placed_counts(&self) -> &[usize] {
        &self.tier_counters
    }

    pub fn overflow(&self) -> &[OverflowEntry] {
        &self.overflow
    }
}
