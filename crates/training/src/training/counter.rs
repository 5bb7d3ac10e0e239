//! Expected-count accumulation for the E-step.
//!
//! Counting only reads the current table, so sentence pairs can be counted
//! independently: each rayon worker folds pairs into a private
//! `ExpectedCounts`, and the partial counts are merged in a single reduction.

use ahash::AHashMap;
use lexalign_core::{EncodedPair, TTable, TokenId};

/// A `(source, target)` key.
pub type PairKey = (TokenId, TokenId);

/// Row sums of the table being trained, keyed by source token.
pub type RowNorms = AHashMap<TokenId, f64>;

/// Expected co-occurrence counts gathered during one E-step.
#[derive(Debug, Clone, Default)]
pub struct ExpectedCounts {
    /// (source, target) -> expected count
    pair_counts: AHashMap<PairKey, f64>,
    /// target -> expected marginal count
    target_counts: AHashMap<TokenId, f64>,
}

impl ExpectedCounts {
    /// Create empty accumulators.
    pub fn new() -> Self {
        Self {
            pair_counts: AHashMap::new(),
            target_counts: AHashMap::new(),
        }
    }

    /// Add the expected counts of one sentence pair.
    ///
    /// `norms` must hold the full row sum of every row in `table`. Source
    /// tokens whose row is missing or sums to 0 contribute nothing.
    pub fn observe(&mut self, pair: &EncodedPair, table: &TTable, norms: &RowNorms) {
        for &sw in &pair.source {
            let z = norms.get(&sw).copied().unwrap_or(0.0);
            if z <= 0.0 {
                continue;
            }

            for &tw in &pair.target {
                let c = table.get(sw, tw) / z;
                if c == 0.0 {
                    continue;
                }
                *self.pair_counts.entry((sw, tw)).or_insert(0.0) += c;
                *self.target_counts.entry(tw).or_insert(0.0) += c;
            }
        }
    }

    /// Fold another set of counts into this one.
    pub fn merge(&mut self, other: ExpectedCounts) {
        for (key, count) in other.pair_counts {
            *self.pair_counts.entry(key).or_insert(0.0) += count;
        }
        for (tw, count) in other.target_counts {
            *self.target_counts.entry(tw).or_insert(0.0) += count;
        }
    }

    /// Count a batch of pairs in parallel.
    pub fn count_parallel(pairs: &[EncodedPair], table: &TTable, norms: &RowNorms) -> Self {
        use rayon::prelude::*;

        pairs
            .par_iter()
            .fold(ExpectedCounts::new, |mut acc, pair| {
                acc.observe(pair, table, norms);
                acc
            })
            .reduce(ExpectedCounts::new, |mut acc, partial| {
                acc.merge(partial);
                acc
            })
    }

    /// Count a batch of pairs sequentially (for debugging or single-threaded use).
    pub fn count_sequential(pairs: &[EncodedPair], table: &TTable, norms: &RowNorms) -> Self {
        let mut counts = ExpectedCounts::new();
        for pair in pairs {
            counts.observe(pair, table, norms);
        }
        counts
    }

    /// Expected count of `(source, target)`.
    pub fn pair_count(&self, source: TokenId, target: TokenId) -> f64 {
        self.pair_counts.get(&(source, target)).copied().unwrap_or(0.0)
    }

    /// Expected marginal count of `target`.
    pub fn target_count(&self, target: TokenId) -> f64 {
        self.target_counts.get(&target).copied().unwrap_or(0.0)
    }

    /// Iterate over all `(source, target)` counts.
    pub fn pairs(&self) -> impl Iterator<Item = (PairKey, f64)> + '_ {
        self.pair_counts.iter().map(|(&key, &count)| (key, count))
    }

    /// Number of distinct `(source, target)` keys.
    pub fn len(&self) -> usize {
        self.pair_counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pair_counts.is_empty()
    }
}
