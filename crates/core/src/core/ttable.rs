//! Lexical translation table.
//!
//! `TTable[s][t]` holds `P(t | s)`. Reads never insert: a missing row or cell
//! reads as 0. Writes go through `entry`/`set`/`accumulate`, which create the
//! row and cell on demand.

use super::token::TokenId;
use ahash::AHashMap;

/// One row of the table: target token -> probability (or raw count).
pub type Row = AHashMap<TokenId, f64>;

/// Sparse conditional probability table keyed by source token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TTable {
    rows: AHashMap<TokenId, Row>,
}

impl TTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rows: AHashMap::new(),
        }
    }

    /// Get `TTable[s][t]`, or 0 if either token was never recorded.
    #[inline]
    pub fn get(&self, source: TokenId, target: TokenId) -> f64 {
        self.rows
            .get(&source)
            .and_then(|row| row.get(&target))
            .copied()
            .unwrap_or(0.0)
    }

    /// Mutable access to a cell, creating the row and cell (at 0) if absent.
    #[inline]
    pub fn entry(&mut self, source: TokenId, target: TokenId) -> &mut f64 {
        self.rows
            .entry(source)
            .or_default()
            .entry(target)
            .or_insert(0.0)
    }

    /// Overwrite a cell.
    #[inline]
    pub fn set(&mut self, source: TokenId, target: TokenId, value: f64) {
        *self.entry(source, target) = value;
    }

    /// Add `weight` to the raw co-occurrence count of `(source, target)`.
    #[inline]
    pub fn accumulate(&mut self, source: TokenId, target: TokenId, weight: f64) {
        *self.entry(source, target) += weight;
    }

    /// Rescale every row so it sums to 1.
    ///
    /// Rows whose sum is 0 are left untouched.
    pub fn normalize_rows(&mut self) {
        for row in self.rows.values_mut() {
            let z: f64 = row.values().sum();
            if z > 0.0 {
                for value in row.values_mut() {
                    *value /= z;
                }
            }
        }
    }

    /// Get a row.
    #[inline]
    pub fn row(&self, source: TokenId) -> Option<&Row> {
        self.rows.get(&source)
    }

    /// Sum of a row, 0 if the row does not exist.
    pub fn row_sum(&self, source: TokenId) -> f64 {
        self.rows
            .get(&source)
            .map(|row| row.values().sum())
            .unwrap_or(0.0)
    }

    /// Sums of all rows, computed in a single pass.
    pub fn row_sums(&self) -> AHashMap<TokenId, f64> {
        self.rows
            .iter()
            .map(|(&source, row)| (source, row.values().sum()))
            .collect()
    }

    /// Iterate over all rows.
    pub fn rows(&self) -> impl Iterator<Item = (TokenId, &Row)> {
        self.rows.iter().map(|(&source, row)| (source, row))
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of stored cells.
    pub fn num_entries(&self) -> usize {
        self.rows.values().map(|row| row.len()).sum()
    }
}
