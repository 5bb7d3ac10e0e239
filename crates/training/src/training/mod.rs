//! EM training infrastructure for IBM Model 1.
//!
//! This module provides expected-count accumulation and the trainer that
//! drives initialization and EM iterations over a bitext.

pub mod counter;
pub mod trainer;

pub use counter::{ExpectedCounts, PairKey, RowNorms};
pub use trainer::{IterationReport, Trainer, TrainingConfig};
