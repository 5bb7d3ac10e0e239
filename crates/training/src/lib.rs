//! Lexalign-training - IBM Model 1 EM training
//!
//! This crate estimates a lexical translation table from a sentence-aligned
//! bitext with Expectation-Maximization.
//!
//! # Features
//!
//! - Streaming passes over the bitext, bounded by a configurable chunk size
//! - Parallel E-step: per-worker partial counts merged in one reduction
//! - Per-iteration reports and optional log-likelihood tracking
//!
//! # Example
//!
//! ```rust
//! use lexalign_core::{Bitext, Token};
//! use lexalign_training::{Trainer, TrainingConfig};
//!
//! let bitext = Bitext::from_texts("la maison\nla fleur", "the house\nthe flower");
//! let mut trainer = Trainer::new(bitext, TrainingConfig::default())?;
//! trainer.iterate(5)?;
//!
//! let p = trainer.probability(&Token::word("maison"), &Token::word("house"));
//! assert!(p > 0.0);
//! # Ok::<(), lexalign_core::AlignError>(())
//! ```

pub use lexalign_core::{AlignError, Result};

// Training infrastructure
pub mod training;
pub use training::{ExpectedCounts, IterationReport, Trainer, TrainingConfig};
