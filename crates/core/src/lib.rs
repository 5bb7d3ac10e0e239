//! Lexalign-core - Core IBM Model 1 data structures
//!
//! This crate provides the fundamental data structures for lexical word
//! alignment, independent of how a table is trained or decoded.
//!
//! # Features
//!
//! - Word interning using `AHashMap` and compact strings, with a reserved NULL id
//! - A sparse translation table with explicit read and insert-on-demand accessors
//! - Re-readable, line-aligned bitext streams with an explicit length policy
//! - Error handling with detailed diagnostics
//!
//! # Example
//!
//! ```rust
//! use lexalign_core::{Bitext, Lexicon};
//!
//! let bitext = Bitext::from_texts("la maison", "the house");
//! let mut lexicon = Lexicon::new();
//! for pair in bitext.pairs()? {
//!     let encoded = lexicon.encode_pair(&pair?);
//!     for &s in &encoded.source {
//!         for &t in &encoded.target {
//!             lexicon.table.accumulate(s, t, 1.0);
//!         }
//!     }
//! }
//! lexicon.table.normalize_rows();
//! # Ok::<(), lexalign_core::AlignError>(())
//! ```

pub mod error;
pub use error::{AlignError, Result};

// Model data structures
pub mod core;
pub use core::{Lexicon, Row, TTable, Token, TokenId, Vocabulary, NULL_TOKEN};

// Corpus input
pub mod corpus;
pub use corpus::{
    Bitext, EncodedPair, FileSource, LengthPolicy, LineSource, Lines, MemorySource, SentencePair,
    SentencePairs,
};
