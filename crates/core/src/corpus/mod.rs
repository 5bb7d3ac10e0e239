//! Parallel corpus input.
//!
//! This module provides re-openable line sources and the sentence-pair
//! stream that feeds table initialization, every training pass and decoding.

pub mod bitext;
pub mod source;

pub use bitext::{Bitext, EncodedPair, LengthPolicy, SentencePair, SentencePairs};
pub use source::{FileSource, LineSource, Lines, MemorySource};
