//! Core alignment model data structures.
//!
//! This module contains tokens, the word vocabulary and the sparse
//! translation table shared by training and decoding.

pub mod lexicon;
pub mod token;
pub mod ttable;
pub mod vocab;

pub use lexicon::Lexicon;
pub use token::{Token, TokenId, NULL_TOKEN};
pub use ttable::{Row, TTable};
pub use vocab::{Vocab, VocabR, Vocabulary};
