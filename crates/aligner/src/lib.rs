//! lexalign-aligner - High-level IBM Model 1 API
//!
//! This crate puts the bitext stream, the EM trainer and the Viterbi decoder
//! behind a single `Model1` type, and adds the pieces around them: line
//! normalization, model persistence, table dumps and Moses-style output.
//!
//! # Example
//!
//! ```rust
//! use lexalign_aligner::{Model1, Token};
//!
//! let mut model = Model1::builder()
//!     .source_text("la maison\nla maison bleue\nla fleur")
//!     .target_text("the house\nthe blue house\nthe flower")
//!     .build()?;
//! model.iterate(5)?;
//!
//! let p = model.probability(&Token::word("maison"), &Token::word("house"));
//! assert!(p > 0.5);
//!
//! for alignment in model.decode_lines("la maison", "the house") {
//!     println!("{} -> {:?}", alignment.source, alignment.target_position());
//! }
//! # Ok::<(), lexalign_aligner::AlignError>(())
//! ```

// Re-export core types
pub use lexalign_core::{
    AlignError, Bitext, FileSource, LengthPolicy, Lexicon, LineSource, MemorySource, Result,
    SentencePair, Token, NULL_TOKEN,
};
pub use lexalign_training::{IterationReport, Trainer, TrainingConfig};

// Model API
pub mod model;
pub use model::{Model1, Model1Builder, ModelConfig};

// Decoding
pub mod decode;
pub use decode::{Alignment, CorpusAlignments, Decoder, Link, PairAlignment};

// IO/Serialization
pub mod io;
pub use io::{ModelLoader, ModelSaver, MosesWriter, SavedModel};

// Line normalization
pub mod normalize;
pub use normalize::{NormalizationForm, NormalizedSource, Normalizer};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
