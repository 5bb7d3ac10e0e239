//! Word interning.
//!
//! This module maps word strings to compact `TokenId`s using AHashMap for fast
//! lookups and CompactString for memory-efficient storage. Id 0 is reserved
//! for the NULL token and never maps to a string.

use super::token::{Token, TokenId, NULL_TOKEN};
use crate::corpus::{EncodedPair, SentencePair};
use ahash::AHashMap;
use compact_str::CompactString;

/// Forward mapping: word string -> ID
pub type Vocab = AHashMap<CompactString, TokenId>;

/// Reverse mapping: ID -> word string
pub type VocabR = AHashMap<TokenId, CompactString>;

/// Vocabulary with forward and reverse mappings.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    /// Forward mapping: word string -> ID
    vocab: Vocab,
    /// Reverse mapping: ID -> word string
    vocab_r: VocabR,
}

impl Vocabulary {
    /// Create a new empty vocabulary.
    pub fn new() -> Self {
        Self {
            vocab: Vocab::new(),
            vocab_r: VocabR::new(),
        }
    }

    /// Create a new vocabulary with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            vocab: Vocab::with_capacity(capacity),
            vocab_r: VocabR::with_capacity(capacity),
        }
    }

    /// Intern a word, returning its ID.
    ///
    /// Words seen before keep their ID; new words get the next free one.
    pub fn intern(&mut self, word: &str) -> TokenId {
        if let Some(&id) = self.vocab.get(word) {
            return id;
        }

        let id = self.vocab.len() as TokenId + 1;
        let word = CompactString::new(word);
        self.vocab_r.insert(id, word.clone());
        self.vocab.insert(word, id);

        id
    }

    /// Intern a token. NULL always maps to `NULL_TOKEN`.
    pub fn intern_token(&mut self, token: &Token) -> TokenId {
        match token {
            Token::Null => NULL_TOKEN,
            Token::Word(w) => self.intern(w),
        }
    }

    /// Encode both sides of a sentence pair, interning any new words.
    pub fn encode_pair(&mut self, pair: &SentencePair) -> EncodedPair {
        EncodedPair {
            source: pair.source().iter().map(|t| self.intern_token(t)).collect(),
            target: pair.target().iter().map(|t| self.intern_token(t)).collect(),
        }
    }

    /// Get the ID for a word string.
    #[inline]
    pub fn get_id(&self, word: &str) -> Option<TokenId> {
        self.vocab.get(word).copied()
    }

    /// Get the word string for an ID.
    #[inline]
    pub fn get_word(&self, id: TokenId) -> Option<&str> {
        self.vocab_r.get(&id).map(|s| s.as_str())
    }

    /// Look up a token without interning it.
    pub fn token_id(&self, token: &Token) -> Option<TokenId> {
        match token {
            Token::Null => Some(NULL_TOKEN),
            Token::Word(w) => self.get_id(w),
        }
    }

    /// Resolve an ID back to a token.
    pub fn token(&self, id: TokenId) -> Option<Token> {
        if id == NULL_TOKEN {
            return Some(Token::Null);
        }
        self.vocab_r.get(&id).map(|w| Token::Word(w.clone()))
    }

    /// Number of distinct words (NULL excluded).
    #[inline]
    pub fn len(&self) -> usize {
        self.vocab.len()
    }

    /// Check if no word has been interned.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vocab.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_stable() {
        let mut vocab = Vocabulary::new();
        let a = vocab.intern("maison");
        let b = vocab.intern("bleue");
        assert_ne!(a, NULL_TOKEN);
        assert_ne!(a, b);
        assert_eq!(vocab.intern("maison"), a);
        assert_eq!(vocab.len(), 2);
    }

    #[test]
    fn test_null_roundtrip() {
        let mut vocab = Vocabulary::new();
        assert_eq!(vocab.intern_token(&Token::Null), NULL_TOKEN);
        assert_eq!(vocab.token(NULL_TOKEN), Some(Token::Null));
        assert_eq!(vocab.get_word(NULL_TOKEN), None);
        assert!(vocab.is_empty());
    }

    #[test]
    fn test_lookup_does_not_intern() {
        let vocab = Vocabulary::new();
        assert_eq!(vocab.token_id(&Token::word("unseen")), None);
        assert_eq!(vocab.token_id(&Token::Null), Some(NULL_TOKEN));
        assert_eq!(vocab.token(42), None);
    }
}
