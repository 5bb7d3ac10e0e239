//! Tokens and interned token ids.

use compact_str::CompactString;
use std::fmt;

/// Interned token identifier.
pub type TokenId = u32;

/// Id reserved for the NULL token.
pub const NULL_TOKEN: TokenId = 0;

/// A sentence token: either a word or the NULL token.
///
/// NULL stands for "no corresponding word": a source token aligned to NULL
/// is a deletion, a target token generated by NULL is an insertion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Token {
    /// Absence of an aligned word
    Null,
    /// An opaque word string
    Word(CompactString),
}

impl Token {
    /// Create a word token.
    pub fn word(word: &str) -> Self {
        Token::Word(CompactString::new(word))
    }

    /// Check if this is the NULL token.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Token::Null)
    }

    /// Get the word string, or `None` for NULL.
    #[inline]
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Token::Null => None,
            Token::Word(w) => Some(w.as_str()),
        }
    }
}

impl From<Option<&str>> for Token {
    fn from(word: Option<&str>) -> Self {
        word.map_or(Token::Null, Token::word)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Null => f.write_str("NULL"),
            Token::Word(w) => f.write_str(w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_sorts_first() {
        let mut tokens = vec![Token::word("b"), Token::Null, Token::word("a")];
        tokens.sort();
        assert_eq!(tokens, vec![Token::Null, Token::word("a"), Token::word("b")]);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Token::from(None), Token::Null);
        assert_eq!(Token::from(Some("maison")).as_word(), Some("maison"));
        assert_eq!(Token::Null.to_string(), "NULL");
    }
}
