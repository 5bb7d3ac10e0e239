//! Sentence-aligned parallel text.
//!
//! Line `i` of the source side is paired with line `i` of the target side.
//! Pairs are produced lazily and never cached: every call to `Bitext::pairs`
//! re-opens both sides and starts again from the first line.

use super::source::{FileSource, LineSource, Lines, MemorySource};
use crate::core::{Token, TokenId};
use crate::error::{AlignError, Result};
use std::path::PathBuf;

/// What to do when the two sides have a different number of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthPolicy {
    /// Report `AlignError::StreamLengthMismatch`.
    #[default]
    Strict,
    /// Stop at the end of the shorter side.
    Truncate,
}

/// A source/target sentence pair. Both sides begin with `Token::Null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentencePair {
    source: Vec<Token>,
    target: Vec<Token>,
}

impl SentencePair {
    /// Build a pair from word lists, prefixing each side with NULL.
    pub fn new<S, T>(source: S, target: T) -> Self
    where
        S: IntoIterator<Item = Token>,
        T: IntoIterator<Item = Token>,
    {
        Self {
            source: std::iter::once(Token::Null).chain(source).collect(),
            target: std::iter::once(Token::Null).chain(target).collect(),
        }
    }

    /// Split two lines on whitespace. No other normalization is applied.
    pub fn from_lines(source: &str, target: &str) -> Self {
        Self::new(
            source.split_whitespace().map(Token::word),
            target.split_whitespace().map(Token::word),
        )
    }

    /// Source tokens, NULL first.
    #[inline]
    pub fn source(&self) -> &[Token] {
        &self.source
    }

    /// Target tokens, NULL first.
    #[inline]
    pub fn target(&self) -> &[Token] {
        &self.target
    }

    pub fn into_parts(self) -> (Vec<Token>, Vec<Token>) {
        (self.source, self.target)
    }
}

/// A sentence pair as interned ids, NULL (id 0) first on both sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPair {
    pub source: Vec<TokenId>,
    pub target: Vec<TokenId>,
}

/// Two line sources read in lockstep.
pub struct Bitext {
    source: Box<dyn LineSource>,
    target: Box<dyn LineSource>,
    policy: LengthPolicy,
}

impl Bitext {
    /// Create a bitext over two sources with the strict length policy.
    pub fn new(source: impl LineSource + 'static, target: impl LineSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            target: Box::new(target),
            policy: LengthPolicy::default(),
        }
    }

    /// Create a bitext over two files.
    pub fn from_paths(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self::new(FileSource::new(source), FileSource::new(target))
    }

    /// Create a bitext over two in-memory texts.
    pub fn from_texts(source: &str, target: &str) -> Self {
        Self::new(MemorySource::new(source), MemorySource::new(target))
    }

    /// Set the length policy.
    pub fn with_policy(mut self, policy: LengthPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LengthPolicy {
        self.policy
    }

    /// Names of the two sides, for logs.
    pub fn describe(&self) -> (String, String) {
        (self.source.describe(), self.target.describe())
    }

    /// Start a new pass over the sentence pairs.
    pub fn pairs(&self) -> Result<SentencePairs<'_>> {
        Ok(SentencePairs {
            source: self.source.open()?,
            target: self.target.open()?,
            source_name: self.source.describe(),
            target_name: self.target.describe(),
            policy: self.policy,
            line: 0,
            done: false,
        })
    }
}

impl std::fmt::Debug for Bitext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitext")
            .field("source", &self.source.describe())
            .field("target", &self.target.describe())
            .field("policy", &self.policy)
            .finish()
    }
}

/// One pass over a bitext.
pub struct SentencePairs<'a> {
    source: Lines<'a>,
    target: Lines<'a>,
    source_name: String,
    target_name: String,
    policy: LengthPolicy,
    line: usize,
    done: bool,
}

impl SentencePairs<'_> {
    /// Number of pairs produced so far.
    pub fn line(&self) -> usize {
        self.line
    }

    fn read_error(&mut self, stream: String, err: std::io::Error) -> Option<Result<SentencePair>> {
        self.done = true;
        Some(Err(AlignError::Read { stream, err }))
    }

    /// Handle one side ending before the other.
    fn mismatch(&mut self, source_ended: bool) -> Option<Result<SentencePair>> {
        self.done = true;
        match self.policy {
            LengthPolicy::Truncate => {
                tracing::warn!(
                    pairs = self.line,
                    source = %self.source_name,
                    target = %self.target_name,
                    "bitext sides differ in length, truncating to the shorter side"
                );
                None
            }
            LengthPolicy::Strict => {
                // One line of the longer side has already been consumed.
                let (source_lines, target_lines) = if source_ended {
                    (self.line, self.line + 1 + self.target.by_ref().count())
                } else {
                    (self.line + 1 + self.source.by_ref().count(), self.line)
                };
                Some(Err(AlignError::StreamLengthMismatch {
                    source_lines,
                    target_lines,
                }))
            }
        }
    }
}

impl Iterator for SentencePairs<'_> {
    type Item = Result<SentencePair>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match (self.source.next(), self.target.next()) {
            (None, None) => {
                self.done = true;
                None
            }
            (Some(Err(err)), _) => {
                let stream = self.source_name.clone();
                self.read_error(stream, err)
            }
            (_, Some(Err(err))) => {
                let stream = self.target_name.clone();
                self.read_error(stream, err)
            }
            (None, Some(Ok(_))) => self.mismatch(true),
            (Some(Ok(_)), None) => self.mismatch(false),
            (Some(Ok(source)), Some(Ok(target))) => {
                self.line += 1;
                Some(Ok(SentencePair::from_lines(&source, &target)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(bitext: &Bitext) -> Vec<Result<SentencePair>> {
        bitext.pairs().unwrap().collect()
    }

    #[test]
    fn test_pairs_are_null_prefixed() {
        let bitext = Bitext::from_texts("la maison\nla fleur", "the house\nthe flower");
        let pairs: Vec<SentencePair> = collect(&bitext).into_iter().map(|p| p.unwrap()).collect();

        assert_eq!(pairs.len(), 2);
        assert_eq!(
            pairs[0].source(),
            &[Token::Null, Token::word("la"), Token::word("maison")]
        );
        assert_eq!(
            pairs[1].target(),
            &[Token::Null, Token::word("the"), Token::word("flower")]
        );
    }

    #[test]
    fn test_blank_line_is_null_only() {
        let bitext = Bitext::from_texts("\nun", "   \none");
        let pairs: Vec<SentencePair> = collect(&bitext).into_iter().map(|p| p.unwrap()).collect();
        assert_eq!(pairs[0].source(), &[Token::Null]);
        assert_eq!(pairs[0].target(), &[Token::Null]);
        assert_eq!(pairs[1].source().len(), 2);
    }

    #[test]
    fn test_truncate_to_shorter_source() {
        let bitext = Bitext::from_texts("a\nb\nc", "1\n2\n3\n4\n5").with_policy(LengthPolicy::Truncate);
        let pairs: Vec<SentencePair> = collect(&bitext).into_iter().map(|p| p.unwrap()).collect();

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[2].source()[1], Token::word("c"));
        assert_eq!(pairs[2].target()[1], Token::word("3"));
    }

    #[test]
    fn test_truncate_to_shorter_target() {
        let bitext = Bitext::from_texts("a\nb\nc\nd\ne", "1\n2\n3").with_policy(LengthPolicy::Truncate);
        let pairs = collect(&bitext);
        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|p| p.is_ok()));
    }

    #[test]
    fn test_strict_reports_line_totals() {
        let bitext = Bitext::from_texts("a\nb\nc", "1\n2\n3\n4\n5");
        let results = collect(&bitext);

        assert_eq!(results.len(), 4);
        assert!(results[..3].iter().all(|p| p.is_ok()));
        match &results[3] {
            Err(AlignError::StreamLengthMismatch {
                source_lines,
                target_lines,
            }) => {
                assert_eq!(*source_lines, 3);
                assert_eq!(*target_lines, 5);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let reversed = Bitext::from_texts("a\nb\nc\nd", "1\n2");
        let results = collect(&reversed);
        assert!(matches!(
            results.last(),
            Some(Err(AlignError::StreamLengthMismatch {
                source_lines: 4,
                target_lines: 2
            }))
        ));
    }

    #[test]
    fn test_pairs_restart_from_the_beginning() {
        let bitext = Bitext::from_texts("a\nb", "x\ny");
        let first: Vec<_> = collect(&bitext).into_iter().map(|p| p.unwrap()).collect();
        let second: Vec<_> = collect(&bitext).into_iter().map(|p| p.unwrap()).collect();
        assert_eq!(first, second);
    }
}
