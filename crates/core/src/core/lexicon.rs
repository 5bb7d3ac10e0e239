//! A translation table together with the vocabulary that names its rows.

use super::token::{Token, NULL_TOKEN};
use super::ttable::TTable;
use super::vocab::Vocabulary;
use crate::corpus::{EncodedPair, SentencePair};

/// Vocabulary plus t-table: everything needed to query or decode a model.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub vocab: Vocabulary,
    pub table: TTable,
}

impl Lexicon {
    /// Create an empty lexicon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a lexicon from its parts.
    pub fn from_parts(vocab: Vocabulary, table: TTable) -> Self {
        Self { vocab, table }
    }

    /// `P(target | source)`, 0 if either token is unknown.
    pub fn probability(&self, source: &Token, target: &Token) -> f64 {
        match (self.vocab.token_id(source), self.vocab.token_id(target)) {
            (Some(s), Some(t)) => self.table.get(s, t),
            _ => 0.0,
        }
    }

    /// Distribution over inserted target tokens (the NULL row), most likely first.
    pub fn insertion_distribution(&self) -> Vec<(Token, f64)> {
        self.row(&Token::Null)
    }

    /// Probability that a target token is inserted, `1 - P(NULL | NULL)`.
    pub fn insertion_probability(&self) -> f64 {
        1.0 - self.table.get(NULL_TOKEN, NULL_TOKEN)
    }

    /// Probability that `source` is deleted, `P(NULL | source)`.
    pub fn deletion_probability(&self, source: &Token) -> f64 {
        self.probability(source, &Token::Null)
    }

    /// A source row as `(target, probability)` pairs, most likely first.
    ///
    /// Equal probabilities are ordered by token so the output is stable.
    pub fn row(&self, source: &Token) -> Vec<(Token, f64)> {
        let Some(row) = self.vocab.token_id(source).and_then(|s| self.table.row(s)) else {
            return Vec::new();
        };

        let mut entries: Vec<(Token, f64)> = row
            .iter()
            .filter_map(|(&t, &p)| self.vocab.token(t).map(|token| (token, p)))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        entries
    }

    /// All source tokens that have a row, sorted (NULL first).
    pub fn sources(&self) -> Vec<Token> {
        let mut sources: Vec<Token> = self
            .table
            .rows()
            .filter_map(|(s, _)| self.vocab.token(s))
            .collect();
        sources.sort();
        sources
    }

    /// Encode a sentence pair, interning any new words.
    pub fn encode_pair(&mut self, pair: &SentencePair) -> EncodedPair {
        self.vocab.encode_pair(pair)
    }
}
