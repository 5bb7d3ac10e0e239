//! Viterbi decoding of IBM Model 1 alignments.
//!
//! Under Model 1 each source token is aligned independently, so the best
//! alignment links every source token to its most probable target token.
//! Alignments are produced lazily, one source token at a time.

use lexalign_core::{
    AlignError, Bitext, Lexicon, Result, SentencePair, SentencePairs, Token, TokenId,
};

/// The target side of one alignment link.
#[derive(Debug, Clone, PartialEq)]
pub enum Link {
    /// Linked to the target token at `position` (0 is NULL).
    Aligned {
        position: usize,
        target: Token,
        probability: f64,
    },
    /// No target token had a positive probability.
    Unaligned,
}

/// The alignment chosen for one source token.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Position in the source sentence (0 is NULL)
    pub source_position: usize,
    /// The source token
    pub source: Token,
    /// Chosen target
    pub link: Link,
}

impl Alignment {
    /// The chosen target token, or `AlignError::NoAlignment`.
    pub fn target(&self) -> Result<&Token> {
        match &self.link {
            Link::Aligned { target, .. } => Ok(target),
            Link::Unaligned => Err(AlignError::NoAlignment {
                token: self.source.to_string(),
            }),
        }
    }

    /// Source and target as words, `None` standing for NULL.
    ///
    /// Fails with `AlignError::NoAlignment` when the source token found no
    /// target, so an unaligned token is never confused with a NULL link.
    pub fn word_pair(&self) -> Result<(Option<&str>, Option<&str>)> {
        let target = self.target()?;
        Ok((self.source.as_word(), target.as_word()))
    }

    /// Position of the chosen target token, if any.
    pub fn target_position(&self) -> Option<usize> {
        match self.link {
            Link::Aligned { position, .. } => Some(position),
            Link::Unaligned => None,
        }
    }

    /// Check if this source token found a target.
    pub fn is_aligned(&self) -> bool {
        matches!(self.link, Link::Aligned { .. })
    }
}

/// Decoder over a trained lexicon. Read-only; cheap to copy.
#[derive(Debug, Clone, Copy)]
pub struct Decoder<'a> {
    lexicon: &'a Lexicon,
}

impl<'a> Decoder<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self { lexicon }
    }

    /// Lazily align each source token of `pair`, in source order.
    pub fn decode_pair(&self, pair: SentencePair) -> PairAlignment<'a> {
        let vocab = &self.lexicon.vocab;
        let source_ids = pair.source().iter().map(|t| vocab.token_id(t)).collect();
        let target_ids = pair.target().iter().map(|t| vocab.token_id(t)).collect();
        let (source, target) = pair.into_parts();

        PairAlignment {
            lexicon: self.lexicon,
            source,
            target,
            source_ids,
            target_ids,
            next: 0,
        }
    }

    /// Align two whitespace-tokenized lines.
    pub fn decode_lines(&self, source: &str, target: &str) -> PairAlignment<'a> {
        self.decode_pair(SentencePair::from_lines(source, target))
    }

    /// Lazily align every pair of `bitext`, reading it from the start.
    pub fn decode_corpus<'b>(&self, bitext: &'b Bitext) -> Result<CorpusAlignments<'a, 'b>> {
        Ok(CorpusAlignments {
            decoder: *self,
            pairs: bitext.pairs()?,
        })
    }
}

/// Alignment of one sentence pair. Single pass; not restartable.
pub struct PairAlignment<'a> {
    lexicon: &'a Lexicon,
    source: Vec<Token>,
    target: Vec<Token>,
    source_ids: Vec<Option<TokenId>>,
    target_ids: Vec<Option<TokenId>>,
    next: usize,
}

impl PairAlignment<'_> {
    /// Pick the first target position with the strictly highest probability.
    fn best_target(&self, source_id: Option<TokenId>) -> Option<(usize, f64)> {
        let sw = source_id?;
        let table = &self.lexicon.table;

        let mut best: Option<(usize, f64)> = None;
        for (position, tw) in self.target_ids.iter().enumerate() {
            let Some(tw) = *tw else { continue };
            let p = table.get(sw, tw);
            if p > best.map_or(0.0, |(_, bp)| bp) {
                best = Some((position, p));
            }
        }
        best
    }
}

impl Iterator for PairAlignment<'_> {
    type Item = Alignment;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.next;
        let source = self.source.get(position)?.clone();
        self.next += 1;

        let link = match self.best_target(self.source_ids[position]) {
            Some((target_position, probability)) => Link::Aligned {
                position: target_position,
                target: self.target[target_position].clone(),
                probability,
            },
            None => Link::Unaligned,
        };

        Some(Alignment {
            source_position: position,
            source,
            link,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.source.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PairAlignment<'_> {}

/// Alignments of a whole bitext, one `PairAlignment` per sentence pair.
pub struct CorpusAlignments<'a, 'b> {
    decoder: Decoder<'a>,
    pairs: SentencePairs<'b>,
}

impl<'a> Iterator for CorpusAlignments<'a, '_> {
    type Item = Result<PairAlignment<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.pairs
            .next()
            .map(|pair| pair.map(|pair| self.decoder.decode_pair(pair)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexalign_core::NULL_TOKEN;

    fn lexicon() -> Lexicon {
        let mut lexicon = Lexicon::new();
        let le = lexicon.vocab.intern("le");
        let chat = lexicon.vocab.intern("chat");
        let the = lexicon.vocab.intern("the");
        let cat = lexicon.vocab.intern("cat");
        let dog = lexicon.vocab.intern("dog");

        lexicon.table.set(NULL_TOKEN, NULL_TOKEN, 0.6);
        lexicon.table.set(NULL_TOKEN, the, 0.4);
        lexicon.table.set(le, the, 0.8);
        lexicon.table.set(le, NULL_TOKEN, 0.2);
        lexicon.table.set(chat, cat, 0.4);
        lexicon.table.set(chat, dog, 0.4);
        lexicon.table.set(chat, the, 0.2);
        lexicon
    }

    fn targets(alignment: PairAlignment<'_>) -> Vec<Option<usize>> {
        alignment.map(|a| a.target_position()).collect()
    }

    #[test]
    fn test_decode_pair_picks_most_probable() {
        let lexicon = lexicon();
        let decoder = Decoder::new(&lexicon);

        let alignment: Vec<Alignment> = decoder.decode_lines("le chat", "the cat").collect();
        assert_eq!(alignment.len(), 3);
        assert_eq!(alignment[0].source, Token::Null);
        assert_eq!(alignment[0].target().unwrap(), &Token::Null);
        assert_eq!(alignment[1].target().unwrap(), &Token::word("the"));
        assert_eq!(alignment[2].target().unwrap(), &Token::word("cat"));
        assert_eq!(alignment[2].source_position, 2);
    }

    #[test]
    fn test_ties_keep_earliest_target() {
        let lexicon = lexicon();
        let decoder = Decoder::new(&lexicon);

        // cat and dog are equally likely for chat
        assert_eq!(
            targets(decoder.decode_lines("chat", "dog cat")),
            vec![Some(0), Some(1)]
        );
        assert_eq!(
            targets(decoder.decode_lines("chat", "cat dog")),
            vec![Some(0), Some(1)]
        );
        // the same token twice: the first occurrence wins
        assert_eq!(
            targets(decoder.decode_lines("le", "the the")),
            vec![Some(0), Some(1)]
        );
    }

    #[test]
    fn test_decode_is_deterministic() {
        let lexicon = lexicon();
        let decoder = Decoder::new(&lexicon);
        let first: Vec<Alignment> = decoder.decode_lines("le chat", "the dog cat").collect();
        for _ in 0..5 {
            let again: Vec<Alignment> = decoder.decode_lines("le chat", "the dog cat").collect();
            assert_eq!(again, first);
        }
    }

    #[test]
    fn test_no_candidate_is_unaligned() {
        let lexicon = lexicon();
        let decoder = Decoder::new(&lexicon);

        let alignment: Vec<Alignment> = decoder.decode_lines("chat inconnu", "bird").collect();
        // chat has no mass on bird or NULL; inconnu was never seen
        assert_eq!(alignment[1].link, Link::Unaligned);
        assert_eq!(alignment[2].link, Link::Unaligned);
        assert!(matches!(
            alignment[2].target(),
            Err(AlignError::NoAlignment { token }) if token == "inconnu"
        ));
        // NULL still finds NULL
        assert!(alignment[0].is_aligned());
    }

    #[test]
    fn test_word_pair_separates_null_from_unaligned() {
        let lexicon = lexicon();
        let decoder = Decoder::new(&lexicon);

        let alignment: Vec<Alignment> = decoder.decode_lines("le chat", "bird").collect();
        // NULL -> NULL is a real link
        assert_eq!(alignment[0].word_pair().unwrap(), (None, None));
        // le only has mass on NULL among these targets
        assert_eq!(alignment[1].word_pair().unwrap(), (Some("le"), None));
        // chat has nothing
        assert!(matches!(
            alignment[2].word_pair(),
            Err(AlignError::NoAlignment { token }) if token == "chat"
        ));
    }

    #[test]
    fn test_empty_table_never_aligns() {
        let lexicon = Lexicon::new();
        let decoder = Decoder::new(&lexicon);
        let alignment: Vec<Alignment> = decoder.decode_lines("a b", "x").collect();
        assert_eq!(alignment.len(), 3);
        assert!(alignment.iter().all(|a| !a.is_aligned()));
    }

    #[test]
    fn test_decode_corpus_rereads() {
        let lexicon = lexicon();
        let decoder = Decoder::new(&lexicon);
        let bitext = Bitext::from_texts("le chat\nle", "the cat\nthe");

        for _ in 0..2 {
            let sentences: Vec<Vec<Alignment>> = decoder
                .decode_corpus(&bitext)
                .unwrap()
                .map(|pair| pair.unwrap().collect())
                .collect();
            assert_eq!(sentences.len(), 2);
            assert_eq!(sentences[1][1].target().unwrap(), &Token::word("the"));
        }
    }

    #[test]
    fn test_size_hint_counts_source_tokens() {
        let lexicon = lexicon();
        let decoder = Decoder::new(&lexicon);
        let mut alignment = decoder.decode_lines("le chat", "the cat");
        assert_eq!(alignment.len(), 3);
        alignment.next();
        assert_eq!(alignment.len(), 2);
    }
}
