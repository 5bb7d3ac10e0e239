//! IBM Model 1 trainer implementation.
//!
//! This module implements the EM training loop for the lexical translation
//! table. The bitext is never cached: initialization and every iteration
//! re-read it from the start, in chunks of `chunk_size` pairs.

use super::counter::ExpectedCounts;
use lexalign_core::{
    AlignError, Bitext, EncodedPair, Lexicon, Result, TTable, Token, TokenId, Vocabulary,
};
use std::time::{Duration, Instant};

/// Configuration for EM training.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Whether to count expectations in parallel
    pub parallel: bool,
    /// Number of sentence pairs read before a batch is counted
    pub chunk_size: usize,
    /// Compute the corpus log-likelihood after every iteration
    pub track_likelihood: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            chunk_size: 4096,
            track_likelihood: false,
        }
    }
}

impl TrainingConfig {
    fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(AlignError::InvalidConfig(
                "chunk_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Summary of one completed EM iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationReport {
    /// Number of iterations completed so far, including this one
    pub iteration: usize,
    /// Sentence pairs read during the E-step
    pub pairs: usize,
    /// Wall time of the iteration
    pub elapsed: Duration,
    /// Corpus log-likelihood after the iteration, if tracked and readable
    pub log_likelihood: Option<f64>,
}

/// IBM Model 1 trainer.
///
/// Owns the bitext and the lexicon being estimated. Construction builds the
/// initial table from raw co-occurrence counts; `iterate` then refines it.
#[derive(Debug)]
pub struct Trainer {
    /// Configuration
    config: TrainingConfig,
    /// Training data, re-read on every pass
    bitext: Bitext,
    /// Vocabulary and t-table being trained
    lexicon: Lexicon,
    /// Number of completed EM iterations
    iterations: usize,
}

impl Trainer {
    /// Create a trainer and initialize its table from `bitext`.
    pub fn new(bitext: Bitext, config: TrainingConfig) -> Result<Self> {
        config.validate()?;

        let mut trainer = Self {
            config,
            bitext,
            lexicon: Lexicon::new(),
            iterations: 0,
        };
        trainer.initialize()?;

        Ok(trainer)
    }

    /// Create a trainer with default configuration.
    pub fn with_defaults(bitext: Bitext) -> Result<Self> {
        Self::new(bitext, TrainingConfig::default())
    }

    /// Build the initial table: every source token (NULL included) co-occurs
    /// once with every target token of its sentence, then rows are normalized.
    fn initialize(&mut self) -> Result<()> {
        let start = Instant::now();
        let Lexicon { vocab, table } = &mut self.lexicon;

        let pairs = for_each_chunk(&self.bitext, vocab, self.config.chunk_size, |chunk| {
            for pair in chunk {
                for &sw in &pair.source {
                    for &tw in &pair.target {
                        table.accumulate(sw, tw, 1.0);
                    }
                }
            }
        })?;
        table.normalize_rows();

        tracing::info!(
            pairs,
            words = vocab.len(),
            rows = table.len(),
            entries = table.num_entries(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "initialized translation table from co-occurrence counts"
        );

        Ok(())
    }

    /// Perform `n` EM iterations. `n == 0` leaves the table untouched.
    pub fn iterate(&mut self, n: usize) -> Result<()> {
        self.iterate_with(n, |_| {})
    }

    /// Perform `n` EM iterations, passing a report to `observer` after each one.
    pub fn iterate_with<F>(&mut self, n: usize, mut observer: F) -> Result<()>
    where
        F: FnMut(&IterationReport),
    {
        for _ in 0..n {
            let report = self.run_iteration()?;
            observer(&report);
        }
        Ok(())
    }

    /// One E-step, one M-step and re-normalization.
    ///
    /// If the E-step fails, its partial counts are dropped and the table is
    /// left as it was.
    fn run_iteration(&mut self) -> Result<IterationReport> {
        let start = Instant::now();
        tracing::debug!(iteration = self.iterations, "starting EM iteration");

        let (counts, pairs) = self.expectation()?;
        self.maximization(&counts);
        self.iterations += 1;

        // The step is committed; a failed likelihood pass only loses the value.
        let log_likelihood = if self.config.track_likelihood {
            match self.log_likelihood() {
                Ok(ll) => Some(ll),
                Err(err) => {
                    tracing::warn!(error = %err, "could not compute log-likelihood");
                    None
                }
            }
        } else {
            None
        };

        let report = IterationReport {
            iteration: self.iterations,
            pairs,
            elapsed: start.elapsed(),
            log_likelihood,
        };
        tracing::info!(
            iteration = report.iteration,
            pairs,
            keys = counts.len(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            log_likelihood = ?report.log_likelihood,
            "EM iteration complete"
        );

        Ok(report)
    }

    /// E-step: expected co-occurrence counts under the current table.
    fn expectation(&mut self) -> Result<(ExpectedCounts, usize)> {
        // Full row sums, taken once per pass. They are 1 after the previous
        // normalization, which keeps the inner loop at |S| x |T| per pair.
        let norms = self.lexicon.table.row_sums();
        let Lexicon { vocab, table } = &mut self.lexicon;
        let table: &TTable = table;
        let parallel = self.config.parallel;

        let mut counts = ExpectedCounts::new();
        let pairs = for_each_chunk(&self.bitext, vocab, self.config.chunk_size, |chunk| {
            if parallel {
                counts.merge(ExpectedCounts::count_parallel(chunk, table, &norms));
            } else {
                for pair in chunk {
                    counts.observe(pair, table, &norms);
                }
            }
        })?;

        Ok((counts, pairs))
    }

    /// M-step: re-estimate every observed cell, then restore row sums of 1.
    fn maximization(&mut self, counts: &ExpectedCounts) {
        let table = &mut self.lexicon.table;
        for ((sw, tw), count) in counts.pairs() {
            let marginal = counts.target_count(tw);
            if marginal > 0.0 {
                table.set(sw, tw, count / marginal);
            }
        }
        table.normalize_rows();
    }

    /// Corpus log-likelihood under the current table.
    ///
    /// Each non-NULL target token is scored as the mean of `P(t | s)` over
    /// all source positions, NULL included.
    pub fn log_likelihood(&self) -> Result<f64> {
        let vocab = &self.lexicon.vocab;
        let table = &self.lexicon.table;

        let mut total = 0.0;
        for pair in self.bitext.pairs()? {
            let pair = pair?;
            let source: Vec<Option<TokenId>> =
                pair.source().iter().map(|t| vocab.token_id(t)).collect();
            let len = source.len() as f64;

            for target in &pair.target()[1..] {
                let p: f64 = match vocab.token_id(target) {
                    Some(tw) => source.iter().flatten().map(|&sw| table.get(sw, tw)).sum(),
                    None => 0.0,
                };
                total += (p / len).ln();
            }
        }

        Ok(total)
    }

    /// `P(target | source)`, 0 for unseen tokens.
    pub fn probability(&self, source: &Token, target: &Token) -> f64 {
        self.lexicon.probability(source, target)
    }

    /// Number of completed EM iterations.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn table(&self) -> &TTable {
        &self.lexicon.table
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.lexicon.vocab
    }

    pub fn bitext(&self) -> &Bitext {
        &self.bitext
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Give up the training data and keep the trained lexicon.
    pub fn into_lexicon(self) -> Lexicon {
        self.lexicon
    }
}

/// Read one full pass of `bitext`, encoding pairs and handing them to `f`
/// in batches of at most `chunk_size`. Returns the number of pairs read.
fn for_each_chunk<F>(
    bitext: &Bitext,
    vocab: &mut Vocabulary,
    chunk_size: usize,
    mut f: F,
) -> Result<usize>
where
    F: FnMut(&[EncodedPair]),
{
    let mut chunk: Vec<EncodedPair> = Vec::with_capacity(chunk_size.min(4096));
    let mut total = 0;

    for pair in bitext.pairs()? {
        chunk.push(vocab.encode_pair(&pair?));
        if chunk.len() == chunk_size {
            f(&chunk);
            total += chunk.len();
            tracing::debug!(pairs = total, "counted chunk");
            chunk.clear();
        }
    }
    if !chunk.is_empty() {
        f(&chunk);
        total += chunk.len();
    }

    Ok(total)
}
