//! High-level IBM Model 1 API.
//!
//! `Model1` ties a bitext, a trainer and a decoder together behind one type.
//! It is built with `Model1Builder`:
//!
//! ```no_run
//! use lexalign_aligner::Model1;
//!
//! let mut model = Model1::builder()
//!     .source_path("corpus.fr")
//!     .target_path("corpus.en")
//!     .lowercase(true)
//!     .build()?;
//! model.iterate(5)?;
//! # Ok::<(), lexalign_aligner::AlignError>(())
//! ```

use crate::decode::{CorpusAlignments, Decoder, PairAlignment};
use crate::io::ModelSaver;
use crate::normalize::{NormalizationForm, NormalizedSource, Normalizer};
use lexalign_core::{
    AlignError, Bitext, FileSource, LengthPolicy, LineSource, Lexicon, MemorySource, Result, Token,
};
use lexalign_training::{IterationReport, Trainer, TrainingConfig};
use std::fmt;
use std::path::{Path, PathBuf};

/// Configuration for building a model.
#[derive(Debug, Clone, Default)]
pub struct ModelConfig {
    /// EM training options
    pub training: TrainingConfig,
    /// What to do when the two sides differ in length
    pub length_policy: LengthPolicy,
    /// Applied to every line of both sides
    pub normalizer: Normalizer,
}

/// Where one side of the bitext comes from.
#[derive(Debug, Clone)]
enum Side {
    Path(PathBuf),
    Text(String),
}

impl Side {
    fn into_source(self, normalizer: Normalizer) -> Box<dyn LineSource> {
        let source: Box<dyn LineSource> = match self {
            Side::Path(path) => Box::new(FileSource::new(path)),
            Side::Text(text) => Box::new(MemorySource::new(text)),
        };
        if normalizer.is_enabled() {
            Box::new(NormalizedSource::new(source, normalizer))
        } else {
            source
        }
    }
}

/// Builder for creating a model.
#[derive(Debug, Clone, Default)]
pub struct Model1Builder {
    config: ModelConfig,
    form: NormalizationForm,
    lowercase: bool,
    source: Option<Side>,
    target: Option<Side>,
}

impl Model1Builder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the source side from a file.
    pub fn source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(Side::Path(path.into()));
        self
    }

    /// Read the target side from a file.
    pub fn target_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = Some(Side::Path(path.into()));
        self
    }

    /// Use in-memory text as the source side.
    pub fn source_text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(Side::Text(text.into()));
        self
    }

    /// Use in-memory text as the target side.
    pub fn target_text(mut self, text: impl Into<String>) -> Self {
        self.target = Some(Side::Text(text.into()));
        self
    }

    /// Set the length policy.
    pub fn length_policy(mut self, policy: LengthPolicy) -> Self {
        self.config.length_policy = policy;
        self
    }

    /// Count expectations in parallel (default) or sequentially.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.training.parallel = parallel;
        self
    }

    /// Set the number of pairs read per batch.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.config.training.chunk_size = chunk_size;
        self
    }

    /// Compute the corpus log-likelihood after every iteration.
    pub fn track_likelihood(mut self, track: bool) -> Self {
        self.config.training.track_likelihood = track;
        self
    }

    /// Set the Unicode normalization form.
    pub fn normalization(mut self, form: NormalizationForm) -> Self {
        self.form = form;
        self
    }

    /// Lowercase every line before splitting.
    pub fn lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Build the model. Reads the bitext once to initialize the table.
    pub fn build(mut self) -> Result<Model1> {
        self.config.normalizer = Normalizer::new(self.form, self.lowercase);

        let source = self
            .source
            .ok_or_else(|| AlignError::InvalidConfig("no source side given".to_string()))?;
        let target = self
            .target
            .ok_or_else(|| AlignError::InvalidConfig("no target side given".to_string()))?;

        Model1::new(source, target, self.config)
    }
}

/// IBM Model 1 word aligner.
#[derive(Debug)]
pub struct Model1 {
    trainer: Trainer,
}

impl Model1 {
    /// Start building a model.
    pub fn builder() -> Model1Builder {
        Model1Builder::new()
    }

    fn new(source: Side, target: Side, config: ModelConfig) -> Result<Self> {
        let bitext = Bitext::new(
            source.into_source(config.normalizer),
            target.into_source(config.normalizer),
        )
        .with_policy(config.length_policy);

        let trainer = Trainer::new(bitext, config.training)?;
        Ok(Self { trainer })
    }

    /// Create a model over two files with default settings.
    pub fn from_paths(source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<Self> {
        Self::builder()
            .source_path(source.as_ref())
            .target_path(target.as_ref())
            .build()
    }

    /// Perform `n` EM iterations.
    pub fn iterate(&mut self, n: usize) -> Result<()> {
        self.trainer.iterate(n)
    }

    /// Perform `n` EM iterations, reporting after each one.
    pub fn iterate_with<F>(&mut self, n: usize, observer: F) -> Result<()>
    where
        F: FnMut(&IterationReport),
    {
        self.trainer.iterate_with(n, observer)
    }

    /// `P(target | source)`.
    pub fn probability(&self, source: &Token, target: &Token) -> f64 {
        self.trainer.probability(source, target)
    }

    /// Number of completed EM iterations.
    pub fn iterations(&self) -> usize {
        self.trainer.iterations()
    }

    pub fn lexicon(&self) -> &Lexicon {
        self.trainer.lexicon()
    }

    pub fn trainer(&self) -> &Trainer {
        &self.trainer
    }

    /// A decoder over the current table.
    pub fn decoder(&self) -> Decoder<'_> {
        Decoder::new(self.trainer.lexicon())
    }

    /// Align two whitespace-tokenized lines.
    pub fn decode_lines(&self, source: &str, target: &str) -> PairAlignment<'_> {
        self.decoder().decode_lines(source, target)
    }

    /// Align every pair of the training bitext.
    pub fn decode_training(&self) -> Result<CorpusAlignments<'_, '_>> {
        self.decoder().decode_corpus(self.trainer.bitext())
    }

    /// Corpus log-likelihood under the current table.
    pub fn log_likelihood(&self) -> Result<f64> {
        self.trainer.log_likelihood()
    }

    /// Save the table to `dir/model.json`.
    pub fn save(&self, dir: &Path) -> Result<()> {
        ModelSaver::new(self.trainer.lexicon(), self.trainer.iterations()).save(dir)
    }
}

impl fmt::Display for Model1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (source, target) = self.trainer.bitext().describe();
        write!(f, "Model1({}, {})", source, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::{format_links, ModelLoader};

    const HANSARD_FR: &str = "le gouvernement a dit
le gouvernement est prêt
la chambre et le gouvernement
le ministre a dit
la chambre est prête
le gouvernement
le ministre et la chambre
nous avons dit";

    const HANSARD_EN: &str = "the government said
the government is ready
the house and the government
the minister said
the house is ready
the government
the minister and the house
we said";

    fn hansard() -> Model1 {
        Model1::builder()
            .source_text(HANSARD_FR)
            .target_text(HANSARD_EN)
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_both_sides() {
        let err = Model1::builder().source_text("a").build().unwrap_err();
        assert!(matches!(err, AlignError::InvalidConfig(_)));

        let err = Model1::builder().target_text("a").build().unwrap_err();
        assert!(matches!(err, AlignError::InvalidConfig(_)));
    }

    #[test]
    fn test_builder_rejects_zero_chunk() {
        let err = Model1::builder()
            .source_text("a")
            .target_text("b")
            .chunk_size(0)
            .build()
            .unwrap_err();
        assert!(matches!(err, AlignError::InvalidConfig(_)));
    }

    #[test]
    fn test_decode_after_training() {
        let mut model = hansard();
        model.iterate(5).unwrap();
        assert_eq!(model.iterations(), 5);

        let alignment: Vec<_> = model
            .decode_lines("la chambre et le gouvernement", "the house and the government")
            .collect();
        let positions: Vec<Option<usize>> = alignment.iter().map(|a| a.target_position()).collect();
        // le ties between both occurrences of "the"; the first one wins
        assert_eq!(
            positions,
            vec![Some(0), Some(2), Some(2), Some(3), Some(1), Some(5)]
        );
        assert_eq!(
            alignment[5].target().unwrap(),
            &Token::word("government")
        );

        let links = format_links(
            model.decode_lines("la chambre et le gouvernement", "the house and the government"),
        );
        assert_eq!(links, "0-1 1-1 2-2 3-0 4-4");
    }

    #[test]
    fn test_decode_training_covers_corpus() {
        let mut model = hansard();
        model.iterate(3).unwrap();

        let sentences: Vec<Vec<_>> = model
            .decode_training()
            .unwrap()
            .map(|pair| pair.unwrap().collect())
            .collect();
        assert_eq!(sentences.len(), 8);
        assert_eq!(sentences[7].len(), 4);
        assert_eq!(sentences[7][1].target().unwrap(), &Token::word("we"));
    }

    #[test]
    fn test_lowercase_merges_case() {
        let model = Model1::builder()
            .source_text("La maison\nla maison")
            .target_text("The house\nthe house")
            .lowercase(true)
            .build()
            .unwrap();

        assert_eq!(model.lexicon().vocab.len(), 4);
        assert!(model.probability(&Token::word("la"), &Token::word("the")) > 0.0);
        assert_eq!(model.probability(&Token::word("La"), &Token::word("the")), 0.0);
    }

    #[test]
    fn test_truncate_policy() {
        let mut model = Model1::builder()
            .source_text("a\nb\nc")
            .target_text("x")
            .length_policy(LengthPolicy::Truncate)
            .build()
            .unwrap();
        model.iterate(1).unwrap();
        assert_eq!(model.probability(&Token::word("b"), &Token::word("x")), 0.0);
        assert!(model.probability(&Token::word("a"), &Token::word("x")) > 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let mut model = hansard();
        model.iterate(2).unwrap();

        let dir = tempfile::tempdir().unwrap();
        model.save(dir.path()).unwrap();

        let saved = ModelLoader::load(dir.path()).unwrap();
        assert_eq!(saved.iterations, 2);
        for (s, t) in [("gouvernement", "government"), ("le", "the"), ("dit", "said")] {
            let (s, t) = (Token::word(s), Token::word(t));
            assert_eq!(saved.lexicon.probability(&s, &t), model.probability(&s, &t));
        }
        assert_eq!(
            saved.lexicon.probability(&Token::Null, &Token::word("the")),
            model.probability(&Token::Null, &Token::word("the"))
        );
    }

    #[test]
    fn test_display_names_sources() {
        let model = Model1::builder()
            .source_text("a")
            .target_text("b")
            .build()
            .unwrap();
        assert!(model.to_string().starts_with("Model1("));
    }
}
