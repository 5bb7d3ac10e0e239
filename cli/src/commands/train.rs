//! Train command implementation.

use clap::Parser;
use lexalign_aligner::io::{write_table, DEFAULT_MIN_PROBABILITY};
use std::path::PathBuf;

/// Train command arguments.
#[derive(Parser)]
pub struct TrainCommand {
    /// Source side of the corpus, one sentence per line
    #[arg(short, long)]
    pub source: PathBuf,

    /// Target side of the corpus, line-aligned with the source
    #[arg(short, long)]
    pub target: PathBuf,

    /// Number of EM iterations
    #[arg(short = 'n', long, default_value_t = 5)]
    pub iterations: usize,

    /// Stop at the end of the shorter side instead of failing
    #[arg(long)]
    pub truncate: bool,

    /// Count expectations on a single thread
    #[arg(long)]
    pub sequential: bool,

    /// Sentence pairs read per batch
    #[arg(long, default_value_t = 4096)]
    pub chunk_size: usize,

    /// Lowercase both sides before tokenizing
    #[arg(long)]
    pub lowercase: bool,

    /// Report the corpus log-likelihood after every iteration
    #[arg(long)]
    pub likelihood: bool,

    /// Directory to save the trained model to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the translation table when done
    #[arg(long)]
    pub dump: bool,

    /// Smallest probability printed by --dump
    #[arg(long, default_value_t = DEFAULT_MIN_PROBABILITY)]
    pub min: f64,
}

use anyhow::Result as AnyhowResult;
use std::io::{self, BufWriter};
use std::time::Instant;

pub fn run(cmd: TrainCommand) -> AnyhowResult<()> {
    let start = Instant::now();
    let mut model = super::model_builder(&cmd.source, &cmd.target, cmd.truncate, cmd.lowercase)
        .parallel(!cmd.sequential)
        .chunk_size(cmd.chunk_size)
        .track_likelihood(cmd.likelihood)
        .build()?;
    tracing::info!(
        model = %model,
        words = model.lexicon().vocab.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "model initialized"
    );

    let start = Instant::now();
    super::train(&mut model, cmd.iterations)?;
    tracing::info!(
        iterations = model.iterations(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "training completed"
    );

    if let Some(output) = &cmd.output {
        model.save(output)?;
    }

    if cmd.dump {
        let stdout = io::stdout();
        write_table(model.lexicon(), cmd.min, BufWriter::new(stdout.lock()))?;
    }

    Ok(())
}
