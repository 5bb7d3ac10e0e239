//! Align command implementation.

use clap::Parser;
use std::path::PathBuf;

/// Align command arguments.
#[derive(Parser)]
pub struct AlignCommand {
    /// Source side of the corpus, one sentence per line
    #[arg(short, long)]
    pub source: PathBuf,

    /// Target side of the corpus, line-aligned with the source
    #[arg(short, long)]
    pub target: PathBuf,

    /// Decode with a saved model
    #[arg(short, long, required_unless_present = "iterations")]
    pub model: Option<PathBuf>,

    /// Train on the corpus for this many iterations, then decode it
    #[arg(short = 'n', long, conflicts_with = "model")]
    pub iterations: Option<usize>,

    /// Stop at the end of the shorter side instead of failing
    #[arg(long)]
    pub truncate: bool,

    /// Lowercase both sides before tokenizing
    #[arg(long)]
    pub lowercase: bool,

    /// Write alignments here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

use anyhow::Result as AnyhowResult;
use lexalign_aligner::{
    io::ModelLoader, Bitext, CorpusAlignments, Decoder, FileSource, MosesWriter,
    NormalizationForm, NormalizedSource, Normalizer,
};
use std::fs::File;
use std::io::{self, BufWriter, Write};

pub fn run(cmd: AlignCommand) -> AnyhowResult<()> {
    let writer: Box<dyn Write> = match &cmd.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let lines = match (&cmd.model, cmd.iterations) {
        (Some(dir), _) => {
            let saved = ModelLoader::load(dir)?;
            let normalizer = Normalizer::new(NormalizationForm::None, cmd.lowercase);
            let bitext = Bitext::new(
                NormalizedSource::new(FileSource::new(&cmd.source), normalizer),
                NormalizedSource::new(FileSource::new(&cmd.target), normalizer),
            )
            .with_policy(super::length_policy(cmd.truncate));
            let lines = write_moses(Decoder::new(&saved.lexicon).decode_corpus(&bitext)?, writer)?;
            lines
        }
        (None, iterations) => {
            let mut model =
                super::model_builder(&cmd.source, &cmd.target, cmd.truncate, cmd.lowercase)
                    .build()?;
            super::train(&mut model, iterations.unwrap_or_default())?;
            let lines = write_moses(model.decode_training()?, writer)?;
            lines
        }
    };

    tracing::info!(lines, "alignments written");
    Ok(())
}

fn write_moses<W: Write>(alignments: CorpusAlignments<'_, '_>, writer: W) -> AnyhowResult<usize> {
    let mut moses = MosesWriter::new(writer);
    for pair in alignments {
        moses.write_sentence(pair?)?;
    }
    let lines = moses.lines();
    moses.finish()?;
    Ok(lines)
}
