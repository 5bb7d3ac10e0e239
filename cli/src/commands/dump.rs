//! Dump command implementation.

use clap::Parser;
use lexalign_aligner::io::DEFAULT_MIN_PROBABILITY;
use std::path::PathBuf;

/// Dump command arguments.
#[derive(Parser)]
pub struct DumpCommand {
    /// Directory of a saved model
    #[arg(short, long)]
    pub model: PathBuf,

    /// Smallest probability printed
    #[arg(long, default_value_t = DEFAULT_MIN_PROBABILITY)]
    pub min: f64,
}

use anyhow::Result as AnyhowResult;
use lexalign_aligner::io::{write_table, ModelLoader};
use std::io::{self, BufWriter};

pub fn run(cmd: DumpCommand) -> AnyhowResult<()> {
    let saved = ModelLoader::load(&cmd.model)?;
    tracing::debug!(
        iterations = saved.iterations,
        rows = saved.lexicon.table.len(),
        "model loaded"
    );

    let stdout = io::stdout();
    write_table(&saved.lexicon, cmd.min, BufWriter::new(stdout.lock()))?;
    Ok(())
}
