//! CLI commands for the lexalign aligner.

pub mod align;
pub mod dump;
pub mod train;

pub use align::AlignCommand;
pub use dump::DumpCommand;
pub use train::TrainCommand;

use indicatif::{ProgressBar, ProgressStyle};
use lexalign_aligner::{LengthPolicy, Model1, Model1Builder};
use std::path::Path;

/// Length policy selected by `--truncate`.
pub(crate) fn length_policy(truncate: bool) -> LengthPolicy {
    if truncate {
        LengthPolicy::Truncate
    } else {
        LengthPolicy::Strict
    }
}

/// Builder over two corpus files with the options shared by all commands.
pub(crate) fn model_builder(
    source: &Path,
    target: &Path,
    truncate: bool,
    lowercase: bool,
) -> Model1Builder {
    Model1::builder()
        .source_path(source)
        .target_path(target)
        .length_policy(length_policy(truncate))
        .lowercase(lowercase)
}

/// Progress bar over EM iterations.
pub(crate) fn iteration_bar(iterations: usize) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new(iterations as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} iterations {msg}")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Train `model` for `iterations` rounds behind a progress bar.
pub(crate) fn train(model: &mut Model1, iterations: usize) -> anyhow::Result<()> {
    let pb = iteration_bar(iterations)?;
    model.iterate_with(iterations, |report| {
        if let Some(ll) = report.log_likelihood {
            pb.set_message(format!("log-likelihood {:.4}", ll));
        }
        pb.inc(1);
    })?;
    pb.finish_with_message("done");
    Ok(())
}
