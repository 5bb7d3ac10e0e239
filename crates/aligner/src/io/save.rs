//! Save functionality for trained models.

use super::format::{SerializedEntry, SerializedModel, SerializedRow, MODEL_FILE};
use lexalign_core::{AlignError, Lexicon, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Model saver - writes a trained lexicon to disk.
pub struct ModelSaver<'a> {
    /// Lexicon reference
    lexicon: &'a Lexicon,
    /// Completed EM iterations
    iterations: usize,
}

impl<'a> ModelSaver<'a> {
    /// Create a new model saver.
    pub fn new(lexicon: &'a Lexicon, iterations: usize) -> Self {
        Self {
            lexicon,
            iterations,
        }
    }

    /// Save the model to a directory as `model.json`.
    ///
    /// # Arguments
    /// * `path` - Directory path to save to
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path).map_err(|e| {
            AlignError::Save(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })?;

        let file_path = path.join(MODEL_FILE);
        let file = File::create(&file_path).map_err(|e| {
            AlignError::Save(format!(
                "Failed to create file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        let mut writer = BufWriter::new(file);
        let serialized = self.serialize();
        serde_json::to_writer_pretty(&mut writer, &serialized)
            .map_err(|e| AlignError::Save(format!("Failed to serialize model: {}", e)))?;
        writer.flush().map_err(|e| {
            AlignError::Save(format!(
                "Failed to write file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        tracing::info!(
            path = %file_path.display(),
            rows = serialized.rows.len(),
            "model saved"
        );

        Ok(())
    }

    /// Serialize the model to a structure.
    pub(crate) fn serialize(&self) -> SerializedModel {
        let rows = self
            .lexicon
            .sources()
            .into_iter()
            .map(|source| {
                let targets = self
                    .lexicon
                    .row(&source)
                    .into_iter()
                    .map(|(target, probability)| SerializedEntry {
                        target: target.as_word().map(str::to_string),
                        probability,
                    })
                    .collect();
                SerializedRow {
                    source: source.as_word().map(str::to_string),
                    targets,
                }
            })
            .collect();

        SerializedModel {
            version: env!("CARGO_PKG_VERSION").to_string(),
            iterations: self.iterations,
            rows,
        }
    }
}
