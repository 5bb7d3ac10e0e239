//! Load functionality for saved models.

use super::format::{SerializedModel, MODEL_FILE};
use lexalign_core::{AlignError, Lexicon, Result, Token};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// A model read back from disk.
#[derive(Debug, Clone)]
pub struct SavedModel {
    /// Vocabulary and translation table
    pub lexicon: Lexicon,
    /// Completed EM iterations at save time
    pub iterations: usize,
}

/// Model loader - reads models written by `ModelSaver`.
pub struct ModelLoader;

impl ModelLoader {
    /// Load a model from a directory.
    ///
    /// Expects a `model.json` file in the given directory.
    ///
    /// # Arguments
    /// * `path` - Directory path to load from
    pub fn load(path: &Path) -> Result<SavedModel> {
        let file_path = path.join(MODEL_FILE);
        let file = File::open(&file_path).map_err(|e| {
            AlignError::Load(format!(
                "Failed to open file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        let reader = BufReader::new(file);
        let serialized: SerializedModel = serde_json::from_reader(reader)
            .map_err(|e| AlignError::Load(format!("Failed to deserialize model: {}", e)))?;

        let model = Self::deserialize(serialized)?;
        tracing::info!(
            path = %file_path.display(),
            rows = model.lexicon.table.len(),
            iterations = model.iterations,
            "model loaded"
        );
        Ok(model)
    }

    /// Deserialize from a serialized structure.
    pub(crate) fn deserialize(data: SerializedModel) -> Result<SavedModel> {
        let mut lexicon = Lexicon::new();

        for row in data.rows {
            let source = lexicon
                .vocab
                .intern_token(&Token::from(row.source.as_deref()));

            for entry in row.targets {
                if !entry.probability.is_finite() || !(0.0..=1.0).contains(&entry.probability) {
                    return Err(AlignError::Load(format!(
                        "Invalid probability {} for {} -> {}",
                        entry.probability,
                        row.source.as_deref().unwrap_or("NULL"),
                        entry.target.as_deref().unwrap_or("NULL"),
                    )));
                }
                let target = lexicon
                    .vocab
                    .intern_token(&Token::from(entry.target.as_deref()));
                lexicon.table.set(source, target, entry.probability);
            }
        }

        Ok(SavedModel {
            lexicon,
            iterations: data.iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::format::{SerializedEntry, SerializedRow};
    use crate::io::save::ModelSaver;
    use lexalign_core::NULL_TOKEN;

    #[test]
    fn test_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();

        let mut lexicon = Lexicon::new();
        let maison = lexicon.vocab.intern("maison");
        let house = lexicon.vocab.intern("house");
        lexicon.table.set(maison, house, 0.875);
        lexicon.table.set(maison, NULL_TOKEN, 0.125);
        lexicon.table.set(NULL_TOKEN, NULL_TOKEN, 1.0);

        ModelSaver::new(&lexicon, 4).save(temp_dir.path()).unwrap();
        let loaded = ModelLoader::load(temp_dir.path()).unwrap();

        assert_eq!(loaded.iterations, 4);
        let maison = Token::word("maison");
        assert_eq!(loaded.lexicon.probability(&maison, &Token::word("house")), 0.875);
        assert_eq!(loaded.lexicon.probability(&maison, &Token::Null), 0.125);
        assert_eq!(loaded.lexicon.probability(&Token::Null, &Token::Null), 1.0);
        assert_eq!(loaded.lexicon.table.num_entries(), 3);
    }

    #[test]
    fn test_missing_model_is_load_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            ModelLoader::load(temp_dir.path()),
            Err(AlignError::Load(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_load_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join(MODEL_FILE), "{\"rows\": [").unwrap();
        assert!(matches!(
            ModelLoader::load(temp_dir.path()),
            Err(AlignError::Load(msg)) if msg.contains("deserialize")
        ));
    }

    #[test]
    fn test_rejects_out_of_range_probability() {
        let data = SerializedModel {
            version: "0.1.0".to_string(),
            iterations: 0,
            rows: vec![SerializedRow {
                source: Some("maison".to_string()),
                targets: vec![SerializedEntry {
                    target: Some("house".to_string()),
                    probability: 1.5,
                }],
            }],
        };
        assert!(matches!(
            ModelLoader::deserialize(data),
            Err(AlignError::Load(_))
        ));
    }
}
