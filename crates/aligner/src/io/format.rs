//! Format definitions for model serialization.
//!
//! The NULL token is written as JSON `null`, every other token as a string.

use serde::{Deserialize, Serialize};

/// File name used inside a model directory.
pub const MODEL_FILE: &str = "model.json";

/// One target entry of a serialized row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedEntry {
    /// Target word, `None` for NULL
    pub target: Option<String>,
    /// `P(target | source)`
    pub probability: f64,
}

/// One source row of the translation table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedRow {
    /// Source word, `None` for NULL
    pub source: Option<String>,
    /// Entries ordered by descending probability
    pub targets: Vec<SerializedEntry>,
}

/// Complete model serialization format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedModel {
    /// Format version
    pub version: String,
    /// Completed EM iterations
    pub iterations: usize,
    /// Rows ordered by source token, NULL first
    pub rows: Vec<SerializedRow>,
}
