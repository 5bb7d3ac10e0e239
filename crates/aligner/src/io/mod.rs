//! Serialization and text output for trained models.
//!
//! This module provides saving and loading of trained models as JSON, a
//! thresholded text dump of the translation table, and Moses-style
//! alignment output.

pub mod dump;
pub mod format;
pub mod load;
pub mod moses;
pub mod save;

pub use dump::{write_table, DEFAULT_MIN_PROBABILITY};
pub use format::{SerializedEntry, SerializedModel, SerializedRow, MODEL_FILE};
pub use load::{ModelLoader, SavedModel};
pub use moses::{format_links, MosesWriter};
pub use save::ModelSaver;
