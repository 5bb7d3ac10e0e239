//! Re-openable line sources.
//!
//! A bitext is read once per training pass, so every source must be able to
//! start over from its first line on each call to `open`.

use crate::error::{AlignError, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Lines produced by one pass over a source.
pub type Lines<'a> = Box<dyn Iterator<Item = std::io::Result<String>> + 'a>;

/// A line-oriented text source that can be read from the start any number of times.
pub trait LineSource: Send + Sync {
    /// Start a fresh pass from the first line.
    fn open(&self) -> Result<Lines<'_>>;

    /// Human-readable name used in errors and logs.
    fn describe(&self) -> String;
}

impl<S: LineSource + ?Sized> LineSource for Box<S> {
    fn open(&self) -> Result<Lines<'_>> {
        (**self).open()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

/// UTF-8 text file, one sentence per line.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSource for FileSource {
    fn open(&self) -> Result<Lines<'_>> {
        let file = File::open(&self.path).map_err(|err| AlignError::Io {
            path: self.path.clone(),
            err,
        })?;
        Ok(Box::new(BufReader::new(file).lines()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory text.
#[derive(Debug, Clone)]
pub struct MemorySource {
    text: Arc<str>,
}

impl MemorySource {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }
}

impl LineSource for MemorySource {
    fn open(&self) -> Result<Lines<'_>> {
        Ok(Box::new(self.text.lines().map(|line| Ok(line.to_string()))))
    }

    fn describe(&self) -> String {
        "<memory>".to_string()
    }
}
