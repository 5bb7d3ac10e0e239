//! PyO3 wrapper for Model1

use lexalign_aligner::{LengthPolicy, Model1, PairAlignment, Token};
use pyo3::prelude::*;
use std::path::PathBuf;

use crate::error::IntoPyErr;

/// One alignment link as seen from Python: NULL becomes `None`.
type PyLink = (Option<String>, Option<String>);

/// Convert a sentence alignment, raising `AlignmentError` for any source
/// token that found no target.
fn links(alignment: PairAlignment<'_>) -> PyResult<Vec<PyLink>> {
    alignment
        .map(|a| {
            a.word_pair()
                .map(|(s, t)| (s.map(str::to_string), t.map(str::to_string)))
                .map_err(|e| e.into_py_err())
        })
        .collect()
}

/// Python wrapper for the IBM Model 1 aligner.
///
/// `source` and `target` are paths to line-aligned text files, one
/// whitespace-tokenized sentence per line.
#[pyclass(name = "M1")]
pub struct PyM1 {
    inner: Model1,
}

#[pymethods]
impl PyM1 {
    #[new]
    #[pyo3(signature = (source, target, truncate=false))]
    fn new(source: PathBuf, target: PathBuf, truncate: bool) -> PyResult<Self> {
        let policy = if truncate {
            LengthPolicy::Truncate
        } else {
            LengthPolicy::Strict
        };
        let inner = Model1::builder()
            .source_path(source)
            .target_path(target)
            .length_policy(policy)
            .build()
            .map_err(|e| e.into_py_err())?;
        Ok(PyM1 { inner })
    }

    /// Run `n` EM iterations. Negative counts run none.
    #[pyo3(signature = (n=1, verbose=false))]
    fn iterate(&mut self, n: i64, verbose: bool) -> PyResult<()> {
        let n = n.max(0) as usize;
        self.inner
            .iterate_with(n, |report| {
                if verbose {
                    eprintln!(
                        "iteration {} ({} pairs, {:.2}s)",
                        report.iteration,
                        report.pairs,
                        report.elapsed.as_secs_f64()
                    );
                }
            })
            .map_err(|e| e.into_py_err())
    }

    /// P(target | source). `None` stands for NULL on either side.
    #[pyo3(signature = (source, target))]
    fn prob(&self, source: Option<&str>, target: Option<&str>) -> f64 {
        self.inner
            .probability(&Token::from(source), &Token::from(target))
    }

    /// Align a sentence pair, one `(source, target)` tuple per source token.
    ///
    /// NULL is `None` on either side, so `(word, None)` means the word is
    /// aligned to NULL. A source token with no target of positive
    /// probability raises `AlignmentError` instead of producing a tuple.
    fn decode_pair(&self, source: &str, target: &str) -> PyResult<Vec<PyLink>> {
        links(self.inner.decode_lines(source, target))
    }

    /// Align every pair of the training corpus, with the same conventions
    /// as `decode_pair`.
    fn decode_training(&self) -> PyResult<Vec<Vec<PyLink>>> {
        self.inner
            .decode_training()
            .map_err(|e| e.into_py_err())?
            .map(|pair| links(pair.map_err(|e| e.into_py_err())?))
            .collect()
    }

    /// Save the model to a directory.
    fn save(&self, path: PathBuf) -> PyResult<()> {
        self.inner.save(&path).map_err(|e| e.into_py_err())
    }

    /// Number of completed EM iterations.
    #[getter]
    fn n(&self) -> usize {
        self.inner.iterations()
    }

    fn __repr__(&self) -> String {
        format!("M1({} iterations, {})", self.inner.iterations(), self.inner)
    }
}
