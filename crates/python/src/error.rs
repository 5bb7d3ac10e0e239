//! Error handling for Python bindings

use lexalign_aligner::AlignError;
use pyo3::{create_exception, exceptions::PyRuntimeError, PyErr};

// Raised for any error coming out of the aligner
create_exception!(
    lexalign,
    AlignmentError,
    PyRuntimeError,
    "Error during alignment training or decoding"
);

/// Convert a Rust AlignError to a Python exception
pub trait IntoPyErr {
    fn into_py_err(self) -> PyErr;
}

impl IntoPyErr for AlignError {
    fn into_py_err(self) -> PyErr {
        AlignmentError::new_err(self.to_string())
    }
}
