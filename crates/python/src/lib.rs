//! Python bindings for lexalign
//!
//! This module provides a Pythonic interface to the Rust IBM Model 1 aligner.

use pyo3::prelude::*;

mod error;
mod m1;

use m1::PyM1;

/// lexalign: IBM Model 1 word alignment in Rust with Python bindings
#[pymodule]
fn lexalign(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyM1>()?;
    m.add("AlignmentError", m.py().get_type_bound::<error::AlignmentError>())?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
