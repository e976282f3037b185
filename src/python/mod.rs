mod bindings;

pub use bindings::PyVocabulary;

use crate::core::{DEFAULT_OOV_TOKEN, DEFAULT_PADDING_TOKEN};

use pyo3::prelude::*;

/// vocabr - frequency-based vocabulary manager
///
/// Builds token↔id mappings from token frequency counts, with:
/// - Minimum-count thresholds and vocabulary size caps
/// - Reserved padding and out-of-vocabulary special tokens
/// - Encode/decode with OOV fallback and fixed-length padding
/// - Rayon parallelism for batch conversion
/// - Newline-delimited text persistence
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyVocabulary>()?;
    m.add("DEFAULT_PADDING_TOKEN", DEFAULT_PADDING_TOKEN)?;
    m.add("DEFAULT_OOV_TOKEN", DEFAULT_OOV_TOKEN)?;
    Ok(())
}
