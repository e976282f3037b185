//! Python bindings for the vocabr vocabulary manager.
//!
//! This module provides PyO3 wrappers around the core Rust vocabulary,
//! exposing a Python-friendly API while keeping the counting and build
//! work in Rust.
//!
//! # Example
//!
//! ```python
//! from vocabr import Vocabulary
//!
//! vocab = Vocabulary(sentences=[["a", "b", "a"], ["b", "c"]])
//! ids = vocab.to_ids([["a", "x"]], pad_to=4)   # [[2, 1, 0, 0]]
//! tokens = vocab.to_tokens(ids)                # [["a", "@@UNKNOWN@@"]]
//! vocab.dump("vocab.txt")
//! ```

use pyo3::exceptions::{PyIOError, PyIndexError, PyValueError};
use pyo3::prelude::*;

use crate::core::{VocabConfig, VocabError, Vocabulary};

/// Translate a [`VocabError`] into the closest Python exception.
fn to_py_err(err: VocabError) -> PyErr {
    match err {
        VocabError::NotBuilt | VocabError::MissingSpecialToken(_) => {
            PyValueError::new_err(err.to_string())
        }
        VocabError::OutOfRangeId(_) => PyIndexError::new_err(err.to_string()),
        VocabError::Io(_) => PyIOError::new_err(err.to_string()),
    }
}

/// Python wrapper for the Rust Vocabulary.
#[pyclass(name = "Vocabulary")]
pub struct PyVocabulary {
    inner: Vocabulary,
}

#[pymethods]
impl PyVocabulary {
    /// Create a new vocabulary.
    ///
    /// Args:
    ///     sentences: Optional corpus (list of token lists) to count
    ///         immediately
    ///     padding: Whether to reserve a padding token at id 0
    ///     padding_token: Padding token string (default "@@PADDING@@")
    ///     oov_token: Out-of-vocabulary token string (default "@@UNKNOWN@@")
    ///     min_count: Minimum occurrence count for inclusion
    ///     max_vocab_size: Optional cap on learned tokens
    #[new]
    #[pyo3(signature = (
        sentences=None,
        padding=true,
        padding_token=None,
        oov_token=None,
        min_count=1,
        max_vocab_size=None
    ))]
    fn new(
        sentences: Option<Vec<Vec<String>>>,
        padding: bool,
        padding_token: Option<String>,
        oov_token: Option<String>,
        min_count: u64,
        max_vocab_size: Option<usize>,
    ) -> Self {
        let defaults = VocabConfig::default();
        let config = VocabConfig {
            padding,
            padding_token: padding_token.unwrap_or(defaults.padding_token),
            oov_token: oov_token.unwrap_or(defaults.oov_token),
            min_count,
            max_vocab_size,
        };
        let inner = match sentences {
            Some(sentences) => Vocabulary::with_corpus(config, sentences),
            None => Vocabulary::new(config),
        };
        Self { inner }
    }

    /// Count every token in the given sentences and rebuild the mapping.
    ///
    /// Args:
    ///     sentences: List of token lists
    fn accumulate(&mut self, sentences: Vec<Vec<String>>) {
        self.inner.accumulate(sentences);
    }

    /// Merge another vocabulary's counts into this one and rebuild.
    fn merge_counts(&mut self, other: &PyVocabulary) {
        self.inner.merge_counts(&other.inner);
    }

    /// Convert token sentences into id sentences.
    ///
    /// Unknown tokens map to the OOV id. When padding is enabled and
    /// `pad_to` is given, sentences are right-padded with the padding id.
    ///
    /// Args:
    ///     sentences: List of token lists
    ///     pad_to: Optional fixed length to right-pad each sentence to
    ///
    /// Returns:
    ///     List of id lists
    #[pyo3(signature = (sentences, pad_to=None))]
    fn to_ids(&self, sentences: Vec<Vec<String>>, pad_to: Option<usize>) -> PyResult<Vec<Vec<u32>>> {
        self.inner.to_ids(sentences, pad_to).map_err(to_py_err)
    }

    /// Convert id sentences back into token sentences.
    ///
    /// Args:
    ///     id_sentences: List of id lists
    ///     remove_paddings: Drop padding ids from the output (default True)
    ///
    /// Returns:
    ///     List of token lists
    #[pyo3(signature = (id_sentences, remove_paddings=true))]
    fn to_tokens(
        &self,
        id_sentences: Vec<Vec<u32>>,
        remove_paddings: bool,
    ) -> PyResult<Vec<Vec<String>>> {
        self.inner
            .to_tokens(&id_sentences, remove_paddings)
            .map_err(to_py_err)
    }

    /// Change the minimum count threshold. Rebuilds only on change.
    fn set_min_count(&mut self, min_count: u64) {
        self.inner.set_min_count(min_count);
    }

    /// Change the learned-token cap. Rebuilds only on change.
    #[pyo3(signature = (max_vocab_size=None))]
    fn set_max_vocab_size(&mut self, max_vocab_size: Option<usize>) {
        self.inner.set_max_vocab_size(max_vocab_size);
    }

    /// Write the vocabulary to a UTF-8 text file, one token per line.
    fn dump(&self, path: &str) -> PyResult<()> {
        self.inner.dump(path).map_err(to_py_err)
    }

    /// Render the vocabulary as a newline-delimited string.
    fn dumps(&self) -> PyResult<String> {
        self.inner.dumps().map_err(to_py_err)
    }

    /// Replace the mapping with tokens read from a UTF-8 text file.
    fn load(&mut self, path: &str) -> PyResult<()> {
        self.inner.load(path).map_err(to_py_err)
    }

    /// Replace the mapping with tokens parsed from a string.
    fn loads(&mut self, text: &str) -> PyResult<()> {
        self.inner.loads(text).map_err(to_py_err)
    }

    /// Number of learned tokens, excluding the specials.
    #[getter]
    fn vocab_size(&self) -> usize {
        self.inner.vocab_size()
    }

    /// The padding token's id, or None.
    #[getter]
    fn padding_id(&self) -> Option<u32> {
        self.inner.padding_id()
    }

    /// The OOV token's id, or None.
    #[getter]
    fn oov_id(&self) -> Option<u32> {
        self.inner.oov_id()
    }

    /// Whether a padding token is reserved.
    fn is_padded(&self) -> bool {
        self.inner.is_padded()
    }

    /// Look up the id for a token, or None.
    fn id_for(&self, token: &str) -> Option<u32> {
        self.inner.id_for(token)
    }

    /// Look up the token for an id, or None.
    fn token_for(&self, id: u32) -> Option<String> {
        self.inner.token_for(id).map(str::to_string)
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __str__(&self) -> String {
        self.inner.to_string()
    }

    fn __repr__(&self) -> String {
        self.inner.to_string()
    }
}
