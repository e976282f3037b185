//! # vocabr
//!
//! Frequency-based vocabulary manager for NLP pipelines.
//!
//! vocabr builds a bidirectional mapping between string tokens and dense
//! integer ids from token frequency counts, and converts between token
//! sentences and id sentences:
//!
//! - Occurrence counting across sentence batches, with counter merging
//! - Mapping construction with a minimum-count threshold, an optional
//!   vocabulary size cap, and reserved padding/OOV special tokens
//! - Encode with OOV fallback and fixed-length padding; decode with
//!   padding removal
//! - Rayon parallelism for batch encode/decode
//! - Newline-delimited text persistence and serde snapshots
//! - Optional Python bindings via PyO3 (feature `python`)
//!
//! ```
//! use vocabr::{VocabConfig, Vocabulary};
//!
//! let corpus = vec![vec!["the", "cat", "sat"], vec!["the", "mat"]];
//! let vocab = Vocabulary::with_corpus(VocabConfig::default(), corpus);
//!
//! let ids = vocab.to_ids(vec![vec!["the", "dog"]], None).unwrap();
//! let tokens = vocab.to_tokens(&ids, true).unwrap();
//! assert_eq!(tokens[0][0], "the");
//! ```
//!
//! vocabr is not a tokenizer: callers supply already-segmented token
//! sequences, and all normalization and casing decisions stay with the
//! caller.

pub mod core;

#[cfg(feature = "python")]
mod python;

pub use crate::core::{
    Snapshot, TokenCounter, TokenStat, VocabConfig, VocabError, Vocabulary, DEFAULT_OOV_TOKEN,
    DEFAULT_PADDING_TOKEN,
};
