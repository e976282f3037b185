//! Core vocabulary engine for vocabr.
//!
//! This module contains the frequency-based vocabulary manager:
//! - Token occurrence counting across sentence batches
//! - Deterministic mapping construction from counts, with a minimum-count
//!   threshold, an optional size cap, and reserved special tokens
//! - Encode/decode between token sentences and id sentences
//! - Line-oriented text persistence and serde snapshots
//!
//! # Architecture
//!
//! The core is organized into five components:
//!
//! - [`TokenCounter`]: append-only frequency counter with first-seen
//!   tie-break metadata
//! - [`Vocabulary`]: configuration, the token↔id mapping, and the rebuild
//!   algorithm
//! - `codec`: [`Vocabulary::to_ids`] / [`Vocabulary::to_tokens`] plus
//!   rayon batch-parallel variants
//! - `io`: newline-delimited dump/load
//! - [`Snapshot`]: format-agnostic serde record of the full state

mod codec;
mod counter;
mod io;
mod snapshot;
mod vocab;

pub use counter::{TokenCounter, TokenStat};
pub use snapshot::Snapshot;
pub use vocab::{
    VocabConfig, VocabError, Vocabulary, DEFAULT_OOV_TOKEN, DEFAULT_PADDING_TOKEN,
};
