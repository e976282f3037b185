//! Snapshot serialization: a plain structured record of the whole
//! vocabulary state.
//!
//! [`Snapshot`] carries the configuration, the token list in ascending id
//! order, and optionally the accumulated counts. It derives `Serialize`
//! and `Deserialize`, so any serde format can persist it; the crate
//! itself does not pick one.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::counter::TokenCounter;
use super::vocab::{VocabConfig, Vocabulary};

/// Complete, format-agnostic record of a vocabulary's state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub padding: bool,
    pub padding_token: String,
    pub oov_token: String,
    pub min_count: u64,
    pub max_vocab_size: Option<usize>,
    /// Tokens in ascending id order, specials included. Empty when the
    /// vocabulary was never built.
    pub tokens: Vec<String>,
    /// `(token, count)` pairs in first-seen order, or `None` when nothing
    /// has ever been counted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counts: Option<Vec<(String, u64)>>,
}

impl Vocabulary {
    /// Capture the full vocabulary state as a [`Snapshot`].
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            padding: self.config.padding,
            padding_token: self.config.padding_token.clone(),
            oov_token: self.config.oov_token.clone(),
            min_count: self.config.min_count,
            max_vocab_size: self.config.max_vocab_size,
            tokens: self.reverse_index().to_vec(),
            counts: self.counter.as_ref().map(TokenCounter::entries_first_seen),
        }
    }

    /// Restore a vocabulary from a [`Snapshot`].
    ///
    /// The mapping is taken verbatim from `tokens`; the counter is
    /// reconstructed from `counts` when present.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let config = VocabConfig {
            padding: snapshot.padding,
            padding_token: snapshot.padding_token,
            oov_token: snapshot.oov_token,
            min_count: snapshot.min_count,
            max_vocab_size: snapshot.max_vocab_size,
        };

        // Ids are assigned densely with the first occurrence winning, the
        // same keep-first rule load_from applies, so a snapshot with
        // duplicate tokens cannot produce a gapped mapping.
        let mut token_to_id = FxHashMap::default();
        for token in snapshot.tokens {
            let next_id = token_to_id.len() as u32;
            token_to_id.entry(token).or_insert(next_id);
        }

        Self {
            config,
            token_to_id,
            reverse: OnceLock::new(),
            counter: snapshot.counts.map(TokenCounter::from_counts),
        }
    }
}
