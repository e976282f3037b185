//! The vocabulary itself: configuration, the token→id mapping, and the
//! frequency-based build algorithm.
//!
//! # Mapping invariants
//!
//! The mapping is a bijection between tokens and dense ids: every id in
//! `[0, len)` has exactly one token and vice versa. Ids are stable only
//! until the next rebuild. Special tokens occupy the reserved low ids:
//! padding at 0 when padding is enabled, the out-of-vocabulary token
//! immediately after.
//!
//! # Build algorithm
//!
//! [`Vocabulary::rebuild`] reconstructs the mapping from scratch:
//!
//! 1. Insert the specials at the reserved ids.
//! 2. Walk counted tokens by descending count, ties broken by first-seen
//!    order (see [`TokenCounter::sorted_entries`]).
//! 3. Skip tokens below `min_count`; stop once the mapping holds
//!    `max_vocab_size` learned tokens (when bounded).
//!
//! The new mapping is built into fresh storage and swapped in at the end,
//! so a rebuild never leaves a partially updated mapping behind.

use std::fmt;
use std::sync::OnceLock;

use log::debug;
use rustc_hash::FxHashMap;
use thiserror::Error;

use super::counter::TokenCounter;

/// Default padding token string.
pub const DEFAULT_PADDING_TOKEN: &str = "@@PADDING@@";

/// Default out-of-vocabulary token string.
pub const DEFAULT_OOV_TOKEN: &str = "@@UNKNOWN@@";

/// Errors produced by vocabulary operations.
#[derive(Error, Debug)]
pub enum VocabError {
    #[error("vocabulary has not been built: accumulate a corpus or load a dump first")]
    NotBuilt,
    #[error("special token {0:?} is missing from the mapping")]
    MissingSpecialToken(String),
    #[error("id {0} has no corresponding token")]
    OutOfRangeId(u32),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Vocabulary configuration.
///
/// `padding` is fixed for the lifetime of a [`Vocabulary`]; `min_count`
/// and `max_vocab_size` can be changed later through the setters, which
/// trigger a rebuild when the value actually changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VocabConfig {
    /// Whether a padding token is reserved at id 0.
    pub padding: bool,
    /// The padding token string.
    pub padding_token: String,
    /// The out-of-vocabulary token string.
    pub oov_token: String,
    /// Minimum occurrence count for a token to enter the mapping.
    pub min_count: u64,
    /// Cap on learned (non-special) tokens, or `None` for unbounded.
    pub max_vocab_size: Option<usize>,
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            padding: true,
            padding_token: DEFAULT_PADDING_TOKEN.to_string(),
            oov_token: DEFAULT_OOV_TOKEN.to_string(),
            min_count: 1,
            max_vocab_size: None,
        }
    }
}

/// Bidirectional mapping between string tokens and dense integer ids,
/// derived from token frequency counts.
///
/// ```
/// use vocabr::{VocabConfig, Vocabulary};
///
/// let sentences = vec![vec!["a", "b", "a"], vec!["b", "c"]];
/// let vocab = Vocabulary::with_corpus(VocabConfig::default(), sentences);
///
/// assert_eq!(vocab.vocab_size(), 3);
/// let ids = vocab.to_ids(vec![vec!["a", "x"]], Some(4)).unwrap();
/// assert_eq!(ids, vec![vec![2, 1, 0, 0]]); // x is OOV, padded with id 0
/// ```
///
/// Not internally synchronized: wrap in a lock for shared mutation.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub(crate) config: VocabConfig,
    pub(crate) token_to_id: FxHashMap<String, u32>,
    /// Reverse index, materialized lazily on first decode and replaced
    /// with an empty cell whenever the mapping changes.
    pub(crate) reverse: OnceLock<Vec<String>>,
    /// `None` means nothing has ever been counted, as opposed to a
    /// counter that exists but is empty.
    pub(crate) counter: Option<TokenCounter>,
}

impl Vocabulary {
    /// Create an empty, unbuilt vocabulary.
    pub fn new(config: VocabConfig) -> Self {
        Self {
            config,
            token_to_id: FxHashMap::default(),
            reverse: OnceLock::new(),
            counter: None,
        }
    }

    /// Create a vocabulary and immediately accumulate `sentences`.
    pub fn with_corpus<S, T>(config: VocabConfig, sentences: S) -> Self
    where
        S: IntoIterator<Item = T>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        let mut vocab = Self::new(config);
        vocab.accumulate(sentences);
        vocab
    }

    /// Count every token in `sentences` and rebuild the mapping.
    pub fn accumulate<S, T>(&mut self, sentences: S)
    where
        S: IntoIterator<Item = T>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        self.counter
            .get_or_insert_with(TokenCounter::new)
            .extend_from_sentences(sentences);
        self.rebuild();
    }

    /// Merge another vocabulary's counts into this one and rebuild.
    ///
    /// A no-op when `other` has never counted anything.
    pub fn merge_counts(&mut self, other: &Vocabulary) {
        if let Some(other_counter) = &other.counter {
            self.counter
                .get_or_insert_with(TokenCounter::new)
                .merge(other_counter);
            self.rebuild();
        }
    }

    /// Reconstruct the mapping from the current counter and configuration.
    ///
    /// Idempotent: with unchanged inputs the resulting mapping is
    /// identical. A no-op when nothing has been counted.
    pub fn rebuild(&mut self) {
        let Some(counter) = &self.counter else {
            return;
        };

        let mut mapping = self.seeded_mapping();
        let capacity = self
            .config
            .max_vocab_size
            .map(|max| max.saturating_add(mapping.len()));

        for (token, count) in counter.sorted_entries() {
            if capacity.is_some_and(|cap| mapping.len() >= cap) {
                break;
            }
            if count < self.config.min_count {
                continue;
            }
            // A counted token matching a special literal already holds its
            // reserved id; re-inserting it would break the bijection.
            if mapping.contains_key(token) {
                continue;
            }
            let id = mapping.len() as u32;
            mapping.insert(token.to_string(), id);
        }

        debug!(
            "rebuilt vocabulary: {} entries ({} specials), min_count={}, max_vocab_size={:?}",
            mapping.len(),
            if self.config.padding { 2 } else { 1 },
            self.config.min_count,
            self.config.max_vocab_size,
        );

        self.token_to_id = mapping;
        self.reverse = OnceLock::new();
    }

    /// Change the minimum count threshold, rebuilding only on change.
    pub fn set_min_count(&mut self, min_count: u64) {
        if min_count != self.config.min_count {
            self.config.min_count = min_count;
            self.rebuild();
        }
    }

    /// Change the learned-token cap, rebuilding only on change.
    pub fn set_max_vocab_size(&mut self, max_vocab_size: Option<usize>) {
        if max_vocab_size != self.config.max_vocab_size {
            self.config.max_vocab_size = max_vocab_size;
            self.rebuild();
        }
    }

    /// Number of learned tokens, excluding the specials.
    pub fn vocab_size(&self) -> usize {
        self.token_to_id.len() - self.special_count()
    }

    /// Total mapping size, specials included.
    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    /// Whether the mapping is empty (nothing counted, nothing loaded).
    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }

    /// Whether a padding token is reserved.
    pub fn is_padded(&self) -> bool {
        self.config.padding
    }

    /// The padding token's id, once built with padding enabled.
    pub fn padding_id(&self) -> Option<u32> {
        self.token_to_id.get(&self.config.padding_token).copied()
    }

    /// The out-of-vocabulary token's id, once built.
    pub fn oov_id(&self) -> Option<u32> {
        self.token_to_id.get(&self.config.oov_token).copied()
    }

    /// Look up the id for `token`.
    pub fn id_for(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Look up the token for `id`.
    pub fn token_for(&self, id: u32) -> Option<&str> {
        self.reverse_index().get(id as usize).map(String::as_str)
    }

    /// Read-only view of the token→id mapping.
    pub fn mapping(&self) -> &FxHashMap<String, u32> {
        &self.token_to_id
    }

    /// The frequency counter, if anything has been counted.
    pub fn counter(&self) -> Option<&TokenCounter> {
        self.counter.as_ref()
    }

    /// The current configuration.
    pub fn config(&self) -> &VocabConfig {
        &self.config
    }

    pub(crate) fn is_built(&self) -> bool {
        !self.token_to_id.is_empty()
    }

    /// Number of special tokens actually present in the mapping.
    fn special_count(&self) -> usize {
        let mut specials = 0;
        if self.token_to_id.contains_key(&self.config.oov_token) {
            specials += 1;
        }
        if self.config.padding && self.token_to_id.contains_key(&self.config.padding_token) {
            specials += 1;
        }
        specials
    }

    /// A fresh mapping holding only the specials at their reserved ids.
    pub(crate) fn seeded_mapping(&self) -> FxHashMap<String, u32> {
        let mut mapping = FxHashMap::default();
        if self.config.padding {
            mapping.insert(self.config.padding_token.clone(), 0);
        }
        let oov_id = mapping.len() as u32;
        mapping.insert(self.config.oov_token.clone(), oov_id);
        mapping
    }

    /// The id→token index, built on first use.
    pub(crate) fn reverse_index(&self) -> &[String] {
        self.reverse.get_or_init(|| {
            let mut index = vec![String::new(); self.token_to_id.len()];
            for (token, &id) in &self.token_to_id {
                index[id as usize] = token.clone();
            }
            index
        })
    }
}

impl fmt::Display for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fmt_id = |id: Option<u32>| id.map_or_else(|| "none".to_string(), |v| v.to_string());
        write!(
            f,
            "Vocabulary: {} entries, padding_id={}, oov_id={}",
            self.vocab_size(),
            fmt_id(self.padding_id()),
            fmt_id(self.oov_id()),
        )
    }
}
