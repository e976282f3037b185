//! Token frequency counting across sentence batches.
//!
//! [`TokenCounter`] accumulates occurrence counts for string tokens. It is
//! append-only: counts grow through [`TokenCounter::record`] and
//! [`TokenCounter::merge`] and are never decremented. Besides the count,
//! each token carries its first-seen rank, which the vocabulary builder
//! uses as the deterministic tie-break when two tokens have equal counts.

use rustc_hash::FxHashMap;

/// Per-token statistics tracked by [`TokenCounter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenStat {
    /// Total occurrences across all recorded sentences.
    pub count: u64,
    /// Position in first-seen order. Lower means seen earlier.
    pub first_seen: usize,
}

/// Append-only frequency counter over string tokens.
///
/// The counter itself always represents "something has been counted";
/// "never counted at all" is expressed by the vocabulary holding
/// `Option<TokenCounter>` instead of a counter with zero entries.
#[derive(Debug, Clone, Default)]
pub struct TokenCounter {
    stats: FxHashMap<String, TokenStat>,
    next_rank: usize,
}

impl TokenCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single occurrence of `token`.
    pub fn record(&mut self, token: &str) {
        if let Some(stat) = self.stats.get_mut(token) {
            stat.count += 1;
            return;
        }
        let first_seen = self.next_rank;
        self.next_rank += 1;
        self.stats
            .insert(token.to_string(), TokenStat { count: 1, first_seen });
    }

    /// Record every token in every sentence, once per occurrence.
    pub fn extend_from_sentences<S, T>(&mut self, sentences: S)
    where
        S: IntoIterator<Item = T>,
        T: IntoIterator,
        T::Item: AsRef<str>,
    {
        for sentence in sentences {
            for token in sentence {
                self.record(token.as_ref());
            }
        }
    }

    /// Add `other`'s counts into this counter, key-wise.
    ///
    /// Tokens not yet seen here are registered in `other`'s first-seen
    /// order, so the merged tie-break order is deterministic.
    pub fn merge(&mut self, other: &TokenCounter) {
        for (token, count) in other.entries_first_seen() {
            if let Some(stat) = self.stats.get_mut(&token) {
                stat.count += count;
                continue;
            }
            let first_seen = self.next_rank;
            self.next_rank += 1;
            self.stats.insert(token, TokenStat { count, first_seen });
        }
    }

    /// The count recorded for `token`, or zero if it has never been seen.
    pub fn count(&self, token: &str) -> u64 {
        self.stats.get(token).map_or(0, |stat| stat.count)
    }

    /// Number of distinct tokens counted.
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether no tokens have been counted.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Iterate over `(token, stat)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TokenStat)> {
        self.stats.iter().map(|(token, stat)| (token.as_str(), stat))
    }

    /// `(token, count)` pairs sorted by descending count, ties broken by
    /// first-seen order. This is the build order of the vocabulary.
    pub fn sorted_entries(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, &TokenStat)> = self.iter().collect();
        entries.sort_unstable_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        });
        entries
            .into_iter()
            .map(|(token, stat)| (token, stat.count))
            .collect()
    }

    /// `(token, count)` pairs in first-seen order, for snapshots.
    pub fn entries_first_seen(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<(&String, &TokenStat)> = self.stats.iter().collect();
        entries.sort_unstable_by_key(|(_, stat)| stat.first_seen);
        entries
            .into_iter()
            .map(|(token, stat)| (token.clone(), stat.count))
            .collect()
    }

    /// Rebuild a counter from `(token, count)` pairs, assigning first-seen
    /// ranks in pair order. Inverse of [`TokenCounter::entries_first_seen`].
    pub fn from_counts<I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut counter = Self::new();
        for (token, count) in counts {
            let first_seen = counter.next_rank;
            counter.next_rank += 1;
            counter.stats.insert(token, TokenStat { count, first_seen });
        }
        counter
    }
}
