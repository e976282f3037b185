//! Integration tests for the vocabulary manager.
//!
//! These tests exercise the full pipeline: counting a corpus, building the
//! mapping under threshold and size constraints, encoding and decoding
//! sentence batches, and persisting to the line-oriented text format.

use vocabr::{VocabConfig, VocabError, Vocabulary, DEFAULT_OOV_TOKEN};

fn sample_corpus() -> Vec<Vec<&'static str>> {
    vec![vec!["a", "b", "a"], vec!["b", "c"]]
}

fn sample_vocab() -> Vocabulary {
    Vocabulary::with_corpus(VocabConfig::default(), sample_corpus())
}

/// Counts {a:2, b:2, c:1} produce PAD=0, OOV=1, then a,b (tie broken by
/// first-seen order) at 2,3 and c at 4.
#[test]
fn test_worked_example_mapping() {
    let vocab = sample_vocab();

    assert_eq!(vocab.padding_id(), Some(0));
    assert_eq!(vocab.oov_id(), Some(1));
    assert_eq!(vocab.id_for("a"), Some(2));
    assert_eq!(vocab.id_for("b"), Some(3));
    assert_eq!(vocab.id_for("c"), Some(4));
    assert_eq!(vocab.vocab_size(), 3);
}

/// Encoding `[["a","x"]]` with pad_to=4: x falls back to the OOV id and
/// the sentence is right-padded with the padding id.
#[test]
fn test_worked_example_encoding() {
    let vocab = sample_vocab();
    let ids = vocab.to_ids(vec![vec!["a", "x"]], Some(4)).unwrap();
    assert_eq!(ids, vec![vec![2, 1, 0, 0]]);
}

/// min_count=2 on the same counts excludes c.
#[test]
fn test_worked_example_min_count() {
    let mut vocab = sample_vocab();
    vocab.set_min_count(2);
    assert_eq!(vocab.vocab_size(), 2);
    assert_eq!(vocab.id_for("c"), None);
}

/// max_vocab_size=1 keeps only the first of the tied highest-count tokens.
#[test]
fn test_worked_example_max_vocab_size() {
    let mut vocab = sample_vocab();
    vocab.set_max_vocab_size(Some(1));
    assert_eq!(vocab.vocab_size(), 1);
    assert_eq!(vocab.id_for("a"), Some(2));
    assert_eq!(vocab.id_for("b"), None);
}

/// Accumulating in pieces or merging counters yields the same counts as
/// one big accumulate.
#[test]
fn test_counting_is_commutative_and_associative() {
    let whole = sample_vocab();

    let mut pieces = Vocabulary::new(VocabConfig::default());
    pieces.accumulate(vec![vec!["a", "b", "a"]]);
    pieces.accumulate(vec![vec!["b", "c"]]);

    let mut merged = Vocabulary::with_corpus(VocabConfig::default(), vec![vec!["a", "b", "a"]]);
    let other = Vocabulary::with_corpus(VocabConfig::default(), vec![vec!["b", "c"]]);
    merged.merge_counts(&other);

    for token in ["a", "b", "c"] {
        let expected = whole.counter().unwrap().count(token);
        assert_eq!(pieces.counter().unwrap().count(token), expected);
        assert_eq!(merged.counter().unwrap().count(token), expected);
    }
    assert_eq!(pieces.mapping(), whole.mapping());
    assert_eq!(merged.mapping(), whole.mapping());
}

/// `vocab_size` equals the number of tokens meeting the threshold, capped.
#[test]
fn test_vocab_size_tracks_threshold_and_cap() {
    let mut vocab = sample_vocab();
    assert_eq!(vocab.vocab_size(), 3);

    vocab.set_min_count(2);
    assert_eq!(vocab.vocab_size(), 2);

    vocab.set_max_vocab_size(Some(1));
    assert_eq!(vocab.vocab_size(), 1);

    vocab.set_min_count(1);
    vocab.set_max_vocab_size(None);
    assert_eq!(vocab.vocab_size(), 3);
}

/// Decoding the encoding returns the original tokens for every token in
/// the mapping; unknown tokens come back as the OOV token.
#[test]
fn test_encode_decode_round_trip() {
    let vocab = sample_vocab();
    let sentences = vec![vec!["a", "b", "c"], vec!["b"]];
    let ids = vocab.to_ids(sentences.clone(), None).unwrap();
    let tokens = vocab.to_tokens(&ids, true).unwrap();
    assert_eq!(tokens, vec![vec!["a", "b", "c"], vec!["b"]]);

    let ids = vocab.to_ids(vec![vec!["a", "zzz"]], None).unwrap();
    let tokens = vocab.to_tokens(&ids, true).unwrap();
    assert_eq!(tokens, vec![vec!["a", DEFAULT_OOV_TOKEN]]);
}

/// Rebuilding twice with unchanged inputs yields an identical mapping.
#[test]
fn test_rebuild_idempotence() {
    let mut vocab = sample_vocab();
    let first = vocab.mapping().clone();
    vocab.rebuild();
    vocab.rebuild();
    assert_eq!(vocab.mapping(), &first);
}

/// Dump then load with equivalent configuration restores every token at
/// the same id.
#[test]
fn test_dump_load_round_trip() {
    let dir = tempdir::TempDir::new("vocabr-test").unwrap();
    let path = dir.path().join("vocab.txt");

    let vocab = sample_vocab();
    vocab.dump(&path).unwrap();

    let mut loaded = Vocabulary::new(VocabConfig::default());
    loaded.load(&path).unwrap();

    assert_eq!(loaded.mapping(), vocab.mapping());

    // The loaded vocabulary encodes and decodes without a counter.
    let ids = loaded.to_ids(vec![vec!["a", "c"]], None).unwrap();
    assert_eq!(ids, vec![vec![2, 4]]);
    assert!(loaded.counter().is_none());
}

/// The text format is one token per line with no trailing newline.
#[test]
fn test_dump_format() {
    let vocab = sample_vocab();
    let text = vocab.dumps().unwrap();
    assert!(!text.ends_with('\n'));
    assert_eq!(text.lines().count(), vocab.len());
    assert_eq!(text.lines().next(), Some("@@PADDING@@"));
}

/// Operations requiring a mapping fail fast before anything is counted or
/// loaded.
#[test]
fn test_not_built_fails_fast() {
    let vocab = Vocabulary::new(VocabConfig::default());
    assert!(matches!(
        vocab.to_ids(vec![vec!["a"]], None),
        Err(VocabError::NotBuilt)
    ));
    assert!(matches!(
        vocab.to_tokens(&[vec![0]], true),
        Err(VocabError::NotBuilt)
    ));
    assert!(matches!(vocab.dumps(), Err(VocabError::NotBuilt)));
}

/// Snapshots round-trip the full state through serde_json.
#[test]
fn test_snapshot_json_round_trip() {
    let vocab = sample_vocab();
    let json = serde_json::to_string(&vocab.to_snapshot()).unwrap();
    let restored = Vocabulary::from_snapshot(serde_json::from_str(&json).unwrap());

    assert_eq!(restored.mapping(), vocab.mapping());
    assert_eq!(restored.config(), vocab.config());

    // The restored counter still drives threshold changes.
    let mut restored = restored;
    restored.set_min_count(2);
    assert_eq!(restored.vocab_size(), 2);
}

/// Custom special token strings take their reserved ids.
#[test]
fn test_custom_special_tokens() {
    let config = VocabConfig {
        padding_token: "<pad>".to_string(),
        oov_token: "<unk>".to_string(),
        ..VocabConfig::default()
    };
    let vocab = Vocabulary::with_corpus(config, sample_corpus());

    assert_eq!(vocab.id_for("<pad>"), Some(0));
    assert_eq!(vocab.id_for("<unk>"), Some(1));

    let ids = vocab.to_ids(vec![vec!["nope"]], Some(2)).unwrap();
    assert_eq!(ids, vec![vec![1, 0]]);
    let tokens = vocab.to_tokens(&ids, false).unwrap();
    assert_eq!(tokens, vec![vec!["<unk>", "<pad>"]]);
}

/// With padding disabled the OOV token sits at id 0 and pad_to is ignored.
#[test]
fn test_unpadded_vocabulary() {
    let config = VocabConfig {
        padding: false,
        ..VocabConfig::default()
    };
    let vocab = Vocabulary::with_corpus(config, sample_corpus());

    assert!(!vocab.is_padded());
    assert_eq!(vocab.padding_id(), None);
    assert_eq!(vocab.oov_id(), Some(0));

    let ids = vocab.to_ids(vec![vec!["a"]], Some(8)).unwrap();
    assert_eq!(ids[0].len(), 1);
}
