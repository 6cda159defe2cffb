//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold across all valid inputs,
//! catching edge cases that might be missed by example-based tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use findkmer::{
    base::{decode, encode, Base, Symbol},
    histogram::RecordFilter,
    kmer::{KmerLength, MAX_K},
    output::{OutputFormat, RecordWriter},
    run::analyze_bytes,
    scanner::scan_slice,
    trie::max_nodes,
};
use proptest::prelude::*;

/// Strategy for generating FASTA-like input: mostly bases, with the odd
/// newline, ambiguity code or identifier line mixed in.
fn sequence_input(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(
        prop_oneof![
            8 => prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')],
            1 => Just(b'\n'),
            1 => prop_oneof![Just(b'N'), Just(b'a'), Just(b'-'), Just(b'\r')],
            1 => Just(b'>'),
        ],
        1..=max_len,
    )
}

/// Strategy for small k-mer lengths.
fn kmer_length() -> impl Strategy<Value = KmerLength> {
    (1usize..=6).prop_map(|k| KmerLength::new(k).unwrap())
}

proptest! {
    /// The sum of all emitted frequencies equals the number of k-mers formed.
    #[test]
    fn frequencies_sum_to_kmers_formed(input in sequence_input(400), k in kmer_length()) {
        let analysis = analyze_bytes(&input, k).unwrap();
        let records = analysis.records(&RecordFilter::default()).unwrap();
        let sum: u64 = records.iter().map(|r| u64::from(r.frequency)).sum();
        prop_assert_eq!(sum, analysis.total_kmers_formed());
    }

    /// Records come out in strict lexicographic order with exactly k bases each.
    #[test]
    fn records_are_sorted_and_well_formed(input in sequence_input(400), k in kmer_length()) {
        let analysis = analyze_bytes(&input, k).unwrap();
        let records = analysis.records(&RecordFilter::default()).unwrap();
        for record in &records {
            prop_assert_eq!(record.sequence.len(), k.get());
            prop_assert!(record.frequency >= 1);
            prop_assert!(record.entropy_h >= 0.0 && record.entropy_h <= 2.0 + 1e-12);
        }
        for pair in records.windows(2) {
            prop_assert!(pair[0].sequence < pair[1].sequence);
        }
    }

    /// The trie never exceeds the full 4-ary tree of depth k.
    #[test]
    fn node_count_is_bounded(input in sequence_input(400), k in kmer_length()) {
        let outcome = scan_slice(&input, k).unwrap();
        prop_assert!(outcome.trie().node_count() as u128 <= max_nodes(k.get()));
    }

    /// The trie reaches the full-tree size exactly when every k-mer was observed.
    /// Small k keeps both outcomes common at this input length.
    #[test]
    fn full_trie_iff_every_kmer_seen(input in sequence_input(400), k in 1usize..=2) {
        let k = KmerLength::new(k).unwrap();
        let outcome = scan_slice(&input, k).unwrap();
        let trie = outcome.trie();
        let full_tree = trie.node_count() as u128 == max_nodes(k.get());
        let every_kmer = trie.distinct_kmers() as u128 == 4_u128.pow(k.get() as u32);
        prop_assert_eq!(full_tree, every_kmer);
    }

    /// Composition counts match the valid-base total and probabilities sum to 1.
    #[test]
    fn composition_is_consistent(input in sequence_input(400), k in kmer_length()) {
        let outcome = scan_slice(&input, k).unwrap();
        prop_assert_eq!(outcome.composition().total(), outcome.total_valid_bases());
        let model = outcome.null_model();
        if outcome.total_valid_bases() > 0 {
            let sum: f64 = model.probabilities().iter().sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    /// Writing the same analysis twice produces identical output.
    #[test]
    fn traversal_is_repeatable(input in sequence_input(200), k in kmer_length()) {
        let analysis = analyze_bytes(&input, k).unwrap();
        let render = || {
            let mut writer = RecordWriter::new(Vec::new(), OutputFormat::Tsv);
            analysis.write(&mut writer, &RecordFilter::default()).unwrap();
            writer.into_inner()
        };
        prop_assert_eq!(render(), render());
    }

    /// Every reported Z-score passed the normal-approximation check.
    #[test]
    fn reported_z_scores_are_finite(input in sequence_input(800), k in 1usize..=3) {
        let k = KmerLength::new(k).unwrap();
        let analysis = analyze_bytes(&input, k).unwrap();
        for record in analysis.records(&RecordFilter::default()).unwrap() {
            if let Some(z) = record.z_score.value() {
                prop_assert!(z.is_finite());
            }
        }
    }

    /// Only the four uppercase bases encode to a base.
    #[test]
    fn encode_accepts_only_acgt(byte in any::<u8>()) {
        let is_base = matches!(encode(byte), Symbol::Base(_));
        prop_assert_eq!(is_base, matches!(byte, b'A' | b'C' | b'G' | b'T'));
        if byte == b'>' {
            prop_assert_eq!(encode(byte), Symbol::IdentifierStart);
        }
    }

    /// Decoding any code outside 0..=3 fails.
    #[test]
    fn decode_rejects_out_of_range(code in 4u8..) {
        prop_assert!(decode(code).is_err());
    }

    /// K-mer length validation accepts exactly 1..=20.
    #[test]
    fn kmer_length_range(k in 0usize..64) {
        prop_assert_eq!(KmerLength::new(k).is_ok(), (1..=usize::from(MAX_K)).contains(&k));
    }
}

#[test]
fn encode_decode_agree_for_bases() {
    for base in Base::ALL {
        assert_eq!(encode(base.to_byte()), Symbol::Base(base));
        assert_eq!(decode(base.code()).unwrap(), base.to_byte());
    }
}
