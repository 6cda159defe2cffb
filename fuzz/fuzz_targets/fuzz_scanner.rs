//! Fuzz target for the streaming scanner.
//!
//! Arbitrary bytes must never panic the scanner, and the completed histogram
//! must satisfy:
//! 1. Frequencies sum to the number of k-mers formed
//! 2. Records are strictly sorted
//! 3. Base probabilities sum to 1 whenever any base was counted

#![no_main]

use findkmer::histogram::RecordFilter;
use findkmer::kmer::KmerLength;
use findkmer::run::analyze_bytes;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&first, input)) = data.split_first() else {
        return;
    };
    if input.is_empty() {
        return;
    }
    let Ok(k) = KmerLength::new(usize::from(first % 8) + 1) else {
        return;
    };

    let analysis = analyze_bytes(input, k).unwrap();
    let records = analysis.records(&RecordFilter::default()).unwrap();

    let sum: u64 = records.iter().map(|r| u64::from(r.frequency)).sum();
    assert_eq!(sum, analysis.total_kmers_formed());

    for pair in records.windows(2) {
        assert!(pair[0].sequence < pair[1].sequence);
    }

    let model = analysis.model();
    if model.total_valid_bases() > 0 {
        let total: f64 = model.probabilities().iter().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }
});
