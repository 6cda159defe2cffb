//! Direct library API tests.
//!
//! These tests call the library functions directly without going through the CLI,
//! enabling more precise assertions about behavior and return values.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use findkmer::{
    builder::KmerHistogram,
    error::FindKmerError,
    histogram::RecordFilter,
    kmer::KmerLength,
    output::{OutputFormat, RecordWriter},
    run::{analyze_bytes, analyze_reader},
    stats::ZScore,
};
use std::{
    io::{BufReader, Write},
    path::PathBuf,
};
use tempfile::NamedTempFile;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Creates a temporary FASTA file with the given content.
fn temp_fasta(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

fn k(k: usize) -> KmerLength {
    KmerLength::new(k).unwrap()
}

#[test]
fn simple_fixture_counts() {
    // simple.fa contains:
    // >seq1
    // ACGTACGT
    // >seq2
    // GGGGCCCC
    let records = KmerHistogram::new()
        .k(2)
        .unwrap()
        .records(fixture_path("simple.fa"))
        .unwrap();
    let counts: Vec<_> = records
        .iter()
        .map(|r| (r.sequence.as_str(), r.frequency))
        .collect();
    assert_eq!(
        counts,
        vec![
            ("AC", 2),
            ("CC", 3),
            ("CG", 2),
            ("GC", 1),
            ("GG", 3),
            ("GT", 2),
            ("TA", 1)
        ]
    );
}

#[test]
fn with_n_fixture_counts() {
    // >seq1 ACGNNACGT, >seq2 AANAA
    let analysis = KmerHistogram::new()
        .k(3)
        .unwrap()
        .analyze_path(fixture_path("with_n.fa"))
        .unwrap();
    let records = analysis.records(&RecordFilter::default()).unwrap();
    let counts: Vec<_> = records
        .iter()
        .map(|r| (r.sequence.as_str(), r.frequency))
        .collect();
    assert_eq!(counts, vec![("ACG", 2), ("CGT", 1)]);
    assert_eq!(analysis.total_kmers_formed(), 3);
    assert_eq!(analysis.records_scanned(), 2);

    let model = analysis.model();
    assert_eq!(model.total_valid_bases(), 7);
    assert!((model.probability(findkmer::base::Base::T) - 1.0 / 7.0).abs() < 1e-12);
}

#[test]
fn empty_fixture_is_an_error() {
    let err = KmerHistogram::new()
        .k(3)
        .unwrap()
        .analyze_path(fixture_path("empty.fa"))
        .unwrap_err();
    assert!(err.to_string().contains("empty"));
}

#[test]
fn identifier_only_input_is_not_empty() {
    let analysis = analyze_bytes(b">only a header\n", k(3)).unwrap();
    assert_eq!(analysis.total_kmers_formed(), 0);
    assert!(analysis.records(&RecordFilter::default()).unwrap().is_empty());
}

#[test]
fn reader_api_matches_bytes_api() {
    let input = ">a\nGATTACA\nGATTACA\n>b\nNNNCAT\n";
    let file = temp_fasta(input);
    let from_reader =
        analyze_reader(BufReader::new(std::fs::File::open(file.path()).unwrap()), k(4)).unwrap();
    let from_bytes = analyze_bytes(input.as_bytes(), k(4)).unwrap();
    assert_eq!(
        from_reader.records(&RecordFilter::default()).unwrap(),
        from_bytes.records(&RecordFilter::default()).unwrap()
    );
}

#[test]
fn newline_inside_sequence_does_not_break_kmers() {
    let analysis = analyze_bytes(b">x\nACG\nTAC\n", k(6)).unwrap();
    let records = analysis.records(&RecordFilter::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sequence, "ACGTAC");
}

#[test]
fn lowercase_is_not_a_base() {
    let analysis = analyze_bytes(b"acgtACGT", k(4)).unwrap();
    let records = analysis.records(&RecordFilter::default()).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sequence, "ACGT");
}

#[test]
fn z_scores_follow_binomial_model() {
    // 400 A's then 400 C's: composition is half A, half C.
    let input = format!("{}{}", "A".repeat(400), "C".repeat(400));
    let analysis = analyze_bytes(input.as_bytes(), k(2)).unwrap();
    let records = analysis.records(&RecordFilter::default()).unwrap();

    let n = analysis.total_kmers_formed() as f64;
    assert_eq!(n, 799.0);
    let aa = records.iter().find(|r| r.sequence == "AA").unwrap();
    let p = 0.25;
    let expected = (f64::from(aa.frequency) - n * p) / (n * p * (1.0 - p)).sqrt();
    let ZScore::Score(z) = aa.z_score else {
        panic!("expected a reported Z score");
    };
    assert!((z - expected).abs() < 1e-9);

    // AC occurs once; n*p = 199.75 so the score is still reported.
    let ac = records.iter().find(|r| r.sequence == "AC").unwrap();
    assert_eq!(ac.frequency, 1);
    assert!(ac.z_score.is_applicable());
}

#[test]
fn summary_and_spectrum() {
    let analysis = analyze_bytes(b">id1\nACGTACGT\n", k(2)).unwrap();
    let summary = analysis.summary().unwrap();
    assert_eq!(summary.distinct_kmers, 4);
    assert_eq!(summary.total_kmers, 7);
    assert_eq!(summary.max_frequency, 2);

    let spectrum = analysis.frequency_spectrum();
    let total: u64 = spectrum.iter().map(|(f, n)| u64::from(*f) * n).sum();
    assert_eq!(total, 7);
}

#[test]
fn csv_writer_output() {
    let analysis = analyze_bytes(b"AAAAAAAA", k(3)).unwrap();
    let mut writer = RecordWriter::new(Vec::new(), OutputFormat::Csv);
    analysis
        .write(&mut writer, &RecordFilter::default())
        .unwrap();
    let text = String::from_utf8(writer.into_inner()).unwrap();
    insta::assert_snapshot!(text, @r###"
    Sequence, Shannon Entropy h, Shannon Entropy H, Frequency, Z score
    AAA, 0.000000, 0.000000, 6, NA
    "###);
}

#[test]
fn json_writer_output_is_valid() {
    let analysis = analyze_bytes(b">id1\nACGTACGT\n", k(2)).unwrap();
    let mut writer = RecordWriter::new(Vec::new(), OutputFormat::Json);
    analysis
        .write(&mut writer, &RecordFilter::default())
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&writer.into_inner()).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[3]["sequence"], "TA");
    assert_eq!(rows[3]["frequency"], 1);
}

#[test]
fn node_limit_surfaces_as_error() {
    let err = KmerHistogram::new()
        .k(4)
        .unwrap()
        .node_limit(4)
        .analyze_bytes(b"ACGTACGT")
        .unwrap_err();
    assert!(matches!(
        err,
        findkmer::error::BuilderError::FindKmer(FindKmerError::NodeLimit { limit: 4 })
    ));
}

#[test]
fn memory_budget_large_enough_succeeds() {
    let analysis = KmerHistogram::new()
        .k(4)
        .unwrap()
        .memory_budget(1024 * 1024)
        .analyze_bytes(b"ACGTACGT")
        .unwrap();
    assert_eq!(analysis.total_kmers_formed(), 5);
}
