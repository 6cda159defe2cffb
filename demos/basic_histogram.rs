//! Basic k-mer histogram example.
//!
//! This example demonstrates the simplest way to build a histogram using the builder API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example basic_histogram -- sequences.fa 7
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::env;
use std::process;

use findkmer::builder::KmerHistogram;
use findkmer::histogram::RecordFilter;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <sequence_file> [k]", args[0]);
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  sequence_file  Path to a FASTA-like file");
        eprintln!("  k              K-mer length (default: 7)");
        process::exit(1);
    }

    let path = &args[1];
    let k: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(7);

    let analysis = match KmerHistogram::new().k(k) {
        Ok(histogram) => match histogram.analyze_path(path) {
            Ok(analysis) => analysis,
            Err(e) => {
                eprintln!("Error building histogram: {e}");
                process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("Invalid k-mer length: {e}");
            process::exit(1);
        }
    };

    let records = analysis.records(&RecordFilter::default()).unwrap();
    let summary = analysis.summary().unwrap();

    println!("Histogram complete!");
    println!("  K-mer length:   {k}");
    println!("  Records:        {}", analysis.records_scanned());
    println!("  K-mers formed:  {}", summary.total_kmers);
    println!("  Distinct:       {}", summary.distinct_kmers);
    println!("  With Z score:   {}", summary.z_reported);

    println!("\nBase composition:");
    for (base, p) in findkmer::base::Base::ALL
        .iter()
        .zip(analysis.model().probabilities())
    {
        println!("  {base}: {p:.4}");
    }

    // Most over-represented k-mers by Z score
    let mut scored: Vec<_> = records
        .iter()
        .filter_map(|r| r.z_score.value().map(|z| (r, z)))
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    println!("\nTop 10 over-represented k-mers:");
    for (record, z) in scored.into_iter().take(10) {
        println!(
            "  {}  freq={:<8} h={:.3}  z={z:.3}",
            record.sequence, record.frequency, record.entropy_h
        );
    }
}
