//! Histogram construction with progress reporting.
//!
//! This example demonstrates how to use the progress callback API to display
//! a progress indicator while a large file is scanned.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example progress_report -- large_genome.fa 9
//! ```

use std::env;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process;
use std::time::Instant;

use findkmer::builder::KmerHistogram;
use findkmer::estimate::ResourceEstimate;

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <sequence_file> [k]", args[0]);
        eprintln!();
        eprintln!("Demonstrates progress reporting while scanning.");
        process::exit(1);
    }

    let path = &args[1];
    let k: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(9);

    let histogram = match KmerHistogram::new().k(k) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    if let Some(k) = histogram.get_k() {
        eprintln!("Scanning {k}-mers in {path}: {}\n", ResourceEstimate::for_k(k));
    }

    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let start = Instant::now();
    let mut last_records = 0;

    let analysis = match histogram.analyze_with_progress(BufReader::new(file), path, |progress| {
        // Only update every 100 records to reduce overhead
        if progress.records >= last_records + 100 || progress.records < last_records {
            last_records = progress.records;
            eprint!(
                "\r  Records: {:>8}  |  Bytes: {:>12}  |  K-mers: {:>12}",
                progress.records, progress.bytes_scanned, progress.kmers_formed
            );
            let _ = io::stderr().flush();
        }
    }) {
        Ok(analysis) => analysis,
        Err(e) => {
            eprintln!("\nError: {e}");
            process::exit(1);
        }
    };

    let elapsed = start.elapsed();
    let distinct = analysis.trie().distinct_kmers();

    eprintln!("\r{:80}", "");
    eprintln!("\n=== Results ===");
    eprintln!("Records:          {}", analysis.records_scanned());
    eprintln!("K-mers formed:    {}", analysis.total_kmers_formed());
    eprintln!("Distinct k-mers:  {distinct}");
    eprintln!("Trie nodes:       {}", analysis.trie().node_count());
    eprintln!("Time elapsed:     {elapsed:.2?}");

    eprintln!("\nFrequency spectrum (frequency: distinct k-mers):");
    for (frequency, count) in analysis.frequency_spectrum().iter().take(10) {
        eprintln!("  {frequency:>6}: {count}");
    }
}
