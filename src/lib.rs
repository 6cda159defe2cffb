//! # findkmer
//!
//! A k-mer frequency histogram for DNA sequence files.
//!
//! `findkmer` streams FASTA-like input byte by byte, counts every k-mer of a
//! fixed length in a 4-ary trie, and reports each distinct k-mer with its
//! Shannon entropy and a binomial Z-score against a null model built from the
//! base composition of the same input.
//!
//! ## Features
//!
//! - Single pass over the input with bounded memory per k
//! - Runs of `A`, `C`, `G`, `T` only; any other byte breaks the run
//! - Records emitted in lexicographic order (`A < C < G < T`)
//! - CSV, TSV and JSON output
//! - Optional gzip and memory-mapped input
//!
//! ## Library Usage
//!
//! ### Builder API
//!
//! ```rust
//! use findkmer::builder::KmerHistogram;
//!
//! let analysis = KmerHistogram::new()
//!     .k(2)?
//!     .analyze_bytes(b">id1\nACGTACGT\n")?;
//!
//! let summary = analysis.summary()?;
//! assert_eq!(summary.distinct_kmers, 4);
//! assert_eq!(summary.total_kmers, 7);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ### Writing output
//!
//! ```rust
//! use findkmer::histogram::RecordFilter;
//! use findkmer::kmer::KmerLength;
//! use findkmer::output::{OutputFormat, RecordWriter};
//! use findkmer::run::analyze_bytes;
//!
//! let analysis = analyze_bytes(b"AANAA", KmerLength::new(2)?)?;
//! let mut writer = RecordWriter::new(Vec::new(), OutputFormat::Csv);
//! analysis.write(&mut writer, &RecordFilter::default())?;
//!
//! let csv = String::from_utf8(writer.into_inner())?;
//! assert_eq!(csv.lines().nth(1), Some("AA, 0.000000, 0.000000, 2, NA"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `gzip`: read `.gz` files transparently
//! - `mmap`: memory-mapped input via [`run::analyze_mmap`]
//! - `production`: both of the above

pub mod base;
pub mod builder;
pub mod cli;
pub mod composition;
pub mod config;
pub mod error;
pub mod estimate;
pub mod histogram;
pub mod input;
pub mod kmer;
#[cfg(feature = "mmap")]
pub mod mmap;
pub mod output;
pub mod progress;
pub mod run;
pub mod scanner;
pub mod stats;
pub mod trie;
pub mod window;
