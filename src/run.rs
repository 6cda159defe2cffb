//! Histogram construction and output.
//!
//! This module ties the pipeline together: open the input, scan it into a
//! trie, then traverse the trie and write one record per distinct k-mer.

use std::{
    fs::File,
    io::{stdout, BufRead, BufWriter, Write},
};

use tracing::{info, warn};

use crate::{
    config::{Config, OutputTarget},
    error::FindKmerError,
    estimate::{human_bytes, ResourceEstimate},
    histogram::{Analysis, HistogramSummary},
    kmer::KmerLength,
    output::RecordWriter,
    scanner::{scan, scan_into, scan_slice, Scanner},
};

/// Runs one complete histogram job as described by `config`.
///
/// # Errors
///
/// Returns [`FindKmerError`] on read, scan, statistics, or write failure.
pub fn run(config: &Config) -> Result<HistogramSummary, FindKmerError> {
    let estimate = ResourceEstimate::for_k(config.k);
    info!(k = %config.k, "{estimate}");
    if !estimate.fits(config.memory_budget_bytes) {
        warn!(
            worst_case = %human_bytes(estimate.ram_bytes),
            budget = %human_bytes(u128::from(config.memory_budget_bytes)),
            "worst-case trie exceeds the memory budget; the scan aborts if the budget is reached"
        );
    }

    let reader = config.input.open()?;
    let scanner = Scanner::with_node_limit(config.k, config.node_limit());
    let analysis = Analysis::from(scan_into(reader, scanner, &config.input, |_| {})?);

    let summary = match &config.output {
        OutputTarget::Stdout => write_analysis(&analysis, stdout().lock(), config)?,
        OutputTarget::File(path) => {
            let file = File::create(path).map_err(|source| FindKmerError::OutputOpen {
                source,
                path: path.clone(),
            })?;
            write_analysis(&analysis, file, config)?
        }
    };
    info!(output = %config.output, "wrote {} records", summary.emitted);
    Ok(summary)
}

fn write_analysis<W: Write>(
    analysis: &Analysis,
    out: W,
    config: &Config,
) -> Result<HistogramSummary, FindKmerError> {
    let mut writer = RecordWriter::new(BufWriter::new(out), config.format);
    let summary = analysis.write(&mut writer, &config.filter)?;
    writer.into_inner().flush()?;
    Ok(summary)
}

/// Scans a reader and returns the completed analysis.
///
/// # Errors
///
/// Returns [`FindKmerError::EmptyInput`] for an empty reader, and propagates
/// read and trie failures.
///
/// # Example
///
/// ```rust
/// use findkmer::kmer::KmerLength;
/// use findkmer::run::analyze_reader;
///
/// let analysis = analyze_reader(&b">id1\nAANAA\n"[..], KmerLength::new(2)?)?;
/// assert_eq!(analysis.total_kmers_formed(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn analyze_reader<R: BufRead>(reader: R, k: KmerLength) -> Result<Analysis, FindKmerError> {
    scan(reader, k, "<reader>").map(Analysis::from)
}

/// Scans an in-memory buffer and returns the completed analysis.
///
/// # Errors
///
/// Returns [`FindKmerError::EmptyInput`] for an empty buffer, and propagates
/// trie failures.
pub fn analyze_bytes(bytes: &[u8], k: KmerLength) -> Result<Analysis, FindKmerError> {
    scan_slice(bytes, k).map(Analysis::from)
}

/// Scans a memory-mapped file and returns the completed analysis.
///
/// # Errors
///
/// Returns [`FindKmerError::MmapError`] if the file cannot be mapped, and
/// [`FindKmerError::EmptyInput`] if it is empty.
///
/// # Example
///
/// ```rust,no_run
/// use findkmer::kmer::KmerLength;
/// use findkmer::run::analyze_mmap;
///
/// let analysis = analyze_mmap("genome.fa", KmerLength::new(7)?)?;
/// println!("{} k-mers", analysis.total_kmers_formed());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[cfg(feature = "mmap")]
pub fn analyze_mmap<P: AsRef<std::path::Path>>(
    path: P,
    k: KmerLength,
) -> Result<Analysis, FindKmerError> {
    crate::mmap::MmapInput::open(path)?
        .scan(k)
        .map(Analysis::from)
}
