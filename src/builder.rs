//! Builder pattern API for ergonomic histogram construction.
//!
//! This module provides a fluent builder interface for configuring and executing
//! a k-mer histogram run.
//!
//! # Example
//!
//! ```rust,no_run
//! use findkmer::builder::KmerHistogram;
//!
//! let records = KmerHistogram::new()
//!     .k(7)?
//!     .z_threshold(2.0)
//!     .records("genome.fa")?;
//!
//! for record in records {
//!     println!("{}: {}", record.sequence, record.frequency);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::{
    io::{BufRead, Write},
    path::Path,
};

use crate::{
    error::{BuilderError, KmerLengthError},
    estimate::node_budget,
    histogram::{Analysis, HistogramSummary, RecordFilter},
    input::Input,
    kmer::KmerLength,
    output::{OutputFormat, RecordWriter},
    progress::Progress,
    scanner::{scan_into, Scanner},
    stats::KmerRecord,
};

/// A builder for configuring histogram runs.
///
/// Use [`KmerHistogram::new()`] to create a new builder, configure it with the
/// fluent API, then call one of the `analyze_*` methods for an [`Analysis`],
/// or [`records()`](KmerHistogram::records) /
/// [`write_to()`](KmerHistogram::write_to) to go straight to output.
#[derive(Debug, Clone)]
pub struct KmerHistogram {
    k: Option<KmerLength>,
    filter: RecordFilter,
    format: OutputFormat,
    node_limit: Option<usize>,
}

impl Default for KmerHistogram {
    fn default() -> Self {
        Self::new()
    }
}

impl KmerHistogram {
    /// Creates a new builder with default settings.
    ///
    /// Default settings:
    /// - `k`: None (must be set before analyzing)
    /// - `min_count`: 1
    /// - `z_threshold`: None
    /// - `format`: CSV
    /// - no trie node limit
    #[must_use]
    pub fn new() -> Self {
        Self {
            k: None,
            filter: RecordFilter::default(),
            format: OutputFormat::Csv,
            node_limit: None,
        }
    }

    /// Sets the k-mer length.
    ///
    /// # Errors
    ///
    /// Returns [`KmerLengthError`] if `k` is outside 1..=20.
    ///
    /// # Example
    ///
    /// ```rust
    /// use findkmer::builder::KmerHistogram;
    ///
    /// let histogram = KmerHistogram::new().k(7)?;
    /// assert!(KmerHistogram::new().k(21).is_err());
    /// # Ok::<(), findkmer::error::KmerLengthError>(())
    /// ```
    pub fn k(mut self, k: usize) -> Result<Self, KmerLengthError> {
        self.k = Some(KmerLength::new(k)?);
        Ok(self)
    }

    /// Sets the k-mer length from a pre-validated `KmerLength`.
    #[must_use]
    pub const fn k_validated(mut self, k: KmerLength) -> Self {
        self.k = Some(k);
        self
    }

    /// Excludes k-mers seen fewer than `min_count` times. Default is 1.
    #[must_use]
    pub const fn min_count(mut self, min_count: u32) -> Self {
        self.filter.min_count = min_count;
        self
    }

    /// Keeps only k-mers whose Z-score was reported and is at least `threshold`.
    #[must_use]
    pub fn z_threshold(mut self, threshold: f64) -> Self {
        self.filter.z_threshold = Some(threshold);
        self
    }

    /// Sets the output format for [`write_to()`](Self::write_to).
    #[must_use]
    pub const fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Caps the trie at `limit` nodes.
    #[must_use]
    pub const fn node_limit(mut self, limit: usize) -> Self {
        self.node_limit = Some(limit);
        self
    }

    /// Caps the trie at roughly `bytes` of memory.
    #[must_use]
    pub fn memory_budget(self, bytes: u64) -> Self {
        self.node_limit(node_budget(bytes))
    }

    /// The configured k-mer length, if set.
    #[must_use]
    pub const fn get_k(&self) -> Option<KmerLength> {
        self.k
    }

    /// The configured record filter.
    #[must_use]
    pub const fn filter(&self) -> &RecordFilter {
        &self.filter
    }

    /// The configured output format.
    #[must_use]
    pub const fn get_format(&self) -> OutputFormat {
        self.format
    }

    fn scanner(&self) -> Result<Scanner, BuilderError> {
        let k = self.k.ok_or(BuilderError::KmerLengthNotSet)?;
        Ok(match self.node_limit {
            Some(limit) => Scanner::with_node_limit(k, limit),
            None => Scanner::new(k),
        })
    }

    /// Scans a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::KmerLengthNotSet`] if `k` was never set, or the
    /// scan failure.
    pub fn analyze_reader<R: BufRead>(&self, reader: R) -> Result<Analysis, BuilderError> {
        self.analyze_with_progress(reader, "<reader>", |_| {})
    }

    /// Scans an in-memory buffer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use findkmer::builder::KmerHistogram;
    ///
    /// let analysis = KmerHistogram::new().k(2)?.analyze_bytes(b">id1\nACGTACGT\n")?;
    /// assert_eq!(analysis.total_kmers_formed(), 7);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn analyze_bytes(&self, bytes: &[u8]) -> Result<Analysis, BuilderError> {
        self.analyze_with_progress(bytes, "<memory>", |_| {})
    }

    /// Scans the file at `path` (`-` for stdin).
    ///
    /// With the `gzip` feature, `.gz` files are decompressed on the fly.
    pub fn analyze_path<P: AsRef<Path>>(&self, path: P) -> Result<Analysis, BuilderError> {
        let input = Input::from_path(path.as_ref());
        let reader = input.open()?;
        self.analyze_with_progress(reader, &input, |_| {})
    }

    /// Scans a reader, reporting [`Progress`] at each record boundary and at the end.
    ///
    /// # Example
    ///
    /// ```rust
    /// use findkmer::builder::KmerHistogram;
    ///
    /// let mut last = None;
    /// KmerHistogram::new()
    ///     .k(3)?
    ///     .analyze_with_progress(&b">a\nACGT\n>b\nTTTT\n"[..], "inline", |p| last = Some(p))?;
    /// assert_eq!(last.map(|p| p.records), Some(2));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn analyze_with_progress<R, S, F>(
        &self,
        reader: R,
        source_name: S,
        on_progress: F,
    ) -> Result<Analysis, BuilderError>
    where
        R: BufRead,
        S: std::fmt::Display,
        F: FnMut(Progress),
    {
        let outcome = scan_into(reader, self.scanner()?, source_name, on_progress)?;
        Ok(Analysis::from(outcome))
    }

    /// Scans `path` and collects the records that pass the filter.
    pub fn records<P: AsRef<Path>>(&self, path: P) -> Result<Vec<KmerRecord>, BuilderError> {
        Ok(self.analyze_path(path)?.records(&self.filter)?)
    }

    /// Scans `path` and writes the histogram to `writer` in the configured format.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use findkmer::builder::KmerHistogram;
    /// use findkmer::output::OutputFormat;
    /// use std::fs::File;
    /// use std::io::BufWriter;
    ///
    /// let writer = BufWriter::new(File::create("histogram.tsv")?);
    /// let summary = KmerHistogram::new()
    ///     .k(5)?
    ///     .format(OutputFormat::Tsv)
    ///     .write_to("genome.fa", writer)?;
    /// println!("{} distinct k-mers", summary.distinct_kmers);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn write_to<P, W>(&self, path: P, writer: W) -> Result<HistogramSummary, BuilderError>
    where
        P: AsRef<Path>,
        W: Write,
    {
        let analysis = self.analyze_path(path)?;
        let mut sink = RecordWriter::new(writer, self.format);
        let summary = analysis.write(&mut sink, &self.filter)?;
        sink.into_inner()
            .flush()
            .map_err(crate::error::FindKmerError::from)?;
        Ok(summary)
    }
}
