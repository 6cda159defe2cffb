//! K-mer histogram traversal.
//!
//! An [`Analysis`] pairs a completed trie with the null model frozen at the end
//! of the scan. Writing it walks the trie depth-first in A, C, G, T order,
//! computes each k-mer's [`KmerRecord`], and hands the records that pass the
//! [`RecordFilter`] to a [`RecordSink`]. The trie is never mutated, so an
//! analysis can be written any number of times with identical results.
//!
//! # Example
//!
//! ```rust
//! use findkmer::histogram::{Analysis, RecordFilter};
//! use findkmer::kmer::KmerLength;
//! use findkmer::scanner::scan_slice;
//!
//! let analysis = Analysis::from(scan_slice(b">id1\nACGTACGT\n", KmerLength::new(2)?)?);
//! let records = analysis.records(&RecordFilter::default())?;
//!
//! let counts: Vec<_> = records.iter().map(|r| (r.sequence.as_str(), r.frequency)).collect();
//! assert_eq!(counts, vec![("AC", 2), ("CG", 2), ("GT", 2), ("TA", 1)]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;

use tracing::{info, info_span};

use crate::{
    composition::NullModel,
    error::FindKmerError,
    kmer::KmerLength,
    output::RecordSink,
    scanner::ScanOutcome,
    stats::KmerRecord,
    trie::KmerTrie,
};

/// Frequency spectrum: maps a frequency to the number of distinct k-mers seen that often.
///
/// Uses `BTreeMap` for ascending iteration.
pub type FrequencySpectrum = BTreeMap<u32, u64>;

/// Which records reach the sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordFilter {
    /// Minimum frequency (inclusive).
    pub min_count: u32,
    /// When set, only records with a reported Z-score at or above this value.
    pub z_threshold: Option<f64>,
}

impl Default for RecordFilter {
    fn default() -> Self {
        Self {
            min_count: 1,
            z_threshold: None,
        }
    }
}

impl RecordFilter {
    /// Whether `record` passes.
    #[must_use]
    pub fn accepts(&self, record: &KmerRecord) -> bool {
        if record.frequency < self.min_count {
            return false;
        }
        match self.z_threshold {
            Some(threshold) => record.z_score.value().is_some_and(|z| z >= threshold),
            None => true,
        }
    }

    /// Whether this filter can drop records.
    #[must_use]
    pub const fn is_filtering(&self) -> bool {
        self.min_count > 1 || self.z_threshold.is_some()
    }
}

/// Summary of one traversal.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HistogramSummary {
    /// Distinct k-mers in the trie.
    pub distinct_kmers: u64,
    /// Sum of all k-mer frequencies; equals the number of k-mers formed.
    pub total_kmers: u64,
    /// Highest single k-mer frequency.
    pub max_frequency: u32,
    /// Average frequency per distinct k-mer.
    pub mean_frequency: f64,
    /// Records whose Z-score passed the normal-approximation check.
    pub z_reported: u64,
    /// Records handed to the sink after filtering.
    pub emitted: u64,
}

impl HistogramSummary {
    fn observe(&mut self, record: &KmerRecord) {
        self.distinct_kmers += 1;
        self.total_kmers += u64::from(record.frequency);
        self.max_frequency = self.max_frequency.max(record.frequency);
        if record.z_score.is_applicable() {
            self.z_reported += 1;
        }
    }

    fn close(&mut self) {
        self.mean_frequency = if self.distinct_kmers > 0 {
            self.total_kmers as f64 / self.distinct_kmers as f64
        } else {
            0.0
        };
    }
}

/// A completed scan, ready to be traversed.
#[derive(Debug, Clone)]
pub struct Analysis {
    trie: KmerTrie,
    model: NullModel,
    records_scanned: u64,
    bytes_scanned: u64,
}

impl From<ScanOutcome> for Analysis {
    fn from(outcome: ScanOutcome) -> Self {
        let records_scanned = outcome.records();
        let bytes_scanned = outcome.bytes_scanned();
        let (trie, model) = outcome.into_parts();
        Self {
            trie,
            model,
            records_scanned,
            bytes_scanned,
        }
    }
}

impl Analysis {
    /// The k-mer length.
    #[must_use]
    pub const fn k(&self) -> KmerLength {
        self.trie.k()
    }

    /// The completed trie.
    #[must_use]
    pub const fn trie(&self) -> &KmerTrie {
        &self.trie
    }

    /// The null model.
    #[must_use]
    pub const fn model(&self) -> &NullModel {
        &self.model
    }

    /// Window positions that formed a complete k-mer.
    #[must_use]
    pub const fn total_kmers_formed(&self) -> u64 {
        self.model.total_kmers_formed()
    }

    /// Identifier lines seen during the scan.
    #[must_use]
    pub const fn records_scanned(&self) -> u64 {
        self.records_scanned
    }

    /// Input bytes consumed by the scan.
    #[must_use]
    pub const fn bytes_scanned(&self) -> u64 {
        self.bytes_scanned
    }

    /// Traverses the trie and writes every accepted record to `sink`.
    ///
    /// # Errors
    ///
    /// Fails on a degenerate null model or on a sink error; the sink may then
    /// hold a partial histogram, which must not be used.
    pub fn write<S>(&self, sink: &mut S, filter: &RecordFilter) -> Result<HistogramSummary, FindKmerError>
    where
        S: RecordSink + ?Sized,
    {
        let _span = info_span!("traverse", k = %self.k(), nodes = self.trie.node_count()).entered();

        let mut summary = HistogramSummary::default();
        sink.begin()?;
        self.trie.for_each_kmer(|kmer, frequency| {
            let record = KmerRecord::compute(kmer, frequency, &self.model)?;
            summary.observe(&record);
            if filter.accepts(&record) {
                sink.write_record(&record)?;
                summary.emitted += 1;
            }
            Ok::<(), FindKmerError>(())
        })?;
        sink.finish()?;
        summary.close();

        info!(
            distinct = summary.distinct_kmers,
            total = summary.total_kmers,
            z_reported = summary.z_reported,
            emitted = summary.emitted,
            "histogram complete"
        );
        Ok(summary)
    }

    /// Collects the accepted records.
    pub fn records(&self, filter: &RecordFilter) -> Result<Vec<KmerRecord>, FindKmerError> {
        let mut records = Vec::new();
        self.write(&mut records, filter)?;
        Ok(records)
    }

    /// Traverses without emitting anything, returning the summary only.
    pub fn summary(&self) -> Result<HistogramSummary, FindKmerError> {
        struct Discard;
        impl RecordSink for Discard {
            fn write_record(&mut self, _: &KmerRecord) -> Result<(), FindKmerError> {
                Ok(())
            }
        }
        self.write(&mut Discard, &RecordFilter::default())
    }

    /// Counts how many distinct k-mers occur at each frequency.
    #[must_use]
    pub fn frequency_spectrum(&self) -> FrequencySpectrum {
        let mut spectrum = FrequencySpectrum::new();
        self.trie
            .for_each_kmer(|_, frequency| {
                *spectrum.entry(frequency).or_insert(0) += 1;
                Ok::<(), std::convert::Infallible>(())
            })
            .unwrap_or_else(|never| match never {});
        spectrum
    }
}
