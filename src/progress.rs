//! Progress reporting for long scans.
//!
//! The scanner hands a [`Progress`] snapshot to a caller-supplied callback each
//! time an identifier line ends, and once more when the input is exhausted.
//!
//! # Example
//!
//! ```rust
//! use findkmer::kmer::KmerLength;
//! use findkmer::scanner::scan_with_progress;
//!
//! let mut seen = Vec::new();
//! let input = &b">one\nACGT\n>two\nGGCC\n"[..];
//! let outcome = scan_with_progress(input, KmerLength::new(2)?, "demo", |progress| {
//!     seen.push(progress.records);
//! })?;
//! assert_eq!(outcome.total_kmers_formed(), 6);
//! assert_eq!(seen, vec![1, 2, 2]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Progress snapshot during a scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Identifier lines seen so far.
    pub records: u64,
    /// Input bytes consumed so far.
    pub bytes_scanned: u64,
    /// Complete k-mers inserted so far.
    pub kmers_formed: u64,
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} records, {} bytes, {} k-mers",
            self.records, self.bytes_scanned, self.kmers_formed
        )
    }
}
