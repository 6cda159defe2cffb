//! Memory-mapped sequence input.
//!
//! The scanner walks the mapped bytes directly instead of copying them
//! through a read buffer. Empty files are rejected before mapping.
//!
//! # Example
//!
//! ```rust,no_run
//! use findkmer::kmer::KmerLength;
//! use findkmer::mmap::MmapInput;
//!
//! let input = MmapInput::open("genome.fa")?;
//! let outcome = input.scan(KmerLength::new(7)?)?;
//! println!("{} k-mers from {} bytes", outcome.total_kmers_formed(), input.byte_len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Safety
//!
//! Memory mapping relies on the underlying file not being modified while
//! the mapping is active. Modifying a mapped file leads to undefined behavior.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use memmap2::Mmap;
use tracing::info;

use crate::{
    error::FindKmerError,
    kmer::KmerLength,
    scanner::{scan_into, ScanOutcome, Scanner},
};

/// A non-empty, read-only mapped sequence file.
pub struct MmapInput {
    mmap: Mmap,
    path: PathBuf,
}

impl MmapInput {
    /// Opens and maps `path`.
    ///
    /// # Errors
    ///
    /// - [`FindKmerError::MmapError`] if the file cannot be opened or mapped.
    /// - [`FindKmerError::EmptyInput`] if the file has no bytes.
    #[allow(unsafe_code)]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, FindKmerError> {
        let path = path.as_ref().to_path_buf();
        let mmap_error = |source| FindKmerError::MmapError {
            source,
            path: path.clone(),
        };

        let file = File::open(&path).map_err(mmap_error)?;
        if file.metadata().map_err(mmap_error)?.len() == 0 {
            return Err(FindKmerError::EmptyInput {
                source_name: path.display().to_string(),
            });
        }
        // SAFETY: the file must not be modified while mapped; documented above.
        let mmap = unsafe { Mmap::map(&file) }.map_err(mmap_error)?;
        Ok(Self { mmap, path })
    }

    /// The mapped file contents.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.mmap
    }

    /// Mapped length in bytes. Never zero.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.mmap.len()
    }

    /// The path this mapping was opened from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scans the mapped bytes, naming the file in logs and errors.
    ///
    /// # Errors
    ///
    /// Propagates trie insertion failures.
    pub fn scan(&self, k: KmerLength) -> Result<ScanOutcome, FindKmerError> {
        self.scan_with(Scanner::new(k))
    }

    /// Scans the mapped bytes with a caller-built scanner.
    ///
    /// # Errors
    ///
    /// Propagates trie insertion failures.
    pub fn scan_with(&self, scanner: Scanner) -> Result<ScanOutcome, FindKmerError> {
        info!(
            path = %self.path.display(),
            bytes = self.mmap.len(),
            "scanning memory-mapped input"
        );
        scan_into(self.as_bytes(), scanner, self.path.display(), |_| {})
    }
}
