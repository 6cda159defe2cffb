//! Streaming sequence scanner.
//!
//! The scanner consumes the input one byte at a time and drives the sliding
//! window, the base composition and the trie. It is a two-state machine:
//!
//! - `Scanning`: newlines are transparent; a base extends the current run; `>`
//!   breaks the run and enters `InIdentifierLine`; any other byte breaks the run.
//! - `InIdentifierLine`: bytes are collected (for logging) until a newline,
//!   which returns the scanner to `Scanning`.
//!
//! Every window position whose run length has reached k inserts the window
//! into the trie. End-of-stream simply stops; there are no partial k-mers.

use std::{
    fmt::Display,
    io::{BufRead, ErrorKind},
    path::PathBuf,
};

use tracing::{debug, info, info_span};

use crate::{
    base::{encode, Symbol},
    composition::{BaseComposition, NullModel},
    error::FindKmerError,
    kmer::KmerLength,
    progress::Progress,
    trie::KmerTrie,
    window::{Advance, SlidingWindow},
};

/// Longest identifier prefix retained for logging.
const IDENTIFIER_CAPACITY: usize = 256;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Scanning,
    InIdentifierLine,
}

/// What a single byte did to the scanner, beyond updating its counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    /// A `>` opened an identifier line.
    IdentifierStarted,
    /// A newline closed an identifier line.
    IdentifierEnded,
}

/// Byte-at-a-time k-mer scanner.
#[derive(Debug)]
pub struct Scanner {
    k: KmerLength,
    state: ScanState,
    window: SlidingWindow,
    trie: KmerTrie,
    composition: BaseComposition,
    total_valid_bases: u64,
    total_kmers_formed: u64,
    records: u64,
    bytes_scanned: u64,
    identifier: Vec<u8>,
}

impl Scanner {
    /// Creates a scanner with an unbounded trie.
    #[must_use]
    pub fn new(k: KmerLength) -> Self {
        Self::with_trie(KmerTrie::new(k))
    }

    /// Creates a scanner whose trie may hold at most `node_limit` nodes.
    #[must_use]
    pub fn with_node_limit(k: KmerLength, node_limit: usize) -> Self {
        Self::with_trie(KmerTrie::with_node_limit(k, node_limit))
    }

    fn with_trie(trie: KmerTrie) -> Self {
        let k = trie.k();
        Self {
            k,
            state: ScanState::Scanning,
            window: SlidingWindow::new(k),
            trie,
            composition: BaseComposition::new(),
            total_valid_bases: 0,
            total_kmers_formed: 0,
            records: 0,
            bytes_scanned: 0,
            identifier: Vec::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ScanState {
        self.state
    }

    /// Consumes one input byte.
    ///
    /// # Errors
    ///
    /// Propagates trie insertion failures (counter overflow, node limit).
    pub fn feed(&mut self, byte: u8) -> Result<Transition, FindKmerError> {
        self.bytes_scanned += 1;

        if self.state == ScanState::InIdentifierLine {
            if byte == b'\n' {
                self.state = ScanState::Scanning;
                return Ok(Transition::IdentifierEnded);
            }
            if self.identifier.len() < IDENTIFIER_CAPACITY {
                self.identifier.push(byte);
            }
            return Ok(Transition::None);
        }

        if byte == b'\n' {
            return Ok(Transition::None);
        }

        match encode(byte) {
            Symbol::Base(base) => {
                match self.window.push(base) {
                    Advance::Filling => return Ok(Transition::None),
                    Advance::FirstKmer => {
                        self.composition.credit_all(self.window.as_slice());
                        self.total_valid_bases += self.k.get() as u64;
                    }
                    Advance::Sliding => {
                        self.composition.credit(base);
                        self.total_valid_bases += 1;
                    }
                }
                self.trie.insert(self.window.as_slice())?;
                self.total_kmers_formed += 1;
                Ok(Transition::None)
            }
            Symbol::Ambiguous => {
                self.window.reset();
                Ok(Transition::None)
            }
            Symbol::IdentifierStart => {
                self.window.reset();
                self.state = ScanState::InIdentifierLine;
                self.identifier.clear();
                self.records += 1;
                Ok(Transition::IdentifierStarted)
            }
        }
    }

    /// The identifier line currently or most recently being read, without `>`.
    #[must_use]
    pub fn identifier(&self) -> &[u8] {
        &self.identifier
    }

    /// A snapshot of the scan so far.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        Progress {
            records: self.records,
            bytes_scanned: self.bytes_scanned,
            kmers_formed: self.total_kmers_formed,
        }
    }

    /// Ends the scan, freezing all counters.
    #[must_use]
    pub fn finish(self) -> ScanOutcome {
        ScanOutcome {
            trie: self.trie,
            composition: self.composition,
            total_valid_bases: self.total_valid_bases,
            total_kmers_formed: self.total_kmers_formed,
            records: self.records,
            bytes_scanned: self.bytes_scanned,
        }
    }
}

/// Everything the scan produced. Read-only from here on.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    trie: KmerTrie,
    composition: BaseComposition,
    total_valid_bases: u64,
    total_kmers_formed: u64,
    records: u64,
    bytes_scanned: u64,
}

impl ScanOutcome {
    /// The completed trie.
    #[must_use]
    pub const fn trie(&self) -> &KmerTrie {
        &self.trie
    }

    /// Raw base composition counts.
    #[must_use]
    pub const fn composition(&self) -> &BaseComposition {
        &self.composition
    }

    /// Bases that contributed to at least one k-mer.
    #[must_use]
    pub const fn total_valid_bases(&self) -> u64 {
        self.total_valid_bases
    }

    /// Window positions that formed a complete k-mer.
    #[must_use]
    pub const fn total_kmers_formed(&self) -> u64 {
        self.total_kmers_formed
    }

    /// Identifier lines seen.
    #[must_use]
    pub const fn records(&self) -> u64 {
        self.records
    }

    /// Input bytes consumed.
    #[must_use]
    pub const fn bytes_scanned(&self) -> u64 {
        self.bytes_scanned
    }

    /// The null model built from the final composition.
    #[must_use]
    pub fn null_model(&self) -> NullModel {
        self.composition
            .finalize(self.total_valid_bases, self.total_kmers_formed)
    }

    /// Splits into the trie and the null model.
    #[must_use]
    pub fn into_parts(self) -> (KmerTrie, NullModel) {
        let model = self.null_model();
        (self.trie, model)
    }
}

/// Scans a reader to exhaustion.
///
/// `source_name` identifies the input in errors and logs.
///
/// # Errors
///
/// - [`FindKmerError::EmptyInput`] if the first read returns no bytes.
/// - [`FindKmerError::SequenceRead`] on I/O failure.
/// - Trie insertion failures.
///
/// # Example
///
/// ```rust
/// use findkmer::kmer::KmerLength;
/// use findkmer::scanner::scan;
///
/// let outcome = scan(&b">id1\nACGTACGT\n"[..], KmerLength::new(2)?, "inline")?;
/// assert_eq!(outcome.total_kmers_formed(), 7);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn scan<R, S>(reader: R, k: KmerLength, source_name: S) -> Result<ScanOutcome, FindKmerError>
where
    R: BufRead,
    S: Display,
{
    scan_into(reader, Scanner::new(k), source_name, |_| {})
}

/// Scans a reader, calling `on_progress` at every record boundary and at the end.
pub fn scan_with_progress<R, S, F>(
    reader: R,
    k: KmerLength,
    source_name: S,
    on_progress: F,
) -> Result<ScanOutcome, FindKmerError>
where
    R: BufRead,
    S: Display,
    F: FnMut(Progress),
{
    scan_into(reader, Scanner::new(k), source_name, on_progress)
}

/// Scans a reader with a caller-built scanner.
pub fn scan_into<R, S, F>(
    mut reader: R,
    mut scanner: Scanner,
    source_name: S,
    mut on_progress: F,
) -> Result<ScanOutcome, FindKmerError>
where
    R: BufRead,
    S: Display,
    F: FnMut(Progress),
{
    let _span = info_span!("scan", source = %source_name, k = %scanner.k).entered();

    let read_error = |source: std::io::Error| FindKmerError::SequenceRead {
        source,
        path: PathBuf::from(source_name.to_string()),
    };

    let mut first_read = true;
    loop {
        let chunk = match reader.fill_buf() {
            Ok(chunk) => chunk,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(read_error(e)),
        };
        if chunk.is_empty() {
            if first_read {
                return Err(FindKmerError::EmptyInput {
                    source_name: source_name.to_string(),
                });
            }
            break;
        }
        first_read = false;

        let len = chunk.len();
        for &byte in chunk {
            if scanner.feed(byte)? == Transition::IdentifierEnded {
                debug!(
                    record = scanner.records,
                    identifier = %String::from_utf8_lossy(scanner.identifier()),
                    "identifier line"
                );
                on_progress(scanner.progress());
            }
        }
        reader.consume(len);
    }

    on_progress(scanner.progress());
    let outcome = scanner.finish();
    info!(
        records = outcome.records,
        bytes = outcome.bytes_scanned,
        valid_bases = outcome.total_valid_bases,
        kmers = outcome.total_kmers_formed,
        nodes = outcome.trie.node_count(),
        "scan complete"
    );
    Ok(outcome)
}

/// Scans an in-memory buffer.
///
/// # Errors
///
/// Returns [`FindKmerError::EmptyInput`] for an empty slice, and propagates trie
/// insertion failures.
pub fn scan_slice(bytes: &[u8], k: KmerLength) -> Result<ScanOutcome, FindKmerError> {
    scan_into(bytes, Scanner::new(k), "<memory>", |_| {})
}
