//! Sliding window over the most recent in-sequence bases.

use crate::{base::Base, kmer::KmerLength};

/// What a push did to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The run is still shorter than k.
    Filling,
    /// The run just reached exactly k: the first complete k-mer of this run.
    FirstKmer,
    /// The run is longer than k: the window slid by one base.
    Sliding,
}

impl Advance {
    /// Whether the window now holds a complete k-mer.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        !matches!(self, Self::Filling)
    }
}

/// The last `k` bases of the current run, oldest first.
///
/// `run_len` is authoritative: after [`reset`](Self::reset) the stored bases are
/// stale, and are only read again once `run_len` has climbed back to k, by which
/// point every slot has been overwritten.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    bases: Box<[Base]>,
    run_len: u64,
}

impl SlidingWindow {
    /// Creates an empty window for k-mers of length `k`.
    #[must_use]
    pub fn new(k: KmerLength) -> Self {
        Self {
            bases: vec![Base::A; k.get()].into_boxed_slice(),
            run_len: 0,
        }
    }

    /// Drops the oldest base and appends `base`.
    pub fn push(&mut self, base: Base) -> Advance {
        self.bases.rotate_left(1);
        if let Some(last) = self.bases.last_mut() {
            *last = base;
        }
        self.run_len += 1;

        let k = self.bases.len() as u64;
        match self.run_len.cmp(&k) {
            std::cmp::Ordering::Less => Advance::Filling,
            std::cmp::Ordering::Equal => Advance::FirstKmer,
            std::cmp::Ordering::Greater => Advance::Sliding,
        }
    }

    /// Breaks the current run.
    pub fn reset(&mut self) {
        self.run_len = 0;
    }

    /// Number of consecutive valid bases in the current run.
    #[must_use]
    pub const fn run_len(&self) -> u64 {
        self.run_len
    }

    /// Whether the window holds a complete k-mer.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.run_len >= self.bases.len() as u64
    }

    /// The window contents, oldest first. Only meaningful when [`is_full`](Self::is_full).
    #[must_use]
    pub fn as_slice(&self) -> &[Base] {
        &self.bases
    }

    /// The most recently pushed base.
    #[must_use]
    pub fn newest(&self) -> Option<Base> {
        self.bases.last().copied()
    }
}
