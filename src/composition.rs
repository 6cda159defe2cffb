//! Global base composition and the null model derived from it.
//!
//! Counts are accumulated during the scan. Once the whole input has been
//! consumed the composition is frozen into a [`NullModel`], which supplies the
//! per-base success probabilities used for expected k-mer frequencies.

use serde::Serialize;

use crate::base::Base;

/// Per-base occurrence counts over every base that took part in a complete k-mer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseComposition {
    counts: [u64; 4],
}

impl BaseComposition {
    /// Creates an empty composition.
    #[must_use]
    pub const fn new() -> Self {
        Self { counts: [0; 4] }
    }

    /// Credits a single base.
    pub fn credit(&mut self, base: Base) {
        self.counts[base.index()] += 1;
    }

    /// Credits every base of a window.
    pub fn credit_all(&mut self, bases: &[Base]) {
        for &base in bases {
            self.credit(base);
        }
    }

    /// The count for `base`.
    #[must_use]
    pub const fn count(&self, base: Base) -> u64 {
        self.counts[base as usize]
    }

    /// All counts, in code order.
    #[must_use]
    pub const fn counts(&self) -> [u64; 4] {
        self.counts
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Freezes the composition into a null model.
    ///
    /// `total_valid_bases` is the denominator for the per-base probabilities and
    /// `total_kmers_formed` is the number of binomial trials `n`.
    #[must_use]
    pub fn finalize(&self, total_valid_bases: u64, total_kmers_formed: u64) -> NullModel {
        let probabilities = if total_valid_bases == 0 {
            [0.0; 4]
        } else {
            self.counts.map(|c| c as f64 / total_valid_bases as f64)
        };
        NullModel {
            counts: self.counts,
            probabilities,
            total_valid_bases,
            total_kmers_formed,
        }
    }
}

/// Finalized base composition: read-only input to every k-mer statistic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NullModel {
    counts: [u64; 4],
    probabilities: [f64; 4],
    total_valid_bases: u64,
    total_kmers_formed: u64,
}

impl NullModel {
    /// Probability that a position holds `base`.
    #[must_use]
    pub const fn probability(&self, base: Base) -> f64 {
        self.probabilities[base as usize]
    }

    /// All probabilities, in code order.
    #[must_use]
    pub const fn probabilities(&self) -> [f64; 4] {
        self.probabilities
    }

    /// Global count for `base`.
    #[must_use]
    pub const fn count(&self, base: Base) -> u64 {
        self.counts[base as usize]
    }

    /// Bases that contributed to at least one k-mer.
    #[must_use]
    pub const fn total_valid_bases(&self) -> u64 {
        self.total_valid_bases
    }

    /// Number of window positions that formed a complete k-mer.
    #[must_use]
    pub const fn total_kmers_formed(&self) -> u64 {
        self.total_kmers_formed
    }
}
