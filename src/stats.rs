//! Per-k-mer statistics: Shannon entropy and a binomial Z-score.
//!
//! The Z-score compares the observed frequency `x` of a k-mer against a
//! binomial null model with `n = total_kmers_formed` trials and success
//! probability `p = Π P(base)^count(base)`, the chance that `k` independent
//! positions drawn from the global base composition spell a k-mer with the
//! same base multiset. The normal approximation is only trusted when
//! `n·p ≥ 5` and `n·q ≥ 5`; otherwise the score is [`ZScore::NotApplicable`].

use serde::{Serialize, Serializer};

use crate::{base::Base, composition::NullModel, error::FindKmerError};

/// Minimum expected successes and failures for the normal approximation.
pub const NORMAL_APPROXIMATION_MIN: f64 = 5.0;

/// Per-base occurrence counts inside one k-mer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KmerComposition {
    counts: [u32; 4],
    len: u32,
}

impl KmerComposition {
    /// Tallies the bases of `kmer`.
    #[must_use]
    pub fn of(kmer: &[Base]) -> Self {
        let mut counts = [0_u32; 4];
        for base in kmer {
            counts[base.index()] += 1;
        }
        Self {
            counts,
            len: u32::try_from(kmer.len()).unwrap_or(u32::MAX),
        }
    }

    /// Occurrences of `base`.
    #[must_use]
    pub const fn count(&self, base: Base) -> u32 {
        self.counts[base as usize]
    }

    /// Fraction of positions holding `base`.
    #[must_use]
    pub fn probability(&self, base: Base) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            f64::from(self.count(base)) / f64::from(self.len)
        }
    }

    /// Shannon entropy per position, in bits: `Σ p·log2(1/p)` over bases present.
    #[must_use]
    pub fn entropy(&self) -> f64 {
        Base::ALL
            .iter()
            .map(|&base| self.probability(base))
            .filter(|&p| p > 0.0)
            .map(|p| p * (1.0 / p).log2())
            .sum()
    }

    /// Probability under `model` that k independent positions match this multiset
    /// of bases in order.
    ///
    /// # Errors
    ///
    /// Returns [`FindKmerError::DegenerateComposition`] if a base present in this
    /// k-mer has global probability 0, which means the counting went wrong.
    pub fn expected_proportion(&self, model: &NullModel) -> Result<f64, FindKmerError> {
        let mut proportion = 1.0_f64;
        for base in Base::ALL {
            let count = self.count(base);
            if count == 0 {
                continue;
            }
            let p = model.probability(base);
            if p <= 0.0 {
                return Err(FindKmerError::DegenerateComposition {
                    base: base.to_char(),
                });
            }
            proportion *= p.powi(i32::try_from(count).unwrap_or(i32::MAX));
        }
        Ok(proportion)
    }
}

/// A Z-score, or the marker for an invalid normal approximation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZScore {
    Score(f64),
    NotApplicable,
}

impl ZScore {
    /// Marker written in text output when no score is reported.
    pub const NOT_APPLICABLE: &'static str = "NA";

    /// The score, if one is reported.
    #[must_use]
    pub const fn value(self) -> Option<f64> {
        match self {
            Self::Score(z) => Some(z),
            Self::NotApplicable => None,
        }
    }

    /// Whether a score is reported.
    #[must_use]
    pub const fn is_applicable(self) -> bool {
        matches!(self, Self::Score(_))
    }
}

impl Serialize for ZScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Score(z) => serializer.serialize_some(z),
            Self::NotApplicable => serializer.serialize_none(),
        }
    }
}

/// Binomial parameters for one k-mer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Binomial {
    /// Trials.
    pub n: f64,
    /// Success probability.
    pub p: f64,
}

impl Binomial {
    /// Expected successes, `n·p`.
    #[must_use]
    pub fn mean(&self) -> f64 {
        self.n * self.p
    }

    /// `sqrt(n·p·q)`.
    #[must_use]
    pub fn std_dev(&self) -> f64 {
        (self.n * self.p * (1.0 - self.p)).sqrt()
    }

    /// Whether `n·p ≥ 5` and `n·q ≥ 5`.
    #[must_use]
    pub fn normal_approximation_holds(&self) -> bool {
        self.n * self.p >= NORMAL_APPROXIMATION_MIN
            && self.n * (1.0 - self.p) >= NORMAL_APPROXIMATION_MIN
    }

    /// Standardized deviation of `observed` from the mean, gated on the
    /// normal approximation.
    #[must_use]
    pub fn z_score(&self, observed: f64) -> ZScore {
        if self.normal_approximation_holds() {
            ZScore::Score((observed - self.mean()) / self.std_dev())
        } else {
            ZScore::NotApplicable
        }
    }
}

/// One row of the histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KmerRecord {
    /// The k-mer.
    pub sequence: String,
    /// Shannon entropy per position, `h`.
    pub entropy_h: f64,
    /// Shannon entropy of the whole k-mer, `H = h·k`.
    pub entropy_total: f64,
    /// Observed occurrences.
    pub frequency: u32,
    /// Z-score against the null model.
    pub z_score: ZScore,
}

impl KmerRecord {
    /// Computes the statistics for `kmer`, observed `frequency` times.
    ///
    /// # Errors
    ///
    /// Returns [`FindKmerError::DegenerateComposition`] if `kmer` contains a base
    /// the null model never saw.
    pub fn compute(kmer: &[Base], frequency: u32, model: &NullModel) -> Result<Self, FindKmerError> {
        let composition = KmerComposition::of(kmer);
        let entropy_h = composition.entropy();
        let binomial = Binomial {
            n: model.total_kmers_formed() as f64,
            p: composition.expected_proportion(model)?,
        };

        Ok(Self {
            sequence: crate::kmer::kmer_to_string(kmer),
            entropy_h,
            entropy_total: entropy_h * kmer.len() as f64,
            frequency,
            z_score: binomial.z_score(f64::from(frequency)),
        })
    }
}
