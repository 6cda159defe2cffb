//! K-mer length validation and k-mer rendering.

use crate::{base::Base, error::KmerLengthError};

/// Minimum supported k-mer length.
pub const MIN_K: u8 = 1;

/// Maximum supported k-mer length.
///
/// The trie holds up to `1 + 4 + ... + 4^k` nodes and traversal recurses `k`
/// levels deep, so both memory and stack depth are bounded by this constant.
pub const MAX_K: u8 = 20;

/// A validated k-mer length in `MIN_K..=MAX_K`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KmerLength(usize);

impl KmerLength {
    /// Validates `k`.
    ///
    /// # Errors
    ///
    /// Returns [`KmerLengthError`] if `k` is zero or larger than [`MAX_K`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use findkmer::kmer::KmerLength;
    ///
    /// let k = KmerLength::new(7)?;
    /// assert_eq!(k.get(), 7);
    /// assert!(KmerLength::new(0).is_err());
    /// assert!(KmerLength::new(21).is_err());
    /// # Ok::<(), findkmer::error::KmerLengthError>(())
    /// ```
    pub fn new(k: usize) -> Result<Self, KmerLengthError> {
        if (usize::from(MIN_K)..=usize::from(MAX_K)).contains(&k) {
            Ok(Self(k))
        } else {
            Err(KmerLengthError {
                k: i64::try_from(k).unwrap_or(i64::MAX),
                min: MIN_K,
                max: MAX_K,
            })
        }
    }

    /// The length as a `usize`.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl TryFrom<i64> for KmerLength {
    type Error = KmerLengthError;

    fn try_from(k: i64) -> Result<Self, Self::Error> {
        usize::try_from(k)
            .map_err(|_| KmerLengthError {
                k,
                min: MIN_K,
                max: MAX_K,
            })
            .and_then(Self::new)
    }
}

impl std::fmt::Display for KmerLength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Renders a path of bases as an uppercase string.
#[must_use]
pub fn kmer_to_string(bases: &[Base]) -> String {
    bases.iter().map(|b| b.to_char()).collect()
}
