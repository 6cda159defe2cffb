//! Worst-case resource estimates for a given k.
//!
//! Both the trie and the output grow as `4^k` in the worst case, when every
//! possible k-mer is observed. The estimate is a pre-flight check for callers;
//! the trie itself enforces the node budget while it is built.

use crate::{kmer::KmerLength, trie};

const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * MIB;

/// Bytes per output row beyond the k-mer itself: two entropies, a frequency,
/// a Z-score and the separators.
const ROW_OVERHEAD: u128 = 48;

/// Worst-case resource usage for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceEstimate {
    /// `1 + 4 + ... + 4^k`.
    pub max_nodes: u128,
    /// `max_nodes` times the size of one trie node.
    pub ram_bytes: u128,
    /// `4^k`.
    pub max_records: u128,
    /// Output size if every record is written as CSV.
    pub disk_bytes: u128,
}

impl ResourceEstimate {
    /// Computes the estimate for `k`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use findkmer::estimate::ResourceEstimate;
    /// use findkmer::kmer::KmerLength;
    ///
    /// let estimate = ResourceEstimate::for_k(KmerLength::new(2)?);
    /// assert_eq!(estimate.max_nodes, 21);
    /// assert_eq!(estimate.max_records, 16);
    /// # Ok::<(), findkmer::error::KmerLengthError>(())
    /// ```
    #[must_use]
    pub fn for_k(k: KmerLength) -> Self {
        let k = k.get();
        let max_nodes = trie::max_nodes(k);
        let max_records = 4_u128.pow(u32::try_from(k).unwrap_or(u32::MAX));
        Self {
            max_nodes,
            ram_bytes: max_nodes * trie::NODE_SIZE as u128,
            max_records,
            disk_bytes: max_records * (k as u128 + ROW_OVERHEAD),
        }
    }

    /// Whether the worst-case trie fits in `budget_bytes`.
    #[must_use]
    pub const fn fits(&self, budget_bytes: u64) -> bool {
        self.ram_bytes <= budget_bytes as u128
    }
}

/// Converts a memory budget into a trie node limit.
#[must_use]
pub fn node_budget(budget_bytes: u64) -> usize {
    let nodes = budget_bytes / trie::NODE_SIZE as u64;
    usize::try_from(nodes).unwrap_or(usize::MAX).max(1)
}

/// Renders a byte count in MiB or GiB.
#[must_use]
pub fn human_bytes(bytes: u128) -> String {
    let bytes = bytes as f64;
    if bytes >= GIB {
        format!("{:.2} GiB", bytes / GIB)
    } else {
        format!("{:.2} MiB", bytes / MIB)
    }
}

impl std::fmt::Display for ResourceEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of disk usage and {} of RAM usage at most",
            human_bytes(self.disk_bytes),
            human_bytes(self.ram_bytes)
        )
    }
}
