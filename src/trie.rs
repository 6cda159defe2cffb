//! Depth-k 4-ary trie accumulating k-mer occurrence counts.
//!
//! Nodes live in a single arena (`Vec<Node>`) and refer to their children by
//! index, so dropping the trie is one deallocation regardless of depth and no
//! node is ever shared between two parents. Index 0 is always the root.
//!
//! # Frequencies
//!
//! A node at depth `d` counts the insertions that passed through its
//! `d`-length prefix; the node at depth `k` therefore holds the exact
//! occurrence count of its k-mer.

use std::num::NonZeroU32;

use crate::{
    base::Base,
    error::FindKmerError,
    kmer::{kmer_to_string, KmerLength},
};

/// Index of a non-root node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(NonZeroU32);

impl NodeId {
    const fn index(self) -> usize {
        self.0.get() as usize
    }
}

/// What a node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The synthetic head at depth 0.
    Root,
    /// A base at depth 1..=k.
    Base(Base),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    children: [Option<NodeId>; 4],
    frequency: u32,
}

impl Node {
    const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: [None; 4],
            frequency: 1,
        }
    }
}

/// Size in bytes of one trie node, used by the resource estimate.
pub const NODE_SIZE: usize = std::mem::size_of::<Node>();

/// Largest node count addressable by the arena.
const ARENA_LIMIT: usize = u32::MAX as usize;

/// Worst-case node count for `k`: `1 + 4 + 4^2 + ... + 4^k`.
#[must_use]
pub const fn max_nodes(k: usize) -> u128 {
    let mut total: u128 = 0;
    let mut level: u128 = 1;
    let mut depth = 0;
    while depth <= k {
        total += level;
        level *= 4;
        depth += 1;
    }
    total
}

/// A k-mer counting trie.
#[derive(Debug, Clone)]
pub struct KmerTrie {
    k: KmerLength,
    nodes: Vec<Node>,
    node_limit: usize,
}

impl KmerTrie {
    /// Creates a trie holding only its root.
    #[must_use]
    pub fn new(k: KmerLength) -> Self {
        Self::with_node_limit(k, ARENA_LIMIT)
    }

    /// Creates a trie that refuses to grow past `node_limit` nodes (root included).
    #[must_use]
    pub fn with_node_limit(k: KmerLength, node_limit: usize) -> Self {
        let mut root = Node::new(NodeKind::Root);
        root.frequency = 0;
        Self {
            k,
            nodes: vec![root],
            node_limit: node_limit.clamp(1, ARENA_LIMIT),
        }
    }

    /// The k-mer length this trie was built for.
    #[must_use]
    pub const fn k(&self) -> KmerLength {
        self.k
    }

    /// Nodes allocated so far, root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct k-mers inserted.
    #[must_use]
    pub fn distinct_kmers(&self) -> usize {
        let mut distinct = 0;
        self.for_each_kmer(|_, _| {
            distinct += 1;
            Ok::<(), std::convert::Infallible>(())
        })
        .unwrap_or_else(|never| match never {});
        distinct
    }

    /// Records one occurrence of `kmer`, creating missing nodes along its path.
    ///
    /// # Errors
    ///
    /// - [`FindKmerError::CounterOverflow`] if a frequency would exceed `u32::MAX`.
    ///   Counters on the path before the failing node have already been bumped;
    ///   the trie must be discarded.
    /// - [`FindKmerError::NodeLimit`] if a new node would exceed the node limit.
    /// - [`FindKmerError::Config`] if `kmer.len()` differs from k.
    pub fn insert(&mut self, kmer: &[Base]) -> Result<(), FindKmerError> {
        if kmer.len() != self.k.get() {
            return Err(FindKmerError::Config {
                details: format!(
                    "inserted k-mer has length {} but the trie holds {}-mers",
                    kmer.len(),
                    self.k
                ),
            });
        }

        let mut current = 0;
        for (depth, &base) in kmer.iter().enumerate() {
            let next = self.nodes[current].children[base.index()];
            current = match next {
                Some(child) => {
                    let node = &mut self.nodes[child.index()];
                    node.frequency = node.frequency.checked_add(1).ok_or_else(|| {
                        FindKmerError::CounterOverflow {
                            prefix: kmer_to_string(&kmer[..=depth]),
                            depth: depth + 1,
                        }
                    })?;
                    child.index()
                }
                None => {
                    let child = self.push_node(NodeKind::Base(base))?;
                    self.nodes[current].children[base.index()] = Some(child);
                    child.index()
                }
            };
        }
        Ok(())
    }

    fn push_node(&mut self, kind: NodeKind) -> Result<NodeId, FindKmerError> {
        if self.nodes.len() >= self.node_limit {
            return Err(FindKmerError::NodeLimit {
                limit: self.node_limit,
            });
        }
        let id = u32::try_from(self.nodes.len())
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(FindKmerError::NodeLimit {
                limit: self.node_limit,
            })?;
        if self.nodes.len() == self.nodes.capacity() {
            // Grow geometrically, but never allocate past the node limit.
            let headroom = self.node_limit - self.nodes.len();
            self.nodes.reserve_exact(self.nodes.len().min(headroom).max(1));
        }
        self.nodes.push(Node::new(kind));
        Ok(NodeId(id))
    }

    /// Occurrence count of `kmer`, or 0 if it was never inserted.
    #[must_use]
    pub fn frequency(&self, kmer: &[Base]) -> u32 {
        if kmer.len() != self.k.get() {
            return 0;
        }
        let mut current = 0;
        for &base in kmer {
            match self.nodes[current].children[base.index()] {
                Some(child) => current = child.index(),
                None => return 0,
            }
        }
        self.nodes[current].frequency
    }

    /// Depth-first walk calling `emit(kmer, frequency)` for every k-mer present,
    /// in lexicographic (A, C, G, T) order.
    ///
    /// Recursion depth is bounded by k, which [`KmerLength`] caps at
    /// [`MAX_K`](crate::kmer::MAX_K). The first error returned by `emit` stops the walk.
    pub fn for_each_kmer<E, F>(&self, mut emit: F) -> Result<(), E>
    where
        F: FnMut(&[Base], u32) -> Result<(), E>,
    {
        let mut path = vec![Base::A; self.k.get()];
        self.visit(0, 0, &mut path, &mut emit)
    }

    fn visit<E, F>(&self, id: usize, depth: usize, path: &mut [Base], emit: &mut F) -> Result<(), E>
    where
        F: FnMut(&[Base], u32) -> Result<(), E>,
    {
        let node = &self.nodes[id];
        if let NodeKind::Base(base) = node.kind {
            path[depth - 1] = base;
        }

        for child in node.children.iter().flatten() {
            self.visit(child.index(), depth + 1, path, emit)?;
        }

        if depth == self.k.get() {
            emit(path, node.frequency)?;
        }
        Ok(())
    }

    #[cfg(test)]
    fn set_frequency(&mut self, kmer: &[Base], frequency: u32) {
        let mut current = 0;
        for &base in kmer {
            current = self.nodes[current].children[base.index()]
                .map(NodeId::index)
                .unwrap_or_default();
        }
        self.nodes[current].frequency = frequency;
    }
}
