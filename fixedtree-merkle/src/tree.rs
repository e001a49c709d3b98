use core::fmt;

use fixedtree_hash::OneBlockHasher;
#[cfg(feature = "parallel")]
use fixedtree_hash::parallel;

use crate::{
    error::FixedMerkleError,
    node::{MerkleNode, NodeIndex},
};

/// Smallest tree: a single leaf that is its own root.
pub(crate) const MIN_HEIGHT: usize = 1;
/// Cap keeping `1 << height` and the arena allocation sane.
pub(crate) const MAX_HEIGHT: usize = 32;

/// Number of leaves in a tree of the given height.
///
/// # Panics
///
/// Heights outside `[1, 32]` are rejected by [`FixedMerkleTree::build`];
/// this helper itself panics on them in debug builds (shift under/overflow).
pub fn leaf_count_for_height(height: usize) -> usize {
    1usize << (height - 1)
}

/// Total node count (`2^h - 1`) for a tree of the given height.
///
/// # Panics
///
/// As for [`leaf_count_for_height`]: debug-panics outside `[1, 32]`.
pub fn node_count_for_height(height: usize) -> usize {
    (1usize << height) - 1
}

/// Required input-buffer length in bytes for a tree of the given height.
///
/// # Panics
///
/// As for [`leaf_count_for_height`]: debug-panics outside `[1, 32]`.
pub fn input_size_for_height<H: OneBlockHasher>(height: usize) -> usize {
    leaf_count_for_height(height) * H::BLOCK_SIZE
}

/// A complete binary Merkle tree of fixed height over one-block hashing.
///
/// Built once from a flat byte buffer of exactly
/// [`input_size_for_height`] bytes; immutable and safe for concurrent
/// readers afterwards. See the crate docs for the flat index order.
#[derive(Debug)]
pub struct FixedMerkleTree<H: OneBlockHasher> {
    height: usize,
    nodes: Vec<MerkleNode<H>>,
}

impl<H: OneBlockHasher> FixedMerkleTree<H> {
    /// Build the tree over `input`, which must hold exactly `2^(height-1)`
    /// blocks of `H::BLOCK_SIZE` bytes.
    ///
    /// Size validation happens synchronously before any hashing; on error no
    /// tree value exists, so a caller holding `Ok` always holds a valid root.
    pub fn build(height: usize, input: &[u8]) -> Result<Self, FixedMerkleError> {
        if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&height) {
            return Err(FixedMerkleError::HeightOutOfRange {
                min: MIN_HEIGHT,
                max: MAX_HEIGHT,
                got: height,
            });
        }
        if input.len() % H::BLOCK_SIZE != 0 {
            return Err(FixedMerkleError::UnalignedInput {
                len: input.len(),
                block_size: H::BLOCK_SIZE,
            });
        }
        let leaves_n = leaf_count_for_height(height);
        let blocks = input.len() / H::BLOCK_SIZE;
        if blocks != leaves_n {
            return Err(FixedMerkleError::BlockCountMismatch {
                expected: leaves_n,
                got: blocks,
                height,
            });
        }

        let mut nodes: Vec<MerkleNode<H>> = Vec::with_capacity(node_count_for_height(height));
        let mut depth = height - 1;

        for digest in hash_leaf_blocks::<H>(input) {
            nodes.push(MerkleNode::new(digest, depth));
        }

        // Pair the previous level left-to-right until one node remains.
        let mut first = 0;
        while nodes.len() - first > 1 {
            depth -= 1;
            let end = nodes.len();
            for (pair, digest) in hash_level_pairs::<H>(&nodes[first..end])
                .into_iter()
                .enumerate()
            {
                let left = first + 2 * pair;
                let right = left + 1;
                let parent = nodes.len();

                let mut node = MerkleNode::new(digest, depth);
                node.set_children(left, right);
                nodes.push(node);
                nodes[left].set_parent(parent);
                nodes[right].set_parent(parent);
            }
            first = end;
        }

        Ok(FixedMerkleTree { height, nodes })
    }

    /// The root digest, valid for the tree's lifetime.
    pub fn digest(&self) -> &[u8] {
        self.root().digest()
    }

    /// The root node.
    pub fn root(&self) -> &MerkleNode<H> {
        // The arena is never empty: build() always produces at least one node.
        &self.nodes[self.nodes.len() - 1]
    }

    /// Node at flat construction-order index `i`, if in range.
    pub fn get_node(&self, i: NodeIndex) -> Option<&MerkleNode<H>> {
        self.nodes.get(i)
    }

    /// Direct arena access for indices the crate itself produced.
    pub(crate) fn node(&self, index: NodeIndex) -> &MerkleNode<H> {
        &self.nodes[index]
    }

    /// Height the tree was built with.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of leaves (`2^(height-1)`).
    pub fn leaf_count(&self) -> usize {
        leaf_count_for_height(self.height)
    }

    /// Total number of nodes in the arena (`2^height - 1`).
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, index: NodeIndex) -> fmt::Result {
        let node = &self.nodes[index];
        for _ in 0..node.depth() {
            write!(f, "    ")?;
        }
        writeln!(f, "*: {}", hex::encode(node.digest()))?;
        if let Some(left) = node.left() {
            self.fmt_node(f, left)?;
        }
        if let Some(right) = node.right() {
            self.fmt_node(f, right)?;
        }
        Ok(())
    }
}

/// Indented hex dump of the whole tree, root first. Debug affordance, not a
/// stable format.
impl<H: OneBlockHasher> fmt::Display for FixedMerkleTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.nodes.len() - 1)
    }
}

/// Work-chunk size when fanning a level's independent hashes out across
/// rayon workers.
#[cfg(feature = "parallel")]
fn par_chunk_size(total_items: usize) -> usize {
    64usize.min(total_items.max(1))
}

/// Hash every input block into a leaf digest.
fn hash_leaf_blocks<H: OneBlockHasher>(input: &[u8]) -> Vec<H::Digest> {
    #[cfg(feature = "parallel")]
    {
        if parallel::parallelism_enabled() {
            use rayon::prelude::*;
            let chunk = par_chunk_size(input.len() / H::BLOCK_SIZE);
            return input
                .par_chunks_exact(H::BLOCK_SIZE)
                .with_min_len(chunk)
                .with_max_len(chunk)
                .map(|block| H::hash_oneblock(block))
                .collect();
        }
    }
    input
        .chunks_exact(H::BLOCK_SIZE)
        .map(|block| H::hash_oneblock(block))
        .collect()
}

/// Compress each adjacent sibling pair of `level` into a parent digest.
fn hash_level_pairs<H: OneBlockHasher>(level: &[MerkleNode<H>]) -> Vec<H::Digest> {
    let pair_count = level.len() / 2;
    let compress = |pair: usize| {
        let mut block = vec![0u8; H::BLOCK_SIZE];
        block[..H::DIGEST_SIZE].copy_from_slice(level[2 * pair].digest());
        block[H::DIGEST_SIZE..].copy_from_slice(level[2 * pair + 1].digest());
        H::hash_oneblock(&block)
    };

    #[cfg(feature = "parallel")]
    {
        if parallel::parallelism_enabled() {
            use rayon::prelude::*;
            let chunk = par_chunk_size(pair_count);
            return (0..pair_count)
                .into_par_iter()
                .with_min_len(chunk)
                .with_max_len(chunk)
                .map(compress)
                .collect();
        }
    }
    (0..pair_count).map(compress).collect()
}
