use core::fmt;

use fixedtree_hash::OneBlockHasher;
#[cfg(feature = "parallel")]
use fixedtree_hash::parallel;

use crate::{
    error::FixedAbrError,
    node::{AbrNode, NodeIndex, Slot},
};

/// Smallest ABR-capable tree: height 3 carries exactly one middle input.
pub(crate) const MIN_HEIGHT: usize = 3;
/// Cap keeping `1 << height` and the arena allocation sane.
pub(crate) const MAX_HEIGHT: usize = 32;

/// Number of leaves in a tree of the given height.
///
/// # Panics
///
/// Heights outside `[3, 32]` are rejected by [`FixedAbrTree::build`]; the
/// layout helpers themselves panic on them in debug builds (shift
/// under/overflow).
pub fn leaf_count_for_height(height: usize) -> usize {
    1usize << (height - 1)
}

/// Number of middle input blocks (`2^(h-2) - 1`) for the given height.
///
/// # Panics
///
/// As for [`leaf_count_for_height`]: debug-panics outside `[3, 32]`.
pub fn middle_count_for_height(height: usize) -> usize {
    (1usize << (height - 2)) - 1
}

/// Total input blocks: leaves plus middles.
///
/// # Panics
///
/// As for [`leaf_count_for_height`]: debug-panics outside `[3, 32]`.
pub fn input_block_count_for_height(height: usize) -> usize {
    leaf_count_for_height(height) + middle_count_for_height(height)
}

/// Total node count: the `2^h - 1` binary-tree nodes plus the threaded-in
/// middle nodes.
///
/// # Panics
///
/// As for [`leaf_count_for_height`]: debug-panics outside `[3, 32]`.
pub fn node_count_for_height(height: usize) -> usize {
    (1usize << height) - 1 + middle_count_for_height(height)
}

/// Required input-buffer length in bytes for a tree of the given height.
///
/// # Panics
///
/// As for [`leaf_count_for_height`]: debug-panics outside `[3, 32]`.
pub fn input_size_for_height<H: OneBlockHasher>(height: usize) -> usize {
    input_block_count_for_height(height) * H::BLOCK_SIZE
}

/// A fixed-height ABR tree over one-block hashing.
///
/// Shape and index order are documented on the crate root. Built once from
/// a flat byte buffer of exactly [`input_size_for_height`] bytes; immutable
/// and safe for concurrent readers afterwards.
#[derive(Debug)]
pub struct FixedAbrTree<H: OneBlockHasher> {
    height: usize,
    nodes: Vec<AbrNode<H>>,
}

impl<H: OneBlockHasher> FixedAbrTree<H> {
    /// Build the tree over `input`, which must hold exactly
    /// `2^(height-1) + 2^(height-2) - 1` blocks of `H::BLOCK_SIZE` bytes:
    /// the leaves first, then the middle inputs in consumption order.
    pub fn build(height: usize, input: &[u8]) -> Result<Self, FixedAbrError> {
        if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&height) {
            return Err(FixedAbrError::HeightOutOfRange {
                min: MIN_HEIGHT,
                max: MAX_HEIGHT,
                got: height,
            });
        }
        if input.len() % H::BLOCK_SIZE != 0 {
            return Err(FixedAbrError::UnalignedInput {
                len: input.len(),
                block_size: H::BLOCK_SIZE,
            });
        }
        let leaves_n = leaf_count_for_height(height);
        let middles_n = middle_count_for_height(height);
        let input_n = leaves_n + middles_n;
        let blocks = input.len() / H::BLOCK_SIZE;
        if blocks != input_n {
            return Err(FixedAbrError::BlockCountMismatch {
                expected: input_n,
                got: blocks,
                height,
                leaves: leaves_n,
                middles: middles_n,
            });
        }

        let mut nodes: Vec<AbrNode<H>> = Vec::with_capacity(node_count_for_height(height));
        let mut depth = height - 1;

        // Leaves and middle inputs alike are one-block hashes; the middle
        // nodes' depth is provisional until a mixing layer consumes them.
        for digest in hash_input_blocks::<H>(input) {
            nodes.push(AbrNode::new(digest, depth));
        }

        // First pairing layer over the leaves only: the middle inputs start
        // applying one level up.
        depth -= 1;
        for (pair, digest) in hash_leaf_pairs::<H>(&nodes[..leaves_n])
            .into_iter()
            .enumerate()
        {
            let left = 2 * pair;
            let right = left + 1;
            let parent = nodes.len();

            let mut node = AbrNode::new(digest, depth);
            node.set_pair_children(left, right);
            nodes.push(node);
            nodes[left].set_parent(parent, Slot::Left);
            nodes[right].set_parent(parent, Slot::Right);
        }

        // Mixing layers: each sibling pair consumes the next unconsumed
        // middle input, left-to-right across the level.
        let mut first = input_n;
        let mut middle = leaves_n;
        while depth > 0 {
            depth -= 1;
            let end = nodes.len();
            let pair_count = (end - first) / 2;
            for (pair, digest) in hash_mixed_level::<H>(&nodes, first, middle, pair_count)
                .into_iter()
                .enumerate()
            {
                let left = first + 2 * pair;
                let right = left + 1;
                let mid = middle + pair;
                let parent = nodes.len();

                let mut node = AbrNode::new(digest, depth);
                node.set_children(left, mid, right);
                nodes.push(node);
                nodes[left].set_parent(parent, Slot::Left);
                nodes[mid].set_parent(parent, Slot::Middle);
                nodes[mid].set_depth(depth + 1);
                nodes[right].set_parent(parent, Slot::Right);
            }
            middle += pair_count;
            first = end;
        }

        Ok(FixedAbrTree { height, nodes })
    }

    /// The root digest, valid for the tree's lifetime.
    pub fn digest(&self) -> &[u8] {
        self.root().digest()
    }

    /// The root node.
    pub fn root(&self) -> &AbrNode<H> {
        // The arena is never empty: build() always produces at least one node.
        &self.nodes[self.nodes.len() - 1]
    }

    /// Node at flat construction-order index `i`, if in range.
    pub fn get_node(&self, i: NodeIndex) -> Option<&AbrNode<H>> {
        self.nodes.get(i)
    }

    /// Direct arena access for indices the crate itself produced.
    pub(crate) fn node(&self, index: NodeIndex) -> &AbrNode<H> {
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

    /// Number of middle inputs (`2^(height-2) - 1`).
    pub fn middle_count(&self) -> usize {
        middle_count_for_height(self.height)
    }

    /// Total number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, index: NodeIndex) -> fmt::Result {
        let node = &self.nodes[index];
        for _ in 0..node.depth() {
            write!(f, "    ")?;
        }
        let tag = node.slot().map_or('*', Slot::letter);
        writeln!(f, "{tag}: {}", hex::encode(node.digest()))?;
        if let Some(left) = node.left() {
            self.fmt_node(f, left)?;
        }
        if let Some(mid) = node.middle() {
            self.fmt_node(f, mid)?;
        }
        if let Some(right) = node.right() {
            self.fmt_node(f, right)?;
        }
        Ok(())
    }
}

/// Indented hex dump of the whole tree, root first, middle children between
/// left and right. Debug affordance, not a stable format.
impl<H: OneBlockHasher> fmt::Display for FixedAbrTree<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.nodes.len() - 1)
    }
}

/// Plain pairwise compression: `hash(L || R)`.
pub(crate) fn compress_pair<H: OneBlockHasher>(left: &[u8], right: &[u8]) -> H::Digest {
    let mut block = vec![0u8; H::BLOCK_SIZE];
    block[..H::DIGEST_SIZE].copy_from_slice(left);
    block[H::DIGEST_SIZE..].copy_from_slice(right);
    H::hash_oneblock(&block)
}

/// ABR mixing step: XOR the middle digest into both halves of `L || R`,
/// compress, then XOR the right digest into the output. The asymmetric
/// unmix binds the right child doubly into the result.
pub(crate) fn compress_mixed<H: OneBlockHasher>(
    left: &[u8],
    right: &[u8],
    middle: &[u8],
) -> H::Digest {
    let mut block = vec![0u8; H::BLOCK_SIZE];
    block[..H::DIGEST_SIZE].copy_from_slice(left);
    block[H::DIGEST_SIZE..].copy_from_slice(right);
    for (byte, mix) in block[..H::DIGEST_SIZE].iter_mut().zip(middle) {
        *byte ^= mix;
    }
    for (byte, mix) in block[H::DIGEST_SIZE..].iter_mut().zip(middle) {
        *byte ^= mix;
    }

    let mut digest = H::hash_oneblock(&block);
    for (byte, unmix) in digest.as_mut().iter_mut().zip(right) {
        *byte ^= unmix;
    }
    digest
}

/// Work-chunk size when fanning a level's independent hashes out across
/// rayon workers.
#[cfg(feature = "parallel")]
fn par_chunk_size(total_items: usize) -> usize {
    64usize.min(total_items.max(1))
}

/// Hash every input block (leaves and middles) into a digest.
fn hash_input_blocks<H: OneBlockHasher>(input: &[u8]) -> Vec<H::Digest> {
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

/// Compress each adjacent leaf pair, without middle mixing.
fn hash_leaf_pairs<H: OneBlockHasher>(leaves: &[AbrNode<H>]) -> Vec<H::Digest> {
    let pair_count = leaves.len() / 2;
    let compress =
        |pair: usize| compress_pair::<H>(leaves[2 * pair].digest(), leaves[2 * pair + 1].digest());

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

/// Compress one mixing level: pairs start at `first`, middles at `middle`.
fn hash_mixed_level<H: OneBlockHasher>(
    nodes: &[AbrNode<H>],
    first: NodeIndex,
    middle: NodeIndex,
    pair_count: usize,
) -> Vec<H::Digest> {
    let compress = |pair: usize| {
        compress_mixed::<H>(
            nodes[first + 2 * pair].digest(),
            nodes[first + 2 * pair + 1].digest(),
            nodes[middle + pair].digest(),
        )
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
