//! Authentication paths: the sibling digests from a chosen leaf to the root.
//!
//! A path proves leaf membership without the whole tree; the SNARK layer
//! feeds these digests in as circuit witnesses. `compute_root` replays the
//! exact construction hashing, so a path is valid iff it reproduces the
//! tree's root digest.

use fixedtree_hash::OneBlockHasher;

use crate::{
    error::FixedMerkleError,
    tree::{FixedMerkleTree, leaf_count_for_height},
};

/// One level of an authentication path.
#[derive(Debug, Clone)]
pub struct MerklePathStep<H: OneBlockHasher> {
    /// Digest of the climbing node's sibling.
    pub sibling: H::Digest,
    /// Whether the climbing node was the left child at this level.
    pub child_is_left: bool,
}

/// Authentication path from a leaf to the root, leaf level first.
#[derive(Debug, Clone)]
pub struct MerklePath<H: OneBlockHasher> {
    steps: Vec<MerklePathStep<H>>,
}

impl<H: OneBlockHasher> MerklePath<H> {
    /// Path steps, ordered from the leaf level up to the root.
    pub fn steps(&self) -> &[MerklePathStep<H>] {
        &self.steps
    }

    /// Recompute the root digest from the leaf's input block.
    pub fn compute_root(&self, leaf_block: &[u8]) -> H::Digest {
        debug_assert_eq!(leaf_block.len(), H::BLOCK_SIZE);

        let mut digest = H::hash_oneblock(leaf_block);
        for step in &self.steps {
            let mut block = vec![0u8; H::BLOCK_SIZE];
            let (left, right) = if step.child_is_left {
                (digest.as_ref(), step.sibling.as_ref())
            } else {
                (step.sibling.as_ref(), digest.as_ref())
            };
            block[..H::DIGEST_SIZE].copy_from_slice(left);
            block[H::DIGEST_SIZE..].copy_from_slice(right);
            digest = H::hash_oneblock(&block);
        }
        digest
    }
}

impl<H: OneBlockHasher> FixedMerkleTree<H> {
    /// Extract the authentication path for leaf `leaf_index`.
    pub fn auth_path(&self, leaf_index: usize) -> Result<MerklePath<H>, FixedMerkleError> {
        let leaves_n = leaf_count_for_height(self.height());
        if leaf_index >= leaves_n {
            return Err(FixedMerkleError::LeafOutOfRange {
                index: leaf_index,
                leaves: leaves_n,
            });
        }

        let mut steps = Vec::with_capacity(self.height() - 1);
        let mut index = leaf_index;
        while let Some(parent) = self.node(index).parent() {
            let parent_node = self.node(parent);
            let child_is_left = parent_node.left() == Some(index);
            let sibling = if child_is_left {
                parent_node.right()
            } else {
                parent_node.left()
            }
            .expect("internal nodes always carry both children");
            steps.push(MerklePathStep {
                sibling: self.node(sibling).digest_value(),
                child_is_left,
            });
            index = parent;
        }
        Ok(MerklePath { steps })
    }
}
