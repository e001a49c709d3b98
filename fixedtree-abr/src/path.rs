//! Authentication paths through an ABR tree.
//!
//! Above the first pairing layer every level mixes a middle digest, so a
//! path step carries that digest alongside the sibling. `compute_root`
//! replays the exact mix / compress / unmix construction steps, making a
//! path valid iff it reproduces the tree's root digest.

use fixedtree_hash::OneBlockHasher;

use crate::{
    error::FixedAbrError,
    tree::{FixedAbrTree, compress_mixed, compress_pair, leaf_count_for_height},
};

/// One level of an ABR authentication path.
#[derive(Debug, Clone)]
pub struct AbrPathStep<H: OneBlockHasher> {
    /// Digest of the climbing node's sibling in the binary pair.
    pub sibling: H::Digest,
    /// Digest of the middle input mixed at this level; `None` for the first
    /// pairing layer, which mixes nothing.
    pub middle: Option<H::Digest>,
    /// Whether the climbing node was the left child at this level.
    pub child_is_left: bool,
}

/// Authentication path from a leaf to the root, leaf level first.
#[derive(Debug, Clone)]
pub struct AbrPath<H: OneBlockHasher> {
    steps: Vec<AbrPathStep<H>>,
}

impl<H: OneBlockHasher> AbrPath<H> {
    /// Path steps, ordered from the leaf level up to the root.
    pub fn steps(&self) -> &[AbrPathStep<H>] {
        &self.steps
    }

    /// Recompute the root digest from the leaf's input block.
    pub fn compute_root(&self, leaf_block: &[u8]) -> H::Digest {
        debug_assert_eq!(leaf_block.len(), H::BLOCK_SIZE);

        let mut digest = H::hash_oneblock(leaf_block);
        for step in &self.steps {
            let (left, right) = if step.child_is_left {
                (digest, step.sibling)
            } else {
                (step.sibling, digest)
            };
            digest = match step.middle {
                None => compress_pair::<H>(left.as_ref(), right.as_ref()),
                Some(middle) => {
                    compress_mixed::<H>(left.as_ref(), right.as_ref(), middle.as_ref())
                }
            };
        }
        digest
    }
}

impl<H: OneBlockHasher> FixedAbrTree<H> {
    /// Extract the authentication path for leaf `leaf_index`.
    pub fn auth_path(&self, leaf_index: usize) -> Result<AbrPath<H>, FixedAbrError> {
        let leaves_n = leaf_count_for_height(self.height());
        if leaf_index >= leaves_n {
            return Err(FixedAbrError::LeafOutOfRange {
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
            .expect("internal nodes always carry both pair children");
            steps.push(AbrPathStep {
                sibling: self.node(sibling).digest_value(),
                middle: parent_node.middle().map(|mid| self.node(mid).digest_value()),
                child_is_left,
            });
            index = parent;
        }
        Ok(AbrPath { steps })
    }
}
