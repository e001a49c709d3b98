//! Fixed-height augmented binary relation (ABR) hash tree.
//!
//! An ABR tree has the shape of a complete binary Merkle tree of height `h`
//! over `2^(h-1)` leaf blocks, but threads `2^(h-2) - 1` extra "middle"
//! input blocks into the internal levels: every internal hash above the
//! first pairing level XOR-mixes one middle digest into both halves of the
//! compression block, then XORs the right child's digest into the
//! compressed output. The mix / compress / unmix order is load-bearing: any
//! permutation changes every digest above it.
//!
//! # Core types
//!
//! - [`FixedAbrTree`] — build from a byte buffer, query digests and nodes.
//! - [`AbrNode`] — one arena node (digest, depth, parent/left/middle/right).
//! - [`AbrPath`] — authentication path from a leaf to the root, including
//!   the middle digest consumed at each mixing level.
//!
//! Flat node index order: leaves, then middle inputs in creation order,
//! then internal nodes level by level, the root last.

#![warn(missing_docs)]

mod error;
mod node;
mod path;
mod tree;


pub use error::FixedAbrError;
pub use node::{AbrNode, NodeIndex, Slot};
pub use path::{AbrPath, AbrPathStep};
pub use tree::{
    FixedAbrTree, input_block_count_for_height, input_size_for_height, leaf_count_for_height,
    middle_count_for_height, node_count_for_height,
};
