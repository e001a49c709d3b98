//! Fixed-height binary Merkle tree over a one-block compression function.
//!
//! A tree of height `h` covers exactly `2^(h-1)` input blocks. Each leaf is
//! the one-block hash of its input chunk; each internal node compresses the
//! concatenation of its two children's digests. The whole node arena is
//! built once, bottom-up, and is immutable afterwards.
//!
//! # Core types
//!
//! - [`FixedMerkleTree`] — build from a byte buffer, query digests and nodes.
//! - [`MerkleNode`] — one arena node (digest, depth, parent/child indices).
//! - [`MerklePath`] — authentication path from a leaf to the root.
//!
//! Nodes are addressed by flat construction-order index: leaves first, then
//! each level bottom-up, the root last. Downstream consumers rely on this
//! order to pull specific path nodes as circuit witnesses.

#![warn(missing_docs)]

mod error;
mod node;
mod path;
mod tree;

#[cfg(test)]
mod tests;

pub use error::FixedMerkleError;
pub use node::{MerkleNode, NodeIndex};
pub use path::{MerklePath, MerklePathStep};
pub use tree::{
    FixedMerkleTree, input_size_for_height, leaf_count_for_height, node_count_for_height,
};
