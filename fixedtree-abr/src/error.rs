use thiserror::Error;

/// Errors from fixed ABR tree construction and queries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixedAbrError {
    /// Tree height outside the supported range. ABR trees need at least one
    /// mixing level, so the minimum height is 3.
    #[error("height must be between {min} and {max}, got {got}")]
    HeightOutOfRange {
        /// Smallest supported height.
        min: usize,
        /// Largest supported height.
        max: usize,
        /// Height that was requested.
        got: usize,
    },
    /// Input length is not a whole number of blocks.
    #[error("input length {len} is not a multiple of the {block_size}-byte block size")]
    UnalignedInput {
        /// Supplied input length in bytes.
        len: usize,
        /// Block size of the hash primitive.
        block_size: usize,
    },
    /// Input block count does not match the declared height.
    #[error("expected {expected} input blocks for height {height} ({leaves} leaves + {middles} middles), got {got}")]
    BlockCountMismatch {
        /// Block count the height calls for.
        expected: usize,
        /// Block count actually supplied.
        got: usize,
        /// Height the tree was declared with.
        height: usize,
        /// Leaf blocks the height calls for.
        leaves: usize,
        /// Middle blocks the height calls for.
        middles: usize,
    },
    /// Leaf index outside the tree's leaf range.
    #[error("leaf index {index} out of range (leaf count {leaves})")]
    LeafOutOfRange {
        /// Requested leaf index.
        index: usize,
        /// Number of leaves in the tree.
        leaves: usize,
    },
}
