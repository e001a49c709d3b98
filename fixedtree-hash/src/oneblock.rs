use core::fmt::Debug;

/// A fixed-block compression function: one block in, one digest out.
///
/// Implementations must be pure and total on well-formed input, and must
/// uphold `2 * DIGEST_SIZE == BLOCK_SIZE` so that two digests concatenate
/// into exactly one block.
pub trait OneBlockHasher {
    /// Digest value. Two of these concatenated form one input block.
    type Digest: Copy + Eq + AsRef<[u8]> + AsMut<[u8]> + Send + Sync + Debug;

    /// Compression input size in bytes.
    const BLOCK_SIZE: usize;

    /// Compression output size in bytes.
    const DIGEST_SIZE: usize;

    /// Compress exactly one `BLOCK_SIZE`-byte block into one digest.
    fn hash_oneblock(block: &[u8]) -> Self::Digest;
}
