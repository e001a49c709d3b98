//! SHA-256 single-block compression.

use sha2::compress256;
use sha2::digest::generic_array::GenericArray;

use crate::OneBlockHasher;

/// SHA-256 initial hash values (FIPS 180-4 §5.3.3).
const IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab, 0x5be0cd19,
];

/// The raw SHA-256 compression function over a single 64-byte block.
///
/// No padding and no length word are applied: the caller supplies the
/// complete block. A caller that wants the digest of a short message must
/// pad it into one block itself.
#[derive(Debug, Clone, Copy)]
pub struct Sha256Compress;

impl OneBlockHasher for Sha256Compress {
    type Digest = [u8; 32];

    const BLOCK_SIZE: usize = 64;
    const DIGEST_SIZE: usize = 32;

    fn hash_oneblock(block: &[u8]) -> [u8; 32] {
        debug_assert_eq!(block.len(), Self::BLOCK_SIZE);

        let mut state = IV;
        compress256(
            &mut state,
            core::slice::from_ref(GenericArray::from_slice(block)),
        );

        let mut digest = [0u8; 32];
        for (out, word) in digest.chunks_exact_mut(4).zip(state) {
            out.copy_from_slice(&word.to_be_bytes());
        }
        digest
    }
}
