//! SHA-512 single-block compression.

use sha2::compress512;
use sha2::digest::generic_array::GenericArray;

use crate::OneBlockHasher;

/// SHA-512 initial hash values (FIPS 180-4 §5.3.5).
const IV: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];

/// The raw SHA-512 compression function over a single 128-byte block.
///
/// Same contract as [`Sha256Compress`](crate::Sha256Compress): no padding,
/// no length finalization.
#[derive(Debug, Clone, Copy)]
pub struct Sha512Compress;

impl OneBlockHasher for Sha512Compress {
    type Digest = [u8; 64];

    const BLOCK_SIZE: usize = 128;
    const DIGEST_SIZE: usize = 64;

    fn hash_oneblock(block: &[u8]) -> [u8; 64] {
        debug_assert_eq!(block.len(), Self::BLOCK_SIZE);

        let mut state = IV;
        compress512(
            &mut state,
            core::slice::from_ref(GenericArray::from_slice(block)),
        );

        let mut digest = [0u8; 64];
        for (out, word) in digest.chunks_exact_mut(8).zip(state) {
            out.copy_from_slice(&word.to_be_bytes());
        }
        digest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_message_padding_block() {
        let mut block = [0u8; 128];
        block[0] = 0x80;
        assert_eq!(
            hex::encode(Sha512Compress::hash_oneblock(&block)),
            "cf83e1357eefb8bdf1542850d66d8007d620e4050b5715dc83f4a921d36ce9ce\
             47d0d13c5d85f2b0ff8318d2877eec2f63b931bd47417a81a538327af927da3e"
        );
    }

    #[test]
    fn all_zero_block() {
        assert_eq!(
            hex::encode(Sha512Compress::hash_oneblock(&[0u8; 128])),
            "cf7881d5774acbe8533362e0fbc780700267639d87460eda3086cb40e85931b0\
             717dc95288a023a396bab2c14ce0b5e06fc4fe04eae33e0b91f4d80cbd668bee"
        );
    }
}
