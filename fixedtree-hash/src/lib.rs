//! One-block hash primitives for fixed-shape hash trees.
//!
//! The tree crates never hash arbitrary-length messages: every hash call
//! compresses exactly one block into one digest, and two digests concatenate
//! into exactly one block. This crate exposes that contract as
//! [`OneBlockHasher`] together with two implementations built on the raw
//! SHA-256 and SHA-512 compression functions (standard initial values, no
//! padding, no length finalization).
//!
//! The [`parallel`] module holds the process-wide toggle the tree crates
//! consult when deciding whether to fan a construction level out across
//! rayon workers.

#![warn(missing_docs)]

mod oneblock;
/// Runtime toggle for data-parallel tree construction.
pub mod parallel;
mod sha256;
mod sha512;

pub use oneblock::OneBlockHasher;
pub use sha256::Sha256Compress;
pub use sha512::Sha512Compress;
