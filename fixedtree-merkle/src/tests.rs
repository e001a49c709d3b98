use fixedtree_hash::{OneBlockHasher, Sha256Compress, Sha512Compress};
use rand::Rng;

use crate::{
    FixedMerkleError, FixedMerkleTree, input_size_for_height, leaf_count_for_height,
    node_count_for_height,
};

fn random_input(len: usize) -> Vec<u8> {
    let mut buf = vec![0u8; len];
    rand::rng().fill_bytes(&mut buf);
    buf
}

// ── Known-vector regressions ─────────────────────────────────────────

#[test]
fn sha256_height_4_zero_input_root() {
    let input = vec![0u8; input_size_for_height::<Sha256Compress>(4)];
    let tree = FixedMerkleTree::<Sha256Compress>::build(4, &input).expect("build");
    assert_eq!(
        hex::encode(tree.digest()),
        "26b0052694fc42fdff93e6fb5a71d38c3dd7dc5b6ad710eb048c660233137fab"
    );
}

#[test]
fn sha512_height_4_zero_input_root() {
    let input = vec![0u8; input_size_for_height::<Sha512Compress>(4)];
    let tree = FixedMerkleTree::<Sha512Compress>::build(4, &input).expect("build");
    assert_eq!(
        hex::encode(tree.digest()),
        "6e3d539e81fcba88a5a6875590df1f6ec06e67b1656504bd60f33953b81b0806\
         37d790e65789a4e03bfa4d457cb820f5153a0299c74798775d4295e9b0955517"
    );
}

// ── Construction ─────────────────────────────────────────────────────

#[test]
fn height_one_root_is_the_leaf_hash() {
    let input = random_input(Sha256Compress::BLOCK_SIZE);
    let tree = FixedMerkleTree::<Sha256Compress>::build(1, &input).expect("build");
    assert_eq!(tree.node_count(), 1);
    assert_eq!(tree.digest(), Sha256Compress::hash_oneblock(&input).as_ref());
    assert_eq!(tree.root().depth(), 0);
}

#[test]
fn root_recomputes_from_hand_hashed_levels() {
    let input = random_input(input_size_for_height::<Sha256Compress>(3));
    let tree = FixedMerkleTree::<Sha256Compress>::build(3, &input).expect("build");

    let leaves: Vec<[u8; 32]> = input
        .chunks_exact(64)
        .map(Sha256Compress::hash_oneblock)
        .collect();
    let pair = |l: &[u8; 32], r: &[u8; 32]| {
        let mut block = [0u8; 64];
        block[..32].copy_from_slice(l);
        block[32..].copy_from_slice(r);
        Sha256Compress::hash_oneblock(&block)
    };
    let p0 = pair(&leaves[0], &leaves[1]);
    let p1 = pair(&leaves[2], &leaves[3]);
    assert_eq!(tree.digest(), pair(&p0, &p1).as_ref());
}

#[test]
fn building_twice_is_deterministic() {
    let input = random_input(input_size_for_height::<Sha256Compress>(5));
    let a = FixedMerkleTree::<Sha256Compress>::build(5, &input).expect("build");
    let b = FixedMerkleTree::<Sha256Compress>::build(5, &input).expect("build");
    assert_eq!(a.node_count(), b.node_count());
    for i in 0..a.node_count() {
        assert_eq!(
            a.get_node(i).expect("node").digest(),
            b.get_node(i).expect("node").digest(),
            "digest mismatch at index {i}"
        );
    }
}

// ── Size validation ──────────────────────────────────────────────────

#[test]
fn rejects_unaligned_input() {
    let input = vec![0u8; input_size_for_height::<Sha256Compress>(4) + 1];
    let err = FixedMerkleTree::<Sha256Compress>::build(4, &input).unwrap_err();
    assert_eq!(
        err,
        FixedMerkleError::UnalignedInput {
            len: input.len(),
            block_size: 64
        }
    );
}

#[test]
fn rejects_wrong_block_count() {
    // Aligned, but one block short for height 4.
    let input = vec![0u8; 7 * 64];
    let err = FixedMerkleTree::<Sha256Compress>::build(4, &input).unwrap_err();
    assert_eq!(
        err,
        FixedMerkleError::BlockCountMismatch {
            expected: 8,
            got: 7,
            height: 4
        }
    );
}

#[test]
fn rejects_height_zero() {
    assert!(matches!(
        FixedMerkleTree::<Sha256Compress>::build(0, &[]),
        Err(FixedMerkleError::HeightOutOfRange { got: 0, .. })
    ));
}

// ── Structural invariants ────────────────────────────────────────────

#[test]
fn structure_is_a_complete_binary_tree() {
    let height = 5;
    let input = random_input(input_size_for_height::<Sha256Compress>(height));
    let tree = FixedMerkleTree::<Sha256Compress>::build(height, &input).expect("build");

    let leaves_n = leaf_count_for_height(height);
    let nodes_n = node_count_for_height(height);
    assert_eq!(tree.leaf_count(), leaves_n);
    assert_eq!(tree.node_count(), nodes_n);

    for i in 0..nodes_n {
        let node = tree.get_node(i).expect("node");
        if i < leaves_n {
            assert!(node.is_leaf());
            assert_eq!(node.depth(), height - 1);
        }
        if i == nodes_n - 1 {
            assert!(node.parent().is_none(), "root has no parent");
            assert_eq!(node.depth(), 0);
        } else {
            let parent = node.parent().expect("non-root nodes have a parent");
            let parent_node = tree.get_node(parent).expect("parent");
            assert!(
                parent_node.left() == Some(i) || parent_node.right() == Some(i),
                "parent must link back to node {i}"
            );
            assert_eq!(parent_node.depth() + 1, node.depth());
        }
        if let (Some(left), Some(right)) = (node.left(), node.right()) {
            assert_eq!(tree.get_node(left).expect("left").parent(), Some(i));
            assert_eq!(tree.get_node(right).expect("right").parent(), Some(i));
        }
    }
}

// ── Authentication paths ─────────────────────────────────────────────

#[test]
fn auth_paths_recompute_the_root_for_every_leaf() {
    let height = 4;
    let input = random_input(input_size_for_height::<Sha512Compress>(height));
    let tree = FixedMerkleTree::<Sha512Compress>::build(height, &input).expect("build");

    for leaf in 0..tree.leaf_count() {
        let path = tree.auth_path(leaf).expect("path");
        assert_eq!(path.steps().len(), height - 1);
        let block = &input[leaf * 128..(leaf + 1) * 128];
        assert_eq!(path.compute_root(block).as_ref(), tree.digest());
    }
}

#[test]
fn auth_path_rejects_out_of_range_leaf() {
    let input = vec![0u8; input_size_for_height::<Sha256Compress>(3)];
    let tree = FixedMerkleTree::<Sha256Compress>::build(3, &input).expect("build");
    assert_eq!(
        tree.auth_path(4).unwrap_err(),
        FixedMerkleError::LeafOutOfRange {
            index: 4,
            leaves: 4
        }
    );
}

// ── Debug dump ───────────────────────────────────────────────────────

#[test]
fn display_dumps_every_node_once() {
    let input = vec![0u8; input_size_for_height::<Sha256Compress>(3)];
    let tree = FixedMerkleTree::<Sha256Compress>::build(3, &input).expect("build");
    let dump = tree.to_string();
    assert_eq!(dump.lines().count(), tree.node_count());
    // Root line is unindented; leaf lines carry height-1 indents.
    assert!(dump.starts_with("*: "));
    assert!(dump.contains("\n        *: "));
}

// ── Parallel/serial equivalence ──────────────────────────────────────

#[cfg(feature = "parallel")]
mod parallel {
    use fixedtree_hash::parallel::set_parallelism;

    use super::*;

    #[test]
    fn parallel_build_matches_serial() {
        let height = 6;
        let input = random_input(input_size_for_height::<Sha256Compress>(height));

        let serial = {
            let _guard = set_parallelism(false);
            FixedMerkleTree::<Sha256Compress>::build(height, &input).expect("serial build")
        };
        let parallel = FixedMerkleTree::<Sha256Compress>::build(height, &input).expect("build");

        assert_eq!(serial.node_count(), parallel.node_count());
        for i in 0..serial.node_count() {
            assert_eq!(
                serial.get_node(i).expect("node").digest(),
                parallel.get_node(i).expect("node").digest(),
                "digest mismatch at index {i}"
            );
        }
    }
}
