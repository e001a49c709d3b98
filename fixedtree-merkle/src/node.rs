use fixedtree_hash::OneBlockHasher;

/// Flat index of a node within its tree's arena.
///
/// Indices follow construction order: leaves first, then each level
/// bottom-up. Index-based links keep the structure valid under reallocation
/// and make the arena trivially `Send`/`Sync`.
pub type NodeIndex = usize;

/// One node of a [`FixedMerkleTree`](crate::FixedMerkleTree).
///
/// The digest is written once during construction and never changes. Depth
/// counts from the root: root = 0, leaves = height - 1.
#[derive(Debug, Clone)]
pub struct MerkleNode<H: OneBlockHasher> {
    digest: H::Digest,
    depth: usize,
    parent: Option<NodeIndex>,
    left: Option<NodeIndex>,
    right: Option<NodeIndex>,
}

impl<H: OneBlockHasher> MerkleNode<H> {
    pub(crate) fn new(digest: H::Digest, depth: usize) -> Self {
        MerkleNode {
            digest,
            depth,
            parent: None,
            left: None,
            right: None,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: NodeIndex) {
        self.parent = Some(parent);
    }

    pub(crate) fn set_children(&mut self, left: NodeIndex, right: NodeIndex) {
        self.left = Some(left);
        self.right = Some(right);
    }

    /// The node's `DIGEST_SIZE`-byte digest.
    pub fn digest(&self) -> &[u8] {
        self.digest.as_ref()
    }

    /// The digest as its fixed-size value type.
    pub fn digest_value(&self) -> H::Digest {
        self.digest
    }

    /// Distance from the root (root = 0, leaves = height - 1).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Arena index of the parent; `None` for the root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Arena index of the left child; `None` for leaves.
    pub fn left(&self) -> Option<NodeIndex> {
        self.left
    }

    /// Arena index of the right child; `None` for leaves.
    pub fn right(&self) -> Option<NodeIndex> {
        self.right
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
