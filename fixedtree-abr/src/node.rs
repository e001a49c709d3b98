use fixedtree_hash::OneBlockHasher;

/// Flat index of a node within its tree's arena.
///
/// Indices follow construction order: leaves, then middle inputs, then each
/// internal level bottom-up.
pub type NodeIndex = usize;

/// Which slot a node occupies under its parent.
///
/// `Middle` is a structurally distinct side slot, not part of the binary
/// left/right hierarchy: middle children are the interleaved input nodes
/// whose digests get XOR-mixed into the parent's compression block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Left child of the binary pair.
    Left,
    /// Interleaved middle input.
    Middle,
    /// Right child of the binary pair.
    Right,
}

impl Slot {
    /// Single-letter tag used by the debug dump.
    pub(crate) fn letter(self) -> char {
        match self {
            Slot::Left => 'L',
            Slot::Middle => 'E',
            Slot::Right => 'R',
        }
    }
}

/// One node of a [`FixedAbrTree`](crate::FixedAbrTree).
///
/// The digest is written once during construction. Depth counts from the
/// root and is corrected once more on middle nodes when the level that
/// consumes them resolves; no other field changes after creation.
#[derive(Debug, Clone)]
pub struct AbrNode<H: OneBlockHasher> {
    digest: H::Digest,
    depth: usize,
    parent: Option<NodeIndex>,
    slot: Option<Slot>,
    left: Option<NodeIndex>,
    middle: Option<NodeIndex>,
    right: Option<NodeIndex>,
}

impl<H: OneBlockHasher> AbrNode<H> {
    pub(crate) fn new(digest: H::Digest, depth: usize) -> Self {
        AbrNode {
            digest,
            depth,
            parent: None,
            slot: None,
            left: None,
            middle: None,
            right: None,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: NodeIndex, slot: Slot) {
        self.parent = Some(parent);
        self.slot = Some(slot);
    }

    pub(crate) fn set_children(&mut self, left: NodeIndex, middle: NodeIndex, right: NodeIndex) {
        self.left = Some(left);
        self.middle = Some(middle);
        self.right = Some(right);
    }

    pub(crate) fn set_pair_children(&mut self, left: NodeIndex, right: NodeIndex) {
        self.left = Some(left);
        self.right = Some(right);
    }

    pub(crate) fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// The node's `DIGEST_SIZE`-byte digest.
    pub fn digest(&self) -> &[u8] {
        self.digest.as_ref()
    }

    /// The digest as its fixed-size value type.
    pub fn digest_value(&self) -> H::Digest {
        self.digest
    }

    /// Distance from the root (root = 0, leaves = height - 1; a consumed
    /// middle node sits one level below the parent that mixed it in).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Arena index of the parent; `None` for the root.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Which slot this node fills under its parent; `None` for the root.
    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    /// Arena index of the left child.
    pub fn left(&self) -> Option<NodeIndex> {
        self.left
    }

    /// Arena index of the mixed-in middle child; `None` on leaves and on
    /// first-layer parents, which mix nothing.
    pub fn middle(&self) -> Option<NodeIndex> {
        self.middle
    }

    /// Arena index of the right child.
    pub fn right(&self) -> Option<NodeIndex> {
        self.right
    }

    /// Whether this node was hashed directly from an input block (leaf or
    /// middle input).
    pub fn is_input(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
