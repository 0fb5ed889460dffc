//! The AVL balancing discipline.
//!
//! Every node caches its height (a leaf has a height of 1, an absent child
//! counts as 0). After each structural edit the tree hands the engine the
//! lowest affected node, and the engine walks up the parent links refreshing
//! heights and applying at most one corrective rotation per ancestor.

use std::fmt::Display;

use tracing::{debug, trace};

use crate::{arena::NodeArena, node::NodeId, rebalance::Rebalance};

/// Cumulative counts of the corrective rotations performed by an [`Avl`]
/// engine.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RebalanceStats {
    single_rotations: u64,
    double_rotations: u64,
}

impl RebalanceStats {
    /// The number of left-left and right-right corrections performed.
    pub fn single_rotations(&self) -> u64 {
        self.single_rotations
    }

    /// The number of left-right and right-left corrections performed.
    ///
    /// Each is realised as a single restructuring and counts once.
    pub fn double_rotations(&self) -> u64 {
        self.double_rotations
    }

    /// The total number of rotation events.
    pub fn rotations(&self) -> u64 {
        self.single_rotations + self.double_rotations
    }
}

/// The shape of an imbalance, named by the path from the unbalanced node to
/// its tallest grandchild.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Case {
    LeftLeft,
    LeftRight,
    RightRight,
    RightLeft,
}

impl Case {
    fn is_double(&self) -> bool {
        matches!(self, Self::LeftRight | Self::RightLeft)
    }
}

impl Display for Case {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::LeftLeft => "LL",
            Self::LeftRight => "LR",
            Self::RightRight => "RR",
            Self::RightLeft => "RL",
        })
    }
}

/// The AVL rebalancing engine.
///
/// Plugged into a [`BalancedTree`](crate::BalancedTree) it maintains the
/// invariant that the heights of the two subtrees of every node differ by at
/// most one.
///
/// After an insert the engine performs at most one rotation (a double rotation
/// counts as one). By default it also stops walking as soon as an ancestor's
/// height is unchanged, as nothing above it can have changed either; see
/// [`Avl::with_early_exit()`]. After a removal the walk always continues to
/// the root, as a removal may require a rotation at every level.
#[derive(Debug, Clone)]
pub struct Avl {
    early_exit: bool,
    stats: RebalanceStats,
}

impl Default for Avl {
    fn default() -> Self {
        Self::new()
    }
}

impl Avl {
    /// Construct an engine with the insert early exit enabled.
    pub fn new() -> Self {
        Self::with_early_exit(true)
    }

    /// Construct an engine that stops the post-insert walk at the first
    /// ancestor whose height is unchanged when `early_exit` is true, or walks
    /// until the root (or the first rotation) when false.
    ///
    /// Both produce identical trees.
    pub fn with_early_exit(early_exit: bool) -> Self {
        Self {
            early_exit,
            stats: RebalanceStats::default(),
        }
    }

    /// Rotation counts accumulated since construction.
    pub fn stats(&self) -> RebalanceStats {
        self.stats
    }

    /// Correct the imbalance at `grand` with a single (possibly double)
    /// rotation, returning the new root of the subtree.
    fn rebalance<K, V>(&mut self, arena: &mut NodeArena<K, V, u8>, grand: NodeId) -> NodeId {
        let parent = taller_child(arena, grand);
        let node = taller_child(arena, parent);

        let (case, top) = match (arena.is_left_child(parent), arena.is_left_child(node)) {
            (true, true) => {
                let (c, e) = (arena.right(node), arena.right(parent));
                rotate(arena, grand, node, c, parent, e, grand);
                (Case::LeftLeft, parent)
            }
            (true, false) => {
                let (c, e) = (arena.left(node), arena.right(node));
                rotate(arena, grand, parent, c, node, e, grand);
                (Case::LeftRight, node)
            }
            (false, false) => {
                let (c, e) = (arena.left(parent), arena.left(node));
                rotate(arena, grand, grand, c, parent, e, node);
                (Case::RightRight, parent)
            }
            (false, true) => {
                let (c, e) = (arena.left(node), arena.right(node));
                rotate(arena, grand, grand, c, node, e, parent);
                (Case::RightLeft, node)
            }
        };

        if case.is_double() {
            self.stats.double_rotations += 1;
        } else {
            self.stats.single_rotations += 1;
        }

        trace!(%case, height = height(arena, Some(top)), "rotated subtree");

        // Invariant: the new subtree root is balanced.
        debug_assert!(balance_factor(arena, top).abs() <= 1);

        top
    }
}

impl Rebalance for Avl {
    /// The node height.
    ///
    /// A u8 holds a maximum value of 255, meaning it can represent the height
    /// of a balanced tree far larger than addressable memory.
    type Meta = u8;

    fn leaf_meta(&self) -> u8 {
        1
    }

    fn after_insert<K, V>(&mut self, arena: &mut NodeArena<K, V, u8>, node: NodeId) {
        let mut visited = 0_usize;
        let mut ptr = arena.parent(node);

        while let Some(n) = ptr {
            visited += 1;

            if !is_balanced(arena, n) {
                // A single rotation restores the subtree to its height before
                // the insert, so the ancestors need no further changes.
                self.rebalance(arena, n);
                break;
            }

            if !update_height(arena, n) && self.early_exit {
                break;
            }

            ptr = arena.parent(n);
        }

        debug!(visited, "rebalanced after insert");
    }

    fn after_remove<K, V>(&mut self, arena: &mut NodeArena<K, V, u8>, edit_point: Option<NodeId>) {
        let mut visited = 0_usize;
        let mut ptr = edit_point;

        while let Some(n) = ptr {
            visited += 1;

            let top = if is_balanced(arena, n) {
                update_height(arena, n);
                n
            } else {
                // The corrected subtree may be one level shorter than before
                // the removal, which may unbalance an ancestor.
                self.rebalance(arena, n)
            };

            ptr = arena.parent(top);
        }

        debug!(visited, "rebalanced after remove");
    }
}

/// Apply [`NodeArena::rotate()`] and recompute the heights of the three
/// repositioned nodes, children first.
#[allow(clippy::too_many_arguments)]
fn rotate<K, V>(
    arena: &mut NodeArena<K, V, u8>,
    r: NodeId,
    b: NodeId,
    c: Option<NodeId>,
    d: NodeId,
    e: Option<NodeId>,
    f: NodeId,
) {
    arena.rotate(r, b, c, d, e, f);

    update_height(arena, b);
    update_height(arena, f);
    update_height(arena, d);
}

/// The height of the subtree rooted at `id`, or 0 for an absent subtree.
pub(crate) fn height<K, V>(arena: &NodeArena<K, V, u8>, id: Option<NodeId>) -> u8 {
    id.map(|v| *arena.meta(v)).unwrap_or_default()
}

/// Compute the "balance factor" of the subtree rooted at `id`.
///
/// Returns the subtree height skew / magnitude, which is a positive number when
/// left heavy, and a negative number when right heavy.
pub(crate) fn balance_factor<K, V>(arena: &NodeArena<K, V, u8>, id: NodeId) -> i16 {
    height(arena, arena.left(id)) as i16 - height(arena, arena.right(id)) as i16
}

fn is_balanced<K, V>(arena: &NodeArena<K, V, u8>, id: NodeId) -> bool {
    balance_factor(arena, id).abs() <= 1
}

/// Recompute the height of `id` from the heights of its children, returning
/// true if the stored height changed.
///
/// The children must already hold their correct heights.
pub(crate) fn update_height<K, V>(arena: &mut NodeArena<K, V, u8>, id: NodeId) -> bool {
    let h = 1 + height(arena, arena.left(id)).max(height(arena, arena.right(id)));
    let old = std::mem::replace(arena.meta_mut(id), h);
    old != h
}

/// Return the child of `id` with the greater height.
///
/// When both children are of equal height, the child on the same side that
/// `id` hangs from its own parent is returned: the left child if `id` is a left
/// child, and the right child otherwise (including when `id` is the root).
///
/// # Panics
///
/// Panics if `id` has no children.
pub(crate) fn taller_child<K, V>(arena: &NodeArena<K, V, u8>, id: NodeId) -> NodeId {
    let (left, right) = (arena.left(id), arena.right(id));

    let child = match height(arena, left).cmp(&height(arena, right)) {
        std::cmp::Ordering::Greater => left,
        std::cmp::Ordering::Less => right,
        std::cmp::Ordering::Equal if arena.is_left_child(id) => left,
        std::cmp::Ordering::Equal => right,
    };

    child.expect("taller child of a leaf node")
}
