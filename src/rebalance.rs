use std::fmt::Debug;

use crate::{arena::NodeArena, node::NodeId};

/// A balancing discipline plugged into a [`BalancedTree`].
///
/// The tree performs the ordered-BST mechanics (locating the slot for a key,
/// linking a new leaf, physically detaching a node) and then calls exactly one
/// of the hooks below, synchronously, before any further structural edit. The
/// discipline restores its invariants from within the hook, using the
/// [`NodeArena`] accessors and [`NodeArena::rotate()`].
///
/// The discipline owns one [`Rebalance::Meta`] value per node, stored inline
/// in the node and reachable through [`NodeArena::meta()`].
///
/// [`BalancedTree`]: crate::BalancedTree
pub trait Rebalance {
    /// Per-node balancing metadata.
    type Meta: Debug + Clone;

    /// The metadata of a newly linked leaf node.
    fn leaf_meta(&self) -> Self::Meta;

    /// Called once after `node` has been linked into the tree as a new leaf.
    fn after_insert<K, V>(&mut self, arena: &mut NodeArena<K, V, Self::Meta>, node: NodeId);

    /// Called once after a node has been physically removed from the tree.
    ///
    /// `edit_point` is the parent of the detachment point, or [`None`] if the
    /// removed node was the root.
    fn after_remove<K, V>(
        &mut self,
        arena: &mut NodeArena<K, V, Self::Meta>,
        edit_point: Option<NodeId>,
    );
}
