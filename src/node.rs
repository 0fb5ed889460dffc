/// A stable handle to a tree node stored in a [`NodeArena`](crate::NodeArena).
///
/// Handles are generational: a handle to a node that has since been removed
/// never aliases a node allocated later into the same slot.
pub type NodeId = generational_arena::Index;

/// A single tree node.
///
/// Child links are owning edges of the tree; the parent link is a
/// back-reference. All three are arena indices, so the structure holds no
/// reference cycles.
#[derive(Debug, Clone)]
pub(crate) struct Node<K, V, M> {
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    pub(crate) parent: Option<NodeId>,

    /// Per-node metadata owned by the balancing discipline (the AVL height).
    pub(crate) meta: M,

    key: K,
    value: V,
}

impl<K, V, M> Node<K, V, M> {
    pub(crate) fn new(key: K, value: V, meta: M, parent: Option<NodeId>) -> Self {
        Self {
            left: None,
            right: None,
            parent,
            meta,
            key,
            value,
        }
    }

    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    pub(crate) fn value(&self) -> &V {
        &self.value
    }

    pub(crate) fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    /// Replace the value held in this node, returning the old value.
    pub(crate) fn replace_value(&mut self, value: V) -> V {
        std::mem::replace(&mut self.value, value)
    }

    /// Exchange the key/value payload of `self` and `other`, leaving the links
    /// and metadata of both nodes untouched.
    pub(crate) fn swap_payload(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.key, &mut other.key);
        std::mem::swap(&mut self.value, &mut other.value);
    }

    /// Explode this [`Node`] into the key and value it contains.
    pub(crate) fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}
