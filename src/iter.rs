use generational_arena::Arena;

use crate::{
    arena::NodeArena,
    node::{Node, NodeId},
};

/// An in-order iterator over the entries of a
/// [`BalancedTree`](crate::BalancedTree), yielding them in ascending key
/// order.
#[derive(Debug)]
pub struct Iter<'a, K, V, M> {
    arena: &'a NodeArena<K, V, M>,
    stack: Vec<NodeId>,
}

impl<'a, K, V, M> Iter<'a, K, V, M> {
    pub(crate) fn new(arena: &'a NodeArena<K, V, M>) -> Self {
        let mut this = Self {
            arena,
            stack: vec![],
        };

        // Descend down the left side of the tree.
        if let Some(root) = arena.root() {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: NodeId) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = self.arena.left(v);
        }
    }
}

impl<'a, K, V, M> Iterator for Iter<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.stack.pop()?;

        // Descend down the left side of the right hand child of this node, if
        // any.
        if let Some(right) = self.arena.right(v) {
            self.push_subtree(right);
        }

        let n = self.arena.node(v);
        Some((n.key(), n.value()))
    }
}

/// An iterator of owned entries as the underlying tree `into_iter()` impl,
/// yielding them in ascending key order.
#[derive(Debug)]
pub struct IntoIter<K, V, M> {
    nodes: Arena<Node<K, V, M>>,
    stack: Vec<NodeId>,
}

impl<K, V, M> IntoIter<K, V, M> {
    pub(crate) fn new(arena: NodeArena<K, V, M>) -> Self {
        let (nodes, root) = arena.into_parts();
        let mut this = Self {
            nodes,
            stack: vec![],
        };

        // Descend down the left side of the tree.
        if let Some(root) = root {
            this.push_subtree(root);
        }

        this
    }

    fn push_subtree(&mut self, subtree_root: NodeId) {
        let mut ptr = Some(subtree_root);

        while let Some(v) = ptr {
            self.stack.push(v);
            ptr = self.nodes[v].left;
        }
    }
}

impl<K, V, M> Iterator for IntoIter<K, V, M> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let v = self.stack.pop()?;

        // The left subtree of "v" has been fully yielded (and freed); the right
        // subtree is visited next.
        let n = self.nodes.remove(v)?;
        if let Some(right) = n.right {
            self.push_subtree(right);
        }

        Some(n.into_tuple())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.nodes.len(), Some(self.nodes.len()))
    }
}

impl<K, V, M> ExactSizeIterator for IntoIter<K, V, M> {}
