use generational_arena::Arena;

use crate::node::{Node, NodeId};

/// The side of a parent node a child is linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Arena storage for the nodes of a single binary tree, and the link
/// operations over them.
///
/// This is the structural half of a balanced tree: it knows how nodes are
/// linked together and how to rewire them, but nothing of key ordering or
/// balancing. A [`Rebalance`](crate::Rebalance) discipline is handed a
/// mutable reference to the arena from within its hooks and uses the
/// accessors and [`NodeArena::rotate()`] to restore its invariants.
#[derive(Debug, Clone)]
pub struct NodeArena<K, V, M> {
    nodes: Arena<Node<K, V, M>>,
    root: Option<NodeId>,
}

impl<K, V, M> Default for NodeArena<K, V, M> {
    fn default() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }
}

impl<K, V, M> NodeArena<K, V, M> {
    /// The current root of the tree, if any.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// The left child of `id`, if any.
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].left
    }

    /// The right child of `id`, if any.
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].right
    }

    /// The parent of `id`, or [`None`] for the root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    /// Returns true if `id` is linked as the left child of its parent.
    ///
    /// The root is not a left child.
    pub fn is_left_child(&self, id: NodeId) -> bool {
        self.parent(id)
            .map(|p| self.nodes[p].left == Some(id))
            .unwrap_or_default()
    }

    /// Read the discipline metadata of `id`.
    pub fn meta(&self, id: NodeId) -> &M {
        &self.nodes[id].meta
    }

    /// Mutably borrow the discipline metadata of `id`.
    pub fn meta_mut(&mut self, id: NodeId) -> &mut M {
        &mut self.nodes[id].meta
    }

    /// Restructure the subtree rooted at `r` so that `d` becomes its root.
    ///
    /// ```text
    ///                  d
    ///                /   \
    ///               b     f
    ///                \   /
    ///                 c e
    /// ```
    ///
    /// `d` takes the slot `r` occupied under `r`'s parent (or becomes the tree
    /// root), `b` and `f` become the left and right children of `d`, and the
    /// displaced subtrees `c` and `e` (if any) become the right child of `b`
    /// and the left child of `f` respectively. The left subtree of `b` and the
    /// right subtree of `f` are left in place.
    ///
    /// The caller picks the six nodes such that the in-order sequence
    /// `b, c, d, e, f` matches the key ordering; under that precondition the
    /// in-order sequence of the whole tree is unchanged.
    ///
    /// This is a pure link rewrite: no metadata is touched.
    ///
    /// # Panics
    ///
    /// Panics if any of the provided handles is not live in this arena.
    pub fn rotate(
        &mut self,
        r: NodeId,
        b: NodeId,
        c: Option<NodeId>,
        d: NodeId,
        e: Option<NodeId>,
        f: NodeId,
    ) {
        // Read the parent of "r" before any links are rewritten, as "r" may be
        // "b" or "f" and have its parent pointer reassigned below.
        let parent = self.nodes[r].parent;

        // "d" takes the slot of "r".
        self.nodes[d].parent = parent;
        match parent {
            Some(p) if self.nodes[p].left == Some(r) => self.nodes[p].left = Some(d),
            Some(p) => {
                debug_assert_eq!(self.nodes[p].right, Some(r));
                self.nodes[p].right = Some(d);
            }
            None => self.root = Some(d),
        }

        // b - c
        self.nodes[b].right = c;
        if let Some(c) = c {
            self.nodes[c].parent = Some(b);
        }

        // e - f
        self.nodes[f].left = e;
        if let Some(e) = e {
            self.nodes[e].parent = Some(f);
        }

        // b - d - f
        self.nodes[d].left = Some(b);
        self.nodes[d].right = Some(f);
        self.nodes[b].parent = Some(d);
        self.nodes[f].parent = Some(d);
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V, M> {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V, M> {
        &mut self.nodes[id]
    }

    /// Allocate a new node as the root of an empty tree.
    pub(crate) fn insert_root(&mut self, key: K, value: V, meta: M) -> NodeId {
        debug_assert!(self.root.is_none());

        let id = self.nodes.insert(Node::new(key, value, meta, None));
        self.root = Some(id);
        id
    }

    /// Allocate a new leaf and link it as the `side` child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `parent` already has a child on `side`.
    pub(crate) fn attach(
        &mut self,
        parent: NodeId,
        side: Side,
        key: K,
        value: V,
        meta: M,
    ) -> NodeId {
        let id = self.nodes.insert(Node::new(key, value, meta, Some(parent)));

        let slot = match side {
            Side::Left => &mut self.nodes[parent].left,
            Side::Right => &mut self.nodes[parent].right,
        };
        assert!(slot.is_none(), "attach over an existing {side:?} child");
        *slot = Some(id);

        id
    }

    /// Unlink and free `id`, which must have at most one child.
    ///
    /// The child (if any) is linked in the slot `id` occupied. Returns the
    /// freed node and the parent of the detachment point, which is [`None`]
    /// when `id` was the root.
    pub(crate) fn detach(&mut self, id: NodeId) -> (Node<K, V, M>, Option<NodeId>) {
        let (left, right, parent) = {
            let n = &self.nodes[id];
            (n.left, n.right, n.parent)
        };
        assert!(
            left.is_none() || right.is_none(),
            "cannot detach a node with two children"
        );

        let child = left.or(right);
        if let Some(c) = child {
            self.nodes[c].parent = parent;
        }

        match parent {
            Some(p) if self.nodes[p].left == Some(id) => self.nodes[p].left = child,
            Some(p) => self.nodes[p].right = child,
            None => self.root = child,
        }

        let node = self
            .nodes
            .remove(id)
            .expect("detached node must be live in the arena");

        (node, parent)
    }

    /// Exchange the key/value payloads of two distinct nodes.
    pub(crate) fn swap_payload(&mut self, a: NodeId, b: NodeId) {
        match self.nodes.get2_mut(a, b) {
            (Some(a), Some(b)) => a.swap_payload(b),
            _ => panic!("swap of a node not live in the arena"),
        }
    }

    /// Descend the left-most edge of the subtree rooted at `id`.
    pub(crate) fn first_in(&self, mut id: NodeId) -> NodeId {
        while let Some(l) = self.nodes[id].left {
            id = l;
        }
        id
    }

    /// Descend the right-most edge of the subtree rooted at `id`.
    pub(crate) fn last_in(&self, mut id: NodeId) -> NodeId {
        while let Some(r) = self.nodes[id].right {
            id = r;
        }
        id
    }

    /// Split the arena into its node storage and root handle.
    pub(crate) fn into_parts(self) -> (Arena<Node<K, V, M>>, Option<NodeId>) {
        (self.nodes, self.root)
    }
}
