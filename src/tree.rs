use std::{borrow::Borrow, cmp::Ordering, fmt::Debug};

use crate::{
    arena::{NodeArena, Side},
    avl::{height, Avl, RebalanceStats},
    error::{validate, InvariantViolation},
    iter::{IntoIter, Iter},
    node::NodeId,
    rebalance::Rebalance,
};

/// An ordered map backed by a binary search tree, balanced by the discipline
/// `D`.
///
/// The tree performs the ordered-BST mechanics (search, leaf insertion and
/// physical removal) and calls the [`Rebalance`] hooks of `D` once after each
/// structural edit.
pub struct BalancedTree<K, V, D = Avl>
where
    D: Rebalance,
{
    arena: NodeArena<K, V, D::Meta>,
    discipline: D,
}

/// A height-balanced (AVL) ordered map.
pub type AvlTree<K, V> = BalancedTree<K, V, Avl>;

impl<K, V, D> Debug for BalancedTree<K, V, D>
where
    K: Debug,
    V: Debug,
    D: Rebalance + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BalancedTree")
            .field("arena", &self.arena)
            .field("discipline", &self.discipline)
            .finish()
    }
}

impl<K, V, D> Clone for BalancedTree<K, V, D>
where
    K: Clone,
    V: Clone,
    D: Rebalance + Clone,
{
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            discipline: self.discipline.clone(),
        }
    }
}

impl<K, V, D> Default for BalancedTree<K, V, D>
where
    D: Rebalance + Default,
{
    fn default() -> Self {
        Self::with_discipline(D::default())
    }
}

impl<K, V, D> BalancedTree<K, V, D>
where
    D: Rebalance + Default,
{
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K, V, D> BalancedTree<K, V, D>
where
    D: Rebalance,
{
    /// Construct an empty tree balanced by the provided `discipline`.
    pub fn with_discipline(discipline: D) -> Self {
        Self {
            arena: NodeArena::default(),
            discipline,
        }
    }

    /// Returns the balancing discipline of this tree.
    pub fn discipline(&self) -> &D {
        &self.discipline
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all entries from the tree.
    pub fn clear(&mut self) {
        self.arena.clear();
    }

    /// Insert `value` for `key`, returning the previous value if `key` was
    /// already present.
    ///
    /// Replacing the value of an existing key does not modify the tree
    /// structure, and the key itself is not updated.
    pub fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        K: Ord,
    {
        let Some(mut ptr) = self.arena.root() else {
            let meta = self.discipline.leaf_meta();
            self.arena.insert_root(key, value, meta);
            return None;
        };

        // Descend to the slot for "key".
        let (parent, side) = loop {
            let n = self.arena.node(ptr);
            let (next, side) = match key.cmp(n.key()) {
                Ordering::Less => (n.left, Side::Left),
                Ordering::Greater => (n.right, Side::Right),
                Ordering::Equal => {
                    return Some(self.arena.node_mut(ptr).replace_value(value));
                }
            };

            match next {
                Some(v) => ptr = v,
                None => break (ptr, side),
            }
        };

        let meta = self.discipline.leaf_meta();
        let id = self.arena.attach(parent, side, key, value, meta);
        self.discipline.after_insert(&mut self.arena, id);

        None
    }

    /// Remove `key` from the tree, returning the value if it was present.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_k, v)| v)
    }

    /// Remove `key` from the tree, returning the stored key and value if it
    /// was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key)?;

        // A node may have 0, 1 or 2 children:
        //
        //                          +----------+
        //                          |  parent  |
        //                          +----------+
        //                                |
        //                                v
        //                          +----------+
        //                     +----|    id    |----+
        //                     |    +----------+    |
        //                     |                    |
        //                     v                    v
        //               +-----------+       +------------+
        //               |   left    |       |   right    |
        //               +-----------+       +------------+
        //
        // With at most one child, "id" is unlinked directly and its child (if
        // any) takes its place.
        //
        // With two children, the in-order successor (the left-most node of the
        // right subtree, which has no left child) swaps payloads with "id" and
        // the successor's slot is unlinked instead, preserving the binary
        // search property.
        let target = match (self.arena.left(id), self.arena.right(id)) {
            (Some(_), Some(right)) => {
                let successor = self.arena.first_in(right);
                debug_assert!(self.arena.left(successor).is_none());

                self.arena.swap_payload(id, successor);
                successor
            }
            _ => id,
        };

        let (node, edit_point) = self.arena.detach(target);
        self.discipline.after_remove(&mut self.arena, edit_point);

        Some(node.into_tuple())
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|id| self.arena.node(id).value())
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key)?;
        Some(self.arena.node_mut(id).value_mut())
    }

    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|id| {
            let n = self.arena.node(id);
            (n.key(), n.value())
        })
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns the entry with the minimum key, if any.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let n = self.arena.node(self.arena.first_in(self.arena.root()?));
        Some((n.key(), n.value()))
    }

    /// Returns the entry with the maximum key, if any.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let n = self.arena.node(self.arena.last_in(self.arena.root()?));
        Some((n.key(), n.value()))
    }

    /// Iterate over the entries of the tree in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V, D::Meta> {
        Iter::new(&self.arena)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(k, _v)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_k, v)| v)
    }

    pub(crate) fn arena(&self) -> &NodeArena<K, V, D::Meta> {
        &self.arena
    }

    fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut ptr = self.arena.root();

        while let Some(id) = ptr {
            let n = self.arena.node(id);
            ptr = match key.cmp(n.key().borrow()) {
                Ordering::Less => n.left,
                Ordering::Equal => return Some(id),
                Ordering::Greater => n.right,
            };
        }

        None
    }
}

impl<K, V> BalancedTree<K, V, Avl> {
    /// The height of the tree, where a tree containing a single entry has a
    /// height of 1 and an empty tree a height of 0.
    pub fn height(&self) -> u8 {
        height(&self.arena, self.arena.root())
    }

    /// Rotation counters of the AVL engine balancing this tree.
    pub fn stats(&self) -> RebalanceStats {
        self.discipline.stats()
    }

    /// Audit the structure of the tree, returning the first violation of the
    /// link, ordering, height or balance invariants found (if any).
    ///
    /// A tree only mutated through its public API always validates; this is a
    /// debugging aid.
    pub fn validate(&self) -> Result<(), InvariantViolation>
    where
        K: Ord + Debug,
    {
        validate(&self.arena)
    }
}

impl<K, V, D> IntoIterator for BalancedTree<K, V, D>
where
    D: Rebalance,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, D::Meta>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.arena)
    }
}

impl<'a, K, V, D> IntoIterator for &'a BalancedTree<K, V, D>
where
    D: Rebalance,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, D::Meta>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, D> Extend<(K, V)> for BalancedTree<K, V, D>
where
    K: Ord,
    D: Rebalance,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, D> FromIterator<(K, V)> for BalancedTree<K, V, D>
where
    K: Ord,
    D: Rebalance + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut t = Self::default();
        t.extend(iter);
        t
    }
}
