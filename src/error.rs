use std::fmt::Debug;

use thiserror::Error;

use crate::{
    arena::NodeArena,
    avl::{balance_factor, height},
    node::NodeId,
};

/// A structural defect found by [`AvlTree::validate()`].
///
/// Keys are rendered with their [`Debug`] representation.
///
/// [`AvlTree::validate()`]: crate::BalancedTree::validate
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("node {key} has a stale parent link")]
    ParentLink { key: String },

    #[error("node {key} is out of order with respect to {neighbour}")]
    Ordering { key: String, neighbour: String },

    #[error("node {key} has height {got}, expected {want}")]
    Height { key: String, got: u8, want: u8 },

    #[error("node {key} has balance factor {balance_factor}")]
    Unbalanced { key: String, balance_factor: i16 },
}

/// Walk the tree in-order, checking every node for link, ordering, height and
/// balance consistency.
pub(crate) fn validate<K, V>(arena: &NodeArena<K, V, u8>) -> Result<(), InvariantViolation>
where
    K: Ord + Debug,
{
    let Some(root) = arena.root() else {
        return Ok(());
    };

    if arena.parent(root).is_some() {
        return Err(InvariantViolation::ParentLink {
            key: key_of(arena, root),
        });
    }

    // An explicit stack of (node, children_visited) frames, so that
    // pathological (unbalanced) input cannot overflow the call stack.
    let mut stack = vec![(root, false)];
    let mut prev: Option<NodeId> = None;

    while let Some((id, expanded)) = stack.pop() {
        if !expanded {
            // Visit the right subtree last, this node second and the left
            // subtree first.
            if let Some(r) = arena.right(id) {
                stack.push((r, false));
            }
            stack.push((id, true));
            if let Some(l) = arena.left(id) {
                stack.push((l, false));
            }

            for child in [arena.left(id), arena.right(id)].into_iter().flatten() {
                if arena.parent(child) != Some(id) {
                    return Err(InvariantViolation::ParentLink {
                        key: key_of(arena, child),
                    });
                }
            }

            continue;
        }

        // In-order position: keys must be strictly increasing.
        if let Some(p) = prev {
            if arena.node(p).key() >= arena.node(id).key() {
                return Err(InvariantViolation::Ordering {
                    key: key_of(arena, id),
                    neighbour: key_of(arena, p),
                });
            }
        }
        prev = Some(id);

        // Checked against the stored child heights, each of which is checked
        // in turn when that child is visited.
        let want = 1 + height(arena, arena.left(id)).max(height(arena, arena.right(id)));
        let got = height(arena, Some(id));
        if got != want {
            return Err(InvariantViolation::Height {
                key: key_of(arena, id),
                got,
                want,
            });
        }

        let balance_factor = balance_factor(arena, id);
        if balance_factor.abs() > 1 {
            return Err(InvariantViolation::Unbalanced {
                key: key_of(arena, id),
                balance_factor,
            });
        }
    }

    Ok(())
}

fn key_of<K, V, M>(arena: &NodeArena<K, V, M>, id: NodeId) -> String
where
    K: Debug,
{
    format!("{:?}", arena.node(id).key())
}
