//! A height-balanced (AVL) binary search tree.
//!
//! [`AvlTree`] is an ordered map that keeps the heights of the two subtrees of
//! every node within one of each other, bounding lookups, inserts and removals
//! to `O(log n)` steps.
//!
//! ```
//! use hbtree::AvlTree;
//!
//! let mut t = AvlTree::default();
//!
//! for v in 1..=7 {
//!     t.insert(v, v * 10);
//! }
//!
//! // Inserting ascending keys produces a complete tree.
//! assert_eq!(t.height(), 3);
//! assert_eq!(t.get(&4), Some(&40));
//!
//! assert_eq!(t.remove(&1), Some(10));
//! assert_eq!(t.keys().copied().collect::<Vec<_>>(), [2, 3, 4, 5, 6, 7]);
//! ```
//!
//! # Structure
//!
//! Nodes live in an arena and are linked by index: child links are owning
//! edges, and each node holds a back-reference to its parent. The
//! [`BalancedTree`] performs the ordered-BST mechanics and, after each
//! structural edit, calls into a [`Rebalance`] discipline which restores its
//! invariants by rotating nodes around through the [`NodeArena`].
//!
//! The [`Avl`] discipline caches the height of each node and, after each
//! edit, walks up from the lowest affected node refreshing heights and
//! rotating any unbalanced ancestor:
//!
//! * After an insert at most one rotation (single or double) is needed.
//! * After a removal a rotation may be needed at every level up to the root.

#![deny(rustdoc::broken_intra_doc_links, rust_2018_idioms)]
#![warn(missing_debug_implementations, clippy::todo, clippy::dbg_macro)]

mod arena;
mod avl;
mod dot;
mod error;
mod iter;
mod node;
mod rebalance;
mod tree;

#[cfg(test)]
mod test_utils;

pub use arena::NodeArena;
pub use avl::{Avl, RebalanceStats};
pub use error::InvariantViolation;
pub use iter::{IntoIter, Iter};
pub use node::NodeId;
pub use rebalance::Rebalance;
pub use tree::{AvlTree, BalancedTree};
