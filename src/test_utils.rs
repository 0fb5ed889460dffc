use std::{env, fmt::Debug, sync::Once};

use proptest::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::AvlTree;

const KEY_MAX: usize = 20;

/// Generate arbitrary keys from [0..[`KEY_MAX`]).
///
/// A small key domain encourages operations to collide on the same keys.
pub(crate) fn arbitrary_key() -> impl Strategy<Value = usize> {
    0..KEY_MAX
}

/// Linear-feedback shift register based PRNG.
///
/// Generates 65,535 unique values before cycling.
#[derive(Debug, Clone)]
pub(crate) struct Lfsr(u16);

impl Default for Lfsr {
    fn default() -> Self {
        Self(42)
    }
}

impl Lfsr {
    #[allow(clippy::should_implement_trait)]
    pub(crate) fn next(&mut self) -> u16 {
        let lsb = self.0 & 1;
        self.0 >>= 1;
        if lsb == 1 {
            self.0 ^= 0xD008;
        }
        assert_ne!(self.0, 42, "LFSR rollover");
        self.0
    }
}

static LOGGING: Once = Once::new();

/// Install a global tracing subscriber writing to the test output, filtered
/// by `RUST_LOG` (defaulting to warnings only).
pub(crate) fn init_test_logging() {
    LOGGING.call_once(|| {
        let filter = env::var("RUST_LOG")
            .ok()
            .and_then(|v| EnvFilter::try_new(v).ok())
            .unwrap_or_else(|| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_test_writer().with_target(true))
            .with(filter)
            .try_init();
    });
}

/// Assert the BST and AVL properties of tree nodes, ensuring the tree is
/// well-formed.
pub(crate) fn validate_tree_structure<K, V>(t: &AvlTree<K, V>)
where
    K: Ord + Debug,
    V: Debug,
{
    let a = t.arena();
    let root = match a.root() {
        Some(v) => v,
        None => {
            assert_eq!(t.len(), 0);
            return;
        }
    };

    assert_eq!(a.parent(root), None);

    let mut n_nodes = 0;

    // Perform a pre-order traversal of the tree.
    let mut stack = vec![root];
    while let Some(n) = stack.pop() {
        n_nodes += 1;

        let left = a.left(n);
        let right = a.right(n);

        // Prepare to visit the children
        stack.extend(left.iter().chain(right.iter()));

        // Invariant 1: the left child always contains a key strictly less
        // than this node.
        assert!(left
            .map(|v| a.node(v).key() < a.node(n).key())
            .unwrap_or(true));

        // Invariant 2: the right child always contains a key strictly
        // greater than this node.
        assert!(right
            .map(|v| a.node(v).key() > a.node(n).key())
            .unwrap_or(true));

        // Invariant 3: each child links back to this node.
        for child in left.iter().chain(right.iter()) {
            assert_eq!(a.parent(*child), Some(n));
        }

        // Invariant 4: the height of this node is always +1 of the maximum
        // child height, where an absent child has a height of 0.
        let left_height = left.map(|v| *a.meta(v)).unwrap_or_default();
        let right_height = right.map(|v| *a.meta(v)).unwrap_or_default();
        let want_height = left_height.max(right_height) + 1;

        assert_eq!(
            *a.meta(n),
            want_height,
            "expect node with key {:?} to have height {}, has {}",
            a.node(n).key(),
            want_height,
            a.meta(n),
        );

        // Invariant 5: the absolute height difference between the left
        // subtree and right subtree (the "balance factor") cannot exceed 1.
        let balance = (left_height as i64 - right_height as i64).abs();
        assert!(
            balance <= 1,
            "balance={balance}, node={:?}, stack={stack:?}",
            a.node(n),
        );
    }

    // All nodes in the arena are reachable from the root.
    assert_eq!(n_nodes, t.len());

    // And the audit agrees.
    assert_eq!(t.validate(), Ok(()));
}
