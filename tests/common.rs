#![allow(unused, reason = "not used by all tests")]

use avlrb::{Color, Snapshot, SnapshotNode};

/// Asserts the AVL invariants on a snapshot and returns its height.
pub fn assert_avl(snapshot: &Snapshot<i32, i32>) -> usize {
    fn check(node: Option<&SnapshotNode<i32, i32>>, depth: usize) -> usize {
        match node {
            None => 0,
            Some(node) => {
                assert_eq!(node.depth, depth);
                let left = check(node.left.as_deref(), depth + 1);
                let right = check(node.right.as_deref(), depth + 1);
                assert_eq!(node.meta, left as i32 - right as i32);
                assert!((-1..=1).contains(&node.meta), "unbalanced at {}", node.key);
                left.max(right) + 1
            }
        }
    }
    assert_sorted(snapshot);
    check(snapshot.root(), 0)
}

/// Asserts the red-black invariants on a snapshot and returns its black height.
pub fn assert_red_black(snapshot: &Snapshot<i32, Color>) -> usize {
    fn check(node: Option<&SnapshotNode<i32, Color>>, parent: Color, depth: usize) -> usize {
        match node {
            None => 1,
            Some(node) => {
                assert_eq!(node.depth, depth);
                assert!(
                    !(parent.is_red() && node.meta.is_red()),
                    "red node {} has red parent",
                    node.key
                );
                let left = check(node.left.as_deref(), node.meta, depth + 1);
                let right = check(node.right.as_deref(), node.meta, depth + 1);
                assert_eq!(left, right, "black height differs below {}", node.key);
                left + usize::from(node.meta.is_black())
            }
        }
    }
    if let Some(root) = snapshot.root() {
        assert_eq!(root.meta, Color::Black);
    }
    assert_sorted(snapshot);
    check(snapshot.root(), Color::Black, 0)
}

pub fn assert_sorted<M>(snapshot: &Snapshot<i32, M>) {
    let keys = snapshot.keys();
    assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]), "{keys:?}");
}
