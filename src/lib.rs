//! AVL and red-black tree engines instrumented for comparing their rebalancing behavior.
//!
//! Both engines keep equal keys (routed to the right on insert), count their
//! rotations and export render-ready [`Snapshot`]s. The [`compare`] module runs
//! identical randomized workloads against both.

pub mod avl;
pub mod compare;
pub mod rbtree;
pub mod snapshot;

pub use avl::AvlTree;
pub use rbtree::{Color, RbTree};
pub use snapshot::{Snapshot, SnapshotNode};

/// The operations shared by [`AvlTree`] and [`RbTree`].
///
/// ```
/// use avlrb::{AvlTree, BalancedTree, RbTree};
///
/// fn fill<T: BalancedTree<i32> + Default>() -> T {
///     let mut tree = T::default();
///     for key in [50, 30, 70, 20, 40] {
///         tree.insert(key);
///     }
///     tree
/// }
///
/// assert_eq!(fill::<AvlTree<_>>().find_path(&40), vec![50, 30, 40]);
/// assert_eq!(fill::<RbTree<_>>().find_path(&40), vec![50, 30, 40]);
/// ```
pub trait BalancedTree<K> {
    /// Per node annotation carried by snapshots.
    type Meta;

    /// Inserts a key. Equal keys are routed right and kept.
    fn insert(&mut self, key: K);

    /// Removes the first structural match. Returns whether a key was removed.
    fn remove(&mut self, key: &K) -> bool;

    fn contains(&self, key: &K) -> bool;

    /// Keys visited from the root to the first match, empty if there is none.
    fn find_path(&self, key: &K) -> Vec<K>;

    /// Number of levels, 0 for an empty tree.
    fn height(&self) -> usize;

    /// Single rotations performed since creation or the last reset.
    fn rotations(&self) -> usize;

    fn reset_rotations(&mut self);

    /// Number of keys, duplicates included.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn snapshot(&self) -> Snapshot<K, Self::Meta>;
}

impl<K: Ord + Clone> BalancedTree<K> for AvlTree<K> {
    /// Balance factor, left height minus right height.
    type Meta = i32;

    fn insert(&mut self, key: K) {
        AvlTree::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        AvlTree::remove(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        AvlTree::contains(self, key)
    }

    fn find_path(&self, key: &K) -> Vec<K> {
        AvlTree::find_path(self, key)
    }

    fn height(&self) -> usize {
        AvlTree::height(self)
    }

    fn rotations(&self) -> usize {
        AvlTree::rotations(self)
    }

    fn reset_rotations(&mut self) {
        AvlTree::reset_rotations(self)
    }

    fn len(&self) -> usize {
        AvlTree::len(self)
    }

    fn snapshot(&self) -> Snapshot<K, i32> {
        AvlTree::snapshot(self)
    }
}

impl<K: Ord + Clone> BalancedTree<K> for RbTree<K> {
    type Meta = Color;

    fn insert(&mut self, key: K) {
        RbTree::insert(self, key)
    }

    fn remove(&mut self, key: &K) -> bool {
        RbTree::remove(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        RbTree::contains(self, key)
    }

    fn find_path(&self, key: &K) -> Vec<K> {
        RbTree::find_path(self, key)
    }

    fn height(&self) -> usize {
        RbTree::height(self)
    }

    fn rotations(&self) -> usize {
        RbTree::rotations(self)
    }

    fn reset_rotations(&mut self) {
        RbTree::reset_rotations(self)
    }

    fn len(&self) -> usize {
        RbTree::len(self)
    }

    fn snapshot(&self) -> Snapshot<K, Color> {
        RbTree::snapshot(self)
    }
}

#[cfg(test)]
mod tests;
