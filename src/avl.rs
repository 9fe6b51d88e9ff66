//! A height-balanced binary search tree.

use std::cmp::{self, Ordering};
use std::fmt;
use std::iter::FromIterator;

use crate::snapshot::{Snapshot, SnapshotNode};

/// An AVL tree of keys.
///
/// Equal keys are allowed and are routed to the right subtree on insert.
/// Lookups and removals act on the first equal key met on the way down.
///
/// ```
/// use avlrb::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert(1);
/// tree.insert(2);
/// tree.insert(3);
/// assert_eq!(tree.rotations(), 1);
/// assert_eq!(tree.find_path(&3), vec![2, 3]);
/// ```
pub struct AvlTree<K> {
    root: Link<K>,
    num_nodes: usize,
    num_rotations: usize,
}

struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
    height: usize,
}

type Link<K> = Option<Box<Node<K>>>;

/// An iterator over the keys of an [`AvlTree`] in sorted order.
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<K> AvlTree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
            num_rotations: 0,
        }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of levels of the tree, 0 if empty.
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Returns the number of single rotations since creation or the last reset.
    /// A double rotation counts as two.
    pub fn rotations(&self) -> usize {
        self.num_rotations
    }

    pub fn reset_rotations(&mut self) {
        self.num_rotations = 0;
    }

    /// Removes all keys. The rotation counter is left untouched.
    pub fn clear(&mut self) {
        log::trace!("clearing avl tree of {} nodes", self.num_nodes);
        // Unlink iteratively, dropping a degenerate tree recursively could
        // overflow the stack.
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.num_nodes = 0;
    }

    /// Gets an iterator over the keys of the tree in sorted order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.num_nodes,
        };
        iter.push_left(self.root.as_deref());
        iter
    }
}

impl<K: Ord> AvlTree<K> {
    /// Inserts a key. Equal keys are kept side by side.
    pub fn insert(&mut self, key: K) {
        let root = self.root.take();
        self.root = Some(self.insert_at(root, key));
    }

    /// Returns true if the tree contains a key equal to `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns a reference to the first key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.find(key).map(|node| &node.key)
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        fn check<K: Ord>(link: &Link<K>, num_nodes: &mut usize) -> usize {
            match link {
                None => 0,
                Some(node) => {
                    let left_height = check(&node.left, num_nodes);
                    let right_height = check(&node.right, num_nodes);

                    // Check cached height
                    assert_eq!(node.height, cmp::max(left_height, right_height) + 1);

                    // Check AVL condition (nearly balance)
                    assert!(left_height <= right_height + 1);
                    assert!(right_height <= left_height + 1);

                    *num_nodes += 1;
                    node.height
                }
            }
        }

        let mut num_nodes = 0;
        check(&self.root, &mut num_nodes);

        // Check number of nodes
        assert_eq!(num_nodes, self.num_nodes);

        // Check key order
        let keys: Vec<&K> = self.iter().collect();
        assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(keys.len(), self.num_nodes);
    }

    fn find(&self, key: &K) -> Option<&Node<K>> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Equal => break,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            }
        }
        current
    }

    fn insert_at(&mut self, link: Link<K>, key: K) -> Box<Node<K>> {
        match link {
            None => {
                self.num_nodes += 1;
                Node::create(key)
            }
            Some(mut node) => {
                if key < node.key {
                    node.left = Some(self.insert_at(node.left.take(), key));
                } else {
                    node.right = Some(self.insert_at(node.right.take(), key));
                }
                self.rebalance_node(node)
            }
        }
    }
}

impl<K> AvlTree<K> {
    fn rotate_left(&mut self, mut node: Box<Node<K>>) -> Box<Node<K>> {
        debug_assert!(node.right.is_some());
        match node.right.take() {
            None => node,
            Some(mut right) => {
                node.right = right.left.take();
                Self::adjust_height(&mut node);
                right.left = Some(node);
                Self::adjust_height(&mut right);
                self.num_rotations += 1;
                log::trace!("avl rotate left");
                right
            }
        }
    }

    fn rotate_right(&mut self, mut node: Box<Node<K>>) -> Box<Node<K>> {
        debug_assert!(node.left.is_some());
        match node.left.take() {
            None => node,
            Some(mut left) => {
                node.left = left.right.take();
                Self::adjust_height(&mut node);
                left.right = Some(node);
                Self::adjust_height(&mut left);
                self.num_rotations += 1;
                log::trace!("avl rotate right");
                left
            }
        }
    }

    /// Adjusts height and restores AVL condition (balance) at given node if necessary.
    /// Resulting balance will be +1, 0 or -1 height difference between left and right subtree.
    /// Initial balance must not exceed +2 or -2, which always holds after a single update.
    /// Returns the root of the rebalanced subtree.
    fn rebalance_node(&mut self, mut node: Box<Node<K>>) -> Box<Node<K>> {
        Self::adjust_height(&mut node);
        let balance = node.balance_factor();
        debug_assert!((-2..=2).contains(&balance));
        if balance > 1 {
            // Left-right case needs the left child tilted left first
            if let Some(left) = node.left.take() {
                node.left = Some(if left.balance_factor() < 0 {
                    self.rotate_left(left)
                } else {
                    left
                });
            }
            self.rotate_right(node)
        } else if balance < -1 {
            // Right-left case needs the right child tilted right first
            if let Some(right) = node.right.take() {
                node.right = Some(if right.balance_factor() > 0 {
                    self.rotate_right(right)
                } else {
                    right
                });
            }
            self.rotate_left(node)
        } else {
            node
        }
    }

    fn adjust_height(node: &mut Node<K>) {
        node.height = cmp::max(height(&node.left), height(&node.right)) + 1;
    }
}

impl<K: Ord + Clone> AvlTree<K> {
    /// Removes the first key equal to `key` met on the way down.
    /// Returns whether a key was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        let root = self.root.take();
        let (root, removed) = self.remove_at(root, key);
        self.root = root;
        removed
    }

    fn remove_at(&mut self, link: Link<K>, key: &K) -> (Link<K>, bool) {
        let mut node = match link {
            None => return (None, false),
            Some(node) => node,
        };
        let removed = match key.cmp(&node.key) {
            Ordering::Less => {
                let (left, removed) = self.remove_at(node.left.take(), key);
                node.left = left;
                removed
            }
            Ordering::Greater => {
                let (right, removed) = self.remove_at(node.right.take(), key);
                node.right = right;
                removed
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                // Node to-remove is stem or leaf, its only subtree takes its place
                (None, right) => {
                    self.num_nodes -= 1;
                    return (right, true);
                }
                (left, None) => {
                    self.num_nodes -= 1;
                    return (left, true);
                }
                (Some(left), Some(right)) => {
                    // Copy in-order successor key, then remove its first match from the right subtree
                    node.key = leftmost(&right).key.clone();
                    let (right, removed) = self.remove_at(Some(right), &node.key);
                    debug_assert!(removed);
                    node.left = Some(left);
                    node.right = right;
                    removed
                }
            },
        };
        (Some(self.rebalance_node(node)), removed)
    }

    /// Returns the keys visited while searching for `key`, from the root down to
    /// the first equal key. Returns an empty path if there is no such key.
    pub fn find_path(&self, key: &K) -> Vec<K> {
        let mut path = Vec::new();
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            path.push(node.key.clone());
            current = match key.cmp(&node.key) {
                Ordering::Equal => return path,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            }
        }
        Vec::new()
    }
}

impl<K: Clone> AvlTree<K> {
    /// Returns a copy of the tree structure where every node is annotated
    /// with its depth and balance factor.
    pub fn snapshot(&self) -> Snapshot<K, i32> {
        fn copy<K: Clone>(node: &Node<K>, depth: usize) -> Box<SnapshotNode<K, i32>> {
            let mut copied = SnapshotNode::new(node.key.clone(), depth, node.balance_factor());
            copied.left = node.left.as_deref().map(|left| copy(left, depth + 1));
            copied.right = node.right.as_deref().map(|right| copy(right, depth + 1));
            Box::new(copied)
        }
        Snapshot::new(self.root.as_deref().map(|root| copy(root, 0)))
    }
}

impl<K> Node<K> {
    fn create(key: K) -> Box<Node<K>> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 1,
        })
    }

    /// Height of left subtree minus height of right subtree.
    fn balance_factor(&self) -> i32 {
        height(&self.left) as i32 - height(&self.right) as i32
    }
}

fn leftmost<K>(mut node: &Node<K>) -> &Node<K> {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    node
}

fn height<K>(link: &Link<K>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

impl<'a, K> Iter<'a, K> {
    fn push_left(&mut self, mut current: Option<&'a Node<K>>) {
        while let Some(node) = current {
            self.stack.push(node);
            current = node.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

// Auto derived clone would require K: Clone
impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K> Drop for AvlTree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K> Default for AvlTree<K> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |key| self.insert(key));
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
