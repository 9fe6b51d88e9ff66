//! A color-balanced binary search tree.

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem::MaybeUninit;
use std::ptr::NonNull;

use crate::snapshot::{Snapshot, SnapshotNode};

/// Color of a red-black tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    pub fn is_red(self) -> bool {
        self == Color::Red
    }

    pub fn is_black(self) -> bool {
        self == Color::Black
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Red => f.write_str("red"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// A red-black tree of keys.
///
/// Equal keys are allowed and are routed to the right subtree on insert.
/// Lookups and removals act on the first equal key met on the way down.
///
/// ```
/// use avlrb::{Color, RbTree};
/// let mut tree = RbTree::new();
/// tree.insert(10);
/// tree.insert(20);
/// tree.insert(30);
/// assert_eq!(tree.rotations(), 1);
/// let snapshot = tree.snapshot();
/// let root = snapshot.root().unwrap();
/// assert_eq!((root.key, root.meta), (20, Color::Black));
/// ```
pub struct RbTree<K> {
    root: NodePtr<K>,
    // Shared leaf standing in for every absent child and for the parent of the root
    nil: NodePtr<K>,
    num_nodes: usize,
    num_rotations: usize,
    marker: PhantomData<Box<Node<K>>>,
}

// Nodes are owned by the tree and only reachable through it.
unsafe impl<K: Send> Send for RbTree<K> {}
unsafe impl<K: Sync> Sync for RbTree<K> {}

type NodePtr<K> = NonNull<Node<K>>;

struct Node<K> {
    // Uninitialized for the sentinel only
    key: MaybeUninit<K>,
    left: NodePtr<K>,
    right: NodePtr<K>,
    parent: NodePtr<K>,
    color: Color,
}

/// An iterator over the keys of an [`RbTree`] in sorted order.
pub struct Iter<'a, K> {
    stack: Vec<NodePtr<K>>,
    nil: NodePtr<K>,
    remaining: usize,
    marker: PhantomData<&'a K>,
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl<K> RbTree<K> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        let nil = Node::create_sentinel();
        Self {
            root: nil,
            nil,
            num_nodes: 0,
            num_rotations: 0,
            marker: PhantomData,
        }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root == self.nil
    }

    /// Returns the number of keys in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the number of levels of the tree, 0 if empty.
    pub fn height(&self) -> usize {
        let mut max_height = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((node_ptr, height)) = stack.pop() {
            if node_ptr != self.nil {
                max_height = max_height.max(height);
                unsafe {
                    stack.push((node_ptr.as_ref().left, height + 1));
                    stack.push((node_ptr.as_ref().right, height + 1));
                }
            }
        }
        max_height
    }

    /// Returns the number of single rotations since creation or the last reset.
    pub fn rotations(&self) -> usize {
        self.num_rotations
    }

    pub fn reset_rotations(&mut self) {
        self.num_rotations = 0;
    }

    /// Removes all keys. The rotation counter is left untouched.
    pub fn clear(&mut self) {
        log::trace!("clearing red-black tree of {} nodes", self.num_nodes);
        self.postorder(|node_ptr| unsafe { Node::destroy(node_ptr) });
        self.root = self.nil;
        unsafe { Node::reset_sentinel(self.nil) };
        self.num_nodes = 0;
    }

    /// Gets an iterator over the keys of the tree in sorted order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter {
            stack: Vec::new(),
            nil: self.nil,
            remaining: self.num_nodes,
            marker: PhantomData,
        };
        iter.push_left(self.root);
        iter
    }

    fn rotate_left(&mut self, mut node_ptr: NodePtr<K>) {
        unsafe {
            let mut right_ptr = node_ptr.as_ref().right;
            debug_assert!(right_ptr != self.nil);

            node_ptr.as_mut().right = right_ptr.as_ref().left;
            if let Some(mut right_left_ptr) = self.link(right_ptr.as_ref().left) {
                right_left_ptr.as_mut().parent = node_ptr;
            }

            right_ptr.as_mut().parent = node_ptr.as_ref().parent;
            self.replace_child(node_ptr.as_ref().parent, node_ptr, right_ptr);

            right_ptr.as_mut().left = node_ptr;
            node_ptr.as_mut().parent = right_ptr;
        }
        self.num_rotations += 1;
        log::trace!("red-black rotate left");
    }

    fn rotate_right(&mut self, mut node_ptr: NodePtr<K>) {
        unsafe {
            let mut left_ptr = node_ptr.as_ref().left;
            debug_assert!(left_ptr != self.nil);

            node_ptr.as_mut().left = left_ptr.as_ref().right;
            if let Some(mut left_right_ptr) = self.link(left_ptr.as_ref().right) {
                left_right_ptr.as_mut().parent = node_ptr;
            }

            left_ptr.as_mut().parent = node_ptr.as_ref().parent;
            self.replace_child(node_ptr.as_ref().parent, node_ptr, left_ptr);

            left_ptr.as_mut().right = node_ptr;
            node_ptr.as_mut().parent = left_ptr;
        }
        self.num_rotations += 1;
        log::trace!("red-black rotate right");
    }

    // Points the parent's link (or the root) that refers to `old` at `new`.
    // Does not touch the parent link of `new`.
    unsafe fn replace_child(&mut self, mut parent_ptr: NodePtr<K>, old: NodePtr<K>, new: NodePtr<K>) {
        if parent_ptr == self.nil {
            self.root = new;
        } else if parent_ptr.as_ref().left == old {
            parent_ptr.as_mut().left = new;
        } else {
            parent_ptr.as_mut().right = new;
        }
    }

    // Puts the subtree rooted at `new` in place of the subtree rooted at `old`.
    // The parent link of `new` is set even if it is the sentinel, delete fixup relies on it.
    unsafe fn transplant(&mut self, old: NodePtr<K>, mut new: NodePtr<K>) {
        let parent_ptr = old.as_ref().parent;
        self.replace_child(parent_ptr, old, new);
        new.as_mut().parent = parent_ptr;
    }

    // Restores the red-black properties after inserting the red node `node_ptr`.
    unsafe fn insert_fixup(&mut self, mut node_ptr: NodePtr<K>) {
        // The sentinel is black, so a red parent is never the sentinel
        while Self::color(node_ptr.as_ref().parent).is_red() {
            let parent_ptr = node_ptr.as_ref().parent;
            let grandparent_ptr = parent_ptr.as_ref().parent;
            if parent_ptr == grandparent_ptr.as_ref().left {
                let uncle_ptr = grandparent_ptr.as_ref().right;
                if Self::color(uncle_ptr).is_red() {
                    // Push violation up to grandparent
                    Self::set_color(parent_ptr, Color::Black);
                    Self::set_color(uncle_ptr, Color::Black);
                    Self::set_color(grandparent_ptr, Color::Red);
                    node_ptr = grandparent_ptr;
                } else {
                    if node_ptr == parent_ptr.as_ref().right {
                        // Inner child, turn into outer case
                        node_ptr = parent_ptr;
                        self.rotate_left(node_ptr);
                    }
                    let parent_ptr = node_ptr.as_ref().parent;
                    let grandparent_ptr = parent_ptr.as_ref().parent;
                    Self::set_color(parent_ptr, Color::Black);
                    Self::set_color(grandparent_ptr, Color::Red);
                    self.rotate_right(grandparent_ptr);
                }
            } else {
                let uncle_ptr = grandparent_ptr.as_ref().left;
                if Self::color(uncle_ptr).is_red() {
                    Self::set_color(parent_ptr, Color::Black);
                    Self::set_color(uncle_ptr, Color::Black);
                    Self::set_color(grandparent_ptr, Color::Red);
                    node_ptr = grandparent_ptr;
                } else {
                    if node_ptr == parent_ptr.as_ref().left {
                        node_ptr = parent_ptr;
                        self.rotate_right(node_ptr);
                    }
                    let parent_ptr = node_ptr.as_ref().parent;
                    let grandparent_ptr = parent_ptr.as_ref().parent;
                    Self::set_color(parent_ptr, Color::Black);
                    Self::set_color(grandparent_ptr, Color::Red);
                    self.rotate_left(grandparent_ptr);
                }
            }
        }
        Self::set_color(self.root, Color::Black);
    }

    // Restores the black height after a black node has been unlinked.
    // `node_ptr` took the place of the unlinked node and carries an extra black.
    unsafe fn delete_fixup(&mut self, mut node_ptr: NodePtr<K>) {
        while node_ptr != self.root && Self::color(node_ptr).is_black() {
            let parent_ptr = node_ptr.as_ref().parent;
            if node_ptr == parent_ptr.as_ref().left {
                let mut sibling_ptr = parent_ptr.as_ref().right;
                if Self::color(sibling_ptr).is_red() {
                    Self::set_color(sibling_ptr, Color::Black);
                    Self::set_color(parent_ptr, Color::Red);
                    self.rotate_left(parent_ptr);
                    sibling_ptr = parent_ptr.as_ref().right;
                }
                if Self::color(sibling_ptr.as_ref().left).is_black()
                    && Self::color(sibling_ptr.as_ref().right).is_black()
                {
                    Self::set_color(sibling_ptr, Color::Red);
                    node_ptr = parent_ptr;
                } else {
                    if Self::color(sibling_ptr.as_ref().right).is_black() {
                        // Near child is red, turn into far child case
                        Self::set_color(sibling_ptr.as_ref().left, Color::Black);
                        Self::set_color(sibling_ptr, Color::Red);
                        self.rotate_right(sibling_ptr);
                        sibling_ptr = parent_ptr.as_ref().right;
                    }
                    Self::set_color(sibling_ptr, Self::color(parent_ptr));
                    Self::set_color(parent_ptr, Color::Black);
                    Self::set_color(sibling_ptr.as_ref().right, Color::Black);
                    self.rotate_left(parent_ptr);
                    node_ptr = self.root;
                }
            } else {
                let mut sibling_ptr = parent_ptr.as_ref().left;
                if Self::color(sibling_ptr).is_red() {
                    Self::set_color(sibling_ptr, Color::Black);
                    Self::set_color(parent_ptr, Color::Red);
                    self.rotate_right(parent_ptr);
                    sibling_ptr = parent_ptr.as_ref().left;
                }
                if Self::color(sibling_ptr.as_ref().right).is_black()
                    && Self::color(sibling_ptr.as_ref().left).is_black()
                {
                    Self::set_color(sibling_ptr, Color::Red);
                    node_ptr = parent_ptr;
                } else {
                    if Self::color(sibling_ptr.as_ref().left).is_black() {
                        Self::set_color(sibling_ptr.as_ref().right, Color::Black);
                        Self::set_color(sibling_ptr, Color::Red);
                        self.rotate_left(sibling_ptr);
                        sibling_ptr = parent_ptr.as_ref().left;
                    }
                    Self::set_color(sibling_ptr, Self::color(parent_ptr));
                    Self::set_color(parent_ptr, Color::Black);
                    Self::set_color(sibling_ptr.as_ref().left, Color::Black);
                    self.rotate_right(parent_ptr);
                    node_ptr = self.root;
                }
            }
        }
        Self::set_color(node_ptr, Color::Black);
    }

    fn minimum(&self, mut node_ptr: NodePtr<K>) -> NodePtr<K> {
        unsafe {
            while node_ptr.as_ref().left != self.nil {
                node_ptr = node_ptr.as_ref().left;
            }
        }
        node_ptr
    }

    fn link(&self, node_ptr: NodePtr<K>) -> Option<NodePtr<K>> {
        if node_ptr == self.nil {
            None
        } else {
            Some(node_ptr)
        }
    }

    unsafe fn color(node_ptr: NodePtr<K>) -> Color {
        node_ptr.as_ref().color
    }

    // Recoloring the sentinel black is harmless, it is black already.
    unsafe fn set_color(mut node_ptr: NodePtr<K>, color: Color) {
        node_ptr.as_mut().color = color;
    }

    // Caller must ensure `node_ptr` is not the sentinel.
    unsafe fn key<'a>(node_ptr: NodePtr<K>) -> &'a K {
        node_ptr.as_ref().key.assume_init_ref()
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn preorder<F: FnMut(NodePtr<K>)>(&self, f: F) {
        self.traverse(f, |_| {}, |_| {});
    }

    fn postorder<F: FnMut(NodePtr<K>)>(&self, f: F) {
        self.traverse(|_| {}, |_| {}, f);
    }

    fn traverse<Pre, In, Post>(&self, mut preorder: Pre, mut inorder: In, mut postorder: Post)
    where
        Pre: FnMut(NodePtr<K>),
        In: FnMut(NodePtr<K>),
        Post: FnMut(NodePtr<K>),
    {
        if let Some(mut node_ptr) = self.link(self.root) {
            let mut dir = Direction::FromParent;
            loop {
                match dir {
                    Direction::FromParent => {
                        preorder(node_ptr);
                        if let Some(left_ptr) = self.link(unsafe { node_ptr.as_ref().left }) {
                            node_ptr = left_ptr;
                        } else {
                            dir = Direction::FromLeft;
                        }
                    }
                    Direction::FromLeft => {
                        inorder(node_ptr);
                        if let Some(right_ptr) = self.link(unsafe { node_ptr.as_ref().right }) {
                            node_ptr = right_ptr;
                            dir = Direction::FromParent;
                        } else {
                            dir = Direction::FromRight;
                        }
                    }
                    Direction::FromRight => {
                        // Post order traversal is used for node deletion,
                        // so make sure not to use node pointer after postorder call.
                        if let Some(parent_ptr) = self.link(unsafe { node_ptr.as_ref().parent }) {
                            if node_ptr == unsafe { parent_ptr.as_ref().left } {
                                dir = Direction::FromLeft;
                            } else {
                                dir = Direction::FromRight;
                            }
                            postorder(node_ptr);
                            node_ptr = parent_ptr;
                        } else {
                            postorder(node_ptr);
                            break;
                        }
                    }
                }
            }
        }
    }
}

impl<K: Ord> RbTree<K> {
    /// Inserts a key. Equal keys are kept side by side.
    pub fn insert(&mut self, key: K) {
        unsafe {
            // Find parent of insert position, equal keys go right
            let mut parent_ptr = self.nil;
            let mut current = self.root;
            let mut go_left = false;
            while current != self.nil {
                parent_ptr = current;
                go_left = key < *Self::key(current);
                current = if go_left {
                    current.as_ref().left
                } else {
                    current.as_ref().right
                };
            }

            let node_ptr = Node::create(key, parent_ptr, self.nil);
            let mut parent = parent_ptr;
            if parent_ptr == self.nil {
                self.root = node_ptr;
            } else if go_left {
                parent.as_mut().left = node_ptr;
            } else {
                parent.as_mut().right = node_ptr;
            }
            self.num_nodes += 1;
            self.insert_fixup(node_ptr);
        }
    }

    /// Removes the first key equal to `key` met on the way down.
    /// Returns whether a key was removed.
    pub fn remove(&mut self, key: &K) -> bool {
        let node_ptr = match self.find(key) {
            None => return false,
            Some(node_ptr) => node_ptr,
        };
        debug_assert!(self.num_nodes >= 1);
        unsafe {
            let (replacement_ptr, removed_color) = self.unlink_node(node_ptr);
            Node::destroy(node_ptr);
            self.num_nodes -= 1;
            if removed_color.is_black() {
                self.delete_fixup(replacement_ptr);
            }
            // The sentinel parent link is scratch space for the fixup only
            Node::reset_sentinel(self.nil);
        }
        true
    }

    /// Returns true if the tree contains a key equal to `key`.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Returns a reference to the first key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&K> {
        self.find(key).map(|node_ptr| unsafe { Self::key(node_ptr) })
    }

    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        unsafe {
            // Check sentinel
            assert!(Self::color(self.nil).is_black());
            assert!(self.nil.as_ref().left == self.nil);
            assert!(self.nil.as_ref().right == self.nil);

            // Check root link and color
            if self.root != self.nil {
                assert!(self.root.as_ref().parent == self.nil);
                assert!(Self::color(self.root).is_black());
            }

            // Check tree nodes
            let mut num_nodes = 0;
            self.preorder(|node_ptr| {
                let node = node_ptr.as_ref();

                // Check link for left child node
                if let Some(left_ptr) = self.link(node.left) {
                    assert!(left_ptr.as_ref().parent == node_ptr);
                    assert!(Self::key(left_ptr) <= Self::key(node_ptr));
                }

                // Check link for right child node
                if let Some(right_ptr) = self.link(node.right) {
                    assert!(right_ptr.as_ref().parent == node_ptr);
                    assert!(Self::key(right_ptr) >= Self::key(node_ptr));
                }

                // Check red node has black children
                if node.color.is_red() {
                    assert!(Self::color(node.left).is_black());
                    assert!(Self::color(node.right).is_black());
                }

                num_nodes += 1;
            });

            // Check number of nodes
            assert_eq!(num_nodes, self.num_nodes);

            // Check black height is the same on every path
            self.black_height(self.root);

            // Check key order
            let keys: Vec<&K> = self.iter().collect();
            assert!(keys.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }

    #[cfg(any(test, feature = "consistency_check"))]
    fn black_height(&self, node_ptr: NodePtr<K>) -> usize {
        if node_ptr == self.nil {
            return 1;
        }
        unsafe {
            let left_height = self.black_height(node_ptr.as_ref().left);
            let right_height = self.black_height(node_ptr.as_ref().right);
            assert_eq!(left_height, right_height);
            left_height + usize::from(Self::color(node_ptr).is_black())
        }
    }

    fn find(&self, key: &K) -> Option<NodePtr<K>> {
        let mut current = self.root;
        while current != self.nil {
            current = unsafe {
                match key.cmp(Self::key(current)) {
                    Ordering::Equal => return Some(current),
                    Ordering::Less => current.as_ref().left,
                    Ordering::Greater => current.as_ref().right,
                }
            };
        }
        None
    }

    // Unlinks a node from the tree without freeing it.
    // Returns the node that took the place of the physically unlinked node,
    // possibly the sentinel with its parent link set, and the unlinked node's original color.
    unsafe fn unlink_node(&mut self, node_ptr: NodePtr<K>) -> (NodePtr<K>, Color) {
        let mut left_ptr = node_ptr.as_ref().left;
        let mut right_ptr = node_ptr.as_ref().right;
        if left_ptr == self.nil {
            // Node to-unlink is stem or leaf, right subtree takes its place
            self.transplant(node_ptr, right_ptr);
            (right_ptr, node_ptr.as_ref().color)
        } else if right_ptr == self.nil {
            self.transplant(node_ptr, left_ptr);
            (left_ptr, node_ptr.as_ref().color)
        } else {
            // Smallest node of right subtree replaces node to-unlink
            let mut successor_ptr = self.minimum(right_ptr);
            let successor_color = successor_ptr.as_ref().color;
            let mut replacement_ptr = successor_ptr.as_ref().right;
            if successor_ptr.as_ref().parent == node_ptr {
                replacement_ptr.as_mut().parent = successor_ptr;
            } else {
                self.transplant(successor_ptr, replacement_ptr);
                successor_ptr.as_mut().right = right_ptr;
                right_ptr.as_mut().parent = successor_ptr;
            }
            self.transplant(node_ptr, successor_ptr);
            successor_ptr.as_mut().left = left_ptr;
            left_ptr.as_mut().parent = successor_ptr;
            successor_ptr.as_mut().color = node_ptr.as_ref().color;
            (replacement_ptr, successor_color)
        }
    }
}

impl<K: Ord + Clone> RbTree<K> {
    /// Returns the keys visited while searching for `key`, from the root down to
    /// the first equal key. Returns an empty path if there is no such key.
    pub fn find_path(&self, key: &K) -> Vec<K> {
        let mut path = Vec::new();
        let mut current = self.root;
        while current != self.nil {
            let current_key = unsafe { Self::key(current) };
            path.push(current_key.clone());
            current = unsafe {
                match key.cmp(current_key) {
                    Ordering::Equal => return path,
                    Ordering::Less => current.as_ref().left,
                    Ordering::Greater => current.as_ref().right,
                }
            };
        }
        Vec::new()
    }
}

impl<K: Clone> RbTree<K> {
    /// Returns a copy of the tree structure where every node is annotated
    /// with its depth and color.
    pub fn snapshot(&self) -> Snapshot<K, Color> {
        fn copy<K: Clone>(
            tree: &RbTree<K>,
            node_ptr: NodePtr<K>,
            depth: usize,
        ) -> Box<SnapshotNode<K, Color>> {
            let node = unsafe { node_ptr.as_ref() };
            let key = unsafe { RbTree::key(node_ptr) };
            let mut copied = SnapshotNode::new(key.clone(), depth, node.color);
            copied.left = tree.link(node.left).map(|left| copy(tree, left, depth + 1));
            copied.right = tree.link(node.right).map(|right| copy(tree, right, depth + 1));
            Box::new(copied)
        }
        Snapshot::new(self.link(self.root).map(|root| copy(self, root, 0)))
    }
}

impl<K> Node<K> {
    fn create(key: K, parent: NodePtr<K>, nil: NodePtr<K>) -> NodePtr<K> {
        let boxed = Box::new(Node {
            key: MaybeUninit::new(key),
            left: nil,
            right: nil,
            parent,
            color: Color::Red,
        });
        unsafe { NodePtr::new_unchecked(Box::into_raw(boxed)) }
    }

    fn create_sentinel() -> NodePtr<K> {
        let boxed = Box::new(Node {
            key: MaybeUninit::uninit(),
            left: NonNull::dangling(),
            right: NonNull::dangling(),
            parent: NonNull::dangling(),
            color: Color::Black,
        });
        let nil = unsafe { NodePtr::new_unchecked(Box::into_raw(boxed)) };
        unsafe { Self::reset_sentinel(nil) };
        nil
    }

    unsafe fn reset_sentinel(mut nil: NodePtr<K>) {
        let sentinel = nil.as_mut();
        sentinel.left = nil;
        sentinel.right = nil;
        sentinel.parent = nil;
        sentinel.color = Color::Black;
    }

    unsafe fn destroy(node_ptr: NodePtr<K>) {
        let mut boxed = Box::from_raw(node_ptr.as_ptr());
        boxed.key.assume_init_drop();
    }

    unsafe fn destroy_sentinel(node_ptr: NodePtr<K>) {
        drop(Box::from_raw(node_ptr.as_ptr()));
    }
}

impl<'a, K> Iter<'a, K> {
    fn push_left(&mut self, mut current: NodePtr<K>) {
        while current != self.nil {
            self.stack.push(current);
            current = unsafe { current.as_ref().left };
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node_ptr = self.stack.pop()?;
        self.push_left(unsafe { node_ptr.as_ref().right });
        self.remaining -= 1;
        Some(unsafe { RbTree::key(node_ptr) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            nil: self.nil,
            remaining: self.remaining,
            marker: PhantomData,
        }
    }
}

impl<K> Drop for RbTree<K> {
    fn drop(&mut self) {
        self.clear();
        unsafe { Node::destroy_sentinel(self.nil) };
    }
}

impl<K> Default for RbTree<K> {
    /// Creates an empty tree.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> FromIterator<K> for RbTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for RbTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        iter.into_iter().for_each(move |key| self.insert(key));
    }
}

impl<'a, K> IntoIterator for &'a RbTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: fmt::Debug> fmt::Debug for RbTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
