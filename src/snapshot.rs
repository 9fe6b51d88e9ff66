//! Render-ready copies of a tree's structure.
//!
//! A [`Snapshot`] owns its nodes outright and has no links back into the tree
//! it was taken from, so it stays valid while the tree keeps changing. All node
//! fields are public: a renderer may annotate or rearrange them freely.

use std::collections::VecDeque;
use std::fmt;

/// A node of a [`Snapshot`].
///
/// `meta` carries engine specific data: the balance factor for
/// [`AvlTree`](crate::AvlTree) snapshots and the [`Color`](crate::Color) for
/// [`RbTree`](crate::RbTree) snapshots.
#[derive(Clone, PartialEq, Eq)]
pub struct SnapshotNode<K, M> {
    pub key: K,
    /// Distance from the root, which has depth 0.
    pub depth: usize,
    pub meta: M,
    pub left: Option<Box<SnapshotNode<K, M>>>,
    pub right: Option<Box<SnapshotNode<K, M>>>,
}

/// An immutable-by-default copy of a tree, annotated per node.
#[derive(Clone, PartialEq, Eq)]
pub struct Snapshot<K, M> {
    root: Option<Box<SnapshotNode<K, M>>>,
}

impl<K, M> SnapshotNode<K, M> {
    pub fn new(key: K, depth: usize, meta: M) -> Self {
        Self {
            key,
            depth,
            meta,
            left: None,
            right: None,
        }
    }

    /// Returns true if the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

impl<K, M> Snapshot<K, M> {
    pub(crate) fn new(root: Option<Box<SnapshotNode<K, M>>>) -> Self {
        Self { root }
    }

    /// Returns an empty snapshot.
    pub fn empty() -> Self {
        Self { root: None }
    }

    pub fn root(&self) -> Option<&SnapshotNode<K, M>> {
        self.root.as_deref()
    }

    pub fn root_mut(&mut self) -> Option<&mut SnapshotNode<K, M>> {
        self.root.as_deref_mut()
    }

    pub fn into_root(self) -> Option<Box<SnapshotNode<K, M>>> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of nodes in the snapshot.
    pub fn len(&self) -> usize {
        let mut num_nodes = 0;
        self.walk(|_| num_nodes += 1);
        num_nodes
    }

    /// Returns the number of levels, 0 for an empty snapshot.
    pub fn height(&self) -> usize {
        let mut height = 0;
        self.walk(|node| height = height.max(node.depth + 1));
        height
    }

    // Visits every node in pre-order without collecting them.
    fn walk<F: FnMut(&SnapshotNode<K, M>)>(&self, mut f: F) {
        let mut stack: Vec<&SnapshotNode<K, M>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            f(node);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
    }

    /// Returns all nodes in in-order (sorted key) sequence.
    /// The position of a node in this sequence is its horizontal slot when drawn.
    pub fn nodes_in_order(&self) -> Vec<&SnapshotNode<K, M>> {
        let mut nodes = Vec::new();
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            match stack.pop() {
                None => break,
                Some(node) => {
                    nodes.push(node);
                    current = node.right.as_deref();
                }
            }
        }
        nodes
    }

    /// Returns the nodes grouped by depth, each level ordered left to right.
    pub fn levels(&self) -> Vec<Vec<&SnapshotNode<K, M>>> {
        let mut levels: Vec<Vec<&SnapshotNode<K, M>>> = Vec::new();
        let mut queue = VecDeque::new();
        if let Some(root) = self.root.as_deref() {
            queue.push_back(root);
        }
        while let Some(node) = queue.pop_front() {
            if levels.len() <= node.depth {
                levels.push(Vec::new());
            }
            levels[node.depth].push(node);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
        levels
    }
}

impl<K: Clone, M> Snapshot<K, M> {
    /// Returns the keys in in-order sequence.
    pub fn keys(&self) -> Vec<K> {
        self.nodes_in_order()
            .into_iter()
            .map(|node| node.key.clone())
            .collect()
    }
}

impl<K, M> Default for Snapshot<K, M> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K: fmt::Debug, M: fmt::Debug> fmt::Debug for SnapshotNode<K, M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SnapshotNode")
            .field("key", &self.key)
            .field("depth", &self.depth)
            .field("meta", &self.meta)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<K: fmt::Debug, M: fmt::Debug> fmt::Debug for Snapshot<K, M> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Snapshot").field("root", &self.root).finish()
    }
}

impl<K: fmt::Display, M: fmt::Display> fmt::Display for Snapshot<K, M> {
    /// Prints one line per node, indented by depth, in pre-order.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut stack: Vec<&SnapshotNode<K, M>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            writeln!(
                f,
                "{:indent$}{} [{}]",
                "",
                node.key,
                node.meta,
                indent = node.depth * 2
            )?;
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        Ok(())
    }
}
