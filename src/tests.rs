use super::{AvlTree, BalancedTree, Color, RbTree};

const N: i32 = 1_000;
const LARGE_N: i32 = 1_000_000;

trait Checked: BalancedTree<i32> + Default {
    fn check(&self);
    fn keys(&self) -> Vec<i32>;

    // Keys with their depth, in order
    fn shape(&self) -> Vec<(i32, usize)> {
        self.snapshot()
            .nodes_in_order()
            .iter()
            .map(|node| (node.key, node.depth))
            .collect()
    }
}

impl Checked for AvlTree<i32> {
    fn check(&self) {
        self.check_consistency();
    }

    fn keys(&self) -> Vec<i32> {
        self.iter().copied().collect()
    }
}

impl Checked for RbTree<i32> {
    fn check(&self) {
        self.check_consistency();
    }

    fn keys(&self) -> Vec<i32> {
        self.iter().copied().collect()
    }
}

fn check_new<T: Checked>() {
    let tree = T::default();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.rotations(), 0);
    assert!(tree.snapshot().is_empty());
    tree.check();
}

fn check_remove_from_empty<T: Checked>() {
    let mut tree = T::default();
    assert!(!tree.remove(&42));
    assert_eq!(tree.height(), 0);
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.rotations(), 0);
    tree.check();
}

fn check_find_path<T: Checked>() {
    let mut tree = T::default();
    for key in [50, 30, 70, 20, 40] {
        tree.insert(key);
    }
    assert_eq!(tree.find_path(&40), vec![50, 30, 40]);
    assert_eq!(tree.find_path(&50), vec![50]);
    assert_eq!(tree.find_path(&20), vec![50, 30, 20]);
    assert!(tree.find_path(&99).is_empty());
    assert!(tree.find_path(&35).is_empty());
    assert!(T::default().find_path(&1).is_empty());
}

fn check_insert<T: Checked>() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();

    let mut tree = T::default();
    for (count, value) in values.iter().enumerate() {
        tree.insert(*value);
        assert!(tree.contains(value));
        assert_eq!(tree.len(), count + 1);
        tree.check();
    }

    let mut sorted = values.clone();
    sorted.sort();
    assert_eq!(tree.keys(), sorted);
}

fn check_insert_sorted_range<T: Checked>(max_height: usize) {
    let mut tree = T::default();
    for value in 0..N {
        tree.insert(value);
        tree.check();
    }
    assert_eq!(tree.len(), N as usize);
    assert!(tree.height() >= 10);
    assert!(tree.height() <= max_height);
    assert!(tree.rotations() > 0);
}

fn check_remove<T: Checked>() {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen()).collect();
    values.sort();
    values.dedup();

    let mut tree = T::default();
    for value in values.iter() {
        tree.insert(*value);
    }

    values.shuffle(&mut rng);
    for value in values.iter() {
        assert!(tree.contains(value));
        assert!(tree.remove(value));
        assert!(!tree.contains(value));
        tree.check();
    }
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    assert_eq!(tree.height(), 0);
}

fn check_remove_absent<T: Checked>() {
    let mut tree = T::default();
    for value in (0..N).map(|value| value * 2) {
        tree.insert(value);
    }
    tree.reset_rotations();
    let before = tree.shape();

    for value in [-1, 1, 999, 2 * N + 1] {
        assert!(!tree.remove(&value));
    }
    assert_eq!(tree.rotations(), 0);
    assert_eq!(tree.len(), N as usize);
    assert_eq!(tree.shape(), before);
    tree.check();
}

fn check_duplicates<T: Checked>() {
    let mut tree = T::default();
    tree.insert(5);
    tree.insert(5);
    assert_eq!(tree.len(), 2);

    // Equal key is routed right
    let snapshot = tree.snapshot();
    let root = snapshot.root().unwrap();
    assert_eq!(root.key, 5);
    assert!(root.left.is_none());
    assert_eq!(root.right.as_ref().map(|right| right.key), Some(5));

    assert!(tree.remove(&5));
    assert!(tree.contains(&5));
    assert_eq!(tree.len(), 1);
    assert!(tree.remove(&5));
    assert!(!tree.contains(&5));
    assert!(!tree.remove(&5));
    assert!(tree.is_empty());
}

fn check_many_duplicates<T: Checked>() {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(1);
    let mut values: Vec<i32> = (0..N).map(|_| rng.gen_range(0..16)).collect();

    let mut tree = T::default();
    for value in values.iter() {
        tree.insert(*value);
        tree.check();
    }
    assert_eq!(tree.len(), values.len());

    values.shuffle(&mut rng);
    for (count, value) in values.iter().enumerate() {
        assert!(tree.remove(value));
        assert_eq!(tree.len(), values.len() - count - 1);
        tree.check();
    }
    assert!(tree.is_empty());
}

fn check_mixed<T: Checked>() {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(2);
    let mut expected: Vec<i32> = Vec::new();
    let mut tree = T::default();
    for _ in 0..4 * N {
        let value = rng.gen_range(0..N / 4);
        match rng.gen_range(0..10) {
            0..=3 => {
                tree.insert(value);
                let pos = expected.partition_point(|key| *key <= value);
                expected.insert(pos, value);
            }
            4..=6 => {
                let removed = tree.remove(&value);
                match expected.binary_search(&value) {
                    Ok(pos) => {
                        assert!(removed);
                        expected.remove(pos);
                    }
                    Err(_) => assert!(!removed),
                }
            }
            _ => assert_eq!(tree.contains(&value), expected.binary_search(&value).is_ok()),
        }
        tree.check();
    }
    assert_eq!(tree.keys(), expected);
}

macro_rules! engine_tests {
    ($name:ident, $tree:ty, $max_sorted_height:expr) => {
        mod $name {
            use super::*;

            #[test]
            fn test_new() {
                check_new::<$tree>();
            }

            #[test]
            fn test_remove_from_empty() {
                check_remove_from_empty::<$tree>();
            }

            #[test]
            fn test_find_path() {
                check_find_path::<$tree>();
            }

            #[test]
            fn test_insert() {
                check_insert::<$tree>();
            }

            #[test]
            fn test_insert_sorted_range() {
                check_insert_sorted_range::<$tree>($max_sorted_height);
            }

            #[test]
            fn test_remove() {
                check_remove::<$tree>();
            }

            #[test]
            fn test_remove_absent() {
                check_remove_absent::<$tree>();
            }

            #[test]
            fn test_duplicates() {
                check_duplicates::<$tree>();
            }

            #[test]
            fn test_many_duplicates() {
                check_many_duplicates::<$tree>();
            }

            #[test]
            fn test_mixed() {
                check_mixed::<$tree>();
            }
        }
    };
}

engine_tests!(avl, AvlTree<i32>, 11);
engine_tests!(rbtree, RbTree<i32>, 19);

#[test]
fn test_avl_rebalance() {
    {
        //     3 ->   2
        //    /      / \
        //   2      1   3
        //  /
        // 1
        let mut tree = AvlTree::new();
        tree.extend([3, 2, 1]);
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.rotations(), 1);
    }
    {
        //     3   ->     3 ->   2
        //    / \        /      / \
        //   2   4      2      1   3
        //  /          /
        // 1          1
        let mut tree = AvlTree::new();
        tree.extend([3, 2, 4, 1]);
        tree.check_consistency();
        assert_eq!(tree.height(), 3);
        assert_eq!(tree.rotations(), 0);
        tree.remove(&4);
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.rotations(), 1);
    }
    {
        //   3  ->   2
        //  /       / \
        // 1       1   3
        //  \
        //   2
        let mut tree = AvlTree::new();
        tree.extend([3, 1, 2]);
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.rotations(), 2);
    }
    {
        //   3   ->   3  ->   2
        //  / \      /       / \
        // 1   4    1       1   3
        //  \        \
        //   2        2
        let mut tree = AvlTree::new();
        tree.extend([3, 1, 4, 2]);
        tree.check_consistency();
        assert_eq!(tree.height(), 3);
        tree.remove(&4);
        tree.check_consistency();
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.rotations(), 2);
        assert_eq!(tree.find_path(&3), vec![2, 3]);
    }
}

#[test]
fn test_avl_ascending_triple() {
    let mut tree = AvlTree::new();
    tree.extend([1, 2, 3]);
    assert_eq!(tree.rotations(), 1);
    assert_eq!(tree.height(), 2);

    let snapshot = tree.snapshot();
    let root = snapshot.root().unwrap();
    assert_eq!(root.key, 2);
    assert_eq!(root.depth, 0);
    assert_eq!(root.meta, 0);

    tree.reset_rotations();
    assert_eq!(tree.rotations(), 0);
}

#[test]
fn test_avl_remove_two_children() {
    //      4            5
    //    /   \        /   \
    //   2     6  ->  2     6
    //  / \   / \    / \     \
    // 1   3 5   7  1   3     7
    let mut tree: AvlTree<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
    assert!(tree.remove(&4));
    tree.check_consistency();
    assert_eq!(tree.find_path(&7), vec![5, 6, 7]);
    assert_eq!(tree.len(), 6);
    assert_eq!(tree.rotations(), 0);

    let snapshot = tree.snapshot();
    let right = snapshot.root().and_then(|root| root.right.as_deref()).unwrap();
    assert_eq!((right.key, right.depth, right.meta), (6, 1, -1));
}

#[test]
fn test_avl_remove_two_children_duplicate_successor() {
    //     2              5
    //    / \            / \
    //   1   5b   ->    1   5b
    //      /  \           /
    //     5a   5c        5a
    // The successor key is removed from the right subtree by search,
    // which hits 5b before the leftmost 5a.
    let mut tree: AvlTree<i32> = [2, 1, 5, 5, 5].into_iter().collect();
    assert_eq!(tree.rotations(), 1);
    assert!(tree.remove(&2));
    tree.check_consistency();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.rotations(), 1);

    let shape = |tree: &AvlTree<i32>| {
        tree.snapshot()
            .nodes_in_order()
            .iter()
            .map(|node| (node.key, node.depth, node.meta))
            .collect::<Vec<_>>()
    };
    assert_eq!(shape(&tree), vec![(1, 1, 0), (5, 0, -1), (5, 2, 0), (5, 1, 1)]);

    assert!(tree.remove(&5));
    tree.check_consistency();
    assert_eq!(shape(&tree), vec![(1, 1, 0), (5, 0, 0), (5, 1, 0)]);
    assert_eq!(tree.find_path(&5), vec![5]);
}

#[test]
fn test_avl_snapshot_balance_factors() {
    let tree: AvlTree<i32> = [4, 2, 6, 1].into_iter().collect();
    let snapshot = tree.snapshot();
    let factors: Vec<(i32, usize, i32)> = snapshot
        .nodes_in_order()
        .iter()
        .map(|node| (node.key, node.depth, node.meta))
        .collect();
    assert_eq!(factors, vec![(1, 2, 0), (2, 1, 1), (4, 0, 1), (6, 1, 0)]);
}

#[test]
fn test_rb_ascending_triple() {
    let mut tree = RbTree::new();
    tree.extend([10, 20, 30]);
    tree.check_consistency();
    assert_eq!(tree.rotations(), 1);
    assert_eq!(tree.height(), 2);

    let snapshot = tree.snapshot();
    let root = snapshot.root().unwrap();
    assert_eq!((root.key, root.meta), (20, Color::Black));
    let left = root.left.as_deref().unwrap();
    let right = root.right.as_deref().unwrap();
    assert_eq!((left.key, left.depth, left.meta), (10, 1, Color::Red));
    assert_eq!((right.key, right.depth, right.meta), (30, 1, Color::Red));
}

#[test]
fn test_rb_recolor() {
    // Red uncle only recolors
    let mut tree: RbTree<i32> = [5, 3, 8, 1].into_iter().collect();
    tree.check_consistency();
    assert_eq!(tree.rotations(), 0);
    let colors: Vec<(i32, Color)> = tree
        .snapshot()
        .nodes_in_order()
        .iter()
        .map(|node| (node.key, node.meta))
        .collect();
    assert_eq!(
        colors,
        vec![
            (1, Color::Red),
            (3, Color::Black),
            (5, Color::Black),
            (8, Color::Black)
        ]
    );
}

#[test]
fn test_rb_remove_fixup() {
    //      5           5            2
    //     / \         / \          / \
    //    3   8  ->   2   8  ->    1   5
    //   /           / \              /
    //  1           1   3            3
    //   \
    //    2
    let mut tree: RbTree<i32> = [5, 3, 8, 1, 2].into_iter().collect();
    tree.check_consistency();
    assert_eq!(tree.rotations(), 2);
    assert_eq!(tree.find_path(&3), vec![5, 2, 3]);

    assert!(tree.remove(&8));
    tree.check_consistency();
    assert_eq!(tree.rotations(), 3);
    assert_eq!(tree.find_path(&3), vec![2, 5, 3]);

    let snapshot = tree.snapshot();
    let levels: Vec<Vec<(i32, Color)>> = snapshot
        .levels()
        .iter()
        .map(|level| level.iter().map(|node| (node.key, node.meta)).collect())
        .collect();
    assert_eq!(
        levels,
        vec![
            vec![(2, Color::Black)],
            vec![(1, Color::Black), (5, Color::Black)],
            vec![(3, Color::Red)],
        ]
    );
}

#[test]
fn test_rb_remove_root() {
    let mut tree: RbTree<i32> = (1..=7).collect();
    while let Some(root) = tree.snapshot().root().map(|root| root.key) {
        assert!(tree.remove(&root));
        tree.check_consistency();
    }
    assert!(tree.is_empty());
    assert_eq!(tree.height(), 0);
}

#[test]
fn test_iter_and_debug() {
    let avl: AvlTree<i32> = [3, 1, 2, 2].into_iter().collect();
    let rb: RbTree<i32> = [3, 1, 2, 2].into_iter().collect();
    assert_eq!(format!("{:?}", avl), "{1, 2, 2, 3}");
    assert_eq!(format!("{:?}", rb), "{1, 2, 2, 3}");
    assert_eq!(avl.iter().len(), 4);
    assert_eq!((&rb).into_iter().copied().collect::<Vec<_>>(), vec![1, 2, 2, 3]);
}

#[test]
fn test_get() {
    let avl: AvlTree<String> = ["b", "a", "c"].iter().map(|s| s.to_string()).collect();
    let rb: RbTree<String> = ["b", "a", "c"].iter().map(|s| s.to_string()).collect();
    assert_eq!(avl.get(&"a".to_string()).map(String::as_str), Some("a"));
    assert_eq!(rb.get(&"c".to_string()).map(String::as_str), Some("c"));
    assert!(avl.get(&"d".to_string()).is_none());
    assert!(rb.get(&"d".to_string()).is_none());
}

#[test]
fn test_clear() {
    let mut avl: AvlTree<i32> = (0..N).collect();
    let mut rb: RbTree<i32> = (0..N).collect();
    avl.clear();
    rb.clear();
    assert!(avl.is_empty() && rb.is_empty());
    assert_eq!(avl.len() + rb.len(), 0);
    assert_eq!(avl.height() + rb.height(), 0);
    avl.check_consistency();
    rb.check_consistency();

    avl.extend(0..N);
    rb.extend(0..N);
    assert_eq!(avl.len(), N as usize);
    assert_eq!(rb.len(), N as usize);
    avl.check_consistency();
    rb.check_consistency();
}

#[test]
fn test_drop_keys() {
    use std::rc::Rc;

    let key = Rc::new(0);
    {
        let mut tree = RbTree::new();
        for _ in 0..10 {
            tree.insert(Rc::clone(&key));
        }
        tree.remove(&key);
        assert_eq!(Rc::strong_count(&key), 10);
    }
    assert_eq!(Rc::strong_count(&key), 1);
    {
        let mut tree = AvlTree::new();
        for _ in 0..10 {
            tree.insert(Rc::clone(&key));
        }
        tree.remove(&key);
        assert_eq!(Rc::strong_count(&key), 10);
    }
    assert_eq!(Rc::strong_count(&key), 1);
}

#[test]
#[ignore]
fn test_large() {
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(0);
    let mut values: Vec<i32> = (0..LARGE_N).map(|_| rng.gen_range(0..LARGE_N)).collect();

    let mut avl = AvlTree::new();
    let mut rb = RbTree::new();
    for value in &values {
        avl.insert(*value);
        rb.insert(*value);
    }
    avl.check_consistency();
    rb.check_consistency();

    values.shuffle(&mut rng);
    values.resize(values.len() / 2, 0);
    for value in &values {
        assert!(avl.remove(value));
        assert!(rb.remove(value));
    }
    avl.check_consistency();
    rb.check_consistency();
    assert_eq!(avl.len(), rb.len());
}
