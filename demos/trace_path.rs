use avlrb::{AvlTree, RbTree};

fn main() {
    let keys = [50, 30, 70, 20, 40, 60, 80, 35, 45, 65];
    let avl: AvlTree<i32> = keys.into_iter().collect();
    let rb: RbTree<i32> = keys.into_iter().collect();

    println!("AVL tree (key [balance factor]):");
    print!("{}", avl.snapshot());
    println!("\nRed-black tree (key [color]):");
    print!("{}", rb.snapshot());

    println!("\nLevel-order traversal:");
    for (depth, level) in rb.snapshot().levels().iter().enumerate() {
        let keys: Vec<String> = level
            .iter()
            .map(|node| format!("{}{}", node.key, if node.meta.is_red() { "r" } else { "b" }))
            .collect();
        println!("{depth}: {}", keys.join(" "));
    }

    for key in [45, 65, 99] {
        println!(
            "\npath to {key}: avl {:?}, red-black {:?}",
            avl.find_path(&key),
            rb.find_path(&key)
        );
    }
}
