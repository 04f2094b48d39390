use rb_forest::{Color, NodeArena, RbSet, NIL};

fn insert_checked(set: &mut RbSet<i32>, value: i32) {
    set.insert(value);
    if let Err(err) = set.assert_valid() {
        panic!("invalid tree after insert({value}): {err}\n{}", set.print());
    }
}

fn erase_checked(set: &mut RbSet<i32>, value: i32) {
    set.erase(&value);
    if let Err(err) = set.assert_valid() {
        panic!("invalid tree after erase({value}): {err}\n{}", set.print());
    }
}

/// Collect the colors along every root-to-sentinel path.
fn all_paths(arena: &NodeArena<i32>, node: u32, prefix: &mut Vec<Color>, out: &mut Vec<Vec<Color>>) {
    if node == NIL {
        out.push(prefix.clone());
        return;
    }
    prefix.push(arena.color(node));
    all_paths(arena, arena.left(node), prefix, out);
    all_paths(arena, arena.right(node), prefix, out);
    prefix.pop();
}

#[test]
fn sequential_inserts_one_through_seven() {
    let mut set = RbSet::new();
    for v in 1..=7 {
        insert_checked(&mut set, v);
    }

    let inorder: Vec<i32> = set.iter().copied().collect();
    assert_eq!(inorder, vec![1, 2, 3, 4, 5, 6, 7]);

    let root = set.root_index().unwrap();
    assert_eq!(set.arena().color(root), Color::Black);

    // walk every root-to-sentinel path explicitly
    let mut paths = Vec::new();
    all_paths(set.arena(), root, &mut Vec::new(), &mut paths);
    assert_eq!(paths.len(), 8); // 7 nodes -> 8 sentinel leaves

    let black_count = |path: &[Color]| path.iter().filter(|c| **c == Color::Black).count();
    let expected = black_count(&paths[0]);
    for path in &paths {
        assert_eq!(black_count(path), expected, "black-height differs: {path:?}");
        for pair in path.windows(2) {
            assert!(
                !(pair[0] == Color::Red && pair[1] == Color::Red),
                "consecutive reds on path {path:?}"
            );
        }
    }
}

#[test]
fn erase_inner_node_keeps_order_and_balance() {
    let mut set = RbSet::new();
    for v in [10, 20, 30, 40, 50, 25] {
        insert_checked(&mut set, v);
    }

    erase_checked(&mut set, 30);

    assert_eq!(set.find(&30), None);
    let inorder: Vec<i32> = set.iter().copied().collect();
    assert_eq!(inorder, vec![10, 20, 25, 40, 50]);
}

#[test]
fn single_key_lifecycle() {
    let mut set = RbSet::new();
    insert_checked(&mut set, 42);
    erase_checked(&mut set, 42);

    assert_eq!(set.len(), 0);
    assert!(set.is_empty());
    assert_eq!(set.root_index(), None);

    assert!(set.insert(42));
    assert!(set.contains(&42));
    set.assert_valid().unwrap();
}

#[test]
fn ladder_insert_then_erase_evens() {
    let mut set = RbSet::new();

    for i in 0..200 {
        insert_checked(&mut set, i);
        assert!(set.contains(&i));
    }
    assert_eq!(set.len(), 200);

    for i in (0..200).step_by(2) {
        erase_checked(&mut set, i);
    }
    assert_eq!(set.len(), 100);

    for i in 0..200 {
        assert_eq!(set.contains(&i), i % 2 == 1);
    }
}

#[test]
fn ascending_inserts_ascending_erases() {
    let mut set = RbSet::new();
    for i in 0..=100 {
        insert_checked(&mut set, i);
        assert_eq!(set.len(), (i + 1) as usize);
    }
    for i in 0..=100 {
        erase_checked(&mut set, i);
        assert_eq!(set.len(), (100 - i) as usize);
    }
    assert!(set.is_empty());
}

#[test]
fn descending_inserts_descending_erases() {
    let mut set = RbSet::new();
    for i in (11..=100).rev() {
        insert_checked(&mut set, i);
    }
    for i in (11..=100).rev() {
        erase_checked(&mut set, i);
    }
    assert!(set.is_empty());
    assert_eq!(set.root_index(), None);
}

#[test]
fn alternating_inserts_from_both_sides() {
    let mut set = RbSet::new();
    for i in 0..=100 {
        insert_checked(&mut set, 50 + i);
        insert_checked(&mut set, 50 - i);
    }
    for i in 0..=100 {
        erase_checked(&mut set, 50 - i);
        erase_checked(&mut set, 50 + i);
    }
    assert!(set.is_empty());
}

#[test]
fn height_stays_within_red_black_bound() {
    let mut set = RbSet::new();
    for n in [1usize, 10, 100, 1000] {
        set.clear();
        for i in 0..n {
            set.insert(i as i32);
        }
        set.assert_valid().unwrap();
        let bound = 2.0 * ((n + 1) as f64).log2();
        assert!(
            set.height() as f64 <= bound,
            "height {} exceeds 2*log2({}+1) = {bound}",
            set.height(),
            n
        );
    }
}
