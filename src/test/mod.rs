use super::{Raz, RazTree, Cmd, Dir};
use level::Level;
use internals::{self, Tree, Stream, StreamLink};

fn lev(l: usize) -> Level { Level(l) }

fn flatten<T>(tree: &RazTree<T>) -> Vec<T>
where T: Clone {
    tree.root.leaves().cloned().collect()
}

/// The separator levels of a tree, read in order.
fn levels<T>(t: &Tree<T>) -> Vec<Level> {
    match *t {
        Tree::Nil | Tree::Leaf(_) => Vec::new()
      , Tree::Bin { level, ref left, ref right, .. } => {
            let mut ls = levels(left);
            ls.push(level);
            ls.extend(levels(right));
            ls
        }
    }
}

fn true_count<T>(t: &Tree<T>) -> usize {
    match *t {
        Tree::Nil => 0
      , Tree::Leaf(_) => 1
      , Tree::Bin { ref left, ref right, .. } =>
            true_count(left) + true_count(right)
    }
}

fn counts_ok<T>(t: &Tree<T>) -> bool {
    match *t {
        Tree::Nil | Tree::Leaf(_) => true
      , Tree::Bin { count, ref left, ref right, .. } =>
            count == true_count(left) + true_count(right)
                && counts_ok(left) && counts_ok(right)
    }
}

fn heap_ok<T>(t: &Tree<T>, bound: Option<Level>) -> bool {
    match *t {
        Tree::Nil | Tree::Leaf(_) => true
      , Tree::Bin { level, ref left, ref right, .. } =>
            bound.map_or(true, |b| level <= b)
                && heap_ok(left, Some(level))
                && heap_ok(right, Some(level))
    }
}

fn bins<T>(t: &Tree<T>) -> usize {
    match *t {
        Tree::Nil | Tree::Leaf(_) => 0
      , Tree::Bin { ref left, ref right, .. } =>
            1 + bins(left) + bins(right)
    }
}

fn stream_len<T>(s: &StreamLink<T>) -> usize {
    match **s {
        Stream::Empty => 0
      , Stream::Cons { ref rest, .. } => 1 + stream_len(rest)
      , Stream::Frag { ref tree, ref rest } =>
            tree.count() + stream_len(rest)
    }
}

fn stream_levels<T>(s: &StreamLink<T>) -> usize {
    match **s {
        Stream::Empty => 0
      , Stream::Cons { ref rest, .. } => 1 + stream_levels(rest)
      , Stream::Frag { ref tree, ref rest } =>
            bins(tree) + stream_levels(rest)
    }
}

/// `a, b, c, d, e`, built by pushing on the right of the cursor so the
/// tree reads `0 a 1 b 2 c 3 d 2 e 1` in order.
fn five_tree() -> RazTree<char> {
    Raz::empty(lev(0))
        .insert(Dir::R, 'e', lev(1))
        .insert(Dir::R, 'd', lev(2))
        .insert(Dir::R, 'c', lev(3))
        .insert(Dir::R, 'b', lev(2))
        .insert(Dir::R, 'a', lev(1))
        .unfocus()
}

#[test]
fn empty_round_trip_test() {
    let tree = Raz::<char>::empty(lev(7)).unfocus();
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    if let Tree::Bin { level, count, ref left, ref right } = *tree.root {
        assert_eq!(level, lev(7));
        assert_eq!(count, 0);
        assert!(left.is_nil());
        assert!(right.is_nil());
    } else {
        panic!("expected a bare Bin, got {:?}", tree)
    }
}

#[test]
fn single_insert_test() {
    let raz = Raz::empty(lev(5)).insert(Dir::L, 'x', lev(3));
    let tree = raz.unfocus();
    assert_eq!(tree.len(), 1);

    // refocusing in front of 'x' picks its separator up as the cursor
    // level, and the trimmed pair carries the boundary separator
    let raz = tree.focus(0);
    assert_eq!(raz.level, lev(3));
    let (elem, level, _) = internals::trim(Dir::L, &raz.right).unwrap();
    assert_eq!(elem, 'x');
    assert_eq!(level, lev(5));
}

#[test]
fn three_left_inserts_test() {
    let tree = Raz::empty(lev(5))
        .insert(Dir::L, 'a', lev(2))
        .insert(Dir::L, 'b', lev(9))
        .insert(Dir::L, 'c', lev(4))
        .unfocus();
    assert_eq!(tree.len(), 3);
    assert_eq!(flatten(&tree), vec!['a', 'b', 'c']);
    assert!(heap_ok(&tree.root, None));
    assert!(counts_ok(&tree.root));
}

#[test]
fn focus_in_the_middle_test() {
    let raz = five_tree().focus(2);
    let (elem, _, _) = internals::trim(Dir::R, &raz.left).unwrap();
    assert_eq!(elem, 'b');
    let (elem, _, _) = internals::trim(Dir::L, &raz.right).unwrap();
    assert_eq!(elem, 'c');
}

#[test]
fn move_crosses_elements_test() {
    let raz = five_tree().focus(2).do_cmd(Cmd::Move(Dir::R));
    // 'c' crossed leftward over the cursor, dragging the old cursor
    // level with it; its own separator became the cursor
    assert_eq!(raz.level, lev(3));
    let (elem, level, _) = internals::trim(Dir::R, &raz.left).unwrap();
    assert_eq!(elem, 'c');
    assert_eq!(level, lev(2));
    assert_eq!(flatten(&raz.unfocus()), vec!['a', 'b', 'c', 'd', 'e']);
}

#[test]
fn replace_preserves_level_test() {
    let raz = Raz::empty(lev(0))
        .insert(Dir::L, 'x', lev(7))
        .replace(Dir::L, 'y');
    let tree = raz.unfocus();
    assert_eq!(flatten(&tree), vec!['y']);
    assert_eq!(levels(&tree.root), vec![lev(7), lev(0)]);
}

#[test]
fn replace_empty_side_test() {
    let raz = Raz::<char>::empty(lev(1)).replace(Dir::R, 'z');
    assert!(raz.unfocus().is_empty());
}

#[test]
fn remove_right_after_focus_test() {
    let raz = five_tree().focus(2).remove(Dir::R);
    assert_eq!(flatten(&raz.unfocus()), vec!['a', 'b', 'd', 'e']);
}

#[test]
fn replace_right_after_focus_test() {
    let raz = five_tree().focus(2).replace(Dir::R, 'C');
    let tree = raz.unfocus();
    assert_eq!(flatten(&tree), vec!['a', 'b', 'C', 'd', 'e']);
    // only the element changed; every separator stays put
    assert_eq!(levels(&five_tree().root), levels(&tree.root));
}

#[test]
#[should_panic(expected = "separator level with no adjacent element")]
fn remove_left_after_focus_test() {
    // a trim-based edit walks fragments left-child-first, which on the
    // cursor's left leads with an unpaired separator
    let _ = five_tree().focus(2).remove(Dir::L);
}

#[test]
fn move_empty_side_test() {
    let raz = Raz::<u8>::empty(lev(4)).move_cursor(Dir::L);
    assert_eq!(raz.level, lev(4));
    assert!(raz.unfocus().is_empty());
}

#[test]
fn unfocus_focus_unfocus_test() {
    let tree = five_tree();
    for pos in 0..6 {
        let back = tree.clone().focus(pos).unfocus();
        assert_eq!(back, tree, "round-trip changed the sequence at {}", pos);
        assert!(heap_ok(&back.root, None));
        assert!(counts_ok(&back.root));
    }
}

#[test]
fn sharing_leaves_the_original_alone_test() {
    let before = five_tree();
    let edited = before.clone()
        .focus(3)
        .insert(Dir::L, 'x', lev(0))
        .remove(Dir::R)
        .unfocus();
    assert_eq!(flatten(&before), vec!['a', 'b', 'c', 'd', 'e']);
    assert_eq!(flatten(&edited), vec!['a', 'b', 'c', 'x', 'e']);
}

mod properties {
    use ::{Raz, RazTree, Cmd, Dir};
    use level::Level;
    use quickcheck::TestResult;
    use super::{ lev, flatten, levels, counts_ok, heap_ok, bins
               , stream_len, stream_levels };

    fn build_raz(pairs: &[(u8, u8)]) -> Raz<u8> {
        let mut raz = Raz::empty(Level(0));
        for &(elem, level) in pairs {
            raz = raz.insert(Dir::L, elem, lev(level as usize));
        }
        raz
    }

    fn build(pairs: &[(u8, u8)]) -> RazTree<u8> {
        build_raz(pairs).unfocus()
    }

    quickcheck! {
        fn count_caches_are_consistent(pairs: Vec<(u8, u8)>) -> bool {
            let tree = build(&pairs);
            tree.len() == pairs.len() && counts_ok(&tree.root)
        }

        fn one_more_bin_than_leaf(pairs: Vec<(u8, u8)>) -> bool {
            let tree = build(&pairs);
            bins(&tree.root) == tree.len() + 1
        }

        fn heap_order_survives_refocusing(pairs: Vec<(u8, u8)>, pos: usize)
                                          -> bool {
            let tree = build(&pairs);
            let pos = pos % (tree.len() + 1);
            let refocused = tree.clone().focus(pos).unfocus();
            heap_ok(&tree.root, None) && heap_ok(&refocused.root, None)
        }

        fn focus_unfocus_keeps_the_sequence(pairs: Vec<(u8, u8)>, pos: usize)
                                            -> bool {
            let tree = build(&pairs);
            let expected = flatten(&tree);
            let pos = pos % (tree.len() + 1);
            let back = tree.clone().focus(pos).unfocus();
            flatten(&back) == expected && back == tree
        }

        fn insert_remove_is_identity(pairs: Vec<(u8, u8)>, elem: u8, level: u8)
                                     -> bool {
            let raz = build_raz(&pairs);
            let edited = raz.clone()
                .insert(Dir::L, elem, lev(level as usize))
                .remove(Dir::L);
            let a = raz.unfocus();
            let b = edited.unfocus();
            flatten(&a) == flatten(&b) && levels(&a.root) == levels(&b.root)
        }

        fn move_left_then_right_restores(pairs: Vec<(u8, u8)>) -> TestResult {
            if pairs.is_empty() {
                return TestResult::discard();
            }
            let raz = build_raz(&pairs);
            let level = raz.level;
            let split = stream_len(&raz.left);
            let expected = flatten(&raz.clone().unfocus());

            let moved = raz.move_cursor(Dir::L).move_cursor(Dir::R);
            TestResult::from_bool(
                moved.level == level
                    && stream_len(&moved.left) == split
                    && flatten(&moved.unfocus()) == expected)
        }

        fn levels_outnumber_elements_by_one(pairs: Vec<(u8, u8)>
                                           , moves: Vec<bool>
                                           , pos: usize) -> bool {
            let mut raz = build_raz(&pairs);
            for m in moves {
                raz = raz.move_cursor(if m { Dir::L } else { Dir::R });
            }
            let elems = stream_len(&raz.left) + stream_len(&raz.right);
            let levs = stream_levels(&raz.left) + stream_levels(&raz.right) + 1;
            let ok_built = levs == elems + 1;

            let tree = raz.unfocus();
            let pos = pos % (tree.len() + 1);
            let raz = tree.focus(pos);
            let elems = stream_len(&raz.left) + stream_len(&raz.right);
            let levs = stream_levels(&raz.left) + stream_levels(&raz.right) + 1;
            ok_built && levs == elems + 1
        }

        fn focus_past_the_end_clamps(pairs: Vec<(u8, u8)>, extra: usize)
                                     -> bool {
            let tree = build(&pairs);
            let a = tree.clone().focus(tree.len().saturating_add(extra));
            let b = tree.clone().focus(tree.len());
            a.level == b.level
                && stream_len(&a.left) == stream_len(&b.left)
                && flatten(&a.unfocus()) == flatten(&b.unfocus())
        }

        fn singleton_holds_one_element(elem: u8, level: u8) -> bool {
            let tree = Raz::singleton(elem, lev(level as usize)).unfocus();
            tree.len() == 1 && flatten(&tree) == vec![elem]
        }

        fn command_tapes_are_total(tape: Vec<(u8, u8, u8)>) -> bool {
            // replay an arbitrary command tape over cons-state streams;
            // every command is total and the invariants hold at the end
            let mut raz = Raz::empty(Level(0));
            let mut len = 0usize;
            for &(op, elem, level) in &tape {
                let d = if level % 2 == 0 { Dir::L } else { Dir::R };
                raz = match op % 4 {
                    0 => {
                        len += 1;
                        raz.do_cmd(Cmd::Insert(d, elem, lev(level as usize)))
                    }
                  , 1 => {
                        let side = match d {
                            Dir::L => stream_len(&raz.left)
                          , Dir::R => stream_len(&raz.right)
                        };
                        if side > 0 { len -= 1 }
                        raz.do_cmd(Cmd::Remove(d))
                    }
                  , 2 => raz.do_cmd(Cmd::Replace(d, elem))
                  , _ => raz.do_cmd(Cmd::Move(d))
                };
            }
            let tree = raz.unfocus();
            tree.len() == len
                && counts_ok(&tree.root)
                && heap_ok(&tree.root, None)
        }
    }
}
