use level::Level;
use super::{TreeLink, StreamLink};

use self::Tree::*;

/// A node in the tree underlying an unfocused sequence.
///
/// A tree is either the empty terminal `Nil`, a `Leaf` holding one
/// element, or a `Bin` joining two subtrees around a separator level.
/// Read in order, leaves and bins strictly alternate: every `Bin` stands
/// for the separator between the last element of its left subtree and the
/// first element of its right subtree, and a fully assembled sequence of
/// _n_ elements carries _n_ + 1 bins, with `Nil` closing both ends.
#[derive(Clone, Debug)]
pub enum Tree<T> {
    /// The empty terminal.
    ///
    /// Appears at the extreme left and right of a fully assembled
    /// sequence, and nowhere else.
    Nil
  , /// A single element.
    Leaf(T)
  , /// A separator joining two subtrees.
    Bin { /// The separator's level; no `Bin` below holds a greater one.
          level: Level
        , /// Cached count of the leaves in this subtree.
          count: usize
        , /// The left subtree.
          left: TreeLink<T>
        , /// The right subtree.
          right: TreeLink<T>
        }
}

impl<T> Tree<T> {

    #[inline]
    pub fn nil() -> TreeLink<T> {
        TreeLink::new(Nil)
    }

    #[inline]
    pub fn leaf(elem: T) -> TreeLink<T> {
        TreeLink::new(Leaf(elem))
    }

    /// Join `left` and `right` around a separator of the given `level`.
    ///
    /// The cached count is computed here, so it is correct by
    /// construction whenever the children's counts are.
    #[inline]
    pub fn bin(level: Level, left: TreeLink<T>, right: TreeLink<T>)
               -> TreeLink<T> {
        let count = left.count() + right.count();
        TreeLink::new(Bin { level: level
                          , count: count
                          , left: left
                          , right: right })
    }

    /// A `Bin` carrying only a level.
    ///
    /// Both children are `Nil` and the count is zero; this is the shape
    /// `trim` recognises as a bare separator, and the shape `append`
    /// needs to thread a separator back between two elements.
    #[inline]
    pub fn level_bin(level: Level) -> TreeLink<T> {
        Tree::bin(level, Tree::nil(), Tree::nil())
    }

    /// Returns the number of elements below this node.
    ///
    /// O(1): `Bin`s answer from their cached count.
    #[inline]
    pub fn count(&self) -> usize {
        match *self { Nil => 0
                    , Leaf(_) => 1
                    , Bin { count, .. } => count
                    }
    }

    #[inline]
    pub fn is_nil(&self) -> bool {
        match *self { Nil => true, _ => false }
    }

    /// Returns an iterator over the elements below this node, in order.
    #[inline]
    pub fn leaves(&self) -> Leaves<T> {
        Leaves(vec![self])
    }
}

/// An iterator performing an in-order traversal over the leaves of a
/// series of trees.
pub struct Leaves<'a, T: 'a>(Vec<&'a Tree<T>>);

impl<'a, T> Iterator for Leaves<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        loop {
            match self.0.pop() {
                None => return None
              , Some(&Nil) => {}
              , Some(&Leaf(ref elem)) => return Some(elem)
              , Some(&Bin { ref left, ref right, .. }) => {
                    self.0.push(right);
                    self.0.push(left);
                }
            }
        }
    }
}

/// One side of a focused sequence.
///
/// The cells adjacent to the cursor are explicit `Cons` pairs of an
/// element and the level separating it from the remainder; past those,
/// the rest of the side is held unexamined as a list of tree fragments,
/// one `Frag` cell per fragment, ending in `Empty`. Elements inside a
/// `Frag` are only paid for when `trim` walks in to expose them.
///
/// `Cons` cells always form a prefix of a stream and fragment cells a
/// suffix: edits push `Cons` cells at the head, and `trim` only ever
/// rewrites the fragment suffix.
#[derive(Clone, Debug)]
pub enum Stream<T> {
    /// An element adjacent to the cursor, then the level separating it
    /// from everything further out, then the remainder.
    Cons { elem: T
         , level: Level
         , rest: StreamLink<T>
         }
  , /// A deferred tree fragment.
    Frag { tree: TreeLink<T>
         , rest: StreamLink<T>
         }
  , /// Nothing further on this side.
    Empty
}

impl<T> Stream<T> {

    #[inline]
    pub fn empty() -> StreamLink<T> {
        StreamLink::new(Stream::Empty)
    }

    #[inline]
    pub fn cons(elem: T, level: Level, rest: StreamLink<T>) -> StreamLink<T> {
        StreamLink::new(Stream::Cons { elem: elem
                                     , level: level
                                     , rest: rest })
    }

    #[inline]
    pub fn frag(tree: TreeLink<T>, rest: StreamLink<T>) -> StreamLink<T> {
        StreamLink::new(Stream::Frag { tree: tree
                                     , rest: rest })
    }
}
