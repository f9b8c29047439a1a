//! The tree and stream machinery behind `Raz` and `RazTree`.
//!
//! Everything here is persistent: operations take their inputs by shared
//! link, allocate new nodes only along the path they touch, and share the
//! rest of the structure with their inputs. No cycle can arise because a
//! new node only ever refers to older ones, so plain reference counting
//! reclaims everything.

use level::Level;

use std::cmp;
use std::fmt;
use std::ops;


mod node;
pub use self::node::*;

#[cfg(feature = "atomic")]      use std::sync::Arc;
#[cfg(not(feature = "atomic"))] use std::rc::Rc;

use self::node::Tree::*;
use self::node::Stream::{Cons, Frag, Empty};

/// A shared handle on a `Tree` node.
#[cfg(not(feature = "atomic"))]
pub struct TreeLink<T>(Rc<Tree<T>>);

/// A shared handle on a `Tree` node.
#[cfg(feature = "atomic")]
pub struct TreeLink<T>(Arc<Tree<T>>);

impl<T> TreeLink<T> {
    #[cfg(not(feature = "atomic"))]
    #[inline]
    pub fn new(tree: Tree<T>) -> Self { TreeLink(Rc::new(tree)) }

    #[cfg(feature = "atomic")]
    #[inline]
    pub fn new(tree: Tree<T>) -> Self { TreeLink(Arc::new(tree)) }
}

impl<T> Clone for TreeLink<T> {
    #[inline] fn clone(&self) -> Self { TreeLink(self.0.clone()) }
}

impl<T> ops::Deref for TreeLink<T> {
    type Target = Tree<T>;
    fn deref(&self) -> &Tree<T> { self.0.as_ref() }
}

impl<T> fmt::Debug for TreeLink<T>
where T: fmt::Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// A shared handle on a `Stream` cell.
#[cfg(not(feature = "atomic"))]
pub struct StreamLink<T>(Rc<Stream<T>>);

/// A shared handle on a `Stream` cell.
#[cfg(feature = "atomic")]
pub struct StreamLink<T>(Arc<Stream<T>>);

impl<T> StreamLink<T> {
    #[cfg(not(feature = "atomic"))]
    #[inline]
    pub fn new(stream: Stream<T>) -> Self { StreamLink(Rc::new(stream)) }

    #[cfg(feature = "atomic")]
    #[inline]
    pub fn new(stream: Stream<T>) -> Self { StreamLink(Arc::new(stream)) }
}

impl<T> Clone for StreamLink<T> {
    #[inline] fn clone(&self) -> Self { StreamLink(self.0.clone()) }
}

impl<T> ops::Deref for StreamLink<T> {
    type Target = Stream<T>;
    fn deref(&self) -> &Stream<T> { self.0.as_ref() }
}

impl<T> fmt::Debug for StreamLink<T>
where T: fmt::Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// A side of the cursor: `L`eft or `R`ight.
///
/// Every edit command takes the side it works on. Internally the same
/// two values order the walk into deferred tree fragments: `L` visits
/// the left child of a split `Bin` first, `R` the right child first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir { L, R }

/// Concatenate two trees, preserving heap order on levels.
///
/// The recursion descends along the spine of whichever operand has the
/// higher root level, so the result stays heap-ordered; counts are
/// recomputed on the rebuilt spine. Levels compare with `>=` towards the
/// left operand, which makes the result deterministic under ties.
///
/// O(log _n_) expected, where _n_ is the larger operand's count.
///
/// # Panics
/// If both operands are `Leaf`s. Two elements can never be adjacent
/// without a separating `Bin`; the caller must interpose one (see
/// `Tree::level_bin`).
pub fn append<T>(t1: &TreeLink<T>, t2: &TreeLink<T>) -> TreeLink<T> {
    match (&**t1, &**t2) {
        (&Nil, _) => t2.clone()
      , (_, &Nil) => t1.clone()
      , (&Leaf(_), &Leaf(_)) =>
            panic!("append: adjacent elements with no separating level")
      , (&Leaf(_), &Bin { level, ref left, ref right, .. }) =>
            Tree::bin(level, append(t1, left), right.clone())
      , (&Bin { level, ref left, ref right, .. }, &Leaf(_)) =>
            Tree::bin(level, left.clone(), append(right, t2))
      , ( &Bin { level: l1, left: ref left1, right: ref right1, .. }
        , &Bin { level: l2, left: ref left2, right: ref right2, .. }) =>
            if l1 >= l2 {
                Tree::bin(l1, left1.clone(), append(right1, t2))
            } else {
                Tree::bin(l2, append(t1, left2), right2.clone())
            }
    }
}

/// Expose the next element and its separating level from a stream.
///
/// A `Cons` head is returned as-is. Otherwise the fragment suffix is
/// walked, carrying at most one element that has been seen but not yet
/// paired with its level: `Nil`s are skipped, a `Leaf` fills the pending
/// slot, a bare level-carrier `Bin` (both children `Nil`) pairs with the
/// pending element, and any other `Bin` is split into its children with a
/// fresh level-carrier between them. `d` picks which child of a split
/// `Bin` is walked first, and therefore which end of a fragment surfaces:
/// `R` exposes the cursor-adjacent end of a left-hand stream, `L` of a
/// right-hand one.
///
/// Returns `None` when the stream runs out without exposing an element;
/// an `Empty` stream is a legitimate terminal, not an error.
///
/// # Panics
/// On malformed streams: two elements with no separating level between
/// them, a separator with no adjacent element, or an element left
/// unpaired at the end of the stream.
pub fn trim<T>(d: Dir, stream: &StreamLink<T>)
               -> Option<(T, Level, StreamLink<T>)>
where T: Clone {
    let mut stream = stream.clone();
    let mut pending: Option<T> = None;
    loop {
        let next = match *stream {
            Empty => match pending {
                None => return None
              , Some(_) =>
                    panic!("trim: element stranded without a separating \
                            level")
            }
          , Cons { ref elem, level, ref rest } => match pending {
                None => return Some((elem.clone(), level, rest.clone()))
              , Some(_) =>
                    panic!("trim: adjacent elements with no separating \
                            level")
            }
          , Frag { ref tree, ref rest } => match **tree {
                Nil => rest.clone()
              , Leaf(ref elem) => match pending {
                    None => {
                        pending = Some(elem.clone());
                        rest.clone()
                    }
                  , Some(_) =>
                        panic!("trim: adjacent elements with no separating \
                                level")
                }
              , Bin { level, ref left, ref right, .. }
                if left.is_nil() && right.is_nil() => match pending.take() {
                    Some(elem) => return Some((elem, level, rest.clone()))
                  , None =>
                        panic!("trim: separator level with no adjacent \
                                element")
                }
              , Bin { level, ref left, ref right, .. } => {
                    let (first, second) = match d {
                        Dir::L => (left, right)
                      , Dir::R => (right, left)
                    };
                    Stream::frag( first.clone()
                                , Stream::frag( Tree::level_bin(level)
                                              , Stream::frag( second.clone()
                                                            , rest.clone())))
                }
            }
        };
        stream = next;
    }
}

/// Split `tree` along `pos`, leaving a cursor between the `pos`-th and
/// `(pos + 1)`-th elements.
///
/// `pos` is clamped to `[0, count]`. The descent stops at the `Bin`
/// whose separator sits exactly at the cursor gap; the two children at
/// the stop point head the streams, and every `Bin` passed on the way
/// down leaves a synthetic node on the stream opposite the descent,
/// holding the sibling subtree under a `Nil` placeholder so that `trim`
/// can split it back apart later.
///
/// O(log _n_) expected.
///
/// # Panics
/// If the descent reaches a `Nil` or `Leaf`, which cannot happen on a
/// well-formed tree (one with a `Bin` separator for every gap).
pub fn focus<T>(tree: &TreeLink<T>, pos: usize)
                -> (StreamLink<T>, Level, StreamLink<T>) {
    let mut pos = cmp::min(pos, tree.count());
    let mut tree = tree.clone();
    let mut accum_l = Stream::empty();
    let mut accum_r = Stream::empty();
    loop {
        let next = match *tree {
            Nil | Leaf(_) =>
                panic!("focus: descent reached the edge of a malformed \
                        tree")
          , Bin { level, left: ref tl, right: ref tr, .. } => {
                let left_count = tl.count();
                if pos == left_count {
                    let left = Stream::frag(tl.clone(), accum_l);
                    let right = Stream::frag(tr.clone(), accum_r);
                    return (left, level, right);
                } else if pos < left_count {
                    // the lost sibling lies past the cursor on the right
                    accum_r = Stream::frag( Tree::bin( level
                                                     , Tree::nil()
                                                     , tr.clone())
                                          , accum_r);
                    tl.clone()
                } else {
                    pos -= left_count;
                    accum_l = Stream::frag( Tree::bin( level
                                                     , tl.clone()
                                                     , Tree::nil())
                                          , accum_l);
                    tr.clone()
                }
            }
        };
        tree = next;
    }
}

/// Reassemble a focused sequence into one tree.
///
/// The left stream folds into a tree seeded at `Nil`, the right stream
/// into one seeded at a bare `Bin` carrying the cursor level; the two
/// halves are then appended. Fold order preserves the element sequence:
/// cells are consumed nearest-the-cursor first, and each contribution
/// lands on the far side of what has been folded so far.
pub fn unfocus<T>(left: &StreamLink<T>, level: Level, right: &StreamLink<T>)
                  -> TreeLink<T>
where T: Clone {
    let l = grow_left(left);
    let r = grow_right(level, right);
    append(&l, &r)
}

fn grow_left<T>(stream: &StreamLink<T>) -> TreeLink<T>
where T: Clone {
    let mut tree = Tree::nil();
    let mut stream = stream.clone();
    loop {
        let next = match *stream {
            Empty => return tree
          , Cons { ref elem, level, ref rest } => {
                tree = append( &Tree::level_bin(level)
                             , &append(&Tree::leaf(elem.clone()), &tree));
                rest.clone()
            }
          , Frag { tree: ref frag, ref rest } => {
                tree = append(frag, &tree);
                rest.clone()
            }
        };
        stream = next;
    }
}

fn grow_right<T>(level: Level, stream: &StreamLink<T>) -> TreeLink<T>
where T: Clone {
    let mut tree = Tree::level_bin(level);
    let mut stream = stream.clone();
    loop {
        let next = match *stream {
            Empty => return tree
          , Cons { ref elem, level, ref rest } => {
                tree = append( &append(&tree, &Tree::leaf(elem.clone()))
                             , &Tree::level_bin(level));
                rest.clone()
            }
          , Frag { tree: ref frag, ref rest } => {
                tree = append(&tree, frag);
                rest.clone()
            }
        };
        stream = next;
    }
}
