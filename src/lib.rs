//! # An raz.
//!
//! A random access zipper (RAZ) is a persistent sequence that is edited
//! through a cursor. It's essentially a binary tree of elements whose
//! shape is decided by random priorities, wearing a zipper.
//!
//! For more information, see the following resources:
//!
//! + https://arxiv.org/abs/1608.06009
//! + http://adapton.org/
//!
//! A sequence has two interchangeable forms. Unfocused, it is a
//! [`RazTree`]: a balanced-on-average binary tree with one element per
//! leaf and a cached count at every interior node, which makes any
//! position reachable in O(log _n_). Focused, it is a [`Raz`]: a cursor
//! between two elements, flanked by two streams that lazily expose the
//! surrounding tree, which makes any number of edits at the cursor cost
//! O(1) each. [`RazTree::focus`] and [`Raz::unfocus`] convert between the
//! two in O(log _n_) expected time.
//!
//! Every operation is persistent: it consumes its input and returns a new
//! value sharing almost all of its structure with the old one, which
//! remains valid if it was cloned first. Cloning either form is O(1).
//!
//! Balance comes from [`Level`]s, skip-list style random priorities
//! attached to the separator between each pair of adjacent elements.
//! Inserts take the level explicitly; [`Raz::insert_with`] draws one from
//! a caller-supplied generator. There is no rebalancing pass and no
//! hidden RNG.
//!
//! ```
//! use an_raz::{Raz, Dir};
//! use an_raz::level::Level;
//!
//! // build "a", "b", "c" by pushing on the left of the cursor
//! let raz = Raz::empty(Level(5))
//!     .insert(Dir::L, "a", Level(2))
//!     .insert(Dir::L, "b", Level(9))
//!     .insert(Dir::L, "c", Level(4));
//!
//! let tree = raz.unfocus();
//! assert_eq!(tree.len(), 3);
//!
//! // refocus somewhere else and keep editing
//! let raz = tree.focus(1);
//! let tree = raz.insert(Dir::R, "b and a half", Level(0)).unfocus();
//! assert_eq!(tree.len(), 4);
//! ```
//!
//! [`Raz`]: struct.Raz.html
//! [`RazTree`]: struct.RazTree.html
//! [`RazTree::focus`]: struct.RazTree.html#method.focus
//! [`Raz::unfocus`]: struct.Raz.html#method.unfocus
//! [`Raz::insert_with`]: struct.Raz.html#method.insert_with
//! [`Level`]: level/struct.Level.html

#![cfg_attr(all(test, feature = "unstable"), feature(test))]

extern crate rand;

#[cfg(test)] #[macro_use] extern crate quickcheck;
#[cfg(test)] mod test;
#[cfg(all(test, feature = "unstable"))] mod bench;

pub mod level;
mod internals;

pub use internals::Dir;

use level::Level;
use internals::{Stream, StreamLink};

use rand::Rng;

use std::fmt;

/// A persistent sequence focused at a cursor.
///
/// A `Raz` is a cursor level flanked by two streams of elements, the part
/// of the sequence left of the cursor and the part right of it. Editing
/// next to the cursor ([`insert`], [`remove`], [`replace`],
/// [`move_cursor`]) is O(1); reaching a distant position means
/// [`unfocus`]ing to a [`RazTree`] and focusing there, O(log _n_)
/// expected.
///
/// All methods consume the zipper and return a new one that shares
/// structure with the old; clone first to keep the original.
///
/// # Examples
/// ```
/// use an_raz::{Raz, Dir};
/// use an_raz::level::Level;
///
/// let raz = Raz::empty(Level(3)).insert(Dir::L, 'x', Level(1));
/// let before = raz.clone();
///
/// assert_eq!(raz.remove(Dir::L).unfocus().len(), 0);
/// assert_eq!(before.unfocus().len(), 1);
/// ```
///
/// [`insert`]: #method.insert
/// [`remove`]: #method.remove
/// [`replace`]: #method.replace
/// [`move_cursor`]: #method.move_cursor
/// [`unfocus`]: #method.unfocus
pub struct Raz<T> { left: StreamLink<T>
                  , level: Level
                  , right: StreamLink<T>
                  }

/// A persistent sequence in its unfocused, tree form.
///
/// A `RazTree` supports O(1) [`len`] and O(log _n_) expected [`focus`]
/// at any position; all editing happens through the [`Raz`] a focus
/// returns.
///
/// [`len`]: #method.len
/// [`focus`]: #method.focus
/// [`Raz`]: struct.Raz.html
pub struct RazTree<T> { root: internals::TreeLink<T> }

/// An edit applied at the cursor of a [`Raz`], parameterised by the side
/// it works on.
///
/// Commands exist so that a sequence of edits can be treated as data and
/// replayed with [`Raz::do_cmd`]; each corresponds to one zipper method.
///
/// [`Raz`]: struct.Raz.html
/// [`Raz::do_cmd`]: struct.Raz.html#method.do_cmd
#[derive(Clone, Debug)]
pub enum Cmd<T> {
    /// Insert an element next to the cursor, with the level that will
    /// separate it from the rest of its side.
    Insert(Dir, T, Level)
  , /// Remove the element next to the cursor, along with its separating
    /// level.
    Remove(Dir)
  , /// Swap the element next to the cursor for a new one, keeping its
    /// separating level.
    Replace(Dir, T)
  , /// Step the cursor over the adjacent element.
    Move(Dir)
}

impl<T> Raz<T> {

    /// Returns a new zipper over the empty sequence.
    ///
    /// The level seeds the single separator an empty sequence still
    /// carries; it only matters in that an immediate [`unfocus`] produces
    /// a tree whose one `Bin` holds it.
    ///
    /// # Examples
    /// ```
    /// use an_raz::Raz;
    /// use an_raz::level::Level;
    ///
    /// let raz: Raz<char> = Raz::empty(Level(7));
    /// assert!(raz.unfocus().is_empty());
    /// ```
    ///
    /// [`unfocus`]: #method.unfocus
    pub fn empty(level: Level) -> Raz<T> {
        Raz { left: Stream::empty()
            , level: level
            , right: Stream::empty()
            }
    }

    /// Returns a zipper over a one-element sequence.
    ///
    /// Equivalent to `Raz::empty(level).insert(Dir::L, elem, level)`.
    ///
    /// # Examples
    /// ```
    /// use an_raz::Raz;
    /// use an_raz::level::Level;
    ///
    /// assert_eq!(Raz::singleton('x', Level(3)).unfocus().len(), 1);
    /// ```
    pub fn singleton(elem: T, level: Level) -> Raz<T> {
        Raz::empty(level).insert(Dir::L, elem, level)
    }

    /// Insert `elem` next to the cursor on side `d`, separated from the
    /// rest of that side by `level`.
    ///
    /// Always succeeds. O(1).
    ///
    /// # Examples
    /// ```
    /// use an_raz::{Raz, Dir};
    /// use an_raz::level::Level;
    ///
    /// let tree = Raz::empty(Level(0))
    ///     .insert(Dir::L, 'a', Level(2))
    ///     .insert(Dir::R, 'b', Level(1))
    ///     .unfocus();
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(self, d: Dir, elem: T, level: Level) -> Raz<T> {
        match d {
            Dir::L => Raz { left: Stream::cons(elem, level, self.left)
                          , level: self.level
                          , right: self.right
                          }
          , Dir::R => Raz { left: self.left
                          , level: self.level
                          , right: Stream::cons(elem, level, self.right)
                          }
        }
    }

    /// Insert `elem` next to the cursor on side `d`, drawing a fresh
    /// level from `rng`.
    ///
    /// # Examples
    /// ```
    /// extern crate rand;
    /// extern crate an_raz;
    /// use an_raz::{Raz, Dir};
    /// use an_raz::level::Level;
    ///
    /// # fn main() {
    /// let mut rng = rand::rng();
    /// let raz = Raz::empty(Level(0))
    ///     .insert_with(Dir::L, "hello", &mut rng)
    ///     .insert_with(Dir::L, "world", &mut rng);
    /// assert_eq!(raz.unfocus().len(), 2);
    /// # }
    /// ```
    pub fn insert_with<R>(self, d: Dir, elem: T, rng: &mut R) -> Raz<T>
    where R: Rng {
        let level = Level::fresh(rng);
        self.insert(d, elem, level)
    }
}

impl<T> Raz<T>
where T: Clone {

    /// Apply one [`Cmd`] to the zipper.
    ///
    /// Total: commands that find nothing to act on return the zipper
    /// unchanged.
    ///
    /// # Examples
    /// ```
    /// use an_raz::{Raz, Cmd, Dir};
    /// use an_raz::level::Level;
    ///
    /// let cmds = vec![ Cmd::Insert(Dir::L, 'a', Level(1))
    ///                , Cmd::Insert(Dir::L, 'b', Level(2))
    ///                , Cmd::Remove(Dir::L)
    ///                ];
    /// let raz = cmds.into_iter()
    ///               .fold(Raz::empty(Level(0)), |raz, cmd| raz.do_cmd(cmd));
    /// assert_eq!(raz.unfocus().len(), 1);
    /// ```
    ///
    /// [`Cmd`]: enum.Cmd.html
    pub fn do_cmd(self, cmd: Cmd<T>) -> Raz<T> {
        match cmd {
            Cmd::Insert(d, elem, level) => self.insert(d, elem, level)
          , Cmd::Remove(d) => self.remove(d)
          , Cmd::Replace(d, elem) => self.replace(d, elem)
          , Cmd::Move(d) => self.move_cursor(d)
        }
    }

    /// Remove the element next to the cursor on side `d`, along with its
    /// separating level.
    ///
    /// If that side is exhausted, the zipper is returned unchanged.
    ///
    /// # Examples
    /// ```
    /// use an_raz::{Raz, Dir};
    /// use an_raz::level::Level;
    ///
    /// let raz = Raz::empty(Level(0)).insert(Dir::L, 1, Level(4));
    /// let raz = raz.remove(Dir::L);
    /// // removing from the now-empty side is a no-op
    /// let raz = raz.remove(Dir::L);
    /// assert!(raz.unfocus().is_empty());
    /// ```
    pub fn remove(self, d: Dir) -> Raz<T> {
        match d {
            Dir::L => match internals::trim(Dir::L, &self.left) {
                Some((_, _, rest)) => Raz { left: rest
                                          , level: self.level
                                          , right: self.right
                                          }
              , None => self
            }
          , Dir::R => match internals::trim(Dir::L, &self.right) {
                Some((_, _, rest)) => Raz { left: self.left
                                          , level: self.level
                                          , right: rest
                                          }
              , None => self
            }
        }
    }

    /// Swap the element next to the cursor on side `d` for `elem`,
    /// keeping the separating level it already had.
    ///
    /// If that side is exhausted, the zipper is returned unchanged.
    ///
    /// # Examples
    /// ```
    /// use an_raz::{Raz, Dir};
    /// use an_raz::level::Level;
    ///
    /// let raz = Raz::empty(Level(0))
    ///     .insert(Dir::L, 'x', Level(7))
    ///     .replace(Dir::L, 'y');
    /// assert_eq!(raz.unfocus().len(), 1);
    /// ```
    pub fn replace(self, d: Dir, elem: T) -> Raz<T> {
        match d {
            Dir::L => match internals::trim(Dir::L, &self.left) {
                Some((_, level, rest)) =>
                    Raz { left: Stream::cons(elem, level, rest)
                        , level: self.level
                        , right: self.right
                        }
              , None => self
            }
          , Dir::R => match internals::trim(Dir::L, &self.right) {
                Some((_, level, rest)) =>
                    Raz { left: self.left
                        , level: self.level
                        , right: Stream::cons(elem, level, rest)
                        }
              , None => self
            }
        }
    }

    /// Step the cursor over the element adjacent on side `d`.
    ///
    /// The element crosses to the other side of the cursor, its exposed
    /// level becomes the new cursor level, and the old cursor level
    /// follows the element across as its separator. If side `d` is
    /// exhausted, the zipper is returned unchanged.
    ///
    /// # Examples
    /// ```
    /// use an_raz::{Raz, Dir};
    /// use an_raz::level::Level;
    ///
    /// let raz = Raz::empty(Level(0)).insert(Dir::L, 'x', Level(1));
    /// let raz = raz.move_cursor(Dir::L);  // 'x' is now right of the cursor
    /// let raz = raz.move_cursor(Dir::R);  // and back again
    /// assert_eq!(raz.unfocus().len(), 1);
    /// ```
    pub fn move_cursor(self, d: Dir) -> Raz<T> {
        match d {
            Dir::L => match internals::trim(Dir::L, &self.left) {
                Some((elem, level, rest)) =>
                    Raz { left: rest
                        , level: level
                        , right: Stream::cons(elem, self.level, self.right)
                        }
              , None => self
            }
          , Dir::R => match internals::trim(Dir::L, &self.right) {
                Some((elem, level, rest)) =>
                    Raz { left: Stream::cons(elem, self.level, self.left)
                        , level: level
                        , right: rest
                        }
              , None => self
            }
        }
    }

    /// Reassemble the whole sequence into its unfocused tree form.
    ///
    /// O(log _n_) expected, plus the cost of elements still packaged in
    /// stream fragments, each of which is appended back whole.
    ///
    /// # Examples
    /// ```
    /// use an_raz::{Raz, Dir};
    /// use an_raz::level::Level;
    ///
    /// let tree = Raz::empty(Level(0))
    ///     .insert(Dir::L, 'a', Level(1))
    ///     .unfocus();
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn unfocus(self) -> RazTree<T> {
        RazTree { root: internals::unfocus( &self.left
                                          , self.level
                                          , &self.right)
                }
    }
}

impl<T> RazTree<T> {

    /// Returns the number of elements in the sequence.
    ///
    /// O(1): the root carries a cached count.
    ///
    /// # Examples
    /// ```
    /// use an_raz::Raz;
    /// use an_raz::level::Level;
    ///
    /// let tree = Raz::singleton(0u8, Level(1)).unfocus();
    /// assert_eq!(tree.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize { self.root.count() }

    /// Returns `true` if the sequence holds no elements.
    ///
    /// # Examples
    /// ```
    /// use an_raz::Raz;
    /// use an_raz::level::Level;
    ///
    /// let tree = Raz::<char>::empty(Level(2)).unfocus();
    /// assert!(tree.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool { self.len() == 0 }

    /// Focus the sequence, leaving the cursor between the `pos`-th and
    /// `(pos + 1)`-th elements.
    ///
    /// `pos` is clamped to `[0, len]`: focusing past the end puts the
    /// cursor after the last element rather than failing.
    ///
    /// O(log _n_) expected.
    ///
    /// # Examples
    /// ```
    /// use an_raz::{Raz, Dir};
    /// use an_raz::level::Level;
    ///
    /// let tree = Raz::empty(Level(0))
    ///     .insert(Dir::L, 'a', Level(1))
    ///     .insert(Dir::R, 'b', Level(2))
    ///     .unfocus();
    ///
    /// // cursor between 'a' and 'b'
    /// let raz = tree.focus(1);
    /// assert_eq!(raz.insert(Dir::L, '-', Level(0)).unfocus().len(), 3);
    /// ```
    pub fn focus(self, pos: usize) -> Raz<T> {
        let (left, level, right) = internals::focus(&self.root, pos);
        Raz { left: left
            , level: level
            , right: right
            }
    }
}

impl<T> Clone for Raz<T> {
    fn clone(&self) -> Self {
        Raz { left: self.left.clone()
            , level: self.level
            , right: self.right.clone()
            }
    }
}

impl<T> Clone for RazTree<T> {
    fn clone(&self) -> Self {
        RazTree { root: self.root.clone() }
    }
}

impl<T> fmt::Debug for Raz<T>
where T: fmt::Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!( f, "Raz {{ left: {:?}, level: {}, right: {:?} }}"
              , self.left, self.level, self.right)
    }
}

impl<T> fmt::Debug for RazTree<T>
where T: fmt::Debug {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RazTree")?;
        f.debug_list().entries(self.root.leaves()).finish()
    }
}

/// Structural equality: two trees are equal when they hold the same
/// elements in the same order. Levels, and therefore tree shapes, are
/// not compared.
///
/// # Examples
/// ```
/// use an_raz::{Raz, Dir};
/// use an_raz::level::Level;
///
/// let a = Raz::empty(Level(0)).insert(Dir::L, 1, Level(1)).unfocus();
/// let b = Raz::empty(Level(7)).insert(Dir::R, 1, Level(2)).unfocus();
/// assert_eq!(a, b);
/// ```
impl<T> PartialEq for RazTree<T>
where T: PartialEq {
    fn eq(&self, other: &RazTree<T>) -> bool {
        self.len() == other.len() &&
            self.root.leaves()
                .zip(other.root.leaves())
                .all(|(a, b)| a == b)
    }
}
