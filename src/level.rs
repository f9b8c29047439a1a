//! Levels for balancing `Raz` sequences.
//!
//! A [`Level`] is the priority attached to the separator between two
//! adjacent elements of a sequence. Levels are the only balancing
//! mechanism: the tree underlying an unfocused sequence keeps its `Bin`
//! nodes in heap order by level, so the distribution the levels are drawn
//! from determines the expected shape of the tree. Nothing is ever
//! rebalanced after the fact.
//!
//! The conventional choice is a geometric distribution with parameter 1/2,
//! the same scheme a skip list uses for node heights: half of all
//! separators get level 0, a quarter get level 1, and so on, which keeps
//! the expected height of an _n_-element sequence at O(log _n_). That is
//! what [`Level::fresh`] draws, by counting the trailing zeros of one
//! uniformly random word.
//!
//! The sequence operations themselves place no constraint on levels
//! beyond ordering: any non-negative integer is accepted, and a caller
//! with an unusual workload may pick levels by hand.
//!
//! ```
//! use an_raz::level::Level;
//!
//! assert!(Level(9) > Level(4));
//! assert_eq!(Level::default(), Level(0));
//! ```
//!
//! Level generation is always the caller's business: the convenience
//! methods that want a fresh level borrow a caller-supplied generator
//! rather than hiding a global one.
//!
//! [`Level`]: struct.Level.html
//! [`Level::fresh`]: struct.Level.html#method.fresh

use std::convert;
use std::fmt;

use rand::Rng;

/// The priority of one separator between two adjacent elements.
///
/// Levels order the `Bin` nodes of the underlying tree into a heap, so
/// they decide where a separator ends up in the tree, and nothing else.
/// Equal levels are legal; ties are broken towards the left operand when
/// trees are joined.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Level(pub usize);

impl Level {
    /// Draw a fresh level from `rng`.
    ///
    /// The level is the number of trailing zeros of a uniformly random
    /// 64-bit word, i.e. geometrically distributed with parameter 1/2.
    ///
    /// # Examples
    /// ```
    /// extern crate rand;
    /// extern crate an_raz;
    /// use an_raz::level::Level;
    ///
    /// let mut rng = rand::rng();
    /// let level = Level::fresh(&mut rng);
    /// assert!(level <= Level(64));
    /// ```
    #[inline]
    pub fn fresh<R: Rng>(rng: &mut R) -> Level {
        Level(rng.random::<u64>().trailing_zeros() as usize)
    }
}

impl convert::From<usize> for Level {
    #[inline] fn from(u: usize) -> Self { Level(u) }
}

impl convert::Into<usize> for Level {
    #[inline] fn into(self) -> usize { self.0 }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
