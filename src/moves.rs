//! A single pour between two containers of a collection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `(src, dest)` pair of container indices within a `Collection`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub src: usize,
    pub dest: usize,
}

impl Move {
    pub fn new(src: usize, dest: usize) -> Self {
        Move { src, dest }
    }

    /// Returns the move that pours in the opposite direction.
    ///
    /// # Examples
    /// ```
    /// use water_sort_solver::moves::Move;
    /// assert_eq!(Move::new(1, 2).reverse(), Move::new(2, 1));
    /// ```
    pub fn reverse(&self) -> Move {
        Move {
            src: self.dest,
            dest: self.src,
        }
    }
}

impl From<(usize, usize)> for Move {
    fn from((src, dest): (usize, usize)) -> Self {
        Move::new(src, dest)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.src, self.dest)
    }
}
