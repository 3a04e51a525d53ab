//! # Water Sort Solver Library
//!
//! This library models the "water sort" puzzle, where coloured units stacked
//! in capacity-limited containers must be poured around until every container
//! holds a single colour or nothing, and searches for a sequence of pours that
//! solves it.
//!
//! It is used by three binaries:
//! - `solver`: Loads a puzzle file and prints a solution found by BFS or DFS.
//! - `player`: Allows interactive play of a puzzle from the command line.
//! - `search_evaluator`: Compares both searches over seeded random puzzles.
//!
//! ## Modules
//! - `colour`: The colour palette (`Colour`) and the `Item` token stored in containers.
//! - `container`: A capacity-bounded stack of items with pour/add primitives.
//! - `moves`: The `(src, dest)` `Move` value.
//! - `collection`: A full puzzle state (`Collection`), its legal moves and successors.
//! - `solver`: `solve_bfs` (shortest solution) and `solve_dfs` (any solution).
//! - `utils`: Loading puzzles from JSON or compact letter notation.
//! - `error`: The `PuzzleError` type.

pub mod collection;
pub mod colour;
pub mod container;
pub mod error;
pub mod moves;
pub mod solver;
pub mod utils;

pub use crate::collection::Collection;
pub use crate::colour::{Colour, Item};
pub use crate::container::{Container, DEFAULT_CAPACITY};
pub use crate::error::PuzzleError;
pub use crate::moves::Move;
pub use crate::solver::{solve_bfs, solve_dfs, Algorithm, Solution};
