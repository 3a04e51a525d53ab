//! Error type shared by the puzzle model, the loaders and the search engine.

use thiserror::Error;

use crate::colour::Colour;
use crate::moves::Move;

/// Everything that can go wrong while building or manipulating a puzzle.
///
/// An unsolvable puzzle is not an error: the solvers report it as `None`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// A container must be able to hold at least one item.
    #[error("Container capacity must be positive")]
    ZeroCapacity,

    /// More items were supplied than the container can hold.
    #[error("Container holds {len} items but its capacity is {capacity}")]
    Overfilled {
        /// Number of items supplied.
        len: usize,
        /// Capacity of the container.
        capacity: usize,
    },

    /// A collection needs at least one container.
    #[error("A collection requires at least one container")]
    NoContainers,

    /// A generated puzzle asked for more colours than the palette holds.
    #[error("Requested {requested} colours but the palette only has {available}")]
    PaletteExhausted { requested: usize, available: usize },

    /// A colour name or letter that is not part of the palette.
    #[error("Unknown colour '{0}'")]
    UnknownColour(String),

    /// `Collection::after` was given a move that `Collection::is_valid` rejects.
    #[error("Invalid move {0}")]
    InvalidMove(Move),

    /// Loader-level balance check: every colour must fill exactly one container.
    #[error("Invalid colour count: {colour} appears {count} times, expected {expected}")]
    UnbalancedColour {
        colour: Colour,
        count: usize,
        expected: usize,
    },

    /// The puzzle file could not be read.
    #[error("Failed to read puzzle file: {0}")]
    Io(String),

    /// The serialized puzzle document could not be parsed.
    #[error("Invalid puzzle document: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for PuzzleError {
    fn from(err: serde_json::Error) -> Self {
        PuzzleError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        PuzzleError::Io(err.to_string())
    }
}
