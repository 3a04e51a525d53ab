//! A full puzzle state: an ordered tuple of containers, its legal moves and
//! its successor states.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Index;

use crate::colour::{Colour, Item};
use crate::container::Container;
use crate::error::PuzzleError;
use crate::moves::Move;

/// Order-independent fingerprint of a collection's contents.
///
/// Holds the content of every container, sorted, so two collections whose
/// containers are permutations of each other produce the same key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(Vec<Vec<Item>>);

/// One complete puzzle state.
///
/// Slot order matters for addressing containers through a [`Move`], but
/// equality ignores it: two collections are equal when the multisets of their
/// container contents match.
///
/// A collection is never mutated once built; [`Collection::after`] returns a
/// new, independently owned collection.
///
/// # Examples
/// ```
/// use water_sort_solver::colour::Colour::{Green, Red};
/// use water_sort_solver::collection::Collection;
/// use water_sort_solver::moves::Move;
///
/// let puzzle = Collection::from_colours(&[vec![Red, Red, Green, Green], vec![Red, Red, Green, Green], vec![]], 4).unwrap();
/// assert_eq!(puzzle.moves(), vec![Move::new(0, 2), Move::new(1, 2)]);
///
/// let next = puzzle.after(Move::new(0, 2)).unwrap();
/// assert_eq!(next[2].len(), 2);
/// assert_eq!(puzzle[2].len(), 0, "the receiver is left untouched");
/// ```
#[derive(Clone, Debug)]
pub struct Collection {
    containers: Vec<Container>,
}

impl Collection {
    /// Builds a collection from already constructed containers.
    ///
    /// # Returns
    /// `Err(PuzzleError::NoContainers)` if `containers` is empty.
    pub fn new(containers: Vec<Container>) -> Result<Self, PuzzleError> {
        if containers.is_empty() {
            return Err(PuzzleError::NoContainers);
        }
        Ok(Collection { containers })
    }

    /// Builds a collection from colour sequences (bottom first), giving every
    /// container the same `capacity`.
    pub fn from_colours<C: AsRef<[Colour]>>(rows: &[C], capacity: usize) -> Result<Self, PuzzleError> {
        let containers = rows
            .iter()
            .map(|row| Container::from_colours(row.as_ref(), capacity))
            .collect::<Result<Vec<_>, _>>()?;
        Collection::new(containers)
    }

    /// Creates a shuffled, colour-balanced puzzle from a seed.
    ///
    /// The first `colours` palette entries each contribute `capacity` items,
    /// dealt into `colours` full containers, followed by `empties` empty ones.
    /// The same seed always produces the same puzzle.
    pub fn new_random_with_seed(
        colours: usize,
        empties: usize,
        capacity: usize,
        seed: u64,
    ) -> Result<Self, PuzzleError> {
        if colours > Colour::ALL.len() {
            return Err(PuzzleError::PaletteExhausted {
                requested: colours,
                available: Colour::ALL.len(),
            });
        }
        if capacity == 0 {
            return Err(PuzzleError::ZeroCapacity);
        }
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut items: Vec<Item> = Colour::ALL[..colours]
            .iter()
            .flat_map(|&colour| std::iter::repeat(Item::new(colour)).take(capacity))
            .collect();
        items.shuffle(&mut rng);

        let mut containers = items
            .chunks(capacity)
            .map(|chunk| Container::new(chunk.to_vec(), capacity))
            .collect::<Result<Vec<_>, _>>()?;
        for _ in 0..empties {
            containers.push(Container::empty(capacity)?);
        }
        Collection::new(containers)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn get(&self, index: usize) -> Option<&Container> {
        self.containers.get(index)
    }

    /// True when every container is solved.
    pub fn is_solved(&self) -> bool {
        self.containers.iter().all(Container::is_solved)
    }

    /// Checks whether `mv` is a move the search is allowed to make.
    ///
    /// Only whole-run pours are considered: every item in the source equal to
    /// its head must fit in the destination's free space. Pouring a single
    /// coloured container into an empty one is rejected since it changes
    /// nothing. Moves referencing containers out of range are invalid.
    pub fn is_valid(&self, mv: Move) -> bool {
        let (src, dest) = match (self.containers.get(mv.src), self.containers.get(mv.dest)) {
            (Some(src), Some(dest)) => (src, dest),
            _ => return false,
        };
        if mv.src == mv.dest || dest.is_full() || src.is_empty() {
            return false;
        }
        if src.is_unique() && dest.is_empty() {
            return false;
        }
        let head = match src.head() {
            Some(head) => head,
            None => return false,
        };
        dest.test(head) && src.count_of(head) <= dest.free_space()
    }

    /// Lists the legal moves from this state in generation order.
    ///
    /// Solved sources, and single-colour sources holding more than two items,
    /// are skipped. Empty destinations are interchangeable, so each source
    /// keeps at most one move into an empty container (the first one).
    pub fn moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for (x, src) in self.containers.iter().enumerate() {
            if src.is_solved() || (src.is_unique() && src.len() > 2) {
                continue;
            }
            let mut used_empty = false;
            for (y, dest) in self.containers.iter().enumerate() {
                if x == y {
                    continue;
                }
                let mv = Move::new(x, y);
                if !self.is_valid(mv) {
                    continue;
                }
                if used_empty && dest.is_empty() {
                    continue;
                }
                moves.push(mv);
                if dest.is_empty() {
                    used_empty = true;
                }
            }
        }
        moves
    }

    /// Returns a copy of this collection with `mv` applied.
    ///
    /// # Returns
    /// `Err(PuzzleError::InvalidMove)` if [`Collection::is_valid`] rejects `mv`;
    /// `self` is never modified either way.
    pub fn after(&self, mv: Move) -> Result<Collection, PuzzleError> {
        if !self.is_valid(mv) {
            return Err(PuzzleError::InvalidMove(mv));
        }
        let mut next = self.clone();
        let (src, dest) = pair_mut(&mut next.containers, mv.src, mv.dest);
        let poured = src.pour(dest);
        debug_assert!(poured, "a valid move always pours at least one item");
        Ok(next)
    }

    /// Computes the permutation-independent key used for deduplication.
    pub fn state_key(&self) -> StateKey {
        let mut contents: Vec<Vec<Item>> = self
            .containers
            .iter()
            .map(|c| c.items().to_vec())
            .collect();
        contents.sort_unstable();
        StateKey(contents)
    }

    /// Serializes the collection as a JSON array of colour-name arrays.
    pub fn to_json(&self) -> Result<String, PuzzleError> {
        let rows: Vec<&[Item]> = self.containers.iter().map(Container::items).collect();
        Ok(serde_json::to_string(&rows)?)
    }
}

/// Borrows two distinct elements of a slice mutably at once.
fn pair_mut<T>(slice: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = slice.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = slice.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

impl Index<usize> for Collection {
    type Output = Container;

    fn index(&self, index: usize) -> &Container {
        &self.containers[index]
    }
}

impl PartialEq for Collection {
    fn eq(&self, other: &Self) -> bool {
        self.containers.len() == other.containers.len() && self.state_key() == other.state_key()
    }
}

impl Eq for Collection {}

impl Hash for Collection {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.state_key().hash(state);
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, container) in self.containers.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{:>2}: {}", i, container)?;
        }
        Ok(())
    }
}
