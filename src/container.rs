//! Capacity-bounded, LIFO-ordered stacks of coloured items ("tubes").

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::colour::{Colour, Item};
use crate::error::PuzzleError;

/// Capacity used when a puzzle document does not specify one.
pub const DEFAULT_CAPACITY: usize = 4;

/// A fixed-capacity stack of items, stored bottom to top.
///
/// The number of items at the top matching the head is tracked incrementally
/// by [`Container::add`] and [`Container::pour`], because move generation asks
/// for it on every candidate move.
///
/// Two containers compare equal when their contents match; capacity is not
/// part of equality.
///
/// # Examples
/// ```
/// use water_sort_solver::colour::Colour;
/// use water_sort_solver::container::Container;
///
/// let mut src = Container::from_colours(&[Colour::Red, Colour::Green, Colour::Green], 4).unwrap();
/// let mut dest = Container::empty(4).unwrap();
/// assert!(src.pour(&mut dest));
/// assert_eq!(dest.len(), 2);
/// assert_eq!(src.num_matching_head(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Container {
    items: Vec<Item>,
    capacity: usize,
    num_matching_head: usize,
}

impl Container {
    /// Creates a container holding `items` (bottom first).
    ///
    /// # Returns
    /// * `Err(PuzzleError::ZeroCapacity)` if `capacity` is 0.
    /// * `Err(PuzzleError::Overfilled)` if there are more items than `capacity`.
    pub fn new(items: Vec<Item>, capacity: usize) -> Result<Self, PuzzleError> {
        if capacity == 0 {
            return Err(PuzzleError::ZeroCapacity);
        }
        if items.len() > capacity {
            return Err(PuzzleError::Overfilled {
                len: items.len(),
                capacity,
            });
        }
        let num_matching_head = count_matching_head(&items);
        Ok(Container {
            items,
            capacity,
            num_matching_head,
        })
    }

    pub fn empty(capacity: usize) -> Result<Self, PuzzleError> {
        Container::new(Vec::new(), capacity)
    }

    pub fn from_colours(colours: &[Colour], capacity: usize) -> Result<Self, PuzzleError> {
        Container::new(colours.iter().copied().map(Item::new).collect(), capacity)
    }

    /// Copies this container into one of a different capacity.
    ///
    /// When the new capacity is smaller than the current length, the bottom-most
    /// `capacity` items are kept and the rest are dropped.
    pub fn narrowed(&self, capacity: usize) -> Result<Self, PuzzleError> {
        let keep = self.items.len().min(capacity);
        Container::new(self.items[..keep].to_vec(), capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The items from bottom to top.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    /// Remaining room before the container is full.
    pub fn free_space(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    /// The top-most item, or `None` if empty.
    pub fn head(&self) -> Option<Item> {
        self.items.last().copied()
    }

    /// True if every item has the same colour. Vacuously true when empty.
    pub fn is_unique(&self) -> bool {
        self.num_matching_head == self.items.len()
    }

    /// True if empty, or full with a single colour.
    pub fn is_solved(&self) -> bool {
        self.is_empty() || (self.is_unique() && self.is_full())
    }

    /// Count of consecutive items from the top equal to the head (0 when empty).
    pub fn num_matching_head(&self) -> usize {
        self.num_matching_head
    }

    /// Counts every item in the container equal to `item`, not only the top run.
    pub fn count_of(&self, item: Item) -> usize {
        self.items.iter().filter(|&&i| i == item).count()
    }

    /// Checks whether `item` can be placed on top of this container.
    ///
    /// Anything fits an empty container; otherwise the container must not be
    /// full and its head must match.
    pub fn test(&self, item: Item) -> bool {
        if self.is_full() {
            return false;
        }
        match self.head() {
            Some(head) => head == item,
            None => true,
        }
    }

    /// Adds `item` on top if [`Container::test`] allows it.
    ///
    /// # Returns
    /// `true` if the item was added, `false` (and no change) otherwise.
    pub fn add(&mut self, item: Item) -> bool {
        if !self.test(item) {
            return false;
        }
        self.items.push(item);
        self.num_matching_head += 1;
        true
    }

    /// Moves the head run of this container onto `target`.
    ///
    /// As many matching items as fit are transferred; the pour stops early when
    /// `target` fills up, leaving the rest of the run behind.
    ///
    /// # Returns
    /// `true` if at least one item was moved. `false` if this container is
    /// empty or `target` cannot accept the head.
    pub fn pour(&mut self, target: &mut Container) -> bool {
        let head = match self.head() {
            Some(head) => head,
            None => return false,
        };
        if !target.test(head) {
            return false;
        }
        while self.head() == Some(head) && !target.is_full() {
            self.items.pop();
            let added = target.add(head);
            debug_assert!(added, "target accepted the head colour and had room");
            self.num_matching_head -= 1;
        }
        if self.num_matching_head == 0 && !self.is_empty() {
            // A new colour is exposed at the head.
            self.num_matching_head = count_matching_head(&self.items);
        }
        true
    }
}

/// Scans backward from the top counting items equal to the head.
fn count_matching_head(items: &[Item]) -> usize {
    match items.last() {
        Some(head) => items.iter().rev().take_while(|i| *i == head).count(),
        None => 0,
    }
}

impl PartialEq for Container {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Container {}

impl Hash for Container {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.items.hash(state);
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for item in &self.items {
            write!(f, "{}", item)?;
        }
        for _ in 0..self.free_space() {
            f.write_str(" ")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Colour::{Green, Red};

    fn container(colours: &[Colour]) -> Container {
        Container::from_colours(colours, DEFAULT_CAPACITY).unwrap()
    }

    #[test]
    fn test_empty_container() {
        let cont = container(&[]);
        assert_eq!(cont.capacity(), 4, "Capacity should be 4");
        assert!(cont.is_empty(), "An empty container is empty");
        assert!(!cont.is_full(), "An empty container is not full");
        assert!(cont.is_unique(), "An empty container is unique");
        assert!(cont.is_solved(), "An empty container is solved");
        assert_eq!(cont.len(), 0);
        assert_eq!(cont.head(), None);
        assert_eq!(cont.num_matching_head(), 0);
        assert!(cont.test(Item::new(Red)), "Any colour should test true");
        assert!(cont.test(Item::new(Colour::Blue)), "Any colour should test true");
        assert_eq!(cont.to_string(), "[    ]");
    }

    #[test]
    fn test_container_capacity() {
        let mut cont = Container::from_colours(&[Green], 2).unwrap();
        assert_eq!(cont.capacity(), 2);
        assert!(!cont.is_full());
        assert_eq!(cont.to_string(), "[\x1b[38;2;102;153;0m\u{25A0}\x1b[39m ]");
        assert!(cont.add(Item::new(Green)), "Add should succeed");
        assert!(cont.is_full(), "Container is now full");
        assert!(cont.is_unique());
        assert!(cont.is_solved());
    }

    #[test]
    fn test_container_construction_errors() {
        assert_eq!(Container::empty(0).unwrap_err(), PuzzleError::ZeroCapacity);
        assert_eq!(
            Container::from_colours(&[Red, Red, Red], 2).unwrap_err(),
            PuzzleError::Overfilled { len: 3, capacity: 2 }
        );
    }

    #[test]
    fn test_container_narrowed_keeps_bottom_items() {
        let large = container(&[Red, Red, Green, Green]);
        let small = large.narrowed(2).unwrap();
        assert_eq!(small.len(), 2, "Container should be constrained to maximum capacity");
        assert!(small.is_full());
        assert_eq!(small, Container::from_colours(&[Red, Red], 2).unwrap());
        assert_eq!(small.num_matching_head(), 2);

        let original = Container::from_colours(&[Red], 1).unwrap();
        let widened = original.narrowed(4).unwrap();
        assert_eq!(widened, original);
        assert!(!widened.is_full());
    }

    #[test]
    fn test_container_full_mixed() {
        let cont = container(&[Red, Red, Green, Green]);
        assert!(!cont.is_empty());
        assert!(cont.is_full());
        assert!(!cont.is_unique());
        assert!(!cont.is_solved());
        assert_eq!(cont.head(), Some(Item::new(Green)));
        assert_eq!(cont.num_matching_head(), 2);
        assert_eq!(cont.count_of(Item::new(Red)), 2);
        assert!(!cont.test(Item::new(Red)), "Test never passes for a full container");
        assert!(!cont.test(Item::new(Green)), "Test never passes for a full container");
    }

    #[test]
    fn test_container_test_non_full() {
        let cont = container(&[Red, Red, Green]);
        assert!(cont.test(Item::new(Green)), "Head is green");
        assert!(!cont.test(Item::new(Red)), "Head is not red");
    }

    #[test]
    fn test_container_add_empty() {
        let mut cont = container(&[]);
        assert!(cont.add(Item::new(Red)));
        assert!(!cont.is_empty());
        assert_eq!(cont.items(), &[Item::new(Red)]);
        assert_eq!(cont.num_matching_head(), 1);
    }

    #[test]
    fn test_container_add_full_or_mismatched() {
        let mut cont = Container::from_colours(&[Red], 1).unwrap();
        assert!(!cont.add(Item::new(Red)), "Cannot add to a full container");
        assert_eq!(cont.items(), &[Item::new(Red)]);

        let mut cont = container(&[Red]);
        assert!(!cont.add(Item::new(Green)), "Cannot add a mismatched colour");
        assert_eq!(cont.len(), 1);
        assert_eq!(cont.num_matching_head(), 1);
    }

    #[test]
    fn test_container_pour_single_to_empty() {
        let mut cont = container(&[Red]);
        let mut target = container(&[]);
        assert!(cont.pour(&mut target), "Pour should succeed");
        assert!(cont.is_empty());
        assert_eq!(cont.num_matching_head(), 0);
        assert_eq!(target.items(), &[Item::new(Red)]);
    }

    #[test]
    fn test_container_pour_from_empty() {
        let mut cont = container(&[]);
        let mut target = container(&[]);
        assert!(!cont.pour(&mut target), "Cannot pour from an empty container");
    }

    #[test]
    fn test_container_pour_single_to_matching() {
        let mut cont = container(&[Red]);
        let mut target = container(&[Red]);
        assert!(cont.pour(&mut target));
        assert!(cont.is_empty());
        assert_eq!(target.len(), 2);
        assert_eq!(target.num_matching_head(), 2);
    }

    #[test]
    fn test_container_pour_single_to_non_matching() {
        let mut cont = container(&[Red]);
        let mut target = container(&[Green]);
        assert!(!cont.pour(&mut target), "Pour should fail");
        assert_eq!(cont.items(), &[Item::new(Red)]);
        assert_eq!(target.items(), &[Item::new(Green)]);
    }

    #[test]
    fn test_container_pour_single_to_full() {
        let mut cont = container(&[Red]);
        let mut target = Container::from_colours(&[Red], 1).unwrap();
        assert!(!cont.pour(&mut target), "Pour should fail");
        assert_eq!(cont.len(), 1);
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn test_container_pour_multiple_matching_to_matching() {
        let mut cont = container(&[Red, Red]);
        let mut target = container(&[Red, Red]);
        assert!(cont.pour(&mut target));
        assert!(cont.is_empty());
        assert!(target.is_full(), "Target is now full");
        assert!(target.is_solved());
        assert_eq!(target.num_matching_head(), 4);
    }

    #[test]
    fn test_container_pour_partial_when_target_fills() {
        let mut cont = container(&[Red, Red]);
        let mut target = container(&[Red, Red, Red]);
        assert!(cont.pour(&mut target), "Partial pours still count as a pour");
        assert_eq!(cont.items(), &[Item::new(Red)], "One red item is left behind");
        assert_eq!(cont.num_matching_head(), 1);
        assert!(target.is_full());
    }

    #[test]
    fn test_container_pour_recomputes_new_head_run() {
        let mut cont = container(&[Green, Green, Red]);
        let mut target = container(&[]);
        assert!(cont.pour(&mut target));
        assert_eq!(cont.head(), Some(Item::new(Green)));
        assert_eq!(cont.num_matching_head(), 2);
        assert!(cont.is_unique());

        let mut cont = container(&[Red, Green, Red, Red]);
        let mut target = container(&[]);
        assert!(cont.pour(&mut target));
        assert_eq!(target.len(), 2);
        assert_eq!(cont.num_matching_head(), 1);
        assert!(!cont.is_unique());
    }

    #[test]
    fn test_container_second_pour_from_emptied_source() {
        let mut cont = container(&[Red]);
        let mut target = container(&[]);
        assert!(cont.pour(&mut target));
        let before = target.clone();
        assert!(!cont.pour(&mut target), "Nothing left to pour");
        assert_eq!(target, before, "Target must not change");
    }

    #[test]
    fn test_container_add_then_pour_back_restores_content() {
        let original = container(&[Green, Red]);
        let mut cont = original.clone();
        assert!(cont.add(Item::new(Red)));
        assert_eq!(cont.num_matching_head(), 2);

        let mut spill = Container::empty(1).unwrap();
        assert!(cont.pour(&mut spill), "One item fits the spill container");
        assert_eq!(spill.items(), &[Item::new(Red)]);
        assert_eq!(cont, original, "No item may be lost or duplicated");
        assert_eq!(cont.num_matching_head(), 1);
    }

    #[test]
    fn test_container_copy_and_mutate() {
        let cont = container(&[Red]);
        let mut copy = cont.clone();
        assert_eq!(cont, copy);
        assert!(copy.add(Item::new(Red)));
        assert_ne!(cont, copy, "The add should only affect one container");
    }

    #[test]
    fn test_container_equality_ignores_capacity() {
        let a = Container::from_colours(&[Red], 1).unwrap();
        let b = Container::from_colours(&[Red], 4).unwrap();
        assert_eq!(a, b);
        assert!(a.is_solved());
        assert!(!b.is_solved());
    }
}
