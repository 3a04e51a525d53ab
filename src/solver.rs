//! Breadth-first and depth-first search over the legal-move graph.
//!
//! Both drivers are written against [`SearchState`], the capability set
//! `{ moves, after, is_solved, state_key }`, which [`Collection`] implements.
//! Each call owns all of its search state, so independent searches can run
//! side by side on copies of the same root.

use clap::ValueEnum;
use log::{debug, info, trace};
use std::collections::HashSet;
use std::fmt;

use crate::collection::{Collection, StateKey};
use crate::error::PuzzleError;
use crate::moves::Move;

/// What the search drivers need from a puzzle state.
pub trait SearchState: Clone {
    /// Legal moves in generation order.
    fn moves(&self) -> Vec<Move>;

    /// The successor state after `mv`.
    fn after(&self, mv: Move) -> Result<Self, PuzzleError>;

    fn is_solved(&self) -> bool;

    /// Key under which structurally equal states collide.
    fn state_key(&self) -> StateKey;
}

impl SearchState for Collection {
    fn moves(&self) -> Vec<Move> {
        Collection::moves(self)
    }

    fn after(&self, mv: Move) -> Result<Self, PuzzleError> {
        Collection::after(self, mv)
    }

    fn is_solved(&self) -> bool {
        Collection::is_solved(self)
    }

    fn state_key(&self) -> StateKey {
        Collection::state_key(self)
    }
}

/// A state paired with the moves that led to it from the root.
#[derive(Clone, Debug)]
pub struct SearchNode<S> {
    pub state: S,
    pub moves: Vec<Move>,
}

impl<S: SearchState> SearchNode<S> {
    fn root(state: S) -> Self {
        SearchNode {
            state,
            moves: Vec::new(),
        }
    }

    /// True if `mv` undoes the previous move which itself undid the one before
    /// (A->B, B->A, then A->B again).
    fn closes_two_cycle(&self, mv: Move) -> bool {
        match self.moves.as_slice() {
            [.., before_last, last] => *last == mv.reverse() && *before_last == mv,
            _ => false,
        }
    }

    fn child(&self, state: S, mv: Move) -> Self {
        let mut moves = Vec::with_capacity(self.moves.len() + 1);
        moves.extend_from_slice(&self.moves);
        moves.push(mv);
        SearchNode { state, moves }
    }
}

/// Represents a solution found by one of the solvers.
#[derive(Clone, Debug)]
pub struct Solution<S = Collection> {
    /// The solved state.
    pub state: S,
    /// The moves, in order, that turn the root into `state`.
    pub moves: Vec<Move>,
}

impl<S> Solution<S> {
    /// Number of moves in the solution.
    pub fn steps(&self) -> usize {
        self.moves.len()
    }
}

impl<S> From<SearchNode<S>> for Solution<S> {
    fn from(node: SearchNode<S>) -> Self {
        Solution {
            state: node.state,
            moves: node.moves,
        }
    }
}

/// Solves the puzzle using breadth-first search, returning a shortest solution.
///
/// # Returns
/// * `Ok(Some(solution))` with the first solved state found at the shallowest depth.
/// * `Ok(None)` if the frontier runs dry: the puzzle cannot be solved.
/// * `Err(_)` only if a state rejects one of its own generated moves.
pub fn solve_bfs<S: SearchState>(root: &S) -> Result<Option<Solution<S>>, PuzzleError> {
    solve_bfs_with_limit(root, None)
}

/// Breadth-first search that gives up after `max_depth` moves.
///
/// Deduplication only spans a single depth level, and only A->B->A->B
/// oscillations are cut, so on some unsolvable inputs the frontier never
/// empties; a depth limit bounds such searches.
pub fn solve_bfs_with_limit<S: SearchState>(
    root: &S,
    max_depth: Option<usize>,
) -> Result<Option<Solution<S>>, PuzzleError> {
    if root.is_solved() {
        return Ok(Some(SearchNode::root(root.clone()).into()));
    }
    let root = SearchNode::root(root.clone());

    let mut frontier = Vec::new();
    for mv in root.state.moves() {
        let node = root.child(root.state.after(mv)?, mv);
        if node.state.is_solved() {
            info!("BFS solved in 1 move");
            return Ok(Some(node.into()));
        }
        frontier.push(node);
    }

    let mut depth = 1;
    while !frontier.is_empty() {
        if max_depth.map_or(false, |limit| depth >= limit) {
            info!("BFS reached depth limit {} with {} open states", depth, frontier.len());
            return Ok(None);
        }
        debug!("BFS depth {} frontier {}", depth, frontier.len());

        let mut next_frontier = Vec::new();
        let mut discovered: HashSet<StateKey> = HashSet::new();
        for node in &frontier {
            for mv in node.state.moves() {
                if node.closes_two_cycle(mv) {
                    continue;
                }
                let next = node.state.after(mv)?;
                let is_solved = next.is_solved();
                // Dead end: nothing more can happen from here.
                if !is_solved && next.moves().is_empty() {
                    continue;
                }
                if !discovered.insert(next.state_key()) {
                    continue;
                }
                let child = node.child(next, mv);
                if is_solved {
                    info!("BFS solved in {} moves", child.moves.len());
                    return Ok(Some(child.into()));
                }
                next_frontier.push(child);
            }
        }
        frontier = next_frontier;
        depth += 1;
    }

    info!("BFS exhausted the search space at depth {}", depth);
    Ok(None)
}

/// One level of the explicit depth-first stack.
struct Frame<S> {
    state: S,
    moves: Vec<Move>,
    next: usize,
}

/// Solves the puzzle using depth-first search, returning the first solution found.
///
/// Moves are explored in generation order and every state is visited at most
/// once over the whole traversal. The solution is not necessarily the shortest.
/// An explicit stack replaces recursion, so deep solutions cannot overflow the
/// call stack.
pub fn solve_dfs<S: SearchState>(root: &S) -> Result<Option<Solution<S>>, PuzzleError> {
    if root.is_solved() {
        return Ok(Some(SearchNode::root(root.clone()).into()));
    }

    let mut visited: HashSet<StateKey> = HashSet::new();
    let mut path: Vec<Move> = Vec::new();
    let mut stack: Vec<Frame<S>> = Vec::new();
    let mut entering = Some(root.clone());

    loop {
        if let Some(state) = entering.take() {
            if !visited.insert(state.state_key()) {
                trace!("DFS revisit at depth {}, backtracking", path.len());
                path.pop();
            } else if state.is_solved() {
                info!("DFS solved in {} moves ({} states visited)", path.len(), visited.len());
                return Ok(Some(Solution { state, moves: path }));
            } else {
                let moves = state.moves();
                stack.push(Frame {
                    state,
                    moves,
                    next: 0,
                });
            }
        }

        let Some(frame) = stack.last_mut() else {
            break;
        };
        match frame.moves.get(frame.next).copied() {
            Some(mv) => {
                frame.next += 1;
                entering = Some(frame.state.after(mv)?);
                path.push(mv);
            }
            None => {
                trace!("DFS exhausted moves at depth {}", path.len());
                stack.pop();
                path.pop();
            }
        }
    }

    info!("DFS exhausted the search space ({} states visited)", visited.len());
    Ok(None)
}

/// Search strategy selector used by the front ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Breadth-first search: shortest solution.
    Bfs,
    /// Depth-first search: first solution found.
    Dfs,
}

impl Algorithm {
    pub fn solve<S: SearchState>(&self, root: &S) -> Result<Option<Solution<S>>, PuzzleError> {
        match self {
            Algorithm::Bfs => solve_bfs(root),
            Algorithm::Dfs => solve_dfs(root),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bfs => f.write_str("bfs"),
            Algorithm::Dfs => f.write_str("dfs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::Colour::{self, *};
    use crate::container::DEFAULT_CAPACITY;

    fn collection(rows: &[Vec<Colour>]) -> Collection {
        Collection::from_colours(rows, DEFAULT_CAPACITY).unwrap()
    }

    fn moves(pairs: &[(usize, usize)]) -> Vec<Move> {
        pairs.iter().map(|&p| Move::from(p)).collect()
    }

    fn simple_puzzle() -> Collection {
        collection(&[
            vec![Blue, Orange, Red, Blue],
            vec![Orange, Orange, Red, Blue],
            vec![Red, Blue, Orange, Red],
            vec![],
            vec![],
        ])
    }

    fn replay(root: &Collection, path: &[Move]) -> Collection {
        path.iter()
            .fold(root.clone(), |state, &mv| state.after(mv).unwrap())
    }

    #[test]
    fn test_bfs_solved() {
        let puzzle = collection(&[vec![]]);
        let result = solve_bfs(&puzzle).unwrap().unwrap();
        assert_eq!(result.state, puzzle);
        assert_eq!(result.steps(), 0);
    }

    #[test]
    fn test_dfs_solved() {
        let puzzle = collection(&[vec![Red; 4], vec![]]);
        let result = solve_dfs(&puzzle).unwrap().unwrap();
        assert_eq!(result.state, puzzle);
        assert!(result.moves.is_empty());
    }

    #[test]
    fn test_bfs_debug_puzzle() {
        let puzzle = collection(&[vec![Red, Red, Green, Green], vec![Red, Red, Green, Green], vec![]]);
        assert_eq!(puzzle.moves(), moves(&[(0, 2), (1, 2)]));
        let result = solve_bfs(&puzzle).unwrap().unwrap();
        assert!(result.state.is_solved());
        assert_eq!(result.moves, moves(&[(0, 2), (1, 2), (0, 1)]));
    }

    #[test]
    fn test_bfs_simple_puzzle() {
        let result = solve_bfs(&simple_puzzle()).unwrap().unwrap();
        assert!(result.state.is_solved(), "Solved successfully");
        assert_eq!(result.steps(), 10, "Solved in 10 moves");
        assert_eq!(
            result.moves,
            moves(&[(0, 3), (0, 4), (1, 3), (1, 4), (0, 1), (0, 3), (2, 4), (2, 1), (2, 3), (2, 4)])
        );
        assert_eq!(replay(&simple_puzzle(), &result.moves), result.state);
    }

    #[test]
    fn test_dfs_simple_puzzle() {
        let result = solve_dfs(&simple_puzzle()).unwrap().unwrap();
        assert!(result.state.is_solved(), "Solved successfully");
        assert_eq!(result.steps(), 13, "Solved in 13 moves");
        assert_eq!(
            result.moves,
            moves(&[
                (0, 3), (0, 4), (1, 3), (1, 4), (0, 1), (0, 3), (2, 0),
                (0, 4), (2, 0), (0, 1), (2, 0), (0, 3), (2, 4),
            ])
        );
        assert_eq!(replay(&simple_puzzle(), &result.moves).containers(), result.state.containers());
    }

    #[test]
    fn test_dfs_complex() {
        let puzzle = collection(&[
            vec![Red, Orange, LightGreen, LightBlue],
            vec![Grey, Orange, Blue, Grey],
            vec![Orange, Red, LightBlue, Orange],
            vec![Grey, Pink, Green, Blue],
            vec![Pink, Red, LightGreen, Pink],
            vec![LightBlue, Purple, Green, LightBlue],
            vec![LightGreen, Grey, Red, Green],
            vec![Purple, Pink, Blue, Blue],
            vec![Purple, LightGreen, Purple, Green],
            vec![],
            vec![],
        ]);
        let expected = collection(&[
            vec![Red; 4],
            vec![Green; 4],
            vec![Blue; 4],
            vec![Grey; 4],
            vec![Pink; 4],
            vec![],
            vec![LightGreen; 4],
            vec![Purple; 4],
            vec![],
            vec![LightBlue; 4],
            vec![Orange; 4],
        ]);
        let result = solve_dfs(&puzzle).unwrap().unwrap();
        assert!(result.state.is_solved());
        assert_eq!(result.state.containers(), expected.containers());
        assert_eq!(result.steps(), 34, "Solved in 34 moves");
        assert_eq!(
            result.moves,
            moves(&[
                (0, 9), (0, 10), (2, 0), (2, 9), (5, 9), (6, 5), (2, 6), (2, 0), (3, 2),
                (7, 2), (4, 7), (8, 3), (10, 4), (0, 10), (6, 0), (1, 6), (1, 2), (1, 10),
                (1, 6), (3, 1), (3, 7), (5, 1), (5, 8), (5, 9), (4, 5), (4, 0), (6, 3),
                (5, 6), (7, 4), (8, 5), (5, 7), (8, 5), (5, 6), (8, 7),
            ])
        );
    }

    #[test]
    fn test_bfs_finds_single_move_solution() {
        let puzzle = collection(&[vec![Red, Red, Red], vec![Red]]);
        let result = solve_bfs(&puzzle).unwrap().unwrap();
        assert_eq!(result.moves, moves(&[(1, 0)]));
        assert!(result.state.is_solved());
    }

    #[test]
    fn test_unsolvable_puzzles_return_none() {
        let stuck = Collection::from_colours(&[vec![Red, Green], vec![Green, Red]], 2).unwrap();
        assert!(solve_bfs(&stuck).unwrap().is_none());
        assert!(solve_dfs(&stuck).unwrap().is_none());

        let unbalanced = collection(&[vec![Red, Red, Green], vec![Green], vec![]]);
        assert!(solve_bfs(&unbalanced).unwrap().is_none());
        assert!(solve_dfs(&unbalanced).unwrap().is_none());
    }

    #[test]
    fn test_bfs_depth_limit() {
        assert!(solve_bfs_with_limit(&simple_puzzle(), Some(5)).unwrap().is_none());
        let result = solve_bfs_with_limit(&simple_puzzle(), Some(10)).unwrap().unwrap();
        assert_eq!(result.steps(), 10);
    }

    #[test]
    fn test_two_cycle_guard() {
        let node = SearchNode {
            state: simple_puzzle(),
            moves: moves(&[(0, 3), (3, 0)]),
        };
        assert!(node.closes_two_cycle(Move::new(0, 3)));
        assert!(!node.closes_two_cycle(Move::new(3, 0)));
        assert!(!node.closes_two_cycle(Move::new(1, 3)));

        let short = SearchNode::root(simple_puzzle());
        assert!(!short.closes_two_cycle(Move::new(0, 3)));
    }

    #[test]
    fn test_searches_leave_root_untouched() {
        let root = simple_puzzle();
        let before = root.clone();
        let _ = solve_bfs(&root).unwrap();
        let _ = solve_dfs(&root).unwrap();
        assert_eq!(root.containers(), before.containers());
    }

    #[test]
    fn test_algorithm_dispatch() {
        let root = simple_puzzle();
        assert_eq!(Algorithm::Bfs.solve(&root).unwrap().unwrap().steps(), 10);
        assert_eq!(Algorithm::Dfs.solve(&root).unwrap().unwrap().steps(), 13);
        assert_eq!(Algorithm::Bfs.to_string(), "bfs");
    }

    #[test]
    fn test_random_puzzles_solutions_replay() {
        for seed in 0..5u64 {
            let root = Collection::new_random_with_seed(3, 2, 4, seed).unwrap();
            let bfs = solve_bfs_with_limit(&root, Some(40)).unwrap();
            let dfs = solve_dfs(&root).unwrap();
            if let (Some(bfs), Some(dfs)) = (bfs, dfs) {
                assert!(bfs.steps() <= dfs.steps(), "BFS is never longer than DFS");
                assert!(replay(&root, &bfs.moves).is_solved());
                assert!(replay(&root, &dfs.moves).is_solved());
            }
        }
    }
}
