use std::time::{Duration, Instant};
use water_sort_solver::solver::{solve_bfs_with_limit, solve_dfs, Solution};
use water_sort_solver::{Collection, PuzzleError};

const NUM_RANDOM_PUZZLES_FOR_EVALUATION: u64 = 20;
const START_SEED: u64 = 0;
const COLOURS: usize = 5;
const EMPTY_CONTAINERS: usize = 2;
const CAPACITY: usize = 4;
const BFS_DEPTH_LIMIT: usize = 60;

type SearchFn = fn(&Collection) -> Result<Option<Solution>, PuzzleError>;

fn bfs(root: &Collection) -> Result<Option<Solution>, PuzzleError> {
    solve_bfs_with_limit(root, Some(BFS_DEPTH_LIMIT))
}

#[derive(Default)]
struct Tally {
    solved: usize,
    unsolved: usize,
    total_moves: usize,
    total_time: Duration,
}

fn main() {
    env_logger::init();

    let searches: [(&str, SearchFn); 2] = [("BFS", bfs), ("DFS", solve_dfs::<Collection>)];
    let mut tallies: Vec<Tally> = searches.iter().map(|_| Tally::default()).collect();

    println!(
        "Starting search evaluation for {} puzzles ({} colours, {} empty containers)...",
        NUM_RANDOM_PUZZLES_FOR_EVALUATION, COLOURS, EMPTY_CONTAINERS
    );

    for puzzle_idx in 0..NUM_RANDOM_PUZZLES_FOR_EVALUATION {
        let seed = START_SEED + puzzle_idx;
        let root = match Collection::new_random_with_seed(COLOURS, EMPTY_CONTAINERS, CAPACITY, seed) {
            Ok(root) => root,
            Err(e) => {
                eprintln!("Failed to generate puzzle {}: {}", puzzle_idx, e);
                return;
            }
        };
        println!("\nEvaluating Puzzle {} (Seed: {})", puzzle_idx, seed);

        for ((name, search), tally) in searches.iter().zip(tallies.iter_mut()) {
            let timer = Instant::now();
            let result = search(&root);
            let elapsed = timer.elapsed();
            tally.total_time += elapsed;
            match result {
                Ok(Some(solution)) => {
                    tally.solved += 1;
                    tally.total_moves += solution.steps();
                    println!("  Search: {:<5} Moves: {:<4} Time: {:.2?}", name, solution.steps(), elapsed);
                }
                Ok(None) => {
                    tally.unsolved += 1;
                    println!("  Search: {:<5} no solution ({:.2?})", name, elapsed);
                }
                Err(e) => {
                    eprintln!("Error: {} failed on puzzle {} (Seed: {}): {}\n{}", name, puzzle_idx, seed, e, root);
                }
            }
        }
    }

    println!("\n--- Evaluation Complete ---");
    for ((name, _), tally) in searches.iter().zip(&tallies) {
        if tally.solved == 0 {
            println!("Search {:<5}: no puzzles solved ({} unsolved)", name, tally.unsolved);
            continue;
        }
        println!(
            "Search {:<5}: Solved = {}, Unsolved = {}, Average Moves = {:.2}, Total Time = {:.2?}",
            name,
            tally.solved,
            tally.unsolved,
            tally.total_moves as f64 / tally.solved as f64,
            tally.total_time
        );
    }
}
