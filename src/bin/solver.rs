use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use water_sort_solver::solver::{solve_bfs_with_limit, solve_dfs, Algorithm};
use water_sort_solver::utils::load_puzzle_file;
use water_sort_solver::DEFAULT_CAPACITY;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Search algorithm: bfs finds a shortest solution, dfs finds any solution
    #[clap(short, long, value_enum, default_value_t = Algorithm::Bfs)]
    algorithm: Algorithm,

    /// Capacity of every container
    #[clap(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Reject puzzles where a colour does not fill exactly one container
    #[clap(long)]
    reject_invalid: bool,

    /// Give up the breadth-first search after this many moves
    #[clap(long)]
    max_depth: Option<usize>,

    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to the puzzle file (.json, or one container per line in letter notation)
    puzzle: PathBuf,
}

fn init_logging(verbose: u8) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let start = match load_puzzle_file(&args.puzzle, args.capacity, args.reject_invalid) {
        Ok(collection) => collection,
        Err(e) => {
            eprintln!("Failed to load puzzle from {}: {}", args.puzzle.display(), e);
            return ExitCode::FAILURE;
        }
    };
    println!("Loaded puzzle from {}\n", args.puzzle.display());
    println!("{}\n", start);
    println!("Searching for a solution with {}...\n", args.algorithm);

    let timer = Instant::now();
    let result = match args.algorithm {
        Algorithm::Bfs => solve_bfs_with_limit(&start, args.max_depth),
        Algorithm::Dfs => solve_dfs(&start),
    };

    match result {
        Ok(Some(solution)) => {
            println!("Solved in {} moves ({:.2?})\n", solution.steps(), timer.elapsed());
            println!("{}\n", solution.state);
            if solution.moves.is_empty() {
                println!("  Already solved, no moves needed.");
            } else {
                for (i, mv) in solution.moves.iter().enumerate() {
                    println!("  Move {:>3}: {}", i + 1, mv);
                }
            }
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("Cannot be solved :(");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Search failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
