use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use water_sort_solver::solver::solve_bfs_with_limit;
use water_sort_solver::utils::load_puzzle_file;
use water_sort_solver::{Collection, Move, DEFAULT_CAPACITY};

/// Hints give up beyond this many moves.
const HINT_DEPTH: usize = 60;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Play a water sort puzzle in the terminal", long_about = None)]
struct Args {
    /// Capacity of every container
    #[clap(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Path to the puzzle file; a random puzzle is generated when omitted
    puzzle: Option<PathBuf>,

    /// Seed for the random puzzle
    #[clap(long, default_value_t = 514514)]
    seed: u64,
}

fn load(args: &Args) -> Result<Collection, String> {
    match &args.puzzle {
        Some(path) => load_puzzle_file(path, args.capacity, false)
            .map_err(|e| format!("Failed to load {}: {}", path.display(), e)),
        None => Collection::new_random_with_seed(5, 2, args.capacity, args.seed).map_err(|e| e.to_string()),
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    let start = match load(&args) {
        Ok(collection) => collection,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    let mut history: Vec<Collection> = vec![start];
    println!("Welcome to Water Sort!");

    while let Some(current) = history.last().cloned() {
        println!("---------------------");
        println!("Moves: {}", history.len() - 1);
        println!("{}", current);

        if current.is_solved() {
            println!("---------------------");
            println!("🎉 SOLVED in {} moves! 🎉", history.len() - 1);
            break;
        }
        if current.moves().is_empty() {
            println!("No moves left. Press 'u' to undo or 'q' to quit.");
        }

        print!("Enter your move (src dest), 'h' for a hint, 'u' to undo, 'q' to quit: ");
        io::stdout().flush().ok();

        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => {
                println!("Error reading input. Please try again.");
                continue;
            }
        }

        match input.trim() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "u" => {
                if history.len() > 1 {
                    history.pop();
                    println!("Move undone.");
                } else {
                    println!("Cannot undo further, already at the initial state.");
                }
            }
            "h" => match solve_bfs_with_limit(&current, Some(HINT_DEPTH)) {
                Ok(Some(solution)) => match solution.moves.first() {
                    Some(mv) => println!("Hint: pour {} ({} moves to go).", mv, solution.steps()),
                    None => println!("Already solved."),
                },
                Ok(None) => println!("No solution within {} moves, try undoing.", HINT_DEPTH),
                Err(e) => println!("Hint failed: {}", e),
            },
            other => {
                let parts: Vec<&str> = other.split_whitespace().collect();
                let parsed = match parts.as_slice() {
                    [src, dest] => src.parse::<usize>().ok().zip(dest.parse::<usize>().ok()),
                    _ => None,
                };
                let Some((src, dest)) = parsed else {
                    println!("Invalid input format. Use 'src dest', 'h', 'u' or 'q'.");
                    continue;
                };
                match current.after(Move::new(src, dest)) {
                    Ok(next) => history.push(next),
                    Err(e) => println!("{}", e),
                }
            }
        }
    }
}
