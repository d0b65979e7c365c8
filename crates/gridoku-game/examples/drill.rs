//! Example demonstrating a generated practice drill.
//!
//! This example shows how to:
//! - Generate a puzzle on a rectangular-block board
//! - Count its completions exhaustively
//! - Ask the exact-cover solver for a hint
//!
//! # Usage
//!
//! ```sh
//! cargo run --example drill
//! ```
//!
//! Pick the block geometry (the board is `rows*cols` on a side):
//!
//! ```sh
//! cargo run --example drill -- --block-rows 2 --block-cols 3
//! ```
//!
//! Control the number of exposed givens and the RNG seed:
//!
//! ```sh
//! cargo run --example drill -- --givens 30 --seed 7
//! ```

use std::process;

use clap::Parser;
use gridoku_core::{BlockDims, Board, Position};
use gridoku_game::Session;
use rand::SeedableRng as _;
use rand_pcg::Pcg64Mcg;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Rows per block.
    #[arg(long, value_name = "ROWS", default_value_t = 3)]
    block_rows: usize,

    /// Columns per block.
    #[arg(long, value_name = "COLS", default_value_t = 3)]
    block_cols: usize,

    /// Number of cells to expose as fixed givens.
    #[arg(long, value_name = "COUNT", default_value_t = 30)]
    givens: usize,

    /// RNG seed for reproducible puzzles.
    #[arg(long, value_name = "SEED", default_value_t = 0)]
    seed: u64,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let dims = match BlockDims::new(args.block_rows, args.block_cols) {
        Ok(dims) => dims,
        Err(err) => {
            eprintln!("Invalid block geometry: {err}");
            process::exit(2);
        }
    };

    let mut rng = Pcg64Mcg::seed_from_u64(args.seed);
    let mut session = Session::new(dims);
    if let Err(err) = session.generate(args.givens, &mut rng) {
        eprintln!("Generation failed: {err}");
        process::exit(1);
    }

    println!("Seed:");
    println!("  {}", args.seed);
    println!();

    println!("Puzzle ({} givens):", args.givens);
    print_board(session.board());
    println!();

    println!("Completions:");
    println!("  {}", session.count_solutions());
    println!();

    let Some(pos) = session.board().first_empty() else {
        println!("Nothing left to fill.");
        return;
    };
    match session.hint(pos) {
        Ok(Some(value)) => println!("Hint: {value} at {pos}"),
        Ok(None) => println!("No hint: the board has no completion."),
        Err(err) => {
            eprintln!("Hint failed: {err}");
            process::exit(1);
        }
    }
}

fn print_board(board: &Board) {
    let size = board.size();
    for row in 0..size {
        print!(" ");
        for col in 0..size {
            let value = board.cell(Position::new(row, col)).value();
            if value == 0 {
                print!(" .");
            } else {
                print!(" {value}");
            }
        }
        println!();
    }
}
