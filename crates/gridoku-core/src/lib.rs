//! Core board model and rule checking for rectangular-block Sudoku.
//!
//! A board is an `N × N` grid of [`Cell`]s where `N = block_rows *
//! block_cols`, tiled by `block_rows × block_cols` rectangular blocks. Each
//! row, column, and block must contain every value `1..=N` exactly once.
//!
//! This crate owns the data model ([`Board`], [`Cell`], [`BlockDims`],
//! [`Position`]) and the pure rule layer: legality checking, conflict
//! (error) marking, and candidate enumeration. Search, counting, and
//! exact-cover solving live in `gridoku-solver`; move history and the game
//! session live in `gridoku-game`.
//!
//! # Examples
//!
//! ```
//! use gridoku_core::{BlockDims, Board, Position};
//!
//! let dims = BlockDims::new(2, 2).unwrap();
//! let mut board = Board::new(dims);
//! assert_eq!(board.size(), 4);
//!
//! board.apply_value(Position::new(0, 0), 3).unwrap();
//! assert!(!board.is_legal(3, Position::new(0, 1), false));
//! assert_eq!(board.options(Position::new(0, 1)).as_slice(), &[1, 2, 4]);
//! ```

pub use self::{
    board::{Board, BoardError},
    cell::Cell,
    dims::{BlockDims, DimsError, Position},
    rules::Candidates,
};

mod board;
mod cell;
mod dims;
mod rules;
