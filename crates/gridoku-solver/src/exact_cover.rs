//! Exact-cover encoding of a partial board as a 0/1 integer program.
//!
//! One binary variable per (empty cell, legal candidate) pair, four
//! families of exactly-one equality constraints: each empty cell takes one
//! value, and each row, column, and block takes each value once. Rows,
//! columns, and blocks with no candidate variable for a value are skipped;
//! a fixed or solved cell already satisfies them. The model is solved for
//! feasibility only.

use gridoku_core::{Board, BoardError, Candidates, Position};

use crate::lp::{LpBackend, LpError, LpModel};

/// Outcome of an exact-cover solvability query.
///
/// A solver malfunction is not an outcome; it surfaces as
/// [`SolveError`] so callers can tell "this board has no solution" apart
/// from "the solver broke".
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Feasibility {
    /// A solution exists (and was written back if requested).
    Found,
    /// The board was proven to have no solution.
    Infeasible,
}

/// Errors from the exact-cover adapter.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum SolveError {
    /// The backing solver failed.
    #[display("solver backend error: {_0}")]
    Backend(LpError),
    /// The board rejected a decoded assignment.
    #[display("board rejected decoded assignment: {_0}")]
    Decode(BoardError),
}

/// Dense variable-index table, `[row][col][value - 1]`.
///
/// Entries are one-based variable indices; `0` means "not a variable"
/// (the cell is filled, or the value is not a candidate there).
struct VarTable {
    size: usize,
    index: Vec<usize>,
}

impl VarTable {
    fn new(size: usize) -> Self {
        Self {
            size,
            index: vec![0; size * size * size],
        }
    }

    fn get(&self, pos: Position, value: u8) -> usize {
        self.index[self.flat(pos, value)]
    }

    fn set(&mut self, pos: Position, value: u8, var: usize) {
        let i = self.flat(pos, value);
        self.index[i] = var;
    }

    fn flat(&self, pos: Position, value: u8) -> usize {
        debug_assert!((1..=self.size).contains(&usize::from(value)));
        (pos.row * self.size + pos.col) * self.size + usize::from(value) - 1
    }
}

/// Attempts to solve the board through the exact-cover encoding.
///
/// With `save`, a found assignment is written back cell by cell through the
/// atomic mutation path, so error marks are refreshed as values land.
/// Without it, the board is left untouched and only the feasibility answer
/// is reported — the mode used for "is this board still solvable" queries.
/// Hint queries run with `save` on a scratch clone and read back one cell.
///
/// A board containing an empty cell with no legal candidate is reported
/// infeasible without constructing a model.
///
/// # Errors
///
/// Returns [`SolveError::Backend`] when the solver itself fails at any
/// step, as distinct from the board being proven unsolvable.
pub fn find_assignment<B: LpBackend>(
    board: &mut Board,
    backend: &B,
    save: bool,
) -> Result<Feasibility, SolveError> {
    let size = board.size();
    let mut table = VarTable::new(size);
    let mut cell_options: Vec<(Position, Candidates)> = Vec::new();
    let mut var_count = 0usize;

    for pos in board.positions() {
        if !board.cell(pos).is_empty() {
            continue;
        }
        let options = board.options(pos);
        if options.is_empty() {
            log::debug!("cell {pos} has no candidates; board is infeasible");
            return Ok(Feasibility::Infeasible);
        }
        for &value in &options {
            var_count += 1;
            table.set(pos, value, var_count);
        }
        cell_options.push((pos, options));
    }
    if cell_options.is_empty() {
        return Ok(Feasibility::Found);
    }
    log::debug!(
        "encoding {} empty cells as {var_count} binary variables",
        cell_options.len()
    );

    let mut model = backend.new_model().map_err(SolveError::Backend)?;
    model.add_binary_vars(var_count).map_err(SolveError::Backend)?;
    add_constraints(board, &table, &cell_options, &mut model).map_err(SolveError::Backend)?;

    let status = model.optimize().map_err(SolveError::Backend)?;
    if status.is_infeasible() {
        return Ok(Feasibility::Infeasible);
    }
    if save {
        let solution = model.solution().map_err(SolveError::Backend)?;
        decode(board, &table, &cell_options, &solution)?;
    }
    Ok(Feasibility::Found)
}

fn add_constraints<M: LpModel>(
    board: &Board,
    table: &VarTable,
    cell_options: &[(Position, Candidates)],
    model: &mut M,
) -> Result<(), LpError> {
    let size = board.size();
    let dims = board.dims();
    let mut vars: Vec<usize> = Vec::with_capacity(size);

    // family 1: every empty cell takes exactly one of its candidates
    for (pos, options) in cell_options {
        vars.clear();
        vars.extend(options.iter().map(|&value| table.get(*pos, value) - 1));
        model.add_exactly_one(&vars)?;
    }

    #[expect(clippy::cast_possible_truncation)]
    let values = 1..=size as u8;
    for value in values {
        // family 2: each row takes the value once, where still open
        for row in 0..size {
            vars.clear();
            vars.extend(
                (0..size)
                    .map(|col| table.get(Position::new(row, col), value))
                    .filter(|&var| var > 0)
                    .map(|var| var - 1),
            );
            if !vars.is_empty() {
                model.add_exactly_one(&vars)?;
            }
        }
        // family 3: each column, symmetrically
        for col in 0..size {
            vars.clear();
            vars.extend(
                (0..size)
                    .map(|row| table.get(Position::new(row, col), value))
                    .filter(|&var| var > 0)
                    .map(|var| var - 1),
            );
            if !vars.is_empty() {
                model.add_exactly_one(&vars)?;
            }
        }
        // family 4: each block, symmetrically
        for origin in dims.block_origins() {
            vars.clear();
            vars.extend(
                dims.block_positions(origin)
                    .map(|pos| table.get(pos, value))
                    .filter(|&var| var > 0)
                    .map(|var| var - 1),
            );
            if !vars.is_empty() {
                model.add_exactly_one(&vars)?;
            }
        }
    }
    Ok(())
}

fn decode(
    board: &mut Board,
    table: &VarTable,
    cell_options: &[(Position, Candidates)],
    solution: &[bool],
) -> Result<(), SolveError> {
    for (pos, options) in cell_options {
        for &value in options {
            let var = table.get(*pos, value);
            if var > 0 && solution[var - 1] {
                board.apply_value(*pos, value)?;
                break;
            }
        }
    }
    Ok(())
}
