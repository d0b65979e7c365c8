//! Chronological backtracking over empty cells in row-major order.
//!
//! One recursive search serves two callers: deterministic completion
//! (candidates tried in ascending order) and randomized full-board
//! construction (candidates drawn uniformly without replacement, so small
//! values are not favored). There is no constraint propagation beyond
//! legality checking; boards are small enough that plain backtracking is
//! acceptable, and the randomized variant only ever starts from boards that
//! are trivially completable.

use gridoku_core::{Board, Position};
use rand::{Rng, RngExt};

/// Candidate selection policy for the shared search.
trait Picker {
    /// Index of the candidate to try next among `len` remaining options.
    fn pick(&mut self, len: usize) -> usize;
}

/// Ascending order: always the smallest remaining candidate.
struct Ascending;

impl Picker for Ascending {
    fn pick(&mut self, _len: usize) -> usize {
        0
    }
}

/// Uniform draw without replacement from the remaining candidates.
struct UniformDraw<'a, R>(&'a mut R);

impl<R: Rng> Picker for UniformDraw<'_, R> {
    fn pick(&mut self, len: usize) -> usize {
        if len > 1 { self.0.random_range(0..len) } else { 0 }
    }
}

/// Completes `board` in place with the lexicographically first solution.
///
/// Returns `false`, leaving every touched cell restored to empty, when the
/// current assignment admits no completion.
pub fn complete(board: &mut Board) -> bool {
    search(board, Position::new(0, 0), &mut Ascending)
}

/// Returns whether the current assignment admits at least one completion.
///
/// Runs [`complete`] on a scratch clone; the board itself is untouched.
#[must_use]
pub fn is_completable(board: &Board) -> bool {
    let mut scratch = board.clone();
    complete(&mut scratch)
}

/// Completes `board` in place with a uniformly randomized search.
///
/// Used to build full solution grids; from a blank board this always
/// succeeds. Returns `false` (board restored) if the given partial
/// assignment admits no completion.
pub fn fill_random<R: Rng>(board: &mut Board, rng: &mut R) -> bool {
    search(board, Position::new(0, 0), &mut UniformDraw(rng))
}

fn search(board: &mut Board, from: Position, picker: &mut impl Picker) -> bool {
    if board.is_full() {
        return true;
    }
    let Some(pos) = board.first_empty_from(from) else {
        return true;
    };
    let mut options = board.options(pos);
    while !options.is_empty() {
        let value = options.remove(picker.pick(options.len()));
        board.write_value(pos, value);
        if search(board, pos, picker) {
            return true;
        }
        board.write_value(pos, 0);
    }
    log::trace!("backtracking from {pos}");
    false
}
