//! Exhaustive solution counting with an explicit stack.
//!
//! Enumerates every completion of the current board. Unlike the recursive
//! search in [`backtrack`](crate::backtrack), this walks the same tree with
//! a `(cell, value)` stack: a user may ask for a count on a large or
//! adversarial board, and the enumeration visits every leaf, so recursion
//! depth proportional to the number of empty cells is a real risk here.

use gridoku_core::{Board, Position};

/// Counts all distinct completions of the current board.
///
/// A board with any marked error has no completions and returns `0`
/// immediately; a full, error-free board is its own unique completion and
/// returns `1`. Otherwise every leaf of the search tree (a full, legal
/// board) is counted exactly once. The board itself is untouched; the
/// search runs on a scratch clone.
#[must_use]
pub fn count_solutions(board: &Board) -> u64 {
    if board.has_errors() {
        return 0;
    }
    let Some(first) = board.first_empty() else {
        return 1;
    };

    let mut work = board.clone();
    let Some(seed) = next_legal_above(&work, first, 0) else {
        return 0;
    };
    let mut stack: Vec<(Position, u8)> = vec![(first, seed)];
    let mut count = 0;

    while let Some(&(pos, value)) = stack.last() {
        work.write_value(pos, value);
        if work.is_full() {
            count += 1;
            if !advance(&mut work, &mut stack) {
                break;
            }
            continue;
        }
        match work.first_empty_from(pos) {
            Some(next) => match next_legal_above(&work, next, 0) {
                Some(v) => stack.push((next, v)),
                None => {
                    if !advance(&mut work, &mut stack) {
                        break;
                    }
                }
            },
            // empties can only lie at or after the deepest stacked cell
            None => {
                if !advance(&mut work, &mut stack) {
                    break;
                }
            }
        }
    }

    log::debug!("exhaustive count finished: {count} solution(s)");
    count
}

/// Replaces the top of the stack with its cell's next larger legal value,
/// popping (and clearing) cells until one admits a successor. Returns
/// `false` when the stack empties, i.e. the search is exhausted.
fn advance(work: &mut Board, stack: &mut Vec<(Position, u8)>) -> bool {
    while let Some((pos, value)) = stack.pop() {
        work.write_value(pos, 0);
        if let Some(next) = next_legal_above(work, pos, value) {
            stack.push((pos, next));
            return true;
        }
    }
    false
}

/// Smallest legal value strictly greater than `above` at `pos`, if any.
fn next_legal_above(board: &Board, pos: Position, above: u8) -> Option<u8> {
    #[expect(clippy::cast_possible_truncation)]
    let size = board.size() as u8;
    (above + 1..=size).find(|&value| board.is_legal(value, pos, false))
}

#[cfg(test)]
mod tests {
    use gridoku_core::BlockDims;
    use rand::{RngExt as _, SeedableRng as _};
    use rand_pcg::Pcg64Mcg;

    use super::*;
    use crate::{complete, fill_random};

    fn board_4x4() -> Board {
        Board::new(BlockDims::new(2, 2).unwrap())
    }

    #[test]
    fn blank_4x4_has_the_known_count() {
        // 288 is the classic count of 4x4 Shidoku grids
        assert_eq!(count_solutions(&board_4x4()), 288);
    }

    #[test]
    fn full_board_counts_itself() {
        let mut board = board_4x4();
        assert!(complete(&mut board));
        assert_eq!(count_solutions(&board), 1);
    }

    #[test]
    fn board_with_marked_errors_counts_zero() {
        let mut board = board_4x4();
        board.apply_value(Position::new(0, 0), 1).unwrap();
        board.apply_value(Position::new(0, 1), 1).unwrap();
        assert!(board.has_errors());
        assert_eq!(count_solutions(&board), 0);
    }

    #[test]
    fn dead_first_cell_counts_zero() {
        let mut board = board_4x4();
        // starve (0, 0) without creating a marked conflict
        board.apply_value(Position::new(0, 2), 1).unwrap();
        board.apply_value(Position::new(0, 3), 2).unwrap();
        board.apply_value(Position::new(1, 1), 3).unwrap();
        board.apply_value(Position::new(2, 0), 4).unwrap();
        assert!(!board.has_errors());
        assert!(board.options(Position::new(0, 0)).is_empty());
        assert_eq!(count_solutions(&board), 0);
    }

    #[test]
    fn randomly_generated_grids_count_exactly_one() {
        let mut rng = Pcg64Mcg::seed_from_u64(23);
        for _ in 0..5 {
            let mut board = Board::new(BlockDims::new(3, 3).unwrap());
            assert!(fill_random(&mut board, &mut rng));
            assert_eq!(count_solutions(&board), 1);
        }
    }

    #[test]
    fn input_board_is_untouched() {
        let mut board = board_4x4();
        board.apply_value(Position::new(1, 2), 4).unwrap();
        let before = board.clone();
        let _ = count_solutions(&board);
        assert_eq!(board, before);
    }

    #[test]
    fn agrees_with_recursive_search_on_feasibility() {
        let mut rng = Pcg64Mcg::seed_from_u64(41);
        for _ in 0..20 {
            let mut board = board_4x4();
            // random partial assignment, legal placements only
            for pos in board.positions() {
                if rng.random_range(0..3) == 0 {
                    let options = board.options(pos);
                    if let Some(&value) =
                        options.first().filter(|_| rng.random_range(0..2) == 0)
                    {
                        board.apply_value(pos, value).unwrap();
                    }
                }
            }
            let count = count_solutions(&board);
            assert_eq!(count > 0, crate::is_completable(&board));
        }
    }
}
