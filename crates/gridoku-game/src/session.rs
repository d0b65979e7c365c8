//! The game session: one board, its solution, one history.

use gridoku_core::{BlockDims, Board, BoardError, Position};
use gridoku_solver::{
    BranchBoundBackend, Feasibility, LpBackend, SolveError, fill_random, find_assignment,
    is_completable,
};
use rand::{Rng, RngExt};

use crate::history::{CellMove, Turn, TurnHistory};

/// Retry bound for [`Session::generate`].
///
/// Randomized backtracking completes a blank board on the first try in
/// practice; the bound only guards against a pathological geometry.
pub const MAX_GENERATE_ATTEMPTS: usize = 1000;

/// What a [`Session::set`] call means.
///
/// In edit mode, sets place fixed givens and bypass the history; this is
/// how a puzzle is keyed in by hand. In solve mode, sets are player moves:
/// they go through the atomic mutation path and each one records a turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, derive_more::IsVariant)]
pub enum Mode {
    /// Placing fixed givens; nothing is recorded.
    #[default]
    Edit,
    /// Playing moves; every change records a turn.
    Solve,
}

/// Errors from session operations.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum GameError {
    /// The board rejected a mutation.
    #[display("{_0}")]
    #[from]
    Board(BoardError),
    /// The exact-cover solver failed.
    #[display("{_0}")]
    #[from]
    Solve(SolveError),
    /// Two fixed givens conflict.
    #[display("fixed given at {pos} conflicts with another fixed given")]
    FixedClash {
        /// Position of a clashing given.
        pos: Position,
    },
    /// More givens were requested than the board has cells.
    #[display("cannot expose {requested} givens on a board of {cells} cells")]
    TooManyGivens {
        /// Requested number of givens.
        requested: usize,
        /// Total number of cells.
        cells: usize,
    },
    /// Puzzle generation did not produce a full grid within the retry bound.
    #[display("failed to generate a full grid after {attempts} attempts")]
    GenerateFailed {
        /// Number of attempts made.
        attempts: usize,
    },
}

/// A running game: the current board, the solution grid it was generated
/// from (if any), and the turn history, kept consistent as one unit.
///
/// Every cell change flows through the session, so the history can always
/// be replayed against the board. The exact-cover backend is a type
/// parameter with the bundled solver as default; sessions are generic the
/// same way the solver functions are generic over [`Rng`].
#[derive(Debug, Clone)]
pub struct Session<B = BranchBoundBackend> {
    board: Board,
    solution: Option<Board>,
    history: TurnHistory,
    backend: B,
    mode: Mode,
}

impl Session<BranchBoundBackend> {
    /// Creates a blank edit-mode session with the bundled solver backend.
    #[must_use]
    pub fn new(dims: BlockDims) -> Self {
        Self::with_backend(dims, BranchBoundBackend)
    }

    /// Creates a solve-mode session from a list of fixed givens.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Board`] when a given is out of bounds or out of
    /// range, and [`GameError::FixedClash`] when two givens conflict in a
    /// row, column, or block.
    pub fn from_givens(
        dims: BlockDims,
        givens: &[(Position, u8)],
    ) -> Result<Self, GameError> {
        let mut session = Self::new(dims);
        for &(pos, value) in givens {
            session.board.place_given(pos, value)?;
        }
        session.set_mode(Mode::Solve)?;
        Ok(session)
    }
}

impl<B: LpBackend> Session<B> {
    /// Creates a blank edit-mode session with a caller-supplied backend.
    #[must_use]
    pub fn with_backend(dims: BlockDims, backend: B) -> Self {
        Self {
            board: Board::new(dims),
            solution: None,
            history: TurnHistory::new(),
            backend,
            mode: Mode::Edit,
        }
    }

    /// The current board.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The full solution grid, if one is known (after `generate` or `solve`).
    #[must_use]
    pub fn solution(&self) -> Option<&Board> {
        self.solution.as_ref()
    }

    /// The turn history.
    #[must_use]
    pub fn history(&self) -> &TurnHistory {
        &self.history
    }

    /// Current input mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches input mode.
    ///
    /// Entering solve mode first checks the fixed givens for consistency;
    /// entering edit mode always succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::FixedClash`] when two fixed givens conflict.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), GameError> {
        if mode.is_solve()
            && let Some(pos) = self.board.find_fixed_clash()
        {
            return Err(GameError::FixedClash { pos });
        }
        self.mode = mode;
        Ok(())
    }

    /// Returns whether the board is completely and correctly filled.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.board.is_full() && !self.board.has_errors()
    }

    /// Assigns `value` to the cell at `pos` (0 clears it).
    ///
    /// In edit mode the cell becomes a fixed given and nothing is recorded.
    /// In solve mode the change is a player move: a one-move turn is
    /// recorded, unless the value is unchanged, which is a no-op.
    ///
    /// Returns whether the mutated cell ended up marked as an error.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Board`] when the board rejects the assignment.
    pub fn set(&mut self, pos: Position, value: u8) -> Result<bool, GameError> {
        if self.mode.is_edit() {
            self.board.place_given(pos, value)?;
            return Ok(false);
        }
        let previous = self
            .board
            .get(pos)
            .ok_or(BoardError::OutOfBounds {
                pos,
                size: self.board.size(),
            })?
            .value();
        if previous == value {
            return Ok(self.board.cell(pos).is_error());
        }
        let in_error = self.board.apply_value(pos, value)?;
        let mut turn = Turn::new();
        turn.push(CellMove::new(pos, previous, value));
        self.history.record(turn);
        Ok(in_error)
    }

    /// Reverts the most recent turn. Returns `false` when there is none.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Board`] when the board rejects a replayed move.
    pub fn undo(&mut self) -> Result<bool, GameError> {
        Ok(self.history.undo(&mut self.board)?)
    }

    /// Re-applies the most recently undone turn. Returns `false` when there
    /// is none.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Board`] when the board rejects a replayed move.
    pub fn redo(&mut self) -> Result<bool, GameError> {
        Ok(self.history.redo(&mut self.board)?)
    }

    /// Fills every empty cell that has exactly one candidate.
    ///
    /// Candidates are read from a snapshot taken before any of the fills,
    /// so the pass is simultaneous rather than cascading; repeated calls
    /// converge. All fills together form a single recorded turn. Returns
    /// the number of cells filled.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Board`] when the board rejects a fill.
    pub fn autofill(&mut self) -> Result<usize, GameError> {
        let singles: Vec<(Position, u8)> = self
            .board
            .positions()
            .filter(|&pos| {
                let cell = self.board.cell(pos);
                cell.is_empty() && !cell.is_fixed()
            })
            .filter_map(|pos| {
                let options = self.board.options(pos);
                (options.len() == 1).then(|| (pos, options[0]))
            })
            .collect();

        let mut turn = Turn::new();
        for &(pos, value) in &singles {
            self.board.apply_value(pos, value)?;
            turn.push(CellMove::new(pos, 0, value));
        }
        if !turn.is_empty() {
            self.history.record(turn);
        }
        log::debug!("autofill placed {} values", singles.len());
        Ok(singles.len())
    }

    /// Returns whether the current board can still be completed.
    ///
    /// Runs deterministic backtracking on a scratch clone; the session is
    /// not modified.
    #[must_use]
    pub fn validate(&self) -> bool {
        is_completable(&self.board)
    }

    /// Number of distinct completions of the current board.
    #[must_use]
    pub fn count_solutions(&self) -> u64 {
        gridoku_solver::count_solutions(&self.board)
    }

    /// Solves the current board in place through the exact-cover adapter.
    ///
    /// On [`Feasibility::Found`], every filled-in cell becomes one move of
    /// a single recorded turn, so the whole solve can be undone at once,
    /// and the completed grid is remembered as the session's solution. On
    /// [`Feasibility::Infeasible`] the session is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Solve`] when the solver backend fails, and
    /// [`GameError::Board`] when a solved value cannot be applied.
    pub fn solve(&mut self) -> Result<Feasibility, GameError> {
        let mut scratch = self.board.clone();
        let feasibility = find_assignment(&mut scratch, &self.backend, true)?;
        if feasibility.is_infeasible() {
            return Ok(Feasibility::Infeasible);
        }
        let mut turn = Turn::new();
        for pos in self.board.dims().positions() {
            let previous = self.board.cell(pos).value();
            let new = scratch.cell(pos).value();
            if previous != new {
                self.board.apply_value(pos, new)?;
                turn.push(CellMove::new(pos, previous, new));
            }
        }
        if !turn.is_empty() {
            self.history.record(turn);
        }
        self.solution = Some(scratch);
        Ok(Feasibility::Found)
    }

    /// Suggests a value for the cell at `pos`.
    ///
    /// Solves a scratch clone through the exact-cover adapter and reads
    /// back the one cell; the session is not modified. Returns `None` when
    /// the board has no completion. An already-filled cell reports its
    /// current value.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Board`] for an out-of-bounds position and
    /// [`GameError::Solve`] when the solver backend fails.
    pub fn hint(&self, pos: Position) -> Result<Option<u8>, GameError> {
        let cell = self.board.get(pos).ok_or(BoardError::OutOfBounds {
            pos,
            size: self.board.size(),
        })?;
        if !cell.is_empty() {
            return Ok(Some(cell.value()));
        }
        let mut scratch = self.board.clone();
        match find_assignment(&mut scratch, &self.backend, true)? {
            Feasibility::Found => Ok(Some(scratch.cell(pos).value())),
            Feasibility::Infeasible => Ok(None),
        }
    }

    /// Replaces the session with a freshly generated puzzle.
    ///
    /// Fills a blank grid by randomized backtracking, remembers it as the
    /// solution, and exposes `fixed_count` uniformly chosen cells as fixed
    /// givens on a fresh board. The history is reset and the session enters
    /// solve mode; generation is an initialization, not an undoable turn.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::TooManyGivens`] when `fixed_count` exceeds the
    /// cell count, [`GameError::GenerateFailed`] when no full grid was
    /// found within [`MAX_GENERATE_ATTEMPTS`], and [`GameError::Board`]
    /// when a given cannot be placed.
    pub fn generate<R: Rng>(&mut self, fixed_count: usize, rng: &mut R) -> Result<(), GameError> {
        let dims = self.board.dims();
        if fixed_count > dims.cell_count() {
            return Err(GameError::TooManyGivens {
                requested: fixed_count,
                cells: dims.cell_count(),
            });
        }

        let mut solved = Board::new(dims);
        let mut attempts = 0;
        loop {
            attempts += 1;
            if fill_random(&mut solved, rng) {
                break;
            }
            if attempts >= MAX_GENERATE_ATTEMPTS {
                return Err(GameError::GenerateFailed { attempts });
            }
        }
        log::debug!("generated a full grid in {attempts} attempt(s)");

        // uniform sample without replacement: partial Fisher-Yates prefix
        let mut pool: Vec<Position> = solved.positions().collect();
        for i in 0..fixed_count {
            let j = rng.random_range(i..pool.len());
            pool.swap(i, j);
        }

        let mut puzzle = Board::new(dims);
        for &pos in &pool[..fixed_count] {
            puzzle.place_given(pos, solved.cell(pos).value())?;
        }

        self.board = puzzle;
        self.solution = Some(solved);
        self.history = TurnHistory::new();
        self.mode = Mode::Solve;
        Ok(())
    }
}
