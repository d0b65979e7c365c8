//! Two-level undo/redo log: turns of cell moves.
//!
//! A turn is one user-visible action (a set, an autofill pass, a solve)
//! that may touch many cells. The history is an append-only vector of
//! turns with a cursor; undo and redo only ever walk the cursor by one and
//! recording truncates the tail, so no linked structure is needed.

use gridoku_core::{Board, BoardError, Position};

/// An atomic single-cell change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMove {
    /// Changed cell.
    pub pos: Position,
    /// Value before the change.
    pub previous: u8,
    /// Value after the change.
    pub new: u8,
}

impl CellMove {
    /// Creates a move record.
    #[must_use]
    pub fn new(pos: Position, previous: u8, new: u8) -> Self {
        Self { pos, previous, new }
    }
}

/// One user-visible action as an ordered batch of cell moves.
///
/// Insertion order is the application order for redo; undo replays the
/// moves in reverse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Turn {
    moves: Vec<CellMove>,
}

impl Turn {
    /// Creates an empty turn.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a move to the turn.
    pub fn push(&mut self, mv: CellMove) {
        self.moves.push(mv);
    }

    /// Moves of this turn in insertion order.
    #[must_use]
    pub fn moves(&self) -> &[CellMove] {
        &self.moves
    }

    /// Returns whether the turn contains no moves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

impl FromIterator<CellMove> for Turn {
    fn from_iter<I: IntoIterator<Item = CellMove>>(iter: I) -> Self {
        Self {
            moves: iter.into_iter().collect(),
        }
    }
}

/// Sequence of turns with a cursor.
///
/// The cursor counts how many turns are currently applied, starting from
/// the oldest: `0..cursor` are applied, `cursor..len` are undone and
/// redoable. Recording while turns are redoable discards them first —
/// there is no redo branching.
#[derive(Debug, Clone, Default)]
pub struct TurnHistory {
    turns: Vec<Turn>,
    cursor: usize,
}

impl TurnHistory {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored turns (applied and redoable).
    #[must_use]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns whether no turns are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Number of currently applied turns.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns whether a turn is available to undo.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns whether a turn is available to redo.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor < self.turns.len()
    }

    /// Appends a turn at the cursor, discarding any redoable tail first.
    ///
    /// The turn's moves must already be applied to the board; recording
    /// only logs them.
    pub fn record(&mut self, turn: Turn) {
        self.turns.truncate(self.cursor);
        self.turns.push(turn);
        self.cursor = self.turns.len();
    }

    /// Reverts the most recent applied turn on `board`.
    ///
    /// Each move's previous value is re-applied through the atomic mutation
    /// path, in reverse insertion order, so error marks stay fresh. Returns
    /// `Ok(false)` (nothing to do) at the oldest turn.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError`] if the board rejects a replayed move,
    /// which indicates the history and board have diverged.
    pub fn undo(&mut self, board: &mut Board) -> Result<bool, BoardError> {
        if !self.can_undo() {
            return Ok(false);
        }
        let turn = self.turns[self.cursor - 1].clone();
        for mv in turn.moves().iter().rev() {
            board.apply_value(mv.pos, mv.previous)?;
        }
        self.cursor -= 1;
        Ok(true)
    }

    /// Re-applies the most recently undone turn on `board`.
    ///
    /// Moves replay in forward insertion order using their new values.
    /// Returns `Ok(false)` (nothing to do) when no turn is redoable.
    ///
    /// # Errors
    ///
    /// Propagates [`BoardError`] if the board rejects a replayed move.
    pub fn redo(&mut self, board: &mut Board) -> Result<bool, BoardError> {
        if !self.can_redo() {
            return Ok(false);
        }
        let turn = self.turns[self.cursor].clone();
        for mv in turn.moves() {
            board.apply_value(mv.pos, mv.new)?;
        }
        self.cursor += 1;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use gridoku_core::{BlockDims, Board};

    use super::*;

    fn board_4x4() -> Board {
        Board::new(BlockDims::new(2, 2).unwrap())
    }

    fn apply_and_record(board: &mut Board, history: &mut TurnHistory, pos: Position, value: u8) {
        let previous = board.cell(pos).value();
        board.apply_value(pos, value).unwrap();
        let mut turn = Turn::new();
        turn.push(CellMove::new(pos, previous, value));
        history.record(turn);
    }

    #[test]
    fn undo_redo_roundtrip_restores_values() {
        let mut board = board_4x4();
        let mut history = TurnHistory::new();
        let pos = Position::new(1, 2);

        apply_and_record(&mut board, &mut history, pos, 3);
        apply_and_record(&mut board, &mut history, pos, 4);
        assert_eq!(board.cell(pos).value(), 4);

        assert!(history.undo(&mut board).unwrap());
        assert_eq!(board.cell(pos).value(), 3);
        assert!(history.undo(&mut board).unwrap());
        assert_eq!(board.cell(pos).value(), 0);
        assert!(!history.undo(&mut board).unwrap());

        assert!(history.redo(&mut board).unwrap());
        assert_eq!(board.cell(pos).value(), 3);
        assert!(history.redo(&mut board).unwrap());
        assert_eq!(board.cell(pos).value(), 4);
        assert!(!history.redo(&mut board).unwrap());
    }

    #[test]
    fn batch_turn_unwinds_in_reverse_order() {
        let mut board = board_4x4();
        let mut history = TurnHistory::new();
        let a = Position::new(0, 0);
        let b = Position::new(0, 1);

        // one turn writing the same row twice; reverse replay must end at
        // the original values even though the moves overlap in effect
        board.apply_value(a, 1).unwrap();
        board.apply_value(b, 2).unwrap();
        let turn: Turn = [CellMove::new(a, 0, 1), CellMove::new(b, 0, 2)]
            .into_iter()
            .collect();
        history.record(turn);

        assert!(history.undo(&mut board).unwrap());
        assert!(board.cell(a).is_empty());
        assert!(board.cell(b).is_empty());

        assert!(history.redo(&mut board).unwrap());
        assert_eq!(board.cell(a).value(), 1);
        assert_eq!(board.cell(b).value(), 2);
    }

    #[test]
    fn recording_after_undo_discards_the_tail() {
        let mut board = board_4x4();
        let mut history = TurnHistory::new();
        let pos = Position::new(2, 2);

        apply_and_record(&mut board, &mut history, pos, 1);
        apply_and_record(&mut board, &mut history, pos, 2);
        apply_and_record(&mut board, &mut history, pos, 3);

        assert!(history.undo(&mut board).unwrap());
        assert!(history.undo(&mut board).unwrap());
        assert_eq!(board.cell(pos).value(), 1);
        assert_eq!(history.len(), 3);

        apply_and_record(&mut board, &mut history, pos, 4);
        assert_eq!(history.len(), 2);
        assert!(!history.can_redo());
        assert!(!history.redo(&mut board).unwrap());

        assert!(history.undo(&mut board).unwrap());
        assert_eq!(board.cell(pos).value(), 1);
        assert!(history.redo(&mut board).unwrap());
        assert_eq!(board.cell(pos).value(), 4);
    }

    #[test]
    fn replayed_moves_refresh_error_marks() {
        let mut board = board_4x4();
        let mut history = TurnHistory::new();
        let a = Position::new(0, 0);
        let b = Position::new(0, 3);

        apply_and_record(&mut board, &mut history, a, 2);
        apply_and_record(&mut board, &mut history, b, 2);
        assert!(board.cell(a).is_error());
        assert!(board.cell(b).is_error());

        assert!(history.undo(&mut board).unwrap());
        assert!(!board.cell(a).is_error());
        assert!(!board.cell(b).is_error());

        assert!(history.redo(&mut board).unwrap());
        assert!(board.cell(a).is_error());
        assert!(board.cell(b).is_error());
    }

    #[test]
    fn undo_rejects_a_diverged_board() {
        let mut board = board_4x4();
        let mut history = TurnHistory::new();
        let pos = Position::new(3, 3);

        apply_and_record(&mut board, &mut history, pos, 1);
        // divergence: the cell becomes fixed behind the history's back
        board.place_given(pos, 1).unwrap();
        assert!(history.undo(&mut board).is_err());
    }
}
