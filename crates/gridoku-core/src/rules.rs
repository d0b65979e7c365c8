use tinyvec::TinyVec;

use crate::{Board, Position};

/// Sorted candidate values for one cell.
///
/// Spilled to the heap only for boards larger than 16×16. The list is built
/// fresh on every call and owned by the caller; nothing is cached on cells.
pub type Candidates = TinyVec<[u8; 16]>;

impl Board {
    /// Returns whether placing `value` at `pos` violates no row, column, or
    /// block constraint.
    ///
    /// Value `0` (empty) is always legal; values above `N` are always
    /// illegal. The cell at `pos` itself is excluded from the scan, so a
    /// cell's current value can be re-checked in place.
    ///
    /// With `restrict_to_fixed`, only conflicts against fixed cells count.
    /// This mode validates replayed givens: when loading a persisted board,
    /// a fixed-versus-fixed clash makes the file invalid, while clashes
    /// with non-fixed values are the player's problem and get error marks
    /// instead.
    #[must_use]
    pub fn is_legal(&self, value: u8, pos: Position, restrict_to_fixed: bool) -> bool {
        if value == 0 {
            return true;
        }
        if usize::from(value) > self.size() || !self.dims().contains(pos) {
            return false;
        }
        !self.peers(pos).any(|peer| {
            let cell = self.cell(peer);
            cell.value() == value && (!restrict_to_fixed || cell.is_fixed())
        })
    }

    /// Iterates over the peers of `pos`: every other cell in its row,
    /// column, and block. Block cells sharing the row or column are skipped
    /// so each peer appears exactly once. The iterator does not borrow the
    /// board.
    pub fn peers(&self, pos: Position) -> impl Iterator<Item = Position> + use<> {
        let size = self.size();
        let dims = self.dims();
        let row_peers = (0..size)
            .filter(move |&col| col != pos.col)
            .map(move |col| Position::new(pos.row, col));
        let col_peers = (0..size)
            .filter(move |&row| row != pos.row)
            .map(move |row| Position::new(row, pos.col));
        let block_peers = dims
            .block_positions(dims.block_origin(pos))
            .filter(move |&p| !p.same_row(pos) && !p.same_col(pos));
        row_peers.chain(col_peers).chain(block_peers)
    }

    /// Recomputes error marks after a change to the cell at `pos`.
    ///
    /// The mutated cell and every peer get their flag refreshed by
    /// re-checking their current value at their own position (the check
    /// excludes the cell itself, so a value never conflicts with its own
    /// placement). Empty and fixed cells are never marked. Must run after
    /// every value change, including moves replayed by undo and redo;
    /// [`apply_value`](Self::apply_value) does so automatically.
    ///
    /// Returns whether the mutated cell itself ended in error, which gates
    /// puzzle-solved detection.
    pub fn mark_errors(&mut self, pos: Position) -> bool {
        self.refresh_error(pos);
        for peer in self.peers(pos) {
            self.refresh_error(peer);
        }
        self.cell(pos).is_error()
    }

    fn refresh_error(&mut self, pos: Position) {
        let cell = self.cell(pos);
        let error = if cell.is_fixed() || cell.is_empty() {
            false
        } else {
            !self.is_legal(cell.value(), pos, false)
        };
        self.set_error_at(pos, error);
    }

    /// Sorted legal values for the cell at `pos` against the current board.
    ///
    /// Returns an empty list, never an error, when no value fits — the
    /// signal for a search dead end.
    #[must_use]
    pub fn options(&self, pos: Position) -> Candidates {
        let mut candidates = Candidates::new();
        #[expect(clippy::cast_possible_truncation)]
        for value in 1..=self.size() as u8 {
            if self.is_legal(value, pos, false) {
                candidates.push(value);
            }
        }
        candidates
    }

    /// First fixed cell whose value clashes with another fixed cell, if any.
    ///
    /// Runs the `restrict_to_fixed` legality check over every given; used
    /// when validating a loaded board before play starts.
    #[must_use]
    pub fn find_fixed_clash(&self) -> Option<Position> {
        self.positions().find(|&pos| {
            let cell = self.cell(pos);
            cell.is_fixed() && !self.is_legal(cell.value(), pos, true)
        })
    }
}
