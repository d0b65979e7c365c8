use crate::{BlockDims, Cell, Position};

/// An owned `N × N` Sudoku board.
///
/// The board maintains its empty-cell count incrementally: it always equals
/// the number of cells holding value `0`. All mutation goes through
/// [`apply_value`](Self::apply_value) (the atomic path, which also refreshes
/// error marks), [`place_given`](Self::place_given) (load/generate path for
/// fixed cells), or [`write_value`](Self::write_value) (search scratch path).
///
/// Cloning a board yields an independent scratch copy; solvers and hint
/// queries work on clones and never alias the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dims: BlockDims,
    cells: Vec<Cell>,
    empty_cells: usize,
}

/// Errors from board mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The position lies outside the board.
    #[display("position {pos} is outside the {size}x{size} board")]
    OutOfBounds {
        /// Offending position.
        pos: Position,
        /// Board side length.
        size: usize,
    },
    /// The value is outside `0..=N`.
    #[display("value {value} is outside 0..={size}")]
    ValueOutOfRange {
        /// Offending value.
        value: u8,
        /// Board side length.
        size: usize,
    },
    /// The cell is a fixed given and cannot be reassigned.
    #[display("cell {pos} is fixed")]
    FixedCell {
        /// Offending position.
        pos: Position,
    },
}

impl Board {
    /// Creates a blank board: every cell empty, not fixed, not in error.
    #[must_use]
    pub fn new(dims: BlockDims) -> Self {
        Self {
            dims,
            cells: vec![Cell::default(); dims.cell_count()],
            empty_cells: dims.cell_count(),
        }
    }

    /// Block geometry of this board.
    #[must_use]
    pub fn dims(&self) -> BlockDims {
        self.dims
    }

    /// Side length `N`.
    #[must_use]
    pub fn size(&self) -> usize {
        self.dims.size()
    }

    /// Number of currently empty cells.
    #[must_use]
    pub fn empty_cells(&self) -> usize {
        self.empty_cells
    }

    /// Returns whether every cell holds a value.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.empty_cells == 0
    }

    /// Returns the cell at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Cell {
        assert!(self.dims.contains(pos), "position {pos} out of bounds");
        self.cells[self.index(pos)]
    }

    /// Returns the cell at `pos`, or `None` if `pos` is outside the board.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<Cell> {
        self.dims
            .contains(pos)
            .then(|| self.cells[self.index(pos)])
    }

    /// Iterates over all positions in row-major order.
    ///
    /// The iterator does not borrow the board, so cells may be mutated
    /// while it is live.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        self.dims.positions()
    }

    /// First empty, non-fixed cell in row-major order.
    #[must_use]
    pub fn first_empty(&self) -> Option<Position> {
        self.first_empty_from(Position::new(0, 0))
    }

    /// First empty, non-fixed cell at or after `start` in row-major order.
    #[must_use]
    pub fn first_empty_from(&self, start: Position) -> Option<Position> {
        let size = self.size();
        let mut i = start.row * size + start.col;
        while i < self.cells.len() {
            let cell = self.cells[i];
            if cell.is_empty() && !cell.is_fixed() {
                return Some(Position::new(i / size, i % size));
            }
            i += 1;
        }
        None
    }

    /// Returns whether any cell is currently marked as an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_error())
    }

    /// Atomically assigns `value` to the cell at `pos`.
    ///
    /// Updates the empty-cell count and re-marks errors for the cell and all
    /// of its peers. Assigning `0` clears the cell. History recording is the
    /// caller's responsibility; this mutation does not record anything.
    ///
    /// Returns whether the mutated cell itself ended in error.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] or [`BoardError::ValueOutOfRange`]
    /// for invalid coordinates or values, and [`BoardError::FixedCell`] when
    /// the target cell is a fixed given.
    pub fn apply_value(&mut self, pos: Position, value: u8) -> Result<bool, BoardError> {
        self.check_target(pos, value)?;
        if self.cells[self.index(pos)].is_fixed() {
            return Err(BoardError::FixedCell { pos });
        }
        self.write_value(pos, value);
        Ok(self.mark_errors(pos))
    }

    /// Places a fixed given at `pos`.
    ///
    /// Used by load and generation; fixed cells are assumed consistent a
    /// priori and are excluded from error marking, so no marking runs here.
    /// Fixed-versus-fixed clashes are detected separately with
    /// [`is_legal`](Self::is_legal) in `restrict_to_fixed` mode.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] or [`BoardError::ValueOutOfRange`]
    /// for invalid coordinates or values.
    pub fn place_given(&mut self, pos: Position, value: u8) -> Result<(), BoardError> {
        self.check_target(pos, value)?;
        self.write_value(pos, value);
        let i = self.index(pos);
        self.cells[i].set_fixed(value != 0);
        self.cells[i].set_error(false);
        Ok(())
    }

    /// Writes `value` without error marking.
    ///
    /// This is the search scratch path: backtracking and counting assign and
    /// retract values far too often to re-mark errors each time. The
    /// empty-cell count is still maintained. Callers must only target
    /// non-fixed cells and in-range values.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is outside the board.
    pub fn write_value(&mut self, pos: Position, value: u8) {
        assert!(self.dims.contains(pos), "position {pos} out of bounds");
        let i = self.index(pos);
        let old = self.cells[i].value();
        self.cells[i].set_value(value);
        match (old, value) {
            (0, v) if v != 0 => self.empty_cells -= 1,
            (o, 0) if o != 0 => self.empty_cells += 1,
            _ => {}
        }
    }

    fn check_target(&self, pos: Position, value: u8) -> Result<(), BoardError> {
        let size = self.size();
        if !self.dims.contains(pos) {
            return Err(BoardError::OutOfBounds { pos, size });
        }
        if usize::from(value) > size {
            return Err(BoardError::ValueOutOfRange { value, size });
        }
        Ok(())
    }

    pub(crate) fn index(&self, pos: Position) -> usize {
        pos.row * self.size() + pos.col
    }

    pub(crate) fn set_error_at(&mut self, pos: Position, error: bool) {
        let i = self.index(pos);
        self.cells[i].set_error(error);
    }
}
