/// A single board cell.
///
/// `value` is `0` for an empty cell, otherwise `1..=N`. Fixed cells are the
/// puzzle givens: they are set at load or generation time and never
/// reassigned by solving operations. The error flag is derived state,
/// recomputed by [`Board::mark_errors`](crate::Board::mark_errors) whenever
/// the cell or one of its peers changes; fixed cells are never flagged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    value: u8,
    fixed: bool,
    error: bool,
}

impl Cell {
    /// Current value, `0` when empty.
    #[must_use]
    pub fn value(self) -> u8 {
        self.value
    }

    /// Returns whether the cell is empty.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.value == 0
    }

    /// Returns whether the cell is a fixed given.
    #[must_use]
    pub fn is_fixed(self) -> bool {
        self.fixed
    }

    /// Returns whether the cell currently violates a row, column, or block
    /// constraint.
    #[must_use]
    pub fn is_error(self) -> bool {
        self.error
    }

    pub(crate) fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    pub(crate) fn set_fixed(&mut self, fixed: bool) {
        self.fixed = fixed;
    }

    pub(crate) fn set_error(&mut self, error: bool) {
        self.error = error;
    }
}
