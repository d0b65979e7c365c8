/// Rectangular block geometry of a board.
///
/// A board built from `block_rows × block_cols` blocks has side length
/// `block_rows * block_cols`: each row of blocks is `block_rows` cells tall,
/// and `block_cols` such blocks fit across the board. The decomposition is
/// exact — blocks tile the grid starting at multiples of the block edge
/// lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockDims {
    block_rows: usize,
    block_cols: usize,
}

/// Errors from constructing [`BlockDims`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DimsError {
    /// A block edge length was zero.
    #[display("block dimensions must be nonzero")]
    Zero,
    /// The board side length would not fit in a cell value.
    #[display("board size {size} exceeds the maximum of {max}")]
    TooLarge {
        /// Requested side length.
        size: usize,
        /// Largest representable side length.
        max: usize,
    },
}

impl BlockDims {
    /// Largest supported board side length; cell values are stored as `u8`.
    pub const MAX_SIZE: usize = u8::MAX as usize;

    /// Creates block dimensions for a `block_rows × block_cols` block shape.
    ///
    /// # Errors
    ///
    /// Returns [`DimsError::Zero`] if either edge is zero, and
    /// [`DimsError::TooLarge`] if `block_rows * block_cols` exceeds
    /// [`Self::MAX_SIZE`].
    pub fn new(block_rows: usize, block_cols: usize) -> Result<Self, DimsError> {
        if block_rows == 0 || block_cols == 0 {
            return Err(DimsError::Zero);
        }
        let size = block_rows * block_cols;
        if size > Self::MAX_SIZE {
            return Err(DimsError::TooLarge {
                size,
                max: Self::MAX_SIZE,
            });
        }
        Ok(Self {
            block_rows,
            block_cols,
        })
    }

    /// Number of cell rows in one block.
    #[must_use]
    pub fn block_rows(self) -> usize {
        self.block_rows
    }

    /// Number of cell columns in one block.
    #[must_use]
    pub fn block_cols(self) -> usize {
        self.block_cols
    }

    /// Side length of the board (`block_rows * block_cols`).
    #[must_use]
    pub fn size(self) -> usize {
        self.block_rows * self.block_cols
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(self) -> usize {
        self.size() * self.size()
    }

    /// Returns whether the position lies on the board.
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        pos.row < self.size() && pos.col < self.size()
    }

    /// Top-left corner of the block containing `pos`.
    #[must_use]
    pub fn block_origin(self, pos: Position) -> Position {
        Position::new(
            (pos.row / self.block_rows) * self.block_rows,
            (pos.col / self.block_cols) * self.block_cols,
        )
    }

    /// Iterates over all board positions in row-major order.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        let size = self.size();
        (0..size).flat_map(move |row| (0..size).map(move |col| Position::new(row, col)))
    }

    /// Iterates over the positions of the block whose top-left corner is
    /// `origin`, in row-major order.
    pub fn block_positions(self, origin: Position) -> impl Iterator<Item = Position> {
        let rows = origin.row..origin.row + self.block_rows;
        rows.flat_map(move |row| {
            (origin.col..origin.col + self.block_cols).map(move |col| Position::new(row, col))
        })
    }

    /// Iterates over the top-left corners of all blocks, in row-major order.
    pub fn block_origins(self) -> impl Iterator<Item = Position> {
        let (block_rows, block_cols) = (self.block_rows, self.block_cols);
        let size = self.size();
        (0..size / block_rows).flat_map(move |a| {
            (0..size / block_cols).map(move |b| Position::new(a * block_rows, b * block_cols))
        })
    }
}

/// A cell position identified by zero-based row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({row}, {col})")]
pub struct Position {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl Position {
    /// Creates a position from row and column indices.
    #[must_use]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Returns whether the two positions share a row.
    #[must_use]
    pub fn same_row(self, other: Self) -> bool {
        self.row == other.row
    }

    /// Returns whether the two positions share a column.
    #[must_use]
    pub fn same_col(self, other: Self) -> bool {
        self.col == other.col
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangular_blocks_tile_the_grid() {
        let dims = BlockDims::new(2, 3).unwrap();
        assert_eq!(dims.size(), 6);
        assert_eq!(dims.cell_count(), 36);

        let origins: Vec<_> = dims.block_origins().collect();
        assert_eq!(origins.len(), 6);
        assert_eq!(origins[0], Position::new(0, 0));
        assert_eq!(origins[1], Position::new(0, 3));
        assert_eq!(origins[2], Position::new(2, 0));

        let mut seen = vec![false; dims.cell_count()];
        for origin in dims.block_origins() {
            for pos in dims.block_positions(origin) {
                let i = pos.row * dims.size() + pos.col;
                assert!(!seen[i], "block overlap at {pos}");
                seen[i] = true;
            }
        }
        assert!(seen.iter().all(|&covered| covered));
    }

    #[test]
    fn block_origin_rounds_down() {
        let dims = BlockDims::new(3, 3).unwrap();
        assert_eq!(dims.block_origin(Position::new(4, 7)), Position::new(3, 6));
        assert_eq!(dims.block_origin(Position::new(0, 0)), Position::new(0, 0));
        assert_eq!(dims.block_origin(Position::new(8, 8)), Position::new(6, 6));
    }

    #[test]
    fn rejects_degenerate_dims() {
        assert_eq!(BlockDims::new(0, 3), Err(DimsError::Zero));
        assert_eq!(BlockDims::new(3, 0), Err(DimsError::Zero));
        assert!(matches!(
            BlockDims::new(16, 16),
            Err(DimsError::TooLarge { size: 256, .. })
        ));
        assert!(BlockDims::new(15, 17).is_ok());
    }

    #[test]
    fn positions_are_row_major() {
        let dims = BlockDims::new(1, 2).unwrap();
        let all: Vec<_> = dims.positions().collect();
        assert_eq!(
            all,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }
}
