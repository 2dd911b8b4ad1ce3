//! Pieces module - piece shape matrices and matrix rotation
//!
//! Every piece is a small binary matrix (at most 4x4). Rotation is a plain
//! 90° clockwise matrix turn (transpose then reverse), so the matrix dimensions
//! swap and the occupied cells may shift inside the box. There is no per-kind
//! rotation table; wall kicks are handled by the game state.

use crate::types::{PieceKind, BOARD_WIDTH};

/// Largest matrix side of any piece.
pub const MAX_SHAPE_SIDE: usize = 4;

/// Offset of a filled cell relative to the matrix top-left corner (dx, dy).
pub type CellOffset = (i8, i8);

/// A piece shape: a `rows x cols` binary matrix stored in a fixed 4x4 array.
///
/// Cells outside `rows x cols` are always empty, so derived equality compares
/// matrices exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
}

impl Shape {
    /// Build a shape from matrix rows (non-zero means filled).
    pub fn from_rows<const R: usize, const C: usize>(rows: [[u8; C]; R]) -> Self {
        debug_assert!(R <= MAX_SHAPE_SIDE && C <= MAX_SHAPE_SIDE);
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, row) in rows.iter().enumerate().take(MAX_SHAPE_SIDE) {
            for (c, &v) in row.iter().enumerate().take(MAX_SHAPE_SIDE) {
                cells[r][c] = v != 0;
            }
        }
        Self {
            rows: R.min(MAX_SHAPE_SIDE) as u8,
            cols: C.min(MAX_SHAPE_SIDE) as u8,
            cells,
        }
    }

    /// Spawn matrix for a piece kind.
    pub fn spawn(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => Self::from_rows([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::J => Self::from_rows([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
            PieceKind::L => Self::from_rows([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
            PieceKind::O => Self::from_rows([[1, 1], [1, 1]]),
            PieceKind::S => Self::from_rows([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
            PieceKind::T => Self::from_rows([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
            PieceKind::Z => Self::from_rows([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        }
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    /// Whether the matrix cell at (row, col) is filled. Out-of-range is empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows as usize && col < self.cols as usize && self.cells[row][col]
    }

    /// Iterate the filled cells as (dx, dy) offsets, row-major.
    pub fn filled_cells(&self) -> impl Iterator<Item = CellOffset> + '_ {
        (0..self.rows as usize).flat_map(move |r| {
            (0..self.cols as usize)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (c as i8, r as i8))
        })
    }

    pub fn cell_count(&self) -> usize {
        self.filled_cells().count()
    }

    /// Rotate 90° clockwise: `new[c][rows - 1 - r] = old[r][c]`.
    ///
    /// The result has `cols` rows and `rows` columns.
    pub fn rotated_cw(&self) -> Self {
        let rows = self.rows as usize;
        let cols = self.cols as usize;
        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (r, row) in self.cells.iter().enumerate().take(rows) {
            for (c, &filled) in row.iter().enumerate().take(cols) {
                cells[c][rows - 1 - r] = filled;
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// The filled cells moved to the top-left corner and the box cropped to
    /// their bounding rectangle.
    pub fn trimmed(&self) -> Self {
        let mut min_r = usize::MAX;
        let mut min_c = usize::MAX;
        let mut max_r = 0usize;
        let mut max_c = 0usize;
        for (dx, dy) in self.filled_cells() {
            min_r = min_r.min(dy as usize);
            min_c = min_c.min(dx as usize);
            max_r = max_r.max(dy as usize);
            max_c = max_c.max(dx as usize);
        }
        if min_r == usize::MAX {
            return Self {
                rows: 0,
                cols: 0,
                cells: [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE],
            };
        }

        let mut cells = [[false; MAX_SHAPE_SIDE]; MAX_SHAPE_SIDE];
        for (dx, dy) in self.filled_cells() {
            cells[dy as usize - min_r][dx as usize - min_c] = true;
        }
        Self {
            rows: (max_r - min_r + 1) as u8,
            cols: (max_c - min_c + 1) as u8,
            cells,
        }
    }

    /// Same occupied form regardless of where it sits inside its box.
    pub fn same_form(&self, other: &Shape) -> bool {
        self.trimmed() == other.trimmed()
    }
}

/// Spawn column for a shape: centered on the board, rounding left.
pub fn spawn_x(shape: &Shape) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (shape.cols() / 2) as i8
}

/// Spawn row for every piece.
pub const SPAWN_Y: i8 = 0;
