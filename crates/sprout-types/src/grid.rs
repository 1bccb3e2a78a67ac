//! Cell state and the rectangular grid that holds the simulation state.
//!
//! A [`Grid`] stores its cells row-major in a single vector alongside its
//! dimensions, so every row has the same length by construction. Lookups are
//! bounds-checked and return `Option`; writes outside the grid are ignored.
//!
//! Rules never mutate the grid they read. Each step builds a fresh grid
//! from a clone of the previous one, which keeps the previous state
//! available for neighborhood queries during the whole scan.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::color::RgbColor;

/// Errors raised when building a grid from untrusted row data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A row's length differs from the first row's length.
    #[error("row {row} has {found} cells, expected {expected}")]
    JaggedRows {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },

    /// The declared dimensions do not match the number of cells supplied.
    #[error("{rows}x{cols} grid needs {expected} cells, got {found}")]
    CellCountMismatch {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
        /// `rows * cols`.
        expected: usize,
        /// Cells actually supplied.
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// Cell state
// ---------------------------------------------------------------------------

/// One grid position: an optional color and an age counter.
///
/// `age` counts consecutive steps the cell has held a color. It is reset to
/// 0 whenever the cell is newly colored or cleared.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export, export_to = "bindings/")]
pub struct CellState {
    /// The cell's color, or `None` when empty.
    pub color: Option<RgbColor>,
    /// Consecutive steps the cell has been colored.
    pub age: u32,
}

impl CellState {
    /// An empty cell.
    pub const EMPTY: Self = Self {
        color: None,
        age: 0,
    };

    /// A freshly colored cell (age 0).
    pub const fn seeded(color: RgbColor) -> Self {
        Self {
            color: Some(color),
            age: 0,
        }
    }

    /// Whether the cell holds a color.
    pub const fn is_colored(&self) -> bool {
        self.color.is_some()
    }

    /// The same cell one step older.
    #[must_use]
    pub const fn aged(self) -> Self {
        Self {
            color: self.color,
            age: self.age.saturating_add(1),
        }
    }

    /// Replace the color while keeping the age.
    #[must_use]
    pub const fn recolored(self, color: RgbColor) -> Self {
        Self {
            color: Some(color),
            age: self.age,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Wire form of a [`Grid`], validated on deserialization.
#[derive(Deserialize)]
struct RawGrid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

/// A rectangular, row-major matrix of [`CellState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<CellState>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let expected = raw.rows.saturating_mul(raw.cols);
        if raw.cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                rows: raw.rows,
                cols: raw.cols,
                expected,
                found: raw.cells.len(),
            });
        }
        Ok(Self {
            rows: raw.rows,
            cols: raw.cols,
            cells: raw.cells,
        })
    }
}

impl Grid {
    /// Create a `rows x cols` grid with every cell empty.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![CellState::EMPTY; rows.saturating_mul(cols)],
        }
    }

    /// Build a grid from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::JaggedRows`] if any row's length differs from the
    /// first row's.
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self, GridError> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(row_count.saturating_mul(cols));

        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(GridError::JaggedRows {
                    row: index,
                    expected: cols,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }

        Ok(Self {
            rows: row_count,
            cols,
            cells,
        })
    }

    /// Number of rows.
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.rows && col < self.cols {
            row.checked_mul(self.cols)?.checked_add(col)
        } else {
            None
        }
    }

    /// The cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<&CellState> {
        self.index_of(row, col).and_then(|i| self.cells.get(i))
    }

    /// Signed lookup for neighborhood offsets; negative coordinates are
    /// out of bounds.
    pub fn get_signed(&self, row: isize, col: isize) -> Option<&CellState> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.get(row, col)
    }

    /// Replace the cell at `(row, col)`. Returns `false` (and writes
    /// nothing) when out of bounds.
    pub fn set(&mut self, row: usize, col: usize, cell: CellState) -> bool {
        let Some(index) = self.index_of(row, col) else {
            return false;
        };
        self.cells.get_mut(index).is_some_and(|slot| {
            *slot = cell;
            true
        })
    }

    /// Signed variant of [`Grid::set`].
    pub fn set_signed(&mut self, row: isize, col: isize, cell: CellState) -> bool {
        match (usize::try_from(row), usize::try_from(col)) {
            (Ok(row), Ok(col)) => self.set(row, col, cell),
            _ => false,
        }
    }

    /// Iterate over every `(row, col)` coordinate in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |row| (0..cols).map(move |col| (row, col)))
    }

    /// Iterate over rows as slices. Always yields `rows()` slices, each of
    /// length `cols()`, even when `cols()` is 0.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[CellState]> {
        let cols = self.cols;
        (0..self.rows).map(move |row| {
            let start = row.saturating_mul(cols);
            self.cells
                .get(start..start.saturating_add(cols))
                .unwrap_or_default()
        })
    }

    /// Copy the grid into nested rows.
    pub fn to_rows(&self) -> Vec<Vec<CellState>> {
        self.iter_rows().map(<[CellState]>::to_vec).collect()
    }

    /// Number of colored cells.
    pub fn colored_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_colored()).count()
    }

    /// Fraction of cells that are colored, in `[0, 1]`. An empty grid has a
    /// fill ratio of 0.
    pub fn fill_ratio(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        // Grid sizes are far below 2^52 cells.
        #[allow(clippy::cast_precision_loss)]
        let ratio = self.colored_count() as f64 / self.cells.len() as f64;
        ratio
    }

    /// Whether no cell is colored.
    pub fn is_blank(&self) -> bool {
        !self.cells.iter().any(CellState::is_colored)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn red() -> CellState {
        CellState::seeded(RgbColor::new(255, 0, 0))
    }

    #[test]
    fn new_grid_is_empty() {
        let grid = Grid::new(4, 7);
        assert_eq!(grid.dimensions(), (4, 7));
        assert_eq!(grid.len(), 28);
        assert!(grid.cells().iter().all(|c| *c == CellState::EMPTY));
        assert!(grid.is_blank());
        assert_eq!(grid.fill_ratio(), 0.0);
    }

    #[test]
    fn out_of_bounds_access_is_none() {
        let mut grid = Grid::new(2, 3);
        assert!(grid.get(2, 0).is_none());
        assert!(grid.get(0, 3).is_none());
        assert!(grid.get_signed(-1, 0).is_none());
        assert!(!grid.set(5, 5, red()));
        assert!(!grid.set_signed(0, -1, red()));
        assert!(grid.is_blank());
    }

    #[test]
    fn set_and_get_round_trip() {
        let mut grid = Grid::new(3, 3);
        assert!(grid.set(1, 2, red()));
        assert_eq!(grid.get(1, 2), Some(&red()));
        assert_eq!(grid.get_signed(1, 2), Some(&red()));
        assert_eq!(grid.colored_count(), 1);
        assert!((grid.fill_ratio() - 1.0 / 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn clone_is_independent() {
        let mut grid = Grid::new(2, 2);
        grid.set(0, 0, red());
        let copy = grid.clone();
        grid.set(0, 0, CellState::EMPTY);
        assert_eq!(copy.get(0, 0), Some(&red()));
        assert_eq!(grid.get(0, 0), Some(&CellState::EMPTY));
    }

    #[test]
    fn from_rows_rejects_jagged_input() {
        let rows = vec![vec![CellState::EMPTY; 3], vec![CellState::EMPTY; 2]];
        assert_eq!(
            Grid::from_rows(rows),
            Err(GridError::JaggedRows {
                row: 1,
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn from_rows_and_to_rows_agree() {
        let mut grid = Grid::new(2, 3);
        grid.set(1, 0, red());
        let rebuilt = Grid::from_rows(grid.to_rows()).unwrap();
        assert_eq!(rebuilt, grid);
    }

    #[test]
    fn zero_width_rows_survive_round_trip() {
        let grid = Grid::from_rows(vec![Vec::new(); 3]).unwrap();
        assert_eq!(grid.dimensions(), (3, 0));
        assert_eq!(grid.iter_rows().count(), 3);
        assert_eq!(Grid::from_rows(grid.to_rows()).unwrap(), grid);
        assert_eq!(Grid::new(3, 0).to_rows().len(), 3);
    }

    #[test]
    fn positions_are_row_major() {
        let grid = Grid::new(2, 2);
        let positions: Vec<_> = grid.positions().collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }

    #[test]
    fn cell_aging_and_recoloring() {
        let cell = red().aged().aged();
        assert_eq!(cell.age, 2);
        let blue = RgbColor::new(0, 0, 255);
        assert_eq!(cell.recolored(blue), CellState { color: Some(blue), age: 2 });
        assert_eq!(CellState { color: None, age: u32::MAX }.aged().age, u32::MAX);
    }

    #[test]
    fn deserialization_checks_cell_count() {
        let bad = r#"{"rows":2,"cols":2,"cells":[]}"#;
        assert!(serde_json::from_str::<Grid>(bad).is_err());

        let grid = Grid::new(1, 2);
        let json = serde_json::to_string(&grid).unwrap();
        let back: Grid = serde_json::from_str(&json).unwrap();
        assert_eq!(back, grid);
    }
}
