//! Spatial primitives shared by the sketch and figure rules: mirror columns,
//! the radial ring gate, and centre-biased seeding weights.
//!
//! The grid centre is `((rows - 1) / 2, (cols - 1) / 2)` in cell units, so on
//! an even-width grid the vertical centreline falls between two columns and
//! every column has a distinct mirror.

use sprout_types::{CellState, Grid};

/// Grid-sized count as `f64`.
pub(crate) fn to_f64(n: usize) -> f64 {
    f64::from(u32::try_from(n).unwrap_or(u32::MAX))
}

/// Fractional row and column of the grid centre.
pub fn centre(rows: usize, cols: usize) -> (f64, f64) {
    (
        (to_f64(rows) - 1.0).max(0.0) / 2.0,
        (to_f64(cols) - 1.0).max(0.0) / 2.0,
    )
}

/// The column reflected about the vertical centreline.
pub const fn mirror_col(cols: usize, col: usize) -> usize {
    cols.saturating_sub(1).saturating_sub(col)
}

/// Write `cell` at `(row, col)` and at its mirror column when that column
/// differs from `col`.
pub fn write_mirrored(next: &mut Grid, row: usize, col: usize, cell: CellState) {
    next.set(row, col, cell);
    let mirrored = mirror_col(next.cols(), col);
    if mirrored != col {
        next.set(row, mirrored, cell);
    }
}

/// Like [`write_mirrored`], but the mirror cell is written only when it is
/// empty in `prev`. Occupied cells keep their color and age.
pub fn write_mirrored_into_empty(
    prev: &Grid,
    next: &mut Grid,
    row: usize,
    col: usize,
    cell: CellState,
) {
    next.set(row, col, cell);
    let mirrored = mirror_col(next.cols(), col);
    if mirrored != col && prev.get(row, mirrored).is_some_and(|m| !m.is_colored()) {
        next.set(row, mirrored, cell);
    }
}

/// Euclidean distance of a cell from the grid centre.
pub fn centre_distance(rows: usize, cols: usize, row: usize, col: usize) -> f64 {
    let (cy, cx) = centre(rows, cols);
    (to_f64(row) - cy).hypot(to_f64(col) - cx)
}

/// Row position as a fraction of the height, measured at the cell centre.
pub fn row_fraction(rows: usize, row: usize) -> f64 {
    if rows == 0 {
        return 0.0;
    }
    (to_f64(row) + 0.5) / to_f64(rows)
}

/// An annulus around the grid centre, with radii given as fractions of the
/// grid's smaller dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    /// Inner radius as a fraction of `min(rows, cols)`.
    pub inner: f64,
    /// Outer radius as a fraction of `min(rows, cols)`.
    pub outer: f64,
}

impl Ring {
    /// Build a ring from fractional radii.
    pub const fn new(inner: f64, outer: f64) -> Self {
        Self { inner, outer }
    }

    /// Absolute `(inner, outer)` radii for a grid.
    pub fn radii(&self, rows: usize, cols: usize) -> (f64, f64) {
        let min_dim = to_f64(rows.min(cols));
        (self.inner * min_dim, self.outer * min_dim)
    }

    /// Whether the cell lies inside the ring (bounds inclusive).
    pub fn contains(&self, rows: usize, cols: usize, row: usize, col: usize) -> bool {
        let (inner, outer) = self.radii(rows, cols);
        let distance = centre_distance(rows, cols, row, col);
        distance >= inner && distance <= outer
    }
}

/// Seeding weight by horizontal distance from the centreline: 1 on the
/// centreline, falling linearly to 0 at the side edges.
pub fn centre_boost(cols: usize, col: usize) -> f64 {
    let half = to_f64(cols) / 2.0;
    if half <= 0.0 {
        return 0.0;
    }
    let (_, cx) = centre(1, cols);
    (1.0 - (to_f64(col) - cx).abs() / half).clamp(0.0, 1.0)
}

/// Seeding weight by vertical band: sparse at the top, full through the
/// middle, reduced at the bottom.
pub fn row_band_factor(rows: usize, row: usize) -> f64 {
    let fraction = row_fraction(rows, row);
    if fraction < 0.2 {
        0.4
    } else if fraction < 0.8 {
        1.0
    } else {
        0.6
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use sprout_types::RgbColor;

    #[test]
    fn mirror_columns_reflect() {
        assert_eq!(mirror_col(8, 0), 7);
        assert_eq!(mirror_col(8, 3), 4);
        assert_eq!(mirror_col(7, 3), 3);
        assert_eq!(mirror_col(0, 0), 0);
    }

    #[test]
    fn mirrored_write_skips_centre_column() {
        let cell = CellState::seeded(RgbColor::WHITE);
        let mut odd = Grid::new(1, 5);
        write_mirrored(&mut odd, 0, 2, cell);
        assert_eq!(odd.colored_count(), 1);

        let mut even = Grid::new(1, 4);
        write_mirrored(&mut even, 0, 1, cell);
        assert_eq!(even.get(0, 2), Some(&cell));
        assert_eq!(even.colored_count(), 2);
    }

    #[test]
    fn ring_gates_by_distance() {
        let ring = Ring::new(0.22, 0.48);
        // 32x32: centre at 15.5, radii 7.04 .. 15.36
        assert!(!ring.contains(32, 32, 15, 15));
        assert!(ring.contains(32, 32, 15, 5));
        assert!(!ring.contains(32, 32, 0, 0));
        let (inner, outer) = ring.radii(32, 16);
        assert!((inner - 3.52).abs() < 1e-9);
        assert!((outer - 7.68).abs() < 1e-9);
    }

    #[test]
    fn centre_boost_peaks_on_centreline() {
        assert_eq!(centre_boost(5, 2), 1.0);
        assert!(centre_boost(5, 0) < centre_boost(5, 1));
        assert_eq!(centre_boost(32, 0), centre_boost(32, 31));
        assert_eq!(centre_boost(0, 0), 0.0);
    }

    #[test]
    fn row_bands() {
        assert_eq!(row_band_factor(10, 0), 0.4);
        assert_eq!(row_band_factor(10, 5), 1.0);
        assert_eq!(row_band_factor(10, 9), 0.6);
    }
}
