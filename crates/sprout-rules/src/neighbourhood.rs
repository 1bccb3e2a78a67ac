//! Grid primitives: construction, Moore and von Neumann neighbourhood
//! queries, and the engine-bypassing paint path.

use sprout_types::{CellState, Grid, RgbColor};

/// Moore offsets, row-major over `dr, dc in {-1, 0, 1}` without the centre.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Orthogonal offsets (up, left, right, down).
pub const VON_NEUMANN_OFFSETS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// A `rows x cols` grid of empty cells.
pub fn create_empty_grid(rows: usize, cols: usize) -> Grid {
    Grid::new(rows, cols)
}

/// A deep copy of `grid`. Cells are plain values, so nothing is shared.
pub fn clone_grid(grid: &Grid) -> Grid {
    grid.clone()
}

fn cells_at<'a>(
    grid: &'a Grid,
    row: usize,
    col: usize,
    offsets: &'a [(isize, isize)],
) -> impl Iterator<Item = CellState> + 'a {
    let origin = isize::try_from(row).ok().zip(isize::try_from(col).ok());
    offsets.iter().filter_map(move |&(dr, dc)| {
        let (r, c) = origin?;
        grid.get_signed(r.checked_add(dr)?, c.checked_add(dc)?).copied()
    })
}

/// The up-to-8 cells at Chebyshev distance 1, clipped to the grid.
///
/// Corner cells yield 3 neighbours, edge cells 5, interior cells 8.
pub fn neighbour_cells(grid: &Grid, row: usize, col: usize) -> Vec<CellState> {
    cells_at(grid, row, col, &MOORE_OFFSETS).collect()
}

/// Colors of the colored Moore neighbours.
pub fn neighbour_colors(grid: &Grid, row: usize, col: usize) -> Vec<RgbColor> {
    cells_at(grid, row, col, &MOORE_OFFSETS)
        .filter_map(|cell| cell.color)
        .collect()
}

/// Colors of the colored orthogonal (von Neumann) neighbours.
pub fn von_neumann_colors(grid: &Grid, row: usize, col: usize) -> Vec<RgbColor> {
    cells_at(grid, row, col, &VON_NEUMANN_OFFSETS)
        .filter_map(|cell| cell.color)
        .collect()
}

/// Set (or clear, with `None`) one cell and reset its age.
///
/// Coordinates outside the grid, including negative ones, are ignored.
pub fn paint_cell(grid: &mut Grid, row: isize, col: isize, color: Option<RgbColor>) {
    let cell = color.map_or(CellState::EMPTY, CellState::seeded);
    grid.set_signed(row, col, cell);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const GREEN: RgbColor = RgbColor::new(0, 200, 0);

    #[test]
    fn neighbour_counts_by_position() {
        let grid = create_empty_grid(4, 5);
        assert_eq!(neighbour_cells(&grid, 0, 0).len(), 3);
        assert_eq!(neighbour_cells(&grid, 3, 4).len(), 3);
        assert_eq!(neighbour_cells(&grid, 0, 2).len(), 5);
        assert_eq!(neighbour_cells(&grid, 2, 0).len(), 5);
        assert_eq!(neighbour_cells(&grid, 1, 1).len(), 8);
    }

    #[test]
    fn single_cell_grid_has_no_neighbours() {
        let grid = create_empty_grid(1, 1);
        assert!(neighbour_cells(&grid, 0, 0).is_empty());
        assert!(neighbour_cells(&grid, 5, 5).len() <= 1);
    }

    #[test]
    fn neighbour_order_is_row_major() {
        let mut grid = create_empty_grid(3, 3);
        for (i, (r, c)) in grid.positions().collect::<Vec<_>>().into_iter().enumerate() {
            let age = u32::try_from(i).unwrap();
            grid.set(r, c, CellState { color: None, age });
        }
        let ages: Vec<u32> = neighbour_cells(&grid, 1, 1).iter().map(|c| c.age).collect();
        assert_eq!(ages, vec![0, 1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn colored_neighbours_skip_empty_cells() {
        let mut grid = create_empty_grid(3, 3);
        paint_cell(&mut grid, 0, 0, Some(GREEN));
        paint_cell(&mut grid, 0, 1, Some(GREEN));
        assert_eq!(neighbour_colors(&grid, 1, 1).len(), 2);
        // Only (0, 1) is orthogonal to the centre.
        assert_eq!(von_neumann_colors(&grid, 1, 1), vec![GREEN]);
        assert_eq!(von_neumann_colors(&grid, 1, 0), vec![GREEN]);
        assert_eq!(von_neumann_colors(&grid, 2, 2), Vec::<RgbColor>::new());
    }

    #[test]
    fn paint_resets_age_and_ignores_out_of_bounds() {
        let mut grid = create_empty_grid(2, 2);
        grid.set(0, 1, CellState { color: Some(GREEN), age: 9 });

        paint_cell(&mut grid, 0, 1, Some(RgbColor::WHITE));
        assert_eq!(grid.get(0, 1), Some(&CellState::seeded(RgbColor::WHITE)));

        paint_cell(&mut grid, 0, 1, None);
        assert_eq!(grid.get(0, 1), Some(&CellState::EMPTY));

        let before = grid.clone();
        paint_cell(&mut grid, -1, 0, Some(GREEN));
        paint_cell(&mut grid, 0, 2, Some(GREEN));
        paint_cell(&mut grid, 2, 0, Some(GREEN));
        assert_eq!(grid, before);
    }

    #[test]
    fn clone_grid_is_deep() {
        let mut grid = create_empty_grid(2, 2);
        paint_cell(&mut grid, 1, 1, Some(GREEN));
        let copy = clone_grid(&grid);
        paint_cell(&mut grid, 1, 1, None);
        assert_eq!(copy.get(1, 1).and_then(|c| c.color), Some(GREEN));
    }
}
