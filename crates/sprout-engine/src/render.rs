//! End-of-run output: ASCII shading and JSON snapshots of a canvas.

use serde::Serialize;
use sprout_core::canvas::Canvas;
use sprout_rules::color::{brightness, clamp_channel};
use sprout_types::{CellState, Grid, RuleName};

/// Characters from darkest to brightest.
const SHADES: [char; 7] = ['-', '=', '+', '*', '#', '%', '@'];
const EMPTY_CELL: char = '.';

fn shade(cell: &CellState) -> char {
    let Some(color) = cell.color else {
        return EMPTY_CELL;
    };
    // Seven bands over 0..=255.
    let band = clamp_channel(brightness(color) * 7.0 / 256.0);
    SHADES
        .get(usize::from(band))
        .copied()
        .unwrap_or(EMPTY_CELL)
}

/// One line per row, one character per cell.
pub fn ascii_art(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.len().saturating_add(grid.rows()));
    for row in grid.iter_rows() {
        out.extend(row.iter().map(shade));
        out.push('\n');
    }
    out
}

/// Serialized end-of-run state.
#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    rule: RuleName,
    steps: u64,
    colored: usize,
    grid: &'a Grid,
}

/// The canvas as pretty-printed JSON.
pub fn snapshot_json(canvas: &Canvas) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&Snapshot {
        rule: canvas.rule(),
        steps: canvas.steps_taken(),
        colored: canvas.grid().colored_count(),
        grid: canvas.grid(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sprout_rules::SequenceRandomness;
    use sprout_types::RgbColor;

    use super::*;

    #[test]
    fn ascii_shades_by_brightness() {
        let mut grid = Grid::new(2, 3);
        grid.set(0, 0, CellState::seeded(RgbColor::BLACK));
        grid.set(0, 2, CellState::seeded(RgbColor::WHITE));
        grid.set(1, 1, CellState::seeded(RgbColor::new(128, 128, 128)));
        assert_eq!(ascii_art(&grid), "-.@\n.*.\n");
    }

    #[test]
    fn empty_grid_renders_nothing() {
        assert_eq!(ascii_art(&Grid::new(0, 0)), "");
    }

    #[test]
    fn snapshot_carries_rule_and_grid() {
        let mut canvas = Canvas::new(
            2,
            2,
            RuleName::MagicDraw2,
            Box::new(SequenceRandomness::constant(0.9)),
        );
        canvas.paint(0, 0, RgbColor::new(1, 2, 3));
        let json: serde_json::Value = serde_json::from_str(&snapshot_json(&canvas).unwrap()).unwrap();
        assert_eq!(json["rule"], "magicDraw2");
        assert_eq!(json["steps"], 0);
        assert_eq!(json["colored"], 1);
        assert_eq!(json["grid"]["rows"], 2);
        let grid: Grid = serde_json::from_value(json["grid"].clone()).unwrap();
        assert_eq!(&grid, canvas.grid());
    }
}
