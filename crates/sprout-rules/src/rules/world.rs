//! World/Biome rules: per-cell diffusion over the Moore (or von Neumann)
//! neighbourhood with rule-specific birth windows, probabilities, and aging.
//!
//! | Rule | Empty cell | Occupied cell |
//! |----------|-------------------------------------------|-----------------------------------------|
//! | moss | 1-3 colored -> average | >= 6 colored -> clear; else age, darken 2% |
//! | crystal | exactly 1 orthogonal colored -> copy | unchanged |
//! | coral | 1-4 colored -> average | >= 6 colored -> clear |
//! | lava | >= 1 colored, 40% -> copy a random one | r + 5, g - 3, b - 8 |
//! | terrain | 2-5 colored -> average | age; g -= age * 0.2, b -= age * 0.4 |
//! | slime | >= 3 colored, 20% -> average | darken 1% |
//! | snowfall | exactly 1 colored, 15% -> copy | darken 0.5% |
//! | chaos | 2% -> random color | age; 8% jump +-25; 0.4% clear |

use sprout_types::{CellState, Grid, RgbColor};

use super::map_cells;
use crate::color::{average_color, darken_color, jitter_color, random_color, round_channel, shift_channels};
use crate::neighbourhood::{neighbour_colors, von_neumann_colors};
use crate::random::{Randomness, pick};

const MOSS_BIRTH: (usize, usize) = (1, 3);
const MOSS_CROWD: usize = 6;
const MOSS_DARKEN: f64 = 0.02;

const CORAL_BIRTH: (usize, usize) = (1, 4);
const CORAL_CROWD: usize = 6;

const LAVA_SPREAD_CHANCE: f64 = 0.4;
/// Per-step channel drift for molten cells: hotter red, cooler green/blue.
const LAVA_DRIFT: (i32, i32, i32) = (5, -3, -8);

const TERRAIN_BIRTH: (usize, usize) = (2, 5);
const TERRAIN_GREEN_FADE: f64 = 0.2;
const TERRAIN_BLUE_FADE: f64 = 0.4;

const SLIME_MIN_NEIGHBOURS: usize = 3;
const SLIME_BIRTH_CHANCE: f64 = 0.2;
const SLIME_DARKEN: f64 = 0.01;

const SNOW_BIRTH_CHANCE: f64 = 0.15;
const SNOW_DARKEN: f64 = 0.005;

const CHAOS_BIRTH_CHANCE: f64 = 0.02;
const CHAOS_JUMP_CHANCE: f64 = 0.08;
const CHAOS_JUMP: i32 = 25;
const CHAOS_CLEAR_CHANCE: f64 = 0.004;

/// A newborn cell with the average of `colors`, when the count is in the
/// inclusive `window`.
fn averaged_birth(colors: &[RgbColor], window: (usize, usize)) -> Option<CellState> {
    let (low, high) = window;
    if !(low..=high).contains(&colors.len()) {
        return None;
    }
    average_color(colors).map(CellState::seeded)
}

/// Moss: clusters spread from sparse edges, age and darken, and die when
/// crowded.
pub fn moss(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    map_cells(prev, rng, |grid, row, col, cell, _| {
        let colors = neighbour_colors(grid, row, col);
        match cell.color {
            None => averaged_birth(&colors, MOSS_BIRTH),
            Some(_) if colors.len() >= MOSS_CROWD => Some(CellState::EMPTY),
            Some(color) => Some(CellState {
                color: Some(darken_color(color, MOSS_DARKEN)),
                age: cell.age.saturating_add(1),
            }),
        }
    })
}

/// Crystal: an empty cell copies its only orthogonal colored neighbour.
pub fn crystal(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    map_cells(prev, rng, |grid, row, col, cell, _| {
        if cell.is_colored() {
            return None;
        }
        match von_neumann_colors(grid, row, col).as_slice() {
            [only] => Some(CellState::seeded(*only)),
            _ => None,
        }
    })
}

/// Coral: averaged growth from up to four neighbours, crowd die-off.
pub fn coral(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    map_cells(prev, rng, |grid, row, col, cell, _| {
        let colors = neighbour_colors(grid, row, col);
        match cell.color {
            None => averaged_birth(&colors, CORAL_BIRTH),
            Some(_) if colors.len() >= CORAL_CROWD => Some(CellState::EMPTY),
            Some(_) => None,
        }
    })
}

/// Lava: stochastic copying of a random neighbour; molten cells drift red.
pub fn lava(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    map_cells(prev, rng, |grid, row, col, cell, rng| match cell.color {
        None => {
            let colors = neighbour_colors(grid, row, col);
            if colors.is_empty() || !rng.chance(LAVA_SPREAD_CHANCE) {
                return None;
            }
            pick(rng, &colors).map(CellState::seeded)
        }
        Some(color) => {
            let (dr, dg, db) = LAVA_DRIFT;
            Some(cell.recolored(shift_channels(color, dr, dg, db)))
        }
    })
}

/// Terrain: averaged growth in mid-density areas; older land loses green
/// and blue faster.
pub fn terrain(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    map_cells(prev, rng, |grid, row, col, cell, _| match cell.color {
        None => averaged_birth(&neighbour_colors(grid, row, col), TERRAIN_BIRTH),
        Some(color) => {
            let age = cell.age.saturating_add(1);
            let years = f64::from(age);
            let weathered = RgbColor::new(
                color.r,
                round_channel(f64::from(color.g) - years * TERRAIN_GREEN_FADE),
                round_channel(f64::from(color.b) - years * TERRAIN_BLUE_FADE),
            );
            Some(CellState {
                color: Some(weathered),
                age,
            })
        }
    })
}

/// Slime: slow averaged births where at least three neighbours are colored.
pub fn slime(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    map_cells(prev, rng, |grid, row, col, cell, rng| match cell.color {
        None => {
            let colors = neighbour_colors(grid, row, col);
            if colors.len() < SLIME_MIN_NEIGHBOURS || !rng.chance(SLIME_BIRTH_CHANCE) {
                return None;
            }
            average_color(&colors).map(CellState::seeded)
        }
        Some(color) => Some(cell.recolored(darken_color(color, SLIME_DARKEN))),
    })
}

/// Snowfall: rare copies next to a lone colored neighbour; slow fading.
pub fn snowfall(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    map_cells(prev, rng, |grid, row, col, cell, rng| match cell.color {
        None => match neighbour_colors(grid, row, col).as_slice() {
            [only] if rng.chance(SNOW_BIRTH_CHANCE) => Some(CellState::seeded(*only)),
            _ => None,
        },
        Some(color) => Some(cell.recolored(darken_color(color, SNOW_DARKEN))),
    })
}

/// Chaos: spontaneous random births, random color jumps, rare deaths.
pub fn chaos(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    map_cells(prev, rng, |_, _, _, cell, rng| match cell.color {
        None => rng
            .chance(CHAOS_BIRTH_CHANCE)
            .then(|| CellState::seeded(random_color(rng))),
        Some(color) => {
            let mut updated = cell.aged();
            if rng.chance(CHAOS_JUMP_CHANCE) {
                updated = updated.recolored(jitter_color(color, CHAOS_JUMP, rng));
            }
            if rng.chance(CHAOS_CLEAR_CHANCE) {
                updated = CellState::EMPTY;
            }
            Some(updated)
        }
    })
}
