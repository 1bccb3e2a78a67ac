//! Cluster growth, centre-biased seeding, and isolated-pixel cleanup.
//!
//! The sketch, figure, and portrait rules all grow the same way: an empty
//! cell with a few colored neighbours may be born with their (jittered)
//! average, an occupied cell ages and darkens, and crowded or stale cells
//! are cleared. What differs between rules is the tuning, which each rule
//! declares as a `const` [`GrowthTuning`] / [`SeedTuning`].

use sprout_types::{CellState, Grid, RgbColor};

use crate::color::{average_color, darken_color, jitter_color};
use crate::neighbourhood::neighbour_colors;
use crate::random::{Randomness, pick};
use crate::shape::{
    Ring, centre_boost, row_band_factor, row_fraction, write_mirrored_into_empty,
};

/// Clears stale, isolated pixels.
///
/// A cell is cleared only when all four hold: it is occupied, it has at
/// most one colored neighbour, its age exceeds `min_age`, and an
/// independent roll against `chance` succeeds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsolatedCleanup {
    /// Age the cell must exceed.
    pub min_age: u32,
    /// Probability of clearing once the other conditions hold.
    pub chance: f64,
}

impl IsolatedCleanup {
    /// Check the deterministic conditions first; roll only if they pass.
    pub fn applies(
        &self,
        cell: CellState,
        colored_neighbours: usize,
        rng: &mut dyn Randomness,
    ) -> bool {
        cell.is_colored()
            && colored_neighbours <= 1
            && cell.age > self.min_age
            && rng.chance(self.chance)
    }
}

/// Per-rule constants for neighbourhood growth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthTuning {
    /// Inclusive range of colored neighbours that allows a birth.
    pub birth_neighbours: (usize, usize),
    /// Probability of a birth when the neighbour count is in range.
    pub birth_chance: f64,
    /// Jitter applied to the averaged birth color.
    pub birth_jitter: i32,
    /// Occupied cells with at least this many colored neighbours are cleared.
    pub crowd_limit: Option<usize>,
    /// Darkening applied to occupied cells each step.
    pub darken: f64,
    /// Optional `(chance, amount)` jitter for occupied cells.
    pub idle_jitter: Option<(f64, i32)>,
    /// Stale isolated-pixel cleanup.
    pub cleanup: Option<IsolatedCleanup>,
    /// Mirror births about the vertical centreline.
    pub mirror: bool,
    /// Restrict all activity to this ring; cells outside pass through.
    pub ring: Option<Ring>,
    /// Birth-chance multiplier for the upper half of the grid.
    pub upper_half_bias: Option<f64>,
    /// Occupied cells are never cleared.
    pub protect_occupied: bool,
}

impl GrowthTuning {
    fn birth_chance_at(&self, rows: usize, row: usize) -> f64 {
        match self.upper_half_bias {
            Some(bias) if row_fraction(rows, row) < 0.5 => self.birth_chance * bias,
            _ => self.birth_chance,
        }
    }

    fn in_birth_range(&self, count: usize) -> bool {
        let (low, high) = self.birth_neighbours;
        (low..=high).contains(&count)
    }
}

/// Grow, age, or clear one cell of `prev` into `next`.
pub fn grow_cell(
    prev: &Grid,
    next: &mut Grid,
    row: usize,
    col: usize,
    tuning: &GrowthTuning,
    rng: &mut dyn Randomness,
) {
    let Some(&cell) = prev.get(row, col) else {
        return;
    };
    if let Some(ring) = tuning.ring
        && !ring.contains(prev.rows(), prev.cols(), row, col)
    {
        return;
    }

    let colors = neighbour_colors(prev, row, col);

    match cell.color {
        None => {
            if !tuning.in_birth_range(colors.len()) {
                return;
            }
            if !rng.chance(tuning.birth_chance_at(prev.rows(), row)) {
                return;
            }
            let Some(average) = average_color(&colors) else {
                return;
            };
            let born = CellState::seeded(jitter_color(average, tuning.birth_jitter, rng));
            if tuning.mirror {
                write_mirrored_into_empty(prev, next, row, col, born);
            } else {
                next.set(row, col, born);
            }
        }
        Some(color) => {
            if !tuning.protect_occupied {
                let crowded = tuning.crowd_limit.is_some_and(|limit| colors.len() >= limit);
                if crowded
                    || tuning
                        .cleanup
                        .is_some_and(|cleanup| cleanup.applies(cell, colors.len(), rng))
                {
                    next.set(row, col, CellState::EMPTY);
                    return;
                }
            }

            let mut shade = darken_color(color, tuning.darken);
            if let Some((chance, amount)) = tuning.idle_jitter
                && rng.chance(chance)
            {
                shade = jitter_color(shade, amount, rng);
            }
            next.set(
                row,
                col,
                CellState {
                    color: Some(shade),
                    age: cell.age.saturating_add(1),
                },
            );
        }
    }
}

/// Per-rule constants for centre-biased seeding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedTuning {
    /// Seed probability at full centre boost in the middle band.
    pub base_chance: f64,
    /// Colors new seeds are drawn from.
    pub palette: &'static [RgbColor],
    /// Jitter applied to the palette color.
    pub jitter: i32,
    /// Mirror seeds about the vertical centreline.
    pub mirror: bool,
    /// Restrict seeding to this ring.
    pub ring: Option<Ring>,
}

/// Try to drop a fresh seed into an empty, isolated cell.
///
/// Only cells that are empty and have no colored neighbour are candidates;
/// everything else is left to [`grow_cell`]. Returns whether a seed was
/// written.
pub fn seed_cell(
    prev: &Grid,
    next: &mut Grid,
    row: usize,
    col: usize,
    tuning: &SeedTuning,
    rng: &mut dyn Randomness,
) -> bool {
    let (rows, cols) = prev.dimensions();
    if prev.get(row, col).is_none_or(CellState::is_colored) {
        return false;
    }
    if tuning.ring.is_some_and(|ring| !ring.contains(rows, cols, row, col)) {
        return false;
    }
    if !neighbour_colors(prev, row, col).is_empty() {
        return false;
    }

    let chance = tuning.base_chance * centre_boost(cols, col) * row_band_factor(rows, row);
    if !rng.chance(chance) {
        return false;
    }
    let Some(base) = pick(rng, tuning.palette) else {
        return false;
    };

    let seed = CellState::seeded(jitter_color(base, tuning.jitter, rng));
    if tuning.mirror {
        write_mirrored_into_empty(prev, next, row, col, seed);
    } else {
        next.set(row, col, seed);
    }
    true
}

/// Run [`grow_cell`] over every cell of `prev`, without seeding.
pub fn grow_grid(prev: &Grid, growth: &GrowthTuning, rng: &mut dyn Randomness) -> Grid {
    let mut next = prev.clone();
    for (row, col) in prev.positions() {
        grow_cell(prev, &mut next, row, col, growth, rng);
    }
    next
}

/// One sketch step: isolated empty cells may take a seed, every other cell
/// grows, ages, or clears.
pub fn seed_and_grow(
    prev: &Grid,
    seed: &SeedTuning,
    growth: &GrowthTuning,
    rng: &mut dyn Randomness,
) -> Grid {
    let mut next = prev.clone();
    for (row, col) in prev.positions() {
        if !seed_cell(prev, &mut next, row, col, seed, rng) {
            grow_cell(prev, &mut next, row, col, growth, rng);
        }
    }
    next
}
