//! The rule library.
//!
//! Every rule is a pure function `(&Grid, &mut dyn Randomness) -> Grid`:
//!
//! - the output has the same dimensions as the input;
//! - neighbourhood queries read only the input grid;
//! - writes go to a separate output grid that starts as a clone of the
//!   input, so cells a rule does not touch pass through unchanged.
//!
//! # Families
//!
//! - [`world`] -- biome rules (moss, crystal, coral, lava, terrain, slime,
//!   snowfall, chaos).
//! - [`magic_draw`] -- centre-biased, mirrored sketch rules.
//! - [`avatar`] -- two-phase figure rules.
//! - [`portrait`] -- two-phase zoned portrait rules.
//!
//! [`growth`] holds the cluster-growth, seeding, and cleanup primitives the
//! last three families share; each rule keeps its own constants.

pub mod avatar;
pub mod growth;
pub mod magic_draw;
pub mod portrait;
pub mod world;

use sprout_types::{CellState, Grid};

use crate::random::Randomness;

/// Signature shared by every rule.
pub type RuleFn = fn(&Grid, &mut dyn Randomness) -> Grid;

/// Run `update` for every cell of `prev`, writing `Some` results into a
/// clone of `prev`. `None` leaves the cell as it was.
pub(crate) fn map_cells<F>(prev: &Grid, rng: &mut dyn Randomness, mut update: F) -> Grid
where
    F: FnMut(&Grid, usize, usize, CellState, &mut dyn Randomness) -> Option<CellState>,
{
    let mut next = prev.clone();
    for (row, col) in prev.positions() {
        let Some(&cell) = prev.get(row, col) else {
            continue;
        };
        if let Some(updated) = update(prev, row, col, cell, &mut *rng) {
            next.set(row, col, updated);
        }
    }
    next
}
