//! Sketch rules: centre-biased mirrored seeding plus small-cluster growth.
//!
//! - [`magic_draw`] clears stale isolated pixels.
//! - [`magic_draw2`] keeps them and lets mid-life cells throw short
//!   brightened streaks.
//! - [`magic_draw_aura`] confines everything to an annulus around the
//!   centre and never clears inside it, so a figure in the middle survives.

use sprout_types::{Grid, RgbColor};

use super::growth::{GrowthTuning, IsolatedCleanup, SeedTuning, seed_and_grow};
use crate::color::{brighten_color, brightness};
use crate::neighbourhood::{MOORE_OFFSETS, paint_cell};
use crate::random::{Randomness, pick};
use crate::shape::{Ring, mirror_col};

const SKETCH_PALETTE: &[RgbColor] = &[
    RgbColor::from_u24(0xff_6f_91),
    RgbColor::from_u24(0xff_96_71),
    RgbColor::from_u24(0xff_c7_5f),
    RgbColor::from_u24(0xf9_f8_71),
    RgbColor::from_u24(0x84_5e_c2),
    RgbColor::from_u24(0x00_c9_a7),
    RgbColor::from_u24(0x4d_80_76),
    RgbColor::from_u24(0xc3_4a_36),
];

const AURA_PALETTE: &[RgbColor] = &[
    RgbColor::from_u24(0xb3_9c_d0),
    RgbColor::from_u24(0x00_c9_a7),
    RgbColor::from_u24(0xfb_ea_ff),
    RgbColor::from_u24(0xff_c7_5f),
    RgbColor::from_u24(0x4f_fb_df),
];

const SKETCH_SEED: SeedTuning = SeedTuning {
    base_chance: 0.004,
    palette: SKETCH_PALETTE,
    jitter: 10,
    mirror: true,
    ring: None,
};

const SKETCH_GROWTH: GrowthTuning = GrowthTuning {
    birth_neighbours: (1, 3),
    birth_chance: 0.35,
    birth_jitter: 12,
    crowd_limit: Some(7),
    darken: 0.01,
    idle_jitter: None,
    cleanup: Some(IsolatedCleanup {
        min_age: 10,
        chance: 0.1,
    }),
    mirror: true,
    ring: None,
    upper_half_bias: None,
    protect_occupied: false,
};

const STREAK_GROWTH: GrowthTuning = GrowthTuning {
    cleanup: None,
    ..SKETCH_GROWTH
};

const AURA_RING: Ring = Ring::new(0.22, 0.48);

const AURA_SEED: SeedTuning = SeedTuning {
    base_chance: 0.006,
    palette: AURA_PALETTE,
    jitter: 8,
    mirror: true,
    ring: Some(AURA_RING),
};

const AURA_GROWTH: GrowthTuning = GrowthTuning {
    birth_neighbours: (1, 3),
    birth_chance: 0.3,
    birth_jitter: 10,
    crowd_limit: None,
    darken: 0.006,
    idle_jitter: Some((0.06, 6)),
    cleanup: None,
    mirror: true,
    ring: Some(AURA_RING),
    upper_half_bias: None,
    protect_occupied: true,
};

/// Streak emitters: age and brightness windows (inclusive).
const STREAK_AGE: (u32, u32) = (5, 40);
const STREAK_BRIGHTNESS: (f64, f64) = (60.0, 200.0);
const STREAK_CHANCE: f64 = 0.14;
const STREAK_MAX_LEN: usize = 4;
const STREAK_BRIGHTEN: i32 = 24;
const STREAK_MIRROR_CHANCE: f64 = 0.5;

/// Mirrored sketch with stale-pixel cleanup.
pub fn magic_draw(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    seed_and_grow(prev, &SKETCH_SEED, &SKETCH_GROWTH, rng)
}

/// Mirrored sketch with directional streaks and no cleanup.
pub fn magic_draw2(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    let mut next = seed_and_grow(prev, &SKETCH_SEED, &STREAK_GROWTH, rng);
    cast_streaks(prev, &mut next, rng);
    next
}

/// Mirrored sketch confined to the aura ring.
pub fn magic_draw_aura(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    seed_and_grow(prev, &AURA_SEED, &AURA_GROWTH, rng)
}

/// The color a cell streaks with, if it is old and bright enough to emit.
fn streak_source(prev: &Grid, row: usize, col: usize) -> Option<RgbColor> {
    let cell = prev.get(row, col)?;
    let color = cell.color?;
    let (min_age, max_age) = STREAK_AGE;
    let (dim, bright) = STREAK_BRIGHTNESS;
    ((min_age..=max_age).contains(&cell.age) && (dim..=bright).contains(&brightness(color)))
        .then_some(color)
}

/// Second pass of [`magic_draw2`]: emitters read from `prev`, streaks are
/// painted over whatever `next` already holds.
fn cast_streaks(prev: &Grid, next: &mut Grid, rng: &mut dyn Randomness) {
    let axis = mirror_col(prev.cols(), 0);
    let Ok(axis) = isize::try_from(axis) else {
        return;
    };

    for (row, col) in prev.positions() {
        let Some(color) = streak_source(prev, row, col) else {
            continue;
        };
        if !rng.chance(STREAK_CHANCE) {
            continue;
        }
        let Some((dr, dc)) = pick(rng, &MOORE_OFFSETS) else {
            continue;
        };
        let length = rng.below(STREAK_MAX_LEN).saturating_add(1);
        let mirrored = rng.chance(STREAK_MIRROR_CHANCE);
        let paint = Some(brighten_color(color, STREAK_BRIGHTEN));

        let (Ok(origin_row), Ok(origin_col)) = (isize::try_from(row), isize::try_from(col)) else {
            continue;
        };
        for reach in 1..=length {
            let Ok(reach) = isize::try_from(reach) else {
                break;
            };
            let r = origin_row.saturating_add(dr.saturating_mul(reach));
            let c = origin_col.saturating_add(dc.saturating_mul(reach));
            paint_cell(next, r, c, paint);
            let mirror = axis.saturating_sub(c);
            if mirrored && mirror != c {
                paint_cell(next, r, mirror, paint);
            }
        }
    }
}
