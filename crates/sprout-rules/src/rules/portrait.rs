//! Zoned portrait rules.
//!
//! The canvas is split into [`Zone`]s by row fraction and a face half-width
//! that swells from the brow to the cheeks and narrows again at the chin.
//! Every zone has its own palette, seeding chance, and growth tuning. Face
//! cells are never cleared, and face births are mirrored about the vertical
//! centreline with a per-rule probability.
//!
//! Like the figure rules these are two-phase: [`magic_portrait`] reseeds
//! while the canvas is nearly empty, [`magic_portrait2`] only when it is
//! blank.

use std::f64::consts::PI;

use sprout_types::{CellState, Grid, RgbColor};
use tracing::debug;

use super::avatar::{EYE_COLOR, HAIR_PALETTE, MOUTH_COLOR, SHIRT_PALETTE, SKIN_PALETTE};
use super::growth::{GrowthTuning, IsolatedCleanup, grow_cell};
use crate::color::jitter_color;
use crate::neighbourhood::neighbour_colors;
use crate::phase::{Phase, SeedGuard};
use crate::random::{Randomness, pick};
use crate::shape::{centre, row_fraction, to_f64, write_mirrored};

/// A region of the portrait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Everything outside the figure.
    Background,
    /// Crown above the face and the band framing its sides.
    Hair,
    /// Face and neck.
    Face,
    /// Shoulders and chest.
    Torso,
}

/// Row-fraction thresholds and widths (as fractions of the grid width) that
/// partition a canvas into [`Zone`]s. The layout is symmetric about the
/// vertical centreline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneLayout {
    /// Top of the hair crown.
    pub hair_top: f64,
    /// Top of the face (bottom of the crown).
    pub face_top: f64,
    /// Chin line.
    pub face_bottom: f64,
    /// Bottom of the neck, top of the torso.
    pub neck_bottom: f64,
    /// Face half-width at the brow and chin.
    pub face_min_half: f64,
    /// Face half-width at its widest.
    pub face_max_half: f64,
    /// Width of the hair band beside the face.
    pub hair_margin: f64,
    /// Neck half-width.
    pub neck_half: f64,
    /// Torso half-width at the shoulders.
    pub torso_top_half: f64,
    /// Torso half-width at the bottom edge.
    pub torso_bottom_half: f64,
}

impl ZoneLayout {
    /// Face half-width in cells at a row fraction, or `None` outside the face
    /// rows. Follows `min + (max - min) * sin(pi * t)` over the face height.
    pub fn face_half_width(&self, cols: usize, fraction: f64) -> Option<f64> {
        if fraction < self.face_top || fraction >= self.face_bottom {
            return None;
        }
        let t = (fraction - self.face_top) / (self.face_bottom - self.face_top);
        let spread = self.face_max_half - self.face_min_half;
        Some(to_f64(cols) * spread.mul_add((PI * t).sin(), self.face_min_half))
    }

    /// The zone a cell falls in.
    pub fn zone_at(&self, rows: usize, cols: usize, row: usize, col: usize) -> Zone {
        let fraction = row_fraction(rows, row);
        let (_, cx) = centre(rows, cols);
        let dx = (to_f64(col) - cx).abs();
        let width = to_f64(cols);

        if let Some(half) = self.face_half_width(cols, fraction) {
            return if dx <= half {
                Zone::Face
            } else if dx <= width.mul_add(self.hair_margin, half) {
                Zone::Hair
            } else {
                Zone::Background
            };
        }
        if fraction >= self.hair_top && fraction < self.face_top {
            let crown = width * (self.face_max_half + self.hair_margin);
            return if dx <= crown { Zone::Hair } else { Zone::Background };
        }
        if fraction >= self.face_bottom && fraction < self.neck_bottom {
            return if dx <= width * self.neck_half { Zone::Face } else { Zone::Background };
        }
        if fraction >= self.neck_bottom {
            let spread = (fraction - self.neck_bottom) / (1.0 - self.neck_bottom);
            let half = width
                * spread.mul_add(
                    self.torso_bottom_half - self.torso_top_half,
                    self.torso_top_half,
                );
            if dx <= half {
                return Zone::Torso;
            }
        }
        Zone::Background
    }
}

/// Seeding and growth constants for one zone.
#[derive(Debug, Clone, Copy)]
struct ZoneTuning {
    palette: &'static [RgbColor],
    /// Per-cell seed chance while painting the portrait.
    seed_chance: f64,
    /// Per-cell seed chance for isolated empty cells while growing.
    reseed_chance: f64,
    jitter: i32,
    growth: GrowthTuning,
}

#[derive(Debug, Clone, Copy)]
struct PortraitTuning {
    name: &'static str,
    guard: SeedGuard,
    layout: ZoneLayout,
    background: ZoneTuning,
    hair: ZoneTuning,
    face: ZoneTuning,
    torso: ZoneTuning,
    face_mirror_chance: f64,
}

impl PortraitTuning {
    const fn zone(&self, zone: Zone) -> &ZoneTuning {
        match zone {
            Zone::Background => &self.background,
            Zone::Hair => &self.hair,
            Zone::Face => &self.face,
            Zone::Torso => &self.torso,
        }
    }
}

const BACKDROP_PALETTE: &[RgbColor] = &[
    RgbColor::from_u24(0x1d_2b_53),
    RgbColor::from_u24(0x7e_25_53),
    RgbColor::from_u24(0x00_87_51),
    RgbColor::from_u24(0x5f_57_4f),
];

const DUSK_PALETTE: &[RgbColor] = &[
    RgbColor::from_u24(0x2b_1d_3a),
    RgbColor::from_u24(0x3d_2c_4f),
    RgbColor::from_u24(0x6b_4e_71),
    RgbColor::from_u24(0xa3_7c_82),
];

const ZONE_GROWTH: GrowthTuning = GrowthTuning {
    birth_neighbours: (1, 4),
    birth_chance: 0.3,
    birth_jitter: 8,
    crowd_limit: Some(8),
    darken: 0.005,
    idle_jitter: None,
    cleanup: Some(IsolatedCleanup {
        min_age: 25,
        chance: 0.05,
    }),
    mirror: false,
    ring: None,
    upper_half_bias: None,
    protect_occupied: false,
};

const BACKGROUND_GROWTH: GrowthTuning = GrowthTuning {
    birth_neighbours: (1, 3),
    birth_chance: 0.08,
    birth_jitter: 6,
    crowd_limit: Some(7),
    darken: 0.004,
    cleanup: Some(IsolatedCleanup {
        min_age: 15,
        chance: 0.1,
    }),
    ..ZONE_GROWTH
};

const FACE_GROWTH: GrowthTuning = GrowthTuning {
    birth_neighbours: (1, 5),
    birth_chance: 0.4,
    birth_jitter: 5,
    crowd_limit: None,
    darken: 0.002,
    idle_jitter: Some((0.02, 4)),
    cleanup: None,
    protect_occupied: true,
    ..ZONE_GROWTH
};

const PORTRAIT: PortraitTuning = PortraitTuning {
    name: "magicPortrait",
    guard: SeedGuard::FillBelow(0.005),
    layout: ZoneLayout {
        hair_top: 0.06,
        face_top: 0.18,
        face_bottom: 0.62,
        neck_bottom: 0.7,
        face_min_half: 0.08,
        face_max_half: 0.2,
        hair_margin: 0.05,
        neck_half: 0.06,
        torso_top_half: 0.18,
        torso_bottom_half: 0.42,
    },
    background: ZoneTuning {
        palette: BACKDROP_PALETTE,
        seed_chance: 0.02,
        reseed_chance: 0.001,
        jitter: 8,
        growth: BACKGROUND_GROWTH,
    },
    hair: ZoneTuning {
        palette: HAIR_PALETTE,
        seed_chance: 0.35,
        reseed_chance: 0.01,
        jitter: 10,
        growth: ZONE_GROWTH,
    },
    face: ZoneTuning {
        palette: SKIN_PALETTE,
        seed_chance: 0.45,
        reseed_chance: 0.02,
        jitter: 6,
        growth: FACE_GROWTH,
    },
    torso: ZoneTuning {
        palette: SHIRT_PALETTE,
        seed_chance: 0.3,
        reseed_chance: 0.01,
        jitter: 10,
        growth: ZONE_GROWTH,
    },
    face_mirror_chance: 0.6,
};

const PORTRAIT2: PortraitTuning = PortraitTuning {
    name: "magicPortrait2",
    guard: SeedGuard::Blank,
    layout: ZoneLayout {
        hair_top: 0.08,
        face_top: 0.2,
        face_bottom: 0.6,
        neck_bottom: 0.68,
        face_min_half: 0.09,
        face_max_half: 0.22,
        hair_margin: 0.06,
        neck_half: 0.07,
        torso_top_half: 0.2,
        torso_bottom_half: 0.45,
    },
    background: ZoneTuning {
        palette: DUSK_PALETTE,
        seed_chance: 0.04,
        reseed_chance: 0.002,
        jitter: 12,
        growth: BACKGROUND_GROWTH,
    },
    hair: ZoneTuning {
        palette: HAIR_PALETTE,
        seed_chance: 0.2,
        reseed_chance: 0.01,
        jitter: 14,
        growth: GrowthTuning {
            birth_chance: 0.35,
            ..ZONE_GROWTH
        },
    },
    face: ZoneTuning {
        palette: SKIN_PALETTE,
        seed_chance: 0.25,
        reseed_chance: 0.015,
        jitter: 8,
        growth: FACE_GROWTH,
    },
    torso: ZoneTuning {
        palette: SHIRT_PALETTE,
        seed_chance: 0.18,
        reseed_chance: 0.01,
        jitter: 14,
        growth: GrowthTuning {
            birth_chance: 0.35,
            ..ZONE_GROWTH
        },
    },
    face_mirror_chance: 0.85,
};

/// Eye and mouth placement as fractions of the face height and width.
const EYE_DEPTH: f64 = 0.38;
const EYE_SPREAD: f64 = 0.45;
const MOUTH_DEPTH: f64 = 0.78;
const MOUTH_SPREAD: f64 = 0.35;

fn place(
    next: &mut Grid,
    row: usize,
    col: usize,
    mirror: bool,
    cell: CellState,
) {
    if mirror {
        write_mirrored(next, row, col, cell);
    } else {
        next.set(row, col, cell);
    }
}

fn seed_portrait(prev: &Grid, tuning: &PortraitTuning, rng: &mut dyn Randomness) -> Grid {
    let (rows, cols) = prev.dimensions();
    let mut next = prev.clone();
    for (row, col) in prev.positions() {
        let zone = tuning.layout.zone_at(rows, cols, row, col);
        let zt = tuning.zone(zone);
        if !rng.chance(zt.seed_chance) {
            continue;
        }
        let Some(base) = pick(rng, zt.palette) else {
            continue;
        };
        let cell = CellState::seeded(jitter_color(base, zt.jitter, rng));
        let mirror = zone == Zone::Face && rng.chance(tuning.face_mirror_chance);
        place(&mut next, row, col, mirror, cell);
    }
    paint_features(&mut next, &tuning.layout);
    next
}

/// Eyes and mouth, placed relative to the face outline.
fn paint_features(next: &mut Grid, layout: &ZoneLayout) {
    let (rows, cols) = next.dimensions();
    if rows == 0 {
        return;
    }
    let (_, cx) = centre(rows, cols);
    let span = layout.face_bottom - layout.face_top;
    let eye_fraction = span.mul_add(EYE_DEPTH, layout.face_top);
    let mouth_fraction = span.mul_add(MOUTH_DEPTH, layout.face_top);
    let half_row = 0.5 / to_f64(rows);

    let (Some(eye_half), Some(mouth_half)) = (
        layout.face_half_width(cols, eye_fraction),
        layout.face_half_width(cols, mouth_fraction),
    ) else {
        return;
    };
    let eye_dx = eye_half * EYE_SPREAD;
    let mouth_reach = mouth_half * MOUTH_SPREAD;

    for (row, col) in next.positions() {
        let fraction = row_fraction(rows, row);
        let dx = (to_f64(col) - cx).abs();
        if (fraction - eye_fraction).abs() <= half_row && (dx - eye_dx).abs() <= 0.5 {
            next.set(row, col, CellState::seeded(EYE_COLOR));
        } else if (fraction - mouth_fraction).abs() <= half_row && dx <= mouth_reach {
            next.set(row, col, CellState::seeded(MOUTH_COLOR));
        }
    }
}

/// Grow one cell: isolated empty cells may reseed from their zone palette,
/// face cells grow mirrored by chance, everything else grows with its zone
/// tuning.
fn grow_portrait_cell(
    prev: &Grid,
    next: &mut Grid,
    row: usize,
    col: usize,
    tuning: &PortraitTuning,
    rng: &mut dyn Randomness,
) {
    let (rows, cols) = prev.dimensions();
    let zone = tuning.layout.zone_at(rows, cols, row, col);
    let zt = tuning.zone(zone);

    let isolated_empty = prev.get(row, col).is_some_and(|cell| !cell.is_colored())
        && neighbour_colors(prev, row, col).is_empty();
    if isolated_empty {
        if rng.chance(zt.reseed_chance)
            && let Some(base) = pick(rng, zt.palette)
        {
            next.set(row, col, CellState::seeded(jitter_color(base, zt.jitter, rng)));
        }
        return;
    }

    if zone == Zone::Face && rng.chance(tuning.face_mirror_chance) {
        let mirrored = GrowthTuning {
            mirror: true,
            ..zt.growth
        };
        grow_cell(prev, next, row, col, &mirrored, rng);
    } else {
        grow_cell(prev, next, row, col, &zt.growth, rng);
    }
}

fn grow_portrait(prev: &Grid, tuning: &PortraitTuning, rng: &mut dyn Randomness) -> Grid {
    let mut next = prev.clone();
    for (row, col) in prev.positions() {
        grow_portrait_cell(prev, &mut next, row, col, tuning, rng);
    }
    next
}

fn portrait_step(prev: &Grid, tuning: &PortraitTuning, rng: &mut dyn Randomness) -> Grid {
    match Phase::detect(prev, tuning.guard) {
        Phase::Seeding => {
            debug!(rule = tuning.name, fill = prev.fill_ratio(), "Seeding portrait");
            seed_portrait(prev, tuning, rng)
        }
        Phase::Growing => grow_portrait(prev, tuning, rng),
    }
}

/// Structured zoned portrait; reseeds while the canvas is nearly empty.
pub fn magic_portrait(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    portrait_step(prev, &PORTRAIT, rng)
}

/// Sparser, wider-faced portrait; seeds only on a blank canvas.
pub fn magic_portrait2(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    portrait_step(prev, &PORTRAIT2, rng)
}
