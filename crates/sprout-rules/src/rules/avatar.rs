//! Figure rules: paint a character once, then let it grow.
//!
//! Both rules are two-phase (see [`crate::phase`]). [`avatar`] paints a
//! structured figure (head ellipse with outline, eyes, mouth, torso, arms,
//! legs) whenever the canvas is nearly empty. [`avatar2`] paints a loose,
//! painterly silhouette from randomized strokes, but only on a blank canvas.
//! Between seedings both grow mirrored clusters inside a ring around the
//! centre.

use sprout_types::{CellState, Grid, RgbColor};
use tracing::debug;

use super::growth::{GrowthTuning, IsolatedCleanup, grow_grid};
use crate::color::jitter_color;
use crate::phase::{Phase, SeedGuard};
use crate::random::{Randomness, pick};
use crate::shape::{Ring, centre, row_fraction, to_f64};

pub(super) const SKIN_PALETTE: &[RgbColor] = &[
    RgbColor::from_u24(0xf1_c2_7d),
    RgbColor::from_u24(0xe0_ac_69),
    RgbColor::from_u24(0xc6_86_42),
    RgbColor::from_u24(0x8d_55_24),
    RgbColor::from_u24(0xff_db_ac),
];

pub(super) const HAIR_PALETTE: &[RgbColor] = &[
    RgbColor::from_u24(0x2c_1b_18),
    RgbColor::from_u24(0x4a_31_2c),
    RgbColor::from_u24(0xb5_52_39),
    RgbColor::from_u24(0xe6_ce_a8),
    RgbColor::from_u24(0x1c_1c_1c),
];

pub(super) const SHIRT_PALETTE: &[RgbColor] = &[
    RgbColor::from_u24(0x3f_51_b5),
    RgbColor::from_u24(0xe9_1e_63),
    RgbColor::from_u24(0x00_96_88),
    RgbColor::from_u24(0xff_98_00),
    RgbColor::from_u24(0x60_7d_8b),
];

const PANTS_PALETTE: &[RgbColor] = &[
    RgbColor::from_u24(0x26_32_38),
    RgbColor::from_u24(0x3e_27_23),
    RgbColor::from_u24(0x1a_23_7e),
];

pub(super) const EYE_COLOR: RgbColor = RgbColor::from_u24(0x1b_1b_1b);
pub(super) const MOUTH_COLOR: RgbColor = RgbColor::from_u24(0xb7_1c_1c);

const AVATAR_GUARD: SeedGuard = SeedGuard::FillBelow(0.005);
const AVATAR2_GUARD: SeedGuard = SeedGuard::Blank;

const AVATAR_GROWTH: GrowthTuning = GrowthTuning {
    birth_neighbours: (1, 3),
    birth_chance: 0.25,
    birth_jitter: 8,
    crowd_limit: None,
    darken: 0.004,
    idle_jitter: None,
    cleanup: Some(IsolatedCleanup {
        min_age: 30,
        chance: 0.05,
    }),
    mirror: true,
    ring: Some(Ring::new(0.0, 0.48)),
    upper_half_bias: None,
    protect_occupied: false,
};

const AVATAR2_GROWTH: GrowthTuning = GrowthTuning {
    birth_neighbours: (2, 4),
    birth_chance: 0.3,
    birth_jitter: 10,
    crowd_limit: None,
    darken: 0.005,
    idle_jitter: Some((0.03, 5)),
    cleanup: Some(IsolatedCleanup {
        min_age: 20,
        chance: 0.08,
    }),
    mirror: true,
    ring: Some(Ring::new(0.10, 0.50)),
    upper_half_bias: Some(0.45),
    protect_occupied: false,
};

// ---------------------------------------------------------------------------
// Structured figure
// ---------------------------------------------------------------------------

/// The parts of the structured figure, in paint priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Eye,
    Mouth,
    Skin,
    Outline,
    Shirt,
    Arm,
    Pants,
}

/// Figure measurements for one grid size, in fractional cell units.
#[derive(Debug, Clone, Copy)]
struct FigureGeometry {
    cx: f64,
    head_cy: f64,
    head_ry: f64,
    head_rx: f64,
    eye_row: f64,
    eye_dx: f64,
    mouth_row: f64,
    mouth_half: f64,
    torso_top: f64,
    torso_bottom: f64,
    torso_half: f64,
    arm_bottom: f64,
    arm_width: f64,
    leg_bottom: f64,
    leg_dx: f64,
    leg_half: f64,
}

/// Normalized ellipse distance at which the head outline ends.
const OUTLINE_REACH: f64 = 1.4;

impl FigureGeometry {
    fn new(rows: usize, cols: usize) -> Self {
        let (height, width) = (to_f64(rows), to_f64(cols));
        let (_, cx) = centre(rows, cols);
        let head_cy = height * 0.26;
        let head_ry = height * 0.15;
        let head_rx = width * 0.15;
        Self {
            cx,
            head_cy,
            head_ry,
            head_rx,
            eye_row: head_ry.mul_add(-0.2, head_cy),
            eye_dx: head_rx * 0.4,
            mouth_row: head_ry.mul_add(0.5, head_cy),
            mouth_half: head_rx * 0.3,
            torso_top: head_ry.mul_add(OUTLINE_REACH.sqrt(), head_cy),
            torso_bottom: height * 0.72,
            torso_half: width * 0.18,
            arm_bottom: height * 0.66,
            arm_width: (width * 0.06).max(1.0),
            leg_bottom: height * 0.95,
            leg_dx: width * 0.08,
            leg_half: (width * 0.05).max(0.5),
        }
    }

    fn head_distance(&self, y: f64, dx: f64) -> Option<f64> {
        if self.head_ry <= 0.0 || self.head_rx <= 0.0 {
            return None;
        }
        let ny = (y - self.head_cy) / self.head_ry;
        let nx = dx / self.head_rx;
        Some(ny.mul_add(ny, nx * nx))
    }

    fn part_at(&self, row: usize, col: usize) -> Option<Part> {
        let y = to_f64(row);
        let dx = (to_f64(col) - self.cx).abs();

        if let Some(distance) = self.head_distance(y, dx) {
            if distance <= 1.0 {
                if (y - self.eye_row).abs() <= 0.5 && (dx - self.eye_dx).abs() <= 0.5 {
                    return Some(Part::Eye);
                }
                if (y - self.mouth_row).abs() <= 0.5 && dx <= self.mouth_half {
                    return Some(Part::Mouth);
                }
                return Some(Part::Skin);
            }
            if distance <= OUTLINE_REACH {
                return Some(Part::Outline);
            }
        }

        let in_torso_rows = y >= self.torso_top && y < self.torso_bottom;
        if in_torso_rows && dx <= self.torso_half {
            return Some(Part::Shirt);
        }
        if y > self.torso_top
            && y < self.arm_bottom
            && dx > self.torso_half
            && dx <= self.torso_half + self.arm_width
        {
            return Some(Part::Arm);
        }
        if y >= self.torso_bottom
            && y < self.leg_bottom
            && (dx - self.leg_dx).abs() <= self.leg_half
        {
            return Some(Part::Pants);
        }
        None
    }
}

/// Colors chosen once per seeding.
#[derive(Debug, Clone, Copy)]
struct Outfit {
    skin: RgbColor,
    hair: RgbColor,
    shirt: RgbColor,
    pants: RgbColor,
}

impl Outfit {
    fn pick(rng: &mut dyn Randomness) -> Self {
        Self {
            skin: pick(rng, SKIN_PALETTE).unwrap_or(RgbColor::WHITE),
            hair: pick(rng, HAIR_PALETTE).unwrap_or(RgbColor::BLACK),
            shirt: pick(rng, SHIRT_PALETTE).unwrap_or(RgbColor::WHITE),
            pants: pick(rng, PANTS_PALETTE).unwrap_or(RgbColor::BLACK),
        }
    }

    const fn color(&self, part: Part) -> RgbColor {
        match part {
            Part::Eye => EYE_COLOR,
            Part::Mouth => MOUTH_COLOR,
            Part::Skin | Part::Arm => self.skin,
            Part::Outline => self.hair,
            Part::Shirt => self.shirt,
            Part::Pants => self.pants,
        }
    }
}

fn paint_figure(next: &mut Grid, rng: &mut dyn Randomness) {
    let geometry = FigureGeometry::new(next.rows(), next.cols());
    let outfit = Outfit::pick(rng);
    for (row, col) in next.positions() {
        if let Some(part) = geometry.part_at(row, col) {
            next.set(row, col, CellState::seeded(outfit.color(part)));
        }
    }
}

/// Structured figure on a near-empty canvas, ring-gated mirrored growth
/// otherwise.
pub fn avatar(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    match Phase::detect(prev, AVATAR_GUARD) {
        Phase::Seeding => {
            debug!(rule = "avatar", fill = prev.fill_ratio(), "Seeding figure");
            let mut next = prev.clone();
            paint_figure(&mut next, rng);
            next
        }
        Phase::Growing => grow_grid(prev, &AVATAR_GROWTH, rng),
    }
}

// ---------------------------------------------------------------------------
// Painterly silhouette
// ---------------------------------------------------------------------------

/// Vertical bands of the stroked silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Band {
    Hair,
    Head,
    Neck,
    Torso,
}

const HEAD_TOP: f64 = 0.12;
const HAIR_BOTTOM: f64 = 0.18;
const HEAD_BOTTOM: f64 = 0.42;
const NECK_BOTTOM: f64 = 0.5;
const TORSO_BOTTOM: f64 = 0.95;

const STROKE_JITTER: i32 = 10;

/// Band and nominal half-width (as a fraction of the width) at a row
/// fraction.
fn silhouette(fraction: f64) -> Option<(Band, f64)> {
    if fraction < HEAD_TOP {
        return None;
    }
    if fraction < HEAD_BOTTOM {
        let mid = f64::midpoint(HEAD_TOP, HEAD_BOTTOM);
        let radius = (HEAD_BOTTOM - HEAD_TOP) / 2.0;
        let t = (fraction - mid) / radius;
        let half = 0.16 * t.mul_add(-t, 1.0).max(0.0).sqrt();
        let band = if fraction < HAIR_BOTTOM { Band::Hair } else { Band::Head };
        return Some((band, half));
    }
    if fraction < NECK_BOTTOM {
        return Some((Band::Neck, 0.06));
    }
    if fraction < TORSO_BOTTOM {
        let spread = (fraction - NECK_BOTTOM) / (TORSO_BOTTOM - NECK_BOTTOM);
        return Some((Band::Torso, spread.mul_add(0.1, 0.22)));
    }
    None
}

fn paint_strokes(next: &mut Grid, rng: &mut dyn Randomness) {
    let (rows, cols) = next.dimensions();
    let (_, cx) = centre(rows, cols);
    let width = to_f64(cols);
    let outfit = Outfit::pick(rng);

    for row in 0..rows {
        let Some((band, half)) = silhouette(row_fraction(rows, row)) else {
            continue;
        };
        let base = match band {
            Band::Hair => outfit.hair,
            Band::Head | Band::Neck => outfit.skin,
            Band::Torso => outfit.shirt,
        };
        // Each row is one stroke with its own width, offset, and density.
        let stroke_half = width * half * rng.next_f64().mul_add(0.3, 0.85);
        let offset = f64::from(rng.int_between(-1, 1));
        let density = rng.next_f64().mul_add(0.35, 0.6);

        for col in 0..cols {
            if (to_f64(col) - cx - offset).abs() > stroke_half {
                continue;
            }
            if rng.chance(density) {
                let color = jitter_color(base, STROKE_JITTER, rng);
                next.set(row, col, CellState::seeded(color));
            }
        }
    }
}

/// Painterly silhouette on a blank canvas, lower-weighted ring growth
/// otherwise.
pub fn avatar2(prev: &Grid, rng: &mut dyn Randomness) -> Grid {
    match Phase::detect(prev, AVATAR2_GUARD) {
        Phase::Seeding => {
            debug!(rule = "avatar2", "Seeding silhouette");
            let mut next = prev.clone();
            paint_strokes(&mut next, rng);
            next
        }
        Phase::Growing => grow_grid(prev, &AVATAR2_GROWTH, rng),
    }
}
