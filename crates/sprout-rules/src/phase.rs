//! Seed-then-grow state machine for the figure and portrait rules.
//!
//! Each step, a two-phase rule inspects the incoming grid once. While the
//! grid is judged near-empty the rule is [`Phase::Seeding`]: it paints its
//! figure into the output and skips growth for that step. Otherwise it is
//! [`Phase::Growing`].

use sprout_types::Grid;

/// When a two-phase rule should (re)seed its figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedGuard {
    /// Seed while the fill ratio is strictly below the threshold.
    FillBelow(f64),
    /// Seed only when no cell is colored.
    Blank,
}

impl SeedGuard {
    /// Whether `grid` satisfies the seeding condition.
    pub fn wants_seed(self, grid: &Grid) -> bool {
        match self {
            Self::FillBelow(threshold) => grid.fill_ratio() < threshold,
            Self::Blank => grid.is_blank(),
        }
    }
}

/// The active phase of a two-phase rule for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Place the figure; no growth this step.
    Seeding,
    /// Run neighbourhood growth.
    Growing,
}

impl Phase {
    /// Decide the phase for `grid` under `guard`.
    pub fn detect(grid: &Grid, guard: SeedGuard) -> Self {
        if guard.wants_seed(grid) {
            Self::Seeding
        } else {
            Self::Growing
        }
    }
}

#[cfg(test)]
mod tests {
    use sprout_types::{CellState, RgbColor};

    use super::*;

    #[test]
    fn blank_guard_requires_no_color() {
        let mut grid = Grid::new(10, 10);
        assert_eq!(Phase::detect(&grid, SeedGuard::Blank), Phase::Seeding);
        grid.set(3, 3, CellState::seeded(RgbColor::WHITE));
        assert_eq!(Phase::detect(&grid, SeedGuard::Blank), Phase::Growing);
    }

    #[test]
    fn fill_guard_uses_ratio() {
        // One colored cell in 400 is a ratio of 0.0025.
        let mut grid = Grid::new(20, 20);
        grid.set(0, 0, CellState::seeded(RgbColor::WHITE));
        assert_eq!(
            Phase::detect(&grid, SeedGuard::FillBelow(0.005)),
            Phase::Seeding
        );
        grid.set(0, 1, CellState::seeded(RgbColor::WHITE));
        // Two in 400 is exactly 0.005, which no longer seeds.
        assert_eq!(
            Phase::detect(&grid, SeedGuard::FillBelow(0.005)),
            Phase::Growing
        );
    }
}
