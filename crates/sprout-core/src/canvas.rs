//! The canvas session: single owner of the current grid.
//!
//! A [`Canvas`] holds the grid slot, the selected rule, the step counter, and
//! the random source. Every mutation takes `&mut self`, so one writer at a
//! time is enforced by the borrow checker. A step replaces the grid
//! wholesale with the rule's output; painting writes cells directly and
//! resets their age.

use core::fmt;

use sprout_rules::{Randomness, SeededRandomness, ThreadRandomness, resolve_rule};
use sprout_types::{CellState, Grid, RgbColor, RuleName};
use tracing::{debug, info};

use crate::config::SproutConfig;

/// What one step did.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSummary {
    /// The step number that was executed (1-based).
    pub step: u64,
    /// The rule that produced the new grid.
    pub rule: RuleName,
    /// Colored cells before the step.
    pub colored_before: usize,
    /// Colored cells after the step.
    pub colored_after: usize,
    /// Fraction of colored cells after the step.
    pub fill_ratio: f64,
}

/// A growing pixel canvas.
pub struct Canvas {
    grid: Grid,
    rule: RuleName,
    steps: u64,
    rng: Box<dyn Randomness>,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("rows", &self.grid.rows())
            .field("cols", &self.grid.cols())
            .field("rule", &self.rule)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

impl Canvas {
    /// Create a blank canvas.
    pub fn new(rows: usize, cols: usize, rule: RuleName, rng: Box<dyn Randomness>) -> Self {
        info!(rows, cols, rule = rule.as_str(), "Canvas created");
        Self {
            grid: Grid::new(rows, cols),
            rule,
            steps: 0,
            rng,
        }
    }

    /// Create a canvas from configuration and paint its seed cells.
    ///
    /// A configured seed gives a reproducible run; otherwise the thread RNG
    /// is used. Seed colors that fail to parse are painted white.
    pub fn from_config(config: &SproutConfig) -> Self {
        let rng: Box<dyn Randomness> = match config.randomness.seed {
            Some(seed) => Box::new(SeededRandomness::new(seed)),
            None => Box::new(ThreadRandomness::new()),
        };
        let rule = resolve_rule(&config.canvas.rule);
        let mut canvas = Self::new(config.canvas.rows, config.canvas.cols, rule, rng);
        for seed in &config.seeds {
            canvas.paint_hex(seed.row, seed.col, &seed.color);
        }
        canvas
    }

    /// The current grid.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The selected rule.
    pub const fn rule(&self) -> RuleName {
        self.rule
    }

    /// Steps executed so far.
    pub const fn steps_taken(&self) -> u64 {
        self.steps
    }

    /// Select the rule for subsequent steps.
    pub fn set_rule(&mut self, rule: RuleName) {
        if rule != self.rule {
            debug!(from = self.rule.as_str(), to = rule.as_str(), "Rule changed");
        }
        self.rule = rule;
    }

    /// Select a rule by identifier; unknown identifiers select moss.
    pub fn set_rule_named(&mut self, name: &str) -> RuleName {
        let rule = resolve_rule(name);
        self.set_rule(rule);
        rule
    }

    /// Advance the canvas by one step under the selected rule.
    pub fn step(&mut self) -> StepSummary {
        let colored_before = self.grid.colored_count();
        self.grid = sprout_rules::step(self.rule, &self.grid, self.rng.as_mut());
        self.steps = self.steps.saturating_add(1);

        StepSummary {
            step: self.steps,
            rule: self.rule,
            colored_before,
            colored_after: self.grid.colored_count(),
            fill_ratio: self.grid.fill_ratio(),
        }
    }

    /// Paint one cell. Returns `false` when the cell is outside the canvas.
    pub fn paint(&mut self, row: usize, col: usize, color: RgbColor) -> bool {
        self.grid.set(row, col, CellState::seeded(color))
    }

    /// Paint one cell from hex text, falling back to white.
    pub fn paint_hex(&mut self, row: usize, col: usize, hex: &str) -> bool {
        self.paint(row, col, RgbColor::from_hex(hex))
    }

    /// Clear one cell. Returns `false` when the cell is outside the canvas.
    pub fn erase(&mut self, row: usize, col: usize) -> bool {
        self.grid.set(row, col, CellState::EMPTY)
    }

    /// Clear every cell. The rule and step counter are kept.
    pub fn clear(&mut self) {
        self.grid = Grid::new(self.grid.rows(), self.grid.cols());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sprout_rules::SequenceRandomness;

    use super::*;

    fn scripted(rows: usize, cols: usize, rule: RuleName) -> Canvas {
        Canvas::new(rows, cols, rule, Box::new(SequenceRandomness::constant(0.5)))
    }

    #[test]
    fn new_canvas_is_blank() {
        let canvas = scripted(4, 6, RuleName::Moss);
        assert_eq!(canvas.grid().dimensions(), (4, 6));
        assert!(canvas.grid().is_blank());
        assert_eq!(canvas.steps_taken(), 0);
    }

    #[test]
    fn step_replaces_grid_and_reports() {
        let mut canvas = scripted(3, 3, RuleName::Moss);
        assert!(canvas.paint(1, 1, RgbColor::new(0, 200, 0)));

        let summary = canvas.step();
        assert_eq!(summary.step, 1);
        assert_eq!(summary.rule, RuleName::Moss);
        assert_eq!(summary.colored_before, 1);
        assert_eq!(summary.colored_after, 9);
        assert!((summary.fill_ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(canvas.grid().get(1, 1).unwrap().age, 1);
        assert_eq!(canvas.steps_taken(), 1);
    }

    #[test]
    fn painting_resets_age_and_ignores_outside_cells() {
        let mut canvas = scripted(3, 3, RuleName::Moss);
        canvas.paint(1, 1, RgbColor::WHITE);
        canvas.step();
        assert!(canvas.paint_hex(1, 1, "#123456"));
        assert_eq!(
            canvas.grid().get(1, 1),
            Some(&CellState::seeded(RgbColor::new(0x12, 0x34, 0x56)))
        );
        assert!(!canvas.paint(3, 0, RgbColor::WHITE));
        assert!(!canvas.erase(0, 3));
    }

    #[test]
    fn bad_hex_paints_white() {
        let mut canvas = scripted(2, 2, RuleName::Moss);
        canvas.paint_hex(0, 1, "#zzz");
        assert_eq!(canvas.grid().get(0, 1).unwrap().color, Some(RgbColor::WHITE));
    }

    #[test]
    fn erase_and_clear() {
        let mut canvas = scripted(2, 2, RuleName::Crystal);
        canvas.paint(0, 0, RgbColor::BLACK);
        canvas.paint(1, 1, RgbColor::BLACK);
        assert!(canvas.erase(0, 0));
        assert_eq!(canvas.grid().colored_count(), 1);
        canvas.step();
        canvas.clear();
        assert!(canvas.grid().is_blank());
        assert_eq!(canvas.rule(), RuleName::Crystal);
        assert_eq!(canvas.steps_taken(), 1);
    }

    #[test]
    fn unknown_rule_name_selects_moss() {
        let mut canvas = scripted(2, 2, RuleName::Lava);
        assert_eq!(canvas.set_rule_named("magicDrawAura"), RuleName::MagicDrawAura);
        assert_eq!(canvas.set_rule_named("glitter"), RuleName::Moss);
        assert_eq!(canvas.rule(), RuleName::Moss);
    }

    #[test]
    fn seeded_config_is_reproducible() {
        let yaml = "canvas: { rows: 12, cols: 12, rule: chaos }\n\
                    randomness: { seed: 42 }\n\
                    seeds:\n  - { row: 6, col: 6, color: \"#4caf50\" }\n";
        let config = SproutConfig::parse(yaml).unwrap();
        let mut a = Canvas::from_config(&config);
        let mut b = Canvas::from_config(&config);
        assert_eq!(a.grid().colored_count(), 1);
        for _ in 0..10 {
            a.step();
            b.step();
        }
        assert_eq!(a.grid(), b.grid());
    }
}
