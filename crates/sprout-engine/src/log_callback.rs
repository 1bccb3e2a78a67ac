//! Step callback that reports progress through `tracing`.

use sprout_core::canvas::StepSummary;
use sprout_core::runner::StepCallback;
use sprout_types::Grid;
use tracing::{debug, info};

/// Logs every step at debug level and every `every`-th step at info level.
#[derive(Debug, Clone)]
pub struct LogCallback {
    every: u64,
    peak_colored: usize,
}

impl LogCallback {
    /// Create a callback that reports at info level every `every` steps.
    /// Zero disables the periodic report.
    pub const fn new(every: u64) -> Self {
        Self {
            every,
            peak_colored: 0,
        }
    }

    /// The largest colored-cell count seen so far.
    pub const fn peak_colored(&self) -> usize {
        self.peak_colored
    }
}

impl StepCallback for LogCallback {
    fn on_step(&mut self, summary: &StepSummary, grid: &Grid) {
        self.peak_colored = self.peak_colored.max(summary.colored_after);

        debug!(
            step = summary.step,
            rule = summary.rule.as_str(),
            colored_before = summary.colored_before,
            colored_after = summary.colored_after,
            "Step complete"
        );

        if self.every > 0 && summary.step.checked_rem(self.every) == Some(0) {
            info!(
                step = summary.step,
                rule = summary.rule.as_str(),
                colored = summary.colored_after,
                cells = grid.len(),
                fill = summary.fill_ratio,
                "Progress"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use sprout_types::RuleName;

    use super::*;

    fn summary(step: u64, colored_after: usize) -> StepSummary {
        StepSummary {
            step,
            rule: RuleName::Moss,
            colored_before: 0,
            colored_after,
            fill_ratio: 0.0,
        }
    }

    #[test]
    fn tracks_peak_colored() {
        let grid = Grid::new(4, 4);
        let mut callback = LogCallback::new(0);
        for (step, colored) in [(1, 3), (2, 9), (3, 4)] {
            callback.on_step(&summary(step, colored), &grid);
        }
        assert_eq!(callback.peak_colored(), 9);
    }
}
