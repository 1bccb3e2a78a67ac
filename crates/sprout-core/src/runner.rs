//! Bounded run loop over a [`Canvas`].
//!
//! [`run_steps`] drives the canvas as fast as it can; [`run_paced`] waits
//! `tick_interval_ms` between steps and honours a stop flag so a driver can
//! interrupt it cleanly. Both stop at `max_steps`, and optionally as soon as
//! the canvas saturates or a non-empty canvas dies out.

use std::sync::atomic::{AtomicBool, Ordering};

use sprout_types::Grid;
use tokio::time::{Duration, MissedTickBehavior};
use tracing::info;

use crate::canvas::{Canvas, StepSummary};
use crate::config::RunConfig;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEndReason {
    /// `max_steps` steps were executed.
    MaxSteps,
    /// Every cell is colored.
    Saturated,
    /// A step emptied a canvas that had colored cells.
    Extinct,
    /// The stop flag was raised.
    Interrupted,
}

/// Result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    /// The reason the run ended.
    pub end_reason: RunEndReason,
    /// The last step summary, if any step completed.
    pub final_summary: Option<StepSummary>,
    /// Total number of steps executed.
    pub total_steps: u64,
}

/// Callback invoked after each step.
pub trait StepCallback {
    /// Called after a step completes, with the canvas grid it produced.
    fn on_step(&mut self, summary: &StepSummary, grid: &Grid);
}

/// A no-op step callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl StepCallback for NoOpCallback {
    fn on_step(&mut self, _summary: &StepSummary, _grid: &Grid) {}
}

/// The early-stop condition met by `summary`, if any.
fn early_stop(summary: &StepSummary, limits: &RunConfig, cells: usize) -> Option<RunEndReason> {
    if limits.stop_when_saturated && cells > 0 && summary.colored_after == cells {
        info!(step = summary.step, "Canvas saturated");
        return Some(RunEndReason::Saturated);
    }
    if limits.stop_when_extinct && summary.colored_before > 0 && summary.colored_after == 0 {
        info!(step = summary.step, "Canvas died out");
        return Some(RunEndReason::Extinct);
    }
    None
}

/// Execute one step and decide whether the run is over.
fn advance(
    canvas: &mut Canvas,
    limits: &RunConfig,
    callback: &mut dyn StepCallback,
    total_steps: &mut u64,
) -> (StepSummary, Option<RunEndReason>) {
    let summary = canvas.step();
    *total_steps = total_steps.saturating_add(1);
    callback.on_step(&summary, canvas.grid());

    let end = early_stop(&summary, limits, canvas.grid().len()).or_else(|| {
        (*total_steps >= limits.max_steps).then_some(RunEndReason::MaxSteps)
    });
    (summary, end)
}

/// Run the canvas without pacing until a stop condition is met.
pub fn run_steps(
    canvas: &mut Canvas,
    limits: &RunConfig,
    callback: &mut dyn StepCallback,
) -> RunResult {
    let mut total_steps: u64 = 0;
    let mut last_summary: Option<StepSummary> = None;

    while total_steps < limits.max_steps {
        let (summary, end) = advance(canvas, limits, callback, &mut total_steps);
        if let Some(end_reason) = end {
            return RunResult {
                end_reason,
                final_summary: Some(summary),
                total_steps,
            };
        }
        last_summary = Some(summary);
    }

    RunResult {
        end_reason: RunEndReason::MaxSteps,
        final_summary: last_summary,
        total_steps,
    }
}

/// Run the canvas, waiting `tick_interval_ms` between steps.
///
/// `stop` is checked before every step; raising it ends the run with
/// [`RunEndReason::Interrupted`].
pub async fn run_paced(
    canvas: &mut Canvas,
    limits: &RunConfig,
    callback: &mut dyn StepCallback,
    stop: &AtomicBool,
) -> RunResult {
    let mut total_steps: u64 = 0;
    let mut last_summary: Option<StepSummary> = None;

    info!(
        rule = canvas.rule().as_str(),
        max_steps = limits.max_steps,
        tick_interval_ms = limits.tick_interval_ms,
        "Run starting"
    );

    let mut pacing = (limits.tick_interval_ms > 0).then(|| {
        let mut interval = tokio::time::interval(Duration::from_millis(limits.tick_interval_ms));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval
    });

    while total_steps < limits.max_steps {
        if let Some(interval) = pacing.as_mut() {
            interval.tick().await;
        }

        if stop.load(Ordering::Acquire) {
            info!(step = total_steps, "Stop requested");
            return RunResult {
                end_reason: RunEndReason::Interrupted,
                final_summary: last_summary,
                total_steps,
            };
        }

        let (summary, end) = advance(canvas, limits, callback, &mut total_steps);
        if let Some(end_reason) = end {
            return RunResult {
                end_reason,
                final_summary: Some(summary),
                total_steps,
            };
        }
        last_summary = Some(summary);
    }

    RunResult {
        end_reason: RunEndReason::MaxSteps,
        final_summary: last_summary,
        total_steps,
    }
}

/// Log the outcome of a run.
pub fn log_run_end(result: &RunResult) {
    info!(
        reason = ?result.end_reason,
        total_steps = result.total_steps,
        final_rule = result.final_summary.as_ref().map(|s| s.rule.as_str()),
        final_colored = result.final_summary.as_ref().map(|s| s.colored_after),
        final_fill = result.final_summary.as_ref().map(|s| s.fill_ratio),
        "Run ended"
    );
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sprout_rules::SequenceRandomness;
    use sprout_types::{RgbColor, RuleName};

    use super::*;

    const UNBOUNDED: RunConfig = RunConfig {
        max_steps: 25,
        tick_interval_ms: 0,
        stop_when_saturated: false,
        stop_when_extinct: false,
    };

    struct Recorder {
        steps: Vec<u64>,
    }

    impl StepCallback for Recorder {
        fn on_step(&mut self, summary: &StepSummary, grid: &Grid) {
            assert_eq!(summary.colored_after, grid.colored_count());
            self.steps.push(summary.step);
        }
    }

    fn canvas(rule: RuleName) -> Canvas {
        let mut canvas = Canvas::new(5, 5, rule, Box::new(SequenceRandomness::constant(0.5)));
        canvas.paint(2, 2, RgbColor::new(0, 0, 255));
        canvas
    }

    #[test]
    fn runs_to_max_steps() {
        let mut canvas = canvas(RuleName::Crystal);
        let mut recorder = Recorder { steps: Vec::new() };
        let result = run_steps(&mut canvas, &UNBOUNDED, &mut recorder);

        assert_eq!(result.end_reason, RunEndReason::MaxSteps);
        assert_eq!(result.total_steps, 25);
        assert_eq!(recorder.steps, (1..=25).collect::<Vec<_>>());
        assert_eq!(result.final_summary.unwrap().step, 25);
    }

    #[test]
    fn zero_steps_runs_nothing() {
        let mut canvas = canvas(RuleName::Moss);
        let limits = RunConfig {
            max_steps: 0,
            ..UNBOUNDED
        };
        let result = run_steps(&mut canvas, &limits, &mut NoOpCallback);
        assert_eq!(result.total_steps, 0);
        assert_eq!(result.final_summary, None);
        assert_eq!(canvas.steps_taken(), 0);
    }

    #[test]
    fn stops_when_saturated() {
        // Snowfall with rolls of 0.5 never grows; lava at 0.1 fills fast.
        let mut snow = canvas(RuleName::Snowfall);
        let rng = Box::new(SequenceRandomness::constant(0.1));
        let mut canvas_lava = Canvas::new(5, 5, RuleName::Lava, rng);
        canvas_lava.paint(2, 2, RgbColor::new(255, 0, 0));
        let limits = RunConfig {
            stop_when_saturated: true,
            ..UNBOUNDED
        };

        let result = run_steps(&mut canvas_lava, &limits, &mut NoOpCallback);
        assert_eq!(result.end_reason, RunEndReason::Saturated);
        assert_eq!(result.total_steps, 2);

        let result = run_steps(&mut snow, &limits, &mut NoOpCallback);
        assert_eq!(result.end_reason, RunEndReason::MaxSteps);
    }

    #[test]
    fn stops_when_extinct() {
        // Chaos with every roll succeeding clears the only cell.
        let rng = Box::new(SequenceRandomness::constant(0.0));
        let mut canvas = Canvas::new(1, 1, RuleName::Chaos, rng);
        canvas.paint(0, 0, RgbColor::WHITE);
        let limits = RunConfig {
            stop_when_extinct: true,
            ..UNBOUNDED
        };
        let result = run_steps(&mut canvas, &limits, &mut NoOpCallback);
        assert_eq!(result.end_reason, RunEndReason::Extinct);
        assert_eq!(result.total_steps, 1);
    }

    #[tokio::test]
    async fn paced_run_honours_stop_flag() {
        let mut canvas = canvas(RuleName::Moss);
        let stop = AtomicBool::new(true);
        let result = run_paced(&mut canvas, &UNBOUNDED, &mut NoOpCallback, &stop).await;
        assert_eq!(result.end_reason, RunEndReason::Interrupted);
        assert_eq!(result.total_steps, 0);
    }

    #[tokio::test]
    async fn paced_run_completes() {
        let mut canvas = canvas(RuleName::Coral);
        let limits = RunConfig {
            max_steps: 3,
            tick_interval_ms: 1,
            ..UNBOUNDED
        };
        let stop = AtomicBool::new(false);
        let result = run_paced(&mut canvas, &limits, &mut NoOpCallback, &stop).await;
        assert_eq!(result.end_reason, RunEndReason::MaxSteps);
        assert_eq!(result.total_steps, 3);
        assert_eq!(canvas.steps_taken(), 3);
    }
}
