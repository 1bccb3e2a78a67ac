//! Headless driver for the Sprout pixel-growth engine.
//!
//! Loads configuration, paints the configured seed cells, and steps the
//! canvas at the configured cadence until a stop condition is met or
//! Ctrl-C is pressed.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `sprout-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Create the canvas and paint seed cells
//! 4. Install the Ctrl-C handler
//! 5. Run the step loop
//! 6. Log the result and emit the final canvas

mod error;
mod log_callback;
mod render;

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use sprout_core::canvas::Canvas;
use sprout_core::config::{LoggingConfig, SproutConfig};
use sprout_core::runner;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::log_callback::LogCallback;

const CONFIG_PATH: &str = "sprout-config.yaml";

/// Info-level progress report interval, in steps.
const PROGRESS_EVERY: u64 = 25;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the final output cannot
/// be written.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration. Logging depends on it, so this comes first.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging);
    info!("sprout-engine starting");
    if !from_file {
        info!(path = CONFIG_PATH, "Config file not found, using defaults");
    }
    info!(
        rows = config.canvas.rows,
        cols = config.canvas.cols,
        rule = config.canvas.rule,
        seed = config.randomness.seed,
        seeds = config.seeds.len(),
        "Configuration loaded"
    );

    // 3. Create the canvas.
    let mut canvas = Canvas::from_config(&config);

    // 4. Ctrl-C raises the stop flag; the loop notices before its next step.
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Ctrl-C received, stopping after the current step");
                    stop.store(true, Ordering::Release);
                }
                Err(e) => warn!(error = %e, "failed to listen for Ctrl-C"),
            }
        });
    }

    // 5. Run.
    let mut callback = LogCallback::new(PROGRESS_EVERY);
    let result = runner::run_paced(&mut canvas, &config.run, &mut callback, &stop).await;

    // 6. Report.
    runner::log_run_end(&result);
    emit_output(&config, &canvas)?;

    info!(
        end_reason = ?result.end_reason,
        total_steps = result.total_steps,
        peak_colored = callback.peak_colored(),
        "sprout-engine shutdown complete"
    );

    Ok(())
}

/// Load `sprout-config.yaml` from the working directory.
///
/// Returns the config and whether it came from the file.
fn load_config() -> Result<(SproutConfig, bool), EngineError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok((SproutConfig::from_file(config_path)?, true))
    } else {
        let mut config = SproutConfig::default();
        config.canvas.apply_env_overrides();
        Ok((config, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Print and/or save the final canvas.
fn emit_output(config: &SproutConfig, canvas: &Canvas) -> Result<(), EngineError> {
    if config.output.ascii {
        print!("{}", render::ascii_art(canvas.grid()));
    }
    if let Some(path) = &config.output.snapshot_path {
        let json = render::snapshot_json(canvas)?;
        std::fs::write(path, json).map_err(|source| EngineError::Output {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), "Snapshot written");
    }
    Ok(())
}
