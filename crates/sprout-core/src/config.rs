//! Configuration loading and typed config structures for Sprout.
//!
//! The canonical configuration lives in `sprout-config.yaml` at the project
//! root. Every field has a default, so an empty file (or no file at all)
//! yields a runnable 32x32 moss canvas.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use sprout_types::RgbColor;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an unusable canvas.
    #[error("invalid config: {reason}")]
    Invalid {
        /// What was wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration, mirroring `sprout-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SproutConfig {
    /// Canvas size and initial rule.
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Run length and pacing.
    #[serde(default)]
    pub run: RunConfig,

    /// Random number source.
    #[serde(default)]
    pub randomness: RandomnessConfig,

    /// Cells painted before the first step.
    #[serde(default)]
    pub seeds: Vec<SeedCell>,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// What to emit once the run ends.
    #[serde(default)]
    pub output: OutputConfig,
}

impl SproutConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `SPROUT_RULE` overrides `canvas.rule` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.canvas.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check the parsed values.
    ///
    /// Zero dimensions, seed cells outside the canvas, and seed colors that
    /// are not `#rgb` / `#rrggbb` are rejected. Unknown rule names are not:
    /// they run as moss.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let CanvasConfig { rows, cols, .. } = self.canvas;
        if rows == 0 || cols == 0 {
            return Err(ConfigError::Invalid {
                reason: format!("canvas must be at least 1x1, got {rows}x{cols}"),
            });
        }
        for seed in &self.seeds {
            if seed.row >= rows || seed.col >= cols {
                return Err(ConfigError::Invalid {
                    reason: format!(
                        "seed at ({}, {}) is outside the {rows}x{cols} canvas",
                        seed.row, seed.col
                    ),
                });
            }
            if let Err(source) = seed.parsed_color() {
                return Err(ConfigError::Invalid {
                    reason: format!("seed color {:?}: {source}", seed.color),
                });
            }
        }
        Ok(())
    }
}

/// Canvas size and starting rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CanvasConfig {
    /// Number of rows.
    #[serde(default = "default_rows")]
    pub rows: usize,

    /// Number of columns.
    #[serde(default = "default_cols")]
    pub cols: usize,

    /// Rule identifier (for example `moss` or `magicDraw2`).
    #[serde(default = "default_rule")]
    pub rule: String,
}

impl CanvasConfig {
    /// Override the rule with `SPROUT_RULE` when set.
    pub fn apply_env_overrides(&mut self) {
        self.apply_rule_override(std::env::var("SPROUT_RULE").ok());
    }

    /// Replace the rule when `rule` is present and non-blank.
    pub fn apply_rule_override(&mut self, rule: Option<String>) {
        if let Some(rule) = rule.filter(|r| !r.trim().is_empty()) {
            self.rule = rule;
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            cols: default_cols(),
            rule: default_rule(),
        }
    }
}

/// Run length, pacing, and early-stop conditions.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Maximum number of steps to run.
    #[serde(default = "default_max_steps")]
    pub max_steps: u64,

    /// Real-time milliseconds between steps (0 runs unpaced).
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop once every cell is colored.
    #[serde(default = "default_true")]
    pub stop_when_saturated: bool,

    /// Stop once a non-empty canvas has emptied.
    #[serde(default = "default_true")]
    pub stop_when_extinct: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            tick_interval_ms: default_tick_interval_ms(),
            stop_when_saturated: true,
            stop_when_extinct: true,
        }
    }
}

/// Random number source selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RandomnessConfig {
    /// Seed for a reproducible run; `None` uses the thread RNG.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// A cell painted before the first step.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedCell {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
    /// Hex color text (`#rgb` or `#rrggbb`).
    pub color: String,
}

impl SeedCell {
    /// The seed color, strictly parsed.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed hex text.
    pub fn parsed_color(&self) -> Result<RgbColor, sprout_types::ColorParseError> {
        RgbColor::parse_hex(&self.color)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error) used when `RUST_LOG` is
    /// not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// End-of-run output.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Print the final canvas as ASCII shading to stdout.
    #[serde(default = "default_true")]
    pub ascii: bool,

    /// Write the final canvas as JSON to this path.
    #[serde(default)]
    pub snapshot_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            ascii: true,
            snapshot_path: None,
        }
    }
}

const fn default_rows() -> usize {
    32
}

const fn default_cols() -> usize {
    32
}

fn default_rule() -> String {
    "moss".to_owned()
}

const fn default_max_steps() -> u64 {
    200
}

const fn default_tick_interval_ms() -> u64 {
    120
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_owned()
}
