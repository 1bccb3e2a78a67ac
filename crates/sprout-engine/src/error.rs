//! Error types for the engine binary.

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: sprout_core::config::ConfigError,
    },

    /// The final snapshot could not be serialized.
    #[error("snapshot encoding failed: {source}")]
    Snapshot {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// Writing output failed.
    #[error("failed to write {path}: {source}")]
    Output {
        /// Where the write was going.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
