//! Canvas session, run loop, and configuration for the Sprout engine.
//!
//! # Modules
//!
//! - [`canvas`] -- [`Canvas`], the single-writer owner of the current grid
//! - [`config`] -- configuration loading from `sprout-config.yaml` into
//!   strongly-typed structs
//! - [`runner`] -- bounded, optionally paced run loop with [`StepCallback`]
//!
//! [`Canvas`]: canvas::Canvas
//! [`StepCallback`]: runner::StepCallback

pub mod canvas;
pub mod config;
pub mod runner;
