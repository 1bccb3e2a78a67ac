//! Growth-rule engine for the Sprout pixel canvas.
//!
//! A rule reads the current [`Grid`](sprout_types::Grid) and returns a new
//! one of the same size. Rules never mutate their input, never fail, and
//! draw all randomness through the [`Randomness`] seam so tests can inject
//! fixed sequences.
//!
//! # Modules
//!
//! - [`color`] -- averaging, darkening, jitter, and channel drift
//! - [`neighbourhood`] -- grid construction, neighbour queries, painting
//! - [`random`] -- the [`Randomness`] trait and its implementations
//! - [`shape`] -- mirror columns, radial rings, centre-biased weights
//! - [`phase`] -- seed-then-grow state machine for figure rules
//! - [`rules`] -- the fifteen transition functions
//! - [`dispatch`] -- rule name to function mapping with moss fallback

pub mod color;
pub mod dispatch;
pub mod neighbourhood;
pub mod phase;
pub mod random;
pub mod rules;
pub mod shape;

pub use dispatch::{resolve_rule, rule_fn, step, step_named};
pub use phase::{Phase, SeedGuard};
pub use random::{Randomness, SeededRandomness, SequenceRandomness, ThreadRandomness, pick};
pub use rules::RuleFn;
