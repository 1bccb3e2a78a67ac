//! Randomness capability shared by all rules.
//!
//! Rules never reach for a global generator directly. They receive a
//! `&mut dyn Randomness`, so a driver can choose between the process-wide
//! thread RNG ([`ThreadRandomness`]), a seeded generator for reproducible
//! runs ([`SeededRandomness`]), or a fixed sequence in tests
//! ([`SequenceRandomness`]).
//!
//! Only [`Randomness::next_f64`] is required; every other draw is derived
//! from it, so a scripted sequence controls every decision a rule makes.

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Largest `f64` strictly below 1.0.
const ONE_BELOW: f64 = 1.0 - f64::EPSILON;

/// A source of uniform random numbers.
pub trait Randomness {
    /// A uniform float in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// `true` with the given probability. Probabilities at or below 0 never
    /// succeed; at or above 1 always succeed.
    fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// A uniform index in `[0, n)`, computed as `floor(next * n)`.
    /// Returns 0 when `n` is 0.
    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        let scaled = (self.next_f64() * to_f64(n)).floor();
        // `scaled` is in [0, n); the saturating float-to-int cast cannot wrap.
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = scaled as usize;
        index.min(n.saturating_sub(1))
    }

    /// A uniform integer in `[low, high]` (inclusive). Returns `low` when
    /// the range is empty or a single value, without drawing.
    fn int_between(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        let span = i64::from(high)
            .saturating_sub(i64::from(low))
            .saturating_add(1);
        let offset = self.below(usize::try_from(span).unwrap_or(1));
        let offset = i64::try_from(offset).unwrap_or(0);
        i32::try_from(i64::from(low).saturating_add(offset)).unwrap_or(low)
    }
}

/// Pick a uniformly random element, or `None` for an empty slice.
pub fn pick<T: Copy>(rng: &mut dyn Randomness, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.below(items.len())).copied()
}

/// Lossless-enough conversion for grid-sized counts.
fn to_f64(n: usize) -> f64 {
    f64::from(u32::try_from(n).unwrap_or(u32::MAX))
}

// ---------------------------------------------------------------------------
// Implementations
// ---------------------------------------------------------------------------

/// The process-wide thread RNG. Non-reproducible across runs.
#[derive(Debug, Clone)]
pub struct ThreadRandomness(ThreadRng);

impl ThreadRandomness {
    /// Attach to the current thread's generator.
    pub fn new() -> Self {
        Self(rand::rng())
    }
}

impl Default for ThreadRandomness {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomness for ThreadRandomness {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// A seeded generator: the same seed yields the same sequence of steps.
#[derive(Debug, Clone)]
pub struct SeededRandomness(StdRng);

impl SeededRandomness {
    /// Create a generator from a 64-bit seed.
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl Randomness for SeededRandomness {
    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays a fixed list of floats, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`; non-finite values read as 0. An empty
/// list always yields 0.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandomness {
    values: Vec<f64>,
    position: usize,
}

impl SequenceRandomness {
    /// Cycle through `values`.
    pub const fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            position: 0,
        }
    }

    /// Always return the same value.
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far.
    pub const fn draws(&self) -> usize {
        self.position
    }
}

impl Randomness for SequenceRandomness {
    fn next_f64(&mut self) -> f64 {
        let len = self.values.len();
        let value = self
            .position
            .checked_rem(len)
            .and_then(|i| self.values.get(i))
            .copied()
            .unwrap_or(0.0);
        self.position = self.position.saturating_add(1);

        if value.is_finite() {
            value.clamp(0.0, ONE_BELOW)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn sequence_cycles_and_clamps() {
        let mut rng = SequenceRandomness::new(vec![0.25, 2.0, -1.0, f64::NAN]);
        assert_eq!(rng.next_f64(), 0.25);
        assert!(rng.next_f64() < 1.0);
        assert_eq!(rng.next_f64(), 0.0);
        assert_eq!(rng.next_f64(), 0.0);
        assert_eq!(rng.next_f64(), 0.25);
        assert_eq!(rng.draws(), 5);
    }

    #[test]
    fn empty_sequence_yields_zero() {
        let mut rng = SequenceRandomness::default();
        assert_eq!(rng.next_f64(), 0.0);
    }

    #[test]
    fn chance_is_strict_less_than() {
        let mut rng = SequenceRandomness::constant(0.4);
        assert!(!rng.chance(0.4));
        assert!(rng.chance(0.41));
        assert!(!rng.chance(0.0));
    }

    #[test]
    fn below_floors_and_stays_in_range() {
        let mut rng = SequenceRandomness::new(vec![0.0, 0.5, 0.999]);
        assert_eq!(rng.below(4), 0);
        assert_eq!(rng.below(4), 2);
        assert_eq!(rng.below(4), 3);
        assert_eq!(rng.below(0), 0);
    }

    #[test]
    fn int_between_is_inclusive() {
        let mut rng = SequenceRandomness::new(vec![0.0, 0.999]);
        assert_eq!(rng.int_between(-25, 25), -25);
        assert_eq!(rng.int_between(-25, 25), 25);
        // Degenerate ranges do not draw.
        let before = rng.draws();
        assert_eq!(rng.int_between(3, 3), 3);
        assert_eq!(rng.int_between(5, 1), 5);
        assert_eq!(rng.draws(), before);
    }

    #[test]
    fn pick_handles_empty_and_full() {
        let mut rng = SequenceRandomness::constant(0.6);
        assert_eq!(pick::<u8>(&mut rng, &[]), None);
        assert_eq!(pick(&mut rng, &[10, 20, 30]), Some(20));
    }

    #[test]
    fn seeded_generators_agree() {
        let mut a = SeededRandomness::new(7);
        let mut b = SeededRandomness::new(7);
        for _ in 0..100 {
            let x = a.next_f64();
            assert_eq!(x, b.next_f64());
            assert!((0.0..1.0).contains(&x));
        }
    }

    #[test]
    fn thread_randomness_in_unit_interval() {
        let mut rng = ThreadRandomness::new();
        for _ in 0..1000 {
            let x = rng.next_f64();
            assert!((0.0..1.0).contains(&x));
        }
    }
}
