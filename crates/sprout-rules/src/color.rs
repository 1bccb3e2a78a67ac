//! Color blending primitives: averaging, darkening, jitter, and drift.
//!
//! All functions are total. Float results are turned back into channels by
//! [`clamp_channel`] (truncate, then clamp) or [`round_channel`] (round
//! half up, then clamp), so no operation can produce an out-of-range value.

use sprout_types::RgbColor;

use crate::random::Randomness;

/// Truncate toward zero, then clamp into `[0, 255]`. NaN maps to 0.
pub fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    let clamped = value.trunc().clamp(0.0, 255.0);
    // Clamped to the u8 range above.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let channel = clamped as u8;
    channel
}

/// Round half up (`floor(x + 0.5)`), then clamp into `[0, 255]`.
pub fn round_channel(value: f64) -> u8 {
    clamp_channel((value + 0.5).floor())
}

/// Clamp a signed integer into a channel.
fn clamp_i32(value: i32) -> u8 {
    u8::try_from(value.clamp(0, 255)).unwrap_or(u8::MAX)
}

/// Per-channel arithmetic mean, rounded half up.
///
/// Returns `None` for an empty slice so a blend from zero neighbours can
/// never be applied by accident.
pub fn average_color(colors: &[RgbColor]) -> Option<RgbColor> {
    if colors.is_empty() {
        return None;
    }
    let count = u64::try_from(colors.len()).unwrap_or(u64::MAX);

    let (r, g, b) = colors.iter().fold((0_u64, 0_u64, 0_u64), |(r, g, b), c| {
        (
            r.saturating_add(u64::from(c.r)),
            g.saturating_add(u64::from(c.g)),
            b.saturating_add(u64::from(c.b)),
        )
    });

    Some(RgbColor::new(
        mean_half_up(r, count),
        mean_half_up(g, count),
        mean_half_up(b, count),
    ))
}

/// `round(sum / count)` with halves rounded up, in integer arithmetic.
fn mean_half_up(sum: u64, count: u64) -> u8 {
    let doubled = sum.saturating_mul(2).saturating_add(count);
    let mean = doubled.checked_div(count.saturating_mul(2)).unwrap_or(0);
    u8::try_from(mean).unwrap_or(u8::MAX)
}

/// Scale every channel by `1 - factor`, rounding to nearest.
///
/// `factor` is clamped to `[0, 1]`; a non-finite factor is treated as 0.
/// The result never has a channel brighter than the input.
pub fn darken_color(color: RgbColor, factor: f64) -> RgbColor {
    let factor = if factor.is_finite() {
        factor.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let keep = 1.0 - factor;
    let scale = |channel: u8| round_channel(f64::from(channel) * keep);
    RgbColor::new(scale(color.r), scale(color.g), scale(color.b))
}

/// Add an independent uniform offset in `[-max_jitter, max_jitter]` to each
/// channel, then clamp. A non-positive `max_jitter` returns the color as-is.
pub fn jitter_color(color: RgbColor, max_jitter: i32, rng: &mut dyn Randomness) -> RgbColor {
    if max_jitter <= 0 {
        return color;
    }
    let low = max_jitter.saturating_neg();
    let dr = rng.int_between(low, max_jitter);
    let dg = rng.int_between(low, max_jitter);
    let db = rng.int_between(low, max_jitter);
    shift_channels(color, dr, dg, db)
}

/// Add signed per-channel offsets, clamping each result.
pub fn shift_channels(color: RgbColor, dr: i32, dg: i32, db: i32) -> RgbColor {
    let shift = |channel: u8, delta: i32| clamp_i32(i32::from(channel).saturating_add(delta));
    RgbColor::new(shift(color.r, dr), shift(color.g, dg), shift(color.b, db))
}

/// Add the same amount to every channel, clamping.
pub fn brighten_color(color: RgbColor, amount: i32) -> RgbColor {
    shift_channels(color, amount, amount, amount)
}

/// Average of the three channels.
pub fn brightness(color: RgbColor) -> f64 {
    (f64::from(color.r) + f64::from(color.g) + f64::from(color.b)) / 3.0
}

/// A uniformly random color.
pub fn random_color(rng: &mut dyn Randomness) -> RgbColor {
    let r = clamp_i32(rng.int_between(0, 255));
    let g = clamp_i32(rng.int_between(0, 255));
    let b = clamp_i32(rng.int_between(0, 255));
    RgbColor::new(r, g, b)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::random::{SeededRandomness, SequenceRandomness};

    #[test]
    fn clamp_channel_truncates_then_clamps() {
        assert_eq!(clamp_channel(12.9), 12);
        assert_eq!(clamp_channel(-0.7), 0);
        assert_eq!(clamp_channel(-40.0), 0);
        assert_eq!(clamp_channel(255.9), 255);
        assert_eq!(clamp_channel(1e9), 255);
        assert_eq!(clamp_channel(f64::NAN), 0);
        assert_eq!(clamp_channel(f64::NEG_INFINITY), 0);
    }

    #[test]
    fn round_channel_rounds_half_up() {
        assert_eq!(round_channel(2.5), 3);
        assert_eq!(round_channel(2.49), 2);
        assert_eq!(round_channel(254.6), 255);
        assert_eq!(round_channel(-3.0), 0);
    }

    #[test]
    fn average_of_nothing_is_none() {
        assert_eq!(average_color(&[]), None);
    }

    #[test]
    fn average_of_one_is_identity() {
        let c = RgbColor::new(12, 200, 77);
        assert_eq!(average_color(&[c]), Some(c));
    }

    #[test]
    fn average_rounds_half_up() {
        let a = RgbColor::new(0, 10, 255);
        let b = RgbColor::new(1, 11, 254);
        // 0.5 -> 1, 10.5 -> 11, 254.5 -> 255
        assert_eq!(average_color(&[a, b]), Some(RgbColor::new(1, 11, 255)));

        let thirds = [
            RgbColor::new(0, 0, 0),
            RgbColor::new(0, 0, 0),
            RgbColor::new(1, 2, 255),
        ];
        // 1/3 -> 0, 2/3 -> 1, 85 -> 85
        assert_eq!(average_color(&thirds), Some(RgbColor::new(0, 1, 85)));
    }

    #[test]
    fn darken_zero_is_identity() {
        for c in [RgbColor::WHITE, RgbColor::BLACK, RgbColor::new(3, 128, 251)] {
            assert_eq!(darken_color(c, 0.0), c);
        }
    }

    #[test]
    fn darken_never_brightens() {
        let mut rng = SeededRandomness::new(11);
        for _ in 0..500 {
            let c = random_color(&mut rng);
            let f = rng.next_f64();
            let d = darken_color(c, f);
            assert!(d.r <= c.r && d.g <= c.g && d.b <= c.b, "{c} -> {d} at {f}");
        }
    }

    #[test]
    fn darken_clamps_factor() {
        let c = RgbColor::new(100, 150, 200);
        assert_eq!(darken_color(c, 1.0), RgbColor::BLACK);
        assert_eq!(darken_color(c, 7.0), RgbColor::BLACK);
        assert_eq!(darken_color(c, -3.0), c);
        assert_eq!(darken_color(c, f64::NAN), c);
        assert_eq!(darken_color(c, 0.02), RgbColor::new(98, 147, 196));
    }

    #[test]
    fn jitter_stays_within_bounds() {
        let mut rng = SeededRandomness::new(3);
        let base = RgbColor::new(250, 5, 128);
        for _ in 0..500 {
            let j = jitter_color(base, 12, &mut rng);
            assert!((i32::from(j.b) - 128).abs() <= 12);
            assert!(j.r >= 238);
            assert!(j.g <= 17);
        }
    }

    #[test]
    fn jitter_extremes_follow_the_sequence() {
        let mut low = SequenceRandomness::constant(0.0);
        assert_eq!(
            jitter_color(RgbColor::new(10, 100, 200), 25, &mut low),
            RgbColor::new(0, 75, 175)
        );
        let mut none = SequenceRandomness::constant(0.9);
        assert_eq!(jitter_color(RgbColor::WHITE, 0, &mut none), RgbColor::WHITE);
        assert_eq!(none.draws(), 0);
    }

    #[test]
    fn shifts_clamp_at_both_ends() {
        let lava = shift_channels(RgbColor::new(253, 2, 7), 5, -3, -8);
        assert_eq!(lava, RgbColor::new(255, 0, 0));
        assert_eq!(brighten_color(RgbColor::new(10, 240, 0), 20), RgbColor::new(30, 255, 20));
    }

    #[test]
    fn brightness_is_channel_mean() {
        assert_eq!(brightness(RgbColor::new(30, 60, 90)), 60.0);
        assert_eq!(brightness(RgbColor::BLACK), 0.0);
    }
}
