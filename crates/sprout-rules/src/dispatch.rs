//! Rule dispatch: one transition function per [`RuleName`].
//!
//! [`step`] takes an already-resolved name and cannot fail. Text from the
//! outside world goes through [`step_named`], which normalizes once at the
//! boundary: anything that is not a known rule identifier runs as moss.

use sprout_types::{Grid, RuleName};
use tracing::{debug, trace};

use crate::random::Randomness;
use crate::rules::{RuleFn, avatar, magic_draw, portrait, world};

/// The transition function for `rule`.
pub const fn rule_fn(rule: RuleName) -> RuleFn {
    match rule {
        RuleName::Moss => world::moss,
        RuleName::Crystal => world::crystal,
        RuleName::Coral => world::coral,
        RuleName::Lava => world::lava,
        RuleName::Terrain => world::terrain,
        RuleName::Slime => world::slime,
        RuleName::Snowfall => world::snowfall,
        RuleName::Chaos => world::chaos,
        RuleName::MagicDraw => magic_draw::magic_draw,
        RuleName::MagicDraw2 => magic_draw::magic_draw2,
        RuleName::MagicDrawAura => magic_draw::magic_draw_aura,
        RuleName::Avatar => avatar::avatar,
        RuleName::Avatar2 => avatar::avatar2,
        RuleName::MagicPortrait => portrait::magic_portrait,
        RuleName::MagicPortrait2 => portrait::magic_portrait2,
    }
}

/// Advance `grid` by one step under `rule`.
pub fn step(rule: RuleName, grid: &Grid, rng: &mut dyn Randomness) -> Grid {
    let next = rule_fn(rule)(grid, rng);
    trace!(
        rule = rule.as_str(),
        colored_before = grid.colored_count(),
        colored_after = next.colored_count(),
        "Rule applied"
    );
    next
}

/// Normalize a rule identifier, falling back to moss for anything unknown.
pub fn resolve_rule(name: &str) -> RuleName {
    let rule = RuleName::resolve(name);
    if rule.as_str() != name {
        debug!(requested = name, fallback = rule.as_str(), "Unknown rule, using moss");
    }
    rule
}

/// Advance `grid` by one step under the rule named `name`.
pub fn step_named(name: &str, grid: &Grid, rng: &mut dyn Randomness) -> Grid {
    step(resolve_rule(name), grid, rng)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use sprout_types::{CellState, RgbColor};

    use super::*;
    use crate::random::SeededRandomness;

    #[test]
    fn every_identifier_resolves_to_itself() {
        for rule in RuleName::ALL {
            assert_eq!(resolve_rule(rule.as_str()), rule);
        }
    }

    #[test]
    fn unknown_and_malformed_names_fall_back_to_moss() {
        for name in ["", "Moss", "MOSS", "sparkle", "magic draw", "moss "] {
            assert_eq!(resolve_rule(name), RuleName::Moss);
        }
    }

    #[test]
    fn named_step_matches_typed_step() {
        let mut grid = Grid::new(8, 8);
        grid.set(3, 4, CellState::seeded(RgbColor::new(10, 200, 90)));
        for rule in RuleName::ALL {
            let typed = step(rule, &grid, &mut SeededRandomness::new(3));
            let named = step_named(rule.as_str(), &grid, &mut SeededRandomness::new(3));
            assert_eq!(typed, named, "{rule}");
        }
    }
}
