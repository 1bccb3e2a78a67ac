//! The closed set of growth-rule identifiers.
//!
//! Rule names travel as `camelCase` strings (`"magicDraw2"`, `"magicDrawAura"`)
//! between the palette UI and the engine. [`RuleName::from_str`] is strict;
//! [`RuleName::resolve`] is the lenient boundary normalization that maps any
//! unknown identifier to [`RuleName::Moss`].

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A rule identifier that is not part of the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rule identifier: {0:?}")]
pub struct UnknownRule(pub String);

/// The family a rule belongs to, used for grouping in the palette UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum RuleFamily {
    /// Biome-style diffusion rules.
    World,
    /// Mirrored sketch rules.
    MagicDraw,
    /// Two-phase figure and portrait rules.
    Avatar,
}

/// A growth rule selectable by the driver.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub enum RuleName {
    /// Slow-spreading, darkening clusters that die when crowded.
    #[default]
    Moss,
    /// Single-neighbor orthogonal growth.
    Crystal,
    /// Averaged growth with crowd die-off.
    Coral,
    /// Stochastic spread with reddening drift.
    Lava,
    /// Averaged growth that browns with age.
    Terrain,
    /// Slow averaged growth in dense areas.
    Slime,
    /// Rare single-neighbor copies that fade slowly.
    Snowfall,
    /// Random births, jumps, and deaths.
    Chaos,
    /// Centre-biased mirrored sketching.
    MagicDraw,
    /// Mirrored sketching with bright streaks.
    MagicDraw2,
    /// Seeded figure followed by mirrored growth.
    Avatar,
    /// Painterly figure followed by bottom-heavy growth.
    Avatar2,
    /// Zoned portrait (background, hair, face, torso).
    MagicPortrait,
    /// Painterly zoned portrait.
    MagicPortrait2,
    /// Mirrored sketching restricted to a ring around the centre.
    MagicDrawAura,
}

impl RuleName {
    /// Every rule, in palette order.
    pub const ALL: [Self; 15] = [
        Self::Moss,
        Self::Crystal,
        Self::Coral,
        Self::Lava,
        Self::Terrain,
        Self::Slime,
        Self::Snowfall,
        Self::Chaos,
        Self::MagicDraw,
        Self::MagicDraw2,
        Self::Avatar,
        Self::Avatar2,
        Self::MagicPortrait,
        Self::MagicPortrait2,
        Self::MagicDrawAura,
    ];

    /// The wire identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Moss => "moss",
            Self::Crystal => "crystal",
            Self::Coral => "coral",
            Self::Lava => "lava",
            Self::Terrain => "terrain",
            Self::Slime => "slime",
            Self::Snowfall => "snowfall",
            Self::Chaos => "chaos",
            Self::MagicDraw => "magicDraw",
            Self::MagicDraw2 => "magicDraw2",
            Self::Avatar => "avatar",
            Self::Avatar2 => "avatar2",
            Self::MagicPortrait => "magicPortrait",
            Self::MagicPortrait2 => "magicPortrait2",
            Self::MagicDrawAura => "magicDrawAura",
        }
    }

    /// The family this rule belongs to.
    pub const fn family(self) -> RuleFamily {
        match self {
            Self::Moss
            | Self::Crystal
            | Self::Coral
            | Self::Lava
            | Self::Terrain
            | Self::Slime
            | Self::Snowfall
            | Self::Chaos => RuleFamily::World,
            Self::MagicDraw | Self::MagicDraw2 | Self::MagicDrawAura => RuleFamily::MagicDraw,
            Self::Avatar | Self::Avatar2 | Self::MagicPortrait | Self::MagicPortrait2 => {
                RuleFamily::Avatar
            }
        }
    }

    /// Map any identifier to a rule, falling back to [`RuleName::Moss`].
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or(Self::Moss)
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RuleName {
    type Err = UnknownRule;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or_else(|| UnknownRule(s.to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip() {
        for rule in RuleName::ALL {
            assert_eq!(rule.as_str().parse::<RuleName>().unwrap(), rule);
        }
    }

    #[test]
    fn identifiers_are_unique() {
        let mut names: Vec<_> = RuleName::ALL.iter().map(|r| r.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), RuleName::ALL.len());
    }

    #[test]
    fn strict_parse_rejects_unknown() {
        assert_eq!(
            "Moss".parse::<RuleName>(),
            Err(UnknownRule(String::from("Moss")))
        );
        assert!("".parse::<RuleName>().is_err());
    }

    #[test]
    fn resolve_falls_back_to_moss() {
        assert_eq!(RuleName::resolve("lava"), RuleName::Lava);
        assert_eq!(RuleName::resolve("glitter"), RuleName::Moss);
        assert_eq!(RuleName::resolve(""), RuleName::Moss);
        assert_eq!(RuleName::resolve("magicdraw"), RuleName::Moss);
    }

    #[test]
    fn serde_matches_wire_identifiers() {
        for rule in RuleName::ALL {
            let json = serde_json::to_string(&rule).unwrap();
            assert_eq!(json, format!("\"{}\"", rule.as_str()));
        }
    }

    #[test]
    fn families_partition_rules() {
        let world = RuleName::ALL
            .iter()
            .filter(|r| r.family() == RuleFamily::World)
            .count();
        let magic = RuleName::ALL
            .iter()
            .filter(|r| r.family() == RuleFamily::MagicDraw)
            .count();
        let avatar = RuleName::ALL
            .iter()
            .filter(|r| r.family() == RuleFamily::Avatar)
            .count();
        assert_eq!((world, magic, avatar), (8, 3, 4));
    }
}
