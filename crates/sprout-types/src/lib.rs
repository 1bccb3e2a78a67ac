//! Shared type definitions for the Sprout pixel-growth engine.
//!
//! This crate is the single source of truth for the values that cross the
//! engine boundary: the renderer reads [`Grid`] cells, the palette UI sends
//! [`RgbColor`] values and [`RuleName`] identifiers. Wire-visible types flow
//! to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`color`] -- [`RgbColor`] and hex text conversion
//! - [`grid`] -- [`CellState`] and the rectangular [`Grid`]
//! - [`rule`] -- [`RuleName`] identifiers and their families

pub mod color;
pub mod grid;
pub mod rule;

// Re-export all public types at crate root for convenience.
pub use color::{ColorParseError, RgbColor};
pub use grid::{CellState, Grid, GridError};
pub use rule::{RuleFamily, RuleName, UnknownRule};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes the bindings into `bindings/` relative to the crate root.
        use ts_rs::TS;

        let _ = crate::color::RgbColor::export_all();
        let _ = crate::grid::CellState::export_all();
        let _ = crate::rule::RuleName::export_all();
        let _ = crate::rule::RuleFamily::export_all();
    }
}
