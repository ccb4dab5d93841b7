//! Rule sets for the bonsai engine.
//!
//! Rule sets are data: each constructor builds an [`LSystem`] through the
//! ordinary registration API and pairs it with a drawing palette.

pub mod organic;
pub mod traditional;

use bonsai_kernel::{LSystem, LSystemError};
use bonsai_render::{Palette, Stroke};

/// Errors from looking up a preset by name.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    #[error("unknown preset {0:?}")]
    Unknown(String),
    #[error(transparent)]
    Rule(#[from] LSystemError),
}

/// Names accepted by [`preset`], in display order.
pub const PRESET_NAMES: &[&str] = &[
    "koch-island",
    "dragon-curve",
    "bushy-tree",
    "flower-field",
    "triangle-koch",
    "weed-plant",
    "windswept-tree",
];

/// A ready-to-expand system with the settings it looks best with.
#[derive(Debug)]
pub struct Preset {
    pub name: &'static str,
    pub system: LSystem,
    pub palette: Palette,
    /// Energy ceiling to expand with.
    pub available_energy: f64,
}

/// Build the preset called `name` with its default parameters.
pub fn preset(name: &str) -> Result<Preset, PresetError> {
    let line = || Palette::new(Stroke::new("#1b3a4b", 1.0));
    let plant = || {
        Palette::new(Stroke::new("#6b4226", 1.5))
            .with_stroke(organic::LEAF, Stroke::new("#3c8d2f", 2.0))
    };
    let tree = || {
        Palette::new(Stroke::new("#5a3d2b", 2.0))
            .with_stroke(organic::LIMB, Stroke::new("#2e6b30", 1.0))
    };

    let (name, system, palette, available_energy) = match name {
        "koch-island" => ("koch-island", traditional::koch_island(10.0)?, line(), 100.0),
        "dragon-curve" => ("dragon-curve", traditional::dragon_curve(10.0)?, line(), 100.0),
        "bushy-tree" => ("bushy-tree", traditional::bushy_tree(10.0)?, plant(), 100.0),
        "flower-field" => ("flower-field", traditional::flower_field(10.0)?, plant(), 100.0),
        "triangle-koch" => ("triangle-koch", traditional::triangle_koch(400.0)?, line(), 100.0),
        "weed-plant" => ("weed-plant", organic::weed_plant(20, 5)?, plant(), 1000.0),
        "windswept-tree" => ("windswept-tree", organic::windswept_tree(50.0)?, tree(), 100.0),
        other => return Err(PresetError::Unknown(other.to_string())),
    };

    tracing::debug!(name, depth = system.recommended_depth(), "built preset");
    Ok(Preset {
        name,
        system,
        palette,
        available_energy,
    })
}

pub fn crate_info() -> &'static str {
    "bonsai-presets v0.1.0"
}
