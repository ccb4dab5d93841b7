use std::collections::BTreeMap;

use bonsai_kernel::BranchKind;
use serde::{Deserialize, Serialize};

/// How one kind of branch is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Any SVG color string.
    pub color: String,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

impl Default for Stroke {
    fn default() -> Self {
        Self::new("#000000", 1.0)
    }
}

/// Mapping from branch kind to stroke, with a fallback for unmapped kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    strokes: BTreeMap<BranchKind, Stroke>,
    fallback: Stroke,
}

impl Palette {
    pub fn new(fallback: Stroke) -> Self {
        Self {
            strokes: BTreeMap::new(),
            fallback,
        }
    }

    /// Set the stroke for `kind`, replacing any earlier one.
    pub fn with_stroke(mut self, kind: BranchKind, stroke: Stroke) -> Self {
        self.strokes.insert(kind, stroke);
        self
    }

    pub fn stroke_for(&self, kind: BranchKind) -> &Stroke {
        self.strokes.get(&kind).unwrap_or(&self.fallback)
    }
}
