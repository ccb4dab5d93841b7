use std::collections::BTreeMap;
use std::fmt::Write as _;

use bonsai_common::Pose;
use bonsai_kernel::{BranchKind, Command, InterpretError, total_energy};

use crate::trace::{Bounds, trace_segments};

/// Where playback starts and how large it is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Starting pose of the drawing cursor.
    pub origin: Pose,
    /// Multiplier on every branch length. Angles are unaffected.
    pub scale: f64,
}

impl Default for RenderView {
    fn default() -> Self {
        Self {
            origin: Pose::new(0.0, 0.0, 90.0),
            scale: 1.0,
        }
    }
}

impl RenderView {
    pub fn with_origin(mut self, origin: Pose) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// Errors from rendering a command sequence.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot play back commands: {0}")]
    Interpret(#[from] InterpretError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads a finished command sequence and a view, then produces
/// output. It never feeds anything back into expansion.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    fn render(&self, commands: &[Command], view: &RenderView)
    -> Result<Self::Output, RenderError>;
}

/// Human-readable summary of a command sequence.
///
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, commands: &[Command], view: &RenderView) -> Result<String, RenderError> {
        let segments = trace_segments(commands, view)?;

        let mut branches = 0usize;
        let mut max_depth = 0usize;
        let mut depth = 0usize;
        let mut per_kind: BTreeMap<BranchKind, usize> = BTreeMap::new();
        for cmd in commands {
            match cmd {
                Command::Push => {
                    depth += 1;
                    max_depth = max_depth.max(depth);
                }
                Command::Pop => depth = depth.saturating_sub(1),
                Command::Branch(b) => {
                    branches += 1;
                    *per_kind.entry(b.kind).or_default() += 1;
                }
            }
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Command Sequence (commands={}, branches={}, energy={:.2}) ===",
            commands.len(),
            branches,
            total_energy(commands)
        );
        let o = view.origin;
        let _ = writeln!(
            out,
            "Origin: pos=({:.1}, {:.1}) heading={:.1} scale={}",
            o.position.x, o.position.y, o.heading, view.scale
        );
        let _ = writeln!(out, "Segments: {}", segments.len());
        let _ = writeln!(out, "Max nesting: {max_depth}");
        if let Some(bounds) = Bounds::of(&segments) {
            let _ = writeln!(
                out,
                "Bounds: min=({:.2}, {:.2}) max=({:.2}, {:.2})",
                bounds.min.x, bounds.min.y, bounds.max.x, bounds.max.y
            );
        }
        for (kind, count) in &per_kind {
            let _ = writeln!(out, "  kind {kind}: {count} branches");
        }

        Ok(out)
    }
}
