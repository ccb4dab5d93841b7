use bonsai_kernel::{BranchKind, Command, InterpretError, Turtle, interpret};
use glam::DVec2;

use crate::renderer::RenderView;

/// A drawn stroke: one branch of non-zero length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: DVec2,
    pub end: DVec2,
    pub kind: BranchKind,
}

/// Axis-aligned box around a set of segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Smallest box holding every segment endpoint, or `None` if there are none.
    pub fn of(segments: &[Segment]) -> Option<Self> {
        let mut points = segments.iter().flat_map(|s| [s.start, s.end]);
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn size(&self) -> DVec2 {
        self.max - self.min
    }
}

/// Play `commands` back from the view origin and collect the strokes.
///
/// Lengths are multiplied by `view.scale`. Zero-length branches only turn
/// the cursor and produce no segment.
pub fn trace_segments(
    commands: &[Command],
    view: &RenderView,
) -> Result<Vec<Segment>, InterpretError> {
    let mut turtle = Turtle::from_pose(view.origin);
    turtle.pen_down();

    let mut segments = Vec::new();
    interpret(&mut turtle, commands, |pose, branch| {
        let scaled = branch.with_length(branch.length * view.scale);
        if scaled.length != 0.0 {
            let end = pose.turned_and_advanced(scaled.angle, scaled.length);
            segments.push(Segment {
                start: pose.position,
                end: end.position,
                kind: scaled.kind,
            });
        }
        vec![Command::Branch(scaled)]
    })?;

    tracing::trace!(segments = segments.len(), "traced command sequence");
    Ok(segments)
}
