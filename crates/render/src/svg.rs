use std::fmt::Write as _;
use std::path::Path;

use bonsai_kernel::Command;

use crate::palette::Palette;
use crate::renderer::{RenderError, RenderView, Renderer};
use crate::trace::{Bounds, trace_segments};

/// Standalone SVG document renderer.
///
/// The y axis is flipped so that +y in cursor space points up on screen, and
/// the view box is fitted to the drawing plus `margin`.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    pub palette: Palette,
    /// Blank space around the drawing, in cursor units.
    pub margin: f64,
    /// Fill color for a background rectangle; `None` leaves it transparent.
    pub background: Option<String>,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            margin: 10.0,
            background: Some("#ffffff".to_string()),
        }
    }
}

impl SvgRenderer {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            ..Self::default()
        }
    }
}

impl Renderer for SvgRenderer {
    type Output = String;

    fn render(&self, commands: &[Command], view: &RenderView) -> Result<String, RenderError> {
        let _span = tracing::info_span!("render_svg", commands = commands.len()).entered();
        let segments = trace_segments(commands, view)?;

        let (min_x, min_y, width, height) = match Bounds::of(&segments) {
            // screen y = -cursor y, so the top edge comes from max.y
            Some(b) => (
                b.min.x - self.margin,
                -b.max.y - self.margin,
                b.size().x + 2.0 * self.margin,
                b.size().y + 2.0 * self.margin,
            ),
            None => (
                view.origin.position.x - self.margin,
                -view.origin.position.y - self.margin,
                2.0 * self.margin,
                2.0 * self.margin,
            ),
        };
        // keep the document valid for degenerate drawings
        let (width, height) = (width.max(1.0), height.max(1.0));

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{min_x:.3} {min_y:.3} {width:.3} {height:.3}" width="{width:.0}" height="{height:.0}">"#
        );
        if let Some(fill) = &self.background {
            let _ = writeln!(
                out,
                r#"  <rect x="{min_x:.3}" y="{min_y:.3}" width="{width:.3}" height="{height:.3}" fill="{fill}"/>"#
            );
        }
        let _ = writeln!(out, r#"  <g fill="none" stroke-linecap="round">"#);
        for seg in &segments {
            let stroke = self.palette.stroke_for(seg.kind);
            let _ = writeln!(
                out,
                r#"    <line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" stroke="{}" stroke-width="{:.3}"/>"#,
                seg.start.x, -seg.start.y, seg.end.x, -seg.end.y, stroke.color, stroke.width
            );
        }
        out.push_str("  </g>\n</svg>\n");

        tracing::debug!(segments = segments.len(), "rendered svg");
        Ok(out)
    }
}

/// Write a rendered document to `path`, creating or truncating it.
pub fn write_svg(path: impl AsRef<Path>, svg: &str) -> Result<(), RenderError> {
    let path = path.as_ref();
    std::fs::write(path, svg)?;
    tracing::info!(path = %path.display(), bytes = svg.len(), "wrote svg");
    Ok(())
}
