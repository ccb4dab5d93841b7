//! Rendering Adapter: plays finished command sequences back as geometry.
//!
//! # Invariants
//! - Renderers never rewrite commands; they only read them.
//! - Geometry derives from the command sequence and the view alone.
//!
//! The kernel hands over a flat `Vec<Command>`; everything here is a
//! consumer of that sequence. Branch kinds map to strokes via [`Palette`].

mod json;
mod palette;
mod renderer;
mod svg;
mod trace;

pub use json::{JsonRenderer, read_commands, read_palette};
pub use palette::{Palette, Stroke};
pub use renderer::{DebugTextRenderer, RenderError, RenderView, Renderer};
pub use svg::{SvgRenderer, write_svg};
pub use trace::{Bounds, Segment, trace_segments};

pub fn crate_info() -> &'static str {
    "bonsai-render v0.1.0"
}
