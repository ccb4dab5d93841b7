//! JSON interchange for command lists and palettes.
//!
//! Command lists use the internally tagged form of [`Command`], so a saved
//! expansion can be fed back into `render` or `validate` without re-expanding.

use std::path::Path;

use bonsai_kernel::Command;

use crate::palette::Palette;
use crate::renderer::{RenderError, RenderView, Renderer};

/// Emits the command list itself as pretty-printed JSON.
///
/// The view is ignored; the output is the input sequence, unchanged.
#[derive(Debug, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for JsonRenderer {
    type Output = String;

    fn render(&self, commands: &[Command], _view: &RenderView) -> Result<String, RenderError> {
        let mut out = serde_json::to_string_pretty(commands)?;
        out.push('\n');
        Ok(out)
    }
}

/// Read a command list previously written by [`JsonRenderer`].
pub fn read_commands(path: impl AsRef<Path>) -> Result<Vec<Command>, RenderError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let commands: Vec<Command> = serde_json::from_str(&text)?;
    tracing::debug!(path = %path.display(), commands = commands.len(), "read command list");
    Ok(commands)
}

/// Read a [`Palette`] from a JSON file.
pub fn read_palette(path: impl AsRef<Path>) -> Result<Palette, RenderError> {
    let text = std::fs::read_to_string(path.as_ref())?;
    Ok(serde_json::from_str(&text)?)
}
