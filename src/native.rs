// ABOUTME: In-process SVG rasterization for the deckhand application
// ABOUTME: Renders SVG files to PNG with resvg when rsvg-convert is not wanted

use crate::errors::{DeckError, Result};
use log::debug;
use resvg::{tiny_skia, usvg};
use std::fs;
use std::path::Path;

/// Render `svg_file` to `png_file` at `scale` times its intrinsic size.
/// Returns the output dimensions in pixels.
pub fn render_svg_to_png(svg_file: &Path, png_file: &Path, scale: f32) -> Result<(u32, u32)> {
    let svg_data = fs::read(svg_file)?;

    let mut options = usvg::Options::default();
    // Relative image references resolve against the SVG's own directory.
    options.resources_dir = fs::canonicalize(svg_file)
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()));
    options.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_data(&svg_data, &options)
        .map_err(|e| DeckError::RenderError(format!("{}: {}", svg_file.display(), e)))?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    debug!(
        "Rendering {:?} at {}x scale -> {}x{}",
        svg_file, scale, width, height
    );

    let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        DeckError::RenderError(format!(
            "{}: cannot allocate a {}x{} canvas",
            svg_file.display(),
            width,
            height
        ))
    })?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    pixmap
        .save_png(png_file)
        .map_err(|e| DeckError::RenderError(format!("{}: {}", png_file.display(), e)))?;
    Ok((width, height))
}
