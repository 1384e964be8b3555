//! PNG snapshots of an animation frame.
//!
//! Feature-gated behind `png` (default on) so the browser build can use the
//! registry without pulling in `image`.

use fuelsense_core::{Animation, FxError, Srgb};
use std::path::Path;

use crate::pixel::PixelCanvas;

/// Writes a canvas as a PNG.
///
/// Returns `FxError::Io` on encode or write failure.
pub fn write_png(canvas: &PixelCanvas, path: &Path) -> Result<(), FxError> {
    let img = image::RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.as_rgba().to_vec())
        .ok_or_else(|| FxError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FxError::Io(e.to_string()))
}

/// Renders the animation's current frame over `background` and writes it to
/// `path`.
pub fn snapshot(animation: &dyn Animation, background: Srgb, path: &Path) -> Result<(), FxError> {
    let surface = animation.surface();
    let mut canvas = PixelCanvas::new(surface.width, surface.height, background)?;
    animation.render(&mut canvas)?;
    write_png(&canvas, path)?;
    log::info!(
        "wrote {}x{} snapshot to {}",
        surface.width,
        surface.height,
        path.display()
    );
    Ok(())
}
