//! CPU drawing surface backed by an RGBA8 buffer.
//!
//! Always available (no feature gate) so tests and the `png` snapshot path
//! share one rasterizer.

use fuelsense_core::color::clamp_alpha;
use fuelsense_core::{DrawSurface, FxError, Srgb, Surface};
use glam::DVec2;

/// An opaque RGBA8 image that circles are alpha-blended onto.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    surface: Surface,
    background: Srgb,
    pixels: Vec<u8>,
}

impl PixelCanvas {
    /// Creates a canvas filled with `background`.
    ///
    /// Returns `FxError::InvalidDimensions` for a zero side or a pixel count
    /// that overflows.
    pub fn new(width: u32, height: u32, background: Srgb) -> Result<Self, FxError> {
        let surface = Surface::new(width, height)?;
        let len = surface
            .area()
            .and_then(|a| a.checked_mul(4))
            .ok_or(FxError::InvalidDimensions)?;
        let mut canvas = Self {
            surface,
            background,
            pixels: vec![0; len],
        };
        canvas.fill_background();
        Ok(canvas)
    }

    pub fn width(&self) -> u32 {
        self.surface.width
    }

    pub fn height(&self) -> u32 {
        self.surface.height
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }

    /// RGBA of pixel `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.surface.width || y >= self.surface.height {
            return None;
        }
        let i = self.index(x, y);
        Some([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.surface.width as usize + x as usize) * 4
    }

    fn fill_background(&mut self) {
        let [r, g, b] = self.background.to_rgb8();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[r, g, b, 255]);
        }
    }

    /// Source-over blend of `color` at `alpha` onto pixel `(x, y)`.
    fn blend(&mut self, x: u32, y: u32, color: [u8; 3], alpha: f64) {
        let i = self.index(x, y);
        for (c, src) in color.iter().enumerate() {
            let dst = self.pixels[i + c] as f64;
            let out = *src as f64 * alpha + dst * (1.0 - alpha);
            self.pixels[i + c] = out.round().clamp(0.0, 255.0) as u8;
        }
    }
}

impl DrawSurface for PixelCanvas {
    fn surface(&self) -> Surface {
        self.surface
    }

    fn clear(&mut self) -> Result<(), FxError> {
        self.fill_background();
        Ok(())
    }

    /// Fills every pixel whose center lies within `radius` of `center`.
    /// Circles partly or wholly off-canvas are clipped.
    fn fill_circle(
        &mut self,
        center: DVec2,
        radius: f64,
        color: Srgb,
        alpha: f64,
    ) -> Result<(), FxError> {
        let alpha = clamp_alpha(alpha);
        if alpha == 0.0 || !(radius > 0.0) || !center.is_finite() {
            return Ok(());
        }
        let w = self.surface.width as f64;
        let h = self.surface.height as f64;
        let x0 = (center.x - radius).floor().max(0.0);
        let x1 = (center.x + radius).ceil().min(w);
        let y0 = (center.y - radius).floor().max(0.0);
        let y1 = (center.y + radius).ceil().min(h);
        if x0 >= x1 || y0 >= y1 {
            return Ok(());
        }

        let rgb = color.to_rgb8();
        let r2 = radius * radius;
        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                let d = DVec2::new(x as f64 + 0.5, y as f64 + 0.5) - center;
                if d.length_squared() <= r2 {
                    self.blend(x, y, rgb, alpha);
                }
            }
        }
        Ok(())
    }
}
