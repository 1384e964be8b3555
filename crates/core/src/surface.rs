//! Drawing surface dimensions and the circle-drawing capability hosts provide.

use crate::color::Srgb;
use crate::error::FxError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Pixel dimensions of a drawing surface (a full-viewport canvas in the
/// browser, an RGBA buffer on the CPU).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surface {
    pub width: u32,
    pub height: u32,
}

impl Surface {
    /// Returns `FxError::InvalidDimensions` if either side is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, FxError> {
        if width == 0 || height == 0 {
            return Err(FxError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    /// Center point; the perspective projection's vanishing point.
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }

    /// Number of pixels, or `None` if it overflows `usize`.
    pub fn area(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }
}

/// Minimal 2D drawing capability: clear and filled circles.
///
/// `alpha` is passed through exactly as computed and may exceed 1 (or be
/// NaN); implementors clamp it. Drawing to a canvas can fail on the host
/// side, hence the `Result`.
pub trait DrawSurface {
    /// Current surface dimensions.
    fn surface(&self) -> Surface;

    /// Erases the whole surface.
    fn clear(&mut self) -> Result<(), FxError>;

    /// Fills a circle centered at `center` with `radius` pixels.
    fn fill_circle(
        &mut self,
        center: DVec2,
        radius: f64,
        color: Srgb,
        alpha: f64,
    ) -> Result<(), FxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_non_zero_dimensions() {
        let s = Surface::new(1920, 1080).unwrap();
        assert_eq!(s.width, 1920);
        assert_eq!(s.height, 1080);
    }

    #[test]
    fn new_rejects_zero_width_or_height() {
        assert!(matches!(Surface::new(0, 10), Err(FxError::InvalidDimensions)));
        assert!(matches!(Surface::new(10, 0), Err(FxError::InvalidDimensions)));
    }

    #[test]
    fn center_is_half_of_each_side() {
        let s = Surface::new(801, 600).unwrap();
        assert_eq!(s.center(), DVec2::new(400.5, 300.0));
    }

    #[test]
    fn area_multiplies_sides() {
        assert_eq!(Surface::new(4, 3).unwrap().area(), Some(12));
    }

    #[test]
    fn json_round_trip() {
        let s = Surface::new(320, 240).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let back: Surface = serde_json::from_str(&json).unwrap();
        assert_eq!(s, back);
    }
}
