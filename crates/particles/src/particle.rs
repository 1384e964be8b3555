//! A single depth-moving point and its perspective projection.

use fuelsense_core::Surface;
use glam::{DVec2, DVec3};

/// One simulated point.
///
/// `position.z` is depth: distance from the viewer, kept in
/// `(0, max_depth]` by [`ParticleField::step`](crate::ParticleField).
/// `velocity.z` is the closing speed and is subtracted from depth, so it is
/// always positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Base radius before perspective scaling.
    pub size: f64,
    /// Base alpha before perspective scaling.
    pub opacity: f64,
}

/// Where and how large a particle appears on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub center: DVec2,
    pub radius: f64,
    /// `opacity * scale`; not clamped, may exceed 1.
    pub alpha: f64,
    pub scale: f64,
}

impl Particle {
    /// Moves by one frame: planar drift plus closing in on the viewer.
    ///
    /// Returns `true` when depth is exhausted (`z <= 0`) and the particle
    /// needs recycling.
    pub fn advance(&mut self) -> bool {
        self.position.x += self.velocity.x;
        self.position.y += self.velocity.y;
        self.position.z -= self.velocity.z;
        self.position.z <= 0.0
    }

    /// Projects onto `surface` with `scale = focal_length / z`, offset to the
    /// surface center.
    ///
    /// Callers guarantee `z > 0`.
    pub fn project(&self, surface: Surface, focal_length: f64) -> Projection {
        let scale = focal_length / self.position.z;
        Projection {
            center: self.position.truncate() * scale + surface.center(),
            radius: self.size * scale,
            alpha: self.opacity * scale,
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle(z: f64) -> Particle {
        Particle {
            position: DVec3::new(10.0, -4.0, z),
            velocity: DVec3::new(0.5, -1.0, 2.0),
            size: 2.0,
            opacity: 0.5,
        }
    }

    fn surface() -> Surface {
        Surface::new(800, 600).unwrap()
    }

    #[test]
    fn advance_moves_by_velocity_and_closes_depth() {
        let mut p = particle(500.0);
        let exhausted = p.advance();
        assert!(!exhausted);
        assert_eq!(p.position, DVec3::new(10.5, -5.0, 498.0));
    }

    #[test]
    fn advance_reports_exhaustion_at_zero_depth() {
        let mut p = particle(2.0);
        assert!(p.advance());
        assert_eq!(p.position.z, 0.0);
    }

    #[test]
    fn projection_at_half_focal_depth_is_unit_scale() {
        let p = particle(500.0);
        let proj = p.project(surface(), 500.0);
        assert_eq!(proj.scale, 1.0);
        assert_eq!(proj.radius, 2.0);
        assert_eq!(proj.alpha, 0.5);
        assert_eq!(proj.center, DVec2::new(410.0, 296.0));
    }

    #[test]
    fn near_particles_grow_and_can_exceed_full_alpha() {
        let p = particle(100.0);
        let proj = p.project(surface(), 500.0);
        assert_eq!(proj.scale, 5.0);
        assert_eq!(proj.radius, 10.0);
        assert!(proj.alpha > 1.0, "alpha {} should be left unclamped", proj.alpha);
        assert_eq!(proj.center, DVec2::new(450.0, 280.0));
    }

    #[test]
    fn far_particles_shrink_toward_center() {
        let p = particle(1000.0);
        let proj = p.project(surface(), 500.0);
        assert_eq!(proj.scale, 0.5);
        assert_eq!(proj.center, DVec2::new(405.0, 298.0));
    }
}
