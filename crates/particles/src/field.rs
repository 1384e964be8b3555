//! The particle field: a fixed set of particles flying toward the viewer.
//!
//! Each frame every particle drifts in the plane and closes in on the
//! viewer. A particle whose depth runs out is recycled at the far plane at a
//! fresh planar position, so the field runs forever with a constant count.

use crate::params::ParticleParams;
use crate::particle::{Particle, Projection};
use fuelsense_core::{Animation, DrawSurface, FxError, Surface, Xorshift64};
use glam::DVec3;
use serde_json::{json, Value};

/// Background particle simulator.
///
/// Owns its particle list exclusively; only [`Animation::step`] mutates it.
pub struct ParticleField {
    particles: Vec<Particle>,
    surface: Surface,
    rng: Xorshift64,
    params: ParticleParams,
    frame: u64,
}

impl ParticleField {
    /// Scatters `params.count` particles over `surface`.
    ///
    /// Planar positions are uniform within the surface bounds, depth uniform
    /// in `(0, max_depth]`, planar velocity uniform in `[-drift, drift)`, and
    /// speed, size, and opacity uniform in their configured ranges.
    pub fn new(surface: Surface, seed: u64, params: ParticleParams) -> Self {
        let mut rng = Xorshift64::new(seed);
        let particles = (0..params.count)
            .map(|_| spawn(&mut rng, surface, &params))
            .collect();
        Self {
            particles,
            surface,
            rng,
            params,
            frame: 0,
        }
    }

    /// Creates a field from a JSON params object; see [`ParticleParams::from_json`].
    ///
    /// Returns `FxError::InvalidDimensions` if either side is zero.
    pub fn from_json(width: u32, height: u32, seed: u64, params: &Value) -> Result<Self, FxError> {
        let surface = Surface::new(width, height)?;
        Ok(Self::new(surface, seed, ParticleParams::from_json(params)))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn settings(&self) -> &ParticleParams {
        &self.params
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Screen-space projection of every particle, in list order.
    pub fn projections(&self) -> impl Iterator<Item = Projection> + '_ {
        self.particles
            .iter()
            .map(|p| p.project(self.surface, self.params.focal_length))
    }
}

/// Draws a fresh particle.
fn spawn(rng: &mut Xorshift64, surface: Surface, params: &ParticleParams) -> Particle {
    let (x, y) = scatter(rng, surface);
    let z = rng.next_range_upper(0.0, params.max_depth);
    let vx = rng.next_range(-params.drift, params.drift);
    let vy = rng.next_range(-params.drift, params.drift);
    let vz = rng.next_range(params.speed.0, params.speed.1);
    Particle {
        position: DVec3::new(x, y, z),
        velocity: DVec3::new(vx, vy, vz),
        size: rng.next_range(params.size.0, params.size.1),
        opacity: rng.next_range(params.opacity.0, params.opacity.1),
    }
}

/// Uniform planar position within the surface bounds.
fn scatter(rng: &mut Xorshift64, surface: Surface) -> (f64, f64) {
    (
        rng.next_range(0.0, surface.width as f64),
        rng.next_range(0.0, surface.height as f64),
    )
}

impl Animation for ParticleField {
    fn step(&mut self) {
        let surface = self.surface;
        let max_depth = self.params.max_depth;
        for particle in &mut self.particles {
            if particle.advance() {
                let (x, y) = scatter(&mut self.rng, surface);
                particle.position = DVec3::new(x, y, max_depth);
                log::trace!("frame {}: recycled particle at ({x:.1}, {y:.1})", self.frame);
            }
        }
        self.frame += 1;
    }

    fn render(&self, target: &mut dyn DrawSurface) -> Result<(), FxError> {
        target.clear()?;
        for proj in self.projections() {
            target.fill_circle(proj.center, proj.radius, self.params.color, proj.alpha)?;
        }
        Ok(())
    }

    fn resize(&mut self, surface: Surface) {
        log::debug!(
            "surface resized {}x{} -> {}x{}",
            self.surface.width,
            self.surface.height,
            surface.width,
            surface.height
        );
        self.surface = surface;
    }

    fn surface(&self) -> Surface {
        self.surface
    }

    fn params(&self) -> Value {
        let mut values = self.params.to_json();
        values["frame"] = json!(self.frame);
        values
    }

    fn param_schema(&self) -> Value {
        ParticleParams::schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fuelsense_core::Srgb;
    use glam::DVec2;

    fn field(seed: u64) -> ParticleField {
        ParticleField::new(Surface::new(800, 600).unwrap(), seed, ParticleParams::default())
    }

    /// Records every draw call.
    #[derive(Default)]
    struct Recorder {
        clears: usize,
        circles: Vec<(DVec2, f64, f64)>,
    }

    impl DrawSurface for Recorder {
        fn surface(&self) -> Surface {
            Surface {
                width: 800,
                height: 600,
            }
        }

        fn clear(&mut self) -> Result<(), FxError> {
            self.clears += 1;
            self.circles.clear();
            Ok(())
        }

        fn fill_circle(
            &mut self,
            center: DVec2,
            radius: f64,
            _color: Srgb,
            alpha: f64,
        ) -> Result<(), FxError> {
            self.circles.push((center, radius, alpha));
            Ok(())
        }
    }

    // ---- construction ----

    #[test]
    fn new_allocates_fifty_particles() {
        assert_eq!(field(1).particles().len(), 50);
    }

    #[test]
    fn initial_particles_are_within_ranges() {
        let f = field(42);
        for p in f.particles() {
            assert!((0.0..800.0).contains(&p.position.x));
            assert!((0.0..600.0).contains(&p.position.y));
            assert!(p.position.z > 0.0 && p.position.z <= 1000.0);
            assert!((-1.0..1.0).contains(&p.velocity.x));
            assert!((-1.0..1.0).contains(&p.velocity.y));
            assert!((1.0..3.0).contains(&p.velocity.z));
            assert!((1.0..4.0).contains(&p.size));
            assert!((0.2..0.7).contains(&p.opacity));
        }
    }

    #[test]
    fn from_json_rejects_zero_surface() {
        assert!(matches!(
            ParticleField::from_json(0, 600, 1, &json!({})),
            Err(FxError::InvalidDimensions)
        ));
    }

    #[test]
    fn from_json_honors_count() {
        let f = ParticleField::from_json(64, 64, 1, &json!({"count": 3})).unwrap();
        assert_eq!(f.particles().len(), 3);
    }

    #[test]
    fn same_seed_same_field() {
        let mut a = field(99);
        let mut b = field(99);
        for _ in 0..600 {
            a.step();
            b.step();
        }
        assert_eq!(a.particles(), b.particles());
    }

    // ---- stepping ----

    #[test]
    fn step_applies_velocity() {
        let mut f = field(5);
        f.particles[0] = Particle {
            position: DVec3::new(100.0, 200.0, 300.0),
            velocity: DVec3::new(0.5, -0.25, 2.0),
            size: 1.0,
            opacity: 0.5,
        };
        f.step();
        assert_eq!(f.particles()[0].position, DVec3::new(100.5, 199.75, 298.0));
        assert_eq!(f.frame(), 1);
    }

    #[test]
    fn exhausted_particle_is_recycled_at_far_plane_within_bounds() {
        let mut f = field(8);
        f.particles[0].position = DVec3::new(-5000.0, 9000.0, 0.5);
        f.particles[0].velocity.z = 1.0;
        let velocity = f.particles[0].velocity;
        f.step();
        let p = f.particles()[0];
        assert_eq!(p.position.z, 1000.0);
        assert!((0.0..800.0).contains(&p.position.x));
        assert!((0.0..600.0).contains(&p.position.y));
        assert_eq!(p.velocity, velocity, "recycling keeps velocity");
    }

    #[test]
    fn count_never_changes() {
        let mut f = field(3);
        for _ in 0..2000 {
            f.step();
        }
        assert_eq!(f.particles().len(), 50);
    }

    #[test]
    fn resize_keeps_positions_and_uses_new_bounds_for_recycling() {
        let mut f = field(11);
        let before: Vec<DVec3> = f.particles().iter().map(|p| p.position).collect();
        f.resize(Surface::new(100, 50).unwrap());
        let after: Vec<DVec3> = f.particles().iter().map(|p| p.position).collect();
        assert_eq!(before, after);
        assert_eq!(f.surface(), Surface::new(100, 50).unwrap());

        f.particles[0].position.z = 0.1;
        f.step();
        let p = f.particles()[0];
        assert_eq!(p.position.z, 1000.0);
        assert!((0.0..100.0).contains(&p.position.x));
        assert!((0.0..50.0).contains(&p.position.y));
    }

    // ---- rendering ----

    #[test]
    fn render_clears_then_draws_one_circle_per_particle() {
        let f = field(21);
        let mut rec = Recorder::default();
        f.render(&mut rec).unwrap();
        assert_eq!(rec.clears, 1);
        assert_eq!(rec.circles.len(), 50);
    }

    #[test]
    fn render_passes_unit_scale_projection_through() {
        let mut f = field(21);
        f.particles[0] = Particle {
            position: DVec3::new(0.0, 0.0, 500.0),
            velocity: DVec3::new(0.0, 0.0, 1.0),
            size: 2.0,
            opacity: 0.4,
        };
        let mut rec = Recorder::default();
        f.render(&mut rec).unwrap();
        let (center, radius, alpha) = rec.circles[0];
        assert_eq!(center, DVec2::new(400.0, 300.0));
        assert_eq!(radius, 2.0);
        assert_eq!(alpha, 0.4);
    }

    #[test]
    fn params_report_frame_and_settings() {
        let mut f = field(1);
        f.step();
        let params = f.params();
        assert_eq!(params["frame"], 1);
        assert_eq!(params["count"], 50);
        assert!(f.param_schema().get("focal_length").is_some());
    }

    #[test]
    fn field_is_usable_as_dyn_animation() {
        let mut anim: Box<dyn Animation> = Box::new(field(2));
        anim.step();
        assert_eq!(anim.surface().width, 800);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(32))]

            #[test]
            fn depth_stays_in_range_every_frame(
                seed: u64,
                width in 1u32..4000,
                height in 1u32..4000,
                frames in 1usize..1500,
            ) {
                let mut f = ParticleField::new(
                    Surface::new(width, height).unwrap(),
                    seed,
                    ParticleParams::default(),
                );
                for _ in 0..frames {
                    f.step();
                    for p in f.particles() {
                        prop_assert!(
                            p.position.z > 0.0 && p.position.z <= 1000.0,
                            "z = {} out of (0, 1000]", p.position.z
                        );
                    }
                }
            }

            #[test]
            fn projection_is_finite_after_any_step_count(seed: u64, frames in 0usize..800) {
                let mut f = field(seed);
                for _ in 0..frames {
                    f.step();
                }
                for proj in f.projections() {
                    prop_assert!(proj.center.is_finite());
                    prop_assert!(proj.radius.is_finite() && proj.radius > 0.0);
                    prop_assert!(proj.alpha.is_finite() && proj.alpha > 0.0);
                }
            }
        }
    }
}
