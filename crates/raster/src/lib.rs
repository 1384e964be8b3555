#![deny(unsafe_code)]
//! Animation registry: maps animation names to implementations and provides
//! CPU-side rendering.
//!
//! Sits between `fuelsense-core` (which defines the `Animation` trait) and
//! the animation crates. Both the CLI and the browser host construct
//! animations through [`AnimationKind`].

pub mod pixel;

#[cfg(feature = "png")]
pub mod snapshot;

use fuelsense_core::{Animation, DrawSurface, FxError, Surface};
use fuelsense_particles::ParticleField;
use serde_json::Value;

const ANIMATION_NAMES: &[&str] = &["particles"];

/// Every available background animation.
pub enum AnimationKind {
    /// Perspective particle field.
    Particles(ParticleField),
}

impl AnimationKind {
    /// Constructs an animation by name.
    ///
    /// Returns `FxError::InvalidConfig` if the name is not recognized.
    pub fn from_name(
        name: &str,
        width: u32,
        height: u32,
        seed: u64,
        params: &Value,
    ) -> Result<Self, FxError> {
        match name {
            "particles" => Ok(AnimationKind::Particles(ParticleField::from_json(
                width, height, seed, params,
            )?)),
            _ => Err(FxError::InvalidConfig(format!("unknown animation: {name}"))),
        }
    }

    pub fn list_animations() -> &'static [&'static str] {
        ANIMATION_NAMES
    }
}

impl Animation for AnimationKind {
    fn step(&mut self) {
        match self {
            AnimationKind::Particles(a) => a.step(),
        }
    }

    fn render(&self, target: &mut dyn DrawSurface) -> Result<(), FxError> {
        match self {
            AnimationKind::Particles(a) => a.render(target),
        }
    }

    fn resize(&mut self, surface: Surface) {
        match self {
            AnimationKind::Particles(a) => a.resize(surface),
        }
    }

    fn surface(&self) -> Surface {
        match self {
            AnimationKind::Particles(a) => a.surface(),
        }
    }

    fn params(&self) -> Value {
        match self {
            AnimationKind::Particles(a) => a.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            AnimationKind::Particles(a) => a.param_schema(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pixel::PixelCanvas;
    use fuelsense_core::Srgb;
    use serde_json::json;

    #[test]
    fn from_name_particles_succeeds() {
        assert!(AnimationKind::from_name("particles", 32, 32, 42, &json!({})).is_ok());
    }

    #[test]
    fn from_name_unknown_returns_error() {
        let result = AnimationKind::from_name("confetti", 32, 32, 42, &json!({}));
        assert!(matches!(result, Err(FxError::InvalidConfig(_))));
    }

    #[test]
    fn from_name_propagates_bad_dimensions() {
        let result = AnimationKind::from_name("particles", 0, 32, 42, &json!({}));
        assert!(matches!(result, Err(FxError::InvalidDimensions)));
    }

    #[test]
    fn list_animations_includes_particles() {
        assert!(AnimationKind::list_animations().contains(&"particles"));
    }

    #[test]
    fn trait_delegation_step_resize_params() {
        let mut anim = AnimationKind::from_name("particles", 16, 16, 42, &json!({})).unwrap();
        anim.step();
        assert_eq!(anim.params()["frame"], 1);
        anim.resize(Surface::new(20, 10).unwrap());
        assert_eq!(anim.surface().width, 20);
        assert!(anim.param_schema().get("count").is_some());
    }

    #[test]
    fn determinism_same_seed_same_pixels() {
        let render = || {
            let mut anim =
                AnimationKind::from_name("particles", 48, 32, 7, &json!({"count": 200})).unwrap();
            for _ in 0..30 {
                anim.step();
            }
            let mut canvas = PixelCanvas::new(48, 32, Srgb::BLACK).unwrap();
            anim.render(&mut canvas).unwrap();
            canvas.into_rgba()
        };
        assert_eq!(render(), render());
    }

    #[test]
    fn object_safety() {
        let anim = AnimationKind::from_name("particles", 16, 16, 42, &json!({})).unwrap();
        let boxed: Box<dyn Animation> = Box::new(anim);
        assert_eq!(boxed.surface().height, 16);
    }
}
