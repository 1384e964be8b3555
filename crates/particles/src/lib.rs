#![deny(unsafe_code)]
//! Perspective particle field drawn behind the purchase form.
//!
//! A fixed list of particles drifts across the plane while closing in on the
//! viewer; each frame they are projected with `scale = focal_length / z` and
//! drawn as circles whose size and alpha grow as they approach. The host
//! calls [`Animation::step`](fuelsense_core::Animation::step) once per frame.

pub mod field;
pub mod params;
pub mod particle;

pub use field::ParticleField;
pub use params::ParticleParams;
pub use particle::{Particle, Projection};
