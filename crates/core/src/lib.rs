#![deny(unsafe_code)]
//! Core types and traits for fuelsense.
//!
//! Provides the `Animation` trait driven by a host frame clock, the
//! `DrawSurface` capability and `Surface` dimensions, the `Srgb` color type,
//! the `Xorshift64` PRNG, JSON parameter helpers, and `FxError`.

pub mod animation;
pub mod color;
pub mod error;
pub mod params;
pub mod prng;
pub mod surface;

pub use animation::Animation;
pub use color::Srgb;
pub use error::FxError;
pub use prng::Xorshift64;
pub use surface::{DrawSurface, Surface};
