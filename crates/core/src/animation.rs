//! The `Animation` trait implemented by every host-driven background effect.
//!
//! The host owns the frame clock: it calls [`Animation::step`] and then
//! [`Animation::render`] once per display refresh. Animations never schedule
//! themselves, which keeps them testable without a display.
//!
//! The trait is object-safe so hosts can hold a `Box<dyn Animation>`.

use crate::error::FxError;
use crate::surface::{DrawSurface, Surface};
use serde_json::Value;

pub trait Animation {
    /// Advances the simulation by one frame. Infallible: a frame update is
    /// pure arithmetic on owned state.
    fn step(&mut self);

    /// Draws the current state onto `target`.
    fn render(&self, target: &mut dyn DrawSurface) -> Result<(), FxError>;

    /// Records new surface dimensions (viewport resize). Existing state is
    /// kept; only future placement uses the new bounds.
    fn resize(&mut self, surface: Surface);

    /// Current surface dimensions.
    fn surface(&self) -> Surface;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all parameters: type, range, default, description.
    fn param_schema(&self) -> Value;
}
