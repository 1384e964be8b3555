//! Full-viewport canvas background.

use crate::{document, host_error, to_js};
use fuelsense_core::{Animation, DrawSurface, FxError, Srgb, Surface};
use fuelsense_raster::AnimationKind;
use glam::DVec2;
use std::f64::consts::TAU;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// A `<canvas>` element drawn through its 2D context.
struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    fn from_id(id: &str) -> Result<Self, FxError> {
        let canvas = document()?
            .get_element_by_id(id)
            .ok_or_else(|| FxError::HostUnavailable(format!("no element #{id}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| FxError::HostUnavailable(format!("#{id} is not a canvas")))?;
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| host_error("getContext", e))?
            .ok_or_else(|| FxError::HostUnavailable("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| FxError::HostUnavailable("unexpected 2d context type".into()))?;
        Ok(Self { canvas, ctx })
    }

    fn set_size(&self, surface: Surface) {
        self.canvas.set_width(surface.width);
        self.canvas.set_height(surface.height);
    }
}

impl DrawSurface for CanvasSurface {
    fn surface(&self) -> Surface {
        Surface {
            width: self.canvas.width(),
            height: self.canvas.height(),
        }
    }

    fn clear(&mut self) -> Result<(), FxError> {
        let s = self.surface();
        self.ctx.clear_rect(0.0, 0.0, s.width as f64, s.height as f64);
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: DVec2,
        radius: f64,
        color: Srgb,
        alpha: f64,
    ) -> Result<(), FxError> {
        // arc() throws on a negative radius.
        if !(radius >= 0.0) {
            return Ok(());
        }
        self.ctx.begin_path();
        self.ctx
            .arc(center.x, center.y, radius, 0.0, TAU)
            .map_err(|e| host_error("arc", e))?;
        self.ctx.set_fill_style_str(&color.to_css_rgba(alpha));
        self.ctx.fill();
        Ok(())
    }
}

/// The particle background bound to a canvas element.
#[wasm_bindgen]
pub struct ParticleBackground {
    animation: AnimationKind,
    canvas: CanvasSurface,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Binds to `<canvas id=canvas_id>`, sizes it to `width` x `height`
    /// (normally the viewport), and scatters the particles.
    ///
    /// `params_json` overrides particle settings; pass `"{}"` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        width: u32,
        height: u32,
        seed: u32,
        params_json: &str,
    ) -> Result<ParticleBackground, JsValue> {
        let params: serde_json::Value = serde_json::from_str(params_json)
            .map_err(|e| to_js(FxError::InvalidConfig(e.to_string())))?;
        let canvas = CanvasSurface::from_id(canvas_id).map_err(to_js)?;
        let animation = AnimationKind::from_name("particles", width, height, seed as u64, &params)
            .map_err(to_js)?;
        canvas.set_size(animation.surface());
        Ok(Self { animation, canvas })
    }

    /// One display refresh: advance every particle, then redraw.
    pub fn frame(&mut self) -> Result<(), JsValue> {
        self.animation.step();
        self.animation.render(&mut self.canvas).map_err(to_js)
    }

    /// Viewport resize. Particles keep their positions; recycled ones use
    /// the new bounds.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        let surface = Surface::new(width, height).map_err(to_js)?;
        self.canvas.set_size(surface);
        self.animation.resize(surface);
        Ok(())
    }

    /// Current particle settings and frame count as a JSON string.
    pub fn params(&self) -> String {
        self.animation.params().to_string()
    }
}
