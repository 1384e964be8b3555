//! Tunable constants of the particle field.

use fuelsense_core::params::{param_f64, param_range, param_string, param_usize};
use fuelsense_core::Srgb;
use serde_json::{json, Value};

const DEFAULT_COUNT: usize = 50;
const MAX_COUNT: usize = 5000;
const DEFAULT_MAX_DEPTH: f64 = 1000.0;
const DEFAULT_FOCAL_LENGTH: f64 = 500.0;
/// Planar drift per frame, each axis drawn from `[-DRIFT, DRIFT)`.
const DEFAULT_DRIFT: f64 = 1.0;
const DEFAULT_SPEED: (f64, f64) = (1.0, 3.0);
const DEFAULT_SIZE: (f64, f64) = (1.0, 4.0);
const DEFAULT_OPACITY: (f64, f64) = (0.2, 0.7);
const DEFAULT_COLOR: &str = "#ffffff";

/// Simulation parameters. [`Default`] matches the page background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleParams {
    /// Number of particles, fixed for the life of the field.
    pub count: usize,
    /// Depth particles start from when recycled.
    pub max_depth: f64,
    /// Depth at which the projection scale is exactly 1.
    pub focal_length: f64,
    pub drift: f64,
    /// `[min, max)` closing speed per frame.
    pub speed: (f64, f64),
    /// `[min, max)` base radius.
    pub size: (f64, f64),
    /// `[min, max)` base alpha.
    pub opacity: (f64, f64),
    pub color: Srgb,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            max_depth: DEFAULT_MAX_DEPTH,
            focal_length: DEFAULT_FOCAL_LENGTH,
            drift: DEFAULT_DRIFT,
            speed: DEFAULT_SPEED,
            size: DEFAULT_SIZE,
            opacity: DEFAULT_OPACITY,
            color: Srgb::WHITE,
        }
    }
}

impl ParticleParams {
    /// Extracts parameters from a JSON object, falling back to defaults for
    /// missing keys and for values that would break the depth invariant.
    pub fn from_json(params: &Value) -> Self {
        let positive = |name: &str, default: f64| {
            let v = param_f64(params, name, default);
            if v.is_finite() && v > 0.0 {
                v
            } else {
                log::warn!("ignoring non-positive {name} = {v}; using {default}");
                default
            }
        };
        let color_hex = param_string(params, "color", DEFAULT_COLOR);
        let color = Srgb::from_hex(&color_hex).unwrap_or_else(|e| {
            log::warn!("ignoring color {color_hex:?}: {e}");
            Srgb::WHITE
        });
        let mut count = param_usize(params, "count", DEFAULT_COUNT);
        if count > MAX_COUNT {
            log::warn!("particle count {count} exceeds {MAX_COUNT}; capping");
            count = MAX_COUNT;
        }
        let mut speed = param_range(params, "speed", DEFAULT_SPEED);
        if speed.0 <= 0.0 {
            log::warn!("closing speed must be positive; using default speed range");
            speed = DEFAULT_SPEED;
        }

        Self {
            count,
            max_depth: positive("max_depth", DEFAULT_MAX_DEPTH),
            focal_length: positive("focal_length", DEFAULT_FOCAL_LENGTH),
            drift: Some(param_f64(params, "drift", DEFAULT_DRIFT).abs())
                .filter(|d| d.is_finite())
                .unwrap_or(DEFAULT_DRIFT),
            speed,
            size: param_range(params, "size", DEFAULT_SIZE),
            opacity: param_range(params, "opacity", DEFAULT_OPACITY),
            color,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "count": self.count,
            "max_depth": self.max_depth,
            "focal_length": self.focal_length,
            "drift": self.drift,
            "min_speed": self.speed.0,
            "max_speed": self.speed.1,
            "min_size": self.size.0,
            "max_size": self.size.1,
            "min_opacity": self.opacity.0,
            "max_opacity": self.opacity.1,
            "color": self.color.to_hex(),
        })
    }

    pub fn schema() -> Value {
        json!({
            "count": {
                "type": "integer",
                "default": DEFAULT_COUNT,
                "min": 0,
                "max": MAX_COUNT,
                "description": "Number of particles"
            },
            "max_depth": {
                "type": "number",
                "default": DEFAULT_MAX_DEPTH,
                "min": 1.0,
                "description": "Depth a particle starts from when recycled"
            },
            "focal_length": {
                "type": "number",
                "default": DEFAULT_FOCAL_LENGTH,
                "min": 1.0,
                "description": "Depth at which projection scale is 1"
            },
            "drift": {
                "type": "number",
                "default": DEFAULT_DRIFT,
                "min": 0.0,
                "max": 10.0,
                "description": "Largest planar velocity per frame on each axis"
            },
            "min_speed": {
                "type": "number",
                "default": DEFAULT_SPEED.0,
                "min": 0.0,
                "description": "Lowest closing speed per frame"
            },
            "max_speed": {
                "type": "number",
                "default": DEFAULT_SPEED.1,
                "min": 0.0,
                "description": "Closing speed upper bound (exclusive)"
            },
            "min_size": {
                "type": "number",
                "default": DEFAULT_SIZE.0,
                "min": 0.0,
                "description": "Smallest base radius"
            },
            "max_size": {
                "type": "number",
                "default": DEFAULT_SIZE.1,
                "min": 0.0,
                "description": "Base radius upper bound (exclusive)"
            },
            "min_opacity": {
                "type": "number",
                "default": DEFAULT_OPACITY.0,
                "min": 0.0,
                "max": 1.0,
                "description": "Lowest base alpha"
            },
            "max_opacity": {
                "type": "number",
                "default": DEFAULT_OPACITY.1,
                "min": 0.0,
                "max": 1.0,
                "description": "Base alpha upper bound (exclusive)"
            },
            "color": {
                "type": "string",
                "default": DEFAULT_COLOR,
                "description": "Particle color as #rrggbb"
            }
        })
    }
}
