//! Arithmetic plausibility checks for quantity, rate, and amount.
//!
//! [`validate`] is a pure function of the current field values: no state is
//! carried between events, and re-running it on the same reading gives the
//! same verdict.

use crate::field::FieldName;
use crate::verdict::Verdict;
use fuelsense_core::params::param_f64;
use serde_json::{json, Value};

const DEFAULT_MAX_QUANTITY: f64 = 100.0;
const DEFAULT_MIN_RATE: f64 = 1.0;
const DEFAULT_MAX_RATE: f64 = 3.0;
/// Relative deviation of amount from quantity * rate tolerated before warning.
const DEFAULT_MAX_DEVIATION: f64 = 0.2;

pub const HIGH_QUANTITY: &str = "High quantity - verify accuracy";
pub const UNUSUAL_RATE: &str = "Unusual rate detected";
pub const AMOUNT_OK: &str = "Amount looks correct";

/// Thresholds for the three checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeuristicConfig {
    /// Quantities above this are flagged.
    pub max_quantity: f64,
    /// Rates outside `[min_rate, max_rate]` are flagged.
    pub min_rate: f64,
    pub max_rate: f64,
    /// Largest tolerated `|amount - expected| / expected`.
    pub max_deviation: f64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            max_quantity: DEFAULT_MAX_QUANTITY,
            min_rate: DEFAULT_MIN_RATE,
            max_rate: DEFAULT_MAX_RATE,
            max_deviation: DEFAULT_MAX_DEVIATION,
        }
    }
}

impl HeuristicConfig {
    /// Extracts thresholds from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        let mut config = Self {
            max_quantity: param_f64(params, "max_quantity", DEFAULT_MAX_QUANTITY),
            min_rate: param_f64(params, "min_rate", DEFAULT_MIN_RATE),
            max_rate: param_f64(params, "max_rate", DEFAULT_MAX_RATE),
            max_deviation: param_f64(params, "max_deviation", DEFAULT_MAX_DEVIATION),
        };
        if !(config.min_rate <= config.max_rate) {
            log::warn!(
                "min_rate {} exceeds max_rate {}; using default rate band",
                config.min_rate,
                config.max_rate
            );
            config.min_rate = DEFAULT_MIN_RATE;
            config.max_rate = DEFAULT_MAX_RATE;
        }
        config
    }

    pub fn params(&self) -> Value {
        json!({
            "max_quantity": self.max_quantity,
            "min_rate": self.min_rate,
            "max_rate": self.max_rate,
            "max_deviation": self.max_deviation,
        })
    }

    pub fn param_schema() -> Value {
        json!({
            "max_quantity": {
                "type": "number",
                "default": DEFAULT_MAX_QUANTITY,
                "min": 0.0,
                "description": "Quantities above this value get a warning"
            },
            "min_rate": {
                "type": "number",
                "default": DEFAULT_MIN_RATE,
                "min": 0.0,
                "description": "Lower bound of the usual per-unit rate"
            },
            "max_rate": {
                "type": "number",
                "default": DEFAULT_MAX_RATE,
                "min": 0.0,
                "description": "Upper bound of the usual per-unit rate"
            },
            "max_deviation": {
                "type": "number",
                "default": DEFAULT_MAX_DEVIATION,
                "min": 0.0,
                "max": 1.0,
                "description": "Tolerated relative gap between amount and quantity * rate"
            }
        })
    }
}

/// Raw field values captured when one field changes.
///
/// `value` is the changed field's text. The three tracked siblings are read
/// from the form at the same moment; `None` means the input was absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormReading {
    pub field: Option<FieldName>,
    pub value: String,
    pub quantity: Option<String>,
    pub rate: Option<String>,
    pub amount: Option<String>,
}

impl FormReading {
    /// A reading for `field` changing to `value`. The field's own tracked
    /// slot is filled with the same value.
    pub fn changed(field: FieldName, value: impl Into<String>) -> Self {
        let value = value.into();
        let mut reading = Self {
            value: value.clone(),
            ..Self::default()
        };
        reading.set(&field, Some(value));
        reading.field = Some(field);
        reading
    }

    /// Builder-style setter for a sibling value.
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.set(&field, Some(value.into()));
        self
    }

    pub fn set(&mut self, field: &FieldName, value: Option<String>) {
        match field {
            FieldName::Quantity => self.quantity = value,
            FieldName::Rate => self.rate = value,
            FieldName::Amount => self.amount = value,
            FieldName::Other(_) => {}
        }
    }

    pub fn get(&self, field: &FieldName) -> Option<&str> {
        match field {
            FieldName::Quantity => self.quantity.as_deref(),
            FieldName::Rate => self.rate.as_deref(),
            FieldName::Amount => self.amount.as_deref(),
            FieldName::Other(_) => None,
        }
    }
}

/// Parses a field value as a finite `f64`, ignoring surrounding whitespace.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_positive(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|v| *v > 0.0)
}

/// Classifies the changed field of `reading`.
pub fn validate(reading: &FormReading, config: &HeuristicConfig) -> Verdict {
    let Some(field) = reading.field.as_ref() else {
        return Verdict::neutral();
    };
    let Some(value) = parse_positive(&reading.value) else {
        return Verdict::neutral();
    };

    match field {
        FieldName::Quantity if value > config.max_quantity => Verdict::warning(HIGH_QUANTITY),
        FieldName::Rate if value < config.min_rate || value > config.max_rate => {
            Verdict::warning(UNUSUAL_RATE)
        }
        FieldName::Amount => check_amount(value, reading, config),
        _ => Verdict::valid(),
    }
}

fn check_amount(amount: f64, reading: &FormReading, config: &HeuristicConfig) -> Verdict {
    let sibling = |field: &FieldName| {
        reading
            .get(field)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(parse_number)
    };
    let (Some(quantity), Some(rate)) = (sibling(&FieldName::Quantity), sibling(&FieldName::Rate))
    else {
        return Verdict::neutral();
    };

    let expected = quantity * rate;
    // The deviation divides by `expected`.
    if expected == 0.0 || !expected.is_finite() {
        return Verdict::neutral();
    }

    let deviation = (amount - expected).abs() / expected;
    if deviation > config.max_deviation {
        Verdict::warning(format!("Expected ~${expected:.2}"))
    } else {
        Verdict::valid_with(AMOUNT_OK)
    }
}
