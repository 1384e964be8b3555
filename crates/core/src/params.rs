//! Never-failing extraction of typed settings from a JSON params object.
//!
//! Missing keys and wrong types fall back to the caller's default, so a
//! partial or stale config always yields a usable component.

use serde_json::Value;

/// Reads `params[name]` as `f64`. Integers are accepted.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads `params[name]` as a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}

pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Reads a `[min, max)` pair stored as `min_<name>` / `max_<name>`.
///
/// Inverted or non-finite pairs are rejected in favor of the defaults, with a
/// warning, so random draws never run backwards.
pub fn param_range(params: &Value, name: &str, default: (f64, f64)) -> (f64, f64) {
    let min = param_f64(params, &format!("min_{name}"), default.0);
    let max = param_f64(params, &format!("max_{name}"), default.1);
    if min.is_finite() && max.is_finite() && min < max {
        (min, max)
    } else {
        log::warn!(
            "ignoring {name} range [{min}, {max}); using [{}, {})",
            default.0,
            default.1
        );
        default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_extracts_float_and_integer() {
        let params = json!({"max_rate": 3.5, "max_quantity": 120});
        assert_eq!(param_f64(&params, "max_rate", 3.0), 3.5);
        assert_eq!(param_f64(&params, "max_quantity", 100.0), 120.0);
    }

    #[test]
    fn param_f64_falls_back_on_missing_or_wrong_type() {
        let params = json!({"max_rate": "high", "min_rate": null});
        assert_eq!(param_f64(&params, "max_rate", 3.0), 3.0);
        assert_eq!(param_f64(&params, "min_rate", 1.0), 1.0);
        assert_eq!(param_f64(&params, "absent", 0.2), 0.2);
    }

    #[test]
    fn param_f64_falls_back_for_non_object() {
        assert_eq!(param_f64(&json!([1, 2]), "count", 7.0), 7.0);
    }

    #[test]
    fn param_usize_rejects_floats_and_negatives() {
        assert_eq!(param_usize(&json!({"count": 80}), "count", 50), 80);
        assert_eq!(param_usize(&json!({"count": 2.5}), "count", 50), 50);
        assert_eq!(param_usize(&json!({"count": -1}), "count", 50), 50);
    }

    #[test]
    fn param_string_reads_and_defaults() {
        assert_eq!(param_string(&json!({"color": "#88ccff"}), "color", "#ffffff"), "#88ccff");
        assert_eq!(param_string(&json!({"color": 3}), "color", "#ffffff"), "#ffffff");
    }

    #[test]
    fn param_range_accepts_ordered_pair() {
        let params = json!({"min_speed": 0.5, "max_speed": 4.0});
        assert_eq!(param_range(&params, "speed", (1.0, 3.0)), (0.5, 4.0));
    }

    #[test]
    fn param_range_rejects_inverted_pair() {
        let params = json!({"min_size": 5.0, "max_size": 2.0});
        assert_eq!(param_range(&params, "size", (1.0, 4.0)), (1.0, 4.0));
    }

    #[test]
    fn param_range_rejects_empty_pair() {
        let params = json!({"min_size": 2.0, "max_size": 2.0});
        assert_eq!(param_range(&params, "size", (1.0, 4.0)), (1.0, 4.0));
    }
}
