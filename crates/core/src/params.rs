//! Typed lookups into a JSON parameter object.
//!
//! Each helper returns `default` when the key is missing or holds the wrong
//! JSON type, so a partial or empty object always yields usable settings.

use serde_json::Value;

/// `params[name]` as `f64` (integers accepted), else `default`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// `params[name]` as a non-negative integer, else `default`.
///
/// Values beyond `usize::MAX` saturate so range checks still see them.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| usize::try_from(v).unwrap_or(usize::MAX))
        .unwrap_or(default)
}

/// `params[name]` as `bool`, else `default`.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_f64_reads_floats_and_integers() {
        let params = json!({"curve": 2.5, "zoom": 1});
        assert!((param_f64(&params, "curve", 0.0) - 2.5).abs() < f64::EPSILON);
        assert!((param_f64(&params, "zoom", 0.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_falls_back_on_missing_or_wrong_type() {
        let params = json!({"curve": "steep", "zoom": null});
        assert!((param_f64(&params, "curve", 2.1) - 2.1).abs() < f64::EPSILON);
        assert!((param_f64(&params, "zoom", 0.01) - 0.01).abs() < f64::EPSILON);
        assert!((param_f64(&params, "absent", 4.0) - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_falls_back_for_non_object() {
        let params = json!([1, 2, 3]);
        assert!((param_f64(&params, "curve", 7.0) - 7.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_usize_reads_non_negative_integers() {
        assert_eq!(param_usize(&json!({"cell_size": 8}), "cell_size", 5), 8);
    }

    #[test]
    fn param_usize_keeps_huge_values_huge() {
        let got = param_usize(&json!({"particle_count": u64::MAX}), "particle_count", 500);
        assert!(got > 1_000_000, "huge value fell back to {got}");
    }

    #[test]
    fn param_usize_rejects_floats_and_negatives() {
        assert_eq!(param_usize(&json!({"cell_size": 2.5}), "cell_size", 5), 5);
        assert_eq!(param_usize(&json!({"cell_size": -3}), "cell_size", 5), 5);
        assert_eq!(param_usize(&json!({"cell_size": "big"}), "cell_size", 5), 5);
    }

    #[test]
    fn param_bool_reads_and_falls_back() {
        assert!(param_bool(&json!({"debug_grid": true}), "debug_grid", false));
        assert!(!param_bool(&json!({"debug_grid": 1}), "debug_grid", false));
        assert!(param_bool(&json!({}), "debug_grid", true));
    }
}
