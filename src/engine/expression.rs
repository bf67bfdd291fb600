//! Zoom-aware numeric value scaling.
//!
//! Paint and layout numbers in a style come in three shapes:
//! - a plain number: `2`
//! - a modern expression: `["interpolate", ["linear"], ["zoom"], 10, 2, 14, 4]`
//!   (or `["step", ["zoom"], 1, 12, 2]`)
//! - a legacy function: `{"base": 1.2, "stops": [[10, 2], [14, 4]]}`
//!
//! [`scale_value`] multiplies every output magnitude by a factor and leaves
//! breakpoints alone. Unrecognized shapes come back unchanged.

// Allow intentional casts between i64/f64 for integral results
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
// Exact comparison against the identity factor is intended
#![allow(clippy::float_cmp)]

use serde_json::{Number, Value};

/// Largest magnitude an `f64` represents exactly as an integer.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Scales every output magnitude of `value` by `factor`.
///
/// A factor of exactly 1.0, or one that is not a positive finite number,
/// returns the value unchanged.
///
/// # Examples
///
/// ```
/// use posterstyle::engine::expression::scale_value;
/// use serde_json::json;
///
/// let width = json!(["interpolate", ["linear"], ["zoom"], 10, 2, 14, 4]);
/// assert_eq!(
///     scale_value(&width, 2.0),
///     json!(["interpolate", ["linear"], ["zoom"], 10, 4, 14, 8])
/// );
/// assert_eq!(scale_value(&json!("bold"), 2.0), json!("bold"));
/// ```
#[must_use]
pub fn scale_value(value: &Value, factor: f64) -> Value {
    if !factor.is_finite() || factor <= 0.0 || factor == 1.0 {
        return value.clone();
    }
    scale(value, factor)
}

fn scale(value: &Value, factor: f64) -> Value {
    match value {
        Value::Number(n) => scale_number(n, factor),
        Value::Array(items) => scale_expression(items, factor).unwrap_or_else(|| value.clone()),
        Value::Object(map) if map.get("stops").is_some_and(Value::is_array) => {
            let mut scaled = map.clone();
            if let Some(Value::Array(stops)) = map.get("stops") {
                let stops = stops.iter().map(|stop| scale_stop(stop, factor)).collect();
                scaled.insert("stops".to_string(), Value::Array(stops));
            }
            Value::Object(scaled)
        }
        _ => value.clone(),
    }
}

/// Legacy `[input, output]` pair; only the output is scaled.
fn scale_stop(stop: &Value, factor: f64) -> Value {
    match stop.as_array() {
        Some(pair) if pair.len() == 2 => {
            Value::Array(vec![pair[0].clone(), scale(&pair[1], factor)])
        }
        _ => stop.clone(),
    }
}

fn scale_expression(items: &[Value], factor: f64) -> Option<Value> {
    let operator = items.first()?.as_str()?;
    // Outputs sit at every other index starting here.
    let first_output = match operator {
        // ["interpolate", interpolation, input, z0, v0, z1, v1, ...]
        "interpolate" | "interpolate-hcl" | "interpolate-lab" => 4,
        // ["step", input, v0, z1, v1, ...]
        "step" => 2,
        _ => return None,
    };
    if items.len() < first_output + 1 {
        return None;
    }

    let scaled = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let is_output = i >= first_output && (i - first_output) % 2 == 0;
            if is_output {
                scale(item, factor)
            } else {
                item.clone()
            }
        })
        .collect();
    Some(Value::Array(scaled))
}

fn scale_number(n: &Number, factor: f64) -> Value {
    let Some(original) = n.as_f64() else {
        return Value::Number(n.clone());
    };
    let scaled = original * factor;
    if n.is_f64() {
        return Number::from_f64(scaled).map_or_else(|| Value::Number(n.clone()), Value::Number);
    }
    if scaled.fract() == 0.0 && scaled.abs() < MAX_EXACT_INTEGER {
        Value::from(scaled as i64)
    } else {
        Number::from_f64(scaled).map_or_else(|| Value::Number(n.clone()), Value::Number)
    }
}
