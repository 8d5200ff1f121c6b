//! Cell coercion rules
//!
//! Spreadsheet cells may hold the same identifier as a number or as text.
//! Both sides are brought to a numeric form before comparing.

use serde_json::{Number, Value};

/// Whether a cell holds the identifier `id`
///
/// Numbers match when numerically equal; strings match when, trimmed and
/// non-empty, they parse as an integer or finite float equal to `id`.
/// Booleans, nulls and nested values never match.
pub fn matches_id(cell: &Value, id: i64) -> bool {
    match cell {
        Value::Number(n) => number_equals(n, id),
        Value::String(s) => text_equals(s, id),
        _ => false,
    }
}

fn number_equals(n: &Number, id: i64) -> bool {
    if let Some(i) = n.as_i64() {
        return i == id;
    }
    if n.is_u64() {
        // Anything that does not fit in i64 cannot equal an i64
        return false;
    }
    n.as_f64().is_some_and(|f| float_equals(f, id))
}

fn text_equals(s: &str, id: i64) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    if let Ok(i) = s.parse::<i64>() {
        return i == id;
    }
    s.parse::<f64>()
        .is_ok_and(|f| f.is_finite() && float_equals(f, id))
}

/// 2^63, the first float past the end of the i64 range
const I64_END: f64 = 9_223_372_036_854_775_808.0;

/// Whole floats compare through i64 so ids above 2^53 need an exact value
#[allow(clippy::cast_possible_truncation)]
fn float_equals(f: f64, id: i64) -> bool {
    f.fract() == 0.0 && (-I64_END..I64_END).contains(&f) && f as i64 == id
}

/// Text used when a header cell becomes an object key
///
/// Whole-number floats drop their fraction, so a `1.0` header reads `"1"`.
pub fn header_key(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Number(n) if n.is_f64() => n
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() < 1e21)
            .map_or_else(|| n.to_string(), |f| format!("{}", f + 0.0)),
        other => other.to_string(),
    }
}
