//! Cell coercions over Polars `AnyValue`.

use polars::prelude::AnyValue;

/// Trimmed text of a cell; `None` for null cells and cells holding only whitespace.
///
/// ```
/// use polars::prelude::AnyValue;
/// use dqi_common::any_to_string_non_empty;
///
/// assert_eq!(any_to_string_non_empty(AnyValue::String(" S-1 ")), Some("S-1".to_string()));
/// assert_eq!(any_to_string_non_empty(AnyValue::Float64(101.0)), Some("101".to_string()));
/// assert_eq!(any_to_string_non_empty(AnyValue::String("   ")), None);
/// ```
pub fn any_to_string_non_empty(value: AnyValue<'_>) -> Option<String> {
    let text = match value {
        AnyValue::Null => return None,
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        other => other.to_string().trim().to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Whole floats print without a fraction, so `101.0` reads as site `101`.
pub fn format_numeric(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        (value as i64).to_string()
    } else {
        value.to_string()
    }
}

/// Non-negative count of a cell.
///
/// Fractions truncate, negatives and non-numeric text become 0, and values
/// beyond `u64::MAX` saturate.
///
/// ```
/// use polars::prelude::AnyValue;
/// use dqi_common::any_to_count;
///
/// assert_eq!(any_to_count(AnyValue::Float64(12.9)), 12);
/// assert_eq!(any_to_count(AnyValue::String("12.0")), 12);
/// assert_eq!(any_to_count(AnyValue::Int64(-3)), 0);
/// assert_eq!(any_to_count(AnyValue::String("n/a")), 0);
/// ```
pub fn any_to_count(value: AnyValue<'_>) -> u64 {
    match value {
        AnyValue::UInt8(v) => u64::from(v),
        AnyValue::UInt16(v) => u64::from(v),
        AnyValue::UInt32(v) => u64::from(v),
        AnyValue::UInt64(v) => v,
        AnyValue::Int8(v) => signed_count(i64::from(v)),
        AnyValue::Int16(v) => signed_count(i64::from(v)),
        AnyValue::Int32(v) => signed_count(i64::from(v)),
        AnyValue::Int64(v) => signed_count(v),
        AnyValue::Float32(v) => float_count(f64::from(v)),
        AnyValue::Float64(v) => float_count(v),
        AnyValue::String(s) => text_count(s),
        AnyValue::StringOwned(s) => text_count(&s),
        _ => 0,
    }
}

fn signed_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

fn float_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        // `as` saturates at u64::MAX.
        value.trunc() as u64
    } else {
        0
    }
}

fn text_count(text: &str) -> u64 {
    let text = text.trim();
    text.parse::<u64>()
        .unwrap_or_else(|_| text.parse::<f64>().map_or(0, float_count))
}
