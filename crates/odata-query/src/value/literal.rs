use super::Value;
use chrono::SecondsFormat;
use std::fmt::Display;

// render
pub(super) fn render(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Uint(v) => v.to_string(),
        Value::Float32(v) => render_float(*v),
        Value::Float(v) => render_float(*v),
        Value::Decimal(v) => v.normalize().to_string(),
        Value::Text(v) => quote_text(v),
        Value::Guid(v) => v.hyphenated().to_string(),
        Value::Date(v) => v.format("%Y-%m-%d").to_string(),
        Value::TimeOfDay(v) => v.format("%H:%M:%S%.f").to_string(),
        Value::DateTime(v) => v.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        Value::Duration(v) => format!("duration'{v}'"),
    }
}

/// Single-quote a string literal, doubling embedded quotes.
fn quote_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for ch in text.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');

    out
}

// Display for f32/f64 already yields the shortest round-trip form of that
// width and never an exponent; only the non-finite cases need protocol
// keywords. Widening is used for classification only.
fn render_float<F: Copy + Display + Into<f64>>(v: F) -> String {
    let wide: f64 = v.into();

    if wide.is_nan() {
        "NaN".to_string()
    } else if wide.is_infinite() {
        let keyword = if wide.is_sign_positive() { "INF" } else { "-INF" };
        keyword.to_string()
    } else {
        v.to_string()
    }
}
