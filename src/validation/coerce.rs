//! Lenient `serde` deserializers for request bodies.
//!
//! Bodies reach the handlers only after the route's [`RuleSet`](super::RuleSet)
//! accepted them, so these accept every form the rules let through: numeric
//! strings for numbers, `"true"`/`"false"`/`"1"`/`"0"` and `1`/`0` for flags,
//! and any value at all for text.

use serde::de::{self, Deserializer, Unexpected};
use serde::Deserialize;
use serde_json::Value;

/// Render any value to text; arrays and objects keep their JSON form
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// A JSON number or a string holding one
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Number(n) => {
            n.as_f64().ok_or_else(|| de::Error::custom(format!("number {} out of range", n)))
        }
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(&s), &"a numeric string")),
        other => Err(de::Error::custom(format!("expected a number, found {}", other))),
    }
}

/// A boolean, or one of its textual and numeric spellings
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    parse_flag(&value).ok_or_else(|| de::Error::custom(format!("expected a boolean, found {}", value)))
}

fn parse_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    }
}
