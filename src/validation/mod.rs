//! # Validation Module
//!
//! Field-level request validation. A [`RuleSet`] is an ordered list of fields,
//! each carrying an ordered list of independent predicate + message pairs.
//! Every pair is evaluated, so one request can yield several errors for the
//! same field, and all of them are reported together.
//!
//! Values are judged the way a string-oriented validator would judge them:
//! the raw JSON value is first rendered to text (`null` and missing become the
//! empty string, numbers their decimal form, booleans `"true"`/`"false"`).
//! Arrays and objects have no text form; they fail every type check but are
//! not considered empty.

pub mod coerce;
pub mod products;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use utoipa::ToSchema;

lazy_static! {
    /// Integers without leading zeros, optionally signed
    static ref INT_REGEX: Regex = Regex::new(r"^[-+]?(?:0|[1-9][0-9]*)$").unwrap();

    /// Plain decimal numbers: no exponent, no thousands separators
    static ref NUMERIC_REGEX: Regex = Regex::new(r"^[+-]?(?:[0-9]*[.])?[0-9]+$").unwrap();

    /// Decimal literals accepted by numeric coercion, exponent allowed
    static ref DECIMAL_LITERAL_REGEX: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+[.]?[0-9]*|[.][0-9]+)(?:[eE][+-]?[0-9]+)?$").unwrap();

    /// Unsigned hex, binary and octal literals (`0x10`, `0b11`, `0o7`)
    static ref RADIX_LITERAL_REGEX: Regex =
        Regex::new(r"^0(?:[xX][0-9a-fA-F]+|[bB][01]+|[oO][0-7]+)$").unwrap();
}

/// Where a validated value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Params,
    Body,
}

/// One failed rule, serialized into the `errors` array of a 400 response
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(example = json!({
    "type": "field",
    "value": "Hola",
    "msg": "Valor no valido",
    "path": "price",
    "location": "body"
}))]
pub struct FieldError {
    #[serde(rename = "type")]
    #[schema(value_type = String)]
    pub kind: &'static str,
    /// The offending value; absent when the field was missing
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub value: Option<Value>,
    /// Human readable message
    pub msg: String,
    /// Field name
    pub path: String,
    pub location: Location,
}

/// A single check applied to a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Parses as a 64-bit integer
    IsInt,
    /// Renders to a non-empty string
    NotEmpty,
    /// Renders to a plain decimal number
    IsNumeric,
    /// Coerces to a finite number strictly greater than zero
    Positive,
    /// Renders to `true`, `false`, `1` or `0`
    IsBoolean,
}

impl Rule {
    /// Evaluate the rule against a possibly-missing value
    pub fn check(self, value: Option<&Value>) -> bool {
        match self {
            Rule::IsInt => {
                as_text(value).is_some_and(|s| INT_REGEX.is_match(&s) && s.parse::<i64>().is_ok())
            }
            Rule::NotEmpty => match as_text(value) {
                Some(s) => !s.is_empty(),
                None => true,
            },
            Rule::IsNumeric => as_text(value).is_some_and(|s| NUMERIC_REGEX.is_match(&s)),
            Rule::Positive => {
                let number = to_number(value);
                number.is_finite() && number > 0.0
            }
            Rule::IsBoolean => {
                as_text(value).is_some_and(|s| matches!(s.as_str(), "true" | "false" | "1" | "0"))
            }
        }
    }
}

/// Render a value to text; `None` for arrays and objects
pub fn as_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => Some(String::new()),
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(Value::Array(_)) | Some(Value::Object(_)) => None,
    }
}

/// Numeric coercion used by [`Rule::Positive`]; NaN when there is no sensible number.
///
/// Accepts decimal literals with an optional exponent, `Infinity`, and
/// unsigned `0x`/`0b`/`0o` literals. Literals too large for `f64` come back as
/// infinity.
pub fn to_number(value: Option<&Value>) -> f64 {
    match value {
        None | Some(Value::Null) => 0.0,
        Some(Value::Bool(b)) => f64::from(u8::from(*b)),
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            match trimmed {
                "" => 0.0,
                "Infinity" | "+Infinity" => f64::INFINITY,
                "-Infinity" => f64::NEG_INFINITY,
                _ if DECIMAL_LITERAL_REGEX.is_match(trimmed) => {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
                _ if RADIX_LITERAL_REGEX.is_match(trimmed) => parse_radix_literal(trimmed),
                _ => f64::NAN,
            }
        }
        Some(Value::Array(_)) | Some(Value::Object(_)) => f64::NAN,
    }
}

fn parse_radix_literal(literal: &str) -> f64 {
    let radix = match literal.as_bytes().get(1) {
        Some(b'x' | b'X') => 16,
        Some(b'b' | b'B') => 2,
        _ => 8,
    };

    literal[2..]
        .chars()
        .try_fold(0.0_f64, |acc, c| c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d)))
        .unwrap_or(f64::NAN)
}

/// Ordered rules for one field
#[derive(Debug, Clone)]
pub struct FieldRules {
    field: &'static str,
    location: Location,
    rules: Vec<(Rule, &'static str)>,
}

impl FieldRules {
    /// Rules for a path parameter
    pub fn param(field: &'static str) -> Self {
        Self { field, location: Location::Params, rules: Vec::new() }
    }

    /// Rules for a top-level body field
    pub fn body(field: &'static str) -> Self {
        Self { field, location: Location::Body, rules: Vec::new() }
    }

    /// Append a rule with the message reported when it fails
    pub fn rule(mut self, rule: Rule, message: &'static str) -> Self {
        self.rules.push((rule, message));
        self
    }

    fn collect_errors(&self, value: Option<&Value>, errors: &mut Vec<FieldError>) {
        for (rule, message) in &self.rules {
            if !rule.check(value) {
                errors.push(FieldError {
                    kind: "field",
                    value: value.cloned(),
                    msg: (*message).to_string(),
                    path: self.field.to_string(),
                    location: self.location,
                });
            }
        }
    }
}

/// The ordered rule set attached to a route
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    fields: Vec<FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields.push(rules);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether any rule reads the request body
    pub fn reads_body(&self) -> bool {
        self.fields.iter().any(|f| f.location == Location::Body)
    }

    /// Evaluate every rule of every field, in declaration order.
    ///
    /// A body that is not a JSON object has no fields, so every body rule sees
    /// a missing value.
    pub fn validate(&self, params: &HashMap<String, String>, body: &Value) -> Vec<FieldError> {
        let mut errors = Vec::new();

        for field in &self.fields {
            match field.location {
                Location::Params => {
                    let value = params.get(field.field).map(|v| Value::String(v.clone()));
                    field.collect_errors(value.as_ref(), &mut errors);
                }
                Location::Body => {
                    let value = body.as_object().and_then(|map| map.get(field.field));
                    field.collect_errors(value, &mut errors);
                }
            }
        }

        errors
    }
}
