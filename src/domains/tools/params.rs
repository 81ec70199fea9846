//! Parameter extraction.
//!
//! Tool arguments arrive as an untyped JSON object. This module converts
//! individual arguments into strongly-typed values and defines the typed
//! [`Payload`] that validated arguments are collected into.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// The untyped argument bag supplied with a single tool invocation.
pub type ArgumentBag = Map<String, Value>;

/// Semantic type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    Integer,
    Float,
    Boolean,
    Object,
    Array,
    StringList,
}

impl ParamKind {
    /// JSON Schema `type` keyword for this kind.
    pub fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array | Self::StringList => "array",
        }
    }

    /// Whether `value` is a valid JSON value of this kind.
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => i64::decode(value).is_some(),
            Self::Float => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
            Self::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
        }
    }
}

/// A single per-parameter validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required parameter: {0}")]
    Missing(String),

    #[error("invalid parameter type: {0}")]
    InvalidType(String),
}

/// A validated, typed parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Object(Map<String, Value>),
    Array(Vec<Value>),
    StringList(Vec<String>),
}

impl ParamValue {
    /// The semantic kind this value carries.
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::String(_) => ParamKind::String,
            Self::Integer(_) => ParamKind::Integer,
            Self::Float(_) => ParamKind::Float,
            Self::Bool(_) => ParamKind::Boolean,
            Self::Object(_) => ParamKind::Object,
            Self::Array(_) => ParamKind::Array,
            Self::StringList(_) => ParamKind::StringList,
        }
    }

    /// Render a scalar as a query-string value. Arrays are expanded by
    /// [`Payload::to_query_pairs`]; objects have no query representation.
    fn scalar_query_value(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(match whole_amount(*f) {
                Some(i) => i.to_string(),
                None => f.to_string(),
            }),
            Self::Bool(b) => Some(b.to_string()),
            Self::Object(_) | Self::Array(_) | Self::StringList(_) => None,
        }
    }
}

/// Amounts are sent in currency sub-units; whole floats go out as integers.
fn whole_amount(value: f64) -> Option<i64> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    (value.fract() == 0.0 && value.abs() <= MAX_EXACT).then_some(value as i64)
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Integer(i) => serializer.serialize_i64(*i),
            Self::Float(f) => match whole_amount(*f) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*f),
            },
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Object(map) => map.serialize(serializer),
            Self::Array(items) => items.serialize(serializer),
            Self::StringList(items) => items.serialize(serializer),
        }
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Map<String, Value>> for ParamValue {
    fn from(value: Map<String, Value>) -> Self {
        Self::Object(value)
    }
}

impl From<Vec<Value>> for ParamValue {
    fn from(value: Vec<Value>) -> Self {
        Self::Array(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringList(value)
    }
}

/// A Rust type that a tool argument can be extracted into.
pub trait ParamType: DeserializeOwned + Default + Into<ParamValue> {
    const KIND: ParamKind;

    /// Decode a present, non-null argument.
    fn decode(raw: &Value) -> Option<Self> {
        serde_json::from_value(raw.clone()).ok()
    }
}

impl ParamType for String {
    const KIND: ParamKind = ParamKind::String;
}

impl ParamType for i64 {
    const KIND: ParamKind = ParamKind::Integer;

    /// Clients that only know doubles send `10.0`; a whole number is accepted.
    fn decode(raw: &Value) -> Option<Self> {
        match raw {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole_amount)),
            _ => None,
        }
    }
}

impl ParamType for f64 {
    const KIND: ParamKind = ParamKind::Float;
}

impl ParamType for bool {
    const KIND: ParamKind = ParamKind::Boolean;
}

impl ParamType for Map<String, Value> {
    const KIND: ParamKind = ParamKind::Object;
}

impl ParamType for Vec<Value> {
    const KIND: ParamKind = ParamKind::Array;
}

impl ParamType for Vec<String> {
    const KIND: ParamKind = ParamKind::StringList;
}

/// Extract the argument `name` from `args` as a `T`.
///
/// An absent or `null` argument yields `T::default()` when optional and a
/// [`ValidationError::Missing`] when required. A present argument is
/// decoded structurally into `T`; any shape mismatch yields
/// [`ValidationError::InvalidType`].
pub fn extract<T: ParamType>(
    args: &ArgumentBag,
    name: &str,
    required: bool,
) -> Result<T, ValidationError> {
    match args.get(name) {
        None | Some(Value::Null) if required => Err(ValidationError::Missing(name.to_string())),
        None | Some(Value::Null) => Ok(T::default()),
        Some(raw) => {
            T::decode(raw).ok_or_else(|| ValidationError::InvalidType(name.to_string()))
        }
    }
}

/// The validated payload built by a [`Validator`](super::Validator) and sent
/// to the Razorpay API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, ParamValue>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.0.get(name) {
            Some(ParamValue::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn get_f64(&self, name: &str) -> Option<f64> {
        match self.0.get(name) {
            Some(ParamValue::Float(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        match self.0.get(name) {
            Some(ParamValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    /// Flatten the payload into query-string pairs.
    ///
    /// Scalars become one pair, lists become one pair per element under the
    /// same key, objects are skipped.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            match value {
                ParamValue::StringList(items) => {
                    pairs.extend(items.iter().map(|item| (key.clone(), item.clone())));
                }
                ParamValue::Array(items) => {
                    pairs.extend(items.iter().map(|item| (key.clone(), query_scalar(item))));
                }
                other => {
                    if let Some(v) = other.scalar_query_value() {
                        pairs.push((key.clone(), v));
                    }
                }
            }
        }
        pairs
    }

    /// Convert to a JSON object for request bodies.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

fn query_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> ArgumentBag {
        match value {
            Value::Object(map) => map,
            _ => panic!("test arguments must be an object"),
        }
    }

    #[test]
    fn test_extract_missing_required() {
        let args = bag(json!({}));
        let err = extract::<String>(&args, "order_id", true).unwrap_err();
        assert_eq!(err.to_string(), "missing required parameter: order_id");
    }

    #[test]
    fn test_extract_null_is_missing() {
        let args = bag(json!({ "order_id": null }));
        assert_eq!(
            extract::<String>(&args, "order_id", true),
            Err(ValidationError::Missing("order_id".to_string()))
        );
        assert_eq!(extract::<String>(&args, "order_id", false), Ok(String::new()));
    }

    #[test]
    fn test_extract_optional_absent_yields_zero_value() {
        let args = bag(json!({}));
        assert_eq!(extract::<i64>(&args, "count", false), Ok(0));
        assert_eq!(extract::<bool>(&args, "flag", false), Ok(false));
        assert!(extract::<Vec<String>>(&args, "expand", false).unwrap().is_empty());
    }

    #[test]
    fn test_extract_wrong_shape() {
        let args = bag(json!({ "partial_payment": "invalid_boolean", "amount": "100" }));
        let err = extract::<bool>(&args, "partial_payment", false).unwrap_err();
        assert_eq!(err.to_string(), "invalid parameter type: partial_payment");
        assert!(extract::<f64>(&args, "amount", true).is_err());
    }

    #[test]
    fn test_extract_integer_into_float() {
        let args = bag(json!({ "amount": 10000 }));
        assert_eq!(extract::<f64>(&args, "amount", true), Ok(10000.0));
    }

    #[test]
    fn test_extract_whole_float_into_integer() {
        let args = bag(json!({ "count": 10.0, "skip": -2.0, "huge": 1e300 }));
        assert_eq!(extract::<i64>(&args, "count", false), Ok(10));
        assert_eq!(extract::<i64>(&args, "skip", false), Ok(-2));
        assert!(extract::<i64>(&args, "huge", false).is_err());
    }

    #[test]
    fn test_extract_fractional_into_integer_fails() {
        let args = bag(json!({ "count": 1.5 }));
        assert!(extract::<i64>(&args, "count", false).is_err());
    }

    #[test]
    fn test_extract_string_list_rejects_mixed_elements() {
        let args = bag(json!({ "expand": ["payments", 3] }));
        assert_eq!(
            extract::<Vec<String>>(&args, "expand", false),
            Err(ValidationError::InvalidType("expand".to_string()))
        );
    }

    #[test]
    fn test_kind_accepts() {
        assert!(ParamKind::Integer.accepts(&json!(3.0)));
        assert!(!ParamKind::Integer.accepts(&json!(3.5)));
        assert!(ParamKind::Float.accepts(&json!(3)));
        assert!(!ParamKind::Boolean.accepts(&json!("x")));
        assert!(ParamKind::StringList.accepts(&json!(["a", "b"])));
        assert!(!ParamKind::StringList.accepts(&json!(["a", 1])));
    }

    #[test]
    fn test_payload_query_pairs() {
        let mut payload = Payload::new();
        payload.insert("count", 10_i64);
        payload.insert("receipt", "r-1".to_string());
        payload.insert("expand", vec![json!("payments"), json!("transfers")]);
        payload.insert("notes", Map::new());

        let pairs = payload.to_query_pairs();
        assert_eq!(
            pairs,
            vec![
                ("count".to_string(), "10".to_string()),
                ("expand".to_string(), "payments".to_string()),
                ("expand".to_string(), "transfers".to_string()),
                ("receipt".to_string(), "r-1".to_string()),
            ]
        );
    }

    #[test]
    fn test_fractional_float_kept() {
        let mut payload = Payload::new();
        payload.insert("rate", 12.5);
        assert_eq!(payload.to_json(), json!({ "rate": 12.5 }));
        assert_eq!(payload.to_query_pairs(), vec![("rate".to_string(), "12.5".to_string())]);
    }

    #[test]
    fn test_payload_serializes_flat() {
        let mut payload = Payload::new();
        payload.insert("amount", 10000.0);
        payload.insert("currency", "INR".to_string());
        payload.insert("partial_payment", false);
        assert_eq!(
            payload.to_json(),
            json!({ "amount": 10000, "currency": "INR", "partial_payment": false })
        );
    }
}
