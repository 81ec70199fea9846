//! Fluent parameter validation.
//!
//! A [`Validator`] wraps the argument bag of one tool call. Each
//! `required_*` / `optional_*` call extracts one parameter and either writes
//! it into the given [`Payload`] or records an error. Chaining never stops on
//! failure, so every problem in a request is reported at once by
//! [`Validator::handle_errors`].

use super::handlers::ToolResult;
use super::params::{ArgumentBag, ParamType, Payload, ValidationError, extract};

use serde_json::{Map, Value};

const ERRORS_HEADER: &str = "Validation errors:\n- ";
const ERRORS_SEPARATOR: &str = "\n- ";

/// Accumulating validator for one tool invocation.
#[derive(Debug)]
pub struct Validator<'a> {
    args: &'a ArgumentBag,
    errors: Vec<ValidationError>,
}

impl<'a> Validator<'a> {
    pub fn new(args: &'a ArgumentBag) -> Self {
        Self {
            args,
            errors: Vec::new(),
        }
    }

    fn add_error(&mut self, error: ValidationError) -> &mut Self {
        self.errors.push(error);
        self
    }

    /// Whether any validation failed so far.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors in the order validations were chained.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Collapse all accumulated errors into one failed [`ToolResult`].
    ///
    /// Returns `None` when every validation passed.
    pub fn handle_errors(&self) -> Option<ToolResult> {
        if !self.has_errors() {
            return None;
        }
        let messages: Vec<String> = self.errors.iter().map(ToString::to_string).collect();
        Some(ToolResult::error(format!(
            "{ERRORS_HEADER}{}",
            messages.join(ERRORS_SEPARATOR)
        )))
    }

    fn required<T: ParamType>(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        match extract::<T>(self.args, name, true) {
            Ok(value) => {
                out.insert(name, value);
                self
            }
            Err(err) => self.add_error(err),
        }
    }

    fn optional<T: ParamType>(
        &mut self,
        out: &mut Payload,
        name: &str,
        is_empty: fn(&T) -> bool,
    ) -> &mut Self {
        match extract::<T>(self.args, name, false) {
            Ok(value) => {
                if !is_empty(&value) {
                    out.insert(name, value);
                }
                self
            }
            Err(err) => self.add_error(err),
        }
    }

    pub fn required_string(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.required::<String>(out, name)
    }

    pub fn optional_string(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.optional::<String>(out, name, String::is_empty)
    }

    pub fn required_int(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.required::<i64>(out, name)
    }

    pub fn optional_int(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.optional::<i64>(out, name, |v| *v == 0)
    }

    pub fn required_float(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.required::<f64>(out, name)
    }

    pub fn optional_float(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.optional::<f64>(out, name, |v| *v == 0.0)
    }

    pub fn required_bool(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.required::<bool>(out, name)
    }

    /// `false` is a meaningful answer, so a supplied boolean is always
    /// written. An absent one is left out.
    pub fn optional_bool(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        if matches!(self.args.get(name), None | Some(Value::Null)) {
            return self;
        }
        self.required::<bool>(out, name)
    }

    pub fn required_map(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.required::<Map<String, Value>>(out, name)
    }

    pub fn optional_map(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.optional::<Map<String, Value>>(out, name, Map::is_empty)
    }

    pub fn required_array(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.required::<Vec<Value>>(out, name)
    }

    pub fn optional_array(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.optional::<Vec<Value>>(out, name, Vec::is_empty)
    }

    pub fn required_string_list(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.required::<Vec<String>>(out, name)
    }

    pub fn optional_string_list(&mut self, out: &mut Payload, name: &str) -> &mut Self {
        self.optional::<Vec<String>>(out, name, Vec::is_empty)
    }

    /// Optional `count` and `skip`.
    pub fn pagination(&mut self, out: &mut Payload) -> &mut Self {
        self.optional_int(out, "count").optional_int(out, "skip")
    }

    /// Optional `expand` list, written element by element under `expand[]`.
    ///
    /// The payload holds one value per key, so only the last element
    /// survives.
    pub fn expand(&mut self, out: &mut Payload) -> &mut Self {
        match extract::<Vec<String>>(self.args, "expand", false) {
            Ok(expand) => {
                for value in expand {
                    out.insert("expand[]", value);
                }
                self
            }
            Err(err) => self.add_error(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::params::{ParamKind, ParamValue};
    use serde_json::json;

    fn bag(value: Value) -> ArgumentBag {
        match value {
            Value::Object(map) => map,
            _ => panic!("test arguments must be an object"),
        }
    }

    #[test]
    fn test_required_string_valid() {
        let args = bag(json!({ "test_param": "test_value" }));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator.required_string(&mut out, "test_param");

        assert!(!validator.has_errors());
        assert_eq!(out.get_str("test_param"), Some("test_value"));
    }

    #[test]
    fn test_required_missing_reports_once_per_param() {
        let args = bag(json!({}));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator
            .required_float(&mut out, "amount")
            .required_string(&mut out, "currency");

        assert_eq!(
            validator.errors(),
            &[
                ValidationError::Missing("amount".to_string()),
                ValidationError::Missing("currency".to_string()),
            ]
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_optional_empty_values_are_omitted() {
        let args = bag(json!({
            "s": "",
            "i": 0,
            "f": 0.0,
            "m": {},
            "a": [],
            "l": []
        }));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator
            .optional_string(&mut out, "s")
            .optional_int(&mut out, "i")
            .optional_float(&mut out, "f")
            .optional_map(&mut out, "m")
            .optional_array(&mut out, "a")
            .optional_string_list(&mut out, "l");

        assert!(!validator.has_errors());
        assert!(out.is_empty());
    }

    #[test]
    fn test_optional_values_are_written_with_declared_kind() {
        let args = bag(json!({
            "s": "x",
            "i": 123,
            "f": 1.5,
            "m": { "k": "v" },
            "a": [1, "two"],
            "l": ["a", "b"]
        }));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator
            .optional_string(&mut out, "s")
            .optional_int(&mut out, "i")
            .optional_float(&mut out, "f")
            .optional_map(&mut out, "m")
            .optional_array(&mut out, "a")
            .optional_string_list(&mut out, "l");

        assert!(!validator.has_errors());
        assert_eq!(out.get("i"), Some(&ParamValue::Integer(123)));
        assert_eq!(out.get("f").map(ParamValue::kind), Some(ParamKind::Float));
        assert_eq!(out.get("m").map(ParamValue::kind), Some(ParamKind::Object));
        assert_eq!(out.get("a").map(ParamValue::kind), Some(ParamKind::Array));
        assert_eq!(
            out.get("l"),
            Some(&ParamValue::StringList(vec!["a".to_string(), "b".to_string()]))
        );
    }

    #[test]
    fn test_optional_bool_keeps_false() {
        let args = bag(json!({ "partial_payment": false }));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator.optional_bool(&mut out, "partial_payment");

        assert!(!validator.has_errors());
        assert_eq!(out.get_bool("partial_payment"), Some(false));
    }

    #[test]
    fn test_optional_bool_absent_is_omitted() {
        let args = bag(json!({}));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator.optional_bool(&mut out, "partial_payment");

        assert!(!validator.has_errors());
        assert!(!out.contains_key("partial_payment"));
    }

    #[test]
    fn test_optional_wrong_type_is_error() {
        let args = bag(json!({ "count": "ten", "partial_payment": "invalid_boolean" }));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator
            .optional_int(&mut out, "count")
            .optional_bool(&mut out, "partial_payment");

        assert_eq!(
            validator.errors(),
            &[
                ValidationError::InvalidType("count".to_string()),
                ValidationError::InvalidType("partial_payment".to_string()),
            ]
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_handle_errors_formats_bullets_in_order() {
        let args = bag(json!({ "partial_payment": "invalid_boolean" }));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator
            .required_float(&mut out, "amount")
            .required_string(&mut out, "currency")
            .optional_bool(&mut out, "partial_payment");

        let result = validator.handle_errors().expect("should fail");
        assert!(result.is_error);
        assert_eq!(
            result.text,
            "Validation errors:\n- missing required parameter: amount\n- \
             missing required parameter: currency\n- invalid parameter type: partial_payment"
        );
        assert_eq!(result.text.matches("\n- ").count(), 3);
    }

    #[test]
    fn test_handle_errors_none_when_clean() {
        let args = bag(json!({ "order_id": "order_1" }));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator.required_string(&mut out, "order_id");
        assert!(validator.handle_errors().is_none());
    }

    #[test]
    fn test_repeated_validation_is_idempotent() {
        let args = bag(json!({ "receipt": "r-1", "count": "bad" }));

        let run = || {
            let mut out = Payload::new();
            let mut validator = Validator::new(&args);
            validator
                .optional_string(&mut out, "receipt")
                .optional_int(&mut out, "count");
            (out, validator.errors().to_vec())
        };

        assert_eq!(run(), run());

        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator
            .optional_string(&mut out, "receipt")
            .optional_string(&mut out, "receipt");
        assert_eq!(out.len(), 1);
        assert!(!validator.has_errors());
    }

    #[test]
    fn test_pagination() {
        let args = bag(json!({ "count": 10, "skip": 0 }));
        let mut out = Payload::new();
        Validator::new(&args).pagination(&mut out);
        assert_eq!(out.get("count"), Some(&ParamValue::Integer(10)));
        assert!(!out.contains_key("skip"));
    }

    #[test]
    fn test_whole_float_accepted_for_integer() {
        let args = bag(json!({ "count": 10.0, "skip": 2.5 }));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator.pagination(&mut out);

        assert_eq!(out.get("count"), Some(&ParamValue::Integer(10)));
        assert!(!out.contains_key("skip"));
        assert_eq!(
            validator.errors(),
            &[ValidationError::InvalidType("skip".to_string())]
        );
    }

    #[test]
    fn test_expand_single_value() {
        let args = bag(json!({ "expand": ["payments"] }));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator.expand(&mut out);

        assert!(!validator.has_errors());
        assert_eq!(out.get_str("expand[]"), Some("payments"));
    }

    #[test]
    fn test_expand_keeps_only_last_value() {
        // The payload is single-valued per key: earlier entries are overwritten.
        let args = bag(json!({ "expand": ["payments", "transfers"] }));
        let mut out = Payload::new();
        Validator::new(&args).expand(&mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out.get_str("expand[]"), Some("transfers"));
    }

    #[test]
    fn test_expand_invalid_type() {
        let args = bag(json!({ "expand": "payments" }));
        let mut out = Payload::new();
        let mut validator = Validator::new(&args);
        validator.expand(&mut out);
        assert_eq!(
            validator.errors(),
            &[ValidationError::InvalidType("expand".to_string())]
        );
    }

    #[test]
    fn test_separate_outputs() {
        let args = bag(json!({ "payment_id": "pay_1", "speed": "optimum" }));
        let mut payload = Payload::new();
        let mut data = Payload::new();
        let mut validator = Validator::new(&args);
        validator
            .required_string(&mut payload, "payment_id")
            .optional_string(&mut data, "speed");

        assert_eq!(payload.keys().collect::<Vec<_>>(), vec!["payment_id"]);
        assert_eq!(data.keys().collect::<Vec<_>>(), vec!["speed"]);
    }
}
