//! Declarative tool parameter schemas.
//!
//! A [`ToolParameter`] records a parameter's name, semantic type, whether it
//! is required, and optional JSON Schema constraints. Constraints that do not
//! apply to the declared type are ignored rather than rejected, so
//! `ToolParameter::boolean("flag").pattern("x")` is simply a boolean.

use rmcp::model::JsonObject;
use serde_json::{Map, Value, json};

use super::params::ParamKind;

/// Schema entry for a single tool parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolParameter {
    name: String,
    kind: ParamKind,
    required: bool,
    description: Option<String>,
    constraints: Map<String, Value>,
}

impl ToolParameter {
    fn new(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            description: None,
            constraints: Map::new(),
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::String)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Integer)
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Float)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Boolean)
    }

    pub fn object(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Object)
    }

    pub fn array(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::Array)
    }

    pub fn string_list(name: impl Into<String>) -> Self {
        Self::new(name, ParamKind::StringList)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn constraint(&self, key: &str) -> Option<&Value> {
        self.constraints.get(key)
    }

    /// Mark the parameter as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Explain the purpose, format and constraints of the parameter.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Lower bound: `minimum` for numbers, `minLength` for strings,
    /// `minItems` for lists.
    pub fn min(self, value: f64) -> Self {
        match self.kind {
            ParamKind::Integer | ParamKind::Float => self.with("minimum", json!(value)),
            ParamKind::String => self.with("minLength", json!(value as u64)),
            ParamKind::Array | ParamKind::StringList => self.with("minItems", json!(value as u64)),
            ParamKind::Boolean | ParamKind::Object => self,
        }
    }

    /// Upper bound: `maximum` for numbers, `maxLength` for strings,
    /// `maxItems` for lists.
    pub fn max(self, value: f64) -> Self {
        match self.kind {
            ParamKind::Integer | ParamKind::Float => self.with("maximum", json!(value)),
            ParamKind::String => self.with("maxLength", json!(value as u64)),
            ParamKind::Array | ParamKind::StringList => self.with("maxItems", json!(value as u64)),
            ParamKind::Boolean | ParamKind::Object => self,
        }
    }

    /// Regex the string value must match.
    pub fn pattern(self, pattern: impl Into<String>) -> Self {
        match self.kind {
            ParamKind::String => self.with("pattern", Value::String(pattern.into())),
            _ => self,
        }
    }

    /// Allowed values. Values not of the declared type are dropped.
    pub fn enum_values<I, V>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values: Vec<Value> = values
            .into_iter()
            .map(Into::into)
            .filter(|v| self.kind.accepts(v))
            .collect();
        if values.is_empty() {
            return self;
        }
        self.with("enum", Value::Array(values))
    }

    /// Default value advertised to clients, if it has the declared type.
    pub fn default_value(self, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !self.kind.accepts(&value) {
            return self;
        }
        self.with("default", value)
    }

    pub fn min_properties(self, count: u64) -> Self {
        match self.kind {
            ParamKind::Object => self.with("minProperties", json!(count)),
            _ => self,
        }
    }

    pub fn max_properties(self, count: u64) -> Self {
        match self.kind {
            ParamKind::Object => self.with("maxProperties", json!(count)),
            _ => self,
        }
    }

    fn with(mut self, key: &str, value: Value) -> Self {
        self.constraints.insert(key.to_string(), value);
        self
    }

    /// Render this parameter as a JSON Schema property.
    pub fn to_property(&self) -> Value {
        let mut property = Map::new();
        property.insert("type".to_string(), json!(self.kind.json_type()));
        if self.kind == ParamKind::StringList {
            property.insert("items".to_string(), json!({ "type": "string" }));
        }
        if let Some(description) = &self.description {
            property.insert("description".to_string(), json!(description));
        }
        for (key, value) in &self.constraints {
            property.insert(key.clone(), value.clone());
        }
        Value::Object(property)
    }
}

/// Build the JSON Schema object advertised as a tool's input schema.
pub fn input_schema(parameters: &[ToolParameter]) -> JsonObject {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for parameter in parameters {
        properties.insert(parameter.name.clone(), parameter.to_property());
        if parameter.required {
            required.push(Value::String(parameter.name.clone()));
        }
    }

    let mut schema = JsonObject::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), Value::Array(required));
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraints_follow_type() {
        let amount = ToolParameter::number("amount").min(100.0).max(500.0);
        assert_eq!(amount.constraint("minimum"), Some(&json!(100.0)));
        assert_eq!(amount.constraint("maximum"), Some(&json!(500.0)));

        let receipt = ToolParameter::string("receipt").max(40.0);
        assert_eq!(receipt.constraint("maxLength"), Some(&json!(40)));
        assert!(receipt.constraint("maximum").is_none());

        let expand = ToolParameter::string_list("expand").min(1.0);
        assert_eq!(expand.constraint("minItems"), Some(&json!(1)));
    }

    #[test]
    fn test_incompatible_constraints_are_noops() {
        let flag = ToolParameter::boolean("flag")
            .pattern("^x$")
            .min(1.0)
            .max_properties(3);
        assert_eq!(flag.to_property(), json!({ "type": "boolean" }));

        let notes = ToolParameter::object("notes").pattern("^x$").max_properties(15);
        assert!(notes.constraint("pattern").is_none());
        assert_eq!(notes.constraint("maxProperties"), Some(&json!(15)));
    }

    #[test]
    fn test_default_and_enum_must_match_type() {
        let flag = ToolParameter::boolean("f").default_value("x");
        assert!(flag.constraint("default").is_none());

        let flag = ToolParameter::boolean("f").default_value(false);
        assert_eq!(flag.constraint("default"), Some(&json!(false)));

        let speed = ToolParameter::string("speed").enum_values([
            json!("normal"),
            json!(1),
            json!("optimum"),
        ]);
        assert_eq!(speed.constraint("enum"), Some(&json!(["normal", "optimum"])));

        let count = ToolParameter::integer("count").enum_values(["a", "b"]);
        assert!(count.constraint("enum").is_none());
    }

    #[test]
    fn test_property_rendering() {
        let currency = ToolParameter::string("currency")
            .description("ISO code")
            .required()
            .pattern("^[A-Z]{3}$");
        assert_eq!(
            currency.to_property(),
            json!({ "type": "string", "description": "ISO code", "pattern": "^[A-Z]{3}$" })
        );

        let expand = ToolParameter::string_list("expand");
        assert_eq!(
            expand.to_property(),
            json!({ "type": "array", "items": { "type": "string" } })
        );
    }

    #[test]
    fn test_input_schema() {
        let schema = input_schema(&[
            ToolParameter::string("order_id").required(),
            ToolParameter::boolean("partial_payment").default_value(false),
        ]);
        assert_eq!(
            Value::Object(schema),
            json!({
                "type": "object",
                "properties": {
                    "order_id": { "type": "string" },
                    "partial_payment": { "type": "boolean", "default": false }
                },
                "required": ["order_id"]
            })
        );
    }

    #[test]
    fn test_input_schema_without_required() {
        let schema = input_schema(&[ToolParameter::integer("count")]);
        assert!(!schema.contains_key("required"));
    }
}
