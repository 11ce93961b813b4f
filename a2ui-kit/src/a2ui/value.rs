//! A2UI Value Types
//!
//! Represents the primitive value types used in A2UI protocol for data binding,
//! and the resolution of those bindings against a [`DataModel`].
//!
//! A binding may carry a type-specific literal, a generic `literal` and a
//! `path`. Exactly one of them governs each resolution, in that order:
//!
//! ```json
//! {"literalString": "Hello World"}
//! {"literal": "Hello World"}
//! {"path": "/user/name"}
//! "Hello World"
//! ```
//!
//! The last form is shorthand for a typed literal.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::data_model::{resolve_path, DataModel};

/// A concrete value produced by resolving a binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Scalar {
    /// Convert a JSON value into a scalar. Objects, arrays and null are not scalars.
    pub fn from_json(value: &Value) -> Option<Scalar> {
        match value {
            Value::String(s) => Some(Scalar::String(s.clone())),
            Value::Number(n) => n.as_f64().map(Scalar::Number),
            Value::Bool(b) => Some(Scalar::Boolean(*b)),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Scalar::String(s) => Value::String(s.clone()),
            Scalar::Number(n) => serde_json::json!(n),
            Scalar::Boolean(b) => Value::Bool(*b),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Boolean(b) => write!(f, "{}", b),
        }
    }
}

// ============================================================================
// Coercions
// ============================================================================

/// Strings accept text, numbers and booleans.
pub fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Numbers accept numbers and numeric text.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Booleans accept booleans only.
pub fn coerce_boolean(value: &Value) -> Option<bool> {
    value.as_bool()
}

/// Shared precedence rule: typed literal, then generic literal, then path.
fn resolve_binding<T: Clone>(
    typed: Option<&T>,
    literal: Option<&Value>,
    path: Option<&str>,
    data_model: &DataModel,
    scope: Option<&str>,
    coerce: fn(&Value) -> Option<T>,
) -> Option<T> {
    if let Some(typed) = typed {
        return Some(typed.clone());
    }
    if let Some(literal) = literal {
        return coerce(literal);
    }
    let path = resolve_path(path?, scope);
    data_model.get(&path).and_then(coerce)
}

// ============================================================================
// StringValue
// ============================================================================

/// A string value that can be a literal or a data-bound path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StringValueRepr")]
pub struct StringValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringValueRepr {
    Plain(String),
    #[serde(rename_all = "camelCase")]
    Bound {
        #[serde(default)]
        path: Option<String>,
        #[serde(default)]
        literal_string: Option<String>,
        #[serde(default)]
        literal: Option<Value>,
    },
}

impl From<StringValueRepr> for StringValue {
    fn from(repr: StringValueRepr) -> Self {
        match repr {
            StringValueRepr::Plain(s) => StringValue::literal(s),
            StringValueRepr::Bound {
                path,
                literal_string,
                literal,
            } => StringValue {
                path,
                literal_string,
                literal,
            },
        }
    }
}

impl StringValue {
    /// Create a new literal string value
    pub fn literal(s: impl Into<String>) -> Self {
        StringValue {
            literal_string: Some(s.into()),
            ..Default::default()
        }
    }

    /// Create a new path reference
    pub fn path(p: impl Into<String>) -> Self {
        StringValue {
            path: Some(p.into()),
            ..Default::default()
        }
    }

    /// Check if this value is bound to the data model
    pub fn is_path(&self) -> bool {
        self.literal_string.is_none() && self.literal.is_none() && self.path.is_some()
    }

    /// The path this value would read, if no literal overrides it
    pub fn as_path(&self) -> Option<&str> {
        if self.is_path() { self.path.as_deref() } else { None }
    }

    pub fn resolve(&self, data_model: &DataModel) -> Option<String> {
        self.resolve_scoped(data_model, None)
    }

    /// Resolve with optional scope for template rendering
    pub fn resolve_scoped(&self, data_model: &DataModel, scope: Option<&str>) -> Option<String> {
        resolve_binding(
            self.literal_string.as_ref(),
            self.literal.as_ref(),
            self.path.as_deref(),
            data_model,
            scope,
            coerce_string,
        )
    }
}

// ============================================================================
// NumberValue
// ============================================================================

/// A number value that can be a literal or a data-bound path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "NumberValueRepr")]
pub struct NumberValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_number: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberValueRepr {
    Plain(f64),
    #[serde(rename_all = "camelCase")]
    Bound {
        #[serde(default)]
        path: Option<String>,
        #[serde(default)]
        literal_number: Option<f64>,
        #[serde(default)]
        literal: Option<Value>,
    },
}

impl From<NumberValueRepr> for NumberValue {
    fn from(repr: NumberValueRepr) -> Self {
        match repr {
            NumberValueRepr::Plain(n) => NumberValue::literal(n),
            NumberValueRepr::Bound {
                path,
                literal_number,
                literal,
            } => NumberValue {
                path,
                literal_number,
                literal,
            },
        }
    }
}

impl NumberValue {
    /// Create a new literal number value
    pub fn literal(n: f64) -> Self {
        NumberValue {
            literal_number: Some(n),
            ..Default::default()
        }
    }

    /// Create a new path reference
    pub fn path(p: impl Into<String>) -> Self {
        NumberValue {
            path: Some(p.into()),
            ..Default::default()
        }
    }

    pub fn resolve(&self, data_model: &DataModel) -> Option<f64> {
        self.resolve_scoped(data_model, None)
    }

    pub fn resolve_scoped(&self, data_model: &DataModel, scope: Option<&str>) -> Option<f64> {
        resolve_binding(
            self.literal_number.as_ref(),
            self.literal.as_ref(),
            self.path.as_deref(),
            data_model,
            scope,
            coerce_number,
        )
    }
}

// ============================================================================
// BooleanValue
// ============================================================================

/// A boolean value that can be a literal or a data-bound path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BooleanValueRepr")]
pub struct BooleanValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_boolean: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BooleanValueRepr {
    Plain(bool),
    #[serde(rename_all = "camelCase")]
    Bound {
        #[serde(default)]
        path: Option<String>,
        #[serde(default)]
        literal_boolean: Option<bool>,
        #[serde(default)]
        literal: Option<Value>,
    },
}

impl From<BooleanValueRepr> for BooleanValue {
    fn from(repr: BooleanValueRepr) -> Self {
        match repr {
            BooleanValueRepr::Plain(b) => BooleanValue::literal(b),
            BooleanValueRepr::Bound {
                path,
                literal_boolean,
                literal,
            } => BooleanValue {
                path,
                literal_boolean,
                literal,
            },
        }
    }
}

impl BooleanValue {
    /// Create a new literal boolean value
    pub fn literal(b: bool) -> Self {
        BooleanValue {
            literal_boolean: Some(b),
            ..Default::default()
        }
    }

    /// Create a new path reference
    pub fn path(p: impl Into<String>) -> Self {
        BooleanValue {
            path: Some(p.into()),
            ..Default::default()
        }
    }

    pub fn resolve(&self, data_model: &DataModel) -> Option<bool> {
        self.resolve_scoped(data_model, None)
    }

    pub fn resolve_scoped(&self, data_model: &DataModel, scope: Option<&str>) -> Option<bool> {
        resolve_binding(
            self.literal_boolean.as_ref(),
            self.literal.as_ref(),
            self.path.as_deref(),
            data_model,
            scope,
            coerce_boolean,
        )
    }
}

// ============================================================================
// PrimitiveValue
// ============================================================================

/// Keys that mark a JSON object as a binding rather than a structural value.
const BINDING_KEYS: [&str; 5] = [
    "path",
    "literal",
    "literalString",
    "literalNumber",
    "literalBoolean",
];

/// A binding whose kind is not fixed by the component schema, such as action
/// context entries and the properties of `Custom` nodes.
///
/// It resolves to whichever [`Scalar`] its literal or bound value holds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PrimitiveValueRepr")]
pub struct PrimitiveValue {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_number: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_boolean: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal: Option<Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PrimitiveValueRepr {
    Plain(Scalar),
    #[serde(rename_all = "camelCase")]
    Bound {
        #[serde(default)]
        path: Option<String>,
        #[serde(default)]
        literal_string: Option<String>,
        #[serde(default)]
        literal_number: Option<f64>,
        #[serde(default)]
        literal_boolean: Option<bool>,
        #[serde(default)]
        literal: Option<Value>,
    },
}

impl From<PrimitiveValueRepr> for PrimitiveValue {
    fn from(repr: PrimitiveValueRepr) -> Self {
        match repr {
            PrimitiveValueRepr::Plain(scalar) => PrimitiveValue::literal(scalar),
            PrimitiveValueRepr::Bound {
                path,
                literal_string,
                literal_number,
                literal_boolean,
                literal,
            } => PrimitiveValue {
                path,
                literal_string,
                literal_number,
                literal_boolean,
                literal,
            },
        }
    }
}

impl From<StringValue> for PrimitiveValue {
    fn from(v: StringValue) -> Self {
        PrimitiveValue {
            path: v.path,
            literal_string: v.literal_string,
            literal: v.literal,
            ..Default::default()
        }
    }
}

impl From<NumberValue> for PrimitiveValue {
    fn from(v: NumberValue) -> Self {
        PrimitiveValue {
            path: v.path,
            literal_number: v.literal_number,
            literal: v.literal,
            ..Default::default()
        }
    }
}

impl From<BooleanValue> for PrimitiveValue {
    fn from(v: BooleanValue) -> Self {
        PrimitiveValue {
            path: v.path,
            literal_boolean: v.literal_boolean,
            literal: v.literal,
            ..Default::default()
        }
    }
}

impl PrimitiveValue {
    pub fn literal(scalar: Scalar) -> Self {
        match scalar {
            Scalar::String(s) => StringValue::literal(s).into(),
            Scalar::Number(n) => NumberValue::literal(n).into(),
            Scalar::Boolean(b) => BooleanValue::literal(b).into(),
        }
    }

    pub fn path(p: impl Into<String>) -> Self {
        PrimitiveValue {
            path: Some(p.into()),
            ..Default::default()
        }
    }

    /// Whether a JSON value has the shape of a binding object.
    pub fn is_binding(value: &Value) -> bool {
        value
            .as_object()
            .is_some_and(|map| !map.is_empty() && map.keys().all(|k| BINDING_KEYS.contains(&k.as_str())))
    }

    /// Decode a binding object, returning `None` for anything else.
    pub fn from_json(value: &Value) -> Option<PrimitiveValue> {
        if !Self::is_binding(value) {
            return None;
        }
        serde_json::from_value(value.clone()).ok()
    }

    pub fn resolve(&self, data_model: &DataModel) -> Option<Scalar> {
        self.resolve_scoped(data_model, None)
    }

    pub fn resolve_scoped(&self, data_model: &DataModel, scope: Option<&str>) -> Option<Scalar> {
        let typed = self
            .literal_string
            .clone()
            .map(Scalar::String)
            .or_else(|| self.literal_number.map(Scalar::Number))
            .or_else(|| self.literal_boolean.map(Scalar::Boolean));

        resolve_binding(
            typed.as_ref(),
            self.literal.as_ref(),
            self.path.as_deref(),
            data_model,
            scope,
            Scalar::from_json,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model() -> DataModel {
        DataModel::with_data(json!({
            "user": {"name": "Bob", "age": 41, "admin": true},
            "items": [{"label": "first"}]
        }))
    }

    #[test]
    fn test_string_value_literal() {
        let value: StringValue = serde_json::from_str(r#"{"literalString": "Hello"}"#).unwrap();
        assert!(!value.is_path());
        assert_eq!(value.resolve(&model()), Some("Hello".to_string()));
    }

    #[test]
    fn test_string_value_path() {
        let value: StringValue = serde_json::from_str(r#"{"path": "/user/name"}"#).unwrap();
        assert_eq!(value.as_path(), Some("/user/name"));
        assert_eq!(value.resolve(&model()), Some("Bob".to_string()));
    }

    #[test]
    fn test_plain_shorthand() {
        let s: StringValue = serde_json::from_str(r#""Hi""#).unwrap();
        let n: NumberValue = serde_json::from_str("3").unwrap();
        let b: BooleanValue = serde_json::from_str("true").unwrap();
        assert_eq!(s, StringValue::literal("Hi"));
        assert_eq!(n, NumberValue::literal(3.0));
        assert_eq!(b, BooleanValue::literal(true));
    }

    #[test]
    fn test_precedence_typed_over_generic_over_path() {
        let value = StringValue {
            path: Some("/user/name".into()),
            literal_string: Some("typed".into()),
            literal: Some(json!("generic")),
        };
        assert_eq!(value.resolve(&model()), Some("typed".to_string()));

        let value = StringValue {
            literal_string: None,
            ..value
        };
        assert_eq!(value.resolve(&model()), Some("generic".to_string()));
    }

    #[test]
    fn test_generic_literal_governs_even_when_it_does_not_coerce() {
        let value = BooleanValue {
            path: Some("/user/admin".into()),
            literal_boolean: None,
            literal: Some(json!({"not": "a bool"})),
        };
        assert_eq!(value.resolve(&model()), None);
    }

    #[test]
    fn test_missing_path_is_absent() {
        assert_eq!(StringValue::path("/nobody").resolve(&model()), None);
        assert_eq!(NumberValue::path("/user/name/deep").resolve(&model()), None);
        assert_eq!(StringValue::default().resolve(&model()), None);
    }

    #[test]
    fn test_coercions() {
        assert_eq!(StringValue::path("/user/age").resolve(&model()), Some("41".to_string()));
        assert_eq!(StringValue::path("/user/admin").resolve(&model()), Some("true".to_string()));
        assert_eq!(StringValue::path("/user").resolve(&model()), None);

        let numeric = DataModel::with_data(json!({"n": " 2.5 ", "bad": "x"}));
        assert_eq!(NumberValue::path("/n").resolve(&numeric), Some(2.5));
        assert_eq!(NumberValue::path("/bad").resolve(&numeric), None);
        assert_eq!(BooleanValue::path("/n").resolve(&numeric), None);
    }

    #[test]
    fn test_scoped_relative_path() {
        let value = StringValue::path("label");
        assert_eq!(
            value.resolve_scoped(&model(), Some("/items/0")),
            Some("first".to_string())
        );
    }

    #[test]
    fn test_wrong_typed_literal_fails_to_decode() {
        assert!(serde_json::from_str::<StringValue>(r#"{"literalString": 5}"#).is_err());
    }

    #[test]
    fn test_primitive_value_detection() {
        assert!(PrimitiveValue::is_binding(&json!({"path": "/x"})));
        assert!(PrimitiveValue::is_binding(&json!({"literalNumber": 1})));
        assert!(!PrimitiveValue::is_binding(&json!({"path": "/x", "color": "red"})));
        assert!(!PrimitiveValue::is_binding(&json!({})));
        assert!(!PrimitiveValue::is_binding(&json!("plain")));
    }

    #[test]
    fn test_primitive_value_resolution() {
        let m = model();
        let by_path = PrimitiveValue::from_json(&json!({"path": "/user/age"})).unwrap();
        assert_eq!(by_path.resolve(&m), Some(Scalar::Number(41.0)));

        let typed = PrimitiveValue::from_json(&json!({"literalBoolean": false, "path": "/user/admin"})).unwrap();
        assert_eq!(typed.resolve(&m), Some(Scalar::Boolean(false)));

        let object_at_path = PrimitiveValue::path("/user");
        assert_eq!(object_at_path.resolve(&m), None);
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let json = serde_json::to_value(StringValue::path("/a")).unwrap();
        assert_eq!(json, json!({"path": "/a"}));
    }
}
