use serde_json::{Map, Number, Value as JsonValue};

/// Result of evaluating a filter or index expression.
///
/// Path references produce these from the document; literals and operators
/// produce them directly. All numbers are double precision.
///
/// # Examples
///
/// ```
/// use clove_path::Value;
/// use serde_json::json;
///
/// let price = Value::from_json(&json!(8.95));
/// assert_eq!(price, Value::Number(8.95));
/// assert!(price.is_truthy());
/// assert!(!Value::Boolean(false).is_truthy());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// JSON null, also the result of a soft failure
    Null,

    /// JSON boolean (true/false)
    Boolean(bool),

    /// Double-precision number
    Number(f64),

    /// UTF-8 string
    String(String),

    /// Array taken from the document
    Array(Vec<JsonValue>),

    /// Object taken from the document, keys in document order
    Object(Map<String, JsonValue>),
}

impl Value {
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(b) => Value::Boolean(*b),
            JsonValue::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            JsonValue::String(s) => Value::String(s.clone()),
            JsonValue::Array(items) => Value::Array(items.clone()),
            JsonValue::Object(map) => Value::Object(map.clone()),
        }
    }

    /// Convert back to a JSON value; integral numbers become JSON integers and
    /// non-finite numbers become null.
    pub fn into_json(self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Boolean(b) => JsonValue::Bool(b),
            Value::Number(n) => number_to_json(n),
            Value::String(s) => JsonValue::String(s),
            Value::Array(items) => JsonValue::Array(items),
            Value::Object(map) => JsonValue::Object(map),
        }
    }

    /// Anything except `null` and `false` counts as true.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Null | Value::Boolean(false))
    }

    /// Equality used by `==`: numbers compare numerically, strings ordinally,
    /// containers structurally, and values of different kinds are never equal.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| json_equals(x, y))
            }
            (Value::Object(a), Value::Object(b)) => objects_equal(a, b),
            _ => false,
        }
    }
}

/// Structural equality of JSON values with numbers compared by value, so
/// `1` equals `1.0`.
pub fn json_equals(a: &JsonValue, b: &JsonValue) -> bool {
    match (a, b) {
        (JsonValue::Number(x), JsonValue::Number(y)) => x.as_f64() == y.as_f64(),
        (JsonValue::Array(x), JsonValue::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(p, q)| json_equals(p, q))
        }
        (JsonValue::Object(x), JsonValue::Object(y)) => objects_equal(x, y),
        _ => a == b,
    }
}

fn objects_equal(a: &Map<String, JsonValue>, b: &Map<String, JsonValue>) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| json_equals(value, other)))
}

pub(crate) fn number_to_json(n: f64) -> JsonValue {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        JsonValue::from(n as i64)
    } else {
        Number::from_f64(n).map(JsonValue::Number).unwrap_or(JsonValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(json_equals(&json!(1), &json!(1.0)));
        assert!(json_equals(&json!({"a": [1, 2]}), &json!({"a": [1.0, 2.0]})));
        assert!(!json_equals(&json!("1"), &json!(1)));
    }

    #[test]
    fn test_mixed_kinds_are_unequal() {
        assert!(!Value::Null.loosely_equals(&Value::Boolean(false)));
        assert!(!Value::Number(0.0).loosely_equals(&Value::String("0".into())));
        assert!(Value::Null.loosely_equals(&Value::Null));
    }

    #[test]
    fn test_into_json_keeps_integers() {
        assert_eq!(Value::Number(4.0).into_json(), json!(4));
        assert_eq!(Value::Number(2.5).into_json(), json!(2.5));
        assert_eq!(Value::Number(f64::INFINITY).into_json(), json!(null));
    }
}
