use indexmap::IndexMap;
use serde_json::Value;

/// Arguments of a field, keyed by name in source order.
///
/// When a name is repeated the last value wins (it keeps the position of the
/// first occurrence).
pub type Arguments = IndexMap<String, ArgValue>;

/// A literal argument value, or a reference to a request variable.
///
/// Every numeric literal is carried as `f64`, the same number model the JSON
/// request bodies use. Bare names that are not `true`, `false` or `null`
/// (enum-like tokens such as `DESC`) are kept as opaque strings.
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    /// `$name`, stored without the `$`.
    Variable(String),
    Object(IndexMap<String, ArgValue>),
    List(Vec<ArgValue>),
}

impl ArgValue {
    /// Converts this value to JSON.
    ///
    /// Returns `None` if the value is or contains a [`ArgValue::Variable`];
    /// those must be substituted against the request variables first.
    pub fn to_json(&self) -> Option<Value> {
        Some(match self {
            ArgValue::String(s) => Value::String(s.clone()),
            ArgValue::Number(n) => json_number(*n),
            ArgValue::Boolean(b) => Value::Bool(*b),
            ArgValue::Null => Value::Null,
            ArgValue::Variable(_) => return None,
            ArgValue::Object(fields) => {
                let mut map = serde_json::Map::with_capacity(fields.len());
                for (key, value) in fields {
                    map.insert(key.clone(), value.to_json()?);
                }
                Value::Object(map)
            },
            ArgValue::List(items) => {
                Value::Array(items.iter().map(ArgValue::to_json).collect::<Option<_>>()?)
            },
        })
    }

    /// Returns `true` if this value is or contains a variable reference.
    pub fn contains_variable(&self) -> bool {
        match self {
            ArgValue::Variable(_) => true,
            ArgValue::Object(fields) => fields.values().any(ArgValue::contains_variable),
            ArgValue::List(items) => items.iter().any(ArgValue::contains_variable),
            ArgValue::String(_) | ArgValue::Number(_) | ArgValue::Boolean(_) | ArgValue::Null => {
                false
            },
        }
    }
}

impl From<Value> for ArgValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ArgValue::Null,
            Value::Bool(b) => ArgValue::Boolean(b),
            Value::Number(n) => n.as_f64().map_or(ArgValue::Null, ArgValue::Number),
            Value::String(s) => ArgValue::String(s),
            Value::Array(items) => ArgValue::List(items.into_iter().map(ArgValue::from).collect()),
            Value::Object(map) => ArgValue::Object(
                map.into_iter()
                    .map(|(key, value)| (key, ArgValue::from(value)))
                    .collect(),
            ),
        }
    }
}

/// Largest integer magnitude an `f64` represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Renders a parsed number as JSON.
///
/// Integral values within the exactly-representable range become JSON
/// integers (`200.0` → `200`), so upstream APIs that expect integer fields
/// such as `max_tokens` receive one. Everything else stays a float.
/// Non-finite values (which the parser rejects) render as `null`.
pub fn json_number(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
    }
}
