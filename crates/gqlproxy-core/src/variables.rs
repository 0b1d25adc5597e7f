//! Substitution of `$variable` references with request variables.

use crate::Variables;
use gqlproxy_parser::ast::ArgValue;
use gqlproxy_parser::ast::Arguments;
use gqlproxy_parser::ast::json_number;
use serde_json::Map;
use serde_json::Value;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum VariableError {
    #[error("Variable \"${0}\" is not defined")]
    MissingVariable(String),
}

/// Converts parsed arguments to JSON, replacing every variable reference
/// (including references nested in objects and lists) with its value from
/// `variables`.
///
/// A variable supplied as JSON `null` is defined and resolves to `null`.
pub fn resolve_arguments(
    arguments: &Arguments,
    variables: &Variables,
) -> Result<Map<String, Value>, VariableError> {
    arguments
        .iter()
        .map(|(name, value)| Ok((name.clone(), resolve_value(value, variables)?)))
        .collect()
}

/// Converts a single argument value to JSON. See [`resolve_arguments`].
pub fn resolve_value(value: &ArgValue, variables: &Variables) -> Result<Value, VariableError> {
    Ok(match value {
        ArgValue::Variable(name) => variables
            .get(name)
            .cloned()
            .ok_or_else(|| VariableError::MissingVariable(name.clone()))?,
        ArgValue::String(s) => Value::String(s.clone()),
        ArgValue::Number(n) => json_number(*n),
        ArgValue::Boolean(b) => Value::Bool(*b),
        ArgValue::Null => Value::Null,
        ArgValue::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, value)| Ok((key.clone(), resolve_value(value, variables)?)))
                .collect::<Result<_, VariableError>>()?,
        ),
        ArgValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_value(item, variables))
                .collect::<Result<_, _>>()?,
        ),
    })
}
