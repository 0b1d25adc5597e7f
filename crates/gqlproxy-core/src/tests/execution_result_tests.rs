use crate::ErrorCode;
use crate::ExecutionResult;
use crate::GraphQLRequest;
use indexmap::IndexMap;
use serde_json::json;

#[test]
fn data_envelope_serializes_without_errors() {
    let mut data = IndexMap::new();
    data.insert("models".to_string(), json!({"object": "list"}));

    let value = serde_json::to_value(ExecutionResult::Data(data)).unwrap();

    assert_eq!(value, json!({"data": {"models": {"object": "list"}}}));
}

#[test]
fn error_envelope_serializes_without_data() {
    let value =
        serde_json::to_value(ExecutionResult::error("Not found", ErrorCode::NotFound)).unwrap();

    assert_eq!(
        value,
        json!({
            "errors": [{
                "message": "Not found",
                "locations": [],
                "path": [],
                "extensions": {"code": "NOT_FOUND"}
            }]
        }),
    );
}

#[test]
fn error_codes_use_screaming_snake_case() {
    assert_eq!(serde_json::to_value(ErrorCode::InternalError).unwrap(), "INTERNAL_ERROR");
    assert_eq!(serde_json::to_value(ErrorCode::BadRequest).unwrap(), "BAD_REQUEST");
    assert_eq!(
        serde_json::to_value(ErrorCode::ConfigurationError).unwrap(),
        "CONFIGURATION_ERROR",
    );
}

#[test]
fn envelope_deserializes() {
    let result: ExecutionResult =
        serde_json::from_str(r#"{"errors":[{"message":"x","extensions":{"code":"BAD_REQUEST"}}]}"#)
            .unwrap();

    assert_eq!(result.errors()[0].code(), ErrorCode::BadRequest);
    assert!(result.errors()[0].locations.is_empty());
}

#[test]
fn request_accepts_optional_fields() {
    let request: GraphQLRequest = serde_json::from_str(r#"{"query":"{ models }"}"#).unwrap();
    assert_eq!(request, GraphQLRequest::new("{ models }"));

    let request: GraphQLRequest = serde_json::from_str(
        r#"{"query":"{ a }","variables":{"x":1},"operationName":"Q"}"#,
    )
    .unwrap();
    assert_eq!(request.operation_name.as_deref(), Some("Q"));
    assert_eq!(request.variables.unwrap()["x"], json!(1));
}

#[test]
fn request_accepts_null_variables() {
    let request: GraphQLRequest =
        serde_json::from_str(r#"{"query":"{ a }","variables":null,"operationName":null}"#).unwrap();

    assert_eq!(request.variables, None);
    assert_eq!(request.operation_name, None);
}
