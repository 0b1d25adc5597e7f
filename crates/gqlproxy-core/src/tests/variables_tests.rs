use crate::VariableError;
use crate::Variables;
use crate::variables::resolve_arguments;
use gqlproxy_parser::parse_arguments;
use serde_json::Value;
use serde_json::json;

fn variables(value: Value) -> Variables {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[test]
fn literals_convert_to_json() {
    let args = parse_arguments(
        r#"model: "deepseek-chat", max_tokens: 200, temperature: 0.7, stream: false, stop: null"#,
    )
    .unwrap();

    let resolved = resolve_arguments(&args, &Variables::new()).unwrap();

    assert_eq!(
        Value::Object(resolved),
        json!({
            "model": "deepseek-chat",
            "max_tokens": 200,
            "temperature": 0.7,
            "stream": false,
            "stop": null
        }),
    );
}

#[test]
fn integral_numbers_become_json_integers() {
    let args = parse_arguments("max_tokens: 200").unwrap();
    let resolved = resolve_arguments(&args, &Variables::new()).unwrap();

    assert!(resolved["max_tokens"].is_i64());
}

#[test]
fn whole_object_variable_is_substituted() {
    let args = parse_arguments("input: $input").unwrap();
    let vars = variables(json!({
        "input": {"messages": [{"role": "user", "content": "hi"}]}
    }));

    let resolved = resolve_arguments(&args, &vars).unwrap();

    assert_eq!(
        resolved["input"],
        json!({"messages": [{"role": "user", "content": "hi"}]}),
    );
}

#[test]
fn nested_variables_are_substituted() {
    let args = parse_arguments(
        r#"input: { messages: [{ role: "user", content: $text }], temperature: $t }"#,
    )
    .unwrap();
    let vars = variables(json!({"text": "hello", "t": 0.2}));

    let resolved = resolve_arguments(&args, &vars).unwrap();

    assert_eq!(
        resolved["input"],
        json!({
            "messages": [{"role": "user", "content": "hello"}],
            "temperature": 0.2
        }),
    );
}

#[test]
fn null_variable_is_defined() {
    let args = parse_arguments("stop: $stop").unwrap();
    let vars = variables(json!({"stop": null}));

    let resolved = resolve_arguments(&args, &vars).unwrap();

    assert_eq!(resolved["stop"], Value::Null);
}

#[test]
fn missing_variable_is_an_error() {
    let args = parse_arguments("input: $input").unwrap();

    let err = resolve_arguments(&args, &Variables::new()).unwrap_err();

    assert_eq!(err, VariableError::MissingVariable("input".to_string()));
    assert_eq!(err.to_string(), "Variable \"$input\" is not defined");
}

#[test]
fn missing_nested_variable_is_an_error() {
    let args = parse_arguments("input: { messages: [$first, $second] }").unwrap();
    let vars = variables(json!({"first": {"role": "user", "content": "a"}}));

    let err = resolve_arguments(&args, &vars).unwrap_err();

    assert_eq!(err, VariableError::MissingVariable("second".to_string()));
}

#[test]
fn argument_order_is_preserved() {
    let args = parse_arguments("z: 1, a: 2, m: 3").unwrap();
    let resolved = resolve_arguments(&args, &Variables::new()).unwrap();

    assert_eq!(resolved.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
}
