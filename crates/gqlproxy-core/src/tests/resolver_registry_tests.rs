use crate::ResolverRegistry;
use crate::resolver_fn;
use gqlproxy_parser::ast::OperationType;
use serde_json::json;

#[tokio::test]
async fn lookup_by_operation_type() {
    let registry = ResolverRegistry::builder()
        .query("models", resolver_fn(|_| async { Ok(json!("q")) }))
        .mutation("models", resolver_fn(|_| async { Ok(json!("m")) }))
        .build();

    let query = registry.lookup(OperationType::Query, "models").unwrap();
    let mutation = registry.lookup(OperationType::Mutation, "models").unwrap();

    assert_eq!(query.resolve(Default::default()).await.unwrap(), json!("q"));
    assert_eq!(mutation.resolve(Default::default()).await.unwrap(), json!("m"));
    assert!(registry.lookup(OperationType::Subscription, "models").is_none());
    assert!(registry.lookup(OperationType::Query, "chat").is_none());
}

#[tokio::test]
async fn later_registration_replaces_earlier() {
    let registry = ResolverRegistry::builder()
        .query("info", resolver_fn(|_| async { Ok(json!(1)) }))
        .query("info", resolver_fn(|_| async { Ok(json!(2)) }))
        .build();

    let resolver = registry.lookup(OperationType::Query, "info").unwrap();
    assert_eq!(resolver.resolve(Default::default()).await.unwrap(), json!(2));
    assert_eq!(registry.field_names(OperationType::Query), vec!["info"]);
}

#[test]
fn field_names_follow_registration_order() {
    let registry = ResolverRegistry::builder()
        .mutation("completion", resolver_fn(|_| async { Ok(json!(null)) }))
        .mutation("chat", resolver_fn(|_| async { Ok(json!(null)) }))
        .build();

    assert_eq!(registry.field_names(OperationType::Mutation), vec!["completion", "chat"]);
    assert!(registry.field_names(OperationType::Query).is_empty());
    assert_eq!(
        format!("{registry:?}"),
        r#"ResolverRegistry { query: [], mutation: ["completion", "chat"] }"#,
    );
}
