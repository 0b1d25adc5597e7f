//! Property tests: the lexer and parser must never panic, and well-formed
//! documents built from generated parts must parse back to those parts.

use crate::ast::ArgValue;
use crate::token::GraphQLTokenKind;
use crate::token_source::StrGraphQLTokenSource;
use proptest::prelude::*;

/// Characters that exercise every lexer branch.
fn graphql_ish_string() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("{".to_string()),
            Just("}".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
            Just("[".to_string()),
            Just("]".to_string()),
            Just(":".to_string()),
            Just("$".to_string()),
            Just("\"".to_string()),
            Just("'".to_string()),
            Just("\"\"\"".to_string()),
            Just("\\".to_string()),
            Just("#".to_string()),
            Just("...".to_string()),
            Just("@".to_string()),
            Just(",".to_string()),
            Just("\n".to_string()),
            Just(" ".to_string()),
            Just("query".to_string()),
            Just("mutation".to_string()),
            "[a-z_][a-z0-9_]{0,6}",
            "-?[0-9]{1,4}(\\.[0-9]{1,3})?([eE][+-]?[0-9]{1,2})?",
            any::<char>().prop_map(|c| c.to_string()),
        ],
        0..48,
    )
    .prop_map(|parts| parts.concat())
}

fn field_name() -> impl Strategy<Value = String> {
    "[a-z_][a-zA-Z0-9_]{0,8}".prop_filter("keywords lex as literals", |name| {
        !matches!(name.as_str(), "true" | "false" | "null")
    })
}

proptest! {
    #[test]
    fn lexer_terminates_with_a_single_eof(source in graphql_ish_string()) {
        let tokens: Vec<_> = StrGraphQLTokenSource::new(&source).collect();
        let eof_count = tokens
            .iter()
            .filter(|token| matches!(token.kind, GraphQLTokenKind::Eof))
            .count();

        prop_assert_eq!(eof_count, 1);
        prop_assert!(matches!(tokens.last().map(|t| &t.kind), Some(GraphQLTokenKind::Eof)));
    }

    #[test]
    fn parser_never_panics(source in graphql_ish_string()) {
        let _ = crate::parse_query(&source);
        let _ = crate::parse_arguments(&source);
    }

    #[test]
    fn parser_never_panics_on_arbitrary_text(source in ".{0,64}") {
        let _ = crate::parse_query(&source);
    }

    #[test]
    fn generated_fields_parse_in_order(
        names in proptest::collection::vec(field_name(), 1..8),
        nesting in 0usize..6,
    ) {
        let selection = if nesting == 0 {
            String::new()
        } else {
            format!("{}x{}", "{ ".repeat(nesting), " }".repeat(nesting))
        };
        let body = names
            .iter()
            .map(|name| format!("{name} {selection}"))
            .collect::<Vec<_>>()
            .join(" ");
        let operation = crate::parse_query(&format!("mutation {{ {body} }}"));

        prop_assert!(operation.is_ok());
        let operation = operation.unwrap();
        prop_assert_eq!(
            operation.field_names().collect::<Vec<_>>(),
            names.iter().map(String::as_str).collect::<Vec<_>>(),
        );
    }

    #[test]
    fn integer_arguments_parse_to_numbers(n in -1_000_000i64..1_000_000) {
        let args = crate::parse_arguments(&format!("max_tokens: {n}"));

        prop_assert!(args.is_ok());
        prop_assert_eq!(&args.unwrap()["max_tokens"], &ArgValue::Number(n as f64));
    }

    #[test]
    fn string_arguments_round_trip(text in "[^\"\\\\\n\r]{0,32}") {
        let args = crate::parse_arguments(&format!("content: \"{text}\""));

        prop_assert!(args.is_ok());
        prop_assert_eq!(&args.unwrap()["content"], &ArgValue::String(text));
    }
}
