mod str_to_graphql_token_source_error_tests;
mod str_to_graphql_token_source_tests;
