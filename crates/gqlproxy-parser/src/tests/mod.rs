mod graphql_parser_argument_tests;
mod graphql_parser_property_tests;
mod utils;
