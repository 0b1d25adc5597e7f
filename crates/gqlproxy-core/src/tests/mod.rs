mod execution_result_tests;
mod resolver_registry_tests;
mod utils;
mod variables_tests;
