//! The parsed shape of an operation: just enough structure for the executor
//! to dispatch top-level fields to resolvers.

mod arg_value;
mod operation_type;
mod parsed_field;
mod parsed_operation;

pub use arg_value::ArgValue;
pub use arg_value::Arguments;
pub use arg_value::json_number;
pub use operation_type::OperationType;
pub use parsed_field::ParsedField;
pub use parsed_operation::ParsedOperation;
