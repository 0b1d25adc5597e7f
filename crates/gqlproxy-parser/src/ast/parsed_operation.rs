use crate::ast::OperationType;
use crate::ast::ParsedField;

/// The single operation contained in a query document.
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedOperation {
    pub operation_type: OperationType,
    /// `None` for anonymous operations (`{ models }`, `query { models }`).
    pub operation_name: Option<String>,
    /// Top-level fields in source order.
    pub fields: Vec<ParsedField>,
}

impl ParsedOperation {
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }
}
