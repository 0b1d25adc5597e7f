use crate::ast::Arguments;

/// A top-level field of an operation together with its arguments.
///
/// Any nested selection set (`chat(...) { choices { message } }`) is consumed
/// by the parser and not represented here: resolvers return whole upstream
/// JSON documents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedField {
    pub name: String,
    pub arguments: Arguments,
}

impl ParsedField {
    pub fn new(name: impl Into<String>, arguments: Arguments) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}
