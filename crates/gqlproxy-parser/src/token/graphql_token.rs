use crate::GraphQLSourceSpan;
use crate::token::GraphQLTokenKind;

/// A GraphQL token with location (span) information.
///
/// Whitespace, commas and `#` comments never produce tokens, so the parser can
/// simply call `peek()` and `consume()`.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLToken<'src> {
    pub kind: GraphQLTokenKind<'src>,
    pub span: GraphQLSourceSpan,
}

impl<'src> GraphQLToken<'src> {
    pub fn new(kind: GraphQLTokenKind<'src>, span: GraphQLSourceSpan) -> Self {
        Self { kind, span }
    }

    /// Whether this token starts exactly where `previous` ended, with no
    /// whitespace, comma or comment in between.
    pub fn is_adjacent_to(&self, previous: &GraphQLSourceSpan) -> bool {
        self.span.start_inclusive.byte_offset() == previous.end_exclusive.byte_offset()
    }
}
