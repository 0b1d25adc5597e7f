use crate::GraphQLSourceSpan;
use smallvec::SmallVec;

/// Type alias for error notes. Most errors carry 0-2 notes.
pub type GraphQLErrorNotes = SmallVec<[GraphQLErrorNote; 2]>;

/// The kind of an error note (determines how the note is rendered).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GraphQLErrorNoteKind {
    /// General context about the error. Rendered as `= note: ...`.
    General,
    /// An actionable suggestion. Rendered as `= help: ...`.
    Help,
}

/// An error note providing additional context about an error.
///
/// Notes augment the primary error message with explanatory context,
/// actionable suggestions and related source locations (e.g. where a
/// delimiter was opened).
#[derive(Clone, Debug, PartialEq)]
pub struct GraphQLErrorNote {
    pub kind: GraphQLErrorNoteKind,
    pub message: String,
    /// Optional span pointing to a related location.
    pub span: Option<GraphQLSourceSpan>,
}

impl GraphQLErrorNote {
    /// Creates a general note without a span.
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            kind: GraphQLErrorNoteKind::General,
            message: message.into(),
            span: None,
        }
    }

    /// Creates a general note with a span.
    pub fn general_with_span(
        message: impl Into<String>,
        span: GraphQLSourceSpan,
    ) -> Self {
        Self {
            kind: GraphQLErrorNoteKind::General,
            message: message.into(),
            span: Some(span),
        }
    }

    /// Creates a help note without a span.
    pub fn help(message: impl Into<String>) -> Self {
        Self {
            kind: GraphQLErrorNoteKind::Help,
            message: message.into(),
            span: None,
        }
    }
}
