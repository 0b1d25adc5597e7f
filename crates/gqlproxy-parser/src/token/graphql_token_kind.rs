use crate::GraphQLErrorNotes;
use crate::GraphQLStringParsingError;
use std::borrow::Cow;
use std::num::ParseFloatError;

/// What a token is, with literal payloads kept as raw source slices.
///
/// Literals are borrowed from the query text; cooking them into values
/// happens on demand through [`parse_number_value`](Self::parse_number_value)
/// and [`parse_string_value`](Self::parse_string_value). A leading `-` is part
/// of the numeric literal (`IntValue("-5")`).
///
/// # Single-Quoted Strings
///
/// In addition to GraphQL's `"..."` and `"""..."""` strings, the lexer accepts
/// `'...'` strings. Hand-written queries sent to the proxy commonly use them.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLTokenKind<'src> {
    // =========================================================================
    // Punctuators
    // =========================================================================
    /// `@`
    At,
    /// `!`
    Bang,
    /// `:`
    Colon,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `$`
    Dollar,
    /// `...`
    Ellipsis,
    /// `=`
    Equals,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    // =========================================================================
    // Names and literals
    // =========================================================================
    Name(Cow<'src, str>),
    /// e.g. `1000`, `-5`
    IntValue(Cow<'src, str>),
    /// e.g. `0.7`, `-1.5e-3`
    FloatValue(Cow<'src, str>),
    /// The literal exactly as written, quotes and escapes included.
    StringValue(Cow<'src, str>),

    /// The `true` literal.
    True,
    /// The `false` literal.
    False,
    /// The `null` literal.
    Null,

    /// Always the last token.
    Eof,

    /// A lexer error. Lexing continues after an error token so the parser
    /// decides how to report it.
    Error {
        message: String,
        error_notes: GraphQLErrorNotes,
    },
}

impl<'src> GraphQLTokenKind<'src> {
    #[inline]
    pub fn name_borrowed(s: &'src str) -> Self {
        GraphQLTokenKind::Name(Cow::Borrowed(s))
    }

    #[inline]
    pub fn int_value_borrowed(s: &'src str) -> Self {
        GraphQLTokenKind::IntValue(Cow::Borrowed(s))
    }

    #[inline]
    pub fn float_value_borrowed(s: &'src str) -> Self {
        GraphQLTokenKind::FloatValue(Cow::Borrowed(s))
    }

    #[inline]
    pub fn string_value_borrowed(s: &'src str) -> Self {
        GraphQLTokenKind::StringValue(Cow::Borrowed(s))
    }

    #[inline]
    pub fn error(message: impl Into<String>, error_notes: GraphQLErrorNotes) -> Self {
        GraphQLTokenKind::Error {
            message: message.into(),
            error_notes,
        }
    }

    /// The source text of a punctuator; `None` for every other kind.
    pub fn as_punctuator_str(&self) -> Option<&'static str> {
        match self {
            GraphQLTokenKind::At => Some("@"),
            GraphQLTokenKind::Bang => Some("!"),
            GraphQLTokenKind::Colon => Some(":"),
            GraphQLTokenKind::CurlyBraceClose => Some("}"),
            GraphQLTokenKind::CurlyBraceOpen => Some("{"),
            GraphQLTokenKind::Dollar => Some("$"),
            GraphQLTokenKind::Ellipsis => Some("..."),
            GraphQLTokenKind::Equals => Some("="),
            GraphQLTokenKind::ParenClose => Some(")"),
            GraphQLTokenKind::ParenOpen => Some("("),
            GraphQLTokenKind::SquareBracketClose => Some("]"),
            GraphQLTokenKind::SquareBracketOpen => Some("["),
            _ => None,
        }
    }

    /// Returns `true` for `{`, `(` and `[`.
    pub fn is_open_delimiter(&self) -> bool {
        matches!(
            self,
            GraphQLTokenKind::CurlyBraceOpen
                | GraphQLTokenKind::ParenOpen
                | GraphQLTokenKind::SquareBracketOpen
        )
    }

    /// Returns `true` for `}`, `)` and `]`.
    pub fn is_close_delimiter(&self) -> bool {
        matches!(
            self,
            GraphQLTokenKind::CurlyBraceClose
                | GraphQLTokenKind::ParenClose
                | GraphQLTokenKind::SquareBracketClose
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(self, GraphQLTokenKind::Error { .. })
    }

    /// Reads an `IntValue` or `FloatValue` as `f64`.
    ///
    /// All numbers accepted by the proxy are carried as `f64`, mirroring the
    /// JSON number model used by the upstream API.
    ///
    /// Returns `None` if this is not a numeric token.
    pub fn parse_number_value(&self) -> Option<Result<f64, ParseFloatError>> {
        match self {
            GraphQLTokenKind::IntValue(raw) | GraphQLTokenKind::FloatValue(raw) => {
                Some(raw.parse::<f64>())
            },
            _ => None,
        }
    }

    /// Cooks a `StringValue` into the string it denotes.
    ///
    /// - `"..."`: processes `\n`, `\r`, `\t`, `\\`, `\"`, `\/`, `\b`, `\f`,
    ///   `\uXXXX` and `\u{X...}`.
    /// - `'...'`: same escapes, plus `\'`.
    /// - `"""..."""`: applies block string indentation stripping, then
    ///   processes the `\"""` escape only.
    ///
    /// Returns `None` if this is not a `StringValue`.
    pub fn parse_string_value(&self) -> Option<Result<String, GraphQLStringParsingError>> {
        match self {
            GraphQLTokenKind::StringValue(raw) => Some(cook_string(raw)),
            _ => None,
        }
    }
}

fn unterminated() -> GraphQLStringParsingError {
    GraphQLStringParsingError::UnterminatedString
}

/// Cooks a raw string literal (quotes included) into its value.
fn cook_string(raw: &str) -> Result<String, GraphQLStringParsingError> {
    if let Some(rest) = raw.strip_prefix(r#"""""#) {
        let content = rest.strip_suffix(r#"""""#).ok_or_else(unterminated)?;
        return Ok(dedent_block(&content.replace(r#"\""""#, r#"""""#)));
    }

    let quote = match raw.chars().next() {
        Some(quote @ ('"' | '\'')) => quote,
        _ => return Err(unterminated()),
    };
    let content = raw[1..].strip_suffix(quote).ok_or_else(unterminated)?;
    unescape(content, quote)
}

fn unescape(content: &str, quote: char) -> Result<String, GraphQLStringParsingError> {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(backslash) = rest.find('\\') {
        out.push_str(&rest[..backslash]);
        let mut tail = rest[backslash + 1..].chars();
        let cooked = match tail.next() {
            Some('n') => '\n',
            Some('r') => '\r',
            Some('t') => '\t',
            Some('b') => '\u{0008}',
            Some('f') => '\u{000C}',
            Some(c @ ('\\' | '/' | '"')) => c,
            Some('\'') if quote == '\'' => '\'',
            Some('u') => {
                let (c, remaining) = unicode_escape(tail.as_str())?;
                out.push(c);
                rest = remaining;
                continue;
            },
            Some(other) => {
                return Err(GraphQLStringParsingError::InvalidEscapeSequence(format!(
                    "\\{other}"
                )));
            },
            None => {
                return Err(GraphQLStringParsingError::InvalidEscapeSequence(
                    "\\".to_string(),
                ));
            },
        };
        out.push(cooked);
        rest = tail.as_str();
    }
    out.push_str(rest);
    Ok(out)
}

/// Decodes the digits following `\u`: exactly four hex digits, or one to
/// six inside braces. Returns the character and the input after the escape.
fn unicode_escape(input: &str) -> Result<(char, &str), GraphQLStringParsingError> {
    let braced = input.starts_with('{');
    let (digits, remaining, shown) = if braced {
        let inner = &input[1..];
        let Some(close) = inner.find('}') else {
            return Err(GraphQLStringParsingError::InvalidUnicodeEscape(format!(
                "\\u{{{inner}"
            )));
        };
        (&inner[..close], &inner[close + 1..], format!("\\u{{{}}}", &inner[..close]))
    } else {
        let end = input.char_indices().nth(4).map_or(input.len(), |(idx, _)| idx);
        (&input[..end], &input[end..], format!("\\u{}", &input[..end]))
    };

    let well_formed = digits.chars().all(|c| c.is_ascii_hexdigit())
        && if braced {
            (1..=6).contains(&digits.len())
        } else {
            digits.len() == 4
        };
    if !well_formed {
        return Err(GraphQLStringParsingError::InvalidUnicodeEscape(shown));
    }
    u32::from_str_radix(digits, 16)
        .ok()
        .and_then(char::from_u32)
        .map(|c| (c, remaining))
        .ok_or(GraphQLStringParsingError::InvalidUnicodeEscape(shown))
}

/// Removes the indentation shared by every non-blank line after the first,
/// then trims blank lines from both ends.
fn dedent_block(content: &str) -> String {
    let lines: Vec<&str> = content.lines().collect();
    let indent = lines
        .iter()
        .skip(1)
        .filter_map(|line| {
            let trimmed = line.trim_start();
            (!trimmed.is_empty()).then(|| line.len() - trimmed.len())
        })
        .min()
        .unwrap_or(0);

    let dedented: Vec<&str> = lines
        .iter()
        .enumerate()
        .map(|(i, &line)| if i == 0 { line } else { line.get(indent..).unwrap_or(line) })
        .collect();

    let is_blank = |line: &&str| line.trim().is_empty();
    match (
        dedented.iter().position(|line| !is_blank(line)),
        dedented.iter().rposition(|line| !is_blank(line)),
    ) {
        (Some(first), Some(last)) => dedented[first..=last].join("\n"),
        _ => String::new(),
    }
}
