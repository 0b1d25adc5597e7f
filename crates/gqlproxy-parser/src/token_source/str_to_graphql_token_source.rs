//! A [`GraphQLTokenSource`](crate::token_source::GraphQLTokenSource) that lexes
//! from a `&str` input.
//!
//! Token values borrow directly from the source string using `Cow::Borrowed`.
//! Positions are tracked as line, character column and byte offset. Commas
//! and `#` comments are skipped like whitespace. Invalid input produces `Error` tokens and lexing
//! continues afterwards.
//!
//! ```rust
//! use gqlproxy_parser::token::GraphQLTokenKind;
//! use gqlproxy_parser::token_source::StrGraphQLTokenSource;
//!
//! let kinds: Vec<_> = StrGraphQLTokenSource::new("{ models }")
//!     .map(|token| token.kind)
//!     .collect();
//! assert_eq!(kinds.len(), 4);
//! assert_eq!(kinds[0], GraphQLTokenKind::CurlyBraceOpen);
//! assert_eq!(kinds[3], GraphQLTokenKind::Eof);
//! ```

use crate::GraphQLErrorNote;
use crate::GraphQLSourceSpan;
use crate::SourcePosition;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use smallvec::smallvec;

/// Lexer over a `&str` input. See module documentation for details.
pub struct StrGraphQLTokenSource<'src> {
    /// The full source text being lexed.
    source: &'src str,

    /// Current byte offset from the start of `source`.
    curr_byte_offset: usize,

    /// Current 0-based line number.
    curr_line: usize,

    /// Current character column (0-based).
    curr_col_utf8: usize,

    /// Whether the previous character was `\r`, so that `\r\n` counts as a
    /// single newline.
    last_char_was_cr: bool,

    /// Whether the EOF token has been emitted.
    finished: bool,
}

impl<'src> StrGraphQLTokenSource<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_line: 0,
            curr_col_utf8: 0,
            last_char_was_cr: false,
            finished: false,
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    /// Returns the remaining source text to be lexed.
    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn curr_position(&self) -> SourcePosition {
        SourcePosition::new(
            self.curr_line,
            self.curr_col_utf8,
            self.curr_byte_offset,
        )
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Peeks at the nth character ahead without consuming.
    fn peek_char_nth(&self, n: usize) -> Option<char> {
        self.remaining().chars().nth(n)
    }

    /// Consumes the next character and updates position tracking.
    ///
    /// Handles `\n`, `\r` and `\r\n` as line terminators.
    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;

        if ch == '\n' {
            if self.last_char_was_cr {
                // Second half of a `\r\n` pair: the line was already counted.
                self.last_char_was_cr = false;
            } else {
                self.curr_line += 1;
                self.curr_col_utf8 = 0;
            }
        } else if ch == '\r' {
            self.curr_line += 1;
            self.curr_col_utf8 = 0;
            self.last_char_was_cr = true;
        } else {
            self.curr_col_utf8 += 1;
            self.last_char_was_cr = false;
        }

        self.curr_byte_offset += ch.len_utf8();
        Some(ch)
    }

    /// Advances over `len` bytes known to contain no line terminators.
    fn advance_within_line(&mut self, len: usize) {
        self.curr_col_utf8 += self.remaining()[..len].chars().count();
        self.curr_byte_offset += len;
        self.last_char_was_cr = false;
    }

    fn make_span(&self, start: SourcePosition) -> GraphQLSourceSpan {
        GraphQLSourceSpan::new(start, self.curr_position())
    }

    fn make_token(
        &self,
        kind: GraphQLTokenKind<'src>,
        span: GraphQLSourceSpan,
    ) -> GraphQLToken<'src> {
        GraphQLToken::new(kind, span)
    }

    /// Consumes a single-character punctuator and returns its token.
    fn punctuator(
        &mut self,
        start: SourcePosition,
        kind: GraphQLTokenKind<'src>,
    ) -> GraphQLToken<'src> {
        self.consume();
        let span = self.make_span(start);
        self.make_token(kind, span)
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    /// Advances to the next token, skipping whitespace, commas and comments.
    fn next_token(&mut self) -> GraphQLToken<'src> {
        loop {
            self.skip_whitespace();
            let start = self.curr_position();

            return match self.peek_char() {
                None => {
                    let span = self.make_span(start);
                    self.make_token(GraphQLTokenKind::Eof, span)
                },

                Some('#') => {
                    self.skip_comment();
                    continue;
                },

                Some(',') => {
                    self.consume();
                    continue;
                },

                Some('!') => self.punctuator(start, GraphQLTokenKind::Bang),
                Some('$') => self.punctuator(start, GraphQLTokenKind::Dollar),
                Some('(') => self.punctuator(start, GraphQLTokenKind::ParenOpen),
                Some(')') => self.punctuator(start, GraphQLTokenKind::ParenClose),
                Some(':') => self.punctuator(start, GraphQLTokenKind::Colon),
                Some('=') => self.punctuator(start, GraphQLTokenKind::Equals),
                Some('@') => self.punctuator(start, GraphQLTokenKind::At),
                Some('[') => self.punctuator(start, GraphQLTokenKind::SquareBracketOpen),
                Some(']') => self.punctuator(start, GraphQLTokenKind::SquareBracketClose),
                Some('{') => self.punctuator(start, GraphQLTokenKind::CurlyBraceOpen),
                Some('}') => self.punctuator(start, GraphQLTokenKind::CurlyBraceClose),

                Some('.') => self.lex_dots(start),

                Some('"') => self.lex_string(start),
                Some('\'') => self.lex_single_quoted_string(start),

                Some(c) if is_name_start(c) => self.lex_name(start),

                Some(c) if c == '-' || c.is_ascii_digit() => self.lex_number(start),

                Some(_) => self.lex_invalid_character(start),
            };
        }
    }

    // =========================================================================
    // Whitespace and comments
    // =========================================================================

    /// Skips space, tab, line terminators and the Unicode BOM. Commas are
    /// handled in `next_token()`.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\n' | '\r' | '\u{FEFF}' => {
                    self.consume();
                },
                _ => break,
            }
        }
    }

    /// Skips a `#` comment up to (not including) the end of the line.
    fn skip_comment(&mut self) {
        self.consume();
        let len = memchr::memchr2(b'\n', b'\r', self.remaining().as_bytes())
            .unwrap_or(self.remaining().len());
        self.advance_within_line(len);
    }

    // =========================================================================
    // Dots
    // =========================================================================

    /// Lexes `...` (fragment spread syntax), or an error for a lone `.`/`..`.
    fn lex_dots(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        if self.remaining().starts_with("...") {
            self.consume();
            self.consume();
            self.consume();
            let span = self.make_span(start);
            return self.make_token(GraphQLTokenKind::Ellipsis, span);
        }

        let is_double = self.remaining().starts_with("..");
        self.consume();
        if is_double {
            self.consume();
        }
        let span = self.make_span(start);
        let kind = if is_double {
            GraphQLTokenKind::error(
                "Unexpected `..`",
                smallvec![GraphQLErrorNote::help(
                    "Add one more `.` to form the spread operator `...`"
                )],
            )
        } else {
            GraphQLTokenKind::error("Unexpected `.`", smallvec![])
        };
        self.make_token(kind, span)
    }

    // =========================================================================
    // Names
    // =========================================================================

    /// Lexes a name or keyword matching `/[_A-Za-z][_0-9A-Za-z]*/`.
    ///
    /// `true`, `false`, and `null` are emitted as distinct token kinds.
    fn lex_name(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let name_start = self.curr_byte_offset;
        let len = self
            .remaining()
            .bytes()
            .position(|b| !is_name_continue(b as char))
            .unwrap_or(self.remaining().len());
        self.advance_within_line(len);

        let name = &self.source[name_start..self.curr_byte_offset];
        let span = self.make_span(start);
        let kind = match name {
            "true" => GraphQLTokenKind::True,
            "false" => GraphQLTokenKind::False,
            "null" => GraphQLTokenKind::Null,
            _ => GraphQLTokenKind::name_borrowed(name),
        };
        self.make_token(kind, span)
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// Lexes an integer or float literal.
    ///
    /// - Optional negative sign: `-`
    /// - Integer part: `0` or `[1-9][0-9]*`
    /// - Optional decimal part: `.[0-9]+`
    /// - Optional exponent: `[eE][+-]?[0-9]+`
    fn lex_number(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let num_start = self.curr_byte_offset;
        let mut is_float = false;

        if self.peek_char() == Some('-') {
            self.consume();
        }

        match self.peek_char() {
            Some('0') => {
                self.consume();
                if self.peek_char().is_some_and(|ch| ch.is_ascii_digit()) {
                    return self.lex_number_error(
                        start,
                        "Invalid number: leading zeros are not allowed",
                    );
                }
            },
            Some(ch) if ch.is_ascii_digit() => self.consume_digits(),
            Some(_) | None => {
                let span = self.make_span(start);
                let kind = GraphQLTokenKind::error("Unexpected `-`", smallvec![]);
                return self.make_token(kind, span);
            },
        }

        if self.peek_char() == Some('.')
            && self.peek_char_nth(1).is_some_and(|ch| ch.is_ascii_digit())
        {
            is_float = true;
            self.consume();
            self.consume_digits();
        }

        if let Some('e' | 'E') = self.peek_char() {
            is_float = true;
            self.consume();
            if let Some('+' | '-') = self.peek_char() {
                self.consume();
            }
            if !self.peek_char().is_some_and(|ch| ch.is_ascii_digit()) {
                return self.lex_number_error(
                    start,
                    "Invalid number: exponent must have at least one digit",
                );
            }
            self.consume_digits();
        }

        // A number immediately followed by a name character (`12abc`) or a dot
        // (`1.`) is malformed.
        if self.peek_char().is_some_and(|ch| is_name_start(ch) || ch == '.') {
            return self.lex_number_error(
                start,
                "Invalid number: unexpected character after numeric literal",
            );
        }

        let raw = &self.source[num_start..self.curr_byte_offset];
        let span = self.make_span(start);
        let kind = if is_float {
            GraphQLTokenKind::float_value_borrowed(raw)
        } else {
            GraphQLTokenKind::int_value_borrowed(raw)
        };
        self.make_token(kind, span)
    }

    fn consume_digits(&mut self) {
        let len = self
            .remaining()
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(self.remaining().len());
        self.advance_within_line(len);
    }

    /// Creates an error token for an invalid number, consuming the rest of the
    /// malformed literal so lexing resumes at a sensible boundary.
    fn lex_number_error(
        &mut self,
        start: SourcePosition,
        message: &str,
    ) -> GraphQLToken<'src> {
        while self
            .peek_char()
            .is_some_and(|ch| is_name_continue(ch) || ch == '.' || ch == '+' || ch == '-')
        {
            self.consume();
        }
        let span = self.make_span(start);
        self.make_token(GraphQLTokenKind::error(message, smallvec![]), span)
    }

    // =========================================================================
    // Strings
    // =========================================================================

    /// Lexes a `"..."` or `"""..."""` string literal.
    fn lex_string(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        if self.remaining().starts_with("\"\"\"") {
            return self.lex_block_string(start);
        }
        self.lex_quoted_string(start, '"')
    }

    fn lex_single_quoted_string(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        self.lex_quoted_string(start, '\'')
    }

    /// Lexes a single-line string delimited by `quote`. Escaped characters are
    /// skipped here and cooked later by `parse_string_value()`.
    fn lex_quoted_string(
        &mut self,
        start: SourcePosition,
        quote: char,
    ) -> GraphQLToken<'src> {
        let str_start = self.curr_byte_offset;
        self.consume();

        loop {
            match self.peek_char() {
                None => {
                    let span = self.make_span(start.clone());
                    let kind = GraphQLTokenKind::error(
                        "Unterminated string literal",
                        smallvec![
                            GraphQLErrorNote::general_with_span(
                                "String started here",
                                GraphQLSourceSpan::empty_at(start),
                            ),
                            GraphQLErrorNote::help(format!("Add closing `{quote}`")),
                        ],
                    );
                    return self.make_token(kind, span);
                },
                Some('\n') | Some('\r') => {
                    self.consume();
                    if self.last_char_was_cr && self.peek_char() == Some('\n') {
                        self.consume();
                    }
                    let span = self.make_span(start);
                    let kind = GraphQLTokenKind::error(
                        "Unterminated string literal",
                        smallvec![
                            GraphQLErrorNote::general(
                                "Single-line strings cannot contain unescaped newlines"
                            ),
                            GraphQLErrorNote::help(
                                "Use a block string (triple quotes) for multi-line \
                                 strings, or escape the newline with `\\n`"
                            ),
                        ],
                    );
                    return self.make_token(kind, span);
                },
                Some('\\') => {
                    self.consume();
                    if self.peek_char().is_some_and(|ch| ch != '\n' && ch != '\r') {
                        self.consume();
                    }
                },
                Some(ch) if ch == quote => {
                    self.consume();
                    break;
                },
                Some(_) => {
                    self.consume();
                },
            }
        }

        let raw = &self.source[str_start..self.curr_byte_offset];
        let span = self.make_span(start);
        self.make_token(GraphQLTokenKind::string_value_borrowed(raw), span)
    }

    /// Lexes a `"""..."""` block string literal.
    fn lex_block_string(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let str_start = self.curr_byte_offset;
        self.consume();
        self.consume();
        self.consume();

        loop {
            if self.remaining().starts_with("\\\"\"\"") {
                for _ in 0..4 {
                    self.consume();
                }
                continue;
            }
            if self.remaining().starts_with("\"\"\"") {
                self.consume();
                self.consume();
                self.consume();
                break;
            }
            if self.consume().is_none() {
                let span = self.make_span(start.clone());
                let kind = GraphQLTokenKind::error(
                    "Unterminated block string",
                    smallvec![
                        GraphQLErrorNote::general_with_span(
                            "Block string started here",
                            GraphQLSourceSpan::empty_at(start),
                        ),
                        GraphQLErrorNote::help("Add closing `\"\"\"`"),
                    ],
                );
                return self.make_token(kind, span);
            }
        }

        let raw = &self.source[str_start..self.curr_byte_offset];
        let span = self.make_span(start);
        self.make_token(GraphQLTokenKind::string_value_borrowed(raw), span)
    }

    // =========================================================================
    // Invalid characters
    // =========================================================================

    fn lex_invalid_character(&mut self, start: SourcePosition) -> GraphQLToken<'src> {
        let description = self.peek_char().map(describe_char).unwrap_or_default();
        self.consume();
        let span = self.make_span(start);
        let kind = GraphQLTokenKind::error(
            format!("Unexpected character {description}"),
            smallvec![],
        );
        self.make_token(kind, span)
    }
}

impl<'src> Iterator for StrGraphQLTokenSource<'src> {
    type Item = GraphQLToken<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if matches!(token.kind, GraphQLTokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

// =============================================================================
// Helper functions
// =============================================================================

fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Returns a human-readable description of a character for error messages.
///
/// Printable characters are shown in backticks; control and invisible
/// characters are shown by code point.
fn describe_char(ch: char) -> String {
    if ch.is_control() || ch.is_whitespace() {
        format!("U+{:04X}", ch as u32)
    } else {
        format!("`{ch}`")
    }
}
