/// Source position information produced by the lexer.
///
/// This is a pure data struct with no mutation methods. Lexers are responsible
/// for computing position values as they scan input.
///
/// # Indexing Convention
///
/// **All position values are 0-based:**
/// - `line`: 0 = first line of the document
/// - `col_utf8`: character count within the current line
/// - `byte_offset`: byte offset within the whole document
///
/// A multi-byte character such as `é` advances `col_utf8` by 1 and
/// `byte_offset` by its UTF-8 length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SourcePosition {
    line: usize,
    col_utf8: usize,
    byte_offset: usize,
}

impl SourcePosition {
    /// Create a new SourcePosition from 0-based components.
    pub fn new(line: usize, col_utf8: usize, byte_offset: usize) -> Self {
        Self {
            line,
            col_utf8,
            byte_offset,
        }
    }

    /// Returns the 0-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns the 0-based (UTF-8) character count within the current line.
    pub fn col_utf8(&self) -> usize {
        self.col_utf8
    }

    /// Returns the 0-based byte offset from document start.
    pub fn byte_offset(&self) -> usize {
        self.byte_offset
    }
}
