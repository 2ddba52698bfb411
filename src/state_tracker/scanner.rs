use crate::{
    error::{ExpectedSet, Format, ParseError, ParseErrorKind},
    state_tracker::{Cursor, StateTracker},
};

/// Cursor, nesting limit and error construction for one pass over one input.
#[derive(Debug, Clone)]
pub struct Scanner<'ser> {
    pub cursor: Cursor<'ser>,
    state: StateTracker,
    format: Format,
}

impl<'ser> Scanner<'ser> {
    pub fn new(source: &'ser [u8], format: Format) -> Self {
        Scanner {
            cursor: Cursor::new(source),
            state: StateTracker::new(),
            format,
        }
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.state.set_max_depth(max_depth);
    }

    /// Observe the start of a container whose opening byte is at `offset`.
    pub fn enter(&mut self, offset: usize) -> Result<(), ParseError> {
        self.state
            .enter()
            .map_err(|kind| self.error_at(offset, kind, ExpectedSet::NOTHING))
    }

    pub fn leave(&mut self) {
        self.state.leave();
    }

    pub fn error_at(&self, offset: usize, kind: ParseErrorKind, expected: ExpectedSet) -> ParseError {
        ParseError {
            format: self.format,
            offset,
            kind,
            expected,
        }
    }

    /// An error for the byte under the cursor.
    pub fn error(&self, kind: ParseErrorKind, expected: ExpectedSet) -> ParseError {
        self.error_at(self.cursor.offset(), kind, expected)
    }

    /// An error for input that ended while `expected` was still outstanding.
    pub fn eof(&self, expected: ExpectedSet) -> ParseError {
        self.error_at(
            self.cursor.source().len(),
            ParseErrorKind::UnexpectedEof,
            expected,
        )
    }

    /// The byte under the cursor, or an EOF error naming `expected`.
    pub fn peek_or_eof(&self, expected: ExpectedSet) -> Result<u8, ParseError> {
        self.cursor.peek().ok_or_else(|| self.eof(expected))
    }
}
