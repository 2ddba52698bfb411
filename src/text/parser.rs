use std::{borrow::Cow, str};

use tracing::trace;

use crate::{
    error::{Expected, ExpectedSet, Format, ParseError, ParseErrorKind},
    state_tracker::Scanner,
    text::is_closing_quote,
    value::{DictEntry, Value},
};

const VALUE_START: ExpectedSet = ExpectedSet::new(&[
    Expected::Byte(b'"'),
    Expected::Digit,
    Expected::Byte(b'-'),
    Expected::Byte(b'['),
    Expected::Byte(b'{'),
]);
const SEPARATOR: ExpectedSet = ExpectedSet::new(&[Expected::Byte(b':'), Expected::Byte(b',')]);
const LIST_ITEM: ExpectedSet = ExpectedSet::new(&[
    Expected::Byte(b'"'),
    Expected::Digit,
    Expected::Byte(b'-'),
    Expected::Byte(b'['),
    Expected::Byte(b'{'),
    Expected::Byte(b']'),
]);
const DICT_KEY: ExpectedSet = ExpectedSet::new(&[Expected::Byte(b'"'), Expected::Byte(b'}')]);
const DIGIT: ExpectedSet = ExpectedSet::new(&[Expected::Digit]);
const CLOSING_QUOTE: ExpectedSet = ExpectedSet::new(&[Expected::Byte(b'"')]);

/// A parser for the text form
///
/// Reads one value at a time with [`TextParser::next_value`]. Each call starts
/// at [`TextParser::offset`] and leaves it on the first byte after the value it
/// read; `:` and `,` in front of a value are skipped.
#[derive(Debug)]
pub struct TextParser<'ser> {
    scanner: Scanner<'ser>,
}

impl<'ser> TextParser<'ser> {
    /// Create a new parser from the given byte array
    pub fn new(buffer: &'ser [u8]) -> Self {
        TextParser {
            scanner: Scanner::new(buffer, Format::Text),
        }
    }

    /// Set the maximum nesting depth of the parser.
    #[must_use]
    pub fn with_max_depth(mut self, new_max_depth: usize) -> Self {
        self.scanner.set_max_depth(new_max_depth);
        self
    }

    /// Offset of the first byte that has not been read yet.
    pub fn offset(&self) -> usize {
        self.scanner.cursor.offset()
    }

    /// Read the next value. Returns `Ok(None)` if only separators are left.
    pub fn next_value(&mut self) -> Result<Option<Value<'ser>>, ParseError> {
        self.skip_separators();
        if self.scanner.cursor.is_eof() {
            return Ok(None);
        }
        self.scan_value().map(Some)
    }

    /// Read the next value, treating end of input as an error.
    pub fn parse_value(&mut self) -> Result<Value<'ser>, ParseError> {
        trace!(offset = self.offset(), "parsing text value");
        self.scan_value()
    }

    fn skip_separators(&mut self) {
        while let Some(b':' | b',') = self.scanner.cursor.peek() {
            self.scanner.cursor.advance(1);
        }
    }

    fn scan_value(&mut self) -> Result<Value<'ser>, ParseError> {
        self.skip_separators();
        let start = self.scanner.cursor.offset();
        match self.scanner.peek_or_eof(VALUE_START)? {
            b'"' => {
                self.scanner.cursor.advance(1);
                Ok(Value::Bytes(Cow::Borrowed(self.take_string()?)))
            },
            found @ (b'0'..=b'9' | b'-') => {
                // A closing quote is always followed by structure, never by a number
                if self.scanner.cursor.previous() == Some(b'"') {
                    return Err(self
                        .scanner
                        .error(ParseErrorKind::UnexpectedLeadingByte { found }, SEPARATOR));
                }
                Ok(Value::Integer(Cow::Borrowed(self.take_int()?)))
            },
            b'[' => {
                self.scanner.enter(start)?;
                self.scanner.cursor.advance(1);
                let items = self.scan_list()?;
                self.scanner.leave();
                Ok(Value::List(items))
            },
            b'{' => {
                self.scanner.enter(start)?;
                self.scanner.cursor.advance(1);
                let entries = self.scan_dict()?;
                self.scanner.leave();
                Ok(Value::Dict(entries))
            },
            found => Err(self.scanner.error(
                ParseErrorKind::UnexpectedLeadingByte { found },
                VALUE_START,
            )),
        }
    }

    /// Reads an integer. The byte ending it is left for the caller.
    fn take_int(&mut self) -> Result<&'ser str, ParseError> {
        let start = self.scanner.cursor.offset();
        if self.scanner.cursor.peek() == Some(b'-') {
            self.scanner.cursor.advance(1);
        }

        let digits_start = self.scanner.cursor.offset();
        while let Some(b'0'..=b'9') = self.scanner.cursor.peek() {
            self.scanner.cursor.advance(1);
        }

        if self.scanner.cursor.offset() == digits_start {
            let found = self.scanner.peek_or_eof(DIGIT)?;
            return Err(self
                .scanner
                .error(ParseErrorKind::MalformedInteger { found }, DIGIT));
        }

        Ok(str::from_utf8(self.scanner.cursor.since(start))
            .expect("We've already examined every byte in the integer"))
    }

    /// Reads string content, with the cursor right after the opening quote.
    fn take_string(&mut self) -> Result<&'ser [u8], ParseError> {
        let start = self.scanner.cursor.offset();
        let source = self.scanner.cursor.source();
        loop {
            let quote = self
                .scanner
                .cursor
                .remaining()
                .iter()
                .position(|&b| b == b'"')
                .map(|idx| self.scanner.cursor.offset() + idx)
                .ok_or_else(|| self.scanner.eof(CLOSING_QUOTE))?;

            self.scanner.cursor.advance(quote + 1 - self.scanner.cursor.offset());
            if is_closing_quote(source, quote) {
                return Ok(&source[start..quote]);
            }
        }
    }

    fn scan_list(&mut self) -> Result<Vec<Value<'ser>>, ParseError> {
        let mut items = Vec::new();
        loop {
            self.skip_separators();
            match self.scanner.peek_or_eof(LIST_ITEM)? {
                b']' => {
                    self.scanner.cursor.advance(1);
                    return Ok(items);
                },
                _ => items.push(self.scan_value()?),
            }
        }
    }

    fn scan_dict(&mut self) -> Result<Vec<DictEntry<'ser>>, ParseError> {
        let mut entries = Vec::new();
        loop {
            self.skip_separators();
            let key = match self.scanner.peek_or_eof(DICT_KEY)? {
                b'}' => {
                    self.scanner.cursor.advance(1);
                    return Ok(entries);
                },
                b'"' => {
                    self.scanner.cursor.advance(1);
                    self.take_string()?
                },
                b'0'..=b'9' | b'-' | b'[' | b'{' => {
                    return Err(self.scanner.error(ParseErrorKind::KeyNotByteString, DICT_KEY));
                },
                found => {
                    return Err(self
                        .scanner
                        .error(ParseErrorKind::UnexpectedLeadingByte { found }, DICT_KEY));
                },
            };
            let value = self.scan_value()?;
            entries.push(DictEntry::new(key, value));
        }
    }
}
