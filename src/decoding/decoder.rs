use std::{borrow::Cow, str};

use tracing::trace;

use crate::{
    error::{Expected, ExpectedSet, Format, ParseError, ParseErrorKind},
    state_tracker::Scanner,
    value::{DictEntry, Value},
};

const VALUE_START: ExpectedSet = ExpectedSet::new(&[
    Expected::Byte(b'i'),
    Expected::Digit,
    Expected::Byte(b'l'),
    Expected::Byte(b'd'),
]);
const LIST_ITEM: ExpectedSet = ExpectedSet::new(&[
    Expected::Byte(b'i'),
    Expected::Digit,
    Expected::Byte(b'l'),
    Expected::Byte(b'd'),
    Expected::Byte(b'e'),
]);
const DICT_KEY: ExpectedSet = ExpectedSet::new(&[Expected::Digit, Expected::Byte(b'e')]);
const LENGTH: ExpectedSet = ExpectedSet::new(&[Expected::Digit, Expected::Byte(b':')]);
const INTEGER_START: ExpectedSet = ExpectedSet::new(&[Expected::Byte(b'-'), Expected::Digit]);
const INTEGER_DIGIT: ExpectedSet = ExpectedSet::new(&[Expected::Digit]);
const INTEGER_REST: ExpectedSet = ExpectedSet::new(&[Expected::Digit, Expected::Byte(b'e')]);
const CONTENT: ExpectedSet = ExpectedSet::new(&[Expected::AnyByte]);

/// A bencode decoder
///
/// Reads one value at a time with [`Decoder::next_value`]. Each call starts at
/// [`Decoder::offset`] and leaves it on the first byte after the value it read.
#[derive(Debug)]
pub struct Decoder<'ser> {
    scanner: Scanner<'ser>,
}

impl<'ser> Decoder<'ser> {
    /// Create a new decoder from the given byte array
    pub fn new(buffer: &'ser [u8]) -> Self {
        Decoder {
            scanner: Scanner::new(buffer, Format::Bencode),
        }
    }

    /// Set the maximum nesting depth of the decoder.
    #[must_use]
    pub fn with_max_depth(mut self, new_max_depth: usize) -> Self {
        self.scanner.set_max_depth(new_max_depth);
        self
    }

    /// Offset of the first byte that has not been read yet.
    pub fn offset(&self) -> usize {
        self.scanner.cursor.offset()
    }

    /// Read the next value from the input.
    ///
    /// Returns `Ok(None)` at the end of input, `Ok(Some(value))` after reading a
    /// complete value, and an error if the bytes at the current offset are not a
    /// well formed value.
    pub fn next_value(&mut self) -> Result<Option<Value<'ser>>, ParseError> {
        if self.scanner.cursor.is_eof() {
            return Ok(None);
        }
        self.scan_value().map(Some)
    }

    /// Read the next value from the input, treating end of input as an error.
    pub fn decode_value(&mut self) -> Result<Value<'ser>, ParseError> {
        trace!(offset = self.offset(), "decoding bencode value");
        self.scan_value()
    }

    fn scan_value(&mut self) -> Result<Value<'ser>, ParseError> {
        let start = self.scanner.cursor.offset();
        match self.scanner.peek_or_eof(VALUE_START)? {
            b'i' => {
                self.scanner.cursor.advance(1);
                Ok(Value::Integer(Cow::Borrowed(self.take_int()?)))
            },
            b'0'..=b'9' => Ok(Value::Bytes(Cow::Borrowed(self.take_string()?))),
            b'l' => {
                self.scanner.enter(start)?;
                self.scanner.cursor.advance(1);
                let items = self.scan_list()?;
                self.scanner.leave();
                Ok(Value::List(items))
            },
            b'd' => {
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

    /// Reads the digits of an integer, with the cursor right after its `i`.
    fn take_int(&mut self) -> Result<&'ser str, ParseError> {
        enum State {
            Start,
            Sign,
            Digits,
        }

        let start = self.scanner.cursor.offset();
        let mut state = State::Start;

        loop {
            let expected = match state {
                State::Start => INTEGER_START,
                State::Sign => INTEGER_DIGIT,
                State::Digits => INTEGER_REST,
            };
            let c = self.scanner.peek_or_eof(expected)?;
            state = match (state, c) {
                (State::Start, b'-') => State::Sign,
                (_, b'0'..=b'9') => State::Digits,
                (State::Digits, b'e') => break,
                (_, found) => {
                    return Err(self
                        .scanner
                        .error(ParseErrorKind::MalformedInteger { found }, expected));
                },
            };
            self.scanner.cursor.advance(1);
        }

        let digits = self.scanner.cursor.since(start);
        self.scanner.cursor.advance(1);
        Ok(str::from_utf8(digits).expect("We've already examined every byte in the integer"))
    }

    /// Reads a length prefixed string, with the cursor on its first length digit.
    fn take_string(&mut self) -> Result<&'ser [u8], ParseError> {
        let start = self.scanner.cursor.offset();
        loop {
            match self.scanner.peek_or_eof(LENGTH)? {
                b'0'..=b'9' => self.scanner.cursor.advance(1),
                b':' => break,
                found => {
                    return Err(self
                        .scanner
                        .error(ParseErrorKind::MalformedLength { found }, LENGTH));
                },
            }
        }

        let digits = str::from_utf8(self.scanner.cursor.since(start))
            .expect("We've already examined every byte in the length");
        let len: usize = digits.parse().map_err(|_| {
            self.scanner
                .error_at(start, ParseErrorKind::LengthOverflow, ExpectedSet::NOTHING)
        })?;
        self.scanner.cursor.advance(1);

        self.scanner
            .cursor
            .take_chunk(len)
            .ok_or_else(|| self.scanner.eof(CONTENT))
    }

    fn scan_list(&mut self) -> Result<Vec<Value<'ser>>, ParseError> {
        let mut items = Vec::new();
        loop {
            match self.scanner.peek_or_eof(LIST_ITEM)? {
                b'e' => {
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
            let key = match self.scanner.peek_or_eof(DICT_KEY)? {
                b'e' => {
                    self.scanner.cursor.advance(1);
                    return Ok(entries);
                },
                b'0'..=b'9' => self.take_string()?,
                b'i' | b'l' | b'd' => {
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
