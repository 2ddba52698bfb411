//! Errors reported while scanning or rendering either format.

use core::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::path::Path;

/// The format a scanner was reading when it failed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Format {
    /// Bencode, the binary form.
    Bencode,
    /// The JSON-like text form.
    Text,
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Format::Bencode => f.write_str("bencode"),
            Format::Text => f.write_str("text"),
        }
    }
}

/// A class of input a scanner would have accepted where it failed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Expected {
    /// This exact byte.
    Byte(u8),
    /// `'0'..='9'`
    Digit,
    /// Any byte at all. Only reported for truncated byte strings.
    AnyByte,
}

impl Display for Expected {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Byte(b) => write!(f, "'{}'", b.escape_ascii()),
            Expected::Digit => f.write_str("'0'..'9'"),
            Expected::AnyByte => f.write_str("any byte"),
        }
    }
}

/// The set of tokens that were acceptable at the offset of a [`ParseError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ExpectedSet(&'static [Expected]);

impl ExpectedSet {
    /// Nothing could have been accepted, e.g. when the nesting limit is hit.
    pub const NOTHING: ExpectedSet = ExpectedSet(&[]);

    /// Wrap a static list
    pub const fn new(tokens: &'static [Expected]) -> Self {
        ExpectedSet(tokens)
    }

    /// Whether `token` is part of the set
    pub fn contains(&self, token: Expected) -> bool {
        self.0.contains(&token)
    }

    /// True for [`ExpectedSet::NOTHING`]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The members, in the order they were listed
    pub fn iter(&self) -> impl Iterator<Item = Expected> + '_ {
        self.0.iter().copied()
    }
}

impl Display for ExpectedSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let last = self.0.len().saturating_sub(1);
        for (idx, token) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str(if idx == last { " or " } else { ", " })?;
            }
            Display::fmt(token, f)?;
        }
        Ok(())
    }
}

/// What went wrong in a [`ParseError`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The first byte of a value matches no value start token.
    #[error("unexpected leading byte '{}'", .found.escape_ascii())]
    UnexpectedLeadingByte {
        /// The offending byte
        found: u8,
    },

    /// A byte string length prefix contains something other than digits before its `:`.
    #[error("malformed string length, found '{}'", .found.escape_ascii())]
    MalformedLength {
        /// The offending byte
        found: u8,
    },

    /// A byte string length prefix does not fit into memory.
    #[error("string length overflows")]
    LengthOverflow,

    /// An integer is empty or contains a byte that is not a digit.
    #[error("malformed integer, found '{}'", .found.escape_ascii())]
    MalformedInteger {
        /// The offending byte
        found: u8,
    },

    /// Input ended in the middle of a value.
    #[error("reached end of input in the middle of a value")]
    UnexpectedEof,

    /// A dictionary key is something other than a byte string.
    #[error("dictionary keys must be byte strings")]
    KeyNotByteString,

    /// Containers are nested deeper than the configured limit.
    #[error("maximum nesting depth of {max_depth} exceeded")]
    NestingTooDeep {
        /// The limit that was in effect
        max_depth: usize,
    },
}

/// A scan failure, located at a byte offset of the scanned input.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
#[error("{kind} at offset {offset} of {format} input{}", describe_expected(.expected))]
pub struct ParseError {
    /// The format that was being read.
    pub format: Format,
    /// Offset of the offending byte, or the input length for truncated input.
    pub offset: usize,
    /// What went wrong
    pub kind: ParseErrorKind,
    /// What would have been accepted at `offset`.
    pub expected: ExpectedSet,
}

fn describe_expected(expected: &ExpectedSet) -> String {
    if expected.is_empty() {
        String::new()
    } else {
        format!(" (expected {expected})")
    }
}

/// A rendered text string whose closing quote the text scanner would misplace.
///
/// Byte strings are written to text without escaping, so a string containing a
/// quote followed by `:`, `,`, `]` or `}` can look closed too early, and a string
/// followed by binary data can look never closed. Encoding such text does not
/// reproduce the original bencode.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("string at {path} is not recoverable from text, quote at offset {offset} is misread")]
pub struct AmbiguousTerminator {
    /// Offset of the misread quote in the rendered text.
    pub offset: usize,
    /// Location of the string in the value tree.
    pub path: Path,
}

/// An error returned by [`decode`][crate::decode] or [`encode`][crate::encode].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input is not well formed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The output would not transcode back to the input.
    #[error(transparent)]
    AmbiguousTerminator(#[from] AmbiguousTerminator),
}

impl Error {
    /// The offset this error points at. For parse errors this is an offset into the
    /// input, for ambiguous terminators one into the rendered text.
    pub fn offset(&self) -> usize {
        match self {
            Error::Parse(err) => err.offset,
            Error::AmbiguousTerminator(err) => err.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_sync_send() {
        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}
        is_send::<Error>();
        is_sync::<Error>();
    }

    #[test]
    fn parse_error_lists_expected_tokens() {
        let err = ParseError {
            format: Format::Bencode,
            offset: 3,
            kind: ParseErrorKind::MalformedLength { found: b'x' },
            expected: ExpectedSet::new(&[Expected::Digit, Expected::Byte(b':')]),
        };
        assert_eq!(
            "malformed string length, found 'x' at offset 3 of bencode input \
             (expected '0'..'9' or ':')",
            err.to_string()
        );
    }

    #[test]
    fn parse_error_without_expectations() {
        let err = ParseError {
            format: Format::Text,
            offset: 0,
            kind: ParseErrorKind::NestingTooDeep { max_depth: 2 },
            expected: ExpectedSet::NOTHING,
        };
        assert_eq!(
            "maximum nesting depth of 2 exceeded at offset 0 of text input",
            err.to_string()
        );
    }

    #[test]
    fn non_printable_bytes_are_escaped() {
        let kind = ParseErrorKind::UnexpectedLeadingByte { found: 0 };
        assert_eq!("unexpected leading byte '\\x00'", kind.to_string());
    }
}
