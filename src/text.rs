//! The JSON-like text form
//!
//! Integers are written as bare digits, byte strings between double quotes,
//! lists as `[a,b]` and dictionaries as `{"key":value}`:
//!
//! ```
//! # use bentext::Value;
//! #
//! let value = Value::from_bencode(b"d3:cowl3:mooi-2ee4:spam4:eggse").unwrap();
//! assert_eq!(b"{\"cow\":[\"moo\",-2],\"spam\":\"eggs\"}", value.to_text().as_slice());
//! ```
//!
//! # String boundaries
//!
//! String content is written raw, without any escaping, so a text editor shows
//! the bytes as they are. The price is that a quote inside a string looks just
//! like the closing one. When reading text, a quote closes its string only if
//!
//! * it is the last byte of the input, or
//! * it is followed by `:`, `,`, `]` or `}`, and the (up to) four bytes after that
//!   are printable ASCII.
//!
//! Strings for which this guess goes wrong are found by [`check`] and reported as
//! [`AmbiguousTerminator`][crate::error::AmbiguousTerminator].

mod parser;
mod renderer;
mod terminator;

pub use self::{
    parser::TextParser,
    terminator::{is_closing_quote, is_printable},
};
pub(crate) use self::renderer::TextRenderer;

use crate::{error::AmbiguousTerminator, value::Value};

/// Check that the text form of `value` parses back to `value`.
pub fn check(value: &Value<'_>) -> Result<(), AmbiguousTerminator> {
    match TextRenderer::render(value).find_ambiguity() {
        Some(ambiguity) => Err(ambiguity),
        None => Ok(()),
    }
}

/// Write `value` as text along with the first string that would not parse back,
/// if any.
///
/// ```
/// # use bentext::{text, Value};
/// #
/// let value = Value::from_bencode(b"l5:a\",\"be").unwrap();
/// let (text, ambiguity) = text::render_checked(&value);
/// assert_eq!(br#"["a","b"]"#, text.as_slice());
/// assert_eq!("root[0]", ambiguity.unwrap().path.to_string());
/// ```
pub fn render_checked(value: &Value<'_>) -> (Vec<u8>, Option<AmbiguousTerminator>) {
    let renderer = TextRenderer::render(value);
    let ambiguity = renderer.find_ambiguity();
    (renderer.into_output(), ambiguity)
}
