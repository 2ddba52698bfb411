//! `Value`s hold one borrowed or owned document, in the shape both formats share.
//!
//! Unlike a typical bencode value, integers stay unparsed digit strings and
//! dictionaries keep their entries in input order, duplicates included, so a
//! document survives a trip through `Value` byte for byte.

use std::{
    borrow::Cow,
    fmt::{self, Display, Formatter, Write},
};

use crate::{
    decoding::Decoder,
    encoding::Encoder,
    error::ParseError,
    text::{TextParser, TextRenderer},
};

/// An owned or borrowed document.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Value<'a> {
    /// An integer, as its digits with an optional leading `-`.
    /// Never parsed, so there is no range limit.
    Integer(Cow<'a, str>),
    /// A byte string; may not be UTF-8
    Bytes(Cow<'a, [u8]>),
    /// A list of values
    List(Vec<Value<'a>>),
    /// Key value pairs in the order they were read
    Dict(Vec<DictEntry<'a>>),
}

/// One key value pair of a [`Value::Dict`].
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct DictEntry<'a> {
    /// Always a byte string
    pub key: Cow<'a, [u8]>,
    /// Any value
    pub value: Value<'a>,
}

impl<'a> DictEntry<'a> {
    /// Pair up a key and a value
    pub fn new(key: impl Into<Cow<'a, [u8]>>, value: Value<'a>) -> Self {
        DictEntry {
            key: key.into(),
            value,
        }
    }

    /// Convert this entry into one with static lifetime
    pub fn into_owned(self) -> DictEntry<'static> {
        DictEntry {
            key: Cow::Owned(self.key.into_owned()),
            value: self.value.into_owned(),
        }
    }
}

impl<'a> Value<'a> {
    /// Construct a new [`Value::Integer`]
    pub fn integer(value: i64) -> Value<'static> {
        Value::Integer(Cow::Owned(value.to_string()))
    }

    /// Construct a new [`Value::Bytes`]
    pub fn bytes(content: impl Into<Cow<'a, [u8]>>) -> Self {
        Value::Bytes(content.into())
    }

    /// Construct a new, empty [`Value::List`]
    pub fn list() -> Self {
        Value::List(Vec::new())
    }

    /// Construct a new, empty [`Value::Dict`]
    pub fn dict() -> Self {
        Value::Dict(Vec::new())
    }

    /// Decode the first value of a bencoded buffer. Anything after it is ignored.
    pub fn from_bencode(buf: &'a [u8]) -> Result<Self, ParseError> {
        Decoder::new(buf).decode_value()
    }

    /// Parse the first value of a buffer in text form. Anything after it is ignored.
    pub fn from_text(buf: &'a [u8]) -> Result<Self, ParseError> {
        TextParser::new(buf).parse_value()
    }

    /// Get the bencode representation of this value.
    pub fn to_bencode(&self) -> Vec<u8> {
        let mut encoder = Encoder::new();
        encoder.emit(self);
        encoder.into_output()
    }

    /// Get the text form of this value.
    ///
    /// Strings are written without escaping. Use
    /// [`Transcoder::render_text`][crate::Transcoder::render_text] to find out
    /// whether the result parses back to the same value.
    pub fn to_text(&self) -> Vec<u8> {
        TextRenderer::render_plain(self)
    }

    /// Convert this Value into an owned Value with static lifetime
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Integer(digits) => Value::Integer(Cow::Owned(digits.into_owned())),
            Value::Bytes(bytes) => Value::Bytes(Cow::Owned(bytes.into_owned())),
            Value::List(items) => Value::List(items.into_iter().map(Value::into_owned).collect()),
            Value::Dict(entries) => {
                Value::Dict(entries.into_iter().map(DictEntry::into_owned).collect())
            },
        }
    }

    /// The digits of an integer, including a leading `-`
    pub fn as_integer(&self) -> Option<&str> {
        match self {
            Value::Integer(digits) => Some(digits.as_ref()),
            _ => None,
        }
    }

    /// The integer as an `i64`, if it is one and fits.
    pub fn as_i64(&self) -> Option<i64> {
        self.as_integer()?.parse().ok()
    }

    /// The content of a byte string
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes.as_ref()),
            _ => None,
        }
    }

    /// The items of a list
    pub fn as_list(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// The entries of a dictionary, in input order
    pub fn as_dict(&self) -> Option<&[DictEntry<'a>]> {
        match self {
            Value::Dict(entries) => Some(entries.as_slice()),
            _ => None,
        }
    }

    /// Value of the first dictionary entry with the given key.
    pub fn get(&self, key: &[u8]) -> Option<&Value<'a>> {
        self.as_dict()?
            .iter()
            .find(|entry| &*entry.key == key)
            .map(|entry| &entry.value)
    }
}

/// Writes the text form, with every byte that is not printable ASCII, as well as
/// `"` and `\`, written as `\xNN`. Meant for logs; the result is not parseable.
impl Display for Value<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(digits) => f.write_str(digits),
            Value::Bytes(bytes) => display_bytes(bytes, f),
            Value::List(items) => {
                f.write_char('[')?;
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        f.write_char(',')?;
                    }
                    Display::fmt(item, f)?;
                }
                f.write_char(']')
            },
            Value::Dict(entries) => {
                f.write_char('{')?;
                for (idx, DictEntry { key, value }) in entries.iter().enumerate() {
                    if idx > 0 {
                        f.write_char(',')?;
                    }
                    display_bytes(key, f)?;
                    f.write_char(':')?;
                    Display::fmt(value, f)?;
                }
                f.write_char('}')
            },
        }
    }
}

fn display_bytes(bytes: &[u8], f: &mut Formatter<'_>) -> fmt::Result {
    f.write_char('"')?;
    for &b in bytes {
        if (0x20..=0x7e).contains(&b) && b != b'"' && b != b'\\' {
            f.write_char(char::from(b))?;
        } else {
            write!(f, "\\x{b:02X}")?;
        }
    }
    f.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_test() {
        let doc = Value::from_bencode(b"d3:cowi-3e4:spaml4:eggsee").unwrap();
        assert_eq!(Some(-3), doc.get(b"cow").and_then(Value::as_i64));
        let spam = doc.get(b"spam").and_then(Value::as_list).unwrap();
        assert_eq!(Some(&b"eggs"[..]), spam[0].as_bytes());
        assert_eq!(None, doc.get(b"dog"));
        assert_eq!(None, doc.as_list());
    }

    #[test]
    fn get_returns_first_duplicate() {
        let doc = Value::from_bencode(b"d1:ai1e1:ai2ee").unwrap();
        assert_eq!(2, doc.as_dict().unwrap().len());
        assert_eq!(Some("1"), doc.get(b"a").and_then(Value::as_integer));
    }

    #[test]
    fn big_integers_stay_digits() {
        let doc = Value::from_bencode(b"i123456789012345678901234567890e").unwrap();
        assert_eq!(Some("123456789012345678901234567890"), doc.as_integer());
        assert_eq!(None, doc.as_i64());
    }

    #[test]
    fn built_values_emit_both_forms() {
        let doc = Value::List(vec![
            Value::integer(7),
            Value::bytes(&b"seven"[..]),
            Value::Dict(vec![DictEntry::new(&b"k"[..], Value::list())]),
        ]);
        assert_eq!(b"li7e5:sevend1:kleee".as_slice(), doc.to_bencode().as_slice());
        assert_eq!(b"[7,\"seven\",{\"k\":[]}]".as_slice(), doc.to_text().as_slice());
    }

    #[test]
    fn into_owned_keeps_content() {
        let buf = b"d1:ali1eee".to_vec();
        let owned = Value::from_bencode(&buf).unwrap().into_owned();
        drop(buf);
        assert_eq!(b"d1:ali1eee".as_slice(), owned.to_bencode().as_slice());
    }

    #[test]
    fn display_escapes_unprintable_bytes() {
        let doc = Value::from_bencode(b"d1:\"l1:\x00i5eee").unwrap();
        assert_eq!("{\"\\x22\":[\"\\x00\",5]}", doc.to_string());
    }
}
