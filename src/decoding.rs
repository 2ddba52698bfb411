//! Reads bencode into a [`Value`][crate::Value]
//!
//! ```
//! # use bentext::decoding::Decoder;
//! #
//! let mut decoder = Decoder::new(b"l4:spami42ee").with_max_depth(3);
//! let value = decoder.decode_value().unwrap();
//! assert_eq!(Some("42"), value.as_list().unwrap()[1].as_integer());
//! ```
//!
//! Decoders have a depth limit to prevent stack exhaustion from hostile inputs.
//! Atoms (integers and strings) have depth zero, and lists and dicts have a depth
//! equal to the depth of their deepest member plus one.
//!
//! The decoder is lenient about canonical form: dictionary keys may come in any
//! order and may repeat, and integers and lengths may carry leading zeros. It is
//! strict about structure: every malformed or truncated value is reported with
//! the offset it was found at.

mod decoder;

pub use self::decoder::Decoder;
