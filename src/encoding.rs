//! Writes a [`Value`][crate::Value] as bencode
//!
//! ```
//! # use bentext::{encoding::Encoder, Value};
//! #
//! let mut encoder = Encoder::new();
//! encoder.emit(&Value::from_text(b"{\"spam\":[1,2]}").unwrap());
//! assert_eq!(b"d4:spamli1ei2eee", encoder.get_output());
//! ```
//!
//! The encoder writes dictionaries in the order of their entries and does not
//! check integers for being well formed; a [`Value`][crate::Value] produced by
//! one of the scanners always is.

mod encoder;

pub use self::encoder::Encoder;
