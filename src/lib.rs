//! Transcodes bencoded structures to an editable, JSON-like text form and back.
//!
//! ```
//! let text = bentext::decode(b"d4:spaml1:a1:be3:eggi7ee").unwrap();
//! assert_eq!(br#"{"spam":["a","b"],"egg":7}"#.as_slice(), text);
//!
//! let bencode = bentext::encode(&text).unwrap();
//! assert_eq!(b"d4:spaml1:a1:be3:eggi7ee".as_slice(), bencode);
//! ```
//!
//! Both directions read exactly one value and ignore whatever follows it. Neither
//! checks canonical form: integers keep their digits as written, and dictionary
//! entries keep their order, so any well formed bencode survives the round trip
//! unless one of its strings hides its own end. See [`text`] for how strings
//! are delimited and [`Transcoder`] for what happens when that goes wrong.
//!
//! To work with a document instead of its encodings, see [`Value`].
#![cfg_attr(not(test), deny(missing_docs))]

pub mod decoding;
pub mod encoding;
pub mod error;
pub mod path;
mod state_tracker;
pub mod text;
mod transcoder;
mod value;

pub use crate::{
    error::Error,
    state_tracker::DEFAULT_MAX_DEPTH,
    transcoder::{decode, encode, Ambiguity, Transcoder},
    value::{DictEntry, Value},
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
