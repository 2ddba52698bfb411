use tracing::{debug, trace, warn};

use crate::{
    decoding::Decoder,
    error::{Error, Format},
    state_tracker::DEFAULT_MAX_DEPTH,
    text::{self, TextParser, TextRenderer},
    value::Value,
};

/// What to do with text whose string boundaries would be misread when it is
/// encoded again. See [`AmbiguousTerminator`][crate::error::AmbiguousTerminator].
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Ambiguity {
    /// Return the text without further notice.
    Allow,
    /// Return the text and log a warning through `tracing`.
    #[default]
    Warn,
    /// Fail with [`Error::AmbiguousTerminator`].
    Deny,
}

/// Transcodes between bencode and the text form.
///
/// ```
/// # use bentext::{Ambiguity, Transcoder};
/// #
/// let transcoder = Transcoder::new()
///     .with_max_depth(16)
///     .with_ambiguity(Ambiguity::Deny);
///
/// let text = transcoder.decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
/// assert_eq!(br#"{"cow":"moo","spam":"eggs"}"#, text.as_slice());
/// assert_eq!(b"d3:cow3:moo4:spam4:eggse", transcoder.encode(&text).unwrap().as_slice());
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Transcoder {
    max_depth: usize,
    ambiguity: Ambiguity,
}

impl Default for Transcoder {
    fn default() -> Self {
        Transcoder {
            max_depth: DEFAULT_MAX_DEPTH,
            ambiguity: Ambiguity::default(),
        }
    }
}

impl Transcoder {
    /// A transcoder with the default depth limit that warns about ambiguity
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Set the maximum nesting depth of both directions.
    ///
    /// Scanning is recursive, so every level costs stack space. The default
    /// of 2048 fits into the stack of a main thread, but not necessarily into
    /// that of a spawned one.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set how to treat ambiguous strings when decoding.
    #[must_use]
    pub fn with_ambiguity(mut self, ambiguity: Ambiguity) -> Self {
        self.ambiguity = ambiguity;
        self
    }

    /// The configured nesting limit
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The configured ambiguity policy
    pub fn ambiguity(&self) -> Ambiguity {
        self.ambiguity
    }

    /// Turn the first bencoded value in `input` into text.
    pub fn decode(&self, input: &[u8]) -> Result<Vec<u8>, Error> {
        trace!(len = input.len(), "decode");
        let mut decoder = Decoder::new(input).with_max_depth(self.max_depth);
        let value = decoder.decode_value()?;
        note_trailing(Format::Bencode, decoder.offset(), input.len());
        self.render_text(&value)
    }

    /// Turn the first value in text form in `input` into bencode.
    pub fn encode(&self, input: &[u8]) -> Result<Vec<u8>, Error> {
        trace!(len = input.len(), "encode");
        let mut parser = TextParser::new(input).with_max_depth(self.max_depth);
        let value = parser.parse_value()?;
        note_trailing(Format::Text, parser.offset(), input.len());
        Ok(value.to_bencode())
    }

    /// Write `value` as text, applying the configured [`Ambiguity`] policy.
    pub fn render_text(&self, value: &Value<'_>) -> Result<Vec<u8>, Error> {
        if self.ambiguity == Ambiguity::Allow {
            return Ok(TextRenderer::render_plain(value));
        }
        let (output, ambiguity) = text::render_checked(value);
        if let Some(ambiguity) = ambiguity {
            if self.ambiguity == Ambiguity::Deny {
                return Err(ambiguity.into());
            }
            warn!(
                offset = ambiguity.offset,
                path = %ambiguity.path,
                "text will not encode back to the same bencode",
            );
        }
        Ok(output)
    }

    /// Check that the text form of `value` encodes back to `value`, regardless
    /// of the configured policy.
    pub fn check_text(&self, value: &Value<'_>) -> Result<(), Error> {
        text::check(value).map_err(Error::from)
    }
}

fn note_trailing(format: Format, consumed: usize, len: usize) {
    if consumed < len {
        debug!(%format, consumed, ignored = len - consumed, "ignoring input after first value");
    }
}

/// Turn the first bencoded value in `input` into text, using the default
/// [`Transcoder`].
///
/// ```
/// assert_eq!(b"[\"spam\",\"eggs\"]", bentext::decode(b"l4:spam4:eggse").unwrap().as_slice());
/// ```
pub fn decode(input: &[u8]) -> Result<Vec<u8>, Error> {
    Transcoder::new().decode(input)
}

/// Turn the first value in text form in `input` into bencode, using the default
/// [`Transcoder`].
///
/// ```
/// assert_eq!(b"l4:spam4:eggse", bentext::encode(b"[\"spam\",\"eggs\"]").unwrap().as_slice());
/// ```
pub fn encode(input: &[u8]) -> Result<Vec<u8>, Error> {
    Transcoder::new().encode(input)
}
