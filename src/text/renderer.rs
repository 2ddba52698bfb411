use crate::{
    error::AmbiguousTerminator,
    path::{Path, Step},
    text::is_closing_quote,
    value::{DictEntry, Value},
};

/// Where one string landed in the rendered text.
#[derive(Debug, Clone, Copy)]
struct StringSpan {
    /// Offset of the opening quote
    open: usize,
    /// Offset of the closing quote
    close: usize,
}

/// Writes a [`Value`] in text form, remembering where every string went.
///
/// Spans are two offsets per string. The [`Path`] of a string is only worked
/// out for the one [`TextRenderer::find_ambiguity`] reports.
#[derive(Debug)]
pub struct TextRenderer<'obj, 'ser> {
    value: &'obj Value<'ser>,
    output: Vec<u8>,
    spans: Option<Vec<StringSpan>>,
}

impl<'obj, 'ser> TextRenderer<'obj, 'ser> {
    /// Render `value`, recording string spans for [`TextRenderer::find_ambiguity`].
    pub fn render(value: &'obj Value<'ser>) -> Self {
        let mut renderer = TextRenderer {
            value,
            output: Vec::new(),
            spans: Some(Vec::new()),
        };
        renderer.emit(value);
        renderer
    }

    /// Render `value` without recording anything but the text.
    pub fn render_plain(value: &'obj Value<'ser>) -> Vec<u8> {
        let mut renderer = TextRenderer {
            value,
            output: Vec::new(),
            spans: None,
        };
        renderer.emit(value);
        renderer.output
    }

    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    /// Find the first string whose boundaries the text parser would get wrong.
    ///
    /// Strings are checked in output order; once a string is misread everything
    /// after it is read differently, so only the first one is meaningful.
    pub fn find_ambiguity(&self) -> Option<AmbiguousTerminator> {
        let spans = self.spans.as_deref()?;
        let (nth, offset) = spans.iter().enumerate().find_map(|(nth, span)| {
            let misread = (span.open + 1..span.close)
                .filter(|&idx| self.output[idx] == b'"')
                .find(|&idx| is_closing_quote(&self.output, idx))
                .or_else(|| (!is_closing_quote(&self.output, span.close)).then_some(span.close))?;
            Some((nth, misread))
        })?;

        let mut path = Path::new();
        let mut remaining = nth;
        let found = locate_string(self.value, &mut remaining, &mut path);
        debug_assert!(found, "every span belongs to a string of the rendered value");

        Some(AmbiguousTerminator { offset, path })
    }

    fn emit(&mut self, value: &Value<'_>) {
        match value {
            Value::Integer(digits) => self.output.extend_from_slice(digits.as_bytes()),
            Value::Bytes(bytes) => self.emit_string(bytes),
            Value::List(items) => {
                self.output.push(b'[');
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        self.output.push(b',');
                    }
                    self.emit(item);
                }
                self.output.push(b']');
            },
            Value::Dict(entries) => {
                self.output.push(b'{');
                for (idx, DictEntry { key, value }) in entries.iter().enumerate() {
                    if idx > 0 {
                        self.output.push(b',');
                    }
                    self.emit_string(key);
                    self.output.push(b':');
                    self.emit(value);
                }
                self.output.push(b'}');
            },
        }
    }

    fn emit_string(&mut self, bytes: &[u8]) {
        let open = self.output.len();
        self.output.push(b'"');
        self.output.extend_from_slice(bytes);
        self.output.push(b'"');
        if let Some(spans) = &mut self.spans {
            spans.push(StringSpan {
                open,
                close: self.output.len() - 1,
            });
        }
    }
}

/// Walk `value` in output order to the string numbered `remaining`, leaving its
/// location in `path`. Returns false, with `path` unchanged, if there are fewer
/// strings than that; `remaining` is then reduced by the strings seen.
fn locate_string(value: &Value<'_>, remaining: &mut usize, path: &mut Path) -> bool {
    match value {
        Value::Integer(_) => false,
        Value::Bytes(_) => take_string(remaining),
        Value::List(items) => items.iter().enumerate().any(|(idx, item)| {
            path.push(Step::Nth(idx));
            let found = locate_string(item, remaining, path);
            if !found {
                path.pop();
            }
            found
        }),
        Value::Dict(entries) => entries.iter().enumerate().any(|(idx, entry)| {
            path.push(Step::Nth(idx));
            if take_string(remaining) {
                path.push(Step::Key);
                return true;
            }
            path.push(Step::Value);
            let found = locate_string(&entry.value, remaining, path);
            if !found {
                path.pop();
                path.pop();
            }
            found
        }),
    }
}

fn take_string(remaining: &mut usize) -> bool {
    match remaining.checked_sub(1) {
        Some(rest) => {
            *remaining = rest;
            false
        },
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoding::Decoder;

    fn check(bencode: &[u8]) -> Option<AmbiguousTerminator> {
        let value = Value::from_bencode(bencode).unwrap();
        TextRenderer::render(&value).find_ambiguity()
    }

    #[test]
    fn renders_every_kind() {
        let value = Value::from_bencode(b"d3:cowi-3e4:spaml4:eggs0:deee").unwrap();
        let expected = b"{\"cow\":-3,\"spam\":[\"eggs\",\"\",{}]}".as_slice();
        assert_eq!(expected, TextRenderer::render(&value).into_output());
        assert_eq!(expected, TextRenderer::render_plain(&value));
    }

    #[test]
    fn plain_strings_are_unambiguous() {
        assert_eq!(None, check(b"l4:spam4:eggse"));
        assert_eq!(None, check(b"d1:a1:be"));
        // Quotes without structure behind them are fine
        assert_eq!(None, check(b"l5:a\"b\"ce"));
    }

    #[test]
    fn interior_quote_before_delimiter_is_ambiguous() {
        // ["a","b"]: the quote after `a` looks closing
        let ambiguity = check(b"l5:a\",\"be").unwrap();
        assert_eq!(3, ambiguity.offset);
        assert_eq!([Step::Nth(0)].as_slice(), ambiguity.path.steps());
    }

    #[test]
    fn binary_after_closing_quote_is_ambiguous() {
        // ["a","\x00"]: the real closing quote after `a` is not recognised
        let ambiguity = check(b"l1:a1:\x00e").unwrap();
        assert_eq!(3, ambiguity.offset);
        assert_eq!("root[0]", ambiguity.path.to_string());
    }

    #[test]
    fn dict_paths_name_key_or_value() {
        let ambiguity = check(b"d1:ad3:x\"}1:bee").unwrap();
        assert_eq!("root[0].value[0].key", ambiguity.path.to_string());

        let ambiguity = check(b"d1:ai1e1:bl0:2:\"]ee").unwrap();
        assert_eq!("root[1].value[1]", ambiguity.path.to_string());
    }

    #[test]
    fn later_strings_are_located_past_earlier_ones() {
        let ambiguity = check(b"ll1:a1:bel1:c3:x\",ee").unwrap();
        assert_eq!("root[1][1]", ambiguity.path.to_string());
        let value = Value::from_bencode(b"ll1:a1:bel1:c3:x\",ee").unwrap();
        assert_eq!(Some(&b"x\","[..]), value.find(&ambiguity.path).and_then(Value::as_bytes));
    }

    #[test]
    fn spans_are_offsets_only() {
        let depth = 500;
        let strings = 2000;
        let mut bencode = b"l".repeat(depth);
        bencode.extend(b"0:".repeat(strings));
        bencode.extend(b"e".repeat(depth));

        let value = Decoder::new(&bencode).with_max_depth(depth).decode_value().unwrap();
        let renderer = TextRenderer::render(&value);
        assert_eq!(Some(strings), renderer.spans.as_ref().map(Vec::len));
        assert_eq!(2 * std::mem::size_of::<usize>(), std::mem::size_of::<StringSpan>());
        assert_eq!(None, renderer.find_ambiguity());
    }
}
