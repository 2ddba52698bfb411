use crate::value::{DictEntry, Value};

/// The actual encoder. Unlike the decoder, this is not zero-copy; the output is
/// collected in a growable buffer.
#[derive(Default, Debug)]
pub struct Encoder {
    output: Vec<u8>,
}

impl Encoder {
    /// Create a new encoder
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Emit a value and everything it contains
    pub fn emit(&mut self, value: &Value<'_>) {
        match value {
            Value::Integer(digits) => self.emit_int(digits),
            Value::Bytes(bytes) => self.emit_bytes(bytes),
            Value::List(items) => {
                self.output.push(b'l');
                for item in items {
                    self.emit(item);
                }
                self.output.push(b'e');
            },
            Value::Dict(entries) => {
                self.output.push(b'd');
                for DictEntry { key, value } in entries {
                    self.emit_bytes(key);
                    self.emit(value);
                }
                self.output.push(b'e');
            },
        }
    }

    /// Emit an integer given as its digits
    pub fn emit_int(&mut self, digits: &str) {
        // Alas, this doesn't verify that the given number is valid
        self.output.push(b'i');
        self.output.extend_from_slice(digits.as_bytes());
        self.output.push(b'e');
    }

    /// Emit a byte string with its length prefix
    pub fn emit_bytes(&mut self, bytes: &[u8]) {
        self.output
            .extend_from_slice(bytes.len().to_string().as_bytes());
        self.output.push(b':');
        self.output.extend_from_slice(bytes);
    }

    /// The bencode emitted so far
    pub fn get_output(&self) -> &[u8] {
        &self.output
    }

    /// Consume the encoder and return its output
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}
