/// Bytes that may follow a closing quote.
const STRUCTURAL: [u8; 4] = [b':', b',', b']', b'}'];

/// How many bytes after the structural byte have to be printable.
const LOOKAHEAD: usize = 4;

/// `0x20..=0x7E`
pub fn is_printable(b: u8) -> bool {
    (0x20..=0x7e).contains(&b)
}

/// Decide whether the quote at `index` of `text` closes the string it is in.
///
/// True if the quote is the last byte of `text`, or if it is followed by one of
/// `:`, `,`, `]` or `}` and every byte of the next four after that, as far as
/// they exist, is printable.
pub fn is_closing_quote(text: &[u8], index: usize) -> bool {
    debug_assert_eq!(Some(&b'"'), text.get(index));

    if index + 1 == text.len() {
        return true;
    }

    match text.get(index + 1) {
        Some(next) if STRUCTURAL.contains(next) => text
            .iter()
            .skip(index + 2)
            .take(LOOKAHEAD)
            .all(|&b| is_printable(b)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_byte_closes() {
        assert!(is_closing_quote(b"\"abc\"", 4));
        assert!(is_closing_quote(b"\"", 0));
    }

    #[test]
    fn structural_byte_with_printable_tail_closes() {
        assert!(is_closing_quote(b"\"a\":\"bcde\"", 2));
        assert!(is_closing_quote(b"[\"a\",1]", 3));
        assert!(is_closing_quote(b"{\"a\":1}", 3));
        // Running out of input counts as printable
        assert!(is_closing_quote(b"[\"a\"]", 3));
        assert!(is_closing_quote(b"[\"a\"]}", 3));
    }

    #[test]
    fn other_followers_do_not_close() {
        assert!(!is_closing_quote(b"\"a\"b\"", 2));
        assert!(!is_closing_quote(b"\"a\" \"", 2));
        assert!(!is_closing_quote(b"\"a\"\"", 2));
    }

    #[test]
    fn binary_lookahead_does_not_close() {
        assert!(!is_closing_quote(b"\"a\",\"\x01bc\"", 2));
        assert!(!is_closing_quote(b"\"a\",\"bc\xff\"", 2));
        // Only four bytes are examined
        assert!(is_closing_quote(b"\"a\",\"bcd\xff\"", 2));
    }

    #[test]
    fn printable_range() {
        assert!(is_printable(b' '));
        assert!(is_printable(b'~'));
        assert!(!is_printable(0x1f));
        assert!(!is_printable(0x7f));
        assert!(!is_printable(b'\n'));
    }
}
