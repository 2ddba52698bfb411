/// A read position inside an input buffer.
///
/// Every scan step starts at [`Cursor::offset`] and leaves the cursor on the first
/// byte after the value it consumed.
#[derive(Debug, Clone)]
pub struct Cursor<'ser> {
    source: &'ser [u8],
    offset: usize,
}

impl<'ser> Cursor<'ser> {
    pub fn new(source: &'ser [u8]) -> Self {
        Cursor { source, offset: 0 }
    }

    pub fn source(&self) -> &'ser [u8] {
        self.source
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// The byte under the cursor.
    pub fn peek(&self) -> Option<u8> {
        self.source.get(self.offset).copied()
    }

    /// The byte right before the cursor.
    pub fn previous(&self) -> Option<u8> {
        self.offset
            .checked_sub(1)
            .and_then(|idx| self.source.get(idx).copied())
    }

    /// Everything from the cursor to the end of input.
    pub fn remaining(&self) -> &'ser [u8] {
        &self.source[self.offset.min(self.source.len())..]
    }

    pub fn advance(&mut self, count: usize) {
        self.offset = self.offset.saturating_add(count).min(self.source.len());
    }

    pub fn take_chunk(&mut self, count: usize) -> Option<&'ser [u8]> {
        match self.offset.checked_add(count) {
            Some(end_pos) if end_pos <= self.source.len() => {
                let ret = &self.source[self.offset..end_pos];
                self.offset = end_pos;
                Some(ret)
            },
            _ => None,
        }
    }

    /// The bytes between `start` and the cursor.
    pub fn since(&self, start: usize) -> &'ser [u8] {
        &self.source[start..self.offset]
    }
}
