use bstr::ByteSlice;
use std::borrow::Cow;

/// A cursor over the bytes of a CXSMILES suffix.
///
/// Nothing here knows about layers. Every method either advances the cursor or leaves it where it
/// was, so a caller can save [`pos`](Self::pos) and [`rewind`](Self::rewind) to it later.
#[derive(Debug, Clone)]
pub struct CharIter<'a> {
    input: &'a [u8],
    pos: usize,
}
impl<'a> CharIter<'a> {
    pub fn new<I: AsRef<[u8]> + ?Sized>(input: &'a I) -> Self {
        Self {
            input: input.as_ref(),
            pos: 0,
        }
    }

    /// Current byte offset.
    pub fn pos(&self) -> usize {
        self.pos
    }
    /// Move the cursor back to a previously saved position.
    pub fn rewind(&mut self, pos: usize) {
        debug_assert!(pos <= self.input.len());
        self.pos = pos.min(self.input.len());
    }
    /// Advance by `n` bytes, saturating at the end.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.input.len()
    }
    pub fn curr(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos + 1).copied()
    }
    /// Everything from the cursor on.
    pub fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    pub fn next_if(&mut self, c: u8) -> bool {
        if self.curr() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }
    /// Consume `s` only if the input continues with all of it.
    pub fn next_if_str(&mut self, s: &[u8]) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }
    /// Consume a decimal digit and return its value.
    pub fn next_digit(&mut self) -> Option<u8> {
        let c = self.curr().filter(u8::is_ascii_digit)?;
        self.pos += 1;
        Some(c - b'0')
    }
    pub fn next_if_digit(&mut self) -> bool {
        self.next_digit().is_some()
    }

    /// Half-open slice of the input. Invalid UTF-8 is replaced rather than rejected.
    pub fn substr(&self, beg: usize, end: usize) -> Cow<'a, str> {
        self.input[beg..end].to_str_lossy()
    }
}
impl Iterator for CharIter<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let c = self.curr()?;
        self.pos += 1;
        Some(c)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.input.len() - self.pos;
        (len, Some(len))
    }
}
