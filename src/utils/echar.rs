//! Display helpers for bytes and positions in error messages.
//!
//! Input is handled as bytes, so a bad byte may be half of a UTF-8 character or a control code.
//! These print it in a form that's safe to put in a message.

use std::fmt::{self, Display, Formatter};

/// A wrapper around a byte that prints escape codes.
///
/// Printable ASCII is written as is, `\n`, `\r` and `\t` as their escapes, anything else as a
/// `\x` hex code. The output is wrapped in single quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextByte(pub u8);
impl Display for TextByte {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            c @ 32..=126 => write!(f, "'{}'", c as char),
            b'\n' => f.write_str("'\\n'"),
            b'\r' => f.write_str("'\\r'"),
            b'\t' => f.write_str("'\\t'"),
            _ => write!(f, "'\\x{:0>2x}'", self.0),
        }
    }
}

/// Prints an optional byte, or "EOF" if there isn't one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaybeByte(pub Option<u8>);
impl Display for MaybeByte {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(b) => Display::fmt(&TextByte(b), f),
            None => f.write_str("EOF"),
        }
    }
}

/// Simple intermediate for index printer that doesn't allocate.
///
/// If it holds `usize::MAX`, prints "unknown index", else "byte {n}"
pub struct IdxPrint(pub usize);
impl Display for IdxPrint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0 == usize::MAX {
            f.write_str("unknown index")
        } else {
            write!(f, "byte {}", self.0)
        }
    }
}
