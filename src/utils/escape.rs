//! Numeric character references (`&#NNN;`) used for free text in CXSMILES layers.

use atoi::FromRadix10Checked;
use std::borrow::Cow;
use std::fmt::Write;

/// Resolve every well-formed `&#<decimal>;` reference in `text`.
///
/// A malformed reference, or one that doesn't name a valid `char`, is left as it was written.
pub fn unescape(text: &str) -> Cow<'_, str> {
    if !text.contains("&#") {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("&#") {
        out.push_str(&rest[..start]);
        let tail = &rest[(start + 2)..];
        let (code, used) = u32::from_radix_10_checked(tail.as_bytes());
        let decoded = if used > 0 && tail.as_bytes().get(used) == Some(&b';') {
            code.and_then(char::from_u32)
        } else {
            None
        };
        if let Some(c) = decoded {
            out.push(c);
            rest = &tail[(used + 1)..];
        } else {
            out.push('&');
            rest = &rest[(start + 1)..];
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Whether a character can't be written literally inside a label or Sgroup field.
fn needs_escape(c: char) -> bool {
    matches!(c, '&' | '$' | ';' | '|' | ',' | ':') || c.is_control() || !c.is_ascii()
}

/// Inverse of [`unescape`].
pub fn escape(text: &str) -> Cow<'_, str> {
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if needs_escape(c) {
            let _ = write!(out, "&#{};", c as u32);
        } else {
            out.push(c);
        }
    }
    Cow::Owned(out)
}
