use crate::utils::escape::*;
use std::borrow::Cow;

#[test]
fn plain_text_is_borrowed() {
    assert!(matches!(unescape("R1"), Cow::Borrowed("R1")));
    assert!(matches!(escape("R1"), Cow::Borrowed("R1")));
    assert!(matches!(unescape("a&b"), Cow::Borrowed("a&b")));
}

#[test]
fn references() {
    assert_eq!(unescape("&#65;&#66;"), "AB");
    assert_eq!(unescape("x&#59;y"), "x;y");
    assert_eq!(unescape("&#181;g"), "µg");
}

#[test]
fn malformed_references() {
    assert_eq!(unescape("&#;"), "&#;");
    assert_eq!(unescape("&#65"), "&#65");
    assert_eq!(unescape("&#x41;"), "&#x41;");
    assert_eq!(unescape("&#&#65;"), "&#A");
    // surrogates and values past the end of unicode aren't chars
    assert_eq!(unescape("&#55296;"), "&#55296;");
    assert_eq!(unescape("&#99999999999;"), "&#99999999999;");
}

#[test]
fn escaping() {
    assert_eq!(escape("a|b"), "a&#124;b");
    assert_eq!(escape("1,2:3"), "1&#44;2&#58;3");
    assert_eq!(escape("tab\t"), "tab&#9;");
    for text in ["a;b", "x$y|z&w", "µ", "&#65;"] {
        assert_eq!(unescape(&escape(text)), text);
    }
}
