use crate::utils::chariter::CharIter;

#[test]
fn cursor() {
    let mut iter = CharIter::new("ab12");
    assert!(iter.has_next());
    assert_eq!(iter.curr(), Some(b'a'));
    assert_eq!(iter.peek(), Some(b'b'));
    assert!(!iter.next_if(b'b'));
    assert!(iter.next_if(b'a'));
    assert_eq!(iter.next(), Some(b'b'));
    assert_eq!(iter.next_digit(), Some(1));
    assert!(iter.next_if_digit());
    assert!(!iter.has_next());
    assert_eq!(iter.curr(), None);
    assert_eq!(iter.next(), None);
    assert_eq!(iter.pos(), 4);
}

#[test]
fn rewind() {
    let mut iter = CharIter::new("SgD:0");
    let start = iter.pos();
    assert!(!iter.next_if_str(b"Sg:"));
    assert_eq!(iter.pos(), start);
    assert!(iter.next_if_str(b"SgD:"));
    assert_eq!(iter.rest(), b"0");
    iter.rewind(start);
    assert_eq!(iter.rest(), b"SgD:0");
    iter.advance(10);
    assert_eq!(iter.pos(), 5);
    assert_eq!(iter.size_hint(), (0, Some(0)));
}

#[test]
fn substr() {
    let iter = CharIter::new(b"ab\xffcd".as_slice());
    assert_eq!(iter.substr(0, 2), "ab");
    assert_eq!(iter.substr(1, 4), "b\u{fffd}c");
}
