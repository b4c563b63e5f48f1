use crate::prelude::*;
use crate::utils::chariter::CharIter;
use std::collections::BTreeMap;

fn labels(text: &str) -> (Result<(), CxError>, BTreeMap<usize, String>, usize) {
    let mut iter = CharIter::new(text);
    let mut dest = BTreeMap::new();
    let res = layers::atom_labels(&mut iter, &mut dest, Layer::AtomLabels);
    (res, dest, iter.pos())
}

#[test]
fn empty_slots() {
    let (res, dest, _) = labels(";;R1;;Q$");
    assert_eq!(res, Ok(()));
    assert_eq!(dest.len(), 2);
    assert_eq!(dest[&2], "R1");
    assert_eq!(dest[&4], "Q");
}

#[test]
fn slot_count() {
    // six slots, three of them filled
    let (res, dest, _) = labels("A;;B;;;C$");
    assert_eq!(res, Ok(()));
    assert_eq!(dest.keys().copied().collect::<Vec<_>>(), [0, 2, 5]);
    assert_eq!(dest[&5], "C");
}

#[test]
fn no_labels() {
    let (res, dest, pos) = labels("$");
    assert_eq!(res, Ok(()));
    assert!(dest.is_empty());
    assert_eq!(pos, 1);
}

#[test]
fn trailing_separator() {
    let (res, dest, pos) = labels("A$,x");
    assert_eq!(res, Ok(()));
    assert_eq!(dest[&0], "A");
    assert_eq!(pos, 3);
}

#[test]
fn escaped() {
    crate::tests::macros::trace_capture!();
    let (res, dest, _) = labels("&#36;R;A&#59;B$");
    assert_eq!(res, Ok(()));
    assert_eq!(dest[&0], "$R");
    assert_eq!(dest[&1], "A;B");
}

#[test]
fn malformed_escape() {
    let (res, dest, _) = labels("A&B;C$");
    assert_eq!(res, Ok(()));
    assert_eq!(dest[&0], "A&B");
    assert_eq!(dest[&1], "C");

    let (res, dest, _) = labels("&#12x;Y$");
    assert_eq!(res, Ok(()));
    assert_eq!(dest[&0], "&#12x");
    assert_eq!(dest[&1], "Y");
}

#[test]
fn rgroups_kept() {
    let (res, dest, _) = labels("_R1;;_R2$");
    assert_eq!(res, Ok(()));
    assert_eq!(dest[&0], "_R1");
    assert_eq!(dest[&2], "_R2");
}

#[test]
fn unterminated() {
    let (res, dest, _) = labels("A;B");
    assert_eq!(
        res.map_err(|e| e.kind),
        Err(CxErrorKind::Unterminated(Layer::AtomLabels))
    );
    assert_eq!(dest.len(), 2);

    let (res, _, _) = labels(";;");
    assert!(res.is_err());
}
