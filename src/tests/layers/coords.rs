use crate::prelude::*;
use crate::utils::chariter::CharIter;

fn coords(text: &str) -> (Result<(), CxError>, CxSmilesState) {
    let mut iter = CharIter::new(text);
    let mut state = CxSmilesState::new();
    let res = layers::coords(&mut iter, &mut state);
    (res, state)
}

fn assert_close(lhs: &[[f64; 3]], rhs: &[[f64; 3]]) {
    assert_eq!(lhs.len(), rhs.len());
    for (l, r) in lhs.iter().zip(rhs) {
        for (a, b) in l.iter().zip(r) {
            assert!((a - b).abs() < 1e-9, "{l:?} != {r:?}");
        }
    }
}

#[test]
fn three_d() {
    let (res, state) = coords("1.0,2.0,0.0;3.0,4.0,1.5;)");
    assert_eq!(res, Ok(()));
    assert_close(
        state.atom_coords.as_deref().unwrap(),
        &[[1.0, 2.0, 0.0], [3.0, 4.0, 1.5]],
    );
    assert!(state.coord_flag);
}

#[test]
fn two_d() {
    let (res, state) = coords("0,1,;2,3,)");
    assert_eq!(res, Ok(()));
    assert_close(
        state.atom_coords.as_deref().unwrap(),
        &[[0.0, 1.0, 0.0], [2.0, 3.0, 0.0]],
    );
    assert!(!state.is_3d());
}

#[test]
fn signs_and_fractions() {
    let (res, state) = coords("-1.5,+2.25,.5;-.125,0.,3)");
    assert_eq!(res, Ok(()));
    assert_close(
        state.atom_coords.as_deref().unwrap(),
        &[[-1.5, 2.25, 0.5], [-0.125, 0.0, 3.0]],
    );
    assert!(state.coord_flag);
}

#[test]
fn empty() {
    let (res, state) = coords(")");
    assert_eq!(res, Ok(()));
    assert_eq!(state.atom_coords, Some(Vec::new()));
}

#[test]
fn missing_comma() {
    let (res, _) = coords("1.0;2.0)");
    assert_eq!(
        res,
        Err(CxError::new(3, CxErrorKind::ExpectedChar(b',', Some(b';'))))
    );
}

#[test]
fn unterminated() {
    let (res, state) = coords("1,2,3");
    assert_eq!(
        res.map_err(|e| e.kind),
        Err(CxErrorKind::Unterminated(Layer::Coords))
    );
    // what was read is kept
    assert_eq!(state.atom_coords.map(|c| c.len()), Some(1));
}
