use crate::prelude::*;
use crate::utils::chariter::CharIter;
use std::collections::BTreeMap;

#[test]
fn fragments() {
    let mut iter = CharIter::new("0.1,2.3.4,");
    let mut state = CxSmilesState::new();
    assert_eq!(layers::fragment_groups(&mut iter, &mut state), Ok(()));
    assert_eq!(state.frag_groups, Some(vec![vec![0, 1], vec![2, 3, 4]]));
}

#[test]
fn fragments_before_close() {
    let mut iter = CharIter::new("0.1|");
    let mut state = CxSmilesState::new();
    assert_eq!(layers::fragment_groups(&mut iter, &mut state), Ok(()));
    assert_eq!(state.frag_groups, Some(vec![vec![0, 1]]));
    assert_eq!(iter.curr(), Some(b'|'));
}

#[test]
fn fragments_before_next_layer() {
    let mut iter = CharIter::new("0.1,2.3,SgD:");
    let mut state = CxSmilesState::new();
    assert_eq!(layers::fragment_groups(&mut iter, &mut state), Ok(()));
    assert_eq!(state.frag_groups.as_ref().map(Vec::len), Some(2));
    assert_eq!(iter.pos(), 8);
}

#[test]
fn fragments_empty_input() {
    let mut iter = CharIter::new("");
    let mut state = CxSmilesState::new();
    assert_eq!(
        layers::fragment_groups(&mut iter, &mut state).map_err(|e| e.kind),
        Err(CxErrorKind::Unterminated(Layer::FragmentGroups))
    );
}

#[test]
fn int_map() {
    let mut iter = CharIter::new("1:2.3.4,5:6,|");
    let mut map = BTreeMap::new();
    assert_eq!(layers::int_list_map(&mut iter, &mut map), Ok(()));
    assert_eq!(map[&1], [2, 3, 4]);
    assert_eq!(map[&5], [6]);
    assert_eq!(iter.curr(), Some(b'|'));
}

#[test]
fn int_map_end_of_input() {
    let mut iter = CharIter::new("0:1");
    let mut map = BTreeMap::new();
    assert_eq!(layers::int_list_map(&mut iter, &mut map), Ok(()));
    assert_eq!(map.len(), 1);
    assert!(!iter.has_next());
}

#[test]
fn int_map_missing_colon() {
    let mut iter = CharIter::new("1-2");
    let mut map = BTreeMap::new();
    assert_eq!(
        layers::int_list_map(&mut iter, &mut map),
        Err(CxError::new(1, CxErrorKind::ExpectedChar(b':', Some(b'-'))))
    );
}

#[test]
fn int_map_overflow() {
    let mut iter = CharIter::new("99999999999999999999999:1");
    let mut map = BTreeMap::new();
    assert_eq!(
        layers::int_list_map(&mut iter, &mut map),
        Err(CxError::new(0, CxErrorKind::IntOverflow))
    );
}

#[test]
fn separate_destinations() {
    let mut state = CxSmilesState::new();
    let mut iter = CharIter::new("0:1.2");
    assert_eq!(layers::positional_variation(&mut iter, &mut state), Ok(()));
    let mut iter = CharIter::new("3:4.5");
    assert_eq!(layers::ligand_ordering(&mut iter, &mut state), Ok(()));
    assert_eq!(state.position_var, Some(BTreeMap::from([(0, vec![1, 2])])));
    assert_eq!(state.ligand_ordering, Some(BTreeMap::from([(3, vec![4, 5])])));
}
