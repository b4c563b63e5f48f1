//! Parsers for the body of each CXSMILES layer.
//!
//! Each one starts just after the layer's marker (`$`, `(`, `f:`, ...) and leaves the cursor just
//! after the last byte it understood. A failed parse can leave the cursor anywhere inside the layer
//! and the state partially filled, the dispatcher stops as soon as one fails.

use super::error::{CxError, CxErrorKind::*};
use crate::state::*;
use crate::utils::chariter::CharIter;
use crate::utils::escape::unescape;
use atoi::FromRadix10Checked;
use std::collections::{BTreeMap, BTreeSet};
use tracing::*;

const COMMA_SEPARATOR: u8 = b',';
const DOT_SEPARATOR: u8 = b'.';

fn expect(iter: &mut CharIter, c: u8) -> Result<(), CxError> {
    if iter.next_if(c) {
        Ok(())
    } else {
        Err(CxError::new(iter.pos(), ExpectedChar(c, iter.curr())))
    }
}

/// Read an unsigned decimal integer.
fn unsigned(iter: &mut CharIter) -> Result<usize, CxError> {
    let start = iter.pos();
    let (num, used) = usize::from_radix_10_checked(iter.rest());
    if used == 0 {
        return Err(CxError::new(start, ExpectedInt(iter.curr())));
    }
    iter.advance(used);
    num.ok_or(CxError::new(start, IntOverflow))
}

/// Read integers separated by `sep`, stopping at the first byte that isn't a digit.
/// A trailing separator is consumed.
fn int_list<E: Extend<usize>>(iter: &mut CharIter, sep: u8, dest: &mut E) -> Result<(), CxError> {
    while iter.curr().is_some_and(|c| c.is_ascii_digit()) {
        let num = unsigned(iter)?;
        dest.extend(Some(num));
        iter.next_if(sep);
    }
    Ok(())
}

/// Like `int_list`, but at least one integer has to be there.
fn atom_list<E: Extend<usize>>(iter: &mut CharIter, sep: u8, dest: &mut E) -> Result<(), CxError> {
    if !iter.curr().is_some_and(|c| c.is_ascii_digit()) {
        return Err(CxError::new(iter.pos(), ExpectedInt(iter.curr())));
    }
    int_list(iter, sep, dest)
}

/// Signed decimal without an exponent. A missing integer part counts as zero.
fn decimal(iter: &mut CharIter) -> f64 {
    let sign = if iter.next_if(b'-') {
        -1.0
    } else {
        iter.next_if(b'+');
        1.0
    };
    let mut int_part = 0f64;
    while let Some(d) = iter.next_digit() {
        int_part = int_part * 10.0 + d as f64;
    }
    let mut frac_part = 0f64;
    let mut divisor = 1f64;
    if iter.next_if(b'.') {
        while let Some(d) = iter.next_digit() {
            frac_part = frac_part * 10.0 + d as f64;
            divisor *= 10.0;
        }
    }
    sign * (int_part + frac_part / divisor)
}

/// Step over a `&#NNN;` reference. Returns false and leaves the cursor alone if there isn't a
/// complete one here.
fn skip_escape(iter: &mut CharIter) -> bool {
    let rollback = iter.pos();
    if iter.next_if(b'&') && iter.next_if(b'#') && iter.next_if_digit() {
        while iter.next_if_digit() {}
        if iter.next_if(b';') {
            return true;
        }
    }
    iter.rewind(rollback);
    false
}

/// Atom labels (and values) are semicolon separated, one slot per atom, and end with a `$`.
///
/// Empty slots still take up an index. The same grammar is used for `$_AV:`, so this only takes
/// the map to write into.
#[instrument(level = "trace", skip_all, fields(pos = iter.pos()))]
pub fn atom_labels(
    iter: &mut CharIter,
    dest: &mut BTreeMap<usize, String>,
    layer: Layer,
) -> Result<(), CxError> {
    let mut atom_idx = 0;
    loop {
        // fast forward through empty labels
        while iter.next_if(b';') {
            atom_idx += 1;
        }
        match iter.curr() {
            None => return Err(CxError::new(iter.pos(), Unterminated(layer))),
            Some(b'$') => {
                iter.next();
                iter.next_if(COMMA_SEPARATOR);
                return Ok(());
            }
            Some(_) => {}
        }
        let beg = iter.pos();
        while let Some(c) = iter.curr() {
            match c {
                // an escaped character ends with a ';', which mustn't end the label
                b'&' => {
                    if !skip_escape(iter) {
                        iter.next();
                    }
                }
                b';' | b'$' => break,
                _ => {
                    iter.next();
                }
            }
        }
        let label = unescape(&iter.substr(beg, iter.pos())).into_owned();
        trace!(atom = atom_idx, %label, "read label");
        dest.insert(atom_idx, label);
        atom_idx += 1;
        if iter.next_if(b'$') {
            iter.next_if(COMMA_SEPARATOR);
            return Ok(());
        }
        if !iter.next_if(b';') {
            return Err(CxError::new(iter.pos(), Unterminated(layer)));
        }
    }
}

/// Coordinates are written between parentheses, `(x,y,z;x,y,z)`. The z coordinate may be left
/// empty, `(0,1,;2,3,)`.
#[instrument(level = "trace", skip_all, fields(pos = iter.pos()))]
pub fn coords(iter: &mut CharIter, state: &mut CxSmilesState) -> Result<(), CxError> {
    let dest = state.atom_coords.get_or_insert_with(Vec::new);
    loop {
        match iter.curr() {
            None => return Err(CxError::new(iter.pos(), Unterminated(Layer::Coords))),
            Some(b')') => {
                iter.next();
                iter.next_if(COMMA_SEPARATOR);
                return Ok(());
            }
            Some(_) => {}
        }
        let x = decimal(iter);
        expect(iter, b',')?;
        let y = decimal(iter);
        expect(iter, b',')?;
        let z = decimal(iter);
        iter.next_if(b';');
        state.coord_flag |= z != 0.0;
        dest.push([x, y, z]);
    }
}

/// Fragment grouping defines disconnected components that should be considered part of a single
/// molecule, like the ions of a salt. Each group is a dot-separated list ending in a comma.
#[instrument(level = "trace", skip_all, fields(pos = iter.pos()))]
pub fn fragment_groups(iter: &mut CharIter, state: &mut CxSmilesState) -> Result<(), CxError> {
    let dest = state.frag_groups.get_or_insert_with(Vec::new);
    let mut found = false;
    loop {
        if !iter.has_next() {
            return if found {
                Ok(())
            } else {
                Err(CxError::new(iter.pos(), Unterminated(Layer::FragmentGroups)))
            };
        }
        let mut group = Vec::new();
        int_list(iter, DOT_SEPARATOR, &mut group)?;
        iter.next_if(COMMA_SEPARATOR);
        if group.is_empty() {
            return Ok(());
        }
        dest.push(group);
        found = true;
    }
}

/// Sgroup fields can be terminated by the next field, the next layer, or the end of the layers.
fn is_sgroup_delim(c: u8) -> bool {
    c == b':' || c == b',' || c == b'|'
}

fn sgroup_field(iter: &mut CharIter) -> String {
    let beg = iter.pos();
    while iter.curr().is_some_and(|c| !is_sgroup_delim(c)) {
        iter.next();
    }
    unescape(&iter.substr(beg, iter.pos())).into_owned()
}

/// Skip any further `:`-separated fields we don't keep.
fn skip_sgroup_fields(iter: &mut CharIter) {
    while iter.next_if(b':') {
        let skipped = sgroup_field(iter);
        trace!(%skipped, "ignoring Sgroup field");
    }
}

/// `atoms:field:value[:operator[:unit[:tag]]]`
#[instrument(level = "trace", skip_all, fields(pos = iter.pos()))]
pub fn data_sgroup(iter: &mut CharIter, state: &mut CxSmilesState) -> Result<(), CxError> {
    let mut atoms = BTreeSet::new();
    atom_list(iter, COMMA_SEPARATOR, &mut atoms)?;
    expect(iter, b':')?;
    let field = sgroup_field(iter);
    expect(iter, b':')?;
    let value = sgroup_field(iter);
    let mut optional: [String; 3] = Default::default();
    for slot in &mut optional {
        if !iter.next_if(b':') {
            break;
        }
        *slot = sgroup_field(iter);
    }
    skip_sgroup_fields(iter);
    let [operator, unit, tag] = optional;
    state
        .sgroups
        .get_or_insert_with(|| Vec::with_capacity(4))
        .push(Sgroup::Data(DataSgroup {
            atoms,
            field,
            value,
            operator,
            unit,
            tag,
        }));
    Ok(())
}

/// Polymer Sgroups describe repeating units, `keyword:atoms:subscript:superscript`. Only the atoms
/// are written, crossing bonds and bracket orientation are skipped.
#[instrument(level = "trace", skip_all, fields(pos = iter.pos()))]
pub fn polymer_sgroup(iter: &mut CharIter, state: &mut CxSmilesState) -> Result<(), CxError> {
    let beg = iter.pos();
    while iter.curr().is_some_and(|c| !is_sgroup_delim(c)) {
        iter.next();
    }
    let keyword = iter.substr(beg, iter.pos()).into_owned();
    expect(iter, b':')?;
    let mut atoms = Vec::new();
    atom_list(iter, COMMA_SEPARATOR, &mut atoms)?;
    expect(iter, b':')?;
    let subscript = sgroup_field(iter);
    expect(iter, b':')?;
    let superscript = sgroup_field(iter);
    skip_sgroup_fields(iter);
    // fields end at a delimiter, so only ',', '|', or the end of the input can be left here
    iter.next_if(COMMA_SEPARATOR);
    state
        .sgroups
        .get_or_insert_with(Vec::new)
        .push(Sgroup::Polymer(PolymerSgroup::new(
            keyword,
            atoms,
            subscript,
            superscript,
        )));
    Ok(())
}

/// `from:to.to.to,from:to,...`, shared by positional variation and ligand ordering. Stops at the
/// first entry that doesn't start with a digit.
#[instrument(level = "trace", skip_all, fields(pos = iter.pos()))]
pub fn int_list_map(
    iter: &mut CharIter,
    dest: &mut BTreeMap<usize, Vec<usize>>,
) -> Result<(), CxError> {
    while iter.curr().is_some_and(|c| c.is_ascii_digit()) {
        let from = unsigned(iter)?;
        expect(iter, b':')?;
        let mut endpoints = Vec::with_capacity(6);
        int_list(iter, DOT_SEPARATOR, &mut endpoints)?;
        iter.next_if(COMMA_SEPARATOR);
        dest.insert(from, endpoints);
    }
    Ok(())
}

/// Positional variation/multi-center bonding, a begin atom and one or more end points.
pub fn positional_variation(
    iter: &mut CharIter,
    state: &mut CxSmilesState,
) -> Result<(), CxError> {
    int_list_map(iter, state.position_var.get_or_insert_with(BTreeMap::new))
}

/// Ligand ordering gives the order of attachments around R groups.
pub fn ligand_ordering(iter: &mut CharIter, state: &mut CxSmilesState) -> Result<(), CxError> {
    int_list_map(iter, state.ligand_ordering.get_or_insert_with(BTreeMap::new))
}

/// `class:atoms`, where the class is a single digit from 1 to 7.
#[instrument(level = "trace", skip_all, fields(pos = iter.pos()))]
pub fn radicals(iter: &mut CharIter, state: &mut CxSmilesState) -> Result<(), CxError> {
    let c = iter.curr();
    let rad = c
        .and_then(Radical::from_digit)
        .ok_or(CxError::new(iter.pos(), BadRadical(c)))?;
    iter.next();
    expect(iter, b':')?;
    let mut atoms = Vec::with_capacity(4);
    atom_list(iter, COMMA_SEPARATOR, &mut atoms)?;
    let dest = state.atom_rads.get_or_insert_with(BTreeMap::new);
    for atom in atoms {
        dest.insert(atom, rad);
    }
    Ok(())
}
