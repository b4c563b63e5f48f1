use crate::state::*;
use crate::utils::escape::escape;
use itertools::Itertools;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter, Write};

/// Writes layers with a comma between them.
struct LayerWriter<'a, 'b> {
    f: &'a mut Formatter<'b>,
    started: bool,
}
impl<'b> LayerWriter<'_, 'b> {
    fn next(&mut self) -> Result<&mut Formatter<'b>, fmt::Error> {
        if self.started {
            self.f.write_char(',')?;
        }
        self.started = true;
        Ok(&mut *self.f)
    }
}

fn fmt_labels(
    f: &mut Formatter<'_>,
    marker: &str,
    labels: &BTreeMap<usize, String>,
) -> fmt::Result {
    let len = labels.keys().next_back().map_or(0, |&k| k + 1);
    let slots = (0..len).map(|i| labels.get(&i).map_or("".into(), |l| escape(l)));
    write!(f, "{marker}{}$", slots.format(";"))
}

fn fmt_coord(f: &mut Formatter<'_>, [x, y, z]: [f64; 3], flag: bool) -> fmt::Result {
    if flag {
        write!(f, "{x},{y},{z}")
    } else {
        write!(f, "{x},{y},")
    }
}

fn fmt_int_map(
    f: &mut Formatter<'_>,
    marker: &str,
    map: &BTreeMap<usize, Vec<usize>>,
) -> fmt::Result {
    let entries = map
        .iter()
        .map(|(from, to)| format!("{from}:{}", to.iter().format(".")));
    write!(f, "{marker}{}", entries.format(","))
}

fn fmt_sgroup(f: &mut Formatter<'_>, sgroup: &Sgroup) -> fmt::Result {
    match sgroup {
        Sgroup::Data(s) => {
            write!(
                f,
                "SgD:{}:{}:{}",
                s.atoms.iter().format(","),
                escape(&s.field),
                escape(&s.value)
            )?;
            let extra = [&s.operator, &s.unit, &s.tag];
            let used = extra.iter().rposition(|e| !e.is_empty()).map_or(0, |i| i + 1);
            for e in &extra[..used] {
                write!(f, ":{}", escape(e))?;
            }
            Ok(())
        }
        Sgroup::Polymer(s) => {
            let subscript = if s.subscript == s.keyword {
                ""
            } else {
                s.subscript.as_str()
            };
            let superscript = if default_superscript(&s.keyword) == Some(s.superscript.as_str()) {
                ""
            } else {
                s.superscript.as_str()
            };
            write!(
                f,
                "Sg:{}:{}:{}:{}",
                s.keyword,
                s.atoms.iter().format(","),
                escape(subscript),
                escape(superscript)
            )
        }
    }
}

/// Writes the state back out as a CXSMILES suffix, `|...|`. An empty state writes nothing.
///
/// A layer that was present but had no entries is still written (`()`, `f:`, `m:`, `LO:`).
impl Display for CxSmilesState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        f.write_char('|')?;
        let mut w = LayerWriter { f, started: false };
        if let Some(coords) = &self.atom_coords {
            let f = w.next()?;
            f.write_char('(')?;
            for (n, &c) in coords.iter().enumerate() {
                if n > 0 {
                    f.write_char(';')?;
                }
                fmt_coord(f, c, self.coord_flag)?;
            }
            f.write_char(')')?;
        }
        if let Some(labels) = &self.atom_labels {
            fmt_labels(w.next()?, "$", labels)?;
        }
        if let Some(values) = &self.atom_values {
            fmt_labels(w.next()?, "$_AV:", values)?;
        }
        if let Some(groups) = &self.frag_groups {
            let groups = groups.iter().map(|g| g.iter().format("."));
            write!(w.next()?, "f:{}", groups.format(","))?;
        }
        for sgroup in self.sgroups.iter().flatten() {
            fmt_sgroup(w.next()?, sgroup)?;
        }
        if let Some(map) = &self.position_var {
            fmt_int_map(w.next()?, "m:", map)?;
        }
        if let Some(map) = &self.ligand_ordering {
            fmt_int_map(w.next()?, "LO:", map)?;
        }
        if let Some(rads) = &self.atom_rads {
            for rad in Radical::ALL {
                let atoms = rads.iter().filter(|&(_, &r)| r == rad).map(|(a, _)| a);
                let mut atoms = atoms.peekable();
                if atoms.peek().is_some() {
                    write!(w.next()?, "^{}:{}", rad.digit(), atoms.format(","))?;
                }
            }
        }
        w.f.write_char('|')
    }
}
