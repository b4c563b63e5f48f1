//! Intermediate representation of the decoded CXSMILES layers.
//!
//! Nothing in here knows about the molecule the layers annotate, atoms are referred to by their
//! 0-based index in the SMILES string.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// One of the layers that can be decoded into a [`CxSmilesState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    AtomLabels,
    AtomValues,
    Coords,
    FragmentGroups,
    DataSgroup,
    PolymerSgroup,
    PositionalVariation,
    LigandOrdering,
    Radicals,
}
impl Layer {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AtomLabels => "atom labels",
            Self::AtomValues => "atom values",
            Self::Coords => "coordinates",
            Self::FragmentGroups => "fragment grouping",
            Self::DataSgroup => "data Sgroup",
            Self::PolymerSgroup => "polymer Sgroup",
            Self::PositionalVariation => "positional variation",
            Self::LigandOrdering => "ligand ordering",
            Self::Radicals => "radicals",
        }
    }
}
impl Display for Layer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Radical multiplicity of an atom, as written in the `^` layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Radical {
    Monovalent,
    Divalent,
    DivalentSinglet,
    DivalentTriplet,
    Trivalent,
    TrivalentDoublet,
    TrivalentQuartet,
}
impl Radical {
    pub const ALL: [Self; 7] = [
        Self::Monovalent,
        Self::Divalent,
        Self::DivalentSinglet,
        Self::DivalentTriplet,
        Self::Trivalent,
        Self::TrivalentDoublet,
        Self::TrivalentQuartet,
    ];

    /// Map an ASCII digit `'1'..='7'` to its radical.
    pub fn from_digit(c: u8) -> Option<Self> {
        match c {
            b'1'..=b'7' => Some(Self::ALL[(c - b'1') as usize]),
            _ => None,
        }
    }
    pub fn digit(self) -> char {
        (b'1' + self as u8) as char
    }
}

/// A data Sgroup, `SgD:` in CXSMILES.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataSgroup {
    pub atoms: BTreeSet<usize>,
    pub field: String,
    pub value: String,
    pub operator: String,
    pub unit: String,
    pub tag: String,
}

/// Superscripts don't need to be written for these keywords, there's no default.
const NO_DEFAULT_SUPERSCRIPT: &[&str] = &["c", "mix", "f", "mod"];

/// The superscript a polymer Sgroup gets if none is written.
pub fn default_superscript(keyword: &str) -> Option<&'static str> {
    (!NO_DEFAULT_SUPERSCRIPT.contains(&keyword)).then_some("eu")
}

/// A polymer Sgroup, `Sg:` in CXSMILES. Crossing bonds and bracket orientation aren't kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolymerSgroup {
    pub keyword: String,
    pub atoms: Vec<usize>,
    pub subscript: String,
    pub superscript: String,
}
impl PolymerSgroup {
    /// Build a polymer Sgroup, filling in the subscript and superscript if they're empty.
    pub fn new(keyword: String, atoms: Vec<usize>, subscript: String, superscript: String) -> Self {
        let subscript = if subscript.is_empty() {
            keyword.clone()
        } else {
            subscript
        };
        let superscript = match default_superscript(&keyword) {
            Some(def) if superscript.is_empty() => def.to_string(),
            _ => superscript,
        };
        Self {
            keyword,
            atoms,
            subscript,
            superscript,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sgroup {
    Data(DataSgroup),
    Polymer(PolymerSgroup),
}
impl Sgroup {
    pub fn layer(&self) -> Layer {
        match self {
            Self::Data(_) => Layer::DataSgroup,
            Self::Polymer(_) => Layer::PolymerSgroup,
        }
    }
    /// The atoms this Sgroup covers. Data Sgroups list them in order, polymers as written.
    pub fn atoms(&self) -> Box<dyn Iterator<Item = usize> + '_> {
        match self {
            Self::Data(s) => Box::new(s.atoms.iter().copied()),
            Self::Polymer(s) => Box::new(s.atoms.iter().copied()),
        }
    }
}

/// An atom index that doesn't fit in the molecule being annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("atom {index} in the {layer} layer is out of range for a molecule with {atom_count} atoms")]
pub struct AtomIndexError {
    pub layer: Layer,
    pub index: usize,
    pub atom_count: usize,
}

/// Everything decoded from the CXSMILES layers. A field is `None` if its layer wasn't present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CxSmilesState {
    pub atom_labels: Option<BTreeMap<usize, String>>,
    pub atom_values: Option<BTreeMap<usize, String>>,
    pub atom_coords: Option<Vec<[f64; 3]>>,
    /// Set if any coordinate has a non-zero z.
    pub coord_flag: bool,
    pub frag_groups: Option<Vec<Vec<usize>>>,
    pub sgroups: Option<Vec<Sgroup>>,
    pub position_var: Option<BTreeMap<usize, Vec<usize>>>,
    pub ligand_ordering: Option<BTreeMap<usize, Vec<usize>>>,
    pub atom_rads: Option<BTreeMap<usize, Radical>>,
}
impl CxSmilesState {
    pub const fn new() -> Self {
        Self {
            atom_labels: None,
            atom_values: None,
            atom_coords: None,
            coord_flag: false,
            frag_groups: None,
            sgroups: None,
            position_var: None,
            ligand_ordering: None,
            atom_rads: None,
        }
    }

    /// True if no layer has been decoded.
    pub fn is_empty(&self) -> bool {
        self.atom_labels.is_none()
            && self.atom_values.is_none()
            && self.atom_coords.is_none()
            && self.frag_groups.is_none()
            && self.sgroups.is_none()
            && self.position_var.is_none()
            && self.ligand_ordering.is_none()
            && self.atom_rads.is_none()
    }

    pub fn is_3d(&self) -> bool {
        self.coord_flag
    }

    /// Every atom index referenced anywhere in the state, tagged with its layer.
    pub fn atom_refs(&self) -> impl Iterator<Item = (Layer, usize)> + '_ {
        fn keys<V>(
            layer: Layer,
            map: &Option<BTreeMap<usize, V>>,
        ) -> impl Iterator<Item = (Layer, usize)> + '_ {
            map.iter().flat_map(move |m| m.keys().map(move |&k| (layer, k)))
        }
        fn lists(
            layer: Layer,
            map: &Option<BTreeMap<usize, Vec<usize>>>,
        ) -> impl Iterator<Item = (Layer, usize)> + '_ {
            map.iter().flat_map(move |m| {
                m.iter()
                    .flat_map(move |(&k, v)| std::iter::once(k).chain(v.iter().copied()))
                    .map(move |i| (layer, i))
            })
        }
        let coords = self
            .atom_coords
            .iter()
            .flat_map(|c| (0..c.len()).map(|i| (Layer::Coords, i)));
        let frags = self.frag_groups.iter().flat_map(|g| {
            g.iter()
                .flatten()
                .map(|&i| (Layer::FragmentGroups, i))
        });
        let sgroups = self
            .sgroups
            .iter()
            .flatten()
            .flat_map(|s| s.atoms().map(move |i| (s.layer(), i)));
        keys(Layer::AtomLabels, &self.atom_labels)
            .chain(keys(Layer::AtomValues, &self.atom_values))
            .chain(coords)
            .chain(frags)
            .chain(sgroups)
            .chain(lists(Layer::PositionalVariation, &self.position_var))
            .chain(lists(Layer::LigandOrdering, &self.ligand_ordering))
            .chain(keys(Layer::Radicals, &self.atom_rads))
    }

    /// Check that every atom index is below `atom_count`. The parser never does this itself.
    pub fn check_atom_count(&self, atom_count: usize) -> Result<(), AtomIndexError> {
        match self.atom_refs().find(|&(_, i)| i >= atom_count) {
            Some((layer, index)) => Err(AtomIndexError {
                layer,
                index,
                atom_count,
            }),
            None => Ok(()),
        }
    }
}
