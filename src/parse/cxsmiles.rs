use super::error::{CxError, CxErrorKind::*};
use super::layers;
use crate::state::*;
use crate::utils::chariter::CharIter;
use crate::utils::echar::TextByte;
use bstr::ByteSlice;
use smallvec::SmallVec;
use tracing::*;

#[macro_export]
macro_rules! cxsmiles {
    ($cx:literal) => {{
        let outcome = $crate::parse::cxsmiles::CxSmilesParser::new($cx).parse();
        if let Some(err) = outcome.error {
            panic!("Failed to parse CXSMILES {}: {}", $cx, err);
        }
        outcome.state
    }};
}

/// What a marker at the cursor stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Marker {
    Layer(Layer),
    /// Recognized, but we don't keep anything from it
    Ignored(&'static str),
}

/// Longer markers have to come before their prefixes.
const MARKERS: &[(&[u8], Marker)] = &[
    (b"$_AV:", Marker::Layer(Layer::AtomValues)),
    (b"$", Marker::Layer(Layer::AtomLabels)),
    (b"(", Marker::Layer(Layer::Coords)),
    (b"f:", Marker::Layer(Layer::FragmentGroups)),
    (b"SgD:", Marker::Layer(Layer::DataSgroup)),
    (b"Sg:", Marker::Layer(Layer::PolymerSgroup)),
    (b"m:", Marker::Layer(Layer::PositionalVariation)),
    (b"LO:", Marker::Layer(Layer::LigandOrdering)),
    (b"^", Marker::Layer(Layer::Radicals)),
    (b"ctu:", Marker::Ignored("unspecified cis/trans")),
    (b"c:", Marker::Ignored("cis")),
    (b"t:", Marker::Ignored("trans")),
    (b"rb:", Marker::Ignored("ring bond count")),
    (b"r", Marker::Ignored("relative stereo")),
    (b"a:", Marker::Ignored("absolute stereo group")),
    (b"o", Marker::Ignored("or stereo group")),
    (b"&", Marker::Ignored("and stereo group")),
    (b"u:", Marker::Ignored("unsaturation")),
    (b"s:", Marker::Ignored("substitution count")),
];

/// Bytes that can show up in the body of an ignored layer.
fn is_ignored_body(c: u8) -> bool {
    c.is_ascii_digit() || matches!(c, b',' | b'.' | b':' | b'*')
}

/// Result of parsing a CXSMILES suffix. Parsing never fails outright, whatever was decoded before
/// the first bad layer is kept.
#[derive(Debug, Clone)]
pub struct CxOutcome {
    pub state: CxSmilesState,
    /// Layers that were decoded, in the order they were read.
    pub layers: SmallVec<Layer, 8>,
    /// The error that stopped parsing, if there was one.
    pub error: Option<CxError>,
    /// Byte offset where parsing stopped. After a closing `|`, this is where the title starts.
    pub end: usize,
}
impl CxOutcome {
    pub fn layers_consumed(&self) -> usize {
        self.layers.len()
    }
    /// True if every layer was understood.
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone)]
/// Parser for the layers following a SMILES string
pub struct CxSmilesParser<'a> {
    iter: CharIter<'a>,
    state: CxSmilesState,
    layers: SmallVec<Layer, 8>,
    /// Treat unrecognized markers as errors instead of skipping over them
    pub strict: bool,
}
impl<'a> CxSmilesParser<'a> {
    /// Create a new parser from the text after the SMILES, with or without its leading `|`
    pub fn new<I: AsRef<[u8]> + ?Sized>(input: &'a I) -> Self {
        Self {
            iter: CharIter::new(input),
            state: CxSmilesState::new(),
            layers: SmallVec::new(),
            strict: false,
        }
    }

    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
    pub fn set_strict(&mut self, strict: bool) -> &mut Self {
        self.strict = strict;
        self
    }

    /// Find the marker at the cursor and step over it.
    fn marker(&mut self) -> Option<Marker> {
        let &(text, marker) = MARKERS
            .iter()
            .find(|(text, _)| self.iter.rest().starts_with(text))?;
        self.iter.advance(text.len());
        Some(marker)
    }

    fn layer(&mut self, layer: Layer) -> Result<(), CxError> {
        let iter = &mut self.iter;
        let state = &mut self.state;
        match layer {
            Layer::AtomLabels => {
                let dest = state.atom_labels.get_or_insert_with(Default::default);
                layers::atom_labels(iter, dest, layer)
            }
            Layer::AtomValues => {
                let dest = state.atom_values.get_or_insert_with(Default::default);
                layers::atom_labels(iter, dest, layer)
            }
            Layer::Coords => layers::coords(iter, state),
            Layer::FragmentGroups => layers::fragment_groups(iter, state),
            Layer::DataSgroup => layers::data_sgroup(iter, state),
            Layer::PolymerSgroup => layers::polymer_sgroup(iter, state),
            Layer::PositionalVariation => layers::positional_variation(iter, state),
            Layer::LigandOrdering => layers::ligand_ordering(iter, state),
            Layer::Radicals => layers::radicals(iter, state),
        }
    }

    fn skip_ignored(&mut self, name: &'static str) {
        let start = self.iter.pos();
        while self.iter.curr().is_some_and(is_ignored_body) {
            self.iter.next();
        }
        debug!(layer = name, start, end = self.iter.pos(), "ignoring layer");
    }

    /// Run through the layers until the closing `|`, the end of the input, or a layer that can't be
    /// parsed.
    fn run(&mut self) -> Result<(), CxError> {
        self.iter.next_if(b'|');
        while let Some(c) = self.iter.curr() {
            match c {
                b'|' => {
                    self.iter.next();
                    if !self.iter.next_if(b' ') {
                        self.iter.next_if(b'\t');
                    }
                    return Ok(());
                }
                b',' => {
                    self.iter.next();
                    continue;
                }
                _ => {}
            }
            let start = self.iter.pos();
            match self.marker() {
                Some(Marker::Layer(layer)) => {
                    self.layer(layer)?;
                    debug!(%layer, start, end = self.iter.pos(), "parsed layer");
                    self.layers.push(layer);
                }
                Some(Marker::Ignored(name)) => self.skip_ignored(name),
                None if self.strict => return Err(CxError::new(start, UnknownLayer(c))),
                None => {
                    trace!(byte = %TextByte(c), pos = start, "skipping unrecognized marker");
                    self.iter.next();
                }
            }
        }
        Ok(())
    }

    /// Parse the layers, consuming self.
    #[instrument(level = "debug", skip_all)]
    pub fn parse(mut self) -> CxOutcome {
        let error = self.run().err();
        if let Some(err) = &error {
            warn!(%err, consumed = self.layers.len(), "stopped parsing CXSMILES layers");
        }
        CxOutcome {
            state: self.state,
            layers: self.layers,
            error,
            end: self.iter.pos(),
        }
    }
}

/// Parse a CXSMILES suffix, returning the decoded state and how many layers were read.
///
/// `atom_count` is what the SMILES parser found, it's only used for diagnostics. Indices are not
/// checked against it, see [`CxSmilesState::check_atom_count`].
#[instrument(level = "debug", skip(text))]
pub fn parse_cx_layers(text: &str, atom_count: usize) -> (CxSmilesState, usize) {
    let outcome = CxSmilesParser::new(text).parse();
    let consumed = outcome.layers_consumed();
    (outcome.state, consumed)
}

/// A SMILES record split into its parts, `SMILES |layers| title`.
#[derive(Debug, Clone)]
pub struct Record<'a> {
    pub smiles: &'a str,
    /// Decoded layers, if the text after the SMILES started with `|`
    pub cx: Option<CxOutcome>,
    pub title: &'a str,
}
impl<'a> Record<'a> {
    pub fn parse(line: &'a str) -> Self {
        Self::parse_with(line, false)
    }

    /// Split a record, parsing its layers in strict mode if `strict` is set.
    pub fn parse_with(line: &'a str, strict: bool) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let (smiles, rest) = match line.find([' ', '\t']) {
            Some(idx) => (&line[..idx], line[idx..].trim_start_matches([' ', '\t'])),
            None => (line, ""),
        };
        if !rest.starts_with('|') {
            return Self {
                smiles,
                cx: None,
                title: rest.trim_end(),
            };
        }
        let outcome = CxSmilesParser::new(rest).with_strict(strict).parse();
        // a failed layer leaves the cursor inside the suffix, so skip to its close
        let end = if outcome.is_complete() {
            outcome.end
        } else {
            rest.as_bytes()[outcome.end..]
                .find_byte(b'|')
                .map_or(rest.len(), |i| outcome.end + i + 1)
        };
        Self {
            smiles,
            title: rest[end..].trim(),
            cx: Some(outcome),
        }
    }
}
