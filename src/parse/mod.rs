//! Parsing of the CXSMILES layers that follow a SMILES string.

pub mod cxsmiles;
pub mod error;
pub mod layers;

pub use cxsmiles::{parse_cx_layers, CxOutcome, CxSmilesParser, Record};
pub use error::{CxError, CxErrorKind};
