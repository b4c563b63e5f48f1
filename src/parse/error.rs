use crate::state::Layer;
use crate::utils::echar::*;
use thiserror::Error;

/// Inner enum for `CxError`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CxErrorKind {
    #[error("expected {}, found {}", TextByte(*.0), MaybeByte(*.1))]
    ExpectedChar(u8, Option<u8>),
    #[error("expected an atom index, found {}", MaybeByte(*.0))]
    ExpectedInt(Option<u8>),
    #[error("integer is too large")]
    IntOverflow,
    #[error("the {0} layer wasn't terminated")]
    Unterminated(Layer),
    #[error("expected a radical class 1-7, found {}", MaybeByte(*.0))]
    BadRadical(Option<u8>),
    #[error("{} doesn't start a known layer", TextByte(*.0))]
    UnknownLayer(u8),
}

/// Something went wrong trying to parse a CXSMILES layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("an error occured at {} in the CXSMILES layers: {kind}", IdxPrint(*.index))]
pub struct CxError {
    pub index: usize,
    pub kind: CxErrorKind,
}
impl CxError {
    /// Convenience method
    pub const fn new(index: usize, kind: CxErrorKind) -> Self {
        Self { index, kind }
    }
}
