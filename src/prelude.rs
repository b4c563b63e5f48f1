pub use crate::cxsmiles;
pub use crate::parse::*;
pub use crate::state::*;
pub use crate::utils::escape::{escape, unescape};
