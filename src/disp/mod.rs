//! Writing decoded state back out.

pub mod cxsmiles;
