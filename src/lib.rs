pub mod disp;
pub mod parse;
pub mod prelude;
pub mod state;
pub mod utils;
