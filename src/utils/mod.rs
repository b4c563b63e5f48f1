pub mod chariter;
pub mod echar;
pub mod escape;
