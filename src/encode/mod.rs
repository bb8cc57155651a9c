//! Output naming and file encoding for tiles and masks.

pub mod output;
pub mod writer;
