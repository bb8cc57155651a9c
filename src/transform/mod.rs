//! Per-frame transform pipeline: resize, filter chain, mask overlay, format accommodation.

pub mod filters;
pub mod mask;
pub mod pipeline;
pub mod resize;
