//! Grid partitioning of processed frames and regrouping into per-tile sequences.

pub mod partition;
pub mod plan;
