//! Run orchestration: configuration, output directory handling and the per-run pipeline.

pub mod opts;
pub mod session;
