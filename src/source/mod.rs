//! Frame source: locator classification, byte retrieval and frame decoding.

pub mod decode;
pub mod fetch;
pub mod locator;
