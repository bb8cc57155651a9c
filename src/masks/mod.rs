//! Mask catalog for the masked output variant.

pub mod catalog;
