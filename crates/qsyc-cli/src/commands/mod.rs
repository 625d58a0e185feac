//! CLI command implementations.

pub mod common;
pub mod compile;
pub mod gates;
pub mod version;
