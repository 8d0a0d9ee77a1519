//! CLI command implementations.

pub mod outliers;
pub mod prep;
pub mod serve;
