//! Descriptive statistics behind the report pages.

mod describe;
mod ranking;

pub use describe::{describe, describe_by, ColumnSummary, GroupSummary};
pub use ranking::{largest_petal_area, nsmallest, PetalAreaLeader};

/// Categorical column holding the flower species.
pub const SPECIES: &str = "species";
pub const SEPAL_WIDTH: &str = "sepal_width";
pub const PETAL_LENGTH: &str = "petal_length";
pub const PETAL_WIDTH: &str = "petal_width";
