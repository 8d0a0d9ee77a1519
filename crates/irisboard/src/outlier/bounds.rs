//! Percentiles and IQR fences.

use serde::{Deserialize, Serialize};

/// Fence multiplier of the conventional Tukey rule.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// A sorted view of a sample for repeated percentile lookups.
#[derive(Debug, Clone)]
pub struct Percentiles(Box<[f64]>);

impl Percentiles {
    /// Sort the values; `None` for an empty sample.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut sorted: Vec<f64> = values.into_iter().collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);
        Some(Self(sorted.into_boxed_slice()))
    }

    /// Value at fraction `p` in `[0, 1]`.
    ///
    /// Linear interpolation between the order statistics around rank
    /// `p * (n - 1)`. `p` is clamped into range.
    pub fn at(&self, p: f64) -> f64 {
        let last = self.0.len() - 1;
        let rank = p.clamp(0.0, 1.0) * last as f64;
        let lower = rank.floor() as usize;

        if lower >= last {
            return self.0[last];
        }

        let fraction = rank - lower as f64;
        let floor = self.0[lower];
        let ceiling = self.0[lower + 1];
        floor + (ceiling - floor) * fraction
    }

    /// 25th, 50th and 75th percentiles.
    pub fn quartiles(&self) -> (f64, f64, f64) {
        (self.at(0.25), self.at(0.5), self.at(0.75))
    }

    pub fn median(&self) -> f64 {
        self.at(0.5)
    }

    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// IQR fences of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IqrBounds {
    /// Column the bounds were computed for.
    pub column: String,
    /// First quartile (25th percentile).
    pub q1: f64,
    /// Third quartile (75th percentile).
    pub q3: f64,
    /// Interquartile range `q3 - q1`.
    pub iqr: f64,
    /// `q1 - multiplier * iqr`.
    pub lower: f64,
    /// `q3 + multiplier * iqr`.
    pub upper: f64,
}

impl IqrBounds {
    /// Compute fences from a column's values; `None` when there are none.
    pub fn from_values(
        column: impl Into<String>,
        values: impl IntoIterator<Item = f64>,
        multiplier: f64,
    ) -> Option<Self> {
        let percentiles = Percentiles::new(values)?;
        Some(Self::from_percentiles(column, &percentiles, multiplier))
    }

    /// Compute fences from an already sorted sample.
    pub fn from_percentiles(
        column: impl Into<String>,
        percentiles: &Percentiles,
        multiplier: f64,
    ) -> Self {
        let q1 = percentiles.at(0.25);
        let q3 = percentiles.at(0.75);
        let iqr = q3 - q1;

        Self {
            column: column.into(),
            q1,
            q3,
            iqr,
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// True only for present values outside the fences.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}
