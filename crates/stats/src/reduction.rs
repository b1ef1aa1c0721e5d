//! Named reduction methods shared by the ensemble and peak-flow paths.

use std::fmt;
use std::str::FromStr;

use crate::error::StatsError;

/// A method collapsing a series of values into one scalar.
///
/// Used on both axes of the ensemble statistic: across members for each
/// time step, then across time for the collapsed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Arithmetic mean.
    Mean,
    /// Mean plus population standard deviation.
    MeanPlusStd,
    /// Mean minus population standard deviation.
    MeanMinusStd,
    /// Maximum (NaN ignored).
    Max,
    /// Minimum (NaN ignored).
    Min,
}

impl Reduction {
    /// All methods in a stable order.
    pub const ALL: [Reduction; 5] = [
        Reduction::Mean,
        Reduction::MeanPlusStd,
        Reduction::MeanMinusStd,
        Reduction::Max,
        Reduction::Min,
    ];

    /// Canonical snake_case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::MeanPlusStd => "mean_plus_std",
            Self::MeanMinusStd => "mean_minus_std",
            Self::Max => "max",
            Self::Min => "min",
        }
    }

    /// Reduce `data` to a single value. Empty input yields 0.0.
    pub fn apply(self, data: &[f64]) -> f64 {
        match self {
            Self::Mean => crate::mean(data),
            Self::MeanPlusStd => crate::mean(data) + crate::pop_sd(data),
            Self::MeanMinusStd => crate::mean(data) - crate::pop_sd(data),
            Self::Max => crate::max(data),
            Self::Min => crate::min(data),
        }
    }
}

impl FromStr for Reduction {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == name)
            .ok_or_else(|| StatsError::UnknownReduction {
                name: s.to_string(),
            })
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
