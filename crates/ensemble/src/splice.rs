//! Control member splicing.

use crate::constants::{
    CONTROL_FULL_LEN, FIRST_HALF_FULL, HOURLY_END, HOURLY_TO_3H, HOURLY_TO_6H, THREE_HOURLY_END,
    THREE_HOURLY_TO_6H,
};

/// How a control series is resampled onto the first-half cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlRegime {
    /// Full-resolution products (first half of 65): the hourly segment is
    /// thinned to 3-hourly and the 3/6-hourly tail is kept as is.
    ThreeHourly,
    /// Coarser products fed a 125-sample control: hourly and 3-hourly
    /// segments are thinned to 6-hourly, the 6-hourly tail is kept.
    SixHourly,
    /// Anything else: used as is.
    Unmodified,
}

impl ControlRegime {
    /// Regime for a control of `len` samples stored into a first half of
    /// `first_half_len` samples.
    pub fn select(first_half_len: usize, len: usize) -> Self {
        if first_half_len == FIRST_HALF_FULL {
            Self::ThreeHourly
        } else if len == CONTROL_FULL_LEN {
            Self::SixHourly
        } else {
            Self::Unmodified
        }
    }
}

fn strided(series: &[f64], start: usize, end: usize, step: usize) -> impl Iterator<Item = f64> + '_ {
    let end = end.min(series.len());
    let start = start.min(end);
    series[start..end].iter().step_by(step).copied()
}

fn strided_len(len: usize, start: usize, end: usize, step: usize) -> usize {
    let end = end.min(len);
    (end - start.min(end)).div_ceil(step)
}

/// Length of [`splice_control`]'s output for a control of `len` samples.
pub fn spliced_len(first_half_len: usize, len: usize) -> usize {
    match ControlRegime::select(first_half_len, len) {
        ControlRegime::ThreeHourly => {
            strided_len(len, 0, HOURLY_END, HOURLY_TO_3H) + strided_len(len, HOURLY_END, len, 1)
        }
        ControlRegime::SixHourly => {
            strided_len(len, 0, HOURLY_END, HOURLY_TO_6H)
                + strided_len(len, HOURLY_END, THREE_HOURLY_END, THREE_HOURLY_TO_6H)
                + strided_len(len, THREE_HOURLY_END, len, 1)
        }
        ControlRegime::Unmodified => len,
    }
}

/// Resample a control series for a first half of `first_half_len` samples.
///
/// Pure in the sample count and values: the same input always yields the
/// same output.
pub fn splice_control(first_half_len: usize, series: &[f64]) -> Vec<f64> {
    let n = series.len();
    match ControlRegime::select(first_half_len, n) {
        ControlRegime::ThreeHourly => strided(series, 0, HOURLY_END, HOURLY_TO_3H)
            .chain(strided(series, HOURLY_END, n, 1))
            .collect(),
        ControlRegime::SixHourly => strided(series, 0, HOURLY_END, HOURLY_TO_6H)
            .chain(strided(series, HOURLY_END, THREE_HOURLY_END, THREE_HOURLY_TO_6H))
            .chain(strided(series, THREE_HOURLY_END, n, 1))
            .collect(),
        ControlRegime::Unmodified => series.to_vec(),
    }
}
