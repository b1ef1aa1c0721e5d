//! Statistical helper functions for floodprep discharge reductions.
//!
//! All functions operate on plain `&[f64]` slices. Standard deviations use
//! the population (N) denominator so ensemble statistics match the
//! historical AutoRoute preparation output.

mod error;
mod reduction;

pub use error::StatsError;
pub use reduction::Reduction;

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Population variance with N denominator. Returns 0.0 if empty.
pub fn pop_variance(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let m = mean(data);
    data.iter().map(|&x| (x - m) * (x - m)).sum::<f64>() / data.len() as f64
}

/// Population standard deviation with N denominator. Returns 0.0 if empty.
pub fn pop_sd(data: &[f64]) -> f64 {
    pop_variance(data).sqrt()
}

/// Largest value in the slice, ignoring NaN.
///
/// Returns 0.0 if the slice is empty and NaN if every value is NaN.
pub fn max(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().copied().fold(f64::NAN, f64::max)
}

/// Smallest value in the slice, ignoring NaN.
///
/// Returns 0.0 if the slice is empty and NaN if every value is NaN.
pub fn min(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().copied().fold(f64::NAN, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_pop_sd() {
        // Classic textbook example: population sd is exactly 2.
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(pop_sd(&data), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pop_variance_single() {
        assert_eq!(pop_variance(&[5.0]), 0.0);
    }

    #[test]
    fn test_pop_variance_two() {
        // [3.0, 7.0]: mean=5, sum_sq=8, var=8/2=4
        assert_relative_eq!(pop_variance(&[3.0, 7.0]), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_pop_variance_empty() {
        assert_eq!(pop_variance(&[]), 0.0);
    }

    #[test]
    fn test_max_min() {
        let data = [3.0, -1.5, 8.25, 0.0];
        assert_eq!(max(&data), 8.25);
        assert_eq!(min(&data), -1.5);
    }

    #[test]
    fn test_max_min_skip_nan() {
        let data = [f64::NAN, 2.0, f64::NAN, 5.0];
        assert_eq!(max(&data), 5.0);
        assert_eq!(min(&data), 2.0);
    }

    #[test]
    fn test_max_all_nan() {
        assert!(max(&[f64::NAN, f64::NAN]).is_nan());
    }

    #[test]
    fn test_max_min_empty() {
        assert_eq!(max(&[]), 0.0);
        assert_eq!(min(&[]), 0.0);
    }
}
