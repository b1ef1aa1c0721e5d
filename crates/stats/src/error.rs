//! Error types for the floodprep-stats crate.

/// Error type for all fallible operations in the floodprep-stats crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// Returned when a reduction method name is not recognised.
    #[error(
        "unknown reduction method '{name}' (expected mean, mean_plus_std, mean_minus_std, max or min)"
    )]
    UnknownReduction {
        /// The name that failed to parse.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_reduction() {
        let e = StatsError::UnknownReduction {
            name: "median".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "unknown reduction method 'median' (expected mean, mean_plus_std, mean_minus_std, max or min)"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<StatsError>();
    }
}
