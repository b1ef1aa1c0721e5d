//! Fixed shapes of the upstream ensemble forecast product.
//!
//! These offsets match the product's known output lengths and are not
//! derived from anything else. Change them only alongside the product.

/// Member number of the high-resolution control run.
pub const CONTROL_MEMBER: u32 = 52;

/// Width of the second-half buffer.
pub const SECOND_HALF_LEN: usize = 20;

/// Default first-half width.
pub const FIRST_HALF_DEFAULT: usize = 40;

/// First-half width for 41- and 61-step products.
pub const FIRST_HALF_SHORT: usize = 41;

/// First-half width for 85- and 125-step products.
pub const FIRST_HALF_FULL: usize = 65;

/// Sample count of a full-length control run.
pub(crate) const CONTROL_FULL_LEN: usize = 125;

/// End of the hourly segment in a control series.
pub(crate) const HOURLY_END: usize = 90;

/// End of the 3-hourly segment in a full-length control series.
pub(crate) const THREE_HOURLY_END: usize = 109;

/// Stride picking 6-hourly samples from the hourly segment.
pub(crate) const HOURLY_TO_6H: usize = 6;

/// Stride picking 3-hourly samples from the hourly segment.
pub(crate) const HOURLY_TO_3H: usize = 3;

/// Stride picking 6-hourly samples from the 3-hourly segment.
pub(crate) const THREE_HOURLY_TO_6H: usize = 2;

/// First-half width for a product whose first file has `size_time` steps.
pub fn first_half_len(size_time: usize) -> usize {
    match size_time {
        41 | 61 => FIRST_HALF_SHORT,
        85 | 125 => FIRST_HALF_FULL,
        _ => FIRST_HALF_DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_half_by_product_length() {
        assert_eq!(first_half_len(41), 41);
        assert_eq!(first_half_len(61), 41);
        assert_eq!(first_half_len(85), 65);
        assert_eq!(first_half_len(125), 65);
        assert_eq!(first_half_len(60), 40);
        assert_eq!(first_half_len(0), 40);
    }
}
