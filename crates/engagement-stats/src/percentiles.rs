use serde::Serialize;

/// Five-number summary of a dataset, the numbers behind a box plot.
///
/// # Examples
///
/// ```
/// use engagement_stats::percentiles::FiveNumberSummary;
///
/// let summary = FiveNumberSummary::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(summary.q1, 2.0);
/// assert_eq!(summary.median, 3.0);
/// assert_eq!(summary.q3, 4.0);
/// assert_eq!(summary.iqr(), 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumberSummary {
    pub min: f64,
    /// 25th percentile.
    pub q1: f64,
    pub median: f64,
    /// 75th percentile.
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Computes the summary from unsorted values, skipping non-finite ones.
    ///
    /// Returns `None` if no finite value is present.
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values
            .into_iter()
            .filter(|v| v.is_finite())
            .collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted)
    }

    /// Computes the summary from values sorted in ascending order.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        Some(Self {
            min: *sorted_values.first()?,
            q1: compute_percentile(sorted_values, 25.0),
            median: compute_percentile(sorted_values, 50.0),
            q3: compute_percentile(sorted_values, 75.0),
            max: *sorted_values.last()?,
        })
    }

    /// Interquartile range (`q3 - q1`).
    #[must_use]
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Computes a single percentile value from sorted data.
///
/// Uses linear interpolation between the two closest ranks: for `n` values
/// the `k`-th percentile sits at fractional position `(n - 1) * k / 100`.
/// This is the convention used by box plots over tabular data.
///
/// # Arguments
///
/// * `sorted_values` - Values sorted in ascending order
/// * `percentile` - The percentile to compute (0.0 to 100.0, clamped)
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use engagement_stats::percentiles::compute_percentile;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0];
///
/// assert_eq!(compute_percentile(&values, 50.0), 2.5);
/// assert_eq!(compute_percentile(&values, 0.0), 1.0);
/// assert_eq!(compute_percentile(&values, 100.0), 4.0);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    if sorted_values.is_empty() {
        return f64::NAN;
    }
    let rank = (sorted_values.len() - 1) as f64 * percentile.clamp(0.0, 100.0) / 100.0;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_empty_is_nan() {
        assert!(compute_percentile(&[], 50.0).is_nan());
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(compute_percentile(&values, 25.0), 20.0);
        assert!((compute_percentile(&values, 10.0) - 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_percentile_clamps_out_of_range() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(compute_percentile(&values, -5.0), 1.0);
        assert_eq!(compute_percentile(&values, 150.0), 3.0);
    }

    #[test]
    fn test_five_number_summary_even_count() {
        let summary = FiveNumberSummary::new([4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.q1, 1.75);
        assert_eq!(summary.median, 2.5);
        assert_eq!(summary.q3, 3.25);
        assert_eq!(summary.max, 4.0);
    }

    #[test]
    fn test_five_number_summary_empty() {
        assert!(FiveNumberSummary::new([f64::NAN]).is_none());
    }
}
