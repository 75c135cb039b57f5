//! Target class distribution
//!
//! Share of rows per `EngagementLevel` label, used to judge class balance.

use engagement_core::Dataset;
use serde::Serialize;

/// Share of one label in the distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassShare {
    pub label: String,
    pub count: usize,
    /// Percentage of all rows, in `0.0..=100.0`.
    pub percent: f64,
}

/// Normalized frequency of each `EngagementLevel` value.
///
/// Entries are ordered by descending count; equal counts keep the order in
/// which the labels first appear in the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassDistribution {
    pub total: usize,
    pub shares: Vec<ClassShare>,
    /// Rows with a blank `EngagementLevel` cell, not part of `total`.
    pub excluded: usize,
}

impl ClassDistribution {
    /// Computes the distribution over arbitrary labels.
    ///
    /// # Examples
    ///
    /// ```
    /// use engagement_analysis::distribution::ClassDistribution;
    ///
    /// let labels = ["Low", "Low", "Medium", "Medium", "Medium", "High"];
    /// let dist = ClassDistribution::from_labels(labels);
    ///
    /// assert_eq!(dist.percent_of("Medium"), Some(50.0));
    /// assert_eq!(dist.rounded_percent_of("Low", 2), Some(33.33));
    /// assert_eq!(dist.rounded_percent_of("High", 2), Some(16.67));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for label in labels {
            let label = label.as_ref();
            match counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, count)) => *count += 1,
                None => counts.push((label.to_owned(), 1)),
            }
        }
        counts.sort_by(|(_, a), (_, b)| b.cmp(a));

        let total = counts.iter().map(|(_, c)| c).sum::<usize>();
        let shares = counts
            .into_iter()
            .map(|(label, count)| ClassShare {
                label,
                count,
                percent: count as f64 / total as f64 * 100.0,
            })
            .collect();
        Self {
            total,
            shares,
            excluded: 0,
        }
    }

    /// Distribution of the dataset's `EngagementLevel` column.
    ///
    /// Rows whose label is blank are left out of the percentages and counted
    /// in `excluded`.
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let rows = dataset.rows();
        let mut dist =
            Self::from_labels(rows.iter().filter_map(|row| row.engagement_level.as_deref()));
        dist.excluded = rows.len() - dist.total;
        if dist.excluded > 0 {
            log::warn!(
                "class distribution: excluded {} rows without an engagement level",
                dist.excluded
            );
        }
        dist
    }

    #[must_use]
    pub fn percent_of(&self, label: &str) -> Option<f64> {
        self.shares
            .iter()
            .find(|share| share.label == label)
            .map(|share| share.percent)
    }

    /// Percentage of `label` rounded to `decimals` places.
    #[must_use]
    pub fn rounded_percent_of(&self, label: &str, decimals: i32) -> Option<f64> {
        self.percent_of(label).map(|p| crate::round_to(p, decimals))
    }

    /// Sum of all percentages; 100 for any non-empty dataset.
    #[must_use]
    pub fn total_percent(&self) -> f64 {
        self.shares.iter().map(|share| share.percent).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_decimal_distribution() {
        let dist =
            ClassDistribution::from_labels(["Low", "Low", "Medium", "Medium", "Medium", "High"]);
        assert_eq!(dist.total, 6);
        let labels = dist
            .shares
            .iter()
            .map(|s| s.label.as_str())
            .collect::<Vec<_>>();
        assert_eq!(labels, ["Medium", "Low", "High"]);
        assert_eq!(dist.rounded_percent_of("Low", 2), Some(33.33));
        assert_eq!(dist.rounded_percent_of("Medium", 2), Some(50.0));
        assert_eq!(dist.rounded_percent_of("High", 2), Some(16.67));
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let labels = (0..997).map(|i| match i % 7 {
            0 | 1 => "Low",
            2..=5 => "Medium",
            _ => "High",
        });
        let dist = ClassDistribution::from_labels(labels);
        assert!((dist.total_percent() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let dist = ClassDistribution::from_labels(["High", "Low", "Low", "High"]);
        assert_eq!(dist.shares[0].label, "High");
        assert_eq!(dist.shares[1].label, "Low");
    }

    #[test]
    fn test_unknown_labels_are_counted() {
        let dist = ClassDistribution::from_labels(["Low", "Extreme"]);
        assert_eq!(dist.percent_of("Extreme"), Some(50.0));
        assert_eq!(dist.percent_of("High"), None);
    }

    #[test]
    fn test_blank_labels_are_excluded() {
        let mut rows = vec![
            crate::test_util::row("Low", 1.0, 20.0),
            crate::test_util::row("High", 12.0, 90.0),
            crate::test_util::row("High", 14.0, 120.0),
        ];
        rows[0].engagement_level = None;
        let dist = ClassDistribution::from_dataset(&Dataset::from_rows(rows));
        assert_eq!(dist.total, 2);
        assert_eq!(dist.excluded, 1);
        assert_eq!(dist.percent_of(""), None);
        assert_eq!(dist.percent_of("Low"), None);
        assert_eq!(dist.percent_of("High"), Some(100.0));
    }

    #[test]
    fn test_empty_distribution() {
        let dist = ClassDistribution::from_labels(std::iter::empty::<&str>());
        assert_eq!(dist.total, 0);
        assert_eq!(dist.excluded, 0);
        assert!(dist.shares.is_empty());
        assert_eq!(dist.total_percent(), 0.0);
    }
}
