//! Mean engagement over binned `PlayerLevel` × `AchievementsUnlocked`
//!
//! Both columns are cut into [`NUM_BINS`] equal-width bins over their
//! observed range, and each cell holds the mean of the ordinally encoded
//! engagement level (`Low = 0`, `Medium = 1`, `High = 2`, see
//! [`EngagementLevel::ordinal`]). Averaging a categorical label is a
//! heuristic: it shows where progression and engagement move together.
//!
//! Rows with a missing level or achievement count, or with an engagement
//! label outside Low/Medium/High, are excluded from this view.

use engagement_core::{Dataset, DatasetRow, EngagementLevel};
use engagement_stats::binning::{Interval, IntervalBins};
use serde::Serialize;

/// Number of equal-width bins per axis.
pub const NUM_BINS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementHeatmap {
    /// `PlayerLevel` intervals (rows), ascending.
    pub level_bins: Vec<Interval>,
    /// `AchievementsUnlocked` intervals (columns), ascending.
    pub achievement_bins: Vec<Interval>,
    /// `mean_engagement[level][achievement]`; `None` for empty cells.
    pub mean_engagement: Vec<Vec<Option<f64>>>,
    /// `counts[level][achievement]`
    pub counts: Vec<Vec<usize>>,
    pub excluded: usize,
}

impl EngagementHeatmap {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let rows = dataset.rows();
        let level_bins =
            IntervalBins::equal_width(rows.iter().filter_map(|r| r.player_level), NUM_BINS);
        let achievement_bins = IntervalBins::equal_width(
            rows.iter().filter_map(|r| r.achievements_unlocked),
            NUM_BINS,
        );
        let (Some(level_bins), Some(achievement_bins)) = (level_bins, achievement_bins) else {
            log::warn!("engagement heatmap: no level/achievement values to bin");
            return Self {
                level_bins: vec![],
                achievement_bins: vec![],
                mean_engagement: vec![],
                counts: vec![],
                excluded: rows.len(),
            };
        };

        let mut sums = vec![vec![0_u64; achievement_bins.len()]; level_bins.len()];
        let mut counts = vec![vec![0_usize; achievement_bins.len()]; level_bins.len()];
        let mut excluded = 0;
        for row in rows {
            let Some((level, achievement, engagement)) =
                locate(row, &level_bins, &achievement_bins)
            else {
                excluded += 1;
                continue;
            };
            sums[level][achievement] += u64::from(engagement.ordinal());
            counts[level][achievement] += 1;
        }
        if excluded > 0 {
            log::warn!("engagement heatmap: excluded {excluded} rows");
        }

        let mean_engagement = sums
            .iter()
            .zip(&counts)
            .map(|(sum_row, count_row)| {
                sum_row
                    .iter()
                    .zip(count_row)
                    .map(|(&sum, &count)| (count > 0).then(|| sum as f64 / count as f64))
                    .collect()
            })
            .collect();

        Self {
            level_bins: level_bins.intervals().collect(),
            achievement_bins: achievement_bins.intervals().collect(),
            mean_engagement,
            counts,
            excluded,
        }
    }

    /// Mean encoded engagement of the cell containing the given values.
    #[must_use]
    pub fn mean_at(&self, level: f64, achievements: f64) -> Option<f64> {
        let l = self.level_bins.iter().position(|i| i.contains(level))?;
        let a = self
            .achievement_bins
            .iter()
            .position(|i| i.contains(achievements))?;
        self.mean_engagement[l][a]
    }
}

fn locate(
    row: &DatasetRow,
    level_bins: &IntervalBins,
    achievement_bins: &IntervalBins,
) -> Option<(usize, usize, EngagementLevel)> {
    let level = level_bins.assign(row.player_level?)?;
    let achievement = achievement_bins.assign(row.achievements_unlocked?)?;
    Some((level, achievement, row.engagement()?))
}
