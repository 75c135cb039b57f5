//! Pairwise relationship between `SessionsPerWeek` and `PlayTimeHours`
//!
//! Answers whether players who play more often also accumulate more play
//! time: a mean per distinct session count plus a least-squares line over
//! all rows.

use engagement_core::Dataset;
use engagement_stats::{descriptive, regression::LinearFit};
use serde::Serialize;

/// Mean play time of all players sharing one `SessionsPerWeek` value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMean {
    pub sessions_per_week: f64,
    pub mean_play_time_hours: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionsVsPlaytime {
    /// Group means in ascending `SessionsPerWeek` order.
    pub group_means: Vec<GroupMean>,
    /// `PlayTimeHours ~ SessionsPerWeek` fit; `None` with fewer than two
    /// distinct session counts.
    pub fit: Option<LinearFit>,
    /// Rows lacking either value.
    pub excluded: usize,
}

impl SessionsVsPlaytime {
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut points = dataset
            .rows()
            .iter()
            .filter_map(|row| {
                let x = row.sessions_per_week.filter(|v| v.is_finite())?;
                let y = row.play_time_hours.filter(|v| v.is_finite())?;
                Some((x, y))
            })
            .collect::<Vec<_>>();
        let excluded = dataset.len() - points.len();
        if excluded > 0 {
            log::warn!("sessions vs play time: excluded {excluded} rows with missing values");
        }

        points.sort_by(|(a, _), (b, _)| a.total_cmp(b));
        let group_means = points
            .chunk_by(|(a, _), (b, _)| a.total_cmp(b).is_eq())
            .filter_map(|group| {
                Some(GroupMean {
                    sessions_per_week: group[0].0,
                    mean_play_time_hours: descriptive::mean(group.iter().map(|(_, y)| *y))?,
                    count: group.len(),
                })
            })
            .collect();
        let fit = LinearFit::new(points);

        Self {
            group_means,
            fit,
            excluded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::row;

    #[test]
    fn test_group_means_and_fit() {
        let mut rows = vec![
            row("High", 2.0, 10.0),
            row("High", 2.0, 20.0),
            row("Low", 4.0, 30.0),
            row("Low", 6.0, 40.0),
        ];
        rows[0].play_time_hours = Some(10.0);
        rows[1].play_time_hours = Some(20.0);
        rows[2].play_time_hours = Some(30.0);
        rows[3].play_time_hours = Some(40.0);
        let view = SessionsVsPlaytime::from_dataset(&Dataset::from_rows(rows));

        assert_eq!(view.excluded, 0);
        assert_eq!(view.group_means.len(), 3);
        assert_eq!(view.group_means[0].sessions_per_week, 2.0);
        assert_eq!(view.group_means[0].mean_play_time_hours, 15.0);
        assert_eq!(view.group_means[0].count, 2);
        assert_eq!(view.group_means[2].mean_play_time_hours, 40.0);

        let fit = view.fit.unwrap();
        assert!(fit.slope > 0.0);
        assert_eq!(fit.count, 4);
    }

    #[test]
    fn test_missing_values_are_excluded() {
        let mut rows = vec![row("High", 2.0, 10.0), row("High", 3.0, 10.0)];
        rows[1].play_time_hours = None;
        let view = SessionsVsPlaytime::from_dataset(&Dataset::from_rows(rows));
        assert_eq!(view.excluded, 1);
        assert_eq!(view.group_means.len(), 1);
        assert!(view.fit.is_none());
    }
}
