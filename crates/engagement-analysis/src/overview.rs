//! Dataset overview: shape and per-column descriptive statistics.

use engagement_core::{Dataset, DatasetRow};
use engagement_stats::descriptive::DescriptiveStats;
use serde::Serialize;

type NumericAccessor = fn(&DatasetRow) -> Option<f64>;

#[expect(clippy::cast_precision_loss)]
fn numeric_columns() -> [(&'static str, NumericAccessor); 8] {
    [
        ("PlayerID", |r| r.player_id.map(|v| v as f64)),
        ("Age", |r| r.age),
        ("PlayTimeHours", |r| r.play_time_hours),
        ("InGamePurchases", |r| r.in_game_purchases.map(|v| v as f64)),
        ("SessionsPerWeek", |r| r.sessions_per_week),
        ("AvgSessionDurationMinutes", |r| r.avg_session_duration_minutes),
        ("PlayerLevel", |r| r.player_level),
        ("AchievementsUnlocked", |r| r.achievements_unlocked),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    /// `None` when the column has no usable value.
    pub stats: Option<DescriptiveStats>,
    /// Rows with a missing or unparseable value.
    pub missing: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: Vec<String>,
    /// Numeric columns present in the dataset, in a fixed order.
    pub numeric: Vec<ColumnSummary>,
}

impl DatasetOverview {
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let numeric = numeric_columns()
            .into_iter()
            .filter(|(name, _)| dataset.columns().iter().any(|c| c == name))
            .map(|(name, accessor)| {
                let values = dataset
                    .rows()
                    .iter()
                    .filter_map(accessor)
                    .filter(|v| v.is_finite())
                    .collect::<Vec<_>>();
                ColumnSummary {
                    column: name.to_owned(),
                    missing: dataset.len() - values.len(),
                    stats: DescriptiveStats::new(values),
                }
            })
            .collect();

        Self {
            rows: dataset.len(),
            columns: dataset.columns().to_vec(),
            numeric,
        }
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnSummary> {
        self.numeric.iter().find(|c| c.column == name)
    }
}
