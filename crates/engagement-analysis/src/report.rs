use engagement_core::Dataset;
use serde::Serialize;

use crate::{
    crosstab::CrossTab, distribution::ClassDistribution, heatmap::EngagementHeatmap,
    overview::DatasetOverview, relationship::SessionsVsPlaytime, segment::SegmentCounts,
    spread::GenreSessionDuration,
};

/// Every exploration view computed over one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorationReport {
    pub overview: DatasetOverview,
    pub class_distribution: ClassDistribution,
    pub sessions_vs_playtime: SessionsVsPlaytime,
    pub genre_session_duration: GenreSessionDuration,
    pub genre_difficulty: CrossTab,
    pub player_type_engagement: SegmentCounts,
    pub session_length_purchases: SegmentCounts,
    pub level_achievement_heatmap: EngagementHeatmap,
}

impl ExplorationReport {
    /// Runs one full aggregation pass. The dataset is only read.
    #[must_use]
    pub fn build(dataset: &Dataset) -> Self {
        log::info!("Aggregating {} rows", dataset.len());
        Self {
            overview: DatasetOverview::from_dataset(dataset),
            class_distribution: ClassDistribution::from_dataset(dataset),
            sessions_vs_playtime: SessionsVsPlaytime::from_dataset(dataset),
            genre_session_duration: GenreSessionDuration::from_dataset(dataset),
            genre_difficulty: CrossTab::genre_by_difficulty(dataset),
            player_type_engagement: SegmentCounts::player_type_by_engagement(dataset),
            session_length_purchases: SegmentCounts::session_length_by_purchases(dataset),
            level_achievement_heatmap: EngagementHeatmap::from_dataset(dataset),
        }
    }
}
