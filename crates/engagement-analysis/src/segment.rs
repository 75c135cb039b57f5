//! Fixed-boundary player segments and their count tables
//!
//! Two numeric columns are turned into labeled segments:
//!
//! | Segment | Source column | Bins |
//! |---|---|---|
//! | [`PlayerType`] | `SessionsPerWeek` | `(-1, 2]` Casual, `(2, 5]` Normal, `(5, 10]` Frequent, `(10, 19]` Hardcore |
//! | Session length | `AvgSessionDurationMinutes` | `[10, 40)`, `[40, 70)`, ... `[160, 180)` |
//!
//! Each segment is then counted against a second column (the hue), giving
//! the table behind a grouped count plot. Rows whose value falls outside
//! every bin, or whose hue is blank, are excluded from that table only.
//!
//! The session-length bins are left-closed, so they differ from pandas'
//! default `cut(..., right=True)` bins `(10, 40]`, `(40, 70]`, ... at every
//! edge. A 40-minute session is counted in `40-70` here where pandas would
//! put it in `10-40`, and a 10-minute session lands in `10-40` where pandas
//! would leave it outside every bin. Rows at exactly 180 minutes are
//! excluded.

use engagement_core::{Dataset, EngagementLevel};
use engagement_stats::binning::{Closed, IntervalBins};
use serde::Serialize;

/// Edges of the [`PlayerType`] bins over `SessionsPerWeek` (right-closed).
pub const PLAYER_TYPE_EDGES: [f64; 5] = [-1.0, 2.0, 5.0, 10.0, 19.0];

/// Edges of the session-length bins over `AvgSessionDurationMinutes`
/// (left-closed).
pub const SESSION_LENGTH_EDGES: [f64; 7] = [10.0, 40.0, 70.0, 100.0, 130.0, 160.0, 180.0];

pub const SESSION_LENGTH_LABELS: [&str; 6] =
    ["10-40", "40-70", "70-100", "100-130", "130-160", "160-179"];

/// Play-frequency segment derived from `SessionsPerWeek`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, derive_more::Display,
)]
pub enum PlayerType {
    Casual,
    Normal,
    Frequent,
    Hardcore,
}

impl PlayerType {
    pub const ALL: [Self; 4] = [Self::Casual, Self::Normal, Self::Frequent, Self::Hardcore];

    #[must_use]
    pub fn bins() -> IntervalBins {
        IntervalBins::new(PLAYER_TYPE_EDGES.to_vec(), Closed::Right)
            .expect("player type edges are strictly increasing")
    }

    /// Segments a weekly session count.
    ///
    /// ```
    /// use engagement_analysis::segment::PlayerType;
    ///
    /// assert_eq!(PlayerType::from_sessions_per_week(2.0), Some(PlayerType::Casual));
    /// assert_eq!(PlayerType::from_sessions_per_week(3.0), Some(PlayerType::Normal));
    /// assert_eq!(PlayerType::from_sessions_per_week(10.0), Some(PlayerType::Frequent));
    /// assert_eq!(PlayerType::from_sessions_per_week(11.0), Some(PlayerType::Hardcore));
    /// assert_eq!(PlayerType::from_sessions_per_week(20.0), None);
    /// ```
    #[must_use]
    pub fn from_sessions_per_week(sessions: f64) -> Option<Self> {
        Self::bins().assign(sessions).map(|idx| Self::ALL[idx])
    }
}

#[must_use]
pub fn session_length_bins() -> IntervalBins {
    IntervalBins::new(SESSION_LENGTH_EDGES.to_vec(), Closed::Left)
        .expect("session length edges are strictly increasing")
}

/// Label of the session-length bin containing `minutes`.
///
/// ```
/// use engagement_analysis::segment::session_length_label;
///
/// assert_eq!(session_length_label(10.0), Some("10-40"));
/// assert_eq!(session_length_label(40.0), Some("40-70"));
/// assert_eq!(session_length_label(179.0), Some("160-179"));
/// assert_eq!(session_length_label(180.0), None);
/// assert_eq!(session_length_label(5.0), None);
/// ```
#[must_use]
pub fn session_length_label(minutes: f64) -> Option<&'static str> {
    session_length_bins()
        .assign(minutes)
        .map(|idx| SESSION_LENGTH_LABELS[idx])
}

/// Row counts per (segment, hue) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentCounts {
    /// Every segment, including empty ones, in bin order.
    pub segments: Vec<String>,
    pub hues: Vec<String>,
    /// `counts[segment][hue]`
    pub counts: Vec<Vec<usize>>,
    /// Rows that could not be assigned to a segment or lacked a hue value.
    pub excluded: usize,
}

impl SegmentCounts {
    fn tally<I, F, K>(segments: Vec<String>, observations: I, hue_order: F) -> Self
    where
        I: IntoIterator<Item = Option<(usize, String)>>,
        F: Fn(&str) -> K,
        K: Ord,
    {
        let mut hues = Vec::<String>::new();
        let mut pairs = Vec::new();
        let mut excluded = 0;
        for observation in observations {
            let Some((segment, hue)) = observation else {
                excluded += 1;
                continue;
            };
            let hue_idx = if let Some(idx) = hues.iter().position(|h| *h == hue) {
                idx
            } else {
                hues.push(hue);
                hues.len() - 1
            };
            pairs.push((segment, hue_idx));
        }

        let mut order = (0..hues.len()).collect::<Vec<_>>();
        order.sort_by_key(|&idx| hue_order(&hues[idx]));
        let mut rank = vec![0; hues.len()];
        for (position, &idx) in order.iter().enumerate() {
            rank[idx] = position;
        }

        let mut counts = vec![vec![0; hues.len()]; segments.len()];
        for (segment, hue_idx) in pairs {
            counts[segment][rank[hue_idx]] += 1;
        }
        let hues = order.into_iter().map(|idx| hues[idx].clone()).collect();

        Self {
            segments,
            hues,
            counts,
            excluded,
        }
    }

    /// `PlayerType` × `EngagementLevel` counts.
    ///
    /// Known engagement levels are ordered Low, Medium, High; any other label
    /// follows in order of appearance.
    #[must_use]
    pub fn player_type_by_engagement(dataset: &Dataset) -> Self {
        let bins = PlayerType::bins();
        let view = Self::tally(
            PlayerType::ALL.iter().map(ToString::to_string).collect(),
            dataset.rows().iter().map(|row| {
                let segment = bins.assign(row.sessions_per_week?)?;
                Some((segment, row.engagement_level.clone()?))
            }),
            |hue| EngagementLevel::from_label(hue).map_or(u8::MAX, EngagementLevel::ordinal),
        );
        if view.excluded > 0 {
            log::warn!(
                "player type: excluded {} rows outside the session-count bins or unlabeled",
                view.excluded
            );
        }
        view
    }

    /// Session length × `InGamePurchases` counts, purchase values ascending.
    #[must_use]
    pub fn session_length_by_purchases(dataset: &Dataset) -> Self {
        let bins = session_length_bins();
        let view = Self::tally(
            SESSION_LENGTH_LABELS.map(str::to_owned).to_vec(),
            dataset.rows().iter().map(|row| {
                let segment = bins.assign(row.avg_session_duration_minutes?)?;
                Some((segment, row.in_game_purchases?.to_string()))
            }),
            |hue| hue.parse::<i64>().unwrap_or(i64::MAX),
        );
        if view.excluded > 0 {
            log::warn!(
                "session length: excluded {} rows outside the duration bins",
                view.excluded
            );
        }
        view
    }

    #[must_use]
    pub fn count(&self, segment: &str, hue: &str) -> Option<usize> {
        let s = self.segments.iter().position(|l| l == segment)?;
        let h = self.hues.iter().position(|l| l == hue)?;
        Some(self.counts[s][h])
    }

    /// Total rows counted in `segment` across all hues.
    #[must_use]
    pub fn segment_total(&self, segment: &str) -> Option<usize> {
        let s = self.segments.iter().position(|l| l == segment)?;
        Some(self.counts[s].iter().sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::row;

    #[test]
    fn test_player_type_boundaries() {
        let cases = [
            (0.0, Some(PlayerType::Casual)),
            (2.0, Some(PlayerType::Casual)),
            (3.0, Some(PlayerType::Normal)),
            (5.0, Some(PlayerType::Normal)),
            (6.0, Some(PlayerType::Frequent)),
            (10.0, Some(PlayerType::Frequent)),
            (11.0, Some(PlayerType::Hardcore)),
            (19.0, Some(PlayerType::Hardcore)),
            (-1.0, None),
            (20.0, None),
            (f64::NAN, None),
        ];
        for (sessions, expected) in cases {
            assert_eq!(
                PlayerType::from_sessions_per_week(sessions),
                expected,
                "sessions = {sessions}"
            );
        }
    }

    #[test]
    fn test_session_length_boundaries() {
        assert_eq!(session_length_label(9.0), None);
        assert_eq!(session_length_label(10.0), Some("10-40"));
        assert_eq!(session_length_label(39.0), Some("10-40"));
        assert_eq!(session_length_label(40.0), Some("40-70"));
        assert_eq!(session_length_label(70.0), Some("70-100"));
        assert_eq!(session_length_label(160.0), Some("160-179"));
        assert_eq!(session_length_label(179.0), Some("160-179"));
        assert_eq!(session_length_label(180.0), None);
    }

    #[test]
    fn test_player_type_by_engagement() {
        let rows = vec![
            row("High", 12.0, 60.0),
            row("High", 15.0, 60.0),
            row("Low", 1.0, 60.0),
            row("Medium", 4.0, 60.0),
            row("Low", 30.0, 60.0),
        ];
        let view = SegmentCounts::player_type_by_engagement(&Dataset::from_rows(rows));

        assert_eq!(view.segments, ["Casual", "Normal", "Frequent", "Hardcore"]);
        assert_eq!(view.hues, ["Low", "Medium", "High"]);
        assert_eq!(view.excluded, 1);
        assert_eq!(view.count("Hardcore", "High"), Some(2));
        assert_eq!(view.count("Casual", "Low"), Some(1));
        assert_eq!(view.count("Normal", "Medium"), Some(1));
        assert_eq!(view.segment_total("Frequent"), Some(0));
    }

    #[test]
    fn test_blank_engagement_is_excluded() {
        let mut rows = vec![row("Low", 1.0, 60.0), row("Low", 1.0, 60.0)];
        rows[0].engagement_level = None;
        let view = SegmentCounts::player_type_by_engagement(&Dataset::from_rows(rows));
        assert_eq!(view.hues, ["Low"]);
        assert_eq!(view.excluded, 1);
        assert_eq!(view.count("Casual", ""), None);
        assert_eq!(view.segment_total("Casual"), Some(1));
    }

    #[test]
    fn test_unknown_engagement_sorts_last() {
        let rows = vec![row("Extreme", 1.0, 60.0), row("High", 1.0, 60.0)];
        let view = SegmentCounts::player_type_by_engagement(&Dataset::from_rows(rows));
        assert_eq!(view.hues, ["High", "Extreme"]);
        assert_eq!(view.count("Casual", "Extreme"), Some(1));
    }

    #[test]
    fn test_session_length_by_purchases() {
        let mut rows = vec![
            row("Low", 1.0, 10.0),
            row("Low", 1.0, 45.0),
            row("Low", 1.0, 45.0),
            row("Low", 1.0, 179.0),
            row("Low", 1.0, 180.0),
        ];
        rows[1].in_game_purchases = Some(1);
        rows[3].in_game_purchases = Some(1);
        let view = SegmentCounts::session_length_by_purchases(&Dataset::from_rows(rows));

        assert_eq!(view.segments.len(), 6);
        assert_eq!(view.hues, ["0", "1"]);
        assert_eq!(view.excluded, 1);
        assert_eq!(view.count("10-40", "0"), Some(1));
        assert_eq!(view.count("40-70", "0"), Some(1));
        assert_eq!(view.count("40-70", "1"), Some(1));
        assert_eq!(view.count("160-179", "1"), Some(1));
    }
}
