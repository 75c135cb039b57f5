use engagement_core::PlayerRecord;
use serde::Serialize;

/// Column names of the single-row frame built from a [`PlayerRecord`], in
/// the order the model was trained with.
pub const FEATURE_COLUMNS: [&str; 12] = [
    "PlayerID",
    "Age",
    "Gender",
    "Location",
    "GameGenre",
    "PlayTimeHours",
    "InGamePurchases",
    "GameDifficulty",
    "SessionsPerWeek",
    "AvgSessionDurationMinutes",
    "PlayerLevel",
    "AchievementsUnlocked",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Numeric(f64),
    Categorical(String),
}

impl FeatureValue {
    #[must_use]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Numeric(v) => Some(*v),
            Self::Categorical(_) => None,
        }
    }

    #[must_use]
    pub fn as_categorical(&self) -> Option<&str> {
        match self {
            Self::Numeric(_) => None,
            Self::Categorical(v) => Some(v),
        }
    }
}

/// A single named row handed to a classifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FeatureRow {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column, replacing any existing column with the same name.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: FeatureValue) -> Self {
        let name = name.into();
        self.columns.retain(|(n, _)| *n != name);
        self.columns.push((name, value));
        self
    }

    /// Removes a column if present.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.columns.retain(|(n, _)| n != name);
        self
    }

    /// Builds the frame for one player, numeric flags encoded as `0`/`1`.
    ///
    /// ```
    /// # use engagement_core::{GameDifficulty, GameGenre, Gender, Location, PlayerRecord};
    /// use engagement_inference::frame::{FEATURE_COLUMNS, FeatureRow, FeatureValue};
    ///
    /// # let record = PlayerRecord {
    /// #     player_id: 9000, age: 25, gender: Gender::Male, location: Location::Usa,
    /// #     game_genre: GameGenre::Action, play_time_hours: 10.0, in_game_purchases: true,
    /// #     game_difficulty: GameDifficulty::Easy, sessions_per_week: 3,
    /// #     avg_session_duration_minutes: 45, player_level: 5, achievements_unlocked: 10,
    /// # };
    /// let row = FeatureRow::from_record(&record);
    /// assert!(row.names().eq(FEATURE_COLUMNS));
    /// assert_eq!(row.get("Location"), Some(&FeatureValue::Categorical("USA".into())));
    /// assert_eq!(row.get("InGamePurchases"), Some(&FeatureValue::Numeric(1.0)));
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_record(record: &PlayerRecord) -> Self {
        use FeatureValue::{Categorical, Numeric};

        let values = [
            Numeric(record.player_id as f64),
            Numeric(f64::from(record.age)),
            Categorical(record.gender.as_str().to_owned()),
            Categorical(record.location.as_str().to_owned()),
            Categorical(record.game_genre.as_str().to_owned()),
            Numeric(record.play_time_hours),
            Numeric(f64::from(u8::from(record.in_game_purchases))),
            Categorical(record.game_difficulty.as_str().to_owned()),
            Numeric(f64::from(record.sessions_per_week)),
            Numeric(f64::from(record.avg_session_duration_minutes)),
            Numeric(f64::from(record.player_level)),
            Numeric(f64::from(record.achievements_unlocked)),
        ];
        Self {
            columns: FEATURE_COLUMNS
                .iter()
                .map(|name| (*name).to_owned())
                .zip(values)
                .collect(),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FeatureValue)> + '_ {
        self.columns.iter().map(|(n, v)| (n.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::sample_record;

    #[test]
    fn test_frame_has_every_column_once() {
        let row = FeatureRow::from_record(&sample_record());
        assert_eq!(row.len(), FEATURE_COLUMNS.len());
        assert_eq!(row.get("Age"), Some(&FeatureValue::Numeric(25.0)));
        assert_eq!(row.get("GameGenre").and_then(FeatureValue::as_categorical), Some("Action"));
        assert_eq!(row.get("InGamePurchases").and_then(FeatureValue::as_numeric), Some(0.0));
        assert_eq!(row.get("Unknown"), None);
    }

    #[test]
    fn test_with_replaces_and_without_removes() {
        let row = FeatureRow::from_record(&sample_record())
            .with("Age", FeatureValue::Categorical("old".into()))
            .without("PlayerID");
        assert_eq!(row.len(), FEATURE_COLUMNS.len() - 1);
        assert_eq!(row.get("Age"), Some(&FeatureValue::Categorical("old".into())));
        assert_eq!(row.get("PlayerID"), None);
    }
}
