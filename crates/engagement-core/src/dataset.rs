//! Tabular player-behavior dataset
//!
//! The dataset is a CSV file with a header row. Only the columns listed in
//! [`REQUIRED_COLUMNS`] are needed; demographic columns (`PlayerID`, `Age`,
//! `Gender`, `Location`) are read when present.
//!
//! Categorical columns are kept as the raw strings found in the file so that
//! unexpected labels never abort a load: each aggregate view decides on its
//! own whether a row is usable. Blank categorical cells and numeric cells
//! that cannot be parsed are stored as `None` for the same reason.
//!
//! ```text
//! PlayerID,Age,Gender,Location,GameGenre,PlayTimeHours,InGamePurchases,GameDifficulty,SessionsPerWeek,AvgSessionDurationMinutes,PlayerLevel,AchievementsUnlocked,EngagementLevel
//! 9000,43,Male,Other,Strategy,16.27,0,Medium,6,108,79,25,Medium
//! ```

use std::{
    fs::File,
    io::{self, BufReader},
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::EngagementLevel;

/// Columns every dataset must provide.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "EngagementLevel",
    "SessionsPerWeek",
    "PlayTimeHours",
    "AvgSessionDurationMinutes",
    "GameGenre",
    "GameDifficulty",
    "InGamePurchases",
    "PlayerLevel",
    "AchievementsUnlocked",
];

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum DatasetError {
    #[display("failed to open dataset file {}", path.display())]
    Open {
        path: PathBuf,
        source: io::Error,
    },
    #[display("failed to parse dataset")]
    Parse { source: csv::Error },
    #[display("dataset is missing required column '{column}'")]
    MissingColumn { column: String },
    #[display("dataset contains no rows")]
    Empty,
}

/// One row of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DatasetRow {
    #[serde(rename = "PlayerID", default, deserialize_with = "csv::invalid_option")]
    pub player_id: Option<i64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub age: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub game_genre: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub play_time_hours: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub in_game_purchases: Option<i64>,
    pub game_difficulty: Option<String>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub sessions_per_week: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub avg_session_duration_minutes: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub player_level: Option<f64>,
    #[serde(deserialize_with = "csv::invalid_option")]
    pub achievements_unlocked: Option<f64>,
    pub engagement_level: Option<String>,
}

impl DatasetRow {
    /// The row's engagement label, if it is one of the known levels.
    #[must_use]
    pub fn engagement(&self) -> Option<EngagementLevel> {
        EngagementLevel::from_label(self.engagement_level.as_deref()?)
    }
}

/// An immutable, fully loaded dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<DatasetRow>,
}

impl Dataset {
    /// Loads a dataset from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the file is missing or unreadable, a
    /// required column is absent, a row is malformed, or there are no rows.
    pub fn open<P>(path: P) -> Result<Self, DatasetError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.to_owned(),
            source,
        })?;
        let dataset = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "Loaded {} rows ({} columns) from {}",
            dataset.len(),
            dataset.columns.len(),
            path.display()
        );
        Ok(dataset)
    }

    /// Loads a dataset from any CSV source.
    ///
    /// # Examples
    ///
    /// ```
    /// use engagement_core::Dataset;
    ///
    /// let csv = "\
    /// EngagementLevel,SessionsPerWeek,PlayTimeHours,AvgSessionDurationMinutes,GameGenre,GameDifficulty,InGamePurchases,PlayerLevel,AchievementsUnlocked
    /// High,12,5.5,90,RPG,Hard,1,70,40
    /// Low,1,2.0,20,Action,Easy,0,3,1
    /// ";
    /// let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
    /// assert_eq!(dataset.len(), 2);
    /// assert_eq!(dataset.rows()[0].game_genre.as_deref(), Some("RPG"));
    /// ```
    pub fn from_reader<R>(reader: R) -> Result<Self, DatasetError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = reader
            .headers()
            .map_err(|source| DatasetError::Parse { source })?
            .iter()
            .map(str::to_owned)
            .collect::<Vec<_>>();
        if let Some(column) = REQUIRED_COLUMNS
            .iter()
            .find(|required| !columns.iter().any(|c| c == *required))
        {
            return Err(DatasetError::MissingColumn {
                column: (*column).to_owned(),
            });
        }

        let rows = reader
            .deserialize()
            .collect::<Result<Vec<DatasetRow>, _>>()
            .map_err(|source| DatasetError::Parse { source })?;
        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self { columns, rows })
    }

    /// Builds a dataset from already parsed rows.
    #[must_use]
    pub fn from_rows(rows: Vec<DatasetRow>) -> Self {
        let columns = [
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
            "EngagementLevel",
        ]
        .map(str::to_owned)
        .to_vec();
        Self { columns, rows }
    }

    /// Column names in file order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
