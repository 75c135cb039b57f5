use serde::{Deserialize, Serialize};

/// Declares a categorical player attribute with its canonical labels.
macro_rules! categorical {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($variant:ident => $label:tt),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Serialize,
            Deserialize,
            derive_more::Display,
            derive_more::FromStr,
        )]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                #[display($label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &[Self] = &[$(Self::$variant),+];

            /// Label used in the dataset and by the trained model.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }
        }
    };
}

categorical! {
    pub enum Gender {
        Male => "Male",
        Female => "Female",
    }
}

categorical! {
    pub enum Location {
        Usa => "USA",
        Asia => "Asia",
        Europe => "Europe",
        Other => "Other",
    }
}

categorical! {
    /// Favorite game genre.
    pub enum GameGenre {
        Action => "Action",
        Strategy => "Strategy",
        Rpg => "RPG",
        Sports => "Sports",
        Simulation => "Simulation",
    }
}

categorical! {
    /// Preferred game difficulty.
    pub enum GameDifficulty {
        Easy => "Easy",
        Medium => "Medium",
        Hard => "Hard",
    }
}

/// Valid range of [`PlayerRecord::player_level`].
pub const PLAYER_LEVEL_RANGE: std::ops::RangeInclusive<u32> = 1..=99;

/// Attributes of a single player, as entered for scoring.
///
/// Field names serialize to the dataset's column names so that a record can
/// be read from the same vocabulary the model was trained on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlayerRecord {
    #[serde(rename = "PlayerID")]
    pub player_id: i64,
    pub age: u32,
    pub gender: Gender,
    pub location: Location,
    pub game_genre: GameGenre,
    pub play_time_hours: f64,
    /// Encoded as `0`/`1` on the wire.
    #[serde(with = "purchase_flag")]
    pub in_game_purchases: bool,
    pub game_difficulty: GameDifficulty,
    pub sessions_per_week: u32,
    pub avg_session_duration_minutes: u32,
    pub player_level: u32,
    pub achievements_unlocked: u32,
}

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum InvalidRecordError {
    #[display("play time must be a finite, non-negative number of hours (got {hours})")]
    PlayTimeHours { hours: f64 },
    #[display(
        "player level must be within {}..={} (got {level})",
        PLAYER_LEVEL_RANGE.start(),
        PLAYER_LEVEL_RANGE.end()
    )]
    PlayerLevel { level: u32 },
}

impl PlayerRecord {
    /// Checks the fields whose domain is narrower than their Rust type.
    ///
    /// Integer fields are non-negative by construction; play time and player
    /// level are checked here.
    ///
    /// ```
    /// # use engagement_core::{GameDifficulty, GameGenre, Gender, Location, PlayerRecord};
    /// let mut record = PlayerRecord {
    ///     player_id: 9000,
    ///     age: 25,
    ///     gender: Gender::Male,
    ///     location: Location::Usa,
    ///     game_genre: GameGenre::Action,
    ///     play_time_hours: 10.0,
    ///     in_game_purchases: false,
    ///     game_difficulty: GameDifficulty::Easy,
    ///     sessions_per_week: 3,
    ///     avg_session_duration_minutes: 45,
    ///     player_level: 5,
    ///     achievements_unlocked: 10,
    /// };
    /// assert!(record.validate().is_ok());
    ///
    /// record.player_level = 0;
    /// assert!(record.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), InvalidRecordError> {
        if !self.play_time_hours.is_finite() || self.play_time_hours < 0.0 {
            return Err(InvalidRecordError::PlayTimeHours {
                hours: self.play_time_hours,
            });
        }
        if !PLAYER_LEVEL_RANGE.contains(&self.player_level) {
            return Err(InvalidRecordError::PlayerLevel {
                level: self.player_level,
            });
        }
        Ok(())
    }
}

mod purchase_flag {
    use serde::{Deserialize, Deserializer, Serializer, de::Error as _};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub(super) fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        match u8::deserialize(deserializer)? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(D::Error::custom(format!(
                "in-game purchase flag must be 0 or 1, got {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> PlayerRecord {
        PlayerRecord {
            player_id: 9000,
            age: 25,
            gender: Gender::Male,
            location: Location::Usa,
            game_genre: GameGenre::Action,
            play_time_hours: 10.0,
            in_game_purchases: false,
            game_difficulty: GameDifficulty::Easy,
            sessions_per_week: 3,
            avg_session_duration_minutes: 45,
            player_level: 5,
            achievements_unlocked: 10,
        }
    }

    #[test]
    fn test_labels_match_dataset_vocabulary() {
        assert_eq!(Location::Usa.as_str(), "USA");
        assert_eq!(Location::Usa.to_string(), "USA");
        assert_eq!(GameGenre::Rpg.to_string(), "RPG");
        assert_eq!(GameDifficulty::ALL.len(), 3);
        assert_eq!(GameGenre::ALL.len(), 5);
    }

    #[test]
    fn test_from_str_accepts_labels() {
        assert_eq!("RPG".parse::<GameGenre>().unwrap(), GameGenre::Rpg);
        assert_eq!("USA".parse::<Location>().unwrap(), Location::Usa);
        assert!("Puzzle".parse::<GameGenre>().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_hours() {
        let mut record = sample_record();
        record.play_time_hours = -1.0;
        assert!(matches!(
            record.validate(),
            Err(InvalidRecordError::PlayTimeHours { .. })
        ));
        record.play_time_hours = f64::NAN;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_level_bounds() {
        let mut record = sample_record();
        record.player_level = 1;
        assert!(record.validate().is_ok());
        record.player_level = 99;
        assert!(record.validate().is_ok());
        record.player_level = 100;
        assert_eq!(
            record.validate(),
            Err(InvalidRecordError::PlayerLevel { level: 100 })
        );
    }

    #[test]
    fn test_json_uses_column_names() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["PlayerID"], 9000);
        assert_eq!(json["Location"], "USA");
        assert_eq!(json["InGamePurchases"], 0);
        assert_eq!(json["AvgSessionDurationMinutes"], 45);

        let parsed: PlayerRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, sample_record());
    }

    #[test]
    fn test_purchase_flag_rejects_other_values() {
        let mut json = serde_json::to_value(sample_record()).unwrap();
        json["InGamePurchases"] = serde_json::json!(2);
        assert!(serde_json::from_value::<PlayerRecord>(json).is_err());
    }
}
