//! Engagement-level prediction for a single player
//!
//! The pipeline is one record in, one label out:
//!
//! 1. [`PlayerRecord::validate`](engagement_core::PlayerRecord::validate)
//!    rejects out-of-domain fields.
//! 2. [`FeatureRow::from_record`] builds the named single-row frame the
//!    model was fitted on.
//! 3. A [`Classifier`] returns a class index.
//! 4. [`label_for_class`] maps the index through [`MODEL_CLASS_LABELS`].
//!
//! [`InferenceAdapter`] runs these steps against any classifier and checks at
//! construction that the model emits exactly three classes.
//! [`LinearModelArtifact`] is the classifier loaded from disk.
//!
//! # Examples
//!
//! ```no_run
//! use engagement_core::{GameDifficulty, GameGenre, Gender, Location, PlayerRecord};
//! use engagement_inference::{InferenceAdapter, LinearModelArtifact};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let model = LinearModelArtifact::open("model/engagement_model.json")?;
//! let adapter = InferenceAdapter::new(model)?;
//!
//! let record = PlayerRecord {
//!     player_id: 9000,
//!     age: 25,
//!     gender: Gender::Male,
//!     location: Location::Usa,
//!     game_genre: GameGenre::Action,
//!     play_time_hours: 10.0,
//!     in_game_purchases: false,
//!     game_difficulty: GameDifficulty::Easy,
//!     sessions_per_week: 3,
//!     avg_session_duration_minutes: 45,
//!     player_level: 5,
//!     achievements_unlocked: 10,
//! };
//! println!("Predicted Class is : {}", adapter.predict(&record)?);
//! # Ok(())
//! # }
//! ```

pub use self::{
    adapter::{EngagementPrediction, InferenceAdapter},
    artifact::LinearModelArtifact,
    classifier::Classifier,
    error::{
        ClassCardinalityError, ModelLoadError, ModelSchemaError, PredictError, UnmappedClassError,
    },
    frame::FeatureRow,
    labels::{MODEL_CLASS_LABELS, label_for_class},
};

pub mod adapter;
pub mod artifact;
pub mod classifier;
pub mod error;
pub mod frame;
pub mod labels;

#[cfg(test)]
pub(crate) mod test_util {
    use engagement_core::{GameDifficulty, GameGenre, Gender, Location, PlayerRecord};

    /// The form's example player.
    pub(crate) fn sample_record() -> PlayerRecord {
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
}
