use std::{ops::RangeInclusive, path::PathBuf};

use anyhow::Context;
use engagement_core::{GameDifficulty, GameGenre, Gender, Location, PlayerRecord};
use engagement_inference::{EngagementPrediction, InferenceAdapter, LinearModelArtifact};
use serde::Serialize;

use crate::util::{self, Output};

const MIN_PLAYER_ID: i64 = 9000;
const AGE_RANGE: RangeInclusive<i64> = 15..=70;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum PurchaseAnswer {
    #[default]
    No,
    Yes,
}

impl PurchaseAnswer {
    fn as_flag(self) -> bool {
        self == Self::Yes
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PredictArg {
    /// Path to the model artifact
    #[arg(
        long,
        env = "ENGAGEMENT_MODEL",
        default_value = "model/engagement_model.json"
    )]
    model: PathBuf,
    /// Read the player record from a JSON file; form flags are ignored
    #[arg(long)]
    record: Option<PathBuf>,
    /// Print the record and prediction as JSON
    #[arg(long)]
    json: bool,
    #[clap(flatten)]
    form: PlayerForm,
}

/// Player attributes entered as command-line flags.
#[derive(Debug, Clone, clap::Args)]
struct PlayerForm {
    #[arg(
        long,
        default_value_t = MIN_PLAYER_ID,
        value_parser = clap::value_parser!(i64).range(MIN_PLAYER_ID..)
    )]
    player_id: i64,
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(AGE_RANGE))]
    age: u32,
    #[arg(long, default_value = "Male")]
    gender: Gender,
    #[arg(long, default_value = "USA")]
    location: Location,
    /// Favorite game genre
    #[arg(long, default_value = "Action")]
    genre: GameGenre,
    /// Total play time in hours
    #[arg(long, default_value_t = 0.0, value_parser = parse_hours)]
    play_time_hours: f64,
    /// Whether the player makes in-game purchases (yes/no)
    #[arg(long, default_value = "no")]
    in_game_purchases: PurchaseAnswer,
    /// Preferred game difficulty
    #[arg(long, default_value = "Easy")]
    difficulty: GameDifficulty,
    #[arg(long, default_value_t = 0)]
    sessions_per_week: u32,
    /// Average session duration in minutes
    #[arg(long, default_value_t = 0)]
    avg_session_minutes: u32,
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..=99))]
    player_level: u32,
    #[arg(long, default_value_t = 0)]
    achievements_unlocked: u32,
}

fn parse_hours(s: &str) -> Result<f64, String> {
    let hours: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !hours.is_finite() || hours < 0.0 {
        return Err(format!("{s} is not a non-negative number of hours"));
    }
    Ok(hours)
}

impl PlayerForm {
    fn to_record(&self) -> PlayerRecord {
        PlayerRecord {
            player_id: self.player_id,
            age: self.age,
            gender: self.gender,
            location: self.location,
            game_genre: self.genre,
            play_time_hours: self.play_time_hours,
            in_game_purchases: self.in_game_purchases.as_flag(),
            game_difficulty: self.difficulty,
            sessions_per_week: self.sessions_per_week,
            avg_session_duration_minutes: self.avg_session_minutes,
            player_level: self.player_level,
            achievements_unlocked: self.achievements_unlocked,
        }
    }
}

/// Applies the form's player id and age bounds to a record read from a file.
///
/// Play time and player level are checked by [`PlayerRecord::validate`].
fn check_form_bounds(record: &PlayerRecord) -> anyhow::Result<()> {
    anyhow::ensure!(
        record.player_id >= MIN_PLAYER_ID,
        "player id must be at least {MIN_PLAYER_ID} (got {})",
        record.player_id
    );
    anyhow::ensure!(
        AGE_RANGE.contains(&i64::from(record.age)),
        "age must be within {}..={} (got {})",
        AGE_RANGE.start(),
        AGE_RANGE.end(),
        record.age
    );
    Ok(())
}

#[derive(Debug, Serialize)]
struct PredictionOutput<'a> {
    record: &'a PlayerRecord,
    prediction: EngagementPrediction,
}

fn predict(arg: &PredictArg) -> anyhow::Result<(PlayerRecord, EngagementPrediction)> {
    let record = match &arg.record {
        Some(path) => {
            let record: PlayerRecord = util::read_json_file("player record", path)?;
            check_form_bounds(&record)
                .with_context(|| format!("Invalid player record in {}", path.display()))?;
            record
        }
        None => arg.form.to_record(),
    };

    let model = LinearModelArtifact::open(&arg.model).context("Failed to load model")?;
    let adapter = InferenceAdapter::new(model)
        .context("Model does not match the engagement label table")?;
    let prediction = adapter
        .predict(&record)
        .with_context(|| format!("Failed to predict engagement of player {}", record.player_id))?;
    Ok((record, prediction))
}

pub(crate) fn run(arg: &PredictArg) -> anyhow::Result<()> {
    let (record, prediction) = predict(arg)?;
    if arg.json {
        Output::save_json(
            &PredictionOutput {
                record: &record,
                prediction,
            },
            None,
        )?;
    } else {
        println!("Predicted Class is : {prediction}");
    }
    Ok(())
}
