//! Session duration spread per game genre (the numbers behind a box plot).

use std::collections::BTreeMap;

use engagement_core::Dataset;
use engagement_stats::{descriptive, percentiles::FiveNumberSummary};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreSpread {
    pub genre: String,
    pub count: usize,
    pub mean: f64,
    pub summary: FiveNumberSummary,
}

/// `AvgSessionDurationMinutes` distribution for each `GameGenre`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreSessionDuration {
    /// One entry per genre, in lexicographic genre order.
    pub genres: Vec<GenreSpread>,
    pub excluded: usize,
}

impl GenreSessionDuration {
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mut by_genre = BTreeMap::<&str, Vec<f64>>::new();
        let mut excluded = 0;
        for row in dataset.rows() {
            let minutes = row.avg_session_duration_minutes.filter(|v| v.is_finite());
            match (row.game_genre.as_deref(), minutes) {
                (Some(genre), Some(minutes)) => by_genre.entry(genre).or_default().push(minutes),
                _ => excluded += 1,
            }
        }
        if excluded > 0 {
            log::warn!(
                "genre session duration: excluded {excluded} rows without a genre or duration"
            );
        }

        let genres = by_genre
            .into_iter()
            .filter_map(|(genre, mut minutes)| {
                minutes.sort_by(f64::total_cmp);
                Some(GenreSpread {
                    genre: genre.to_owned(),
                    count: minutes.len(),
                    mean: descriptive::mean(minutes.iter().copied())?,
                    summary: FiveNumberSummary::from_sorted(&minutes)?,
                })
            })
            .collect();

        Self { genres, excluded }
    }

    #[must_use]
    pub fn get(&self, genre: &str) -> Option<&GenreSpread> {
        self.genres.iter().find(|g| g.genre == genre)
    }
}
