//! Exploratory aggregation over the player-behavior dataset
//!
//! This crate turns a loaded [`Dataset`](engagement_core::Dataset) into the
//! tables behind the exploration page. Each view is computed independently
//! and never mutates the dataset.
//!
//! # Views
//!
//! | Module | View |
//! |---|---|
//! | [`overview`] | Row count, columns, numeric column statistics |
//! | [`distribution`] | Percentage of rows per `EngagementLevel` |
//! | [`relationship`] | `SessionsPerWeek` vs `PlayTimeHours`: group means and regression line |
//! | [`spread`] | `AvgSessionDurationMinutes` five-number summary per `GameGenre` |
//! | [`crosstab`] | `GameGenre` × `GameDifficulty`, row-normalized |
//! | [`segment`] | Player-type and session-length segments counted against engagement / purchases |
//! | [`heatmap`] | Mean encoded engagement over binned `PlayerLevel` × `AchievementsUnlocked` |
//!
//! [`report::ExplorationReport`] bundles every view for rendering or export.
//!
//! # Data Quality
//!
//! A row that cannot take part in a view (a value outside every bin, a
//! missing number, a blank categorical cell, an unrecognized engagement label
//! for the encoded heatmap) is left out of that view only. Every view except
//! the overview reports how many rows it left out in its `excluded` field.
//!
//! # Examples
//!
//! ```no_run
//! use engagement_analysis::report::ExplorationReport;
//! use engagement_core::Dataset;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let dataset = Dataset::open("data/player_behavior.csv")?;
//! let report = ExplorationReport::build(&dataset);
//!
//! for share in &report.class_distribution.shares {
//!     println!("{}: {:.1}%", share.label, share.percent);
//! }
//! # Ok(())
//! # }
//! ```

pub mod crosstab;
pub mod distribution;
pub mod heatmap;
pub mod overview;
pub mod relationship;
pub mod report;
pub mod segment;
pub mod spread;

/// Rounds `value` to `decimals` decimal places.
///
/// ```
/// assert_eq!(engagement_analysis::round_to(33.333_333, 2), 33.33);
/// assert_eq!(engagement_analysis::round_to(16.666_666, 2), 16.67);
/// ```
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}
