//! Row-normalized cross-tabulation of two categorical columns
//!
//! Row and column labels are sorted lexicographically. Each row's
//! proportions sum to 1.0, so rows with very different sizes can be compared
//! side by side (a stacked 100% bar per row label).
//!
//! # Examples
//!
//! ```
//! use engagement_analysis::crosstab::CrossTab;
//!
//! let table = CrossTab::from_pairs([
//!     ("Action", "Easy"),
//!     ("Action", "Hard"),
//!     ("Action", "Easy"),
//!     ("RPG", "Medium"),
//! ]);
//!
//! assert_eq!(table.column_labels, ["Easy", "Hard", "Medium"]);
//! assert_eq!(table.proportion("Action", "Easy"), Some(2.0 / 3.0));
//! assert_eq!(table.proportion("RPG", "Medium"), Some(1.0));
//! ```

use std::collections::{BTreeMap, BTreeSet};

use engagement_core::Dataset;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    pub row_labels: Vec<String>,
    pub column_labels: Vec<String>,
    /// `counts[row][column]`
    pub counts: Vec<Vec<usize>>,
    /// `proportions[row][column]`, each row summing to 1.0.
    pub proportions: Vec<Vec<f64>>,
    /// Rows with a blank cell in either column.
    pub excluded: usize,
}

impl CrossTab {
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_pairs<I, R, C>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (R, C)>,
        R: Into<String>,
        C: Into<String>,
    {
        let mut cells = BTreeMap::<String, BTreeMap<String, usize>>::new();
        let mut column_set = BTreeSet::new();
        for (row, column) in pairs {
            let column = column.into();
            column_set.insert(column.clone());
            *cells.entry(row.into()).or_default().entry(column).or_default() += 1;
        }

        let column_labels = column_set.into_iter().collect::<Vec<_>>();
        let mut row_labels = Vec::with_capacity(cells.len());
        let mut counts = Vec::with_capacity(cells.len());
        let mut proportions = Vec::with_capacity(cells.len());
        for (row, columns) in cells {
            let row_counts = column_labels
                .iter()
                .map(|c| columns.get(c).copied().unwrap_or(0))
                .collect::<Vec<_>>();
            let row_total = row_counts.iter().sum::<usize>();
            proportions.push(
                row_counts
                    .iter()
                    .map(|&c| c as f64 / row_total as f64)
                    .collect(),
            );
            counts.push(row_counts);
            row_labels.push(row);
        }

        Self {
            row_labels,
            column_labels,
            counts,
            proportions,
            excluded: 0,
        }
    }

    /// `GameGenre` × `GameDifficulty` proportions.
    ///
    /// Rows missing either label are left out and counted in `excluded`.
    #[must_use]
    pub fn genre_by_difficulty(dataset: &Dataset) -> Self {
        let rows = dataset.rows();
        let pairs = rows
            .iter()
            .filter_map(|row| {
                Some((row.game_genre.as_deref()?, row.game_difficulty.as_deref()?))
            })
            .collect::<Vec<_>>();
        let mut table = Self::from_pairs(pairs.iter().copied());
        table.excluded = rows.len() - pairs.len();
        if table.excluded > 0 {
            log::warn!(
                "genre by difficulty: excluded {} rows without a genre or difficulty",
                table.excluded
            );
        }
        table
    }

    #[must_use]
    pub fn proportion(&self, row: &str, column: &str) -> Option<f64> {
        let r = self.row_labels.iter().position(|l| l == row)?;
        let c = self.column_labels.iter().position(|l| l == column)?;
        Some(self.proportions[r][c])
    }

    /// Sum of each row's proportions, in row order.
    #[must_use]
    pub fn row_sums(&self) -> Vec<f64> {
        self.proportions.iter().map(|r| r.iter().sum()).collect()
    }
}
