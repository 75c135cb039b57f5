//! Serialized linear classifier
//!
//! A [`LinearModelArtifact`] is a JSON file that holds a preprocessing step
//! for every input column and a multinomial linear model over the encoded
//! vector. Prediction is the index of the highest class score; ties resolve
//! to the lowest index.
//!
//! ```json
//! {
//!   "name": "engagement-logreg",
//!   "trained_at": "2024-05-01T00:00:00Z",
//!   "features": [
//!     { "column": "PlayerID", "transform": { "kind": "drop" } },
//!     { "column": "Age", "transform": { "kind": "standardize", "mean": 31.9, "scale": 10.0 } },
//!     { "column": "Gender", "transform": { "kind": "one_hot", "categories": ["Female", "Male"] } }
//!   ],
//!   "coefficients": [[0.1, 0.0, 0.2], [0.0, 0.3, -0.1], [0.0, 0.0, 0.0]],
//!   "intercepts": [0.0, 0.5, -0.5]
//! }
//! ```

use std::{collections::HashSet, fs::File, io::BufReader, path::Path};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    classifier::Classifier,
    error::{ModelLoadError, ModelSchemaError},
    frame::{FeatureRow, FeatureValue},
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModelArtifact {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    /// Input columns in encoding order. Every column of an incoming row must
    /// appear here, including the dropped ones.
    pub features: Vec<FeatureEncoding>,
    /// One row of weights per class, each as wide as the encoded vector.
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureEncoding {
    pub column: String,
    pub transform: FeatureTransform,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeatureTransform {
    /// `(value - mean) / scale`
    Standardize { mean: f64, scale: f64 },
    /// One indicator per known category.
    OneHot {
        categories: Vec<String>,
        #[serde(default)]
        handle_unknown: UnknownCategory,
    },
    Passthrough,
    /// Required in the input, contributes nothing to the encoded vector.
    Drop,
}

/// Behavior of a one-hot column on a category it was not fitted with.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownCategory {
    #[default]
    Error,
    /// Encode as all zeros.
    Ignore,
}

impl FeatureTransform {
    /// Number of encoded values this transform produces.
    #[must_use]
    pub fn width(&self) -> usize {
        match self {
            Self::Standardize { .. } | Self::Passthrough => 1,
            Self::OneHot { categories, .. } => categories.len(),
            Self::Drop => 0,
        }
    }

    fn encode(
        &self,
        column: &str,
        value: &FeatureValue,
        out: &mut Vec<f64>,
    ) -> Result<(), ModelSchemaError> {
        match self {
            Self::Standardize { mean, scale } => {
                let x = finite_numeric(column, value)?;
                out.push((x - mean) / scale);
            }
            Self::Passthrough => out.push(finite_numeric(column, value)?),
            Self::OneHot {
                categories,
                handle_unknown,
            } => {
                let Some(category) = value.as_categorical() else {
                    return Err(ModelSchemaError::WrongKind {
                        column: column.to_owned(),
                        expected: "categorical",
                    });
                };
                let position = categories.iter().position(|c| c == category);
                if position.is_none() && *handle_unknown == UnknownCategory::Error {
                    return Err(ModelSchemaError::UnknownCategory {
                        column: column.to_owned(),
                        value: category.to_owned(),
                    });
                }
                out.extend((0..categories.len()).map(|i| f64::from(u8::from(Some(i) == position))));
            }
            Self::Drop => {}
        }
        Ok(())
    }
}

fn finite_numeric(column: &str, value: &FeatureValue) -> Result<f64, ModelSchemaError> {
    value
        .as_numeric()
        .filter(|x| x.is_finite())
        .ok_or_else(|| ModelSchemaError::WrongKind {
            column: column.to_owned(),
            expected: "a finite number",
        })
}

impl LinearModelArtifact {
    /// Reads and validates an artifact from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelLoadError`] if the file cannot be opened or parsed, or
    /// if the artifact fails [`validate`](Self::validate).
    pub fn open<P>(path: P) -> Result<Self, ModelLoadError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ModelLoadError::Open {
            path: path.to_owned(),
            source,
        })?;
        let artifact: Self = serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            ModelLoadError::Parse {
                path: path.to_owned(),
                source,
            }
        })?;
        artifact.validate()?;
        log::info!(
            "Loaded model '{}' (trained at {}) from {}: {} input columns, {} classes",
            artifact.name,
            artifact.trained_at,
            path.display(),
            artifact.features.len(),
            artifact.intercepts.len()
        );
        Ok(artifact)
    }

    /// Length of the encoded vector the coefficients apply to.
    #[must_use]
    pub fn encoded_width(&self) -> usize {
        self.features.iter().map(|f| f.transform.width()).sum()
    }

    /// Checks that the artifact's parts agree with each other.
    ///
    /// # Errors
    ///
    /// Returns [`ModelLoadError::Inconsistent`] naming the first problem found.
    pub fn validate(&self) -> Result<(), ModelLoadError> {
        let inconsistent = |reason: String| Err(ModelLoadError::Inconsistent { reason });

        if self.intercepts.is_empty() {
            return inconsistent("model has no classes".to_owned());
        }
        if self.coefficients.len() != self.intercepts.len() {
            return inconsistent(format!(
                "{} coefficient rows for {} intercepts",
                self.coefficients.len(),
                self.intercepts.len()
            ));
        }
        let width = self.encoded_width();
        for (class, row) in self.coefficients.iter().enumerate() {
            if row.len() != width {
                return inconsistent(format!(
                    "class {class} has {} coefficients, encoded width is {width}",
                    row.len()
                ));
            }
        }
        if !self
            .coefficients
            .iter()
            .flatten()
            .chain(&self.intercepts)
            .all(|w| w.is_finite())
        {
            return inconsistent("non-finite weight".to_owned());
        }

        let mut seen = HashSet::new();
        for FeatureEncoding { column, transform } in &self.features {
            if !seen.insert(column.as_str()) {
                return inconsistent(format!("column '{column}' is listed twice"));
            }
            match transform {
                FeatureTransform::Standardize { mean, scale } => {
                    if !mean.is_finite() || !scale.is_finite() || *scale == 0.0 {
                        return inconsistent(format!(
                            "column '{column}' has unusable standardization (mean {mean}, scale {scale})"
                        ));
                    }
                }
                FeatureTransform::OneHot { categories, .. } => {
                    let mut unique = HashSet::new();
                    if categories.is_empty() || !categories.iter().all(|c| unique.insert(c)) {
                        return inconsistent(format!(
                            "column '{column}' needs a non-empty list of distinct categories"
                        ));
                    }
                }
                FeatureTransform::Passthrough | FeatureTransform::Drop => {}
            }
        }
        Ok(())
    }

    /// Encodes `row` into the vector the coefficients apply to.
    ///
    /// # Errors
    ///
    /// Returns [`ModelSchemaError`] if `row` has a column the model does not
    /// know, lacks one it needs, or carries a value it cannot encode.
    pub fn encode(&self, row: &FeatureRow) -> Result<Vec<f64>, ModelSchemaError> {
        if let Some(name) = row
            .names()
            .find(|name| !self.features.iter().any(|f| f.column == *name))
        {
            return Err(ModelSchemaError::UnexpectedColumn {
                column: name.to_owned(),
            });
        }

        let mut encoded = Vec::with_capacity(self.encoded_width());
        for FeatureEncoding { column, transform } in &self.features {
            let value = row
                .get(column)
                .ok_or_else(|| ModelSchemaError::MissingColumn {
                    column: column.clone(),
                })?;
            transform.encode(column, value, &mut encoded)?;
        }
        Ok(encoded)
    }

    /// Per-class linear scores for `row`.
    ///
    /// # Errors
    ///
    /// Same as [`encode`](Self::encode).
    pub fn scores(&self, row: &FeatureRow) -> Result<Vec<f64>, ModelSchemaError> {
        let encoded = self.encode(row)?;
        Ok(self
            .coefficients
            .iter()
            .zip(&self.intercepts)
            .map(|(weights, intercept)| {
                intercept + weights.iter().zip(&encoded).map(|(w, x)| w * x).sum::<f64>()
            })
            .collect())
    }
}

impl Classifier for LinearModelArtifact {
    fn n_classes(&self) -> usize {
        self.intercepts.len()
    }

    fn predict(&self, row: &FeatureRow) -> Result<usize, ModelSchemaError> {
        let scores = self.scores(row)?;
        let mut best = 0;
        for (index, score) in scores.iter().enumerate().skip(1) {
            if *score > scores[best] {
                best = index;
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use engagement_core::{GameDifficulty, GameGenre, Gender, Location};

    use super::*;
    use crate::{frame::FEATURE_COLUMNS, test_util::sample_record};

    fn one_hot(labels: impl IntoIterator<Item = &'static str>) -> FeatureTransform {
        FeatureTransform::OneHot {
            categories: labels.into_iter().map(str::to_owned).collect(),
            handle_unknown: UnknownCategory::Error,
        }
    }

    /// A three-class model over the full player frame whose scores depend
    /// only on `SessionsPerWeek` (`s`): class 0 scores `s - 10`, class 1
    /// scores `5 - s`, class 2 scores `0`.
    pub(crate) fn sessions_model() -> LinearModelArtifact {
        let features: Vec<_> = FEATURE_COLUMNS
            .iter()
            .map(|column| {
                let transform = match *column {
                    "PlayerID" => FeatureTransform::Drop,
                    "Gender" => one_hot(Gender::ALL.iter().map(|g| g.as_str())),
                    "Location" => one_hot(Location::ALL.iter().map(|l| l.as_str())),
                    "GameGenre" => one_hot(GameGenre::ALL.iter().map(|g| g.as_str())),
                    "GameDifficulty" => one_hot(GameDifficulty::ALL.iter().map(|d| d.as_str())),
                    _ => FeatureTransform::Passthrough,
                };
                FeatureEncoding {
                    column: (*column).to_owned(),
                    transform,
                }
            })
            .collect();

        let offset: usize = features
            .iter()
            .take_while(|f| f.column != "SessionsPerWeek")
            .map(|f| f.transform.width())
            .sum();
        let width: usize = features.iter().map(|f| f.transform.width()).sum();
        let weights_on_sessions = |w: f64| {
            let mut row = vec![0.0; width];
            row[offset] = w;
            row
        };

        LinearModelArtifact {
            name: "sessions".to_owned(),
            trained_at: DateTime::from_timestamp(0, 0).unwrap(),
            features,
            coefficients: vec![
                weights_on_sessions(1.0),
                weights_on_sessions(-1.0),
                weights_on_sessions(0.0),
            ],
            intercepts: vec![-10.0, 5.0, 0.0],
        }
    }

    const SMALL_ARTIFACT: &str = r#"{
        "name": "small",
        "trained_at": "2024-05-01T00:00:00Z",
        "features": [
            { "column": "Age", "transform": { "kind": "standardize", "mean": 30.0, "scale": 5.0 } },
            { "column": "Gender", "transform": { "kind": "one_hot", "categories": ["Female", "Male"] } }
        ],
        "coefficients": [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        "intercepts": [0.0, 0.5]
    }"#;

    fn small_row(age: f64, gender: &str) -> FeatureRow {
        FeatureRow::new()
            .with("Age", FeatureValue::Numeric(age))
            .with("Gender", FeatureValue::Categorical(gender.to_owned()))
    }

    #[test]
    fn test_parse_and_validate() {
        let artifact: LinearModelArtifact = serde_json::from_str(SMALL_ARTIFACT).unwrap();
        artifact.validate().unwrap();
        assert_eq!(artifact.encoded_width(), 3);
        assert_eq!(artifact.n_classes(), 2);
        assert_eq!(
            artifact.features[1].transform,
            FeatureTransform::OneHot {
                categories: vec!["Female".to_owned(), "Male".to_owned()],
                handle_unknown: UnknownCategory::Error,
            }
        );
    }

    #[test]
    fn test_encode_and_predict() {
        let artifact: LinearModelArtifact = serde_json::from_str(SMALL_ARTIFACT).unwrap();

        let row = small_row(40.0, "Female");
        assert_eq!(artifact.encode(&row).unwrap(), vec![2.0, 1.0, 0.0]);
        // scores: [2.0, 1.5]
        assert_eq!(artifact.predict(&row).unwrap(), 0);

        // scores: [-1.0, 0.5]
        assert_eq!(artifact.predict(&small_row(25.0, "Male")).unwrap(), 1);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let mut artifact: LinearModelArtifact = serde_json::from_str(SMALL_ARTIFACT).unwrap();
        artifact.intercepts = vec![0.0, 0.0];
        artifact.coefficients = vec![vec![0.0; 3], vec![0.0; 3]];
        assert_eq!(artifact.predict(&small_row(30.0, "Male")).unwrap(), 0);
    }

    #[test]
    fn test_schema_errors() {
        let artifact: LinearModelArtifact = serde_json::from_str(SMALL_ARTIFACT).unwrap();

        assert_eq!(
            artifact.predict(&small_row(30.0, "Male").without("Gender")),
            Err(ModelSchemaError::MissingColumn {
                column: "Gender".to_owned()
            })
        );
        assert_eq!(
            artifact.predict(&small_row(30.0, "Male").with("Level", FeatureValue::Numeric(1.0))),
            Err(ModelSchemaError::UnexpectedColumn {
                column: "Level".to_owned()
            })
        );
        assert_eq!(
            artifact.predict(&small_row(30.0, "Other")),
            Err(ModelSchemaError::UnknownCategory {
                column: "Gender".to_owned(),
                value: "Other".to_owned()
            })
        );
        assert!(matches!(
            artifact.predict(&small_row(f64::NAN, "Male")),
            Err(ModelSchemaError::WrongKind { .. })
        ));
        assert!(matches!(
            artifact.predict(
                &small_row(30.0, "Male").with("Gender", FeatureValue::Numeric(1.0))
            ),
            Err(ModelSchemaError::WrongKind { .. })
        ));
    }

    #[test]
    fn test_ignored_unknown_category_encodes_zeros() {
        let mut artifact: LinearModelArtifact = serde_json::from_str(SMALL_ARTIFACT).unwrap();
        artifact.features[1].transform = FeatureTransform::OneHot {
            categories: vec!["Female".to_owned(), "Male".to_owned()],
            handle_unknown: UnknownCategory::Ignore,
        };
        assert_eq!(
            artifact.encode(&small_row(30.0, "Other")).unwrap(),
            vec![0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_validate_rejects_inconsistent_artifacts() {
        let base: LinearModelArtifact = serde_json::from_str(SMALL_ARTIFACT).unwrap();

        let mut short_row = base.clone();
        short_row.coefficients[1].pop();
        assert!(matches!(
            short_row.validate(),
            Err(ModelLoadError::Inconsistent { .. })
        ));

        let mut missing_intercept = base.clone();
        missing_intercept.intercepts.pop();
        assert!(missing_intercept.validate().is_err());

        let mut zero_scale = base.clone();
        zero_scale.features[0].transform = FeatureTransform::Standardize {
            mean: 0.0,
            scale: 0.0,
        };
        assert!(zero_scale.validate().is_err());

        let mut duplicate = base;
        duplicate.features[1].column = "Age".to_owned();
        assert!(duplicate.validate().is_err());
    }

    #[test]
    fn test_full_frame_model() {
        let artifact = sessions_model();
        artifact.validate().unwrap();

        let mut record = sample_record();
        for (sessions, class) in [(3, 1), (7, 2), (15, 0)] {
            record.sessions_per_week = sessions;
            let row = FeatureRow::from_record(&record);
            assert_eq!(artifact.predict(&row).unwrap(), class, "sessions={sessions}");
        }
    }

    #[test]
    fn test_open_bundled_sample_model() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../model/engagement_model.json");
        let artifact = LinearModelArtifact::open(path).unwrap();
        assert_eq!(artifact.n_classes(), 3);
        // few sessions, short sessions
        assert_eq!(artifact.predict(&FeatureRow::from_record(&sample_record())).unwrap(), 1);
    }

    #[test]
    fn test_open_missing_file() {
        let err = LinearModelArtifact::open("no/such/model.json").unwrap_err();
        assert!(matches!(err, ModelLoadError::Open { .. }));
    }
}
