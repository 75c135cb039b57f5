use engagement_core::{EngagementLevel, PlayerRecord};
use serde::Serialize;

use crate::{
    classifier::Classifier,
    error::{ClassCardinalityError, PredictError},
    frame::FeatureRow,
    labels::{MODEL_CLASS_COUNT, label_for_class},
};

/// The label assigned to one player, with the raw class index it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[display("{level} Engagement Level")]
pub struct EngagementPrediction {
    pub level: EngagementLevel,
    pub class_index: usize,
}

/// Scores single player records with an injected classifier.
///
/// The adapter holds no state besides the model; each call to
/// [`predict`](Self::predict) is independent.
#[derive(Debug, Clone)]
pub struct InferenceAdapter<C> {
    model: C,
}

impl<C> InferenceAdapter<C>
where
    C: Classifier,
{
    /// Wraps `model` after checking that it emits one class per engagement
    /// label.
    ///
    /// # Errors
    ///
    /// Returns [`ClassCardinalityError`] if the model's class count differs
    /// from the label table's.
    pub fn new(model: C) -> Result<Self, ClassCardinalityError> {
        let actual = model.n_classes();
        if actual != MODEL_CLASS_COUNT {
            return Err(ClassCardinalityError {
                expected: MODEL_CLASS_COUNT,
                actual,
            });
        }
        Ok(Self { model })
    }

    #[must_use]
    pub fn model(&self) -> &C {
        &self.model
    }

    /// Predicts the engagement level of one player.
    ///
    /// # Errors
    ///
    /// - [`PredictError::InvalidRecord`] if a field is outside its domain
    /// - [`PredictError::Schema`] if the model rejects the feature row
    /// - [`PredictError::UnmappedClass`] if the model returns an index with
    ///   no label
    pub fn predict(&self, record: &PlayerRecord) -> Result<EngagementPrediction, PredictError> {
        record.validate()?;
        let row = FeatureRow::from_record(record);
        let class_index = self.model.predict(&row)?;
        let level = label_for_class(class_index)?;
        log::debug!(
            "Player {} scored class {class_index} ({level})",
            record.player_id
        );
        Ok(EngagementPrediction { level, class_index })
    }
}
