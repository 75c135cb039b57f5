use crate::{error::ModelSchemaError, frame::FeatureRow};

/// A pre-trained multi-class model that scores one row at a time.
///
/// Implementations own whatever preprocessing they were fitted with; the
/// caller only supplies the named, unencoded feature row.
pub trait Classifier {
    /// Number of distinct class indices this model can emit.
    fn n_classes(&self) -> usize;

    /// Returns the class index for `row`.
    ///
    /// # Errors
    ///
    /// Returns [`ModelSchemaError`] if `row` does not carry the columns and
    /// value kinds the model was fitted on.
    fn predict(&self, row: &FeatureRow) -> Result<usize, ModelSchemaError>;
}

impl<C> Classifier for &C
where
    C: Classifier + ?Sized,
{
    fn n_classes(&self) -> usize {
        (**self).n_classes()
    }

    fn predict(&self, row: &FeatureRow) -> Result<usize, ModelSchemaError> {
        (**self).predict(row)
    }
}

impl<C> Classifier for Box<C>
where
    C: Classifier + ?Sized,
{
    fn n_classes(&self) -> usize {
        (**self).n_classes()
    }

    fn predict(&self, row: &FeatureRow) -> Result<usize, ModelSchemaError> {
        (**self).predict(row)
    }
}
