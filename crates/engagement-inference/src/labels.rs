//! Class index to engagement label table
//!
//! The trained classifier emits an integer class index. Which label each
//! index stands for was fixed when the model was trained (the label encoder
//! sorted the class names alphabetically), so the table is:
//!
//! | Index | Label |
//! |---|---|
//! | 0 | High |
//! | 1 | Low |
//! | 2 | Medium |
//!
//! This is a different ordering from [`EngagementLevel::ordinal`], which is
//! the Low/Medium/High encoding used for averaging. The two are independent
//! and must not be substituted for one another.

use engagement_core::EngagementLevel;

use crate::error::UnmappedClassError;

/// Engagement label for each model class index.
pub const MODEL_CLASS_LABELS: [EngagementLevel; 3] = [
    EngagementLevel::High,
    EngagementLevel::Low,
    EngagementLevel::Medium,
];

/// Number of classes a compatible model must emit.
pub const MODEL_CLASS_COUNT: usize = MODEL_CLASS_LABELS.len();

/// Maps a model class index to its engagement label.
///
/// # Examples
///
/// ```
/// use engagement_core::EngagementLevel;
/// use engagement_inference::labels::label_for_class;
///
/// assert_eq!(label_for_class(0), Ok(EngagementLevel::High));
/// assert_eq!(label_for_class(1), Ok(EngagementLevel::Low));
/// assert_eq!(label_for_class(2), Ok(EngagementLevel::Medium));
/// assert!(label_for_class(3).is_err());
/// ```
pub fn label_for_class(index: usize) -> Result<EngagementLevel, UnmappedClassError> {
    MODEL_CLASS_LABELS
        .get(index)
        .copied()
        .ok_or(UnmappedClassError { index })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_covers_every_level_once() {
        for level in EngagementLevel::ALL {
            assert_eq!(
                MODEL_CLASS_LABELS.iter().filter(|l| **l == level).count(),
                1
            );
        }
    }

    #[test]
    fn test_mapping_differs_from_ordinal_encoding() {
        for (index, label) in MODEL_CLASS_LABELS.iter().enumerate() {
            if *label == EngagementLevel::High {
                assert_eq!(index, 0);
                assert_eq!(label.ordinal(), 2);
            }
        }
    }

    #[test]
    fn test_out_of_range_index() {
        assert_eq!(label_for_class(7), Err(UnmappedClassError { index: 7 }));
        assert_eq!(
            label_for_class(usize::MAX),
            Err(UnmappedClassError { index: usize::MAX })
        );
    }
}
