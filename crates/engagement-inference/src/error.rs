use std::{io, path::PathBuf};

use engagement_core::InvalidRecordError;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum ModelLoadError {
    #[display("failed to open model file {}", path.display())]
    Open { path: PathBuf, source: io::Error },
    #[display("failed to parse model file {}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[display("inconsistent model artifact: {reason}")]
    Inconsistent { reason: String },
}

/// The single-row input does not match the features the model was fitted on.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ModelSchemaError {
    #[display("input is missing feature column '{column}'")]
    MissingColumn { column: String },
    #[display("input has column '{column}' that the model was not fitted on")]
    UnexpectedColumn { column: String },
    #[display("feature column '{column}' must be {expected}")]
    WrongKind {
        column: String,
        expected: &'static str,
    },
    #[display("feature column '{column}' has category '{value}' unknown to the model")]
    UnknownCategory { column: String, value: String },
}

/// The model produced a class index with no engagement label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("model returned class index {index}, which has no engagement label")]
pub struct UnmappedClassError {
    pub index: usize,
}

/// The model does not emit the number of classes the label table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("model emits {actual} classes, expected {expected}")]
pub struct ClassCardinalityError {
    pub expected: usize,
    pub actual: usize,
}

/// Failure of a single prediction request.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum PredictError {
    #[display("invalid player record")]
    InvalidRecord(InvalidRecordError),
    #[display("input does not match model schema")]
    Schema(ModelSchemaError),
    #[display("unmapped model output")]
    UnmappedClass(UnmappedClassError),
}
