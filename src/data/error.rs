use thiserror::Error;

/// Failure modes of the dataset pipeline.  None of these abort a render:
/// missing values show as "-", non-numeric axis cells drop the record from
/// the filtered view, and a degenerate regression suppresses the trend line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("column '{0}' has no value")]
    MissingValue(String),

    #[error("column '{column}' value '{value}' is not numeric")]
    InvalidNumeric { column: String, value: String },

    #[error("insufficient data for a trend line")]
    DegenerateRegression,
}
