use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("rating {value} is outside the 1-10 scale")]
    RatingOutOfRange { value: i64 },
    #[error("unrecognized action priority '{0}'")]
    InvalidPriority(String),
    #[error("invalid template '{id}': {reason}")]
    InvalidTemplate { id: String, reason: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
