use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("unknown marker: {0}")]
    UnknownMarker(String),

    #[error("unknown condition: {0}")]
    UnknownCondition(String),

    #[error("invalid patient id: {0:?}")]
    InvalidPatientId(String),
}
