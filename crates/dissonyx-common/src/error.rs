use thiserror::Error;

#[derive(Debug, Error)]
pub enum DissonyxError {
    #[error("Degenerate input: {0}")]
    Input(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DissonyxError>;
