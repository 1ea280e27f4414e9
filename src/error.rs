use thiserror::Error;

pub type ExplorerResult<T> = Result<T, ExplorerError>;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("unknown column: `{key}`")]
    UnknownColumn { key: String },

    #[error("failed to fetch dataset from {location}: {reason}")]
    DatasetFetch { location: String, reason: String },

    #[error("dataset is missing required column `{column}`")]
    MissingColumn { column: String },

    #[error("invalid dataset: {0}")]
    InvalidDataset(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("server error: {0}")]
    Server(String),
}
