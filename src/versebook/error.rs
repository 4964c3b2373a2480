use thiserror::Error;

use crate::corpus::CorpusError;
use crate::insight::InsightError;

#[derive(Error, Debug)]
pub enum VersebookError {
    #[error("Study node not found: {0}")]
    NodeNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("Insight error: {0}")]
    Insight(#[from] InsightError),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, VersebookError>;
