use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Batch error: {0}")]
    Batch(#[from] inquest_engine::BatchError),

    #[error("Agent request failed: {0}")]
    Agent(#[from] reqwest::Error),

    #[error("Query failed: {0}")]
    Job(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
