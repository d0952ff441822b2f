use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeamScatterError {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Precondition violated: {0}")]
    Precondition(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TeamScatterError>;
