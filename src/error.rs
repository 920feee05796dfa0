use thiserror::Error;

/// Failures at the outer surfaces (text input, configuration files).
/// The search core itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid square `{0}`")]
    InvalidSquare(String),

    #[error("invalid move `{0}` (expected e.g. c3-d4 or c3xe5)")]
    InvalidMove(String),

    #[error("illegal move {0}")]
    IllegalMove(String),

    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
