use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrambleError {
    #[error("unknown puzzle type: {0}")]
    UnknownPuzzleType(String),

    #[error("random source exhausted after {draws} draws")]
    RandomSourceExhausted { draws: usize },

    #[error("empty random range {min}..={max}")]
    EmptyRange { min: i64, max: i64 },

    #[error("invalid token {token:?} at position {index}")]
    InvalidToken { index: usize, token: String },

    #[error("constraint violated at position {index}: {reason}")]
    ConstraintViolation { index: usize, reason: String },

    #[error("expected {expected} moves, found {found}")]
    LengthMismatch { expected: String, found: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScrambleError>;
