use thiserror::Error;

#[derive(Error, Debug)]
pub enum VanityError {
    #[error("invalid condition: {0}")]
    InvalidCondition(String),

    #[error("invalid search config: {0}")]
    InvalidConfig(String),

    #[error("hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, VanityError>;
