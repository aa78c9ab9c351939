use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid status query: {0}")]
    InvalidQuery(String),
    #[error("error sending request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("error parsing response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("unexpected response shape: {0}")]
    ResponseShape(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ReaderError>;
