use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Body is not valid UTF-8: {0}")]
    DecodeError(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
