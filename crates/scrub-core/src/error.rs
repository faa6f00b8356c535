use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Malformed HTTP message: {0}")]
    Format(String),

    #[error("Body is not multipart: {0}")]
    NotMultipart(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
