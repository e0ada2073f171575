use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Collection store unavailable: {0}")]
    Unavailable(String),

    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    /// Maps a non-success status and its already-extracted message.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            400 => ClientError::BadRequest(message),
            404 => ClientError::NotFound(message),
            503 => ClientError::Unavailable(message),
            _ => ClientError::Status { status, message },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::NotFound(_))
    }
}
