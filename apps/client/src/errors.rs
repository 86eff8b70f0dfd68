use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with GraphQL errors; `code` is the first error's
    /// `extensions.code`.
    #[error("API error ({code}): {message}")]
    Api { code: String, message: String },

    #[error("response had no data for '{0}'")]
    EmptyData(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<tempfile::PersistError> for ClientError {
    fn from(err: tempfile::PersistError) -> Self {
        ClientError::Io(err.error)
    }
}
