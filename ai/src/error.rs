//! Errors raised while talking to the language model or writing generated files.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AiError {
    /// The HTTP request could not be sent or the body could not be read.
    #[error("request to language model failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("language model returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The endpoint answered but without any message content.
    #[error("language model returned an empty response")]
    EmptyResponse,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("presentation archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}
