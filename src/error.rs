use reqwest::StatusCode;
use thiserror::Error;

/// Why a question did not produce an answer.
///
/// Only used for diagnostics: every variant is shown to the user as
/// [`crate::constants::ERROR_MESSAGE`].
#[derive(Debug, Error)]
pub enum AskError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("answering service returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}
