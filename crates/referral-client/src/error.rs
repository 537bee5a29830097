use referral_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport-level failure talking to the backend.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend's body was not the JSON we expected.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Malformed response: missing `{0}`")]
    MalformedResponse(&'static str),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A protected operation was attempted without a session token.
    #[error("Not logged in")]
    NotAuthenticated,
}

pub type Result<T> = std::result::Result<T, ClientError>;
