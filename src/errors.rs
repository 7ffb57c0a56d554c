use thiserror::Error;

/// All errors that can occur when using the Video Indexer client.
#[derive(Error, Debug)]
pub enum VideoIndexerError {
    /// A transport-level HTTP error from reqwest (network, DNS, timeout, body decoding).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// An I/O error, typically from reading the video file to upload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The upload endpoint answered with anything other than HTTP 200.
    #[error("error uploading video (HTTP {status_code}): {body}")]
    Upload {
        status_code: u16,
        /// Parsed error body, or the raw text as a JSON string if it wasn't JSON.
        body: serde_json::Value,
    },

    /// The service rejected the access token or subscription key (HTTP 401/403).
    #[error("authorization failed (HTTP {status_code}): {message}")]
    Authorization { status_code: u16, message: String },

    /// Any other non-success response.
    #[error("API error {status_code}: {message}")]
    Api {
        status_code: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// The insight document lacks a required field or has an unexpected shape.
    #[error("unexpected insight document: {0}")]
    Schema(String),

    /// Client construction is missing credentials or has an invalid setting.
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

/// A convenience alias for `Result<T, VideoIndexerError>`.
pub type Result<T> = std::result::Result<T, VideoIndexerError>;
