use thiserror::Error;

/// Errors that can occur while importing video metadata into a post
#[derive(Error, Debug)]
pub enum ImportError {
    /// A required setting is missing or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input is neither a video ID nor a recognised video URL
    #[error("Invalid video ID or URL: {0}")]
    InvalidVideo(String),

    /// The metadata source has no video with this ID
    #[error("Video not found: {0}")]
    NotFound(String),

    /// The metadata source failed for another reason
    #[error("Metadata source error: {0}")]
    Source(String),

    /// The post metadata store rejected a read or write
    #[error("Store error: {0}")]
    Store(String),

    /// Reading a local file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A metadata file could not be decoded
    #[error("Invalid metadata JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A field or group lookup against the schema failed
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Loading layered configuration failed
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Errors raised when building a field schema
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Invalid field key '{0}': keys must be lowercase [a-z0-9_æøå]")]
    InvalidKey(String),

    #[error("Duplicate field key '{0}'")]
    DuplicateKey(String),

    #[error("Unknown field group '{0}'")]
    UnknownGroup(String),
}
