//! Error types
//!
//! None of these reach the output document. Fetch and extraction failures are
//! logged and turn into `null` attributes; asset failures just leave the file
//! reference out.

use thiserror::Error;

/// Failure to retrieve a URL.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("failed to fetch {url}: {message}")]
    Transport { url: String, message: String },

    #[error("failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Failure of a single extraction strategy.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("invalid selector {0}")]
    InvalidSelector(String),

    #[error("malformed result: {0}")]
    Malformed(String),

    #[error("strategy panicked: {0}")]
    Panicked(String),
}

/// Failure to persist one asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot decode payload: {0}")]
    Decode(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Failure to write or read the aggregated document.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("site {site} declares attribute {attribute} more than once")]
    DuplicateAttribute { site: String, attribute: String },
}
