//! Error types for appliance and configuration operations

use std::path::PathBuf;
use thiserror::Error;

/// Errors talking to the appliance over HTTP
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("appliance returned {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        /// First part of the response body, for the operator's benefit.
        detail: String,
    },

    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {path}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not a .{expected} file")]
    WrongExtension { path: PathBuf, expected: &'static str },

    #[error("invalid appliance URL '{url}'")]
    InvalidUrl { url: String },
}

/// Errors during configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration")]
    Load(#[from] confy::ConfyError),

    #[error("failed to save configuration")]
    Save(#[source] confy::ConfyError),
}
