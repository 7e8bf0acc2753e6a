//! Error types for gh-traffic.
//!
//! Fetch failures never leave the report builder: they are logged and turned
//! into absent sections. The variants here cover the rest of the pipeline.

use thiserror::Error;

/// Custom error type for traffic report operations.
#[derive(Debug, Error)]
pub enum TrafficError {
    /// Network, DNS, timeout or body decoding failure on a request.
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    HttpStatus {
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// Token could not be encoded as a header value.
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// A required credential was empty or not supplied.
    #[error("Missing required information: {0}")]
    MissingCredentials(&'static str),

    /// Error reading or writing report files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Template render error: {0}")]
    Render(#[from] tera::Error),
}
