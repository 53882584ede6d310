//! Error types for Larynx

use thiserror::Error;

pub type ServerResult<T> = std::result::Result<T, ProtocolError>;

/// Fatal protocol-level failures.
///
/// Everything here terminates the run loop: the engine defines no
/// partial-message recovery. Soft outcomes (unknown or unimplemented
/// methods) are represented as response data, never as an error.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Missing Content-Length header")]
    MissingContentLength,

    #[error("Invalid Content-Length: {0}")]
    InvalidContentLength(String),

    #[error("Malformed header line: {0}")]
    MalformedHeader(String),

    #[error("Unexpected end of input: {0}")]
    UnexpectedEof(&'static str),

    #[error("Malformed message: {0}")]
    MalformedMessage(String),

    #[error("Invalid params for '{method}': {source}")]
    InvalidParams {
        method: &'static str,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
