//! Error types for the decode and RPC paths.

use thiserror::Error;

/// Failure decoding wire bytes into blocks or transactions.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The baseline consensus codec rejected the bytes.
    #[error("structural decode error: {0}")]
    Structural(#[from] bitcoin::consensus::encode::Error),
    /// A fixed-size field ran past the end of the buffer.
    #[error("buffer truncated: wanted {wanted} more bytes, have {have}")]
    Truncated { wanted: usize, have: usize },
}

/// Failure talking to or interpreting a JSON-RPC backend.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("rpc transport: {0}")]
    Transport(String),
    /// The backend answered with an embedded error object.
    #[error("rpc error {code}: {message}")]
    Server { code: i64, message: String },
    #[error("rpc method {0} returned no result")]
    MissingResult(&'static str),
    #[error("rpc response for {method} has unexpected shape: {source}")]
    Shape {
        method: &'static str,
        source: serde_json::Error,
    },
}
