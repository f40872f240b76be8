//! Error types for the common utilities

/// Errors that can occur in the shared utilities
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A generic error with a message
    #[error("Error: {0}")]
    Generic(String),

    /// An error that occurred while talking to an RPC endpoint
    #[error("RPC error: {0}")]
    RpcError(String),

    /// An error that occurred during parsing
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
}
