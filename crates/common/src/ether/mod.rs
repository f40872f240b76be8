/// Calldata retrieval from transaction hashes or raw hex.
pub mod calldata;

/// A thin wrapper around the alloy RPC provider.
pub mod provider;

/// RPC helpers with retry and timeout handling.
pub mod rpc;

/// Token metadata used to render human-readable amounts.
pub mod tokens;
