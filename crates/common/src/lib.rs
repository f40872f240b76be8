//! Common utilities, constants, and resources used across the dex2 codebase.
//!
//! This crate provides shared functionality for the dex2 toolkit, including
//! Ethereum-related utilities (RPC access, calldata fetching, token metadata)
//! and general utility functions.

/// Constants used throughout the dex2 codebase.
pub mod constants;

/// Error types shared by the common utilities.
pub mod error;

/// Utilities for interacting with Ethereum, including calldata, RPC and token
/// metadata.
pub mod ether;

/// General utility functions and types for common tasks.
pub mod utils;

pub use error::Error;
