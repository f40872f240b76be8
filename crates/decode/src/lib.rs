//! Decoding of Dex2 exchange calldata.
//!
//! The interesting part is [`decode_sequence`], which unpacks the bit-packed operation sequence
//! carried by `exeSequence(uint256 header, uint256[] body)` into typed [`Operation`]s and a
//! deterministic, human-readable trace. [`decode`] wraps it with calldata fetching and decoding
//! of the remaining Dex2 entry points.

/// Error types for the decoder
pub mod error;

mod core;
mod interfaces;
mod sequence;
mod utils;

// re-export the public interface
pub use crate::core::{decode, decode_calldata, decode_with_tokens};
pub use error::{Error, SequenceError};
pub use interfaces::{DecodeArgs, DecodeArgsBuilder, DecodeResult};
pub use sequence::{
    decode_sequence, BitFieldReader, Header, NewOrder, Opcode, Operation, OrderKey, OrderOperand,
    SequenceDecode, Side, TraceRenderer,
};
pub use utils::Dex2Call;
