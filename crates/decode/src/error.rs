use alloy::primitives::U256;
use dex2_common::utils::strings::encode_hex_reduced;

use crate::sequence::Side;

/// Errors produced by [`crate::decode`] and friends
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The target could not be turned into calldata
    #[error("Fetch error: {0}")]
    FetchError(String),
    /// Internal error
    #[error("Internal error: {0}")]
    Eyre(#[from] eyre::Report),
    /// Calldata too short to hold a selector
    #[error("invalid calldata length: expected at least 4 bytes, got {0}")]
    InvalidCalldataLength(usize),
    /// The selector is not a Dex2 entry point
    #[error("unknown selector: 0x{0}")]
    UnknownSelector(String),
    /// The call arguments are not valid ABI for the selected function
    #[error("ABI error: {0}")]
    AbiError(#[from] alloy::sol_types::Error),
    /// The exeSequence payload is malformed
    #[error("Sequence error: {0}")]
    SequenceError(#[from] SequenceError),
    /// Serialization failure
    #[error("Json error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// Failures of the operation-sequence decoder. Each one halts decoding; the trace rendered up to
/// that point is kept alongside it in [`crate::SequenceDecode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SequenceError {
    /// The body holds no words at all
    #[error("empty body")]
    EmptyBody,
    /// The header has bits set above `newLogicTimeSec`
    #[error("invalid header: extra bits {}", encode_hex_reduced(*.remainder))]
    InvalidHeader {
        /// The bits left after both header fields were taken
        remainder: U256,
    },
    /// The high byte of an opcode is not `0xDE`
    #[error("wrong magic number in opcode {opcode:#06x} at word {index}")]
    WrongMagicNumber {
        /// The full 16-bit opcode
        opcode: u16,
        /// Index of the word in the body
        index: usize,
    },
    /// The opcode carries the magic byte but names no known operation
    #[error("invalid opcode {opcode:#06x} at word {index}")]
    InvalidOpcode {
        /// The full 16-bit opcode
        opcode: u16,
        /// Index of the word in the body
        index: usize,
    },
    /// A MatchOrders operand needs more trailing words than the body has left
    #[error("not enough inputs for {side} order: needs {needed} more word(s), {available} left")]
    InsufficientInputs {
        /// The operand being decoded
        side: Side,
        /// Words required
        needed: usize,
        /// Words remaining
        available: usize,
    },
    /// The order operand discriminator is not 0, 27 or 28
    #[error("invalid discriminator v={v} for {side} order")]
    InvalidDiscriminator {
        /// The operand being decoded
        side: Side,
        /// The discriminator byte
        v: u8,
    },
    /// A fully specified word has bits left over after all its fields were taken
    #[error("extra bits in {field}: {}", encode_hex_reduced(*.remainder))]
    ExtraBitsInField {
        /// The name of the word's layout
        field: &'static str,
        /// The leftover bits
        remainder: U256,
    },
    /// A signature word of a new order is zero
    #[error("signature component {component} of {side} order is zero")]
    ZeroSignatureComponent {
        /// The operand being decoded
        side: Side,
        /// `s` or `t`
        component: &'static str,
    },
}
