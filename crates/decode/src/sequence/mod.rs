//! The `exeSequence` operation-sequence decoder.
//!
//! The body is a list of 256-bit words. Each operation starts with a word whose low 16 bits are
//! the opcode; most operations fit in that single word, MatchOrders spans two to eight. Decoding
//! renders one trace line per field as it goes and stops at the first malformed word.

mod bits;
mod header;
mod ops;
mod trace;

pub use bits::BitFieldReader;
pub use header::Header;
pub use ops::{NewOrder, Opcode, Operation, OrderKey, OrderOperand, Side, OPCODE_MAGIC};
pub use trace::TraceRenderer;

use alloy::primitives::U256;
use tracing::{debug, trace};

use crate::error::SequenceError;
use header::decode_header;
use ops::{
    decode_confirm_deposit, decode_initiate_withdraw, decode_match_orders, decode_unimplemented,
};

/// The outcome of [`decode_sequence`]: whatever was decoded, the rendered trace, and the error
/// that stopped decoding, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceDecode {
    /// The decoded header, when one was given and valid
    pub header: Option<Header>,
    /// Operations decoded completely, in body order
    pub operations: Vec<Operation>,
    /// The trace, including the partially rendered failing operation
    pub trace: TraceRenderer,
    /// The failure that halted decoding
    pub error: Option<SequenceError>,
}

impl SequenceDecode {
    /// The rendered trace text.
    pub fn text(&self) -> String {
        self.trace.text()
    }

    /// True if the whole body decoded.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Split into trace text and optional error.
    pub fn into_parts(self) -> (String, Option<SequenceError>) {
        (self.trace.text(), self.error)
    }

    fn run(&mut self, header: Option<U256>, body: &[U256]) -> Result<(), SequenceError> {
        if body.is_empty() {
            return Err(SequenceError::EmptyBody);
        }

        if let Some(word) = header {
            self.header = Some(decode_header(word, &mut self.trace)?);
        }
        self.trace.line(format!("len(body): {}", body.len()));

        let mut index = 0;
        while index < body.len() {
            let mut reader = BitFieldReader::new(body[index]);
            let raw_opcode = reader.pop_u16();
            if (raw_opcode >> 8) as u8 != OPCODE_MAGIC {
                return Err(SequenceError::WrongMagicNumber { opcode: raw_opcode, index });
            }
            let opcode = Opcode::try_from(raw_opcode)
                .map_err(|opcode| SequenceError::InvalidOpcode { opcode, index })?;
            debug!("word {}: dispatching {} ({:#06x})", index, opcode, raw_opcode);

            let (operation, consumed) = match opcode {
                Opcode::ConfirmDeposit => (decode_confirm_deposit(&mut reader, &mut self.trace), 1),
                Opcode::InitiateWithdraw => {
                    (decode_initiate_withdraw(&mut reader, &mut self.trace), 1)
                }
                Opcode::MatchOrders => {
                    decode_match_orders(&mut reader, &body[index + 1..], &mut self.trace)?
                }
                Opcode::HardCancelOrder => {
                    (decode_unimplemented(Operation::HardCancelOrder, &mut self.trace), 1)
                }
                Opcode::SetFeeRates => {
                    (decode_unimplemented(Operation::SetFeeRates, &mut self.trace), 1)
                }
                Opcode::SetFeeRebatePercent => {
                    (decode_unimplemented(Operation::SetFeeRebatePercent, &mut self.trace), 1)
                }
            };
            trace!("word {}: {} consumed {} word(s)", index, opcode, consumed);

            self.operations.push(operation);
            index += consumed;
            if index < body.len() {
                self.trace.separator();
            }
        }

        Ok(())
    }
}

/// Decode an `exeSequence` header and body.
///
/// Never fails outright: on malformed input the returned [`SequenceDecode`] carries the error
/// together with everything rendered before it, including the fields of the operation that was
/// being decoded. The inputs are only read.
///
/// ```
/// use alloy::primitives::U256;
/// use dex2_decoder::decode_sequence;
///
/// let body = [(U256::from(7u64) << 16) | U256::from(0xde01u64)];
/// let decoded = decode_sequence(None, &body);
///
/// assert!(decoded.is_ok());
/// assert_eq!(decoded.text(), "len(body): 1\noperation ConfirmDeposit:\n  depositIndex:  7\n");
/// ```
pub fn decode_sequence(header: Option<U256>, body: &[U256]) -> SequenceDecode {
    let mut decoded = SequenceDecode::default();
    if let Err(e) = decoded.run(header, body) {
        debug!("sequence decoding stopped: {}", e);
        decoded.error = Some(e);
    }
    decoded
}
