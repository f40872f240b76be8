use alloy::primitives::U256;
use serde::Serialize;
use tracing::trace;

use super::{bits::BitFieldReader, trace::TraceRenderer};
use crate::error::SequenceError;

/// The optional `exeSequence` header word.
///
/// Layout, low to high: `beginIndex`(64) `newLogicTimeSec`(64); every other bit must be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    /// Index of the first operation in this batch
    pub begin_index: u64,
    /// Logical exchange time in seconds after this batch
    pub new_logic_time_sec: u64,
}

pub(crate) fn decode_header(
    word: U256,
    out: &mut TraceRenderer,
) -> Result<Header, SequenceError> {
    let mut reader = BitFieldReader::new(word);
    let begin_index = reader.pop_u64();
    let new_logic_time_sec = reader.pop_u64();
    if !reader.remainder_is_zero() {
        return Err(SequenceError::InvalidHeader { remainder: reader.remainder() });
    }
    trace!("header: beginIndex={}, newLogicTimeSec={}", begin_index, new_logic_time_sec);

    out.line(format!("newLogicTimeSec: {new_logic_time_sec}"));
    out.line(format!("beginIndex: {begin_index}"));
    Ok(Header { begin_index, new_logic_time_sec })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_header() {
        let word = (U256::from(1_546_300_800u64) << 64) | U256::from(42u64);
        let mut out = TraceRenderer::new();

        let header = decode_header(word, &mut out).expect("valid header");
        assert_eq!(header, Header { begin_index: 42, new_logic_time_sec: 1_546_300_800 });
        assert_eq!(out.text(), "newLogicTimeSec: 1546300800\nbeginIndex: 42\n");
    }

    #[test]
    fn test_header_with_high_bits_is_rejected() {
        for bit in [128usize, 200, 255] {
            let mut out = TraceRenderer::new();
            let result = decode_header(U256::from(1u8) << bit, &mut out);
            assert!(matches!(result, Err(SequenceError::InvalidHeader { .. })));
            assert!(out.is_empty());
        }
    }
}
