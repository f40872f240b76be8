use dex2_common::ether::tokens::TokenTable;
use tracing::{info, warn};

use crate::{
    error::Error,
    interfaces::{DecodeArgs, DecodeResult},
    sequence::decode_sequence,
    utils::Dex2Call,
};

/// The entrypoint for the decode module. Fetches the target's calldata and decodes it using the
/// Dex2 mainnet token listing.
pub async fn decode(args: DecodeArgs) -> Result<DecodeResult, Error> {
    decode_with_tokens(args, &TokenTable::dex2_mainnet()).await
}

/// Like [`decode`], resolving token codes through `tokens`.
pub async fn decode_with_tokens(
    args: DecodeArgs,
    tokens: &TokenTable,
) -> Result<DecodeResult, Error> {
    let calldata = args.get_calldata().await?;
    info!("decoding {} bytes of calldata", calldata.len());
    decode_calldata(&calldata, tokens)
}

/// Decode raw calldata (selector included). For `exeSequence`, the operation sequence is decoded
/// too; its errors are reported through [`DecodeResult::error`] rather than as an `Err`.
pub fn decode_calldata(calldata: &[u8], tokens: &TokenTable) -> Result<DecodeResult, Error> {
    let call = Dex2Call::decode(calldata)?;
    let summary = call.summary(tokens);

    let sequence = match &call {
        Dex2Call::ExeSequence { header, body } => {
            let sequence = decode_sequence(Some(*header), body);
            match &sequence.error {
                Some(e) => warn!("sequence decoding failed: {}", e),
                None => info!("decoded {} operation(s)", sequence.operations.len()),
            }
            Some(sequence)
        }
        _ => None,
    };

    Ok(DecodeResult { call, summary, sequence })
}
