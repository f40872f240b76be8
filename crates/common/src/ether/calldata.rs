use super::rpc::get_transaction;
use crate::{
    constants::{CALLDATA_REGEX, TRANSACTION_HASH_REGEX},
    utils::strings::decode_hex,
    Error,
};
use alloy::consensus::Transaction as _;

/// Resolve `target` into raw calldata. A 32-byte hex target is treated as a transaction hash
/// and fetched from `rpc_url`, unless `raw` is set; any other hex string is taken verbatim.
pub async fn get_calldata_from_target(
    target: &str,
    raw: bool,
    rpc_url: &str,
    timeout_ms: u64,
) -> Result<Vec<u8>, Error> {
    if TRANSACTION_HASH_REGEX.is_match(target).unwrap_or(false) && !raw {
        let raw_transaction = get_transaction(target, rpc_url, timeout_ms).await?;

        Ok(raw_transaction.input().to_vec())
    } else if CALLDATA_REGEX.is_match(target).unwrap_or(false) {
        Ok(decode_hex(target)?)
    } else {
        Err(Error::Generic(
            "invalid target. must be a transaction hash or calldata (bytes).".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_calldata_when_target_is_calldata() {
        let calldata = get_calldata_from_target("0xdeadbeef", false, "", 1_000)
            .await
            .expect("failed to get calldata from target");

        assert_eq!(calldata, vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[tokio::test]
    async fn test_get_calldata_raw_hash_sized_target() {
        let target = "0x96f7d81da5d0ecfd9e26e04937a6fa15f31f39f84acb6f9c50a72fad63689857";
        let calldata = get_calldata_from_target(target, true, "", 1_000)
            .await
            .expect("failed to get calldata from target");

        assert_eq!(calldata.len(), 32);
    }

    #[tokio::test]
    async fn test_get_calldata_when_target_is_neither() {
        let calldata =
            get_calldata_from_target("asfnsdalkfasdlfnlasdkfnalkdsfndaskljfnasldkjfnasf", false, "", 1_000)
                .await;

        assert!(calldata.is_err());
    }

    #[tokio::test]
    async fn test_get_calldata_when_target_is_txhash() {
        let Ok(rpc_url) = std::env::var("RPC_URL") else {
            println!("RPC_URL not set, skipping test");
            return;
        };

        let calldata = get_calldata_from_target(
            "0x96f7d81da5d0ecfd9e26e04937a6fa15f31f39f84acb6f9c50a72fad63689857",
            false,
            &rpc_url,
            8_000,
        )
        .await
        .expect("failed to get calldata from target");

        assert!(!calldata.is_empty());
    }
}
