use crate::{error::Error, ether::provider::MultiTransportProvider};
use alloy::{primitives::TxHash, rpc::types::Transaction};
use backoff::ExponentialBackoff;
use std::time::Duration;
use tracing::{debug, error, trace};

/// Get the transaction with the provided hash. Each attempt is bounded by `timeout_ms`, and
/// transient provider failures are retried until that budget is spent.
///
/// ```no_run
/// use dex2_common::ether::rpc::get_transaction;
///
/// // let tx = get_transaction("0x96f7...", "https://eth.llamarpc.com", 8_000).await?;
/// ```
pub async fn get_transaction(
    transaction_hash: &str,
    rpc_url: &str,
    timeout_ms: u64,
) -> Result<Transaction, Error> {
    let tx_hash = transaction_hash.parse::<TxHash>().map_err(|e| {
        Error::ParseError(format!("invalid transaction hash '{transaction_hash}': {e}"))
    })?;
    let timeout = Duration::from_millis(timeout_ms);

    let transaction = backoff::future::retry(
        ExponentialBackoff { max_elapsed_time: Some(timeout), ..ExponentialBackoff::default() },
        || async move {
            trace!("fetching transaction '{}' from node", tx_hash);

            let provider = MultiTransportProvider::connect(rpc_url).await.map_err(|e| {
                error!("failed to connect to RPC provider '{}' .", rpc_url);
                backoff::Error::Permanent(Error::RpcError(format!(
                    "failed to connect to provider '{rpc_url}': {e}"
                )))
            })?;

            match tokio::time::timeout(timeout, provider.get_transaction_by_hash(tx_hash)).await {
                Ok(Ok(Some(transaction))) => Ok(transaction),
                Ok(Ok(None)) => Err(backoff::Error::Permanent(Error::RpcError(format!(
                    "transaction '{tx_hash}' not found"
                )))),
                Ok(Err(e)) => {
                    debug!("transient failure fetching transaction '{}': {}", tx_hash, e);
                    Err(backoff::Error::transient(Error::RpcError(format!(
                        "failed to get transaction: {e}"
                    ))))
                }
                Err(_) => Err(backoff::Error::Permanent(Error::RpcError(format!(
                    "timed out after {timeout_ms}ms fetching transaction '{tx_hash}'"
                )))),
            }
        },
    )
    .await?;

    if transaction.block_hash.is_none() {
        debug!("transaction '{}' has not been confirmed yet", tx_hash);
    }

    Ok(transaction)
}
