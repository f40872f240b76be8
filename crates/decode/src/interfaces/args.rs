use clap::Parser;
use derive_builder::Builder;
use dex2_common::{constants::DEFAULT_RPC_TIMEOUT_MS, ether::calldata::get_calldata_from_target};
use dex2_config::parse_url_arg;

use crate::error::Error;

#[derive(Debug, Clone, Parser, Builder)]
#[clap(
    about = "Decodes Dex2 exchange calldata, including bit-packed exeSequence operations",
    override_usage = "dex2 decode <TARGET> [OPTIONS]"
)]
/// Arguments for the decode operation
///
/// This struct contains all the configuration parameters needed to fetch and decode
/// a call to the Dex2 exchange contract.
pub struct DecodeArgs {
    /// The target to decode, either a transaction hash or string of bytes.
    #[clap(required = true)]
    pub target: String,

    /// The RPC provider to use for fetching target calldata.
    /// This can be an explicit URL or a reference to a MESC endpoint.
    #[clap(long, short, value_parser = parse_url_arg, default_value = "", hide_default_value = true)]
    pub rpc_url: String,

    /// Timeout for fetching the transaction, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_RPC_TIMEOUT_MS)]
    pub rpc_timeout_ms: u64,

    /// Whether to treat the target as a raw calldata string. Useful if the target is exactly 32
    /// bytes.
    #[clap(long)]
    pub raw: bool,

    /// 'print' to print the trace, 'json' to print the decoded call as JSON, or a directory to
    /// write the output to.
    #[clap(long = "output", short = 'o', default_value = "print", hide_default_value = true)]
    pub output: String,
}

impl DecodeArgs {
    /// Retrieves the calldata from the specified target
    ///
    /// A transaction hash is fetched from the configured RPC provider; anything else is parsed
    /// as hex calldata.
    pub async fn get_calldata(&self) -> Result<Vec<u8>, Error> {
        get_calldata_from_target(&self.target, self.raw, &self.rpc_url, self.rpc_timeout_ms)
            .await
            .map_err(|e| Error::FetchError(e.to_string()))
    }
}

impl DecodeArgsBuilder {
    /// Creates a new DecodeArgsBuilder with default values
    pub fn new() -> Self {
        Self {
            target: Some(String::new()),
            rpc_url: Some(String::new()),
            rpc_timeout_ms: Some(DEFAULT_RPC_TIMEOUT_MS),
            raw: Some(false),
            output: Some(String::from("print")),
        }
    }
}
