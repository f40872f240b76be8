pub(crate) mod args;
pub(crate) mod error;
pub(crate) mod log_args;
pub(crate) mod output;

use args::{Arguments, SequenceArgs, Subcommands};
use error::Error;
use output::build_output_path;
use tracing::{error, info};

use clap::Parser;

use dex2_common::{constants::DEFAULT_RPC_TIMEOUT_MS, utils::io::file::write_file};
use dex2_config::{config, Configuration};
use dex2_decoder::{decode, decode_sequence, DecodeArgs, SequenceError};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let args = Arguments::parse();

    // setup logging; the guard keeps the file writer flushing until exit
    let _guard = args
        .logs
        .init_tracing()
        .map_err(|e| Error::Generic(format!("failed to initialize tracing: {}", e)))?;

    match args.sub {
        Subcommands::Decode(mut cmd) => {
            let configuration = Configuration::load()
                .map_err(|e| Error::Generic(format!("failed to load configuration: {}", e)))?;
            apply_configuration(&mut cmd, configuration);

            let result = decode(cmd.clone()).await?;

            match cmd.output.as_str() {
                "print" => result.display(),
                "json" => println!("{}", result.to_json()?),
                output => {
                    let output_path = build_output_path(output, "decoded.txt");
                    write_file(&output_path, &result.text())
                        .map_err(|e| Error::Generic(format!("failed to write output: {}", e)))?;
                    info!("wrote decoded output to '{}'", output_path);
                }
            }

            if let Some(e) = result.error() {
                return Err(report(e.clone()));
            }
        }

        Subcommands::Sequence(cmd) => run_sequence(cmd)?,

        Subcommands::Config(cmd) => {
            config(cmd).map_err(|e| Error::Generic(format!("failed to run config: {}", e)))?;
        }
    }

    Ok(())
}

/// Fill options left empty on the command line from the stored configuration.
fn apply_configuration(cmd: &mut DecodeArgs, configuration: Configuration) {
    // if the user has not specified a rpc url, use the default
    if cmd.rpc_url.is_empty() {
        cmd.rpc_url = configuration.rpc_url;
    }

    // an untouched timeout defers to the configured one
    if cmd.rpc_timeout_ms == DEFAULT_RPC_TIMEOUT_MS {
        cmd.rpc_timeout_ms = configuration.rpc_timeout_ms;
    }
}

/// Decode words given on the command line. Needs neither the network nor the configuration.
fn run_sequence(cmd: SequenceArgs) -> Result<(), Error> {
    let decoded = decode_sequence(cmd.header, &cmd.words);
    decoded.trace.display();

    match decoded.error {
        Some(e) => Err(report(e)),
        None => Ok(()),
    }
}

/// Log a sequence error after its partial trace was printed.
fn report(e: SequenceError) -> Error {
    error!("failed to decode sequence: {}", e);
    Error::SequenceError(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;
    use dex2_decoder::DecodeArgsBuilder;

    #[test]
    fn test_run_sequence() {
        let cmd = SequenceArgs { header: None, words: vec![U256::from(0x7de01u64)] };
        assert!(run_sequence(cmd).is_ok());
    }

    #[test]
    fn test_run_sequence_reports_error() {
        let cmd = SequenceArgs { header: None, words: vec![U256::from(0xde09u64)] };
        assert!(matches!(
            run_sequence(cmd),
            Err(Error::SequenceError(SequenceError::InvalidOpcode { opcode: 0xde09, index: 0 }))
        ));
    }

    #[test]
    fn test_apply_configuration_fills_empty_options() {
        let mut cmd = DecodeArgsBuilder::new()
            .target(String::from("0xdeadbeef"))
            .build()
            .expect("failed to build DecodeArgs");
        let configuration =
            Configuration { rpc_url: String::from("http://localhost:8545"), rpc_timeout_ms: 2_500 };

        apply_configuration(&mut cmd, configuration);
        assert_eq!(cmd.rpc_url, "http://localhost:8545");
        assert_eq!(cmd.rpc_timeout_ms, 2_500);
    }

    #[test]
    fn test_apply_configuration_keeps_explicit_options() {
        let mut cmd = DecodeArgsBuilder::new()
            .target(String::from("0xdeadbeef"))
            .rpc_url(String::from("http://node:8545"))
            .rpc_timeout_ms(1_000)
            .build()
            .expect("failed to build DecodeArgs");
        let configuration =
            Configuration { rpc_url: String::from("http://localhost:8545"), rpc_timeout_ms: 2_500 };

        apply_configuration(&mut cmd, configuration);
        assert_eq!(cmd.rpc_url, "http://node:8545");
        assert_eq!(cmd.rpc_timeout_ms, 1_000);
    }
}
