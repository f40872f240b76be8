use alloy::primitives::U256;
use clap::{Args, Parser, Subcommand};
use dex2_common::utils::strings::parse_word;
use dex2_config::ConfigArgs;
use dex2_decoder::DecodeArgs;

use crate::log_args::LogArgs;

#[derive(Debug, Parser)]
#[clap(name = "dex2", version)]
pub struct Arguments {
    #[clap(subcommand)]
    pub sub: Subcommands,

    #[clap(flatten)]
    pub logs: LogArgs,
}

#[derive(Debug, Subcommand)]
#[clap(about = "dex2 decodes Dex2 exchange transactions, including bit-packed exeSequence batches.")]
pub enum Subcommands {
    #[clap(name = "decode", about = "Decode a Dex2 transaction or raw calldata")]
    Decode(DecodeArgs),

    #[clap(name = "sequence", about = "Decode a raw exeSequence header and body")]
    Sequence(SequenceArgs),

    #[clap(name = "config", about = "Display and edit the current configuration")]
    Config(ConfigArgs),
}

/// Arguments for decoding an operation sequence given word by word.
#[derive(Debug, Clone, Args)]
#[clap(override_usage = "dex2 sequence [--header WORD] <WORD>...")]
pub struct SequenceArgs {
    /// The header word holding `beginIndex` and `newLogicTimeSec`. Omit it to decode the body
    /// alone.
    #[clap(long, value_parser = parse_word_arg)]
    pub header: Option<U256>,

    /// The body words, each either `0x`-prefixed hex or decimal.
    #[clap(required = true, value_parser = parse_word_arg)]
    pub words: Vec<U256>,
}

fn parse_word_arg(s: &str) -> Result<U256, String> {
    parse_word(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sequence_subcommand() {
        let args = Arguments::try_parse_from([
            "dex2",
            "sequence",
            "--header",
            "0x2a",
            "0x7de01",
            "56833",
        ])
        .expect("failed to parse arguments");

        match args.sub {
            Subcommands::Sequence(cmd) => {
                assert_eq!(cmd.header, Some(U256::from(42u64)));
                assert_eq!(cmd.words, vec![U256::from(0x7de01u64), U256::from(0xde01u64)]);
            }
            other => panic!("unexpected subcommand: {other:?}"),
        }
    }

    #[test]
    fn test_sequence_requires_words() {
        assert!(Arguments::try_parse_from(["dex2", "sequence"]).is_err());
    }

    #[test]
    fn test_sequence_rejects_malformed_word() {
        assert!(Arguments::try_parse_from(["dex2", "sequence", "0xzz"]).is_err());
    }

    #[test]
    fn test_parse_decode_subcommand() {
        let args = Arguments::try_parse_from(["dex2", "decode", "0xdeadbeef", "--raw", "-o", "json"])
            .expect("failed to parse arguments");

        match args.sub {
            Subcommands::Decode(cmd) => {
                assert_eq!(cmd.target, "0xdeadbeef");
                assert!(cmd.raw);
                assert_eq!(cmd.output, "json");
            }
            other => panic!("unexpected subcommand: {other:?}"),
        }
    }
}
