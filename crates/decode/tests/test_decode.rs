//! Integration tests for decode functionality.

mod integration_tests {
    use alloy::{
        primitives::{Address, U256},
        sol,
        sol_types::SolCall,
    };
    use dex2_common::utils::strings::encode_hex;
    use dex2_decoder::{
        decode, DecodeArgs, DecodeArgsBuilder, Dex2Call, Operation, SequenceError,
    };

    sol! {
        function exeSequence(uint256 header, uint256[] body) external;
        function depositToken(address traderAddr, uint16 tokenCode, uint256 originalAmount) external;
    }

    fn args_for(calldata: &[u8]) -> DecodeArgs {
        DecodeArgsBuilder::new()
            .target(format!("0x{}", encode_hex(calldata)))
            .build()
            .expect("failed to build DecodeArgs")
    }

    fn op_word(opcode: u16, payload: U256) -> U256 {
        (payload << 16) | U256::from(opcode)
    }

    #[tokio::test]
    async fn test_decode_exe_sequence() {
        let header = (U256::from(1_546_300_800u64) << 64) | U256::from(3u64);
        let body = vec![
            op_word(0xde01, U256::from(7u64)),
            op_word(0xde04, U256::ZERO),
        ];
        let calldata = exeSequenceCall { header, body }.abi_encode();

        let result = decode(args_for(&calldata)).await.expect("failed to decode");

        assert!(result.error().is_none());
        assert_eq!(result.call.name(), "exeSequence");
        let sequence = result.sequence.as_ref().expect("sequence should be decoded");
        assert_eq!(
            sequence.operations,
            vec![Operation::ConfirmDeposit { deposit_index: U256::from(7u64) }, Operation::HardCancelOrder]
        );
        assert_eq!(
            sequence.text(),
            "newLogicTimeSec: 1546300800\nbeginIndex: 3\nlen(body): 2\n\
             operation ConfirmDeposit:\n  depositIndex:  7\n\n\
             operation HardCancelOrder:\n  <not yet implemented>\n"
        );
        assert!(result.text().starts_with("exeSequence\nExecute sequence of 2 word(s)\n"));
    }

    #[tokio::test]
    async fn test_decode_exe_sequence_keeps_partial_trace() {
        let body = vec![op_word(0xde01, U256::from(1u64)), op_word(0xde09, U256::ZERO)];
        let calldata = exeSequenceCall { header: U256::ZERO, body }.abi_encode();

        let result = decode(args_for(&calldata)).await.expect("decode should not fail outright");

        assert_eq!(result.error(), Some(&SequenceError::InvalidOpcode { opcode: 0xde09, index: 1 }));
        let sequence = result.sequence.as_ref().expect("sequence should be decoded");
        assert_eq!(sequence.operations.len(), 1);
        assert!(sequence.text().ends_with("  depositIndex:  1\n\n"));

        let json = result.to_json().expect("failed to serialize");
        assert!(json.contains("invalid opcode 0xde09 at word 1"));
    }

    #[tokio::test]
    async fn test_decode_exe_sequence_empty_body() {
        let calldata = exeSequenceCall { header: U256::ZERO, body: vec![] }.abi_encode();

        let result = decode(args_for(&calldata)).await.expect("decode should not fail outright");
        assert_eq!(result.error(), Some(&SequenceError::EmptyBody));
        assert_eq!(result.sequence.as_ref().map(|s| s.text()), Some(String::new()));
    }

    #[tokio::test]
    async fn test_decode_deposit_token() {
        let trader = Address::repeat_byte(0x42);
        let calldata = depositTokenCall {
            traderAddr: trader,
            tokenCode: 119,
            originalAmount: U256::from(123_456u64),
        }
        .abi_encode();

        let result = decode(args_for(&calldata)).await.expect("failed to decode");
        assert!(result.sequence.is_none());
        assert!(matches!(result.call, Dex2Call::DepositToken { token_code: 119, .. }));
        assert_eq!(result.summary, format!("Deposit Token(SNTR): 12.34560000 by {trader}"));
    }

    #[tokio::test]
    async fn test_decode_invalid_target() {
        let args = DecodeArgsBuilder::new()
            .target(String::from("not calldata"))
            .build()
            .expect("failed to build DecodeArgs");

        assert!(matches!(decode(args).await, Err(dex2_decoder::Error::FetchError(_))));
    }

    #[tokio::test]
    async fn test_decode_transaction_hash() {
        let Ok(rpc_url) = std::env::var("RPC_URL") else {
            println!("RPC_URL not set, skipping test");
            return;
        };

        let args = DecodeArgsBuilder::new()
            .target(String::from(
                "0x96f7d81da5d0ecfd9e26e04937a6fa15f31f39f84acb6f9c50a72fad63689857",
            ))
            .rpc_url(rpc_url)
            .build()
            .expect("failed to build DecodeArgs");

        let _ = decode(args).await;
    }
}
