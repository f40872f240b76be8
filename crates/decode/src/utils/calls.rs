use alloy::{
    primitives::{Address, U256},
    sol,
    sol_types::SolInterface,
};
use dex2_common::{ether::tokens::TokenTable, utils::strings::encode_hex};
use serde::Serialize;
use tracing::{debug, trace};

use crate::error::Error;

sol! {
    /// The Dex2 exchange entry points.
    #[derive(Debug)]
    interface IDex2 {
        function depositEth(address traderAddr) external payable;
        function depositToken(address traderAddr, uint16 tokenCode, uint256 originalAmount) external;
        function withdrawEth(address traderAddr) external;
        function withdrawToken(address traderAddr, uint16 tokenCode) external;
        function exeSequence(uint256 header, uint256[] body) external;
    }
}

/// A decoded call to one of the Dex2 entry points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "method", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Dex2Call {
    /// `depositEth(address)`
    DepositEth {
        /// The depositing trader
        trader_addr: Address,
    },
    /// `depositToken(address,uint16,uint256)`
    DepositToken {
        /// The depositing trader
        trader_addr: Address,
        /// The deposited token
        token_code: u16,
        /// Amount in the token's smallest unit
        original_amount: U256,
    },
    /// `withdrawEth(address)`
    WithdrawEth {
        /// The withdrawing trader
        trader_addr: Address,
    },
    /// `withdrawToken(address,uint16)`
    WithdrawToken {
        /// The withdrawing trader
        trader_addr: Address,
        /// The withdrawn token
        token_code: u16,
    },
    /// `exeSequence(uint256,uint256[])`
    ExeSequence {
        /// Packed `beginIndex` and `newLogicTimeSec`
        header: U256,
        /// The packed operation words
        body: Vec<U256>,
    },
}

impl Dex2Call {
    /// Decode `calldata` (selector included) into a [`Dex2Call`].
    pub fn decode(calldata: &[u8]) -> Result<Self, Error> {
        let selector: [u8; 4] = calldata
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or(Error::InvalidCalldataLength(calldata.len()))?;
        trace!("decoding call with selector 0x{}", encode_hex(&selector));

        if !IDex2::IDex2Calls::valid_selector(selector) {
            return Err(Error::UnknownSelector(encode_hex(&selector)));
        }

        let call = match IDex2::IDex2Calls::abi_decode(calldata)? {
            IDex2::IDex2Calls::depositEth(call) => Dex2Call::DepositEth { trader_addr: call.traderAddr },
            IDex2::IDex2Calls::depositToken(call) => Dex2Call::DepositToken {
                trader_addr: call.traderAddr,
                token_code: call.tokenCode,
                original_amount: call.originalAmount,
            },
            IDex2::IDex2Calls::withdrawEth(call) => {
                Dex2Call::WithdrawEth { trader_addr: call.traderAddr }
            }
            IDex2::IDex2Calls::withdrawToken(call) => {
                Dex2Call::WithdrawToken { trader_addr: call.traderAddr, token_code: call.tokenCode }
            }
            IDex2::IDex2Calls::exeSequence(call) => {
                Dex2Call::ExeSequence { header: call.header, body: call.body }
            }
        };
        debug!("decoded call to '{}'", call.name());

        Ok(call)
    }

    /// The Solidity name of the called function.
    pub fn name(&self) -> &'static str {
        match self {
            Dex2Call::DepositEth { .. } => "depositEth",
            Dex2Call::DepositToken { .. } => "depositToken",
            Dex2Call::WithdrawEth { .. } => "withdrawEth",
            Dex2Call::WithdrawToken { .. } => "withdrawToken",
            Dex2Call::ExeSequence { .. } => "exeSequence",
        }
    }

    /// A one-line description of the call. Token codes are resolved through `tokens`.
    pub fn summary(&self, tokens: &TokenTable) -> String {
        match self {
            Dex2Call::DepositEth { trader_addr } => format!("Deposit ETH by {trader_addr}"),
            Dex2Call::DepositToken { trader_addr, token_code, original_amount } => format!(
                "Deposit {} by {}",
                tokens.format_amount(*token_code, *original_amount),
                trader_addr
            ),
            Dex2Call::WithdrawEth { trader_addr } => format!("Withdraw ETH for {trader_addr}"),
            Dex2Call::WithdrawToken { trader_addr, token_code } => {
                format!("Withdraw Token ({}) for {}", tokens.name(*token_code), trader_addr)
            }
            Dex2Call::ExeSequence { body, .. } => {
                format!("Execute sequence of {} word(s)", body.len())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::sol_types::SolCall;

    fn trader() -> Address {
        Address::repeat_byte(0x42)
    }

    #[test]
    fn test_decode_deposit_token() {
        let calldata = IDex2::depositTokenCall {
            traderAddr: trader(),
            tokenCode: 100,
            originalAmount: U256::from(2_000_000_000_000_000_000u128),
        }
        .abi_encode();

        let call = Dex2Call::decode(&calldata).expect("failed to decode depositToken");
        assert_eq!(
            call,
            Dex2Call::DepositToken {
                trader_addr: trader(),
                token_code: 100,
                original_amount: U256::from(2_000_000_000_000_000_000u128),
            }
        );
        assert_eq!(
            call.summary(&TokenTable::dex2_mainnet()),
            format!("Deposit Token(LOOM): 2.00000000 by {}", trader())
        );
    }

    #[test]
    fn test_decode_withdraw_calls() {
        let tokens = TokenTable::dex2_mainnet();

        let calldata = IDex2::withdrawEthCall { traderAddr: trader() }.abi_encode();
        let call = Dex2Call::decode(&calldata).expect("failed to decode withdrawEth");
        assert_eq!(call.summary(&tokens), format!("Withdraw ETH for {}", trader()));

        let calldata =
            IDex2::withdrawTokenCall { traderAddr: trader(), tokenCode: 134 }.abi_encode();
        let call = Dex2Call::decode(&calldata).expect("failed to decode withdrawToken");
        assert_eq!(call.name(), "withdrawToken");
        assert_eq!(call.summary(&tokens), format!("Withdraw Token (DAG) for {}", trader()));
    }

    #[test]
    fn test_decode_deposit_eth() {
        let calldata = IDex2::depositEthCall { traderAddr: trader() }.abi_encode();
        let call = Dex2Call::decode(&calldata).expect("failed to decode depositEth");
        assert_eq!(call, Dex2Call::DepositEth { trader_addr: trader() });
    }

    #[test]
    fn test_decode_exe_sequence() {
        let body = vec![U256::from(0x07de01u64), U256::from(0xde04u64)];
        let calldata =
            IDex2::exeSequenceCall { header: U256::from(1u64), body: body.clone() }.abi_encode();

        let call = Dex2Call::decode(&calldata).expect("failed to decode exeSequence");
        assert_eq!(call, Dex2Call::ExeSequence { header: U256::from(1u64), body });
    }

    #[test]
    fn test_decode_short_calldata() {
        assert!(matches!(
            Dex2Call::decode(&[0xde, 0xad]),
            Err(Error::InvalidCalldataLength(2))
        ));
    }

    #[test]
    fn test_decode_unknown_selector() {
        let result = Dex2Call::decode(&[0xa9, 0x05, 0x9c, 0xbb, 0x00]);
        assert!(matches!(result, Err(Error::UnknownSelector(selector)) if selector == "a9059cbb"));
    }

    #[test]
    fn test_decode_truncated_arguments() {
        let mut calldata = IDex2::depositEthCall { traderAddr: trader() }.abi_encode();
        calldata.truncate(20);
        assert!(matches!(Dex2Call::decode(&calldata), Err(Error::AbiError(_))));
    }
}
