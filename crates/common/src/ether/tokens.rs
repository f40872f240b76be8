//! Token metadata for rendering Dex2 token amounts.
//!
//! The table is built once by the caller and handed around by reference; nothing in here is
//! global or mutable.

use alloy::primitives::U256;
use hashbrown::HashMap;
use tracing::warn;

/// Number of fractional digits shown when rendering a token amount.
pub const DISPLAY_DECIMALS: u32 = 8;

/// Metadata for a single listed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenInfo {
    /// The ticker of the token, e.g. `LOOM`.
    pub name: String,
    /// The number of decimals of the token's smallest unit.
    pub decimals: u8,
}

/// An immutable lookup table from Dex2 token codes to [`TokenInfo`].
#[derive(Debug, Clone, Default)]
pub struct TokenTable {
    tokens: HashMap<u16, TokenInfo>,
}

impl TokenTable {
    /// Build a table from `(code, name, decimals)` triples.
    pub fn new<'a>(entries: impl IntoIterator<Item = (u16, &'a str, u8)>) -> Self {
        Self {
            tokens: entries
                .into_iter()
                .map(|(code, name, decimals)| (code, TokenInfo { name: name.to_string(), decimals }))
                .collect(),
        }
    }

    /// The token listing of the Dex2 mainnet deployment.
    pub fn dex2_mainnet() -> Self {
        Self::new([
            (100, "LOOM", 18),
            (101, "KNC", 18),
            (102, "ZIL", 12),
            (103, "CTXC", 18),
            (104, "YEE", 18),
            (105, "QKC", 18),
            (106, "MEDX", 8),
            (107, "PAL", 18),
            (108, "HPB", 18),
            (109, "XUC", 18),
            (110, "BUT", 18),
            (116, "TTC", 18),
            (117, "AIT", 18),
            (118, "HSC", 18),
            (119, "SNTR", 4),
            (120, "MTC", 18),
            (121, "VITE", 18),
            (122, "XYO", 18),
            (123, "TAU", 18),
            (124, "SNT", 18),
            (125, "TFD", 18),
            (126, "LND", 18),
            (127, "MVC", 18),
            (128, "TOMO", 18),
            (129, "TRAC", 18),
            (130, "PAI", 18),
            (131, "EDR", 18),
            (132, "MAN", 18),
            (133, "HYDRO", 18),
            (134, "DAG", 8),
        ])
    }

    /// Look up a token by its code.
    pub fn get(&self, code: u16) -> Option<&TokenInfo> {
        self.tokens.get(&code)
    }

    /// The ticker for `code`, or `#<code>` when the code is not listed.
    pub fn name(&self, code: u16) -> String {
        match self.get(code) {
            Some(info) => info.name.clone(),
            None => {
                warn!("token code {} is not listed", code);
                format!("#{code}")
            }
        }
    }

    /// Render `amount` of token `code` as `Token(NAME): W.FFFFFFFF`.
    ///
    /// The amount is scaled by the token's decimals and truncated to [`DISPLAY_DECIMALS`]
    /// fractional digits. Unlisted tokens render the raw amount.
    pub fn format_amount(&self, code: u16, amount: U256) -> String {
        match self.get(code) {
            Some(info) => {
                format!("Token({}): {}", info.name, normalize_amount(amount, info.decimals))
            }
            None => {
                warn!("token code {} is not listed, showing raw amount", code);
                format!("Token(#{code}): {amount}")
            }
        }
    }
}

/// Divide `amount` by `10^decimals`, keeping [`DISPLAY_DECIMALS`] truncated fractional digits.
pub fn normalize_amount(amount: U256, decimals: u8) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / scale;
    let fraction = (amount % scale).saturating_mul(U256::from(10u64.pow(DISPLAY_DECIMALS))) / scale;
    format!("{whole}.{:0>width$}", fraction.to_string(), width = DISPLAY_DECIMALS as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_amount_eighteen_decimals() {
        let amount = U256::from(1_500_000_000_000_000_000u128);
        assert_eq!(normalize_amount(amount, 18), "1.50000000");
    }

    #[test]
    fn test_normalize_amount_truncates() {
        // 0.123456789 with 9 decimals
        assert_eq!(normalize_amount(U256::from(123_456_789u64), 9), "0.12345678");
    }

    #[test]
    fn test_normalize_amount_few_decimals() {
        assert_eq!(normalize_amount(U256::from(12_345u64), 4), "1.23450000");
    }

    #[test]
    fn test_format_amount_known_token() {
        let table = TokenTable::dex2_mainnet();
        let amount = U256::from(250_000_000u64);
        assert_eq!(table.format_amount(106, amount), "Token(MEDX): 2.50000000");
    }

    #[test]
    fn test_format_amount_unknown_token() {
        let table = TokenTable::dex2_mainnet();
        assert_eq!(table.format_amount(999, U256::from(42u64)), "Token(#999): 42");
        assert_eq!(table.name(999), "#999");
    }

    #[test]
    fn test_mainnet_listing() {
        let table = TokenTable::dex2_mainnet();
        assert_eq!(table.get(102), Some(&TokenInfo { name: "ZIL".to_string(), decimals: 12 }));
        assert!(table.get(111).is_none());
        assert_eq!(table.name(134), "DAG");
    }
}
