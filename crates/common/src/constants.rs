use fancy_regex::Regex;
use lazy_static::lazy_static;

/// Default timeout for a single RPC request, in milliseconds.
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 8_000;

lazy_static! {
    /// The following regex is used to validate transaction hashes
    pub static ref TRANSACTION_HASH_REGEX: Regex =
        Regex::new(r"^(0x)?[0-9a-fA-F]{64}$").expect("failed to compile regex");

    /// The following regex is used to validate raw calldata
    pub static ref CALLDATA_REGEX: Regex =
        Regex::new(r"^(0x)?([0-9a-fA-F]{2})*$").expect("failed to compile regex");

    /// The following regex is used to validate a single 256-bit word given in hex
    pub static ref HEX_WORD_REGEX: Regex =
        Regex::new(r"^0x[0-9a-fA-F]{1,64}$").expect("failed to compile regex");

    /// The following regex is used to validate a decimal integer
    pub static ref DECIMAL_REGEX: Regex =
        Regex::new(r"^[0-9]+$").expect("failed to compile regex");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_hash_regex() {
        let hash = "0x96f7d81da5d0ecfd9e26e04937a6fa15f31f39f84acb6f9c50a72fad63689857";
        assert!(TRANSACTION_HASH_REGEX.is_match(hash).unwrap_or(false));
        assert!(TRANSACTION_HASH_REGEX.is_match(&hash[2..]).unwrap_or(false));
        assert!(!TRANSACTION_HASH_REGEX.is_match(&hash[..40]).unwrap_or(false));
    }

    #[test]
    fn test_calldata_regex() {
        assert!(CALLDATA_REGEX.is_match("0xdeadbeef").unwrap_or(false));
        assert!(!CALLDATA_REGEX.is_match("0xdeadbee").unwrap_or(false));
        assert!(!CALLDATA_REGEX.is_match("not calldata").unwrap_or(false));
    }
}
