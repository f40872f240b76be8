use alloy::primitives::U256;
use eyre::{eyre, Result};
use std::fmt::Write;

use crate::constants::{DECIMAL_REGEX, HEX_WORD_REGEX};

/// Decodes a hex string into a vector of bytes
///
/// ```
/// use dex2_common::utils::strings::decode_hex;
///
/// let hex = "48656c6c6f20576f726c64"; // "Hello World" in hex
/// let result = decode_hex(hex).expect("should decode hex");
/// assert_eq!(result, vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100]);
/// ```
pub fn decode_hex(mut s: &str) -> Result<Vec<u8>> {
    // normalize
    s = s.trim().trim_start_matches("0x");

    if s.is_empty() {
        return Ok(vec![]);
    }
    if s.len() % 2 != 0 {
        return Err(eyre!("invalid hex string: odd length"));
    }

    (0..s.len())
        .step_by(2)
        .map(|i| s.get(i..i + 2).and_then(|pair| u8::from_str_radix(pair, 16).ok()))
        .collect::<Option<Vec<u8>>>()
        .ok_or_else(|| eyre!("invalid hex string: {}", s))
}

/// Encodes a vector of bytes into a hex string
///
/// ```
/// use dex2_common::utils::strings::encode_hex;
///
/// let bytes = vec![72, 101, 108, 108, 111, 32, 87, 111, 114, 108, 100];
/// let result = encode_hex(&bytes);
/// assert_eq!(result, "48656c6c6f20576f726c64");
/// ```
pub fn encode_hex(s: &[u8]) -> String {
    s.iter().fold(String::new(), |mut acc, b| {
        // writing to a String cannot fail
        let _ = write!(acc, "{b:02x}");
        acc
    })
}

/// Encodes a U256 into a `0x`-prefixed hex string, removing leading zeros
///
/// ```
/// use dex2_common::utils::strings::encode_hex_reduced;
/// use alloy::primitives::U256;
///
/// assert_eq!(encode_hex_reduced(U256::from(0xde01u64)), "0xde01");
/// assert_eq!(encode_hex_reduced(U256::ZERO), "0x0");
/// ```
pub fn encode_hex_reduced(s: U256) -> String {
    let digits = encode_hex(&s.to_be_bytes::<32>());
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        String::from("0x0")
    } else {
        format!("0x{digits}")
    }
}

/// Parses a 256-bit word given either as `0x`-prefixed hex or as a decimal integer
///
/// ```
/// use dex2_common::utils::strings::parse_word;
/// use alloy::primitives::U256;
///
/// assert_eq!(parse_word("0xde01").expect("hex word"), U256::from(0xde01u64));
/// assert_eq!(parse_word("56833").expect("decimal word"), U256::from(56833u64));
/// ```
pub fn parse_word(s: &str) -> Result<U256> {
    let s = s.trim();
    if HEX_WORD_REGEX.is_match(s).unwrap_or(false) {
        U256::from_str_radix(&s[2..], 16).map_err(|e| eyre!("invalid hex word '{}': {}", s, e))
    } else if DECIMAL_REGEX.is_match(s).unwrap_or(false) {
        U256::from_str_radix(s, 10).map_err(|e| eyre!("invalid decimal word '{}': {}", s, e))
    } else {
        Err(eyre!("invalid word '{}': expected 0x-prefixed hex or a decimal integer", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_hex_with_prefix() {
        assert_eq!(decode_hex("0xdeadbeef").expect("valid hex"), vec![0xde, 0xad, 0xbe, 0xef]);
    }

    #[test]
    fn test_decode_hex_rejects_odd_and_invalid() {
        assert!(decode_hex("0xabc").is_err());
        assert!(decode_hex("zz").is_err());
    }

    #[test]
    fn test_encode_hex_reduced_max() {
        assert_eq!(
            encode_hex_reduced(U256::MAX),
            "0xffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff"
        );
    }

    #[test]
    fn test_parse_word_too_wide() {
        let word = format!("0x1{}", "0".repeat(64));
        assert!(parse_word(&word).is_err());
        assert!(parse_word("-1").is_err());
        assert!(parse_word("0x").is_err());
    }
}
