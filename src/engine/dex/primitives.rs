// Paw Agent Engine — DEX primitives
// Address parsing, amount grammar, human <-> raw unit conversion, slippage math.

use crate::atoms::constants::BPS_DENOMINATOR;
use crate::atoms::error::{EngineResult, SwapError};
use alloy_primitives::{hex, Address, U256};
use regex::Regex;
use std::sync::OnceLock;

/// Strict decimal grammar: ASCII digits, optional single dot, at least one
/// trailing digit. No sign, exponent or separators.
fn amount_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]*\.?[0-9]+$").expect("static amount regex"))
}

/// True if `amount` is a plain decimal number such as "1", "1.0" or ".5".
pub fn is_valid_amount(amount: &str) -> bool {
    amount_pattern().is_match(amount)
}

/// Parse a 0x-prefixed 20-byte hex address.
pub fn parse_address(addr: &str) -> EngineResult<Address> {
    let trimmed = addr.trim();
    if !trimmed.starts_with("0x") || trimmed.len() != 42 {
        return Err(SwapError::InvalidRequest(format!(
            "'{}' is not a 0x-prefixed 20-byte address",
            addr
        )));
    }
    trimmed
        .parse::<Address>()
        .map_err(|e| SwapError::InvalidRequest(format!("Invalid address '{}': {}", addr, e)))
}

/// Convert a token amount with decimals to raw units.
/// e.g. "1.5" with 18 decimals → 1500000000000000000
///
/// Fractional digits beyond the token's precision are rejected, never
/// truncated.
pub fn amount_to_raw(amount: &str, decimals: u8) -> EngineResult<U256> {
    if !is_valid_amount(amount) {
        return Err(SwapError::InvalidAmount(format!(
            "'{}' is not a plain decimal number",
            amount
        )));
    }

    let (integer_part, decimal_part) = match amount.split_once('.') {
        Some((i, d)) => (i, d),
        None => (amount, ""),
    };

    if decimal_part.len() > decimals as usize {
        return Err(SwapError::InvalidAmount(format!(
            "Too many decimal places in '{}' (max {} for this token)",
            amount, decimals
        )));
    }

    let padded_decimals = format!("{:0<width$}", decimal_part, width = decimals as usize);
    let raw = format!("{}{}", integer_part, padded_decimals);
    let trimmed = raw.trim_start_matches('0');
    if trimmed.is_empty() {
        return Ok(U256::ZERO);
    }

    U256::from_str_radix(trimmed, 10)
        .map_err(|e| SwapError::InvalidAmount(format!("'{}' overflows uint256: {}", amount, e)))
}

/// Convert raw units to a human-readable amount, trailing zeros stripped.
pub fn raw_to_amount(raw: U256, decimals: u8) -> String {
    let decimal_str = raw.to_string();
    if decimals == 0 {
        return decimal_str;
    }

    let dec = decimals as usize;
    let padded = format!("{:0>width$}", decimal_str, width = dec + 1);
    let (int_part, frac_part) = padded.split_at(padded.len() - dec);
    let frac = frac_part.trim_end_matches('0');
    if frac.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, frac)
    }
}

/// Minimum acceptable output under `slippage_bps`; rounds down.
pub fn apply_slippage(quote_out: U256, slippage_bps: u32) -> U256 {
    let keep = U256::from(BPS_DENOMINATOR.saturating_sub(slippage_bps));
    quote_out * keep / U256::from(BPS_DENOMINATOR)
}

/// Hex-encode bytes with 0x prefix.
pub fn hex_encode(data: &[u8]) -> String {
    hex::encode_prefixed(data)
}

/// Hex-decode a string with or without 0x prefix.
pub fn hex_decode(s: &str) -> EngineResult<Vec<u8>> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(s).map_err(|e| SwapError::Rpc(format!("Hex decode: {}", e)))
}

/// Parse a JSON-RPC quantity ("0x1a") into u64.
pub fn parse_quantity(q: &str) -> EngineResult<u64> {
    let digits = q.strip_prefix("0x").unwrap_or(q);
    if digits.is_empty() {
        return Ok(0);
    }
    u64::from_str_radix(digits, 16).map_err(|e| SwapError::Rpc(format!("Parse quantity '{}': {}", q, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_grammar() {
        for ok in ["1", "1.0", "0.01", ".5", "1000000", "007.25"] {
            assert!(is_valid_amount(ok), "{} should be valid", ok);
        }
        for bad in ["", "abc", "1,000", "1e18", "-1", "+1", "1.", "1.2.3", " 1", "1 ", "١٢", "１", "0.٥"] {
            assert!(!is_valid_amount(bad), "{:?} should be invalid", bad);
        }
    }

    #[test]
    fn converts_whole_and_fractional_amounts() {
        assert_eq!(
            amount_to_raw("1.0", 18).unwrap(),
            U256::from(1_000_000_000_000_000_000u128)
        );
        assert_eq!(amount_to_raw("1.5", 6).unwrap(), U256::from(1_500_000u64));
        assert_eq!(amount_to_raw(".5", 2).unwrap(), U256::from(50u64));
        assert_eq!(amount_to_raw("42", 0).unwrap(), U256::from(42u64));
        assert_eq!(amount_to_raw("0.000", 6).unwrap(), U256::ZERO);
    }

    #[test]
    fn rejects_excess_precision_instead_of_truncating() {
        let err = amount_to_raw("1.1234567", 6).unwrap_err();
        assert!(matches!(err, SwapError::InvalidAmount(_)));
        assert!(amount_to_raw("0.5", 0).is_err());
    }

    #[test]
    fn rejects_uint256_overflow() {
        let huge = "9".repeat(90);
        assert!(matches!(amount_to_raw(&huge, 0), Err(SwapError::InvalidAmount(_))));
    }

    #[test]
    fn raw_to_amount_formats() {
        assert_eq!(raw_to_amount(U256::from(1_500_000u64), 6), "1.5");
        assert_eq!(raw_to_amount(U256::from(5u64), 3), "0.005");
        assert_eq!(raw_to_amount(U256::ZERO, 18), "0");
        assert_eq!(raw_to_amount(U256::from(2_000_000u64), 6), "2");
        assert_eq!(raw_to_amount(U256::from(77u64), 0), "77");
    }

    #[test]
    fn slippage_rounds_down() {
        assert_eq!(apply_slippage(U256::from(1_000u64), 100), U256::from(990u64));
        assert_eq!(apply_slippage(U256::from(999u64), 100), U256::from(989u64));
        assert_eq!(apply_slippage(U256::from(1_000u64), 0), U256::from(1_000u64));
    }

    #[test]
    fn address_parsing() {
        assert!(parse_address("0x4200000000000000000000000000000000000006").is_ok());
        assert!(parse_address("4200000000000000000000000000000000000006").is_err());
        assert!(parse_address("0x4200").is_err());
        assert!(parse_address("0xzz00000000000000000000000000000000000006").is_err());
        assert!(parse_address("").is_err());
    }

    #[test]
    fn quantities() {
        assert_eq!(parse_quantity("0x2105").unwrap(), 8453);
        assert_eq!(parse_quantity("0x").unwrap(), 0);
        assert!(parse_quantity("0xnope").is_err());
    }
}
