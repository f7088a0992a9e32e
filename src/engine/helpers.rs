// Engine — Helpers
// lamports_to_amount, sol_display, usd_display, raw_supply,
// decode_pubkey, encode_pubkey

use crate::atoms::constants::LAMPORTS_PER_SOL;
use crate::atoms::error::{ForgeError, ForgeResult};

// ── Amount formatting ─────────────────────────────────────────────────

/// Format a raw amount to a human string given the token's decimals,
/// trimming trailing zeros ("1500000000" at 9 decimals → "1.5").
/// Handles any u8 decimals; on-chain mints are not bound to 0..=9.
pub(crate) fn lamports_to_amount(raw: u64, decimals: u8) -> String {
    if decimals == 0 {
        return raw.to_string();
    }
    // Split the digit string instead of dividing; 10^decimals
    // overflows u64 for decimals above 19.
    let digits = raw.to_string();
    let decimals = decimals as usize;
    let (whole, frac) = if digits.len() > decimals {
        let (w, f) = digits.split_at(digits.len() - decimals);
        (w.to_string(), f.to_string())
    } else {
        ("0".to_string(), format!("{:0>width$}", digits, width = decimals))
    };
    let trimmed = frac.trim_end_matches('0');
    if trimmed.is_empty() {
        whole
    } else {
        format!("{}.{}", whole, trimmed)
    }
}

/// Lamports → "x.y SOL".
pub(crate) fn sol_display(lamports: u64) -> String {
    format!("{} SOL", lamports_to_amount(lamports, 9))
}

/// Lamports → approximate USD string at the given SOL price.
pub(crate) fn usd_display(lamports: u64, sol_price_usd: f64) -> String {
    let sol = lamports as f64 / LAMPORTS_PER_SOL as f64;
    format!("${:.2}", sol * sol_price_usd)
}

// ── Supply math ───────────────────────────────────────────────────────

/// Whole-token supply → raw on-chain amount, rejecting u64 overflow.
/// The MintTo instruction carries the raw amount as a u64.
pub(crate) fn raw_supply(total_supply: u64, decimals: u8) -> ForgeResult<u64> {
    let multiplier = 10u64
        .checked_pow(decimals as u32)
        .ok_or_else(|| ForgeError::Validation(format!("Decimals too large: {}", decimals)))?;
    total_supply.checked_mul(multiplier).ok_or_else(|| {
        ForgeError::Validation(format!(
            "Supply overflows u64: {} tokens at {} decimals exceeds the maximum raw amount {}",
            total_supply,
            decimals,
            u64::MAX
        ))
    })
}

// ── Pubkey encoding ───────────────────────────────────────────────────

/// Decode a base58 Solana address into its 32 raw bytes.
pub(crate) fn decode_pubkey(address: &str) -> ForgeResult<[u8; 32]> {
    let bytes = bs58::decode(address.trim())
        .into_vec()
        .map_err(|e| ForgeError::Other(format!("Invalid address '{}': {}", address, e)))?;
    if bytes.len() != 32 {
        return Err(ForgeError::Other(format!(
            "Invalid address length: expected 32 bytes, got {}",
            bytes.len()
        )));
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Raw pubkey bytes → base58 string.
pub(crate) fn encode_pubkey(bytes: &[u8; 32]) -> String {
    bs58::encode(bytes).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_whole_amounts() {
        assert_eq!(lamports_to_amount(1_000_000_000, 9), "1");
        assert_eq!(lamports_to_amount(5, 0), "5");
        assert_eq!(lamports_to_amount(0, 9), "0");
    }

    #[test]
    fn format_fractional_amounts() {
        assert_eq!(lamports_to_amount(1_500_000_000, 9), "1.5");
        assert_eq!(lamports_to_amount(1_000_000_001, 9), "1.000000001");
        assert_eq!(lamports_to_amount(123_456, 6), "0.123456");
    }

    #[test]
    fn format_survives_extreme_decimals() {
        // SPL mints can carry any u8 decimals; token info feeds them
        // here straight from chain data.
        assert_eq!(lamports_to_amount(1, 20), "0.00000000000000000001");
        assert_eq!(lamports_to_amount(0, 255), "0");
        assert_eq!(lamports_to_amount(u64::MAX, 20), "0.18446744073709551615");
    }

    #[test]
    fn sol_display_trims_zeros() {
        assert_eq!(sol_display(2_039_280), "0.00203928 SOL");
        assert_eq!(sol_display(5_000), "0.000005 SOL");
    }

    #[test]
    fn raw_supply_multiplies() {
        assert_eq!(raw_supply(1_000_000_000, 9).unwrap(), 1_000_000_000_000_000_000);
        assert_eq!(raw_supply(42, 0).unwrap(), 42);
    }

    #[test]
    fn raw_supply_rejects_overflow() {
        // u64::MAX is ~1.8e19; 1e11 tokens at 9 decimals is 1e20.
        assert!(raw_supply(100_000_000_000, 9).is_err());
        assert!(raw_supply(u64::MAX, 1).is_err());
    }

    #[test]
    fn pubkey_roundtrip() {
        let system = decode_pubkey("11111111111111111111111111111111").unwrap();
        assert_eq!(system, [0u8; 32]);
        assert_eq!(encode_pubkey(&system), "11111111111111111111111111111111");
    }

    #[test]
    fn pubkey_rejects_bad_input() {
        assert!(decode_pubkey("not-base58-0OIl").is_err());
        // Valid base58 but wrong length.
        assert!(decode_pubkey("abc").is_err());
    }
}
