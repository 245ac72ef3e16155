use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::error::{Result, TermShortError};
use crate::parse::ID_MARKER;

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Maximum value a term id can hold: 2^256 - 1.
const MAX_BITS: u64 = 256;

/// Returns true if the string contains only base62 alphabet characters.
pub fn is_valid_base62(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}

fn digit_value(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(c as u32 - '0' as u32),
        'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
        'a'..='z' => Some(c as u32 - 'a' as u32 + 36),
        _ => None,
    }
}

/// Encodes a `0x`-prefixed hex id (full or partial) as a base62 string.
///
/// The hex digits are read as one big unsigned integer and emitted most
/// significant symbol first through the `0-9 A-Z a-z` alphabet. Zero encodes
/// to `"0"`. The output carries no padding, so leading zero nibbles in the
/// input do not survive a round trip (see [`decode`]).
///
/// # Errors
///
/// Returns `InvalidInput` if the marker is missing, the digit string is
/// empty or longer than 64 digits, or a non-hex character appears.
pub fn encode(hex_id: &str) -> Result<String> {
    let digits = hex_id
        .strip_prefix(ID_MARKER)
        .ok_or_else(|| TermShortError::InvalidInput {
            id: hex_id.to_string(),
        })?;

    if digits.is_empty()
        || digits.len() > 64
        || !digits.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(TermShortError::InvalidInput {
            id: hex_id.to_string(),
        });
    }

    let mut n = BigUint::parse_bytes(digits.as_bytes(), 16).ok_or_else(|| {
        TermShortError::InvalidInput {
            id: hex_id.to_string(),
        }
    })?;

    if n.is_zero() {
        return Ok("0".to_string());
    }

    let base = BigUint::from(62u32);
    let mut symbols = Vec::new();
    while !n.is_zero() {
        let rem = (&n % &base).to_usize().unwrap_or(0);
        symbols.push(ALPHABET[rem]);
        n /= &base;
    }
    symbols.reverse();

    Ok(symbols.iter().map(|&b| b as char).collect())
}

/// Decodes a base62 string back to a `0x`-prefixed hex id.
///
/// The output uses the minimal digit count for the value, lowercased, with
/// no zero-padding: short prefixes like `"9LE"` come back as `0x8c48`, not a
/// padded 64-digit id. Because only the numeric value survives, a prefix
/// that began with a zero nibble decodes to its shorter numeric form; the
/// original digit count is not recoverable.
///
/// # Errors
///
/// Returns `InvalidChar` naming the first character outside the alphabet,
/// or `OutOfRange` if the value exceeds 2^256 - 1.
pub fn decode(base62_id: &str) -> Result<String> {
    if base62_id.is_empty() {
        return Err(TermShortError::InvalidFormat {
            id: base62_id.to_string(),
        });
    }

    let base = BigUint::from(62u32);
    let mut n = BigUint::zero();
    for c in base62_id.chars() {
        let value = digit_value(c).ok_or(TermShortError::InvalidChar { ch: c })?;
        n = n * &base + BigUint::from(value);
    }

    if n.bits() > MAX_BITS {
        return Err(TermShortError::OutOfRange);
    }

    Ok(format!("{ID_MARKER}{}", n.to_str_radix(16)))
}
