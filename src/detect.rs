use crate::base62::is_valid_base62;
use crate::parse::ID_MARKER;

/// Shortest string accepted as a base62 id. Below this length an
/// alphanumeric string is too likely to be a stray fragment, so it is
/// rejected rather than misread.
pub const MIN_BASE62_LEN: usize = 10;

/// Classification of a caller-supplied term id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdFormat {
    /// `0x`-marked hexadecimal, full or partial prefix.
    Hex,
    /// Base62 short code, at least [`MIN_BASE62_LEN`] characters.
    Base62,
    /// Neither.
    Invalid,
}

/// Returns true if the id is `0x` followed by one or more hex digits.
pub fn is_hex_id(id: &str) -> bool {
    id.strip_prefix(ID_MARKER).is_some_and(|digits| {
        !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
    })
}

/// Returns true if the id is a plausible base62 short code.
pub fn is_base62_id(id: &str) -> bool {
    id.len() >= MIN_BASE62_LEN && is_valid_base62(id)
}

/// Classifies an id string. Hex wins when a string could satisfy both.
pub fn detect_id_format(id: &str) -> IdFormat {
    if is_hex_id(id) {
        IdFormat::Hex
    } else if is_base62_id(id) {
        IdFormat::Base62
    } else {
        IdFormat::Invalid
    }
}
