pub mod base62;
pub mod config;
pub mod detect;
pub mod error;
pub mod parse;
pub mod resolve;
pub mod shorten;
pub mod store;

pub use base62::{decode, encode, is_valid_base62};
pub use config::ResolverConfig;
pub use detect::{IdFormat, detect_id_format, is_base62_id, is_hex_id};
pub use error::{ListSide, Result, TermShortError};
pub use parse::{extract_id_from_url, is_full_term_id, normalize_id, validate_full_id};
pub use resolve::PrefixResolver;
pub use shorten::{ListShortUrl, MatchPolicy, ShortCode, Shortener, TermShortUrl};
pub use store::{MemoryTermStore, StoreError, TermRecord, TermStore};
