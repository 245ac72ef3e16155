use tracing::{debug, warn};

use crate::base62;
use crate::config::ResolverConfig;
use crate::detect::{IdFormat, detect_id_format};
use crate::error::{ListSide, Result, TermShortError};
use crate::parse::normalize_id;
use crate::resolve::PrefixResolver;
use crate::store::{TermRecord, TermStore};

/// How the exact-lookup step treats multiple matches.
///
/// The raw API pathway accepts the first (oldest) match; the form-submission
/// pathway rejects an ambiguous result set outright. Both are kept as
/// distinct entry points on [`Shortener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    /// Take the oldest match, ignoring how many there are.
    FirstMatch,
    /// Require exactly one match; more is an `Ambiguous` error.
    Unique,
}

/// A freshly computed short code for one term.
///
/// Never stored: recomputed on demand from the live store state, so the
/// required prefix length can change as older terms are inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortCode {
    /// Base62 encoding of the prefix's numeric value.
    pub base62: String,
    /// Shortest disambiguating hex prefix, even length, lowercase.
    pub hex_prefix: String,
    /// The resolved term's full id.
    pub full_id: String,
}

/// Result of shortening a single term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermShortUrl {
    pub short_url: String,
    pub base62_id: String,
    pub hex_prefix: String,
    pub full_id: String,
}

/// Result of shortening a two-term list (predicate + object).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListShortUrl {
    pub short_url: String,
    pub base62_predicate_id: String,
    pub base62_object_id: String,
    pub predicate_hex_prefix: String,
    pub object_hex_prefix: String,
    pub predicate_full_id: String,
    pub object_full_id: String,
}

/// Orchestrates the normalize -> lookup -> resolve -> encode pipeline.
pub struct Shortener<S> {
    store: S,
    resolver: PrefixResolver,
}

impl<S: TermStore> Shortener<S> {
    /// Creates a shortener over a store with default resolver limits.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ResolverConfig::default())
    }

    /// Creates a shortener with explicit resolver limits.
    pub fn with_config(store: S, config: ResolverConfig) -> Self {
        Self {
            store,
            resolver: PrefixResolver::new(config),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Normalizes a caller-supplied id to hex form, decoding base62 input.
    fn normalize(id: &str) -> Result<String> {
        match detect_id_format(id) {
            IdFormat::Hex => Ok(normalize_id(id)),
            IdFormat::Base62 => base62::decode(id).map_err(|error| {
                debug!(%error, id, "base62 decode failed");
                TermShortError::InvalidFormat { id: id.to_string() }
            }),
            IdFormat::Invalid => Err(TermShortError::InvalidFormat { id: id.to_string() }),
        }
    }

    /// Exact lookup of a term by its normalized hex value.
    async fn lookup(&self, hex_id: &str, policy: MatchPolicy) -> Result<TermRecord> {
        let records = match self.store.query_exact(hex_id).await {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, id = hex_id, "store lookup failed");
                return Err(TermShortError::NotFound {
                    id: hex_id.to_string(),
                });
            }
        };

        if policy == MatchPolicy::Unique && records.len() > 1 {
            return Err(TermShortError::Ambiguous {
                partial: hex_id.to_string(),
                count: records.len(),
            });
        }

        records
            .into_iter()
            .next()
            .ok_or_else(|| TermShortError::NotFound {
                id: hex_id.to_string(),
            })
    }

    /// Runs the full single-term pipeline: classify, decode, exact lookup,
    /// shortest-prefix resolution, base62 encoding.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` when classification or decoding rejects the input,
    /// `NotFound` when the store has no match (or fails), `Ambiguous` under
    /// [`MatchPolicy::Unique`] when more than one term matches.
    pub async fn shorten_code(&self, id: &str, policy: MatchPolicy) -> Result<ShortCode> {
        let hex_id = Self::normalize(id)?;
        let term = self.lookup(&hex_id, policy).await?;
        debug!(id = %term.id, "found term");

        let hex_prefix = self
            .resolver
            .find_shortest_prefix(&self.store, &term.id)
            .await?;
        let encoded = base62::encode(&hex_prefix)?;
        debug!(prefix = %hex_prefix, base62 = %encoded, "encoded short code");

        Ok(ShortCode {
            base62: encoded,
            hex_prefix,
            full_id: term.id,
        })
    }

    /// Shortens a single term id (hex or base62, full or partial), taking
    /// the oldest match when several terms contain the fragment.
    pub async fn shorten_term(&self, id: &str, base_url: &str) -> Result<TermShortUrl> {
        self.shorten_term_with(id, base_url, MatchPolicy::FirstMatch)
            .await
    }

    /// Like [`shorten_term`](Self::shorten_term), but rejects ambiguous
    /// lookups. Used by form-submission flows where the caller pasted one
    /// specific term and a silent first-match pick would mislead.
    pub async fn shorten_term_strict(&self, id: &str, base_url: &str) -> Result<TermShortUrl> {
        self.shorten_term_with(id, base_url, MatchPolicy::Unique).await
    }

    async fn shorten_term_with(
        &self,
        id: &str,
        base_url: &str,
        policy: MatchPolicy,
    ) -> Result<TermShortUrl> {
        let code = self.shorten_code(id, policy).await?;
        Ok(TermShortUrl {
            short_url: format!("{base_url}/{}", code.base62),
            base62_id: code.base62,
            hex_prefix: code.hex_prefix,
            full_id: code.full_id,
        })
    }

    /// Shortens a two-term list. The predicate and object pipelines are
    /// independent and run concurrently; the first failure is reported with
    /// the side it occurred on, predicate checked first.
    pub async fn shorten_list(
        &self,
        predicate_id: &str,
        object_id: &str,
        base_url: &str,
    ) -> Result<ListShortUrl> {
        let (predicate, object) = tokio::join!(
            self.shorten_code(predicate_id, MatchPolicy::FirstMatch),
            self.shorten_code(object_id, MatchPolicy::FirstMatch),
        );

        let predicate = predicate.map_err(|e| e.on_side(ListSide::Predicate))?;
        let object = object.map_err(|e| e.on_side(ListSide::Object))?;

        Ok(ListShortUrl {
            short_url: format!("{base_url}/{}/{}", predicate.base62, object.base62),
            base62_predicate_id: predicate.base62,
            base62_object_id: object.base62,
            predicate_hex_prefix: predicate.hex_prefix,
            object_hex_prefix: object.hex_prefix,
            predicate_full_id: predicate.full_id,
            object_full_id: object.full_id,
        })
    }

    /// Resolves a short code (hex prefix or base62) back to a full term id.
    ///
    /// Inverse of the shortening direction, used by redirect flows: first
    /// result wins, with no ambiguity check.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` for unclassifiable or undecodable input, `NotFound`
    /// when no term matches the prefix or the store fails.
    pub async fn resolve_short_code(&self, id: &str) -> Result<String> {
        let hex_prefix = Self::normalize(id)?;

        let records = match self.store.query_by_prefix(&hex_prefix).await {
            Ok(records) => records,
            Err(error) => {
                warn!(%error, prefix = %hex_prefix, "store lookup failed");
                return Err(TermShortError::NotFound {
                    id: id.to_string(),
                });
            }
        };

        records
            .into_iter()
            .next()
            .map(|record| record.id)
            .ok_or_else(|| TermShortError::NotFound { id: id.to_string() })
    }
}
