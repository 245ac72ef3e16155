use std::time::Instant;

use tracing::{debug, warn};

use crate::config::ResolverConfig;
use crate::error::Result;
use crate::parse::{ID_MARKER, normalize_id, validate_full_id};
use crate::store::TermStore;

/// Finds the shortest even-length hex prefix that resolves to a target term
/// as the first (oldest) match in the store's creation-time ordering.
///
/// The search is sequential and network-bound: each query's outcome decides
/// the next prefix length. When the first match is a different, older term,
/// the resolver compares the two ids and jumps directly past the point of
/// divergence instead of growing the prefix two digits at a time, which
/// usually finishes in one to three queries.
///
/// Store trouble is never fatal here: an error or empty result set ends the
/// search and the full id is returned as the (unshortened) prefix.
pub struct PrefixResolver {
    config: ResolverConfig,
}

impl Default for PrefixResolver {
    fn default() -> Self {
        Self::new(ResolverConfig::default())
    }
}

impl PrefixResolver {
    /// Creates a resolver with the given search limits.
    #[must_use]
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    /// Resolves the shortest disambiguating prefix for a full term id.
    ///
    /// Returns the prefix in canonical lowercase form, or the full id when
    /// the search degrades (store error, no matches, or ceilings reached).
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `target_id` is not `0x` + 64 hex digits.
    /// Store failures do not error; they fall back to the full id.
    pub async fn find_shortest_prefix<S: TermStore>(
        &self,
        store: &S,
        target_id: &str,
    ) -> Result<String> {
        validate_full_id(target_id)?;
        let target = normalize_id(target_id);

        let started = Instant::now();
        let mut length = self.config.min_prefix_len;
        let mut attempts = 0usize;

        debug!(id = %target, "starting prefix search");

        while length <= self.config.max_prefix_len && attempts < self.config.max_attempts {
            attempts += 1;
            let prefix = &target[..ID_MARKER.len() + length];
            debug!(attempt = attempts, length, prefix, "testing prefix");

            let records = match store.query_by_prefix(prefix).await {
                Ok(records) => records,
                Err(error) => {
                    warn!(%error, prefix, "store query failed, using full id");
                    return Ok(target);
                }
            };

            let Some(first) = records.first() else {
                warn!(prefix, "no results for prefix, using full id");
                return Ok(target);
            };

            if first.id == target {
                debug!(
                    prefix,
                    attempts,
                    elapsed = ?started.elapsed(),
                    "found unique prefix"
                );
                return Ok(prefix.to_string());
            }

            // First match is a different, older term. Jump straight to the
            // smallest even length that separates the two ids.
            if let Some(position) = difference_point(&target, &first.id) {
                let next = (position + 2) / 2 * 2;
                if next > length {
                    debug!(position, from = length, to = next, "jumping past divergence");
                    length = next;
                    continue;
                }
            }

            length += self.config.step;
        }

        warn!(
            attempts,
            elapsed = ?started.elapsed(),
            "no unique prefix found, using full id"
        );
        Ok(target)
    }
}

/// First hex-digit position (0-indexed, after the marker) where two ids
/// differ. When one id is a strict prefix of the other within the compared
/// range, the shorter digit count is returned; identical ids give None.
fn difference_point(target: &str, other: &str) -> Option<usize> {
    let target = target.as_bytes();
    let other = other.as_bytes();
    let min_len = target.len().min(other.len());

    for i in ID_MARKER.len()..min_len {
        if target[i] != other[i] {
            return Some(i - ID_MARKER.len());
        }
    }

    if target.len() == other.len() {
        None
    } else {
        Some(min_len - ID_MARKER.len())
    }
}
