use async_trait::async_trait;

/// Transport-level failure from the term store.
///
/// The resolver treats this exactly like an empty result set; it never
/// surfaces to callers as a hard error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("term store unavailable: {reason}")]
pub struct StoreError {
    pub reason: String,
}

impl StoreError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// A term as the store reports it: id plus creation-time ordering key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRecord {
    /// Full term id: `0x` + 64 hex digits, lowercase.
    pub id: String,
    /// Ordering key; the store assigns it once at creation.
    pub created_at: u64,
}

impl TermRecord {
    pub fn new(id: impl Into<String>, created_at: u64) -> Self {
        Self {
            id: id.into(),
            created_at,
        }
    }
}

/// Read-only query contract of the external term index.
///
/// Both queries must return matches ascending by `created_at`, so the first
/// record is the prefix's canonical owner. For a fixed store state the same
/// query always yields the same first element.
#[async_trait]
pub trait TermStore {
    /// Terms whose id starts with the given hex prefix.
    async fn query_by_prefix(&self, prefix: &str) -> Result<Vec<TermRecord>, StoreError>;

    /// Terms whose id contains the given hex fragment (`%fragment%`).
    async fn query_exact(&self, fragment: &str) -> Result<Vec<TermRecord>, StoreError>;
}

/// In-memory term index with creation-time ordering.
///
/// Stands in for the live store in tests and examples; it applies the same
/// ordering contract a real backend must.
#[derive(Debug, Clone, Default)]
pub struct MemoryTermStore {
    records: Vec<TermRecord>,
}

impl MemoryTermStore {
    /// Builds a store from records, normalizing ids to lowercase and
    /// sorting ascending by creation time.
    #[must_use]
    pub fn new(mut records: Vec<TermRecord>) -> Self {
        for record in &mut records {
            record.id = record.id.to_lowercase();
        }
        records.sort_by_key(|r| r.created_at);
        Self { records }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl TermStore for MemoryTermStore {
    async fn query_by_prefix(&self, prefix: &str) -> Result<Vec<TermRecord>, StoreError> {
        let prefix = prefix.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.id.starts_with(&prefix))
            .cloned()
            .collect())
    }

    async fn query_exact(&self, fragment: &str) -> Result<Vec<TermRecord>, StoreError> {
        let fragment = fragment.to_lowercase();
        Ok(self
            .records
            .iter()
            .filter(|r| r.id.contains(&fragment))
            .cloned()
            .collect())
    }
}
