//! Slug-keyed content cache
//!
//! Presence in the cache is the single source of truth for "ready to
//! display". Entries are inserted once (first successful fetch or an
//! external seed) and never evicted or re-fetched: the catalog is a
//! portfolio, small and bounded.

mod memory;
mod store;

pub use memory::MemoryStore;
pub use store::ContentStore;

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::content::{ProjectRecord, ProjectSummary, Slug};
use crate::error::{EngineError, EngineResult};

/// Fetch-once, memoizing cache in front of a [`ContentStore`]
pub struct ContentCache<S: ContentStore> {
    store: S,
    entries: HashMap<Slug, ProjectRecord>,
}

impl<S: ContentStore> ContentCache<S> {
    /// Create an empty cache over `store`
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: HashMap::new(),
        }
    }

    /// Cached record, without touching the store
    pub fn get(&self, slug: &str) -> Option<&ProjectRecord> {
        self.entries.get(slug)
    }

    /// Check whether a record is ready to display
    pub fn contains(&self, slug: &str) -> bool {
        self.entries.contains_key(slug)
    }

    /// Number of cached records
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether nothing is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached record, fetching and memoizing it on a miss
    ///
    /// A failed or empty fetch leaves the cache untouched, is logged, and
    /// yields `None`; calling again retries.
    pub fn fetch(&mut self, slug: &str) -> Option<&ProjectRecord> {
        if !self.entries.contains_key(slug) {
            match self.resolve(slug) {
                Ok(record) => {
                    debug!(slug, "content cached");
                    self.entries.insert(slug.to_string(), record);
                }
                Err(err) => {
                    warn!(slug, error = %err, "content fetch failed");
                    return None;
                }
            }
        }
        self.entries.get(slug)
    }

    fn resolve(&mut self, slug: &str) -> EngineResult<ProjectRecord> {
        match self.store.fetch_one(slug) {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Err(EngineError::NotFound(slug.to_string())),
            Err(e) => Err(e.for_slug(slug)),
        }
    }

    /// Warm the cache for `slug`; the result is discarded
    pub fn prefetch(&mut self, slug: &str) {
        if !self.entries.contains_key(slug) {
            let _ = self.fetch(slug);
        }
    }

    /// Insert a record without overwriting an existing entry
    ///
    /// Returns `true` if the record was inserted.
    pub fn seed(&mut self, record: ProjectRecord) -> bool {
        if self.entries.contains_key(&record.slug) {
            return false;
        }
        self.entries.insert(record.slug.clone(), record);
        true
    }

    /// Seed several records; returns how many were new
    pub fn seed_many(&mut self, records: impl IntoIterator<Item = ProjectRecord>) -> usize {
        records
            .into_iter()
            .map(|record| self.seed(record))
            .filter(|inserted| *inserted)
            .count()
    }

    /// Grid listing straight from the store (not cached)
    pub fn fetch_all(&mut self) -> EngineResult<Vec<ProjectSummary>> {
        self.store.fetch_all().map_err(|e| {
            warn!(error = %e, "listing fetch failed");
            e.for_slug("*")
        })
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Underlying store (mutable)
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}
