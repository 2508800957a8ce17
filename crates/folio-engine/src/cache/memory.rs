//! In-memory content store for testing and preloaded hosts.
//!
//! Holds records in insertion order. Outages can be simulated so callers can
//! exercise the fetch-failure path.

use std::collections::HashMap;

use super::store::ContentStore;
use crate::content::{ProjectRecord, ProjectSummary, Slug};
use crate::error::StoreError;

/// In-memory content store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    /// Records by slug
    records: HashMap<Slug, ProjectRecord>,
    /// Display order
    order: Vec<Slug>,
    /// When false every call fails with `StoreError::Unavailable`
    available: bool,
    /// Number of `fetch_one` calls served (including failures)
    fetches: usize,
}

impl MemoryStore {
    /// Create an empty, available store.
    pub fn new() -> Self {
        Self {
            available: true,
            ..Self::default()
        }
    }

    /// Create a store holding `records` in the given order.
    pub fn with_records(records: impl IntoIterator<Item = ProjectRecord>) -> Self {
        let mut store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    /// Add or replace a record.
    pub fn insert(&mut self, record: ProjectRecord) {
        if !self.records.contains_key(&record.slug) {
            self.order.push(record.slug.clone());
        }
        self.records.insert(record.slug.clone(), record);
    }

    /// Simulate an outage (or recovery).
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Number of `fetch_one` calls made so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches
    }
}

impl ContentStore for MemoryStore {
    fn fetch_one(&mut self, slug: &str) -> Result<Option<ProjectRecord>, StoreError> {
        self.fetches += 1;
        if !self.available {
            return Err(StoreError::unavailable("memory store offline"));
        }
        Ok(self.records.get(slug).cloned())
    }

    fn fetch_all(&mut self) -> Result<Vec<ProjectSummary>, StoreError> {
        if !self.available {
            return Err(StoreError::unavailable("memory store offline"));
        }
        Ok(self
            .order
            .iter()
            .filter_map(|slug| self.records.get(slug))
            .map(ProjectRecord::summary)
            .collect())
    }
}
