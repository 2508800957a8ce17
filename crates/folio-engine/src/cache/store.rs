//! Content store boundary
//!
//! The CMS is an external collaborator. Implementations resolve a slug to a
//! detail record or list the grid summaries; the engine never sees transport
//! details.

use crate::content::{ProjectRecord, ProjectSummary};
use crate::error::StoreError;

/// Slug-keyed content source
pub trait ContentStore {
    /// Resolve one detail record; `Ok(None)` when the slug is unknown
    fn fetch_one(&mut self, slug: &str) -> Result<Option<ProjectRecord>, StoreError>;

    /// List every project in display order
    fn fetch_all(&mut self) -> Result<Vec<ProjectSummary>, StoreError>;
}
