//! Store abstraction for reconciled Point of Interest records
//!
//! The import core consumes this interface; it does not own the storage
//! technology. The contract is deliberately narrow: lookup by external id,
//! a race-safe create that fails on a duplicate external id, and a
//! whole-record update. `MemoryStore` is the in-repo reference
//! implementation used by the CLI and the test suites.

pub mod memory;

pub use memory::MemoryStore;

use crate::import::PoiRecord;
use crate::models::PointOfInterest;
use uuid::Uuid;

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// `create` found the external id already present
    #[error("Duplicate external id: {0}")]
    DuplicateExternalId(String),

    /// `update` found no record with the given internal id
    #[error("Record not found: {0}")]
    NotFound(Uuid),

    /// Backend failure (connection, poisoned lock, constraint, ...)
    #[error("Store backend failure: {0}")]
    Backend(String),
}

/// A persistent record store reachable by unique external key.
pub trait PoiStore: Send + Sync {
    /// Look up a stored record by its external id.
    fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<PointOfInterest>, StoreError>;

    /// Create a record from supplied fields, assigning the surrogate key and
    /// timestamps.
    ///
    /// Fails with [`StoreError::DuplicateExternalId`] if the external id is
    /// already present. The check and the insert are atomic: at most one
    /// record is ever created per external id, even under concurrent
    /// callers.
    fn create(&self, record: &PoiRecord) -> Result<PointOfInterest, StoreError>;

    /// Overwrite every mutable field of an existing record and refresh its
    /// update timestamp.
    fn update(
        &self,
        internal_id: Uuid,
        record: &PoiRecord,
    ) -> Result<PointOfInterest, StoreError>;
}
