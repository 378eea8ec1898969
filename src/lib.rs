//! POI Import SDK - multi-format Point of Interest ingestion
//!
//! Provides unified interfaces for:
//! - Per-format importers (CSV, JSON, XML) producing normalized records
//! - Source type resolution for local paths and remote URLs
//! - Ratings normalization for the polymorphic ratings value
//! - Reconciliation against a pluggable store (create / skip / update)
//! - An orchestrated pipeline with per-source and aggregate counters

pub mod import;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use import::{
    CsvImporter, ImportError, ImportPipeline, ImportReport, JsonImporter, PoiRecord, RecordError,
    SourceReport, SourceStats, XmlImporter,
};
pub use import::reconcile::{ReconcileOutcome, reconcile};
pub use import::source::SourceFormat;
pub use models::PointOfInterest;
pub use store::{MemoryStore, PoiStore, StoreError};
