//! Models module for the SDK
//!
//! Defines the reconciled Point of Interest entity shared by the import
//! pipeline and the store backends.

pub mod poi;

pub use poi::PointOfInterest;
