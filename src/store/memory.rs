//! In-memory store backend
//!
//! A single mutex-guarded map keyed by external id. Create uses the map
//! entry to make the existence check and the insert one atomic step, which
//! is what upholds the at-most-one-record-per-external-id invariant under
//! concurrent reconcilers.

use super::{PoiStore, StoreError};
use crate::import::PoiRecord;
use crate::models::PointOfInterest;
use chrono::Utc;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// In-memory reference implementation of [`PoiStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<HashMap<String, PointOfInterest>>,
}

impl MemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored records, ordered by name.
    pub fn all(&self) -> Vec<PointOfInterest> {
        let mut records: Vec<PointOfInterest> = self
            .inner
            .lock()
            .map(|map| map.values().cloned().collect())
            .unwrap_or_default();
        records.sort_by(|a, b| a.name.cmp(&b.name));
        records
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, PointOfInterest>>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".to_string()))
    }
}

impl PoiStore for MemoryStore {
    fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<PointOfInterest>, StoreError> {
        Ok(self.lock()?.get(external_id).cloned())
    }

    fn create(&self, record: &PoiRecord) -> Result<PointOfInterest, StoreError> {
        let mut map = self.lock()?;
        match map.entry(record.external_id.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateExternalId(record.external_id.clone())),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let poi = PointOfInterest {
                    internal_id: Uuid::new_v4(),
                    external_id: record.external_id.clone(),
                    name: record.name.clone(),
                    latitude: record.latitude,
                    longitude: record.longitude,
                    category: record.category.clone(),
                    ratings: record.ratings.clone(),
                    description: record.description.clone(),
                    created_at: now,
                    updated_at: now,
                };
                slot.insert(poi.clone());
                Ok(poi)
            }
        }
    }

    fn update(
        &self,
        internal_id: Uuid,
        record: &PoiRecord,
    ) -> Result<PointOfInterest, StoreError> {
        let mut map = self.lock()?;

        let current_key = map
            .iter()
            .find(|(_, poi)| poi.internal_id == internal_id)
            .map(|(key, _)| key.clone())
            .ok_or(StoreError::NotFound(internal_id))?;

        // The external id is one of the supplied fields; a change re-keys
        // the record and must not collide with another one
        if record.external_id != current_key && map.contains_key(&record.external_id) {
            return Err(StoreError::DuplicateExternalId(record.external_id.clone()));
        }

        let mut poi = map.remove(&current_key).ok_or(StoreError::NotFound(internal_id))?;
        record.apply_to(&mut poi);
        poi.updated_at = Utc::now();
        map.insert(poi.external_id.clone(), poi.clone());
        Ok(poi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn record(external_id: &str, name: &str) -> PoiRecord {
        PoiRecord {
            external_id: external_id.to_string(),
            name: name.to_string(),
            latitude: Decimal::from_str("10.5").unwrap(),
            longitude: Decimal::from_str("-3.25").unwrap(),
            category: "park".to_string(),
            ratings: vec![4.0, 5.0],
            description: String::new(),
        }
    }

    #[test]
    fn test_create_and_find() {
        let store = MemoryStore::new();
        let created = store.create(&record("p1", "First")).unwrap();

        let found = store.find_by_external_id("p1").unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.name, "First");
        assert_eq!(found.ratings, vec![4.0, 5.0]);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_create_duplicate_external_id_fails() {
        let store = MemoryStore::new();
        store.create(&record("p1", "First")).unwrap();

        let err = store.create(&record("p1", "Other")).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateExternalId(id) if id == "p1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_overwrites_fields_and_bumps_timestamp() {
        let store = MemoryStore::new();
        let created = store.create(&record("p1", "First")).unwrap();

        let mut changed = record("p1", "Renamed");
        changed.ratings = vec![1.0];
        let updated = store.update(created.internal_id, &changed).unwrap();

        assert_eq!(updated.internal_id, created.internal_id);
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.ratings, vec![1.0]);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_unknown_internal_id_fails() {
        let store = MemoryStore::new();
        let err = store.update(Uuid::new_v4(), &record("p1", "First")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_all_is_ordered_by_name() {
        let store = MemoryStore::new();
        store.create(&record("p1", "Zoo")).unwrap();
        store.create(&record("p2", "Aquarium")).unwrap();
        store.create(&record("p3", "Museum")).unwrap();

        let names: Vec<String> = store.all().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Aquarium", "Museum", "Zoo"]);
    }

    #[test]
    fn test_concurrent_create_single_winner() {
        use std::sync::Arc;
        use std::thread;

        let store = Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                store.create(&record("shared", &format!("Writer {}", i))).is_ok()
            }));
        }

        let created: usize = handles
            .into_iter()
            .map(|h| h.join().unwrap() as usize)
            .sum();
        assert_eq!(created, 1);
        assert_eq!(store.len(), 1);
    }
}
