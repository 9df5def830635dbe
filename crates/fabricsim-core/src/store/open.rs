// ── Open-vocabulary category store ──
//
// Buckets appear on first increment and are pruned when they fall back
// to zero. Each fabric record also carries a reserved sentinel bucket so
// an initialized-but-empty fabric is distinguishable from an unknown one.

use std::collections::BTreeMap;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use dashmap::mapref::one::RefMut;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Category, FabricName};

/// Reserved bucket key. Empty attribute values never become buckets, so
/// the empty string cannot collide with a real model or version.
pub const SENTINEL_BUCKET: &str = "";

/// Per-fabric counts for a category whose bucket set is only known at
/// runtime (hardware model, software version).
pub struct OpenCategoryStore {
    category: Category,
    records: DashMap<FabricName, BTreeMap<String, u64>>,
}

impl OpenCategoryStore {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            records: DashMap::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Create the sentinel-only record for `fabric`. Returns `true` if it was new.
    pub fn ensure(&self, fabric: &FabricName) -> bool {
        match self.records.entry(fabric.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(sentinel_only());
                debug!(fabric = %fabric, category = %self.category, "created overview record");
                true
            }
        }
    }

    pub fn contains(&self, fabric: &str) -> bool {
        self.records.contains_key(fabric)
    }

    /// Add one switch to `key`, creating the bucket at 1 if absent.
    pub fn increment(&self, fabric: &str, key: &str) -> Result<u64, CoreError> {
        let mut record = self.record_mut(fabric)?;
        if key == SENTINEL_BUCKET {
            return Ok(0);
        }
        let count = record.entry(key.to_owned()).or_insert(0);
        *count = count.saturating_add(1);
        let updated = *count;
        debug!(fabric, category = %self.category, bucket = key, count = updated, "incremented");
        Ok(updated)
    }

    /// Take one switch out of `key`; the bucket is dropped when it hits
    /// zero. Unknown keys are ignored.
    pub fn decrement(&self, fabric: &str, key: &str) -> Result<u64, CoreError> {
        let mut record = self.record_mut(fabric)?;
        if key == SENTINEL_BUCKET {
            return Ok(0);
        }
        let Some(count) = record.get_mut(key) else {
            warn!(fabric, category = %self.category, bucket = key, "decrement of absent bucket ignored");
            return Ok(0);
        };
        *count = count.saturating_sub(1);
        let updated = *count;
        if updated == 0 {
            record.remove(key);
            debug!(fabric, category = %self.category, bucket = key, "pruned");
        } else {
            debug!(fabric, category = %self.category, bucket = key, count = updated, "decremented");
        }
        Ok(updated)
    }

    /// Current count for `key`; `Some(0)` for a bucket that does not
    /// exist in a known fabric.
    pub fn count(&self, fabric: &str, key: &str) -> Option<u64> {
        self.records.get(fabric).map(|r| {
            if key == SENTINEL_BUCKET {
                0
            } else {
                r.get(key).copied().unwrap_or_default()
            }
        })
    }

    /// All live buckets. The sentinel is never included.
    pub fn export(&self, fabric: &str) -> Result<BTreeMap<String, u64>, CoreError> {
        let record = self
            .records
            .get(fabric)
            .ok_or_else(|| CoreError::not_found(fabric, self.category))?;
        Ok(record
            .iter()
            .filter(|(k, _)| k.as_str() != SENTINEL_BUCKET)
            .map(|(k, v)| (k.clone(), *v))
            .collect())
    }

    /// Drop the record for `fabric`. Returns `true` if one existed.
    pub fn remove(&self, fabric: &str) -> bool {
        self.records.remove(fabric).is_some()
    }

    pub fn fabrics(&self) -> Vec<FabricName> {
        self.records.iter().map(|r| r.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // ── Restore support ──────────────────────────────────────────────

    /// Raw record including the sentinel, as persisted.
    pub(crate) fn raw(&self, fabric: &str) -> Option<BTreeMap<String, u64>> {
        self.records.get(fabric).map(|r| r.value().clone())
    }

    /// Replace the record for `fabric`. Zero-count buckets are dropped and
    /// the sentinel is always present afterwards.
    pub(crate) fn restore(&self, fabric: FabricName, buckets: &BTreeMap<String, u64>) {
        let mut record = sentinel_only();
        record.extend(
            buckets
                .iter()
                .filter(|(k, v)| k.as_str() != SENTINEL_BUCKET && **v > 0)
                .map(|(k, v)| (k.clone(), *v)),
        );
        self.records.insert(fabric, record);
    }

    pub(crate) fn clear(&self) {
        self.records.clear();
    }

    fn record_mut(&self, fabric: &str) -> Result<RefMut<'_, FabricName, BTreeMap<String, u64>>, CoreError> {
        self.records
            .get_mut(fabric)
            .ok_or_else(|| CoreError::not_found(fabric, self.category))
    }
}

fn sentinel_only() -> BTreeMap<String, u64> {
    let mut record = BTreeMap::new();
    record.insert(SENTINEL_BUCKET.to_owned(), 0);
    record
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn store() -> OpenCategoryStore {
        let store = OpenCategoryStore::new(Category::HwModel);
        store.ensure(&FabricName::from("F1"));
        store
    }

    #[test]
    fn fresh_record_exports_empty() {
        let store = store();
        assert!(store.export("F1").unwrap().is_empty());
        assert_eq!(store.raw("F1").unwrap().len(), 1);
        assert!(!store.ensure(&FabricName::from("F1")));
    }

    #[test]
    fn unknown_fabric_is_not_found() {
        let store = OpenCategoryStore::new(Category::SwVersion);
        let err = store.increment("F9", "10.2(5)").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { category: Category::SwVersion, .. }));
        assert!(store.export("F9").is_err());
        assert_eq!(store.count("F9", "10.2(5)"), None);
    }

    #[test]
    fn bucket_is_created_then_pruned() {
        let store = store();
        assert_eq!(store.increment("F1", "N9K-C93180YC-EX").unwrap(), 1);
        assert_eq!(store.increment("F1", "N9K-C93180YC-EX").unwrap(), 2);
        assert_eq!(store.decrement("F1", "N9K-C93180YC-EX").unwrap(), 1);
        assert_eq!(store.decrement("F1", "N9K-C93180YC-EX").unwrap(), 0);
        assert!(store.export("F1").unwrap().is_empty());
        // sentinel survives the prune
        assert!(store.raw("F1").unwrap().contains_key(SENTINEL_BUCKET));
    }

    #[test]
    fn absent_bucket_decrement_is_noop() {
        let store = store();
        store.increment("F1", "N9K-C9336C-FX2").unwrap();
        assert_eq!(store.decrement("F1", "N9K-C9508").unwrap(), 0);
        let exported = store.export("F1").unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported["N9K-C9336C-FX2"], 1);
    }

    #[test]
    fn sentinel_cannot_be_mutated() {
        let store = store();
        assert_eq!(store.increment("F1", SENTINEL_BUCKET).unwrap(), 0);
        assert_eq!(store.decrement("F1", SENTINEL_BUCKET).unwrap(), 0);
        assert_eq!(store.raw("F1").unwrap()[SENTINEL_BUCKET], 0);
        assert!(store.export("F1").unwrap().is_empty());
    }

    #[test]
    fn restore_drops_zero_buckets() {
        let store = OpenCategoryStore::new(Category::SwVersion);
        let mut buckets = BTreeMap::new();
        buckets.insert("10.2(5)".to_owned(), 3);
        buckets.insert("9.3(8)".to_owned(), 0);
        store.restore(FabricName::from("F1"), &buckets);
        let exported = store.export("F1").unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(store.count("F1", "10.2(5)"), Some(3));
        assert!(store.raw("F1").unwrap().contains_key(SENTINEL_BUCKET));
    }
}
