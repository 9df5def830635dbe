// ── Closed-vocabulary category store ──
//
// One zero-seeded record per fabric, every bucket of the vocabulary
// present from creation on. Buckets never disappear; they bottom out
// at zero.

use std::collections::BTreeMap;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::{Category, FabricName, FixedBucket};

/// Per-fabric counts for a category with a compile-time bucket set
/// (sync status, health, role).
///
/// Individual calls are safe under concurrency (`DashMap` shard locks),
/// but multi-bucket updates must be serialized by the caller; see
/// [`OverviewAggregator`](crate::OverviewAggregator).
pub struct FixedCategoryStore<B: FixedBucket> {
    records: DashMap<FabricName, BTreeMap<B, u64>>,
}

impl<B: FixedBucket> FixedCategoryStore<B> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    pub fn category(&self) -> Category {
        B::CATEGORY
    }

    /// Create the zeroed record for `fabric`. Returns `true` if it was new.
    pub fn ensure(&self, fabric: &FabricName) -> bool {
        match self.records.entry(fabric.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(zeroed());
                debug!(fabric = %fabric, category = %B::CATEGORY, "created overview record");
                true
            }
        }
    }

    pub fn contains(&self, fabric: &str) -> bool {
        self.records.contains_key(fabric)
    }

    /// Add one switch to `bucket`. Returns the new count.
    pub fn increment(&self, fabric: &str, bucket: B) -> Result<u64, CoreError> {
        let mut record = self
            .records
            .get_mut(fabric)
            .ok_or_else(|| CoreError::not_found(fabric, B::CATEGORY))?;
        let count = record.entry(bucket).or_insert(0);
        *count = count.saturating_add(1);
        let updated = *count;
        debug!(fabric, category = %B::CATEGORY, bucket = bucket.key(), count = updated, "incremented");
        Ok(updated)
    }

    /// Take one switch out of `bucket`. At zero this is a no-op: double
    /// removals are expected and must not corrupt the tally.
    pub fn decrement(&self, fabric: &str, bucket: B) -> Result<u64, CoreError> {
        let mut record = self
            .records
            .get_mut(fabric)
            .ok_or_else(|| CoreError::not_found(fabric, B::CATEGORY))?;
        let Some(count) = record.get_mut(&bucket) else {
            return Ok(0);
        };
        if *count == 0 {
            warn!(fabric, category = %B::CATEGORY, bucket = bucket.key(), "decrement at zero ignored");
            return Ok(0);
        }
        *count -= 1;
        let updated = *count;
        debug!(fabric, category = %B::CATEGORY, bucket = bucket.key(), count = updated, "decremented");
        Ok(updated)
    }

    /// [`increment`](Self::increment) by storage key.
    pub fn increment_key(&self, fabric: &str, key: &str) -> Result<u64, CoreError> {
        self.increment(fabric, parse_key::<B>(key)?)
    }

    /// [`decrement`](Self::decrement) by storage key.
    pub fn decrement_key(&self, fabric: &str, key: &str) -> Result<u64, CoreError> {
        self.decrement(fabric, parse_key::<B>(key)?)
    }

    pub fn count(&self, fabric: &str, bucket: B) -> Option<u64> {
        self.records
            .get(fabric)
            .map(|r| r.get(&bucket).copied().unwrap_or_default())
    }

    /// Every bucket of the vocabulary with its current count.
    pub fn export(&self, fabric: &str) -> Result<BTreeMap<B, u64>, CoreError> {
        self.records
            .get(fabric)
            .map(|r| r.value().clone())
            .ok_or_else(|| CoreError::not_found(fabric, B::CATEGORY))
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

    /// Replace the record for `fabric` with `counts`, zero-filling any
    /// bucket not mentioned.
    pub(crate) fn restore(&self, fabric: FabricName, counts: &BTreeMap<B, u64>) {
        let mut record = zeroed::<B>();
        record.extend(counts.iter().map(|(b, c)| (*b, *c)));
        self.records.insert(fabric, record);
    }

    pub(crate) fn clear(&self) {
        self.records.clear();
    }
}

impl<B: FixedBucket> Default for FixedCategoryStore<B> {
    fn default() -> Self {
        Self::new()
    }
}

fn zeroed<B: FixedBucket>() -> BTreeMap<B, u64> {
    B::all().iter().map(|b| (*b, 0)).collect()
}

pub(crate) fn parse_key<B: FixedBucket>(key: &str) -> Result<B, CoreError> {
    B::from_key(key).ok_or_else(|| CoreError::unknown_bucket(B::CATEGORY, key))
}
