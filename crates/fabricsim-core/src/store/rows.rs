// ── Flat bucket rows ──
//
// The persisted shape of the overview tables: one row per
// (fabric, category, bucket). Open-store sentinel rows are included so
// that a restored fabric is initialized even when it has no switches.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::fixed::parse_key;
use super::state::OverviewState;
use crate::error::CoreError;
use crate::model::{Category, FabricName, FixedBucket, HealthStatus, SwitchRole, SyncStatus};

/// One persisted bucket. Fixed-category buckets use their storage key
/// (roles in internal spelling).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketRow {
    pub fabric: FabricName,
    pub category: Category,
    pub bucket: String,
    pub count: u64,
}

impl BucketRow {
    pub fn new(
        fabric: impl Into<FabricName>,
        category: Category,
        bucket: impl Into<String>,
        count: u64,
    ) -> Self {
        Self {
            fabric: fabric.into(),
            category,
            bucket: bucket.into(),
            count,
        }
    }
}

#[derive(Default)]
struct StagedFabric {
    sync: BTreeMap<SyncStatus, u64>,
    health: BTreeMap<HealthStatus, u64>,
    hw_model: BTreeMap<String, u64>,
    sw_version: BTreeMap<String, u64>,
    role: BTreeMap<SwitchRole, u64>,
}

impl OverviewState {
    /// Every bucket of every fabric, ordered by fabric then category.
    pub fn rows(&self) -> Vec<BucketRow> {
        let mut rows = Vec::new();
        for fabric in self.fabrics() {
            if let Ok(buckets) = self.sync.export(fabric.as_str()) {
                rows.extend(fixed_rows(&fabric, &buckets));
            }
            if let Ok(buckets) = self.health.export(fabric.as_str()) {
                rows.extend(fixed_rows(&fabric, &buckets));
            }
            if let Some(buckets) = self.hw_model.raw(fabric.as_str()) {
                rows.extend(open_rows(&fabric, Category::HwModel, buckets));
            }
            if let Some(buckets) = self.sw_version.raw(fabric.as_str()) {
                rows.extend(open_rows(&fabric, Category::SwVersion, buckets));
            }
            if let Ok(buckets) = self.role.export(fabric.as_str()) {
                rows.extend(fixed_rows(&fabric, &buckets));
            }
        }
        rows
    }

    /// Replace the whole state with `rows`.
    ///
    /// Every row is checked before anything is touched; a bad bucket key
    /// leaves the current state as it was. Each fabric mentioned comes
    /// back fully initialized, with unmentioned buckets at zero. Returns
    /// the number of fabrics restored.
    pub fn restore_rows(&self, rows: &[BucketRow]) -> Result<usize, CoreError> {
        let mut staged: BTreeMap<FabricName, StagedFabric> = BTreeMap::new();
        for row in rows {
            let entry = staged.entry(row.fabric.clone()).or_default();
            match row.category {
                Category::Sync => {
                    entry.sync.insert(parse_key(&row.bucket)?, row.count);
                }
                Category::Health => {
                    entry.health.insert(parse_key(&row.bucket)?, row.count);
                }
                Category::Role => {
                    entry.role.insert(parse_key(&row.bucket)?, row.count);
                }
                Category::HwModel => {
                    entry.hw_model.insert(row.bucket.clone(), row.count);
                }
                Category::SwVersion => {
                    entry.sw_version.insert(row.bucket.clone(), row.count);
                }
            }
        }

        self.clear();
        for (fabric, buckets) in &staged {
            self.sync.restore(fabric.clone(), &buckets.sync);
            self.health.restore(fabric.clone(), &buckets.health);
            self.hw_model.restore(fabric.clone(), &buckets.hw_model);
            self.sw_version.restore(fabric.clone(), &buckets.sw_version);
            self.role.restore(fabric.clone(), &buckets.role);
        }

        info!(fabrics = staged.len(), rows = rows.len(), "restored overview state");
        Ok(staged.len())
    }
}

fn fixed_rows<B: FixedBucket>(fabric: &FabricName, buckets: &BTreeMap<B, u64>) -> Vec<BucketRow> {
    buckets
        .iter()
        .map(|(b, c)| BucketRow::new(fabric.clone(), B::CATEGORY, b.key(), *c))
        .collect()
}

fn open_rows(
    fabric: &FabricName,
    category: Category,
    buckets: BTreeMap<String, u64>,
) -> Vec<BucketRow> {
    buckets
        .into_iter()
        .map(|(bucket, count)| BucketRow::new(fabric.clone(), category, bucket, count))
        .collect()
}
