// ── Overview state container ──
//
// The five per-fabric category stores, owned together and injected into
// the aggregator. Nothing here enforces cross-store consistency; that is
// the aggregator's job.

use std::collections::BTreeSet;

use super::fixed::FixedCategoryStore;
use super::open::OpenCategoryStore;
use crate::model::{Category, FabricName, HealthStatus, SwitchRole, SyncStatus};

pub struct OverviewState {
    pub(crate) sync: FixedCategoryStore<SyncStatus>,
    pub(crate) health: FixedCategoryStore<HealthStatus>,
    pub(crate) hw_model: OpenCategoryStore,
    pub(crate) sw_version: OpenCategoryStore,
    pub(crate) role: FixedCategoryStore<SwitchRole>,
}

impl OverviewState {
    pub fn new() -> Self {
        Self {
            sync: FixedCategoryStore::new(),
            health: FixedCategoryStore::new(),
            hw_model: OpenCategoryStore::new(Category::HwModel),
            sw_version: OpenCategoryStore::new(Category::SwVersion),
            role: FixedCategoryStore::new(),
        }
    }

    pub fn sync(&self) -> &FixedCategoryStore<SyncStatus> {
        &self.sync
    }

    pub fn health(&self) -> &FixedCategoryStore<HealthStatus> {
        &self.health
    }

    pub fn hw_model(&self) -> &OpenCategoryStore {
        &self.hw_model
    }

    pub fn sw_version(&self) -> &OpenCategoryStore {
        &self.sw_version
    }

    pub fn role(&self) -> &FixedCategoryStore<SwitchRole> {
        &self.role
    }

    /// Ensure all five stores for `fabric`. Returns `true` if any was new.
    pub(crate) fn ensure_all(&self, fabric: &FabricName) -> bool {
        // no short-circuit: every store must be ensured
        let created = [
            self.sync.ensure(fabric),
            self.health.ensure(fabric),
            self.hw_model.ensure(fabric),
            self.sw_version.ensure(fabric),
            self.role.ensure(fabric),
        ];
        created.iter().any(|c| *c)
    }

    /// Remove all five stores for `fabric`. Returns `true` if any existed.
    pub(crate) fn remove_all(&self, fabric: &str) -> bool {
        let removed = [
            self.sync.remove(fabric),
            self.health.remove(fabric),
            self.hw_model.remove(fabric),
            self.sw_version.remove(fabric),
            self.role.remove(fabric),
        ];
        removed.iter().any(|r| *r)
    }

    /// A fabric counts as initialized once every store knows it.
    pub fn is_initialized(&self, fabric: &str) -> bool {
        self.sync.contains(fabric)
            && self.health.contains(fabric)
            && self.hw_model.contains(fabric)
            && self.sw_version.contains(fabric)
            && self.role.contains(fabric)
    }

    /// Whether any store has a record for `fabric`.
    pub fn knows(&self, fabric: &str) -> bool {
        self.sync.contains(fabric)
            || self.health.contains(fabric)
            || self.hw_model.contains(fabric)
            || self.sw_version.contains(fabric)
            || self.role.contains(fabric)
    }

    /// First category without a record for `fabric`, in export order.
    pub(crate) fn missing_category(&self, fabric: &str) -> Option<Category> {
        [
            (Category::Sync, self.sync.contains(fabric)),
            (Category::Health, self.health.contains(fabric)),
            (Category::HwModel, self.hw_model.contains(fabric)),
            (Category::SwVersion, self.sw_version.contains(fabric)),
            (Category::Role, self.role.contains(fabric)),
        ]
        .into_iter()
        .find_map(|(category, present)| (!present).then_some(category))
    }

    /// Fabrics known to any store, sorted.
    pub fn fabrics(&self) -> Vec<FabricName> {
        let mut all = BTreeSet::new();
        all.extend(self.sync.fabrics());
        all.extend(self.health.fabrics());
        all.extend(self.hw_model.fabrics());
        all.extend(self.sw_version.fabrics());
        all.extend(self.role.fabrics());
        all.into_iter().collect()
    }

    pub(crate) fn clear(&self) {
        self.sync.clear();
        self.health.clear();
        self.hw_model.clear();
        self.sw_version.clear();
        self.role.clear();
    }
}

impl Default for OverviewState {
    fn default() -> Self {
        Self::new()
    }
}
