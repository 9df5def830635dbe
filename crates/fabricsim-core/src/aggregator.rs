// ── Overview aggregator ──
//
// The facade the inventory layer talks to. Every switch transition is
// validated in full, then applied to the five category stores under the
// fabric's lock, so concurrent callers on one fabric never see (or
// leave behind) a half-applied switch.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::{Mutex, RwLock};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::CoreError;
use crate::event::{AttributeChange, OverviewEvent, ValidatedChange, ValidatedEvent};
use crate::model::{
    FabricName, FixedBucket, HealthCounts, OverviewSnapshot, SwitchAttributes, SwitchContribution,
    SyncCounts,
};
use crate::store::{FixedCategoryStore, OpenCategoryStore, OverviewState, StateFile};

/// Entry point for overview mutations and reads.
///
/// Cheaply cloneable via `Arc<AggregatorInner>`. Operations on different
/// fabrics run in parallel; operations on one fabric are serialized.
#[derive(Clone)]
pub struct OverviewAggregator {
    inner: Arc<AggregatorInner>,
}

struct AggregatorInner {
    state: Arc<OverviewState>,
    /// One lock per fabric ever touched. Entries outlive `destroy` so a
    /// waiter never ends up holding a lock nobody else can see.
    locks: DashMap<FabricName, Arc<Mutex<()>>>,
    /// Shared by every per-fabric operation; whole-state restore and
    /// capture take it exclusively.
    gate: RwLock<()>,
    /// Bumped once per committed mutation.
    revision: watch::Sender<u64>,
    state_file: Option<PathBuf>,
}

impl OverviewAggregator {
    /// Wrap an existing state container. Nothing is loaded or persisted.
    pub fn new(state: Arc<OverviewState>) -> Self {
        Self::build(state, None)
    }

    /// Build from engine configuration: restore the state file if one is
    /// configured and present, then initialize the preload fabrics.
    pub fn from_config(config: &EngineConfig) -> Result<Self, CoreError> {
        let aggregator = Self::build(Arc::new(OverviewState::new()), config.state_file.clone());

        if let Some(path) = &config.state_file {
            if let Some(file) = StateFile::load_if_exists(path)? {
                let fabrics = aggregator.restore(&file)?;
                info!(path = %path.display(), fabrics, "restored overview state");
            }
        }

        for fabric in &config.preload_fabrics {
            aggregator.initialize(fabric.as_str());
        }
        Ok(aggregator)
    }

    fn build(state: Arc<OverviewState>, state_file: Option<PathBuf>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(AggregatorInner {
                state,
                locks: DashMap::new(),
                gate: RwLock::new(()),
                revision,
                state_file,
            }),
        }
    }

    /// Access the underlying state container.
    pub fn state(&self) -> &Arc<OverviewState> {
        &self.inner.state
    }

    pub fn state_file(&self) -> Option<&Path> {
        self.inner.state_file.as_deref()
    }

    // ── Fabric lifecycle ─────────────────────────────────────────────

    /// Create all five stores for `fabric`. Returns `true` if anything
    /// was created; a second call is a no-op.
    pub fn initialize(&self, fabric: &str) -> bool {
        let _gate = self.inner.gate.read();
        let lock = self.fabric_lock(fabric);
        let _guard = lock.lock();
        let created = self.inner.state.ensure_all(&FabricName::from(fabric));
        if created {
            info!(fabric, "initialized fabric overview");
            self.bump();
        }
        created
    }

    /// Drop every store for `fabric`. Returns `true` if the fabric was known.
    pub fn destroy(&self, fabric: &str) -> bool {
        let _gate = self.inner.gate.read();
        if !self.inner.state.knows(fabric) {
            return false;
        }
        let lock = self.fabric_lock(fabric);
        let _guard = lock.lock();
        let removed = self.inner.state.remove_all(fabric);
        if removed {
            info!(fabric, "destroyed fabric overview");
            self.bump();
        }
        removed
    }

    /// Initialized fabrics, sorted by name.
    pub fn fabrics(&self) -> Vec<FabricName> {
        self.inner
            .state
            .fabrics()
            .into_iter()
            .filter(|f| self.inner.state.is_initialized(f.as_str()))
            .collect()
    }

    // ── Switch transitions ───────────────────────────────────────────

    /// Count a newly discovered switch in every category it has a value
    /// for. Initializes the fabric on first use.
    pub fn on_switch_added(&self, fabric: &str, attrs: &SwitchAttributes) -> Result<(), CoreError> {
        let contribution = attrs.validate()?;
        let _gate = self.inner.gate.read();
        let lock = self.fabric_lock(fabric);
        let _guard = lock.lock();

        if self.inner.state.ensure_all(&FabricName::from(fabric)) {
            info!(fabric, "initialized fabric overview on first switch");
        }
        self.apply_added(fabric, &contribution)?;
        debug!(fabric, ?contribution, "switch added");
        self.bump();
        Ok(())
    }

    /// Take a switch out of every category it had a value for. Unset
    /// attributes are skipped.
    pub fn on_switch_removed(
        &self,
        fabric: &str,
        attrs: &SwitchAttributes,
    ) -> Result<(), CoreError> {
        let contribution = attrs.validate()?;
        let _gate = self.inner.gate.read();
        let lock = self.existing_lock(fabric)?;
        let _guard = lock.lock();

        self.require(fabric)?;
        self.apply_removed(fabric, &contribution)?;
        debug!(fabric, ?contribution, "switch removed");
        self.bump();
        Ok(())
    }

    /// Move a switch from `old` to `new` role (external spellings; `""`
    /// for unassigned). Returns `false` when the roles are equal.
    pub fn on_role_changed(&self, fabric: &str, old: &str, new: &str) -> Result<bool, CoreError> {
        self.on_attribute_changed(fabric, &AttributeChange::role(old, new))
    }

    /// Move a switch between two buckets of one category. Both values are
    /// validated before either bucket is touched. Returns `false` when
    /// nothing changed.
    pub fn on_attribute_changed(
        &self,
        fabric: &str,
        change: &AttributeChange,
    ) -> Result<bool, CoreError> {
        let validated = change.validate()?;
        let _gate = self.inner.gate.read();
        let lock = self.existing_lock(fabric)?;
        let _guard = lock.lock();

        self.require(fabric)?;
        if validated.is_noop() {
            return Ok(false);
        }
        self.apply_change(fabric, &validated)?;
        let (old, new) = change.values();
        debug!(fabric, category = %change.category(), old, new, "attribute changed");
        self.bump();
        Ok(true)
    }

    /// Apply a batch of events for one fabric, all or nothing: every
    /// event is validated before the first is applied. Returns the number
    /// of events that changed something.
    pub fn apply_batch(&self, fabric: &str, events: &[OverviewEvent]) -> Result<usize, CoreError> {
        let validated = events
            .iter()
            .enumerate()
            .map(|(index, event)| {
                event.validate().inspect_err(|err| {
                    warn!(fabric, index, error = %err, "rejected overview batch");
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if validated.is_empty() {
            return Ok(0);
        }

        let adds = validated
            .iter()
            .any(|e| matches!(e, ValidatedEvent::Added(_)));

        let _gate = self.inner.gate.read();
        let lock = if adds {
            self.fabric_lock(fabric)
        } else {
            self.existing_lock(fabric)?
        };
        let _guard = lock.lock();

        if adds {
            if self.inner.state.ensure_all(&FabricName::from(fabric)) {
                info!(fabric, "initialized fabric overview from batch");
            }
        } else {
            self.require(fabric)?;
        }

        let mut applied = 0;
        for event in &validated {
            match event {
                ValidatedEvent::Added(c) => self.apply_added(fabric, c)?,
                ValidatedEvent::Removed(c) => self.apply_removed(fabric, c)?,
                ValidatedEvent::Changed(change) if change.is_noop() => continue,
                ValidatedEvent::Changed(change) => self.apply_change(fabric, change)?,
            }
            applied += 1;
        }

        debug!(fabric, events = events.len(), applied, "applied overview batch");
        if applied > 0 {
            self.bump();
        }
        Ok(applied)
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Consistent rollup of all five categories for `fabric`.
    pub fn snapshot(&self, fabric: &str) -> Result<OverviewSnapshot, CoreError> {
        let _gate = self.inner.gate.read();
        let lock = self.existing_lock(fabric)?;
        let _guard = lock.lock();

        let state = &self.inner.state;
        Ok(OverviewSnapshot {
            sync: SyncCounts::from_buckets(&state.sync.export(fabric)?),
            health: HealthCounts::from_buckets(&state.health.export(fabric)?),
            hw_model: state.hw_model.export(fabric)?,
            sw_version: state.sw_version.export(fabric)?,
            role: OverviewSnapshot::role_map(&state.role.export(fabric)?),
        })
    }

    /// Watch the mutation counter. The value moves on every committed
    /// change, so a cached snapshot is stale once it differs.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    pub fn revision(&self) -> u64 {
        *self.inner.revision.borrow()
    }

    // ── Persistence ──────────────────────────────────────────────────

    /// Rows of every fabric, taken while no mutation is in flight.
    pub fn capture(&self) -> StateFile {
        let _gate = self.inner.gate.write();
        StateFile::capture(&self.inner.state)
    }

    /// Replace all state with the contents of `file`. Returns the number
    /// of fabrics restored.
    pub fn restore(&self, file: &StateFile) -> Result<usize, CoreError> {
        let _gate = self.inner.gate.write();
        let fabrics = file.apply(&self.inner.state)?;
        self.bump();
        Ok(fabrics)
    }

    /// Write the current state to the configured state file. Returns
    /// `false` when running in memory only.
    pub fn persist(&self) -> Result<bool, CoreError> {
        let Some(path) = self.inner.state_file.as_deref() else {
            return Ok(false);
        };
        self.capture().save(path)?;
        info!(path = %path.display(), "persisted overview state");
        Ok(true)
    }

    // ── Internals ────────────────────────────────────────────────────

    fn fabric_lock(&self, fabric: &str) -> Arc<Mutex<()>> {
        if let Some(lock) = self.inner.locks.get(fabric) {
            return Arc::clone(lock.value());
        }
        Arc::clone(
            self.inner
                .locks
                .entry(FabricName::from(fabric))
                .or_default()
                .value(),
        )
    }

    /// Lock for a fabric that must already exist. Unknown names are
    /// rejected before a lock entry is created for them.
    fn existing_lock(&self, fabric: &str) -> Result<Arc<Mutex<()>>, CoreError> {
        self.require(fabric)?;
        Ok(self.fabric_lock(fabric))
    }

    fn require(&self, fabric: &str) -> Result<(), CoreError> {
        match self.inner.state.missing_category(fabric) {
            Some(category) => Err(CoreError::not_found(fabric, category)),
            None => Ok(()),
        }
    }

    fn bump(&self) {
        self.inner.revision.send_modify(|rev| *rev += 1);
    }

    fn apply_added(&self, fabric: &str, c: &SwitchContribution) -> Result<(), CoreError> {
        let state = &self.inner.state;
        if let Some(sync) = c.sync {
            state.sync.increment(fabric, sync)?;
        }
        if let Some(health) = c.health {
            state.health.increment(fabric, health)?;
        }
        if let Some(model) = &c.hw_model {
            state.hw_model.increment(fabric, model)?;
        }
        if let Some(version) = &c.sw_version {
            state.sw_version.increment(fabric, version)?;
        }
        if let Some(role) = c.role {
            state.role.increment(fabric, role)?;
        }
        Ok(())
    }

    fn apply_removed(&self, fabric: &str, c: &SwitchContribution) -> Result<(), CoreError> {
        let state = &self.inner.state;
        if let Some(sync) = c.sync {
            state.sync.decrement(fabric, sync)?;
        }
        if let Some(health) = c.health {
            state.health.decrement(fabric, health)?;
        }
        if let Some(model) = &c.hw_model {
            state.hw_model.decrement(fabric, model)?;
        }
        if let Some(version) = &c.sw_version {
            state.sw_version.decrement(fabric, version)?;
        }
        if let Some(role) = c.role {
            state.role.decrement(fabric, role)?;
        }
        Ok(())
    }

    fn apply_change(&self, fabric: &str, change: &ValidatedChange) -> Result<(), CoreError> {
        let state = &self.inner.state;
        match change {
            ValidatedChange::Sync(old, new) => fixed_transition(&state.sync, fabric, *old, *new),
            ValidatedChange::Health(old, new) => {
                fixed_transition(&state.health, fabric, *old, *new)
            }
            ValidatedChange::Role(old, new) => fixed_transition(&state.role, fabric, *old, *new),
            ValidatedChange::HwModel(old, new) => {
                open_transition(&state.hw_model, fabric, old.as_deref(), new.as_deref())
            }
            ValidatedChange::SwVersion(old, new) => {
                open_transition(&state.sw_version, fabric, old.as_deref(), new.as_deref())
            }
        }
    }
}

fn fixed_transition<B: FixedBucket>(
    store: &FixedCategoryStore<B>,
    fabric: &str,
    old: Option<B>,
    new: Option<B>,
) -> Result<(), CoreError> {
    if let Some(old) = old {
        store.decrement(fabric, old)?;
    }
    if let Some(new) = new {
        store.increment(fabric, new)?;
    }
    Ok(())
}

fn open_transition(
    store: &OpenCategoryStore,
    fabric: &str,
    old: Option<&str>,
    new: Option<&str>,
) -> Result<(), CoreError> {
    if let Some(old) = old {
        store.decrement(fabric, old)?;
    }
    if let Some(new) = new {
        store.increment(fabric, new)?;
    }
    Ok(())
}

impl std::fmt::Debug for OverviewAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverviewAggregator")
            .field("fabrics", &self.inner.state.fabrics())
            .field("revision", &self.revision())
            .field("state_file", &self.inner.state_file)
            .finish_non_exhaustive()
    }
}
