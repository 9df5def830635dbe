//! Switch-overview rollups for the fabric controller emulator.
//!
//! The controller's `/switches/{fabric}/overview` endpoint reports, per
//! fabric, how many switches sit in each bucket of five categories:
//! config sync, health, hardware model, software version and role. This
//! crate maintains those counts incrementally as switches come and go:
//!
//! - **[`OverviewAggregator`]**: Facade the inventory layer calls on every
//!   switch transition ([`on_switch_added`](OverviewAggregator::on_switch_added),
//!   [`on_switch_removed`](OverviewAggregator::on_switch_removed),
//!   [`on_role_changed`](OverviewAggregator::on_role_changed), batches via
//!   [`apply_batch`](OverviewAggregator::apply_batch)). Validates everything
//!   up front and applies under a per-fabric lock.
//!
//! - **[`OverviewState`]**: The injected container of the five per-fabric
//!   stores: [`FixedCategoryStore`] for closed vocabularies (sync, health,
//!   role) and [`OpenCategoryStore`] for model and version strings.
//!
//! - **[`OverviewSnapshot`]**: Read model for one fabric, serialized with
//!   the controller's response keys.
//!
//! - **[`KeyTranslator`]** / [`SwitchRole`]: The 14-role vocabulary and its
//!   external (`"border gateway"`) and internal (`"border_gateway"`) spellings.
//!
//! - **[`StateFile`]**: JSON persistence of the flat bucket rows.

pub mod aggregator;
pub mod config;
pub mod convert;
pub mod error;
pub mod event;
pub mod model;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use aggregator::OverviewAggregator;
pub use config::EngineConfig;
pub use error::CoreError;
pub use event::{AttributeChange, OverviewEvent};
pub use store::{
    BucketRow, FixedCategoryStore, OpenCategoryStore, OverviewState, SENTINEL_BUCKET, StateFile,
    StateLock,
};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Category, FabricName, FixedBucket, HealthCounts, HealthStatus, InventorySwitch,
    KeyTranslator, OverviewSnapshot, SwitchAttributes, SwitchContribution, SwitchRole,
    SyncCounts, SyncStatus,
};
