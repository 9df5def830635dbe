// ── Overview domain model ──
//
// Vocabularies, attribute types and the snapshot read model. Nothing in
// here touches shared state.

pub mod category;
pub mod fabric;
pub mod role;
pub mod snapshot;
pub mod status;
pub mod switch;

// ── Re-exports ──────────────────────────────────────────────────────

pub use category::{Category, FixedBucket};
pub use fabric::FabricName;
pub use role::{KeyTranslator, SwitchRole};
pub use snapshot::{HealthCounts, OverviewSnapshot, SyncCounts};
pub use status::{HealthStatus, SyncStatus};
pub use switch::{InventorySwitch, SwitchAttributes, SwitchContribution};
