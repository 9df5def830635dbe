// ── Sync and health vocabularies ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::category::{Category, FixedBucket};

/// Configuration-sync status of a switch.
///
/// Bucket keys are `in_sync` / `out_of_sync`. The inventory reports the
/// controller spelling (`In-Sync`, `Out-Of-Sync`); see [`SyncStatus::normalize`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SyncStatus {
    InSync,
    OutOfSync,
}

impl SyncStatus {
    const ALL: [Self; 2] = [Self::InSync, Self::OutOfSync];

    /// Fold an inventory `ccStatus` value into bucket-key spelling:
    /// lowercase, dashes become underscores.
    pub fn normalize(raw: &str) -> String {
        raw.trim().to_lowercase().replace('-', "_")
    }
}

impl FixedBucket for SyncStatus {
    const CATEGORY: Category = Category::Sync;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn key(self) -> &'static str {
        self.into()
    }

    fn from_key(key: &str) -> Option<Self> {
        key.parse().ok()
    }
}

/// Operational health of a switch (`operStatus`).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
pub enum HealthStatus {
    Healthy,
    Major,
    Minor,
}

impl HealthStatus {
    const ALL: [Self; 3] = [Self::Healthy, Self::Major, Self::Minor];
}

impl FixedBucket for HealthStatus {
    const CATEGORY: Category = Category::Health;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn key(self) -> &'static str {
        self.into()
    }

    fn from_key(key: &str) -> Option<Self> {
        key.parse().ok()
    }
}
