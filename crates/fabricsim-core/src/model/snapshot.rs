// ── Overview snapshot ──
//
// The consolidated read model for one fabric. Serializes with the
// controller's `/switches/{fabric}/overview` response keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::category::FixedBucket;
use super::role::SwitchRole;
use super::status::{HealthStatus, SyncStatus};

/// `switchConfig` block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCounts {
    pub in_sync: u64,
    pub out_of_sync: u64,
}

impl SyncCounts {
    pub fn get(&self, status: SyncStatus) -> u64 {
        match status {
            SyncStatus::InSync => self.in_sync,
            SyncStatus::OutOfSync => self.out_of_sync,
        }
    }

    pub(crate) fn from_buckets(buckets: &BTreeMap<SyncStatus, u64>) -> Self {
        let count = |s| buckets.get(&s).copied().unwrap_or_default();
        Self {
            in_sync: count(SyncStatus::InSync),
            out_of_sync: count(SyncStatus::OutOfSync),
        }
    }
}

/// `switchHealth` block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCounts {
    #[serde(rename = "Healthy")]
    pub healthy: u64,
    #[serde(rename = "Major")]
    pub major: u64,
    #[serde(rename = "Minor")]
    pub minor: u64,
}

impl HealthCounts {
    pub fn get(&self, status: HealthStatus) -> u64 {
        match status {
            HealthStatus::Healthy => self.healthy,
            HealthStatus::Major => self.major,
            HealthStatus::Minor => self.minor,
        }
    }

    pub(crate) fn from_buckets(buckets: &BTreeMap<HealthStatus, u64>) -> Self {
        let count = |h| buckets.get(&h).copied().unwrap_or_default();
        Self {
            healthy: count(HealthStatus::Healthy),
            major: count(HealthStatus::Major),
            minor: count(HealthStatus::Minor),
        }
    }
}

/// Point-in-time rollup of all five categories for a fabric.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverviewSnapshot {
    #[serde(rename = "switchConfig")]
    pub sync: SyncCounts,
    #[serde(rename = "switchHealth")]
    pub health: HealthCounts,
    /// Model name → count. Never contains the open-store sentinel.
    #[serde(rename = "switchHWVersions")]
    pub hw_model: BTreeMap<String, u64>,
    /// Version string → count. Never contains the open-store sentinel.
    #[serde(rename = "switchSWVersions")]
    pub sw_version: BTreeMap<String, u64>,
    /// Keyed by the 14 external role spellings, zeros included.
    #[serde(rename = "switchRoles")]
    pub role: BTreeMap<String, u64>,
}

impl OverviewSnapshot {
    pub(crate) fn role_map(buckets: &BTreeMap<SwitchRole, u64>) -> BTreeMap<String, u64> {
        SwitchRole::all()
            .iter()
            .map(|r| {
                (
                    r.external().to_owned(),
                    buckets.get(r).copied().unwrap_or_default(),
                )
            })
            .collect()
    }

    pub fn role_count(&self, role: SwitchRole) -> u64 {
        self.role.get(role.external()).copied().unwrap_or_default()
    }

    pub fn hw_model_count(&self, model: &str) -> u64 {
        self.hw_model.get(model).copied().unwrap_or_default()
    }

    pub fn sw_version_count(&self, version: &str) -> u64 {
        self.sw_version.get(version).copied().unwrap_or_default()
    }

    /// Switches carrying a role.
    pub fn roled_switches(&self) -> u64 {
        self.role.values().sum()
    }
}
