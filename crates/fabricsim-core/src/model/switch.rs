// ── Switch attribute types ──
//
// The engine keeps no switch records. Callers hand in the attribute
// values a switch had (or now has) at the moment of each transition.

use serde::{Deserialize, Serialize};

use super::category::FixedBucket;
use super::role::SwitchRole;
use super::status::{HealthStatus, SyncStatus};
use crate::error::CoreError;

/// Raw attribute values for one switch, as the caller knows them.
///
/// `None` and `""` both mean "contributes nothing" for that category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hw_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sw_version: Option<String>,
    /// External spelling, e.g. `"border gateway"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl SwitchAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sync(mut self, sync: impl Into<String>) -> Self {
        self.sync = Some(sync.into());
        self
    }

    pub fn with_health(mut self, health: impl Into<String>) -> Self {
        self.health = Some(health.into());
        self
    }

    pub fn with_hw_model(mut self, model: impl Into<String>) -> Self {
        self.hw_model = Some(model.into());
        self
    }

    pub fn with_sw_version(mut self, version: impl Into<String>) -> Self {
        self.sw_version = Some(version.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Resolve every attribute into its bucket, or fail without side effects.
    pub fn validate(&self) -> Result<SwitchContribution, CoreError> {
        Ok(SwitchContribution {
            sync: parse_fixed::<SyncStatus>(self.sync.as_deref())?,
            health: parse_fixed::<HealthStatus>(self.health.as_deref())?,
            hw_model: non_empty(self.hw_model.as_deref()),
            sw_version: non_empty(self.sw_version.as_deref()),
            role: parse_role(self.role.as_deref())?,
        })
    }
}

/// A switch's validated contribution: at most one bucket per category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SwitchContribution {
    pub sync: Option<SyncStatus>,
    pub health: Option<HealthStatus>,
    pub hw_model: Option<String>,
    pub sw_version: Option<String>,
    pub role: Option<SwitchRole>,
}

impl SwitchContribution {
    pub fn is_empty(&self) -> bool {
        self.sync.is_none()
            && self.health.is_none()
            && self.hw_model.is_none()
            && self.sw_version.is_none()
            && self.role.is_none()
    }
}

/// Inventory switch record, in the controller's wire spelling.
///
/// Only the fields that feed the overview are modelled; everything else
/// in the inventory payload is ignored on deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySwitch {
    pub serial_number: String,
    #[serde(default)]
    pub fabric_name: String,
    /// Config-compliance status, e.g. `"In-Sync"`.
    #[serde(default)]
    pub cc_status: String,
    /// Health, e.g. `"Minor"`.
    #[serde(default)]
    pub oper_status: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub release: String,
    /// External role spelling, `""` when unassigned.
    #[serde(default)]
    pub switch_role: String,
}

// ── Parsing helpers ─────────────────────────────────────────────────

pub(crate) fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

pub(crate) fn parse_fixed<B: FixedBucket>(value: Option<&str>) -> Result<Option<B>, CoreError> {
    match value {
        None | Some("") => Ok(None),
        Some(key) => B::from_key(key)
            .map(Some)
            .ok_or_else(|| CoreError::unknown_bucket(B::CATEGORY, key)),
    }
}

pub(crate) fn parse_role(value: Option<&str>) -> Result<Option<SwitchRole>, CoreError> {
    match value {
        None | Some("") => Ok(None),
        Some(external) => SwitchRole::from_external(external).map(Some),
    }
}
