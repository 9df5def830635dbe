// ── Switch role vocabulary ──
//
// Roles cross two key spaces. The REST surface speaks the external
// spelling ("border gateway spine"), the overview tables store the
// internal one ("border_gateway_spine"). Both directions are spelled out
// as exhaustive matches so adding a role is a compile error until every
// table is updated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{EnumCount, EnumIter};

use super::category::{Category, FixedBucket};
use crate::error::CoreError;

/// The 14 roles tracked by the switch overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter, EnumCount)]
pub enum SwitchRole {
    Access,
    Aggregation,
    Border,
    BorderGateway,
    BorderGatewaySpine,
    BorderGatewaySuperSpine,
    BorderSpine,
    BorderSuperSpine,
    CoreRouter,
    EdgeRouter,
    Leaf,
    Spine,
    SuperSpine,
    Tor,
}

impl SwitchRole {
    const ALL: [Self; 14] = [
        Self::Access,
        Self::Aggregation,
        Self::Border,
        Self::BorderGateway,
        Self::BorderGatewaySpine,
        Self::BorderGatewaySuperSpine,
        Self::BorderSpine,
        Self::BorderSuperSpine,
        Self::CoreRouter,
        Self::EdgeRouter,
        Self::Leaf,
        Self::Spine,
        Self::SuperSpine,
        Self::Tor,
    ];

    /// Human-facing spelling used at the REST boundary.
    pub fn external(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Aggregation => "aggregation",
            Self::Border => "border",
            Self::BorderGateway => "border gateway",
            Self::BorderGatewaySpine => "border gateway spine",
            Self::BorderGatewaySuperSpine => "border gateway super spine",
            Self::BorderSpine => "border spine",
            Self::BorderSuperSpine => "border super spine",
            Self::CoreRouter => "core router",
            Self::EdgeRouter => "edge router",
            Self::Leaf => "leaf",
            Self::Spine => "spine",
            Self::SuperSpine => "super spine",
            Self::Tor => "tor",
        }
    }

    /// Storage-facing spelling used as the bucket key.
    pub fn internal(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Aggregation => "aggregation",
            Self::Border => "border",
            Self::BorderGateway => "border_gateway",
            Self::BorderGatewaySpine => "border_gateway_spine",
            Self::BorderGatewaySuperSpine => "border_gateway_super_spine",
            Self::BorderSpine => "border_spine",
            Self::BorderSuperSpine => "border_super_spine",
            Self::CoreRouter => "core_router",
            Self::EdgeRouter => "edge_router",
            Self::Leaf => "leaf",
            Self::Spine => "spine",
            Self::SuperSpine => "super_spine",
            Self::Tor => "tor",
        }
    }

    /// Strict parse of the external spelling. Case-sensitive.
    pub fn from_external(value: &str) -> Result<Self, CoreError> {
        let role = match value {
            "access" => Self::Access,
            "aggregation" => Self::Aggregation,
            "border" => Self::Border,
            "border gateway" => Self::BorderGateway,
            "border gateway spine" => Self::BorderGatewaySpine,
            "border gateway super spine" => Self::BorderGatewaySuperSpine,
            "border spine" => Self::BorderSpine,
            "border super spine" => Self::BorderSuperSpine,
            "core router" => Self::CoreRouter,
            "edge router" => Self::EdgeRouter,
            "leaf" => Self::Leaf,
            "spine" => Self::Spine,
            "super spine" => Self::SuperSpine,
            "tor" => Self::Tor,
            _ => return Err(CoreError::invalid_role(value)),
        };
        Ok(role)
    }

    /// Strict parse of the internal spelling. Case-sensitive.
    pub fn from_internal(key: &str) -> Result<Self, CoreError> {
        let role = match key {
            "access" => Self::Access,
            "aggregation" => Self::Aggregation,
            "border" => Self::Border,
            "border_gateway" => Self::BorderGateway,
            "border_gateway_spine" => Self::BorderGatewaySpine,
            "border_gateway_super_spine" => Self::BorderGatewaySuperSpine,
            "border_spine" => Self::BorderSpine,
            "border_super_spine" => Self::BorderSuperSpine,
            "core_router" => Self::CoreRouter,
            "edge_router" => Self::EdgeRouter,
            "leaf" => Self::Leaf,
            "spine" => Self::Spine,
            "super_spine" => Self::SuperSpine,
            "tor" => Self::Tor,
            _ => return Err(CoreError::invalid_role(key)),
        };
        Ok(role)
    }

    /// Parse a role taken from a URL query parameter.
    ///
    /// The topology endpoint receives `border%20gateway` style values in
    /// arbitrary case; decode the spaces and lowercase before the strict
    /// external parse.
    pub fn from_query_param(raw: &str) -> Result<Self, CoreError> {
        let decoded = raw.replace("%20", " ").to_lowercase();
        Self::from_external(&decoded)
    }
}

impl fmt::Display for SwitchRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.external())
    }
}

impl FromStr for SwitchRole {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_external(s)
    }
}

impl Serialize for SwitchRole {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.external())
    }
}

impl<'de> Deserialize<'de> for SwitchRole {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_external(&raw).map_err(serde::de::Error::custom)
    }
}

impl FixedBucket for SwitchRole {
    const CATEGORY: Category = Category::Role;

    fn all() -> &'static [Self] {
        &Self::ALL
    }

    fn key(self) -> &'static str {
        self.internal()
    }

    fn from_key(key: &str) -> Option<Self> {
        Self::from_internal(key).ok()
    }
}

// ── KeyTranslator ───────────────────────────────────────────────────

/// String-level bridge between the external and internal role key spaces.
pub struct KeyTranslator;

impl KeyTranslator {
    /// `"border gateway spine"` → `"border_gateway_spine"`.
    pub fn external_to_internal(value: &str) -> Result<&'static str, CoreError> {
        SwitchRole::from_external(value).map(SwitchRole::internal)
    }

    /// `"border_gateway_spine"` → `"border gateway spine"`.
    pub fn internal_to_external(key: &str) -> Result<&'static str, CoreError> {
        SwitchRole::from_internal(key).map(SwitchRole::external)
    }
}
