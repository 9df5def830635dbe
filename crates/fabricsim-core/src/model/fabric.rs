// ── Fabric identity ──
//
// The engine never owns fabric records. It only partitions rollups by
// the fabric name handed in by the inventory layer.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Opaque, unique fabric key (the controller's `FABRIC_NAME`).
///
/// Compared byte-for-byte: `"F1"` and `"f1"` are different fabrics.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FabricName(String);

impl FabricName {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FabricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for FabricName {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for FabricName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for FabricName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for FabricName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FabricName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn fabric_name_is_case_sensitive() {
        assert_ne!(FabricName::from("F1"), FabricName::from("f1"));
    }

    #[test]
    fn fabric_name_display_round_trips() {
        let name: FabricName = "site-a-fabric".parse().unwrap();
        assert_eq!(name.to_string(), "site-a-fabric");
        assert_eq!(name.into_inner(), "site-a-fabric");
    }

    #[test]
    fn fabric_name_serializes_as_plain_string() {
        let json = serde_json::to_string(&FabricName::from("F1")).unwrap();
        assert_eq!(json, "\"F1\"");
    }
}
