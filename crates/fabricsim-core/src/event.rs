// ── Inventory lifecycle events ──
//
// What the inventory layer tells the overview engine. Events carry raw
// attribute strings; validation into typed buckets happens in one place
// (`validate`) before anything is applied.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::model::switch::{non_empty, parse_fixed, parse_role};
use crate::model::{
    Category, HealthStatus, SwitchAttributes, SwitchContribution, SwitchRole, SyncStatus,
};

/// One switch lifecycle transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum OverviewEvent {
    SwitchAdded(SwitchAttributes),
    SwitchRemoved(SwitchAttributes),
    AttributeChanged { change: AttributeChange },
}

/// An in-place change of one attribute. Empty strings mean "unset".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum AttributeChange {
    Sync {
        #[serde(default)]
        old: String,
        #[serde(default)]
        new: String,
    },
    Health {
        #[serde(default)]
        old: String,
        #[serde(default)]
        new: String,
    },
    HwModel {
        #[serde(default)]
        old: String,
        #[serde(default)]
        new: String,
    },
    SwVersion {
        #[serde(default)]
        old: String,
        #[serde(default)]
        new: String,
    },
    /// External role spellings.
    Role {
        #[serde(default)]
        old: String,
        #[serde(default)]
        new: String,
    },
}

impl AttributeChange {
    pub fn new(category: Category, old: impl Into<String>, new: impl Into<String>) -> Self {
        let (old, new) = (old.into(), new.into());
        match category {
            Category::Sync => Self::Sync { old, new },
            Category::Health => Self::Health { old, new },
            Category::HwModel => Self::HwModel { old, new },
            Category::SwVersion => Self::SwVersion { old, new },
            Category::Role => Self::Role { old, new },
        }
    }

    pub fn role(old: impl Into<String>, new: impl Into<String>) -> Self {
        Self::new(Category::Role, old, new)
    }

    pub fn category(&self) -> Category {
        match self {
            Self::Sync { .. } => Category::Sync,
            Self::Health { .. } => Category::Health,
            Self::HwModel { .. } => Category::HwModel,
            Self::SwVersion { .. } => Category::SwVersion,
            Self::Role { .. } => Category::Role,
        }
    }

    pub fn values(&self) -> (&str, &str) {
        match self {
            Self::Sync { old, new }
            | Self::Health { old, new }
            | Self::HwModel { old, new }
            | Self::SwVersion { old, new }
            | Self::Role { old, new } => (old.as_str(), new.as_str()),
        }
    }

    pub(crate) fn validate(&self) -> Result<ValidatedChange, CoreError> {
        let (old, new) = self.values();
        let (old, new) = (Some(old), Some(new));
        Ok(match self {
            Self::Sync { .. } => ValidatedChange::Sync(parse_fixed(old)?, parse_fixed(new)?),
            Self::Health { .. } => ValidatedChange::Health(parse_fixed(old)?, parse_fixed(new)?),
            Self::HwModel { .. } => ValidatedChange::HwModel(non_empty(old), non_empty(new)),
            Self::SwVersion { .. } => ValidatedChange::SwVersion(non_empty(old), non_empty(new)),
            Self::Role { .. } => ValidatedChange::Role(parse_role(old)?, parse_role(new)?),
        })
    }
}

impl OverviewEvent {
    pub(crate) fn validate(&self) -> Result<ValidatedEvent, CoreError> {
        Ok(match self {
            Self::SwitchAdded(attrs) => ValidatedEvent::Added(attrs.validate()?),
            Self::SwitchRemoved(attrs) => ValidatedEvent::Removed(attrs.validate()?),
            Self::AttributeChanged { change } => ValidatedEvent::Changed(change.validate()?),
        })
    }
}

// ── Validated forms ──────────────────────────────────────────────────

/// Typed `(old, new)` pair; `None` means nothing to decrement/increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValidatedChange {
    Sync(Option<SyncStatus>, Option<SyncStatus>),
    Health(Option<HealthStatus>, Option<HealthStatus>),
    HwModel(Option<String>, Option<String>),
    SwVersion(Option<String>, Option<String>),
    Role(Option<SwitchRole>, Option<SwitchRole>),
}

impl ValidatedChange {
    pub(crate) fn is_noop(&self) -> bool {
        match self {
            Self::Sync(o, n) => o == n,
            Self::Health(o, n) => o == n,
            Self::HwModel(o, n) | Self::SwVersion(o, n) => o == n,
            Self::Role(o, n) => o == n,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ValidatedEvent {
    Added(SwitchContribution),
    Removed(SwitchContribution),
    Changed(ValidatedChange),
}
