// ── Overview categories ──
//
// Five independent dimensions of per-fabric switch counts. Three have a
// closed vocabulary known at compile time (`FixedBucket` implementors),
// two are keyed by whatever model/version strings the inventory reports.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

/// One rollup dimension of the switch overview.
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
pub enum Category {
    Sync,
    Health,
    HwModel,
    SwVersion,
    Role,
}

impl Category {
    /// Whether the bucket vocabulary is fixed at compile time.
    pub fn is_fixed(self) -> bool {
        matches!(self, Self::Sync | Self::Health | Self::Role)
    }
}

/// A bucket in a closed-vocabulary category.
///
/// `key()` is the storage-facing spelling (the column name in the
/// controller's overview tables); `from_key()` is its exact inverse.
pub trait FixedBucket: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    const CATEGORY: Category;

    /// Every bucket in the vocabulary, in export order.
    fn all() -> &'static [Self];

    fn key(self) -> &'static str;

    fn from_key(key: &str) -> Option<Self>;
}
