// ── Inventory-to-overview conversions ──
//
// Bridges the controller's inventory switch record into the attribute
// set the aggregator counts. The inventory spells sync status the way
// the UI shows it ("In-Sync"), so it is normalized here; the stores
// themselves only accept storage keys.

use crate::model::{InventorySwitch, SwitchAttributes, SyncStatus};

impl From<&InventorySwitch> for SwitchAttributes {
    fn from(sw: &InventorySwitch) -> Self {
        Self {
            sync: non_empty(SyncStatus::normalize(&sw.cc_status)),
            health: non_empty(sw.oper_status.clone()),
            hw_model: non_empty(sw.model.clone()),
            sw_version: non_empty(sw.release.clone()),
            role: non_empty(sw.switch_role.clone()),
        }
    }
}

impl From<InventorySwitch> for SwitchAttributes {
    fn from(sw: InventorySwitch) -> Self {
        Self::from(&sw)
    }
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}
