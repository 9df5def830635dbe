//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;

use fabricsim_core::{Category, OverviewEvent, SwitchAttributes, SwitchRole, SyncStatus};

use crate::cli::SwitchAttrArgs;
use crate::error::CliError;

/// Bring a user-typed value into the spelling the engine expects.
///
/// Sync accepts the inventory spelling (`In-Sync`); roles accept the
/// URL-encoded, mixed-case form the topology endpoint receives. Blank
/// means unset.
pub fn engine_value(category: Category, raw: Option<&str>) -> Result<String, CliError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(String::new());
    };
    let value = match category {
        Category::Sync => SyncStatus::normalize(raw),
        Category::Role => SwitchRole::from_query_param(raw)?.external().to_owned(),
        Category::Health | Category::HwModel | Category::SwVersion => raw.to_owned(),
    };
    Ok(value)
}

impl SwitchAttrArgs {
    /// Translate flag values into engine attributes.
    pub fn to_attributes(&self) -> Result<SwitchAttributes, CliError> {
        let field = |category: Category, raw: Option<&str>| -> Result<Option<String>, CliError> {
            let value = engine_value(category, raw)?;
            Ok((!value.is_empty()).then_some(value))
        };
        Ok(SwitchAttributes {
            sync: field(Category::Sync, self.sync.as_deref())?,
            health: field(Category::Health, self.health.as_deref())?,
            hw_model: field(Category::HwModel, self.hw_model.as_deref())?,
            sw_version: field(Category::SwVersion, self.sw_version.as_deref())?,
            role: field(Category::Role, self.role.as_deref())?,
        })
    }
}

/// Read an event batch. `.yaml` / `.yml` parse as YAML, anything else as
/// JSON; `-` reads JSON from stdin.
pub fn read_events(path: &Path) -> Result<Vec<OverviewEvent>, CliError> {
    if path == Path::new("-") {
        let mut raw = String::new();
        std::io::stdin().read_to_string(&mut raw)?;
        return Ok(serde_json::from_str(&raw)?);
    }

    let raw = std::fs::read_to_string(path)?;
    let yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));
    if yaml {
        Ok(serde_yaml::from_str(&raw)?)
    } else {
        Ok(serde_json::from_str(&raw)?)
    }
}
