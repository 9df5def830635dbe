// ── Engine configuration ──
//
// What the aggregator needs at construction. Never read from disk here:
// the CLI resolves its config file and hands an `EngineConfig` in.

use std::path::PathBuf;

use crate::model::FabricName;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Fabrics to initialize up front, before any switch is reported.
    pub preload_fabrics: Vec<FabricName>,
    /// Where bucket rows are loaded from and persisted to. `None` keeps
    /// everything in memory.
    pub state_file: Option<PathBuf>,
}

impl EngineConfig {
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn with_state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = Some(path.into());
        self
    }

    pub fn with_preload(mut self, fabrics: impl IntoIterator<Item = impl Into<FabricName>>) -> Self {
        self.preload_fabrics
            .extend(fabrics.into_iter().map(Into::into));
        self
    }
}
