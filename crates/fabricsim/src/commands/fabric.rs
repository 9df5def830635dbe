//! Fabric command handlers.

use serde::Serialize;
use tabled::Tabled;

use fabricsim_core::{OverviewAggregator, OverviewSnapshot};

use crate::cli::{FabricArgs, FabricCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

// ── Summary model ───────────────────────────────────────────────────

/// Headline numbers of one fabric overview.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FabricSummary {
    fabric: String,
    in_sync: u64,
    out_of_sync: u64,
    healthy: u64,
    major: u64,
    minor: u64,
    hw_models: usize,
    sw_versions: usize,
    roled: u64,
}

impl FabricSummary {
    fn new(fabric: String, snap: &OverviewSnapshot) -> Self {
        Self {
            fabric,
            in_sync: snap.sync.in_sync,
            out_of_sync: snap.sync.out_of_sync,
            healthy: snap.health.healthy,
            major: snap.health.major,
            minor: snap.health.minor,
            hw_models: snap.hw_model.len(),
            sw_versions: snap.sw_version.len(),
            roled: snap.roled_switches(),
        }
    }
}

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct FabricRow {
    #[tabled(rename = "Fabric")]
    fabric: String,
    #[tabled(rename = "In Sync")]
    in_sync: u64,
    #[tabled(rename = "Out Of Sync")]
    out_of_sync: u64,
    #[tabled(rename = "Healthy")]
    healthy: u64,
    #[tabled(rename = "Major")]
    major: u64,
    #[tabled(rename = "Minor")]
    minor: u64,
    #[tabled(rename = "Models")]
    hw_models: usize,
    #[tabled(rename = "Versions")]
    sw_versions: usize,
    #[tabled(rename = "With Role")]
    roled: u64,
}

impl From<&FabricSummary> for FabricRow {
    fn from(s: &FabricSummary) -> Self {
        Self {
            fabric: s.fabric.clone(),
            in_sync: s.in_sync,
            out_of_sync: s.out_of_sync,
            healthy: s.healthy,
            major: s.major,
            minor: s.minor,
            hw_models: s.hw_models,
            sw_versions: s.sw_versions,
            roled: s.roled,
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(
    aggregator: &OverviewAggregator,
    args: FabricArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        FabricCommand::Init { names } => {
            for name in &names {
                let created = aggregator.initialize(name);
                if !global.quiet {
                    if created {
                        eprintln!("Fabric '{name}' initialized");
                    } else {
                        eprintln!("Fabric '{name}' already initialized");
                    }
                }
            }
            Ok(())
        }

        FabricCommand::Delete { name } => {
            if !aggregator.destroy(&name) {
                return Err(CliError::NotFound {
                    resource_type: "fabric".into(),
                    identifier: name,
                    list_command: "fabric list".into(),
                });
            }
            if !global.quiet {
                eprintln!("Fabric '{name}' deleted");
            }
            Ok(())
        }

        FabricCommand::List => {
            let summaries = aggregator
                .fabrics()
                .into_iter()
                .map(|f| {
                    let snap = aggregator.snapshot(f.as_str())?;
                    Ok(FabricSummary::new(f.into_inner(), &snap))
                })
                .collect::<Result<Vec<_>, CliError>>()?;
            let out = output::render_list(
                &global.format(),
                &summaries,
                |s| FabricRow::from(s),
                |s| s.fabric.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
