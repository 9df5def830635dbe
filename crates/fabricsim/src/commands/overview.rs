//! Overview display: the per-fabric rollup in the controller's shape.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use tabled::Tabled;

use fabricsim_core::{
    FixedBucket, HealthStatus, OverviewAggregator, OverviewSnapshot, SwitchRole, SyncStatus,
};

use crate::cli::{GlobalOpts, OverviewArgs};
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Switches")]
    count: String,
}

pub fn handle(
    aggregator: &OverviewAggregator,
    args: &OverviewArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let snap = aggregator.snapshot(&args.fabric)?;
    let color = output::should_color(&global.color_mode());
    let out = output::render_single(
        &global.format(),
        &snap,
        |s| detail(&args.fabric, s, color),
        |_| args.fabric.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn detail(fabric: &str, snap: &OverviewSnapshot, color: bool) -> String {
    let row = |value: &str, count: u64| CountRow {
        value: value.to_owned(),
        count: output::count(count, color),
    };

    let sync: Vec<_> = SyncStatus::all()
        .iter()
        .map(|s| row(s.key(), snap.sync.get(*s)))
        .collect();
    let health: Vec<_> = HealthStatus::all()
        .iter()
        .map(|h| row(h.key(), snap.health.get(*h)))
        .collect();
    let roles: Vec<_> = SwitchRole::all()
        .iter()
        .map(|r| row(r.external(), snap.role_count(*r)))
        .collect();
    let open = |counts: &BTreeMap<String, u64>| -> Vec<CountRow> {
        counts.iter().map(|(k, v)| row(k, *v)).collect()
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", output::heading(&format!("Fabric {fabric}"), color));
    section(&mut out, "Config Sync", &sync, color);
    section(&mut out, "Health", &health, color);
    section(&mut out, "Hardware Models", &open(&snap.hw_model), color);
    section(&mut out, "Software Versions", &open(&snap.sw_version), color);
    section(&mut out, "Roles", &roles, color);
    out
}

fn section(out: &mut String, title: &str, rows: &[CountRow], color: bool) {
    let _ = writeln!(out, "\n{}", output::heading(title, color));
    if rows.is_empty() {
        let _ = writeln!(out, "  (none)");
    } else {
        let _ = writeln!(out, "{}", output::render_table(rows));
    }
}
