//! Batch replay of recorded inventory events.

use serde::Serialize;

use fabricsim_core::OverviewAggregator;

use crate::cli::{GlobalOpts, ReplayArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct ReplayReport<'a> {
    fabric: &'a str,
    events: usize,
    applied: usize,
}

pub fn handle(
    aggregator: &OverviewAggregator,
    args: &ReplayArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let events = util::read_events(&args.file)?;
    let applied = aggregator.apply_batch(&args.fabric, &events)?;
    tracing::info!(fabric = %args.fabric, events = events.len(), applied, "replayed batch");

    let report = ReplayReport {
        fabric: &args.fabric,
        events: events.len(),
        applied,
    };
    let out = output::render_single(
        &global.format(),
        &report,
        |r| {
            format!(
                "Applied {} of {} events to '{}'",
                r.applied, r.events, r.fabric
            )
        },
        |r| r.applied.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
