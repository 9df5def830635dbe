//! Command dispatch: bridges CLI args -> overview engine -> output formatting.

pub mod config_cmd;
pub mod fabric;
pub mod overview;
pub mod replay;
pub mod roles;
pub mod switch;
pub mod util;

use fabricsim_core::OverviewAggregator;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch an engine-bound command to the appropriate handler.
pub fn dispatch(
    cmd: Command,
    aggregator: &OverviewAggregator,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Fabric(args) => fabric::handle(aggregator, args, global),
        Command::Switch(args) => switch::handle(aggregator, args, global),
        Command::Replay(args) => replay::handle(aggregator, &args, global),
        Command::Overview(args) => overview::handle(aggregator, &args, global),
        Command::Roles => roles::handle(global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
