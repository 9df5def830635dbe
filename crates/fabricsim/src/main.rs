mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fabricsim_core::{OverviewAggregator, StateLock};

use crate::cli::{Cli, Command};
use crate::error::CliError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup tracing based on verbosity
    init_tracing(cli.global.verbose, cli.global.log_json);

    // Dispatch and handle errors with proper exit codes
    if let Err(err) = run(cli) {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Logs go to stderr so structured stdout stays parseable.
fn init_tracing(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let Cli { mut global, command } = cli;

    match command {
        // Config commands don't need the engine
        Command::Config(args) => commands::config_cmd::handle(args, &global),

        // Shell completions generation
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "fabricsim", &mut std::io::stdout());
            Ok(())
        }

        // Everything else runs against the overview engine
        cmd => {
            let cfg = config::load(&global)?;
            config::apply_defaults(&mut global, &cfg);

            let engine_config = config::engine_config(&cfg, &global);
            let mutates = cmd.mutates();

            // Held from load to save so concurrent runs cannot drop each
            // other's updates.
            let _lock = match &engine_config.state_file {
                Some(path) if mutates => Some(StateLock::acquire(path)?),
                _ => None,
            };
            let aggregator = OverviewAggregator::from_config(&engine_config)?;

            tracing::debug!(command = ?cmd, state_file = ?engine_config.state_file, "dispatching command");
            commands::dispatch(cmd, &aggregator, &global)?;

            if mutates && aggregator.persist()? {
                tracing::debug!("overview state saved");
            }
            Ok(())
        }
    }
}
