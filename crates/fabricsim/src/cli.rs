//! Clap derive structures for the `fabricsim` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use fabricsim_core::Category;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fabricsim -- switch overview rollups for the fabric controller emulator
#[derive(Debug, Parser)]
#[command(
    name = "fabricsim",
    version,
    about = "Maintain per-fabric switch overview counts",
    long_about = "Feeds switch lifecycle events into the overview engine and shows the\n\
        resulting per-fabric rollups (config sync, health, hardware model,\n\
        software version, role) in the controller's overview shape.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config file (defaults to the platform config directory)
    #[arg(long = "config", env = "FABRICSIM_CONFIG", global = true)]
    pub config_file: Option<PathBuf>,

    /// State file holding the overview rows (overrides config)
    #[arg(long, env = "FABRICSIM_STATE_FILE", global = true)]
    pub state_file: Option<PathBuf>,

    /// Do not load or save any state
    #[arg(long, global = true, conflicts_with = "state_file")]
    pub ephemeral: bool,

    /// Output format (defaults to the configured one, then table)
    #[arg(long, short = 'o', env = "FABRICSIM_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

/// Fabric names are compared byte-for-byte by the engine, so surrounding
/// whitespace is dropped here, once, for every command.
fn fabric_name(raw: &str) -> Result<String, String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err("fabric name cannot be blank".into());
    }
    Ok(name.to_owned())
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create, delete and list fabric overviews
    #[command(alias = "f")]
    Fabric(FabricArgs),

    /// Report switch lifecycle transitions
    #[command(alias = "sw")]
    Switch(SwitchArgs),

    /// Apply a JSON or YAML batch of events to one fabric, all or nothing
    Replay(ReplayArgs),

    /// Show the overview rollup for a fabric
    #[command(alias = "ov")]
    Overview(OverviewArgs),

    /// List the role vocabulary in both spellings
    Roles,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

impl Command {
    /// Whether the command can change overview state (and so needs saving).
    pub fn mutates(&self) -> bool {
        match self {
            Self::Fabric(args) => !matches!(args.command, FabricCommand::List),
            Self::Switch(_) | Self::Replay(_) => true,
            Self::Overview(_) | Self::Roles | Self::Config(_) | Self::Completions(_) => false,
        }
    }
}

// ── Fabric ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct FabricArgs {
    #[command(subcommand)]
    pub command: FabricCommand,
}

#[derive(Debug, Subcommand)]
pub enum FabricCommand {
    /// Initialize zeroed overview stores for one or more fabrics
    Init {
        /// Fabric names
        #[arg(required = true, value_parser = fabric_name)]
        names: Vec<String>,
    },

    /// Drop every overview store of a fabric
    #[command(alias = "rm")]
    Delete {
        /// Fabric name
        #[arg(value_parser = fabric_name)]
        name: String,
    },

    /// List initialized fabrics with headline counts
    #[command(alias = "ls")]
    List,
}

// ── Switch ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SwitchArgs {
    #[command(subcommand)]
    pub command: SwitchCommand,
}

/// Attribute values of one switch. Omitted values contribute nothing.
#[derive(Debug, Clone, Args)]
pub struct SwitchAttrArgs {
    /// Config sync status (in_sync, out_of_sync; In-Sync is accepted)
    #[arg(long)]
    pub sync: Option<String>,

    /// Health (Healthy, Major, Minor)
    #[arg(long)]
    pub health: Option<String>,

    /// Hardware model, e.g. N9K-C93180YC-EX
    #[arg(long)]
    pub hw_model: Option<String>,

    /// Software version, e.g. "10.2(5)"
    #[arg(long)]
    pub sw_version: Option<String>,

    /// Role in external spelling, e.g. "border gateway"
    #[arg(long)]
    pub role: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum SwitchCommand {
    /// Count a newly discovered switch
    Add {
        /// Fabric name
        #[arg(value_parser = fabric_name)]
        fabric: String,

        #[command(flatten)]
        attrs: SwitchAttrArgs,
    },

    /// Uncount a removed switch, using the values it had
    #[command(alias = "rm")]
    Remove {
        /// Fabric name
        #[arg(value_parser = fabric_name)]
        fabric: String,

        #[command(flatten)]
        attrs: SwitchAttrArgs,
    },

    /// Move a switch to another role (URL-encoded and mixed-case input accepted)
    SetRole {
        /// Fabric name
        #[arg(value_parser = fabric_name)]
        fabric: String,

        /// Current role; omit when the switch had none
        #[arg(long)]
        from: Option<String>,

        /// New role; omit to clear the role
        #[arg(long)]
        to: Option<String>,
    },

    /// Move a switch between two buckets of any category
    Set {
        /// Fabric name
        #[arg(value_parser = fabric_name)]
        fabric: String,

        /// Category to change
        #[arg(value_enum)]
        category: CategoryArg,

        /// Current value; omit when unset
        #[arg(long)]
        from: Option<String>,

        /// New value; omit to unset
        #[arg(long)]
        to: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Sync,
    Health,
    HwModel,
    SwVersion,
    Role,
}

impl From<CategoryArg> for Category {
    fn from(arg: CategoryArg) -> Self {
        match arg {
            CategoryArg::Sync => Self::Sync,
            CategoryArg::Health => Self::Health,
            CategoryArg::HwModel => Self::HwModel,
            CategoryArg::SwVersion => Self::SwVersion,
            CategoryArg::Role => Self::Role,
        }
    }
}

// ── Replay ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Fabric the events apply to
    #[arg(value_parser = fabric_name)]
    pub fabric: String,

    /// Event file (.json, .yaml or .yml); `-` reads JSON from stdin
    pub file: PathBuf,
}

// ── Overview ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct OverviewArgs {
    /// Fabric name
    #[arg(value_parser = fabric_name)]
    pub fabric: String,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
