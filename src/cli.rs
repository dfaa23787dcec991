use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "chefprov")]
#[command(version)]
#[command(about = "Check Chef provider configuration and preview state normalization", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the provider configuration and show the result
    Configure(ConfigureArgs),

    /// Check a Chef server URL
    ValidateUrl {
        /// URL to check
        url: String,
    },

    /// Print the canonical form of a value
    #[command(subcommand)]
    Normalize(NormalizeCommand),

    /// Show which attribute changes survive normalization
    Plan(PlanArgs),

    /// List the provider fields
    Schema,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ConfigureArgs {
    /// Attribute document (TOML or JSON). Defaults to provider.toml in the config dir
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum NormalizeCommand {
    /// Canonicalize a JSON object ("-" reads stdin)
    Json {
        /// JSON text
        value: String,
    },

    /// Qualify run-list entries
    RunList {
        /// Entries such as "nginx" or "role[web]"
        #[arg(required = true)]
        entries: Vec<String>,
    },
}

#[derive(Args)]
pub struct PlanArgs {
    /// Previously recorded attributes
    #[arg(long)]
    pub old: PathBuf,

    /// Desired attributes
    #[arg(long)]
    pub new: PathBuf,

    /// Treat a field as a JSON object (fields ending in _json are by default)
    #[arg(long = "structured", value_name = "FIELD")]
    pub structured: Vec<String>,

    /// Treat a field as a run list (run_list is by default)
    #[arg(long = "run-list", value_name = "FIELD")]
    pub run_list: Vec<String>,
}
