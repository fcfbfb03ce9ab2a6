//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default host settings file name
pub const DEFAULT_SETTINGS_FILE: &str = "tox-pipenv.toml";

/// tox-pipenv - Install test environment dependencies with pipenv
#[derive(Parser, Debug)]
#[command(name = "tox-pipenv")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root; defaults to the nearest directory holding the settings file
    #[arg(long, global = true, env = "TOX_PIPENV_PROJECT_ROOT")]
    pub project_root: Option<PathBuf>,

    /// Host settings file, relative to the project root
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    pub config: PathBuf,

    /// Run `pipenv update` and copy the resulting lock into the project
    #[arg(long, global = true)]
    pub pipenv_update: bool,

    /// Run `pipenv lock`, copy the lock into the project, then sync from it
    #[arg(long, global = true)]
    pub pipenv_lock: bool,

    /// Interpreter used to launch `-m pipenv`
    #[arg(long, global = true, env = "TOX_PIPENV_PYTHON")]
    pub python: Option<String>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Environments to act on
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EnvSelection {
    /// Environment names (repeatable or comma-separated)
    #[arg(short = 'e', long = "env", value_delimiter = ',', required = true)]
    pub envs: Vec<String>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install dependencies into environments
    Install(EnvSelection),

    /// Create virtual environments with pipenv
    Create(EnvSelection),

    /// Print the installed dependency graph
    Report(EnvSelection),

    /// Show what install would run, without running or writing anything
    Plan {
        #[command(flatten)]
        selection: EnvSelection,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List environments configured in the settings file
    List,
}
