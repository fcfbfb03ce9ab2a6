//! tox-pipenv CLI
//!
//! Drives the pipenv engine for the environments declared in
//! `tox-pipenv.toml`.

mod cli;
mod commands;
mod context;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use context::ProjectContext;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let cwd = std::env::current_dir()?;
    let ctx = ProjectContext::load(&cli, &cwd)?;
    tracing::debug!(root = %ctx.config.project_root, "loaded project context");

    match cli.command {
        Commands::Install(selection) => commands::run_install(&ctx, &selection.envs),
        Commands::Create(selection) => commands::run_create(&ctx, &selection.envs),
        Commands::Report(selection) => commands::run_report(&ctx, &selection.envs),
        Commands::Plan { selection, json } => commands::run_plan(&ctx, &selection.envs, json),
        Commands::List => commands::run_list(&ctx),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    result.map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
    if verbose {
        tracing::debug!("Verbose mode enabled");
    }
    Ok(())
}
