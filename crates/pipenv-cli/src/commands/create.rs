//! Create command implementation

use colored::Colorize;
use pipenv_core::{InstallOrchestrator, SystemRunner, TracingReporter};

use super::print_outcome;
use crate::context::ProjectContext;
use crate::error::Result;

/// Let pipenv create the virtual environment of each environment.
pub fn run_create(ctx: &ProjectContext, envs: &[String]) -> Result<()> {
    let runner = SystemRunner;
    let reporter = TracingReporter;
    let orchestrator = InstallOrchestrator::new(&ctx.config, &runner, &reporter);

    for name in envs {
        println!(
            "{} {}: creating virtual environment",
            "=>".blue().bold(),
            name.cyan()
        );
        let settings = ctx.host.environment(name);
        let outcome = orchestrator.create_env(&settings)?;
        print_outcome(name, &outcome);
    }

    Ok(())
}
